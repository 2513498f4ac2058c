mod cli;
mod config;

use caseexport_report::{MemoryDocumentStore, export_case_report, preview_case_report};
use chrono::Local;
use log::{error, info};

use crate::cli::CliArgs;
use crate::config::{CliError, load_config};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse_args();
    if let Err(err) = run(&args) {
        error!("{err}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<(), CliError> {
    let (path_config, if_config_required) = args.derive_config_path();
    let mut config = load_config(&path_config, if_config_required)?;
    config.apply_cli_overrides(args);

    let styles = config.derive_report_styles();
    let options = config.derive_report_options();
    let store = MemoryDocumentStore::from_dir(&config.database.store_dir)?;
    let incident_id = args.derive_incident_id();

    if args.dry_run {
        let (grid, report) = preview_case_report(&store, &incident_id, &styles, &options)?;
        for section in &report.sections {
            println!(
                "{:>6}  {:<32} rows={}",
                section.row_first, section.title, section.cnt_rows
            );
        }
        println!("{} cells={}", report.format("[PREVIEW]"), grid.cell_count());
        return Ok(());
    }

    let report = export_case_report(
        &store,
        &incident_id,
        &config.export.output_dir,
        &styles,
        &options,
        &Local::now().naive_local(),
    )?;
    info!("{report}");
    for warning in &report.warnings {
        println!("warning: {warning}");
    }
    if let Some(path) = &report.path_file_out {
        println!("{}", path.display());
    }
    Ok(())
}
