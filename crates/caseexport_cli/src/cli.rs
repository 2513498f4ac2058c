use std::path::PathBuf;

use clap::Parser;
use serde_json::Value;

/// Default configuration file, relative to the working directory.
pub const C_PATH_CONFIG_DEFAULT: &str = "Config/config.toml";

#[derive(Parser, Debug, Clone)]
#[command(name = "caseexport")]
#[command(about = "Export one debt-recovery case and its related records to an xlsx report")]
#[command(version)]
pub struct CliArgs {
    /// Incident id of the case to export
    #[arg(value_name = "INCIDENT_ID")]
    pub incident_id: String,

    /// Path to the TOML configuration file [default: Config/config.toml]
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Directory of <collection>.json exports (overrides [database].store_dir)
    #[arg(long, value_name = "DIR")]
    pub store_dir: Option<PathBuf>,

    /// Output directory for the workbook (overrides [export].output_dir)
    #[arg(long, short = 'o', value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Append the Commissions table to the report
    #[arg(long)]
    pub include_commissions: bool,

    /// Assemble the report in memory and print its summary without writing a file
    #[arg(long)]
    pub dry_run: bool,
}

impl CliArgs {
    pub fn parse_args() -> Self {
        CliArgs::parse()
    }

    /// Config path and whether it must exist.
    ///
    /// Only the implicit default may be absent; any path given on the command
    /// line is required, even when it equals the default.
    pub fn derive_config_path(&self) -> (PathBuf, bool) {
        match &self.config {
            Some(path) => (path.clone(), true),
            None => (PathBuf::from(C_PATH_CONFIG_DEFAULT), false),
        }
    }

    /// Incident id as matched against the store: integer when it parses as one.
    pub fn derive_incident_id(&self) -> Value {
        parse_incident_id(&self.incident_id)
    }
}

pub fn parse_incident_id(raw: &str) -> Value {
    let c_trimmed = raw.trim();
    match c_trimmed.parse::<i64>() {
        Ok(n) => Value::from(n),
        Err(_) => Value::String(c_trimmed.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_parse_incident_id() {
        assert_eq!(parse_incident_id("9001"), json!(9001));
        assert_eq!(parse_incident_id(" 42 "), json!(42));
        assert_eq!(parse_incident_id("INC-7"), json!("INC-7"));
        assert_eq!(parse_incident_id("12.5"), json!("12.5"));
    }

    #[test]
    fn test_cli_args_defaults_and_flags() {
        let args = CliArgs::try_parse_from(["caseexport", "9001"]).unwrap();
        assert!(args.config.is_none());
        assert_eq!(
            args.derive_config_path(),
            (PathBuf::from(C_PATH_CONFIG_DEFAULT), false)
        );
        assert!(args.store_dir.is_none());
        assert!(!args.include_commissions);
        assert!(!args.dry_run);
        assert_eq!(args.derive_incident_id(), json!(9001));

        let args = CliArgs::try_parse_from([
            "caseexport",
            "INC-7",
            "--store-dir",
            "dump",
            "-o",
            "out",
            "--include-commissions",
            "--dry-run",
        ])
        .unwrap();
        assert_eq!(args.store_dir, Some(PathBuf::from("dump")));
        assert_eq!(args.output_dir, Some(PathBuf::from("out")));
        assert!(args.include_commissions);
        assert!(args.dry_run);
    }

    #[test]
    fn test_explicit_default_config_path_is_required() {
        let args =
            CliArgs::try_parse_from(["caseexport", "9001", "--config", C_PATH_CONFIG_DEFAULT])
                .unwrap();
        assert_eq!(args.config, Some(PathBuf::from(C_PATH_CONFIG_DEFAULT)));
        assert_eq!(
            args.derive_config_path(),
            (PathBuf::from(C_PATH_CONFIG_DEFAULT), true)
        );

        let args = CliArgs::try_parse_from(["caseexport", "9001", "-c", "alt.toml"]).unwrap();
        assert_eq!(args.derive_config_path(), (PathBuf::from("alt.toml"), true));
    }

    #[test]
    fn test_cli_args_require_incident_id() {
        assert!(CliArgs::try_parse_from(["caseexport"]).is_err());
    }
}
