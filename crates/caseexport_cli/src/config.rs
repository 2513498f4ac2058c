//! TOML configuration: store location, collection names, export options and styles.

use std::fs;
use std::path::{Path, PathBuf};

use caseexport_io_xlsx::{
    C_SHEET_NAME_DEFAULT, SpecCellFormat, SpecReportStyles, derive_default_report_styles,
};
use caseexport_report::{ReportError, SpecCollectionNames, SpecReportOptions, StoreError};
use log::info;
use serde::Deserialize;
use thiserror::Error;

use crate::cli::CliArgs;

////////////////////////////////////////////////////////////////////////////////
// #region Sections

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecDatabaseConfig {
    /// Directory of `<collection>.json` exports.
    pub store_dir: PathBuf,
    pub case_collection: String,
}

impl Default for SpecDatabaseConfig {
    fn default() -> Self {
        Self {
            store_dir: PathBuf::from("data"),
            case_collection: SpecCollectionNames::default().case_details,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecCollectionsConfig {
    pub settlements: String,
    pub payments: String,
    pub commissions: String,
    pub arrears_bands: String,
}

impl Default for SpecCollectionsConfig {
    fn default() -> Self {
        let names = SpecCollectionNames::default();
        Self {
            settlements: names.settlements,
            payments: names.payments,
            commissions: names.commissions,
            arrears_bands: names.arrears_bands,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecExportConfig {
    pub output_dir: PathBuf,
    pub file_prefix: String,
    pub sheet_name: String,
    pub include_commissions: bool,
}

impl Default for SpecExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("exports"),
            file_prefix: SpecReportOptions::default().file_prefix,
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
            include_commissions: false,
        }
    }
}

/// Style overlays; unset fields keep the default style set.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecStylesConfig {
    pub banner: SpecCellFormat,
    pub sub_header: SpecCellFormat,
    pub cell: SpecCellFormat,
    pub emphasis: SpecCellFormat,
}

/// Whole configuration file. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecAppConfig {
    pub database: SpecDatabaseConfig,
    pub collections: SpecCollectionsConfig,
    pub export: SpecExportConfig,
    pub styles: SpecStylesConfig,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Derivation

impl SpecAppConfig {
    /// Apply command-line overrides on top of file values.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(dir) = &args.store_dir {
            self.database.store_dir = dir.clone();
        }
        if let Some(dir) = &args.output_dir {
            self.export.output_dir = dir.clone();
        }
        if args.include_commissions {
            self.export.include_commissions = true;
        }
    }

    /// Default style set overlaid with the `[styles.*]` tables.
    pub fn derive_report_styles(&self) -> SpecReportStyles {
        let base = derive_default_report_styles();
        SpecReportStyles {
            fmt_banner: base.fmt_banner.merge(&self.styles.banner),
            fmt_sub_header: base.fmt_sub_header.merge(&self.styles.sub_header),
            fmt_cell: base.fmt_cell.merge(&self.styles.cell),
            fmt_emphasis: base.fmt_emphasis.merge(&self.styles.emphasis),
        }
    }

    pub fn derive_report_options(&self) -> SpecReportOptions {
        SpecReportOptions {
            file_prefix: self.export.file_prefix.clone(),
            sheet_name: self.export.sheet_name.clone(),
            if_include_commissions: self.export.include_commissions,
            collections: SpecCollectionNames {
                case_details: self.database.case_collection.clone(),
                settlements: self.collections.settlements.clone(),
                payments: self.collections.payments.clone(),
                commissions: self.collections.commissions.clone(),
                arrears_bands: self.collections.arrears_bands.clone(),
            },
        }
    }
}

/// Read and parse `path_config`.
///
/// A missing file yields the defaults unless `if_required` is set.
pub fn load_config(path_config: &Path, if_required: bool) -> Result<SpecAppConfig, CliError> {
    if !path_config.exists() && !if_required {
        info!(
            "Config file {} not found, using defaults.",
            path_config.display()
        );
        return Ok(SpecAppConfig::default());
    }

    let c_text = fs::read_to_string(path_config).map_err(|source| CliError::ConfigRead {
        path: path_config.to_path_buf(),
        source,
    })?;
    let config = toml::from_str(&c_text).map_err(|source| CliError::ConfigParse {
        path: path_config.to_path_buf(),
        source,
    })?;
    info!("Config loaded from {}.", path_config.display());
    Ok(config)
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

#[derive(Debug, Error)]
pub enum CliError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Report(#[from] ReportError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    #[test]
    fn test_load_config_overlays_styles_and_names() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_config = tmp.path().join("config.toml");
        fs::write(
            &path_config,
            r##"
[database]
store_dir = "dump"

[collections]
payments = "Payments_v2"

[export]
file_prefix = "Case_Report"
include_commissions = true

[styles.banner]
bg_color = "#000000"
font_size = 14
"##,
        )
        .unwrap();

        let config = load_config(&path_config, true).unwrap();
        let options = config.derive_report_options();
        let styles = config.derive_report_styles();
        let base = derive_default_report_styles();

        assert_eq!(config.database.store_dir, PathBuf::from("dump"));
        assert_eq!(config.export.output_dir, PathBuf::from("exports"));
        assert_eq!(options.file_prefix, "Case_Report");
        assert_eq!(options.sheet_name, "Case Details");
        assert!(options.if_include_commissions);
        assert_eq!(options.collections.payments, "Payments_v2");
        assert_eq!(options.collections.settlements, "Case_settlements");
        assert_eq!(options.collections.case_details, "Case_details");

        assert_eq!(styles.fmt_banner.bg_color.as_deref(), Some("#000000"));
        assert_eq!(styles.fmt_banner.font_size, Some(14));
        assert_eq!(styles.fmt_banner.bold, base.fmt_banner.bold);
        assert_eq!(styles.fmt_cell, base.fmt_cell);
    }

    #[test]
    fn test_load_config_rejects_unknown_keys() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_config = tmp.path().join("config.toml");
        fs::write(&path_config, "[export]\nout_dir = \"x\"\n").unwrap();

        assert!(matches!(
            load_config(&path_config, true),
            Err(CliError::ConfigParse { .. })
        ));
    }

    #[test]
    fn test_load_config_missing_file() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_config = tmp.path().join("absent.toml");

        assert_eq!(
            load_config(&path_config, false).unwrap(),
            SpecAppConfig::default()
        );
        assert!(matches!(
            load_config(&path_config, true),
            Err(CliError::ConfigRead { .. })
        ));
    }

    #[test]
    fn test_cli_overrides_take_precedence() {
        let mut config = SpecAppConfig::default();
        let args = CliArgs::try_parse_from([
            "caseexport",
            "1",
            "--store-dir",
            "other",
            "--include-commissions",
        ])
        .unwrap();

        config.apply_cli_overrides(&args);

        assert_eq!(config.database.store_dir, PathBuf::from("other"));
        assert_eq!(config.export.output_dir, PathBuf::from("exports"));
        assert!(config.export.include_commissions);
    }
}
