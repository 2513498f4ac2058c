//! Report options and error types.

use std::path::PathBuf;

use caseexport_io_xlsx::{C_SHEET_NAME_DEFAULT, XlsxWriteError};
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region Options

/// Collection names the report reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecCollectionNames {
    /// Case documents, looked up by `incident_id`.
    pub case_details: String,
    pub settlements: String,
    pub payments: String,
    pub commissions: String,
    /// Singleton reference document mapping band code to band label.
    pub arrears_bands: String,
}

impl Default for SpecCollectionNames {
    fn default() -> Self {
        Self {
            case_details: "Case_details".to_string(),
            settlements: "Case_settlements".to_string(),
            payments: "Case_payments".to_string(),
            commissions: "Commissions".to_string(),
            arrears_bands: "Arrears_bands".to_string(),
        }
    }
}

/// Per-run report options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportOptions {
    /// Output file name prefix, before `_<incident_id>_<timestamp>`.
    pub file_prefix: String,
    /// Worksheet title.
    pub sheet_name: String,
    /// Place the Commissions table after Recovery Officer Requests.
    pub if_include_commissions: bool,
    pub collections: SpecCollectionNames,
}

impl Default for SpecReportOptions {
    fn default() -> Self {
        Self {
            file_prefix: "Case_Details".to_string(),
            sheet_name: C_SHEET_NAME_DEFAULT.to_string(),
            if_include_commissions: false,
            collections: SpecCollectionNames::default(),
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Document store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read collection file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse collection file {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Collection payload is not an array of objects.
    #[error("malformed collection '{collection}': {reason}")]
    MalformedCollection { collection: String, reason: String },
}

/// Fatal report failures. Any of these stops the run.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("no case found for incident_id {incident_id}")]
    CaseNotFound { incident_id: String },
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Layout(#[from] XlsxWriteError),
    /// Array or object value in a table cell.
    #[error("unsupported value in table '{table}', column '{column}': {value}")]
    UnsupportedValue {
        table: String,
        column: String,
        value: String,
    },
    #[error("failed to prepare output path {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
