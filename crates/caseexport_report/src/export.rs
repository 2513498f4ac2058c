//! Case lookup, output naming and persistence.

use std::fs;
use std::path::{Path, PathBuf};

use caseexport_io_xlsx::{SheetGrid, SpecReportStyles, XlsxSheetWriter};
use chrono::NaiveDateTime;
use log::info;
use serde_json::Value;

use crate::assemble::assemble_report;
use crate::document::{Document, SpecDocumentFilter};
use crate::provider::StoreCaseDataProvider;
use crate::report::{ReportCase, ReportCaseBuilder};
use crate::spec::{ReportError, SpecReportOptions};
use crate::store::DocumentStore;

const C_FORMAT_FILE_TIMESTAMP: &str = "%Y-%m-%d_%H-%M-%S";
const C_EXT_XLSX: &str = "xlsx";

/// `<prefix>_<incident_id>_<YYYY-MM-DD_HH-MM-SS>.xlsx`
pub fn derive_report_file_name(
    file_prefix: &str,
    incident_id: &Value,
    dt_generated: &NaiveDateTime,
) -> String {
    format!(
        "{file_prefix}_{}_{}.{C_EXT_XLSX}",
        render_incident_id(incident_id),
        dt_generated.format(C_FORMAT_FILE_TIMESTAMP)
    )
}

/// `dir_out/file_name`, or the first free `<stem>_<n>.<ext>` for n = 1, 2, ...
pub fn derive_unique_report_path(dir_out: &Path, file_name: &str) -> PathBuf {
    let path_candidate = dir_out.join(file_name);
    if !path_candidate.exists() {
        return path_candidate;
    }

    let path_name = Path::new(file_name);
    let c_stem = path_name
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let c_suffix = path_name
        .extension()
        .map(|ext| format!(".{}", ext.to_string_lossy()))
        .unwrap_or_default();

    let mut n_counter = 1usize;
    loop {
        let path_candidate = dir_out.join(format!("{c_stem}_{n_counter}{c_suffix}"));
        if !path_candidate.exists() {
            return path_candidate;
        }
        n_counter += 1;
    }
}

/// Case document whose `incident_id` equals `incident_id`.
pub fn find_case_document<S>(
    store: &S,
    incident_id: &Value,
    options: &SpecReportOptions,
) -> Result<Document, ReportError>
where
    S: DocumentStore + ?Sized,
{
    let filter = SpecDocumentFilter::new().where_eq("incident_id", incident_id.clone());
    let document = store
        .find_one(&options.collections.case_details, &filter)?
        .ok_or_else(|| ReportError::CaseNotFound {
            incident_id: render_incident_id(incident_id),
        })?;
    info!("Case found for incident_id {}.", render_incident_id(incident_id));
    Ok(document)
}

/// Export the case report of `incident_id` into a new workbook under `dir_out`.
///
/// Nothing is written when the case does not exist. Missing output directories
/// are created. The workbook is never overwritten: name collisions get a
/// numeric suffix.
pub fn export_case_report<S>(
    store: &S,
    incident_id: &Value,
    dir_out: &Path,
    styles: &SpecReportStyles,
    options: &SpecReportOptions,
    dt_generated: &NaiveDateTime,
) -> Result<ReportCase, ReportError>
where
    S: DocumentStore + ?Sized,
{
    let document = find_case_document(store, incident_id, options)?;
    let provider = StoreCaseDataProvider::new(store, options.collections.clone());

    let mut writer = XlsxSheetWriter::new(&options.sheet_name)?;
    let mut builder = ReportCaseBuilder::new(render_incident_id(incident_id));
    assemble_report(&mut writer, &document, &provider, styles, options, &mut builder)?;

    fs::create_dir_all(dir_out).map_err(|source| ReportError::Io {
        path: dir_out.to_path_buf(),
        source,
    })?;
    let file_name = derive_report_file_name(&options.file_prefix, incident_id, dt_generated);
    let path_file_out = derive_unique_report_path(dir_out, &file_name);
    writer.save(&path_file_out)?;
    info!("Excel file saved to {}.", path_file_out.display());

    Ok(builder.build(Some(path_file_out)))
}

/// Assemble the case report into an in-memory grid without writing a file.
pub fn preview_case_report<S>(
    store: &S,
    incident_id: &Value,
    styles: &SpecReportStyles,
    options: &SpecReportOptions,
) -> Result<(SheetGrid, ReportCase), ReportError>
where
    S: DocumentStore + ?Sized,
{
    let document = find_case_document(store, incident_id, options)?;
    let provider = StoreCaseDataProvider::new(store, options.collections.clone());

    let mut grid = SheetGrid::new();
    let mut builder = ReportCaseBuilder::new(render_incident_id(incident_id));
    assemble_report(&mut grid, &document, &provider, styles, options, &mut builder)?;

    Ok((grid, builder.build(None)))
}

fn render_incident_id(incident_id: &Value) -> String {
    match incident_id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
