//! Report assembly: section order, row sourcing and cursor threading.

use caseexport_io_xlsx::{
    EnumCellValue, SheetSurface, SpecLabelValueItem, SpecReportStyles,
    format_with_thousand_separator, render_cell_text, write_label_value_table, write_table,
};
use log::{debug, warn};
use serde_json::Value;

use crate::document::{
    Document, cast_scalar_cell_value, derive_embedded_documents, derive_stringified_cell_value,
    flatten_nested_documents, is_value_falsy,
};
use crate::provider::CaseDataProvider;
use crate::report::ReportCaseBuilder;
use crate::section::{
    C_TITLE_CASE_DETAILS, EnumDetailRender, EnumSectionSource, L_CASE_DETAIL_FIELDS,
    L_TABLE_SECTIONS, SECTION_COMMISSIONS, SpecTableSection,
};
use crate::spec::{ReportError, SpecReportOptions};

/// Blank rows left below the case details block.
const N_ROWS_GAP_AFTER_DETAILS: usize = 2;
/// Blank rows left below every other table.
const N_ROWS_GAP_AFTER_TABLE: usize = 1;

/// Write every section of `document` onto `surface`, top to bottom from (1, 1).
///
/// Placed sections and non-fatal warnings are recorded in `report`.
pub fn assemble_report<S, P>(
    surface: &mut S,
    document: &Document,
    provider: &P,
    styles: &SpecReportStyles,
    options: &SpecReportOptions,
    report: &mut ReportCaseBuilder,
) -> Result<(), ReportError>
where
    S: SheetSurface + ?Sized,
    P: CaseDataProvider + ?Sized,
{
    let n_col = 1usize;
    let mut n_row = 1usize;

    let l_items = derive_case_detail_items(document, provider, report);
    let n_row_next =
        write_label_value_table(surface, n_row, n_col, C_TITLE_CASE_DETAILS, &l_items, styles)?;
    report.add_section(C_TITLE_CASE_DETAILS, n_row, n_row_next, l_items.len());
    n_row = n_row_next + N_ROWS_GAP_AFTER_DETAILS;

    let case_id = document.get("case_id").cloned().unwrap_or(Value::Null);
    let l_sections = L_TABLE_SECTIONS
        .iter()
        .chain(options.if_include_commissions.then_some(&SECTION_COMMISSIONS));

    for section in l_sections {
        let l_documents = derive_section_documents(section, document, provider, &case_id, report)?;
        if section.if_skip_empty && l_documents.is_empty() {
            debug!("Section '{}' has no rows, skipped.", section.title);
            continue;
        }

        let l_rows = derive_section_rows(section, &l_documents)?;
        let n_row_next = write_table(
            surface,
            n_row,
            n_col,
            section.title,
            section.headers().as_slice(),
            &l_rows,
            styles,
        )?;
        report.add_section(section.title, n_row, n_row_next, l_rows.len());
        n_row = n_row_next + N_ROWS_GAP_AFTER_TABLE;
    }

    Ok(())
}

////////////////////////////////////////////////////////////////////////////////
// #region CaseDetails

fn derive_case_detail_items<P>(
    document: &Document,
    provider: &P,
    report: &mut ReportCaseBuilder,
) -> Vec<SpecLabelValueItem>
where
    P: CaseDataProvider + ?Sized,
{
    L_CASE_DETAIL_FIELDS
        .iter()
        .map(|field| {
            let value = derive_stringified_cell_value(document.get(field.field));
            let value = match field.render {
                EnumDetailRender::Plain | EnumDetailRender::Emphasis => value,
                EnumDetailRender::Thousands => format_with_thousand_separator(&value),
                EnumDetailRender::ArrearsBand => derive_arrears_band_value(value, provider, report),
            };
            SpecLabelValueItem {
                label: field.label.to_string(),
                value,
                if_emphasis: field.render == EnumDetailRender::Emphasis,
            }
        })
        .collect()
}

/// Resolve a band code to its label.
///
/// A falsy code is kept without a lookup. A missing or falsy label keeps the
/// raw code and records a warning.
fn derive_arrears_band_value<P>(
    raw: EnumCellValue,
    provider: &P,
    report: &mut ReportCaseBuilder,
) -> EnumCellValue
where
    P: CaseDataProvider + ?Sized,
{
    if raw.is_falsy() {
        return raw;
    }
    let c_code = render_cell_text(&raw);

    match provider.find_arrears_band_value(&c_code) {
        Ok(Some(value)) if !is_value_falsy(&value) => derive_stringified_cell_value(Some(&value)),
        Ok(_) => {
            let c_warning = format!("Arrears band '{c_code}' not found; raw code kept.");
            warn!("{c_warning}");
            report.add_warning(c_warning);
            raw
        }
        Err(err) => {
            let c_warning = format!("Arrears band lookup failed for '{c_code}': {err}; raw code kept.");
            warn!("{c_warning}");
            report.add_warning(c_warning);
            raw
        }
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region TableSections

fn derive_section_documents<P>(
    section: &SpecTableSection,
    document: &Document,
    provider: &P,
    case_id: &Value,
    report: &mut ReportCaseBuilder,
) -> Result<Vec<Document>, ReportError>
where
    P: CaseDataProvider + ?Sized,
{
    let l_documents = match section.source {
        EnumSectionSource::Embedded(field) => derive_embedded_documents(document, field),
        EnumSectionSource::Nested {
            parent,
            child,
            l_inherit,
        } => flatten_nested_documents(&derive_embedded_documents(document, parent), child, l_inherit),
        EnumSectionSource::Settlements => {
            derive_best_effort(section.title, provider.find_settlements(case_id), report)
        }
        EnumSectionSource::SettlementPlans => {
            derive_best_effort(section.title, provider.find_settlement_plans(case_id), report)
        }
        EnumSectionSource::Payments => provider.find_payments(case_id)?,
        EnumSectionSource::Commissions => provider.find_commissions(case_id)?,
    };
    Ok(l_documents)
}

fn derive_best_effort<E: std::fmt::Display>(
    title: &str,
    result: Result<Vec<Document>, E>,
    report: &mut ReportCaseBuilder,
) -> Vec<Document> {
    result.unwrap_or_else(|err| {
        let c_warning = format!("Failed to fetch rows for '{title}': {err}; section left empty.");
        warn!("{c_warning}");
        report.add_warning(c_warning);
        Vec::new()
    })
}

/// Project documents onto the section's columns. Arrays and objects are rejected.
fn derive_section_rows(
    section: &SpecTableSection,
    l_documents: &[Document],
) -> Result<Vec<Vec<EnumCellValue>>, ReportError> {
    l_documents
        .iter()
        .map(|document| {
            section
                .columns
                .iter()
                .map(|column| {
                    let value = document.get(column.field);
                    cast_scalar_cell_value(value).ok_or_else(|| ReportError::UnsupportedValue {
                        table: section.title.to_string(),
                        column: column.header.to_string(),
                        value: value.map(Value::to_string).unwrap_or_default(),
                    })
                })
                .collect()
        })
        .collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
