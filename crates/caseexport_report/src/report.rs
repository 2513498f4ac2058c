//! Case report run models and mutable report builder.

use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

/// Rows occupied by one placed section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecSectionSlice {
    /// Banner text.
    pub title: String,
    /// Banner row (1-based).
    pub row_first: usize,
    /// Next free row returned by the layout engine.
    pub row_next: usize,
    /// Data rows, or label/value items for the case details block.
    pub cnt_rows: usize,
}

/// Outcome of one case export run.
#[derive(Debug, Default, Clone)]
pub struct ReportCase {
    /// Incident id the case was looked up by.
    pub incident_id: String,
    /// Saved workbook; `None` for previews.
    pub path_file_out: Option<PathBuf>,
    /// Sections in placement order.
    pub sections: Vec<SpecSectionSlice>,
    /// Non-fatal warnings collected during assembly.
    pub warnings: Vec<String>,
}

impl ReportCase {
    pub fn section_count(&self) -> usize {
        self.sections.len()
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    /// Data rows across all sections.
    pub fn row_count(&self) -> usize {
        self.sections.iter().map(|section| section.cnt_rows).sum()
    }

    pub fn section(&self, title: &str) -> Option<&SpecSectionSlice> {
        self.sections.iter().find(|section| section.title == title)
    }

    /// Machine-readable counters.
    pub fn to_dict(&self) -> BTreeMap<String, usize> {
        let mut dict_counts = BTreeMap::new();
        dict_counts.insert("cnt_sections".to_string(), self.section_count());
        dict_counts.insert("cnt_rows".to_string(), self.row_count());
        dict_counts.insert("cnt_warnings".to_string(), self.warning_count());
        dict_counts
    }

    /// Human-readable one-line summary.
    pub fn format(&self, prefix: &str) -> String {
        let c_path = self
            .path_file_out
            .as_ref()
            .map_or_else(|| "<preview>".to_string(), |path| path.display().to_string());
        let dict_counts = self.to_dict();
        format!(
            "{prefix} incident_id={} sections={} rows={} warnings={} file={c_path}",
            self.incident_id,
            dict_counts["cnt_sections"],
            dict_counts["cnt_rows"],
            dict_counts["cnt_warnings"],
        )
    }
}

impl fmt::Display for ReportCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format("[CASE]"))
    }
}

/// Mutable accumulator used while a report is assembled.
#[derive(Debug, Default, Clone)]
pub struct ReportCaseBuilder {
    /// See [`ReportCase::incident_id`].
    pub incident_id: String,
    /// See [`ReportCase::sections`].
    pub sections: Vec<SpecSectionSlice>,
    /// See [`ReportCase::warnings`].
    pub warnings: Vec<String>,
}

impl ReportCaseBuilder {
    pub fn new(incident_id: impl Into<String>) -> Self {
        Self {
            incident_id: incident_id.into(),
            ..Default::default()
        }
    }

    /// Record one placed section.
    pub fn add_section(&mut self, title: &str, row_first: usize, row_next: usize, cnt_rows: usize) {
        self.sections.push(SpecSectionSlice {
            title: title.to_string(),
            row_first,
            row_next,
            cnt_rows,
        });
    }

    /// Add warning message.
    pub fn add_warning(&mut self, warning: String) {
        self.warnings.push(warning);
    }

    /// Finalize builder into immutable report.
    pub fn build(self, path_file_out: Option<PathBuf>) -> ReportCase {
        ReportCase {
            incident_id: self.incident_id,
            path_file_out,
            sections: self.sections,
            warnings: self.warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_case_counts_and_format() {
        let mut builder = ReportCaseBuilder::new("5001");
        builder.add_section("Case Details", 1, 22, 19);
        builder.add_section("Remarks", 24, 30, 3);
        builder.add_warning("arrears band 'AB-X' not found".to_string());
        let report = builder.build(Some(PathBuf::from("out/Case_Details_5001.xlsx")));

        let dict_counts = report.to_dict();
        assert_eq!(dict_counts["cnt_sections"], 2);
        assert_eq!(dict_counts["cnt_rows"], 22);
        assert_eq!(dict_counts["cnt_warnings"], 1);
        assert_eq!(report.section("Remarks").map(|s| s.row_first), Some(24));
        assert!(report.section("Payments").is_none());

        assert_eq!(
            report.to_string(),
            "[CASE] incident_id=5001 sections=2 rows=22 warnings=1 file=out/Case_Details_5001.xlsx"
        );
    }

    #[test]
    fn test_report_case_preview_format() {
        let report = ReportCaseBuilder::new("7").build(None);
        assert_eq!(
            report.format("[PREVIEW]"),
            "[PREVIEW] incident_id=7 sections=0 rows=0 warnings=0 file=<preview>"
        );
    }
}
