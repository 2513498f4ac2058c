//! Shared XLSX models and errors.

use rust_xlsxwriter::XlsxError;
use serde::Deserialize;
use thiserror::Error;

////////////////////////////////////////////////////////////////////////////////
// #region CellFormats

/// Cell format; every unset field falls through to the base format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SpecCellFormat {
    /// Font family name.
    pub font_name: Option<String>,
    /// Font size in points.
    pub font_size: Option<i64>,
    /// Bold style.
    pub bold: Option<bool>,
    /// Italic style.
    pub italic: Option<bool>,

    /// Horizontal alignment.
    pub align: Option<String>,
    /// Vertical alignment.
    pub valign: Option<String>,
    /// Border style for all sides.
    pub border: Option<i64>,
    /// Text wrap.
    pub text_wrap: Option<bool>,

    /// Number format code.
    pub num_format: Option<String>,
    /// Background fill color.
    pub bg_color: Option<String>,
    /// Font color.
    pub font_color: Option<String>,
}

impl SpecCellFormat {
    /// Return a new format by overlaying `patch` onto `self`.
    pub fn with_(&self, patch: SpecCellFormat) -> SpecCellFormat {
        self.merge(&patch)
    }

    /// Merge two formats with right-side non-`None` overwrite semantics.
    pub fn merge(&self, other: &SpecCellFormat) -> SpecCellFormat {
        SpecCellFormat {
            font_name: other.font_name.clone().or_else(|| self.font_name.clone()),
            font_size: other.font_size.or(self.font_size),
            bold: other.bold.or(self.bold),
            italic: other.italic.or(self.italic),
            align: other.align.clone().or_else(|| self.align.clone()),
            valign: other.valign.clone().or_else(|| self.valign.clone()),
            border: other.border.or(self.border),
            text_wrap: other.text_wrap.or(self.text_wrap),
            num_format: other.num_format.clone().or_else(|| self.num_format.clone()),
            bg_color: other.bg_color.clone().or_else(|| self.bg_color.clone()),
            font_color: other.font_color.clone().or_else(|| self.font_color.clone()),
        }
    }
}

/// Resolved presentation bundle shared by every table block of one report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecReportStyles {
    /// Merged banner (table title) cell.
    pub fmt_banner: SpecCellFormat,
    /// Column header and key/value label cells.
    pub fmt_sub_header: SpecCellFormat,
    /// Plain data cells (border only, no fill).
    pub fmt_cell: SpecCellFormat,
    /// Patch applied on top of `fmt_cell` for emphasised values.
    pub fmt_emphasis: SpecCellFormat,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region CellValues

/// Normalized cell value written into a worksheet surface.
#[derive(Debug, Clone, PartialEq)]
pub enum EnumCellValue {
    /// Missing/blank value.
    None,
    /// Text value.
    String(String),
    /// Integer value.
    Integer(i64),
    /// Floating point value.
    Number(f64),
    /// Boolean value.
    Boolean(bool),
}

impl EnumCellValue {
    /// Whether this value is the blank marker.
    pub fn is_none(&self) -> bool {
        matches!(self, EnumCellValue::None)
    }

    /// Blank, empty text, zero or false.
    pub fn is_falsy(&self) -> bool {
        match self {
            EnumCellValue::None => true,
            EnumCellValue::String(s) => s.is_empty(),
            EnumCellValue::Integer(n) => *n == 0,
            EnumCellValue::Number(n) => *n == 0.0,
            EnumCellValue::Boolean(b) => !*b,
        }
    }
}

impl From<&str> for EnumCellValue {
    fn from(value: &str) -> Self {
        EnumCellValue::String(value.to_string())
    }
}

impl From<String> for EnumCellValue {
    fn from(value: String) -> Self {
        EnumCellValue::String(value)
    }
}

impl From<i64> for EnumCellValue {
    fn from(value: i64) -> Self {
        EnumCellValue::Integer(value)
    }
}

impl From<f64> for EnumCellValue {
    fn from(value: f64) -> Self {
        EnumCellValue::Number(value)
    }
}

impl From<bool> for EnumCellValue {
    fn from(value: bool) -> Self {
        EnumCellValue::Boolean(value)
    }
}

/// One row of a two-column label/value block.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecLabelValueItem {
    /// Label written in the first column.
    pub label: String,
    /// Value written in the second column.
    pub value: EnumCellValue,
    /// Apply the emphasis patch to the value cell.
    pub if_emphasis: bool,
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetLayout

/// Horizontal merge placed on a worksheet (1-based, inclusive columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecSheetHorizontalMerge {
    /// Row where merge is applied.
    pub row_idx: usize,
    /// Start column (inclusive).
    pub col_idx_start: usize,
    /// End column (inclusive).
    pub col_idx_end: usize,
}

impl SpecSheetHorizontalMerge {
    /// Whether both merges share at least one cell.
    pub fn is_overlapping(&self, other: &SpecSheetHorizontalMerge) -> bool {
        self.row_idx == other.row_idx
            && self.col_idx_start <= other.col_idx_end
            && other.col_idx_start <= self.col_idx_end
    }
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Errors

/// Surface mutation failures. Any of these aborts the report run.
#[derive(Debug, Error)]
pub enum XlsxWriteError {
    /// Row is 0 or beyond the Excel row limit.
    #[error("row index out of range: {0}")]
    RowOutOfRange(usize),
    /// Column is 0 or beyond the Excel column limit.
    #[error("column index out of range: {0}")]
    ColumnOutOfRange(usize),
    /// Merge end column precedes its start column.
    #[error("invalid merge range on row {row}: columns {col_first}..={col_last}")]
    InvalidMergeRange {
        /// Merge row.
        row: usize,
        /// First merge column.
        col_first: usize,
        /// Last merge column.
        col_last: usize,
    },
    /// Data row whose cell count differs from the header count.
    #[error("table '{title}' row {row_idx} has {n_cells} cells, expected {n_headers}")]
    RowWidthMismatch {
        /// Table banner text.
        title: String,
        /// 0-based index of the row within the table data.
        row_idx: usize,
        /// Cells in the row.
        n_cells: usize,
        /// Header count.
        n_headers: usize,
    },
    /// Merge shares cells with an earlier merge.
    #[error("merge range on row {row} (columns {col_first}..={col_last}) overlaps an existing merge")]
    MergeOverlap {
        /// Merge row.
        row: usize,
        /// First merge column.
        col_first: usize,
        /// Last merge column.
        col_last: usize,
    },
    /// Error raised by the xlsx backend.
    #[error("xlsx write error: {0}")]
    Xlsx(#[from] XlsxError),
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_prefers_right_side_values() {
        let base = SpecCellFormat {
            bold: Some(true),
            border: Some(1),
            bg_color: Some("#000000".to_string()),
            ..Default::default()
        };
        let patch = SpecCellFormat {
            bg_color: Some("#FFFFFF".to_string()),
            font_size: Some(14),
            ..Default::default()
        };

        let merged = base.merge(&patch);
        assert_eq!(merged.bold, Some(true));
        assert_eq!(merged.border, Some(1));
        assert_eq!(merged.bg_color.as_deref(), Some("#FFFFFF"));
        assert_eq!(merged.font_size, Some(14));
    }

    #[test]
    fn test_cell_value_falsy() {
        for value in [
            EnumCellValue::None,
            EnumCellValue::from(""),
            EnumCellValue::Integer(0),
            EnumCellValue::Number(0.0),
            EnumCellValue::Boolean(false),
        ] {
            assert!(value.is_falsy(), "{value:?}");
        }
        for value in [
            EnumCellValue::from("0"),
            EnumCellValue::Integer(-1),
            EnumCellValue::Number(0.5),
            EnumCellValue::Boolean(true),
        ] {
            assert!(!value.is_falsy(), "{value:?}");
        }
    }

    #[test]
    fn test_horizontal_merge_overlap() {
        let merge = SpecSheetHorizontalMerge {
            row_idx: 3,
            col_idx_start: 1,
            col_idx_end: 4,
        };
        let touching = SpecSheetHorizontalMerge {
            row_idx: 3,
            col_idx_start: 4,
            col_idx_end: 6,
        };
        let next_row = SpecSheetHorizontalMerge {
            row_idx: 4,
            ..merge
        };
        let disjoint = SpecSheetHorizontalMerge {
            row_idx: 3,
            col_idx_start: 5,
            col_idx_end: 6,
        };

        assert!(merge.is_overlapping(&touching));
        assert!(!merge.is_overlapping(&next_row));
        assert!(!merge.is_overlapping(&disjoint));
    }
}
