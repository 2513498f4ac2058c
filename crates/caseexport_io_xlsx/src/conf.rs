//! XLSX constants and default style presets.

use crate::spec::{SpecCellFormat, SpecReportStyles};

/// Excel worksheet maximum row count.
pub const N_NROWS_EXCEL_MAX: usize = 1_048_576;
/// Excel worksheet maximum column count.
pub const N_NCOLS_EXCEL_MAX: usize = 16_384;
/// Excel sheet name maximum length.
pub const N_LEN_EXCEL_SHEET_NAME_MAX: usize = 31;
/// Characters not allowed in sheet names.
pub const TUP_EXCEL_ILLEGAL: [&str; 7] = ["*", ":", "?", "/", "\\", "[", "]"];

/// Characters added to the longest rendered value before scaling.
pub const N_WIDTH_CELL_PADDING: usize = 2;
/// Scale applied to the padded length to get a column width.
pub const N_WIDTH_CELL_SCALE: f64 = 1.2;

/// Worksheet title used for case reports.
pub const C_SHEET_NAME_DEFAULT: &str = "Case Details";

/// Build the default style set used when no style overrides are configured.
pub fn derive_default_report_styles() -> SpecReportStyles {
    let cfg_base_fmt_spec = SpecCellFormat {
        border: Some(1),
        ..Default::default()
    };
    let cfg_header_fmt_spec = cfg_base_fmt_spec.with_(SpecCellFormat {
        font_size: Some(12),
        bold: Some(true),
        font_color: Some("#FFFFFF".to_string()),
        align: Some("center".to_string()),
        valign: Some("vcenter".to_string()),
        ..Default::default()
    });

    SpecReportStyles {
        fmt_banner: cfg_header_fmt_spec.with_(SpecCellFormat {
            bg_color: Some("#1F4E78".to_string()),
            ..Default::default()
        }),
        fmt_sub_header: cfg_header_fmt_spec.with_(SpecCellFormat {
            bg_color: Some("#2F75B5".to_string()),
            ..Default::default()
        }),
        fmt_cell: cfg_base_fmt_spec.clone(),
        fmt_emphasis: SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        },
    }
}
