//! `caseexport_io_xlsx` v1:
//! Rust-side XLSX layout kernel for case reports.
//!
//! Modules:
//! - `conf`    : constants and default style presets
//! - `spec`    : specs/models/errors
//! - `util`    : pure helper functions
//! - `surface` : worksheet surface trait and in-memory grid
//! - `table`   : table block layout engine
//! - `writer`  : `rust_xlsxwriter`-backed surface
pub mod conf;
pub mod spec;
pub mod surface;
pub mod table;
pub mod util;
pub mod writer;

pub use conf::{
    C_SHEET_NAME_DEFAULT, N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX,
    N_WIDTH_CELL_PADDING, N_WIDTH_CELL_SCALE, TUP_EXCEL_ILLEGAL, derive_default_report_styles,
};
pub use spec::{
    EnumCellValue, SpecCellFormat, SpecLabelValueItem, SpecReportStyles,
    SpecSheetHorizontalMerge, XlsxWriteError,
};
pub use surface::{SheetGrid, SheetSurface, SpecGridCell};
pub use table::{write_label_value_table, write_table};
pub use util::{
    calculate_column_width, cast_col_num, cast_row_num, estimate_width_len,
    format_with_thousand_separator, render_cell_text, sanitize_sheet_name,
};
pub use writer::XlsxSheetWriter;
