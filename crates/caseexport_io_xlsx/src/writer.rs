//! `rust_xlsxwriter`-backed worksheet surface.

use std::collections::HashMap;
use std::path::Path;

use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::spec::{EnumCellValue, SpecCellFormat, XlsxWriteError};
use crate::surface::SheetSurface;
use crate::util::{cast_col_num, cast_row_num, render_cell_text, sanitize_sheet_name};

/// Single-sheet workbook writer.
///
/// The worksheet is buffered in memory until [`Self::save`] is called.
pub struct XlsxSheetWriter {
    worksheet: Worksheet,
    dict_formats: HashMap<SpecCellFormat, Format>,
}

impl XlsxSheetWriter {
    /// Create a writer whose only worksheet is titled `sheet_name` (sanitized).
    pub fn new(sheet_name: &str) -> Result<Self, XlsxWriteError> {
        let mut worksheet = Worksheet::new();
        worksheet.set_name(sanitize_sheet_name(sheet_name, "_"))?;
        Ok(Self {
            worksheet,
            dict_formats: HashMap::new(),
        })
    }

    /// Flush the workbook to `path_file_out`.
    pub fn save(self, path_file_out: &Path) -> Result<(), XlsxWriteError> {
        let mut workbook = Workbook::new();
        workbook.push_worksheet(self.worksheet);
        workbook.save(path_file_out)?;
        Ok(())
    }

    fn derive_format(&mut self, spec: &SpecCellFormat) -> Format {
        self.dict_formats
            .entry(spec.clone())
            .or_insert_with(|| derive_rust_xlsx_format(spec))
            .clone()
    }
}

impl SheetSurface for XlsxSheetWriter {
    fn write_cell(
        &mut self,
        row: usize,
        col: usize,
        value: &EnumCellValue,
        fmt: &SpecCellFormat,
    ) -> Result<(), XlsxWriteError> {
        let n_row = cast_row_num(row)?;
        let n_col = cast_col_num(col)?;
        let format = self.derive_format(fmt);

        match value {
            EnumCellValue::None => {
                self.worksheet.write_blank(n_row, n_col, &format)?;
            }
            EnumCellValue::String(val) => {
                self.worksheet
                    .write_string_with_format(n_row, n_col, val, &format)?;
            }
            EnumCellValue::Integer(val) => {
                self.worksheet
                    .write_number_with_format(n_row, n_col, *val as f64, &format)?;
            }
            EnumCellValue::Number(val) if val.is_finite() => {
                self.worksheet
                    .write_number_with_format(n_row, n_col, *val, &format)?;
            }
            EnumCellValue::Number(_) => {
                self.worksheet.write_string_with_format(
                    n_row,
                    n_col,
                    render_cell_text(value),
                    &format,
                )?;
            }
            EnumCellValue::Boolean(val) => {
                self.worksheet
                    .write_boolean_with_format(n_row, n_col, *val, &format)?;
            }
        }
        Ok(())
    }

    fn merge_range(
        &mut self,
        row: usize,
        col_first: usize,
        col_last: usize,
        text: &str,
        fmt: &SpecCellFormat,
    ) -> Result<(), XlsxWriteError> {
        if col_last < col_first {
            return Err(XlsxWriteError::InvalidMergeRange {
                row,
                col_first,
                col_last,
            });
        }
        // xlsx merges need at least two cells.
        if col_last == col_first {
            return self.write_cell(row, col_first, &EnumCellValue::from(text), fmt);
        }

        let n_row = cast_row_num(row)?;
        let n_col_first = cast_col_num(col_first)?;
        let n_col_last = cast_col_num(col_last)?;
        let format = self.derive_format(fmt);
        self.worksheet
            .merge_range(n_row, n_col_first, n_row, n_col_last, text, &format)?;
        Ok(())
    }

    fn set_column_width(&mut self, col: usize, width: f64) -> Result<(), XlsxWriteError> {
        self.worksheet
            .set_column_width(cast_col_num(col)?, width)?;
        Ok(())
    }
}

fn derive_rust_xlsx_format(spec: &SpecCellFormat) -> Format {
    let mut format = Format::new();

    if let Some(val) = &spec.font_name {
        format = format.set_font_name(val.clone());
    }
    if let Some(val) = spec.font_size {
        format = format.set_font_size(val as f64);
    }
    if spec.bold.unwrap_or(false) {
        format = format.set_bold();
    }
    if spec.italic.unwrap_or(false) {
        format = format.set_italic();
    }

    if let Some(val) = &spec.align
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }
    if let Some(val) = &spec.valign
        && let Some(align) = derive_format_align(val)
    {
        format = format.set_align(align);
    }

    if let Some(val) = &spec.num_format {
        format = format.set_num_format(val.clone());
    }
    if let Some(val) = &spec.bg_color {
        format = format.set_background_color(val.as_str());
    }
    if let Some(val) = &spec.font_color {
        format = format.set_font_color(val.as_str());
    }

    if let Some(val) = spec.border {
        format = format.set_border(derive_format_border(val));
    }

    if spec.text_wrap.unwrap_or(false) {
        format = format.set_text_wrap();
    }

    format
}

fn derive_format_border(border: i64) -> FormatBorder {
    match border {
        0 => FormatBorder::None,
        1 => FormatBorder::Thin,
        2 => FormatBorder::Medium,
        3 => FormatBorder::Dashed,
        4 => FormatBorder::Dotted,
        5 => FormatBorder::Thick,
        6 => FormatBorder::Double,
        7 => FormatBorder::Hair,
        8 => FormatBorder::MediumDashed,
        9 => FormatBorder::DashDot,
        10 => FormatBorder::MediumDashDot,
        11 => FormatBorder::DashDotDot,
        12 => FormatBorder::MediumDashDotDot,
        13 => FormatBorder::SlantDashDot,
        _ => FormatBorder::None,
    }
}

fn derive_format_align(align: &str) -> Option<FormatAlign> {
    let value = align.trim().to_ascii_lowercase();
    match value.as_str() {
        "general" => Some(FormatAlign::General),
        "left" => Some(FormatAlign::Left),
        "center" => Some(FormatAlign::Center),
        "right" => Some(FormatAlign::Right),
        "fill" => Some(FormatAlign::Fill),
        "justify" => Some(FormatAlign::Justify),
        "center_across" => Some(FormatAlign::CenterAcross),
        "distributed" => Some(FormatAlign::Distributed),
        "top" => Some(FormatAlign::Top),
        "bottom" => Some(FormatAlign::Bottom),
        "vcenter" | "vertical_center" => Some(FormatAlign::VerticalCenter),
        "vjustify" | "vertical_justify" => Some(FormatAlign::VerticalJustify),
        "vdistributed" | "vertical_distributed" => Some(FormatAlign::VerticalDistributed),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use calamine::{Data, Reader, Xlsx, open_workbook};

    use super::*;
    use crate::conf::derive_default_report_styles;
    use crate::table::write_table;

    #[test]
    fn test_writer_saves_table_block() {
        let tmp = tempfile::tempdir().expect("create temp dir");
        let path_file_out = tmp.path().join("block.xlsx");
        let styles = derive_default_report_styles();

        let mut writer = XlsxSheetWriter::new("Case Details").unwrap();
        let n_row_next = write_table(
            &mut writer,
            1,
            1,
            "Payments",
            &["Payment ID", "Bill Paid Amount", "Settled"],
            &[vec![
                EnumCellValue::from("P-1"),
                EnumCellValue::Number(1500.5),
                EnumCellValue::Boolean(true),
            ]],
            &styles,
        )
        .unwrap();
        writer.save(&path_file_out).unwrap();

        assert_eq!(n_row_next, 5);
        let mut workbook: Xlsx<_> = open_workbook(&path_file_out).expect("open workbook");
        assert_eq!(workbook.sheet_names(), vec!["Case Details".to_string()]);

        let range = workbook.worksheet_range("Case Details").expect("sheet range");
        assert_eq!(range.get_value((0, 0)), Some(&Data::String("Payments".to_string())));
        assert_eq!(range.get_value((1, 1)), Some(&Data::String("Bill Paid Amount".to_string())));
        assert_eq!(range.get_value((2, 1)), Some(&Data::Float(1500.5)));
        assert_eq!(range.get_value((2, 2)), Some(&Data::Bool(true)));
    }

    #[test]
    fn test_writer_single_column_banner_is_plain_cell() {
        let mut writer = XlsxSheetWriter::new("Sheet").unwrap();
        let styles = derive_default_report_styles();

        writer
            .merge_range(1, 2, 2, "Notes", &styles.fmt_banner)
            .unwrap();
        assert!(matches!(
            writer.merge_range(1, 3, 2, "Bad", &styles.fmt_banner),
            Err(XlsxWriteError::InvalidMergeRange { .. })
        ));
    }

    #[test]
    fn test_writer_caches_formats() {
        let mut writer = XlsxSheetWriter::new("Sheet").unwrap();
        let styles = derive_default_report_styles();

        for n_row in 1..=3 {
            writer
                .write_cell(n_row, 1, &EnumCellValue::Integer(1), &styles.fmt_cell)
                .unwrap();
        }
        writer
            .write_cell(4, 1, &EnumCellValue::from("x"), &styles.fmt_banner)
            .unwrap();

        assert_eq!(writer.dict_formats.len(), 2);
    }
}
