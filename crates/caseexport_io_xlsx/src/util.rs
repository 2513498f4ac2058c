//! Stateless helper utilities used by the layout engine and surfaces.

use crate::conf::{
    N_LEN_EXCEL_SHEET_NAME_MAX, N_NCOLS_EXCEL_MAX, N_NROWS_EXCEL_MAX, N_WIDTH_CELL_PADDING,
    N_WIDTH_CELL_SCALE, TUP_EXCEL_ILLEGAL,
};
use crate::spec::{EnumCellValue, XlsxWriteError};

////////////////////////////////////////////////////////////////////////////////
// #region CellValueRendering

/// Render a cell value as display text.
///
/// Integral floats keep a trailing `.0` and booleans render as `True`/`False`,
/// matching the text the case exports have always shown.
pub fn render_cell_text(value: &EnumCellValue) -> String {
    match value {
        EnumCellValue::None => String::new(),
        EnumCellValue::String(s) => s.clone(),
        EnumCellValue::Integer(n) => n.to_string(),
        EnumCellValue::Number(n) => render_float_text(*n),
        EnumCellValue::Boolean(b) => if *b { "True" } else { "False" }.to_string(),
    }
}

fn render_float_text(x: f64) -> String {
    if x.is_nan() {
        return "nan".to_string();
    }
    if x.is_infinite() {
        return if x.is_sign_positive() { "inf" } else { "-inf" }.to_string();
    }
    if x.fract() == 0.0 && x.abs() < 1e16 {
        return format!("{x:.1}");
    }
    x.to_string()
}

/// Format integers and floats with `,` thousand separators; other values pass through.
pub fn format_with_thousand_separator(value: &EnumCellValue) -> EnumCellValue {
    let c_text = match value {
        EnumCellValue::Integer(n) => n.to_string(),
        EnumCellValue::Number(n) if n.is_finite() => render_float_text(*n),
        _ => return value.clone(),
    };
    if c_text.contains('e') {
        return EnumCellValue::String(c_text);
    }

    let (c_sign, c_unsigned) = match c_text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", c_text.as_str()),
    };
    let (c_int, c_frac) = match c_unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (c_unsigned, None),
    };

    let mut c_grouped = String::with_capacity(c_int.len() + c_int.len() / 3);
    for (n_idx, chr) in c_int.chars().enumerate() {
        if n_idx > 0 && (c_int.len() - n_idx) % 3 == 0 {
            c_grouped.push(',');
        }
        c_grouped.push(chr);
    }

    EnumCellValue::String(match c_frac {
        Some(frac) => format!("{c_sign}{c_grouped}.{frac}"),
        None => format!("{c_sign}{c_grouped}"),
    })
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region ColumnWidth

/// Rendered length of one cell for column autofit.
///
/// Blank, empty, zero and false values count as zero length.
pub fn estimate_width_len(value: &EnumCellValue) -> usize {
    if value.is_falsy() {
        return 0;
    }
    render_cell_text(value).chars().count()
}

/// Column width for a column whose longest rendered value has `n_len_max` chars.
pub fn calculate_column_width(n_len_max: usize) -> f64 {
    (n_len_max + N_WIDTH_CELL_PADDING) as f64 * N_WIDTH_CELL_SCALE
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region Coordinates

/// Convert a 1-based row into the backend's 0-based row number.
pub fn cast_row_num(row: usize) -> Result<u32, XlsxWriteError> {
    if row == 0 || row > N_NROWS_EXCEL_MAX {
        return Err(XlsxWriteError::RowOutOfRange(row));
    }
    u32::try_from(row - 1).map_err(|_| XlsxWriteError::RowOutOfRange(row))
}

/// Convert a 1-based column into the backend's 0-based column number.
pub fn cast_col_num(col: usize) -> Result<u16, XlsxWriteError> {
    if col == 0 || col > N_NCOLS_EXCEL_MAX {
        return Err(XlsxWriteError::ColumnOutOfRange(col));
    }
    u16::try_from(col - 1).map_err(|_| XlsxWriteError::ColumnOutOfRange(col))
}

// #endregion
////////////////////////////////////////////////////////////////////////////////
// #region SheetNormalization

/// Replace invalid chars and trim to valid Excel sheet name.
pub fn sanitize_sheet_name(name: &str, replace_to: &str) -> String {
    let mut c_name = name.to_string();
    for c_illegal in TUP_EXCEL_ILLEGAL {
        c_name = c_name.replace(c_illegal, replace_to);
    }
    c_name = c_name.trim().to_string();
    if c_name.is_empty() {
        c_name = "Sheet".to_string();
    }

    c_name.chars().take(N_LEN_EXCEL_SHEET_NAME_MAX).collect()
}

// #endregion
////////////////////////////////////////////////////////////////////////////////

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_cell_text_keeps_float_suffix() {
        assert_eq!(render_cell_text(&EnumCellValue::Number(1000.0)), "1000.0");
        assert_eq!(render_cell_text(&EnumCellValue::Number(12.5)), "12.5");
        assert_eq!(render_cell_text(&EnumCellValue::Integer(-42)), "-42");
        assert_eq!(render_cell_text(&EnumCellValue::Boolean(true)), "True");
        assert_eq!(render_cell_text(&EnumCellValue::None), "");
    }

    #[test]
    fn test_format_with_thousand_separator() {
        assert_eq!(
            format_with_thousand_separator(&EnumCellValue::Integer(1_000_000)),
            EnumCellValue::from("1,000,000")
        );
        assert_eq!(
            format_with_thousand_separator(&EnumCellValue::Number(1234.56)),
            EnumCellValue::from("1,234.56")
        );
        assert_eq!(
            format_with_thousand_separator(&EnumCellValue::Number(-25000.0)),
            EnumCellValue::from("-25,000.0")
        );
        assert_eq!(
            format_with_thousand_separator(&EnumCellValue::Integer(999)),
            EnumCellValue::from("999")
        );
        assert_eq!(
            format_with_thousand_separator(&EnumCellValue::from("test")),
            EnumCellValue::from("test")
        );
        assert_eq!(
            format_with_thousand_separator(&EnumCellValue::None),
            EnumCellValue::None
        );
    }

    #[test]
    fn test_estimate_width_len_skips_falsy_values() {
        assert_eq!(estimate_width_len(&EnumCellValue::Integer(0)), 0);
        assert_eq!(estimate_width_len(&EnumCellValue::Number(0.0)), 0);
        assert_eq!(estimate_width_len(&EnumCellValue::Boolean(false)), 0);
        assert_eq!(estimate_width_len(&EnumCellValue::from("")), 0);
        assert_eq!(estimate_width_len(&EnumCellValue::Integer(2025)), 4);
        assert_eq!(estimate_width_len(&EnumCellValue::Number(7.0)), 3);
        assert_eq!(estimate_width_len(&EnumCellValue::from("Colombo Südost")), 14);
    }

    #[test]
    fn test_calculate_column_width() {
        for (n_len, n_expected) in [(0, 2.4), (1, 3.6), (10, 14.4), (100, 122.4)] {
            let n_width = calculate_column_width(n_len);
            assert!(
                (n_width - n_expected).abs() < 1e-9,
                "len={n_len} width={n_width}"
            );
        }
    }

    #[test]
    fn test_cast_coordinates_are_one_based() {
        assert_eq!(cast_row_num(1).unwrap(), 0);
        assert_eq!(cast_col_num(3).unwrap(), 2);
        assert!(matches!(
            cast_row_num(0),
            Err(XlsxWriteError::RowOutOfRange(0))
        ));
        assert!(matches!(
            cast_col_num(N_NCOLS_EXCEL_MAX + 1),
            Err(XlsxWriteError::ColumnOutOfRange(_))
        ));
    }

    #[test]
    fn test_sanitize_sheet_name() {
        assert_eq!(sanitize_sheet_name("Case/Details", "_"), "Case_Details");
        assert_eq!(sanitize_sheet_name("   ", "_"), "Sheet");
        assert_eq!(
            sanitize_sheet_name(&"x".repeat(40), "_").len(),
            N_LEN_EXCEL_SHEET_NAME_MAX
        );
    }
}
