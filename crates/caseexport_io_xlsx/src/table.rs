//! Table block layout engine.
//!
//! A table block is a merged banner row, a header row and `R` data rows. The
//! engine writes one block at an anchor, autofits the block's columns and
//! returns the next free row (one blank row below the block).

use log::info;

use crate::spec::{EnumCellValue, SpecLabelValueItem, SpecReportStyles, XlsxWriteError};
use crate::surface::SheetSurface;
use crate::util::{calculate_column_width, estimate_width_len};

/// Write one table block anchored at `(n_row_anchor, n_col_anchor)`.
///
/// Layout:
/// - `n_row_anchor`: banner `title` merged across all header columns,
/// - `n_row_anchor + 1`: `headers`,
/// - `n_row_anchor + 2 ..`: `rows`, one cell per header.
///
/// Every column of the block gets width `(max_len + 2) * 1.2`, where
/// `max_len` is the longest rendered value of the block in that column.
///
/// Returns `n_row_anchor + rows.len() + 3`. `headers` must be non-empty. A row
/// whose cell count differs from `headers.len()` fails the call before
/// anything is written.
pub fn write_table<S, H>(
    surface: &mut S,
    n_row_anchor: usize,
    n_col_anchor: usize,
    title: &str,
    headers: &[H],
    rows: &[Vec<EnumCellValue>],
    styles: &SpecReportStyles,
) -> Result<usize, XlsxWriteError>
where
    S: SheetSurface + ?Sized,
    H: AsRef<str>,
{
    debug_assert!(!headers.is_empty(), "table '{title}' has no headers");

    let n_width = headers.len();
    if let Some((row_idx, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != n_width) {
        return Err(XlsxWriteError::RowWidthMismatch {
            title: title.to_string(),
            row_idx,
            n_cells: row.len(),
            n_headers: n_width,
        });
    }

    let n_col_last = n_col_anchor + n_width.saturating_sub(1);
    let mut l_width_by_col = vec![0usize; n_width];

    surface.merge_range(
        n_row_anchor,
        n_col_anchor,
        n_col_last,
        title,
        &styles.fmt_banner,
    )?;
    if let Some(n_width_first) = l_width_by_col.first_mut() {
        *n_width_first = estimate_width_len(&EnumCellValue::from(title));
    }

    let n_row_header = n_row_anchor + 1;
    for (n_idx_col, header) in headers.iter().enumerate() {
        let value = EnumCellValue::from(header.as_ref());
        surface.write_cell(
            n_row_header,
            n_col_anchor + n_idx_col,
            &value,
            &styles.fmt_sub_header,
        )?;
        l_width_by_col[n_idx_col] = usize::max(l_width_by_col[n_idx_col], estimate_width_len(&value));
    }

    let n_row_data_first = n_row_anchor + 2;
    for (n_idx_row, row) in rows.iter().enumerate() {
        for (n_idx_col, value) in row.iter().enumerate() {
            surface.write_cell(
                n_row_data_first + n_idx_row,
                n_col_anchor + n_idx_col,
                value,
                &styles.fmt_cell,
            )?;
            l_width_by_col[n_idx_col] = usize::max(l_width_by_col[n_idx_col], estimate_width_len(value));
        }
    }

    for (n_idx_col, n_len_max) in l_width_by_col.iter().enumerate() {
        surface.set_column_width(n_col_anchor + n_idx_col, calculate_column_width(*n_len_max))?;
    }

    info!("Table '{title}' created successfully.");
    Ok(n_row_anchor + rows.len() + 3)
}

/// Write a two-column label/value block for a single record.
///
/// The banner is merged over both columns on `n_row_anchor`; item `i` is
/// written on `n_row_anchor + 1 + i` with its label in `n_col_anchor` and its
/// value in `n_col_anchor + 1`. Column widths are derived from the item rows
/// only. Returns `n_row_anchor + items.len() + 2`.
pub fn write_label_value_table<S>(
    surface: &mut S,
    n_row_anchor: usize,
    n_col_anchor: usize,
    title: &str,
    items: &[SpecLabelValueItem],
    styles: &SpecReportStyles,
) -> Result<usize, XlsxWriteError>
where
    S: SheetSurface + ?Sized,
{
    let n_col_value = n_col_anchor + 1;
    let fmt_value_emphasis = styles.fmt_cell.merge(&styles.fmt_emphasis);

    surface.merge_range(
        n_row_anchor,
        n_col_anchor,
        n_col_value,
        title,
        &styles.fmt_banner,
    )?;

    let n_row_first = n_row_anchor + 1;
    let mut n_len_label_max = 0usize;
    let mut n_len_value_max = 0usize;
    for (n_idx_item, item) in items.iter().enumerate() {
        let n_row = n_row_first + n_idx_item;
        let label = EnumCellValue::from(item.label.as_str());

        surface.write_cell(n_row, n_col_anchor, &label, &styles.fmt_sub_header)?;
        surface.write_cell(
            n_row,
            n_col_value,
            &item.value,
            if item.if_emphasis {
                &fmt_value_emphasis
            } else {
                &styles.fmt_cell
            },
        )?;

        n_len_label_max = usize::max(n_len_label_max, estimate_width_len(&label));
        n_len_value_max = usize::max(n_len_value_max, estimate_width_len(&item.value));
    }

    surface.set_column_width(n_col_anchor, calculate_column_width(n_len_label_max))?;
    surface.set_column_width(n_col_value, calculate_column_width(n_len_value_max))?;

    info!("Table '{title}' created successfully.");
    Ok(n_row_first + items.len() + 1)
}
