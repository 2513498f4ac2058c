//! Worksheet surface abstraction and the in-memory grid implementation.
//!
//! All coordinates on this seam are 1-based, like the report cursor.

use std::collections::BTreeMap;

use crate::spec::{EnumCellValue, SpecCellFormat, SpecSheetHorizontalMerge, XlsxWriteError};
use crate::util::{cast_col_num, cast_row_num};

/// Mutable 2-D grid that table blocks are written into.
pub trait SheetSurface {
    /// Write (or overwrite) one cell value with its format.
    fn write_cell(
        &mut self,
        row: usize,
        col: usize,
        value: &EnumCellValue,
        fmt: &SpecCellFormat,
    ) -> Result<(), XlsxWriteError>;

    /// Merge `col_first..=col_last` on `row`, placing `text` in the first cell.
    fn merge_range(
        &mut self,
        row: usize,
        col_first: usize,
        col_last: usize,
        text: &str,
        fmt: &SpecCellFormat,
    ) -> Result<(), XlsxWriteError>;

    /// Set the display width of one column, in character units.
    fn set_column_width(&mut self, col: usize, width: f64) -> Result<(), XlsxWriteError>;
}

/// One recorded grid cell.
#[derive(Debug, Clone, PartialEq)]
pub struct SpecGridCell {
    /// Stored value.
    pub value: EnumCellValue,
    /// Format applied at write time.
    pub fmt: SpecCellFormat,
}

/// In-memory surface that records every mutation. Used for dry runs and tests.
#[derive(Debug, Clone, Default)]
pub struct SheetGrid {
    dict_cells: BTreeMap<(usize, usize), SpecGridCell>,
    l_merges: Vec<SpecSheetHorizontalMerge>,
    dict_widths: BTreeMap<usize, f64>,
}

impl SheetGrid {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&SpecGridCell> {
        self.dict_cells.get(&(row, col))
    }

    /// Value at `(row, col)`; unwritten cells read as [`EnumCellValue::None`].
    pub fn value(&self, row: usize, col: usize) -> EnumCellValue {
        self.cell(row, col)
            .map(|cell| cell.value.clone())
            .unwrap_or(EnumCellValue::None)
    }

    pub fn merges(&self) -> &[SpecSheetHorizontalMerge] {
        &self.l_merges
    }

    pub fn column_width(&self, col: usize) -> Option<f64> {
        self.dict_widths.get(&col).copied()
    }

    pub fn cell_count(&self) -> usize {
        self.dict_cells.len()
    }

    /// Last row holding any written cell, 0 when empty.
    pub fn max_row(&self) -> usize {
        self.dict_cells
            .keys()
            .map(|(row, _)| *row)
            .max()
            .unwrap_or(0)
    }

    /// Rows whose cell in `col` holds exactly `text`, top to bottom.
    pub fn find_rows(&self, col: usize, text: &str) -> Vec<usize> {
        self.dict_cells
            .iter()
            .filter_map(|((row, col_cell), cell)| match &cell.value {
                EnumCellValue::String(s) if *col_cell == col && s == text => Some(*row),
                _ => None,
            })
            .collect()
    }
}

impl SheetSurface for SheetGrid {
    fn write_cell(
        &mut self,
        row: usize,
        col: usize,
        value: &EnumCellValue,
        fmt: &SpecCellFormat,
    ) -> Result<(), XlsxWriteError> {
        cast_row_num(row)?;
        cast_col_num(col)?;
        self.dict_cells.insert(
            (row, col),
            SpecGridCell {
                value: value.clone(),
                fmt: fmt.clone(),
            },
        );
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
        cast_row_num(row)?;
        cast_col_num(col_first)?;
        cast_col_num(col_last)?;
        if col_last < col_first {
            return Err(XlsxWriteError::InvalidMergeRange {
                row,
                col_first,
                col_last,
            });
        }

        // Same as the xlsx writer: a one-cell merge is a plain cell.
        if col_last == col_first {
            return self.write_cell(row, col_first, &EnumCellValue::from(text), fmt);
        }

        let merge = SpecSheetHorizontalMerge {
            row_idx: row,
            col_idx_start: col_first,
            col_idx_end: col_last,
        };
        if self.l_merges.iter().any(|other| other.is_overlapping(&merge)) {
            return Err(XlsxWriteError::MergeOverlap {
                row,
                col_first,
                col_last,
            });
        }

        self.write_cell(row, col_first, &EnumCellValue::from(text), fmt)?;
        for col in (col_first + 1)..=col_last {
            self.write_cell(row, col, &EnumCellValue::None, fmt)?;
        }
        self.l_merges.push(merge);
        Ok(())
    }

    fn set_column_width(&mut self, col: usize, width: f64) -> Result<(), XlsxWriteError> {
        cast_col_num(col)?;
        self.dict_widths.insert(col, width);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_records_cells_and_merges() {
        let mut grid = SheetGrid::new();
        let fmt = SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        };

        grid.merge_range(2, 1, 3, "Remarks", &fmt).unwrap();
        grid.write_cell(3, 2, &EnumCellValue::Integer(7), &SpecCellFormat::default())
            .unwrap();

        assert_eq!(grid.value(2, 1), EnumCellValue::from("Remarks"));
        assert_eq!(grid.value(2, 3), EnumCellValue::None);
        assert_eq!(grid.cell(2, 3).map(|cell| &cell.fmt), Some(&fmt));
        assert_eq!(grid.value(3, 2), EnumCellValue::Integer(7));
        assert_eq!(grid.merges().len(), 1);
        assert_eq!(grid.max_row(), 3);
        assert_eq!(grid.find_rows(1, "Remarks"), vec![2]);
    }

    #[test]
    fn test_grid_rejects_overlapping_merge() {
        let mut grid = SheetGrid::new();
        let fmt = SpecCellFormat::default();

        grid.merge_range(1, 1, 4, "A", &fmt).unwrap();
        let err = grid.merge_range(1, 3, 5, "B", &fmt).unwrap_err();
        assert!(matches!(err, XlsxWriteError::MergeOverlap { row: 1, .. }));

        grid.merge_range(2, 3, 5, "C", &fmt).unwrap();
        assert_eq!(grid.merges().len(), 2);
    }

    #[test]
    fn test_grid_single_cell_merge_is_plain_cell() {
        let mut grid = SheetGrid::new();
        let fmt = SpecCellFormat {
            bold: Some(true),
            ..Default::default()
        };

        grid.merge_range(4, 2, 2, "Notes", &fmt).unwrap();

        assert!(grid.merges().is_empty());
        assert_eq!(grid.value(4, 2), EnumCellValue::from("Notes"));
        assert_eq!(grid.cell(4, 2).map(|cell| &cell.fmt), Some(&fmt));
        assert_eq!(grid.cell_count(), 1);
    }

    #[test]
    fn test_grid_rejects_zero_coordinates() {
        let mut grid = SheetGrid::new();
        let fmt = SpecCellFormat::default();

        assert!(matches!(
            grid.write_cell(0, 1, &EnumCellValue::None, &fmt),
            Err(XlsxWriteError::RowOutOfRange(0))
        ));
        assert!(matches!(
            grid.set_column_width(0, 10.0),
            Err(XlsxWriteError::ColumnOutOfRange(0))
        ));
        assert!(matches!(
            grid.merge_range(1, 4, 2, "x", &fmt),
            Err(XlsxWriteError::InvalidMergeRange { .. })
        ));
        assert_eq!(grid.cell_count(), 0);
    }
}
