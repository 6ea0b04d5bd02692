use super::{cell_position::CellPosition, column::Column, row::Row};

/// Inclusive rectangle of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRange {
    pub start: CellPosition,
    pub end: CellPosition,
}

impl CellRange {
    /// Columns `A..=width` of a single row.
    pub fn row_span(row: Row, width: u32) -> Self {
        CellRange {
            start: CellPosition {
                col: Column::DATE,
                row,
            },
            end: CellPosition {
                col: Column::from(width.max(1)),
                row,
            },
        }
    }

    pub fn row_count(&self) -> u32 {
        self.end.row.0 - self.start.row.0 + 1
    }

    pub fn column_count(&self) -> u32 {
        self.end.col.value() - self.start.col.value() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_span_dimensions() {
        let range = CellRange::row_span(Row(7), 4);
        assert_eq!(range.row_count(), 1);
        assert_eq!(range.column_count(), 4);
        assert_eq!(range.start.col, Column::DATE);
        assert_eq!(range.end.col, Column::from(4u32));
    }

    #[test]
    fn test_row_span_never_empty() {
        let range = CellRange::row_span(Row(2), 0);
        assert_eq!(range.column_count(), 1);
    }
}
