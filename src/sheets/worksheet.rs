use serde_json::Value;

use super::{
    domain::{cell_range::CellRange, column::Column, row::Row},
    error::SheetError,
};

/// Row and column capacity of a worksheet grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSize {
    pub rows: u32,
    pub columns: u32,
}

/// The operations the append client needs from a remote worksheet.
///
/// Values are opaque JSON cell payloads; text reads return what the
/// service renders for each cell.
#[async_trait::async_trait]
pub trait Worksheet: Send + Sync {
    fn title(&self) -> &str;

    /// Cells of `col` from row 1 down. Trailing empty cells may be omitted.
    async fn col_values(&self, col: Column) -> error_stack::Result<Vec<String>, SheetError>;

    /// Cells of `row` from column `A` right. Trailing empty cells may be omitted.
    async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, SheetError>;

    async fn grid_size(&self) -> error_stack::Result<GridSize, SheetError>;

    async fn add_rows(&self, count: u32) -> error_stack::Result<(), SheetError>;

    async fn add_cols(&self, count: u32) -> error_stack::Result<(), SheetError>;

    /// Current values of `range`, row-major. Trailing empty cells may be omitted.
    async fn read_range(
        &self,
        range: &CellRange,
    ) -> error_stack::Result<Vec<Vec<Value>>, SheetError>;

    async fn write_range(
        &self,
        range: &CellRange,
        values: Vec<Vec<Value>>,
    ) -> error_stack::Result<(), SheetError>;
}
