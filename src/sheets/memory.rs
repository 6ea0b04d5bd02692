use std::sync::{Mutex, MutexGuard, PoisonError};

use error_stack::report;
use serde_json::Value;

use super::{
    domain::{cell_range::CellRange, column::Column, row::Row},
    error::SheetError,
    flatten_double_vec::cell_text,
    worksheet::{GridSize, Worksheet},
};

/// Counters of the mutations applied to an [`InMemoryWorksheet`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WorksheetStats {
    pub header_writes: u32,
    pub row_writes: u32,
    pub add_rows_calls: u32,
    pub rows_added: u32,
    pub add_cols_calls: u32,
    pub columns_added: u32,
}

#[derive(Debug)]
struct State {
    size: GridSize,
    cells: Vec<Vec<Value>>,
    stats: WorksheetStats,
}

impl State {
    fn cell(&self, row: usize, col: usize) -> &Value {
        self.cells
            .get(row)
            .and_then(|cells| cells.get(col))
            .unwrap_or(&Value::Null)
    }

    fn set_cell(&mut self, row: usize, col: usize, value: Value) {
        if self.cells.len() <= row {
            self.cells.resize_with(row + 1, Vec::new);
        }
        let cells = &mut self.cells[row];
        if cells.len() <= col {
            cells.resize(col + 1, Value::Null);
        }
        cells[col] = value;
    }

    fn check_bounds(&self, range: &CellRange) -> error_stack::Result<(), SheetError> {
        if range.end.row.0 > self.size.rows || range.end.col.value() > self.size.columns {
            return Err(report!(SheetError::TransportFailure).attach_printable(format!(
                "Range {:?} exceeds grid limits {:?}",
                range, self.size
            )));
        }
        Ok(())
    }
}

fn is_blank(value: &Value) -> bool {
    cell_text(value).is_empty()
}

fn trim_trailing_blanks<T>(mut values: Vec<T>, blank: impl Fn(&T) -> bool) -> Vec<T> {
    while values.last().is_some_and(&blank) {
        values.pop();
    }
    values
}

/// Worksheet held in memory. Enforces the grid limits the remote service
/// enforces: reads and writes outside the current row/column capacity fail.
#[derive(Debug)]
pub struct InMemoryWorksheet {
    title: String,
    state: Mutex<State>,
}

impl InMemoryWorksheet {
    pub fn new(title: impl Into<String>, rows: u32, columns: u32) -> Self {
        Self::with_cells(title, rows, columns, Vec::new())
    }

    /// `cells` is row-major starting at `A1`.
    pub fn with_cells(
        title: impl Into<String>,
        rows: u32,
        columns: u32,
        cells: Vec<Vec<Value>>,
    ) -> Self {
        InMemoryWorksheet {
            title: title.into(),
            state: Mutex::new(State {
                size: GridSize { rows, columns },
                cells,
                stats: WorksheetStats::default(),
            }),
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn stats(&self) -> WorksheetStats {
        self.lock().stats
    }

    pub fn size(&self) -> GridSize {
        self.lock().size
    }

    /// Text of `row`, without trailing empty cells.
    pub fn row_text(&self, row: Row) -> Vec<String> {
        let state = self.lock();
        let cells = state
            .cells
            .get(row.offset())
            .map(|cells| cells.iter().map(cell_text).collect())
            .unwrap_or_default();
        trim_trailing_blanks(cells, |cell: &String| cell.is_empty())
    }
}

#[async_trait::async_trait]
impl Worksheet for InMemoryWorksheet {
    fn title(&self) -> &str {
        &self.title
    }

    async fn col_values(&self, col: Column) -> error_stack::Result<Vec<String>, SheetError> {
        let state = self.lock();
        let values = (0..state.size.rows as usize)
            .map(|row| cell_text(state.cell(row, col.offset())))
            .collect();
        Ok(trim_trailing_blanks(values, |cell: &String| cell.is_empty()))
    }

    async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, SheetError> {
        let state = self.lock();
        let values = (0..state.size.columns as usize)
            .map(|col| cell_text(state.cell(row.offset(), col)))
            .collect();
        Ok(trim_trailing_blanks(values, |cell: &String| cell.is_empty()))
    }

    async fn grid_size(&self) -> error_stack::Result<GridSize, SheetError> {
        Ok(self.lock().size)
    }

    async fn add_rows(&self, count: u32) -> error_stack::Result<(), SheetError> {
        let mut state = self.lock();
        state.size.rows += count;
        state.stats.add_rows_calls += 1;
        state.stats.rows_added += count;
        Ok(())
    }

    async fn add_cols(&self, count: u32) -> error_stack::Result<(), SheetError> {
        let mut state = self.lock();
        state.size.columns += count;
        state.stats.add_cols_calls += 1;
        state.stats.columns_added += count;
        Ok(())
    }

    async fn read_range(
        &self,
        range: &CellRange,
    ) -> error_stack::Result<Vec<Vec<Value>>, SheetError> {
        let state = self.lock();
        state.check_bounds(range)?;

        let rows = (range.start.row.offset()..=range.end.row.offset())
            .map(|row| {
                let cells = (range.start.col.offset()..=range.end.col.offset())
                    .map(|col| state.cell(row, col).clone())
                    .collect();
                trim_trailing_blanks(cells, is_blank)
            })
            .collect();
        Ok(trim_trailing_blanks(rows, Vec::is_empty))
    }

    async fn write_range(
        &self,
        range: &CellRange,
        values: Vec<Vec<Value>>,
    ) -> error_stack::Result<(), SheetError> {
        let mut state = self.lock();
        state.check_bounds(range)?;

        let too_wide = values
            .iter()
            .any(|row| row.len() > range.column_count() as usize);
        if values.len() > range.row_count() as usize || too_wide {
            return Err(report!(SheetError::TransportFailure)
                .attach_printable(format!("Values do not fit in range {:?}", range)));
        }

        for (row_offset, row) in values.into_iter().enumerate() {
            for (col_offset, value) in row.into_iter().enumerate() {
                state.set_cell(
                    range.start.row.offset() + row_offset,
                    range.start.col.offset() + col_offset,
                    value,
                );
            }
        }

        if range.start.row == Row::HEADER {
            state.stats.header_writes += 1;
        } else {
            state.stats.row_writes += 1;
        }
        Ok(())
    }
}
