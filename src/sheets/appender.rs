use error_stack::{report, ResultExt};
use serde_json::Value;
use tracing::{debug, info, instrument};

use super::{
    domain::{
        cell_range::CellRange,
        column::Column,
        header_row::{is_date_header, HeaderRow},
        row::Row,
    },
    error::SheetError,
    worksheet::Worksheet,
};
use crate::input::Record;

/// What an [`SheetAppender::append`] call changed on the worksheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppendOutcome {
    pub row: Row,
    pub added_columns: Vec<String>,
    pub grown_rows: u32,
    pub grown_columns: u32,
}

/// Appends records to a worksheet laid out as a date-keyed table: row 1 holds
/// the headers, column A holds the date of every data row.
///
/// The worksheet is assumed to have a single writer for the duration of an
/// append. Headers are read, extended and written back without any locking.
pub struct SheetAppender<W> {
    worksheet: W,
}

fn ensure_date_header(
    first: Option<&str>,
    location: &'static str,
) -> error_stack::Result<(), SheetError> {
    match first {
        Some(header) if is_date_header(header) => Ok(()),
        found => Err(report!(SheetError::InvalidSchema)).attach_printable_lazy(|| {
            format!("Date header missing from the {location}, found {found:?}")
        }),
    }
}

/// Converts a header or row count into a grid extent.
fn grid_extent(len: usize, what: &'static str) -> error_stack::Result<u32, SheetError> {
    u32::try_from(len)
        .change_context(SheetError::InvalidSchema)
        .attach_printable_lazy(|| format!("{what} of {len} does not fit in a worksheet"))
}

/// Cell payload for a record value. `null` clears the cell.
fn cell_payload(value: &Value) -> Value {
    match value {
        Value::Null => Value::String(String::new()),
        other => other.clone(),
    }
}

impl<W: Worksheet> SheetAppender<W> {
    pub fn new(worksheet: W) -> Self {
        SheetAppender { worksheet }
    }

    pub fn worksheet(&self) -> &W {
        &self.worksheet
    }

    /// Non-empty headers of row 1. The first one must contain `"Date"`.
    #[instrument(skip(self), fields(worksheet = %self.worksheet.title()))]
    pub async fn resolve_header_row(&self) -> error_stack::Result<HeaderRow, SheetError> {
        let header_row = HeaderRow::from_cells(self.worksheet.row_values(Row::HEADER).await?);
        ensure_date_header(header_row.first(), "header row")?;
        Ok(header_row)
    }

    /// Row that receives the next record: number of non-empty cells in
    /// column A (header included) plus one.
    #[instrument(skip(self), fields(worksheet = %self.worksheet.title()))]
    pub async fn resolve_target_row_index(&self) -> error_stack::Result<Row, SheetError> {
        let dates = self
            .worksheet
            .col_values(Column::DATE)
            .await?
            .into_iter()
            .filter(|cell| !cell.is_empty())
            .collect::<Vec<_>>();
        ensure_date_header(dates.first().map(String::as_str), "date column")?;
        Ok(Row(grid_extent(dates.len() + 1, "Target row")?))
    }

    /// Writes `record` into the next empty row, adding a column for every
    /// field the header row does not have yet.
    #[instrument(skip(self, record), fields(worksheet = %self.worksheet.title()))]
    pub async fn append(&self, record: &Record) -> error_stack::Result<AppendOutcome, SheetError> {
        let mut headers = self.resolve_header_row().await?;
        let target = self.resolve_target_row_index().await?;
        let size = self.worksheet.grid_size().await?;
        debug!(?size, %target, headers = headers.len(), "resolved layout");

        // An empty header cell reads back as no header at all.
        if record.keys().any(str::is_empty) {
            return Err(report!(SheetError::KeyAlignment))
                .attach_printable("Field with an empty name cannot be given a header column");
        }

        let mut grown_rows = 0;
        if size.rows < *target {
            grown_rows = *target - size.rows;
            self.worksheet.add_rows(grown_rows).await?;
        }

        let added_columns = record
            .keys()
            .filter(|key| headers.push(key))
            .map(str::to_owned)
            .collect::<Vec<_>>();

        let width = grid_extent(headers.len(), "Header count")?;
        let mut grown_columns = 0;
        if width > size.columns {
            grown_columns = width - size.columns;
            self.worksheet.add_cols(grown_columns).await?;
        }

        if !added_columns.is_empty() {
            info!(columns = ?added_columns, "extending header row");
            let header_cells = headers
                .names()
                .iter()
                .map(|name| Value::String(name.clone()))
                .collect();
            self.worksheet
                .write_range(
                    &CellRange::row_span(Row::HEADER, width),
                    vec![header_cells],
                )
                .await
                .attach_printable("Failed to write the extended header row")?;
        }

        // Re-read so the row is laid out against what the sheet actually holds.
        let headers = self.resolve_header_row().await?;
        let missing = headers.missing(record.keys());
        if !missing.is_empty() {
            return Err(report!(SheetError::KeyAlignment)).attach_printable_lazy(|| {
                format!(
                    "Fields {:?} are not in the header row {:?}",
                    missing,
                    headers.names()
                )
            });
        }

        let range = CellRange::row_span(
            target,
            grid_extent(headers.len(), "Header count")?,
        );
        let mut row = self
            .worksheet
            .read_range(&range)
            .await?
            .into_iter()
            .next()
            .unwrap_or_default();
        row.resize(headers.len(), Value::String(String::new()));

        for (key, value) in record.iter() {
            let column = headers
                .column_of(key)
                .ok_or_else(|| report!(SheetError::KeyAlignment))
                .attach_printable_lazy(|| format!("Field {key:?} is not in the header row"))?;
            row[column.offset()] = cell_payload(value);
        }

        self.worksheet
            .write_range(&range, vec![row])
            .await
            .attach_printable_lazy(|| format!("Failed to write row {target}"))?;

        Ok(AppendOutcome {
            row: target,
            added_columns,
            grown_rows,
            grown_columns,
        })
    }
}
