use error_stack::{report, ResultExt};
use google_sheets4::{
    api::{
        AppendDimensionRequest, BatchUpdateSpreadsheetRequest, Request, Scope, SheetProperties,
        ValueRange,
    },
    Sheets,
};
use serde_json::Value;
use std::fmt::Debug;
use tracing::instrument;

use super::{
    auth,
    domain::{
        a1_notation::{A1Notation, ToA1Notation},
        cell_range::CellRange,
        column::Column,
        row::Row,
    },
    error::{ClassifyExt, SheetError},
    flatten_double_vec::FlattenDoubleVec,
    http_client::{self, HttpsConnector},
    value_range_factory::ValueRangeFactory,
    worksheet::{GridSize, Worksheet},
};
use crate::config::sheets_config::SpreadsheetConfig;

/// One worksheet of a Google spreadsheet, resolved once at construction.
pub struct SpreadsheetManager {
    pub config: SpreadsheetConfig,
    hub: Sheets<HttpsConnector>,
    sheet_id: i32,
    title: String,
}

impl Debug for SpreadsheetManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "SpreadsheetManager {{ spreadsheet_id: {}, sheet_id: {}, title: {:?} }}",
            self.config.spreadsheet_id, self.sheet_id, self.title
        )
    }
}

/// Picks the worksheet titled `name`, or the first one when no name is given.
fn select_worksheet(
    sheets: Vec<SheetProperties>,
    name: Option<&str>,
) -> error_stack::Result<(i32, String), SheetError> {
    let selected = match name {
        Some(name) => sheets
            .into_iter()
            .find(|properties| properties.title.as_deref() == Some(name)),
        None => sheets.into_iter().next(),
    };

    let properties = selected
        .ok_or_else(|| report!(SheetError::NotFound))
        .attach_printable_lazy(|| match name {
            Some(name) => format!("Worksheet '{}' not found in spreadsheet", name),
            None => "Spreadsheet has no worksheets".to_string(),
        })?;

    match (properties.sheet_id, properties.title) {
        (Some(sheet_id), Some(title)) => Ok((sheet_id, title)),
        _ => Err(report!(SheetError::NotFound))
            .attach_printable("Worksheet properties are missing the sheet id or title"),
    }
}

fn grid_size_of(properties: &SheetProperties) -> Option<GridSize> {
    let grid = properties.grid_properties.as_ref()?;
    Some(GridSize {
        rows: u32::try_from(grid.row_count?).ok()?,
        columns: u32::try_from(grid.column_count?).ok()?,
    })
}

impl SpreadsheetManager {
    #[instrument(name = "SpreadsheetManager::new")]
    pub async fn new(config: SpreadsheetConfig) -> error_stack::Result<Self, SheetError> {
        let client = http_client::http_client()?;
        let auth = auth::auth(&config, client.clone()).await?;
        let hub: Sheets<HttpsConnector> = Sheets::new(client, auth);

        let sheets = Self::fetch_sheet_properties(&hub, &config.spreadsheet_id).await?;
        let (sheet_id, title) = select_worksheet(sheets, config.worksheet_name.as_deref())?;
        tracing::debug!(sheet_id, title = %title, "resolved worksheet");

        Ok(SpreadsheetManager {
            config,
            hub,
            sheet_id,
            title,
        })
    }

    #[instrument(skip(hub))]
    async fn fetch_sheet_properties(
        hub: &Sheets<HttpsConnector>,
        spreadsheet_id: &str,
    ) -> error_stack::Result<Vec<SheetProperties>, SheetError> {
        let response = hub
            .spreadsheets()
            .get(spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .classify()
            .attach_printable_lazy(|| format!("Failed to fetch spreadsheet {}", spreadsheet_id))?;

        Ok(response
            .1
            .sheets
            .unwrap_or_default()
            .into_iter()
            .filter_map(|sheet| sheet.properties)
            .collect())
    }

    async fn read_values(
        &self,
        range: &A1Notation,
        major_dimension: &str,
    ) -> error_stack::Result<Vec<Vec<Value>>, SheetError> {
        let response = self
            .hub
            .spreadsheets()
            .values_get(&self.config.spreadsheet_id, range.as_ref())
            .major_dimension(major_dimension)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .classify()
            .attach_printable_lazy(|| format!("Failed to fetch range {}", range))?;

        Ok(response.1.values.unwrap_or_default())
    }

    async fn append_dimension(
        &self,
        dimension: &str,
        length: u32,
    ) -> error_stack::Result<(), SheetError> {
        let length_i32 = i32::try_from(length)
            .change_context(SheetError::InvalidSchema)
            .attach_printable_lazy(|| format!("Cannot append {length} {dimension} at once"))?;
        let request = BatchUpdateSpreadsheetRequest {
            requests: Some(vec![Request {
                append_dimension: Some(AppendDimensionRequest {
                    dimension: Some(dimension.to_string()),
                    length: Some(length_i32),
                    sheet_id: Some(self.sheet_id),
                }),
                ..Default::default()
            }]),
            ..Default::default()
        };

        self.hub
            .spreadsheets()
            .batch_update(request, &self.config.spreadsheet_id)
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map(|_| ())
            .classify()
            .attach_printable_lazy(|| {
                format!(
                    "Failed to append {} {} to worksheet '{}'",
                    length, dimension, self.title
                )
            })
    }
}

#[async_trait::async_trait]
impl Worksheet for SpreadsheetManager {
    fn title(&self) -> &str {
        &self.title
    }

    #[instrument]
    async fn col_values(&self, col: Column) -> error_stack::Result<Vec<String>, SheetError> {
        let range = col.to_a1_notation(Some(&self.title));
        Ok(self
            .read_values(&range, "COLUMNS")
            .await?
            .flatten_double_vec())
    }

    #[instrument]
    async fn row_values(&self, row: Row) -> error_stack::Result<Vec<String>, SheetError> {
        let range = row.to_a1_notation(Some(&self.title));
        Ok(self.read_values(&range, "ROWS").await?.flatten_double_vec())
    }

    #[instrument]
    async fn grid_size(&self) -> error_stack::Result<GridSize, SheetError> {
        let sheets = Self::fetch_sheet_properties(&self.hub, &self.config.spreadsheet_id).await?;

        let properties = sheets
            .iter()
            .find(|properties| properties.sheet_id == Some(self.sheet_id))
            .ok_or_else(|| report!(SheetError::NotFound))
            .attach_printable_lazy(|| format!("Worksheet '{}' no longer exists", self.title))?;

        grid_size_of(properties)
            .ok_or_else(|| report!(SheetError::TransportFailure))
            .attach_printable("Worksheet properties are missing the grid size")
    }

    #[instrument]
    async fn add_rows(&self, count: u32) -> error_stack::Result<(), SheetError> {
        self.append_dimension("ROWS", count).await
    }

    #[instrument]
    async fn add_cols(&self, count: u32) -> error_stack::Result<(), SheetError> {
        self.append_dimension("COLUMNS", count).await
    }

    #[instrument]
    async fn read_range(
        &self,
        range: &CellRange,
    ) -> error_stack::Result<Vec<Vec<Value>>, SheetError> {
        self.read_values(&range.to_a1_notation(Some(&self.title)), "ROWS")
            .await
    }

    #[instrument(skip(values))]
    async fn write_range(
        &self,
        range: &CellRange,
        values: Vec<Vec<Value>>,
    ) -> error_stack::Result<(), SheetError> {
        let range_str = range.to_a1_notation(Some(&self.title));

        self.hub
            .spreadsheets()
            .values_update(
                ValueRange::from_rows(values),
                &self.config.spreadsheet_id,
                range_str.as_ref(),
            )
            .value_input_option(self.config.value_input_option.as_ref())
            .add_scope(Scope::Spreadsheet)
            .doit()
            .await
            .map(|_| ())
            .classify()
            .attach_printable_lazy(|| format!("Failed to write to range {} ", range_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use google_sheets4::api::GridProperties;

    fn sheet(sheet_id: i32, title: &str) -> SheetProperties {
        SheetProperties {
            sheet_id: Some(sheet_id),
            title: Some(title.to_string()),
            grid_properties: Some(GridProperties {
                row_count: Some(1000),
                column_count: Some(26),
                ..Default::default()
            }),
            ..Default::default()
        }
    }

    #[test]
    fn test_select_first_worksheet_by_default() {
        let selected = select_worksheet(vec![sheet(7, "Log"), sheet(9, "Other")], None).unwrap();
        assert_eq!(selected, (7, "Log".to_string()));
    }

    #[test]
    fn test_select_worksheet_by_title() {
        let selected =
            select_worksheet(vec![sheet(7, "Log"), sheet(9, "Other")], Some("Other")).unwrap();
        assert_eq!(selected, (9, "Other".to_string()));
    }

    #[test]
    fn test_unknown_worksheet_is_not_found() {
        let error = select_worksheet(vec![sheet(7, "Log")], Some("Missing")).unwrap_err();
        assert_eq!(*error.current_context(), SheetError::NotFound);
    }

    #[test]
    fn test_empty_spreadsheet_is_not_found() {
        let error = select_worksheet(Vec::new(), None).unwrap_err();
        assert_eq!(*error.current_context(), SheetError::NotFound);
    }

    #[test]
    fn test_grid_size_of() {
        assert_eq!(
            grid_size_of(&sheet(1, "Log")),
            Some(GridSize {
                rows: 1000,
                columns: 26
            })
        );
        assert_eq!(grid_size_of(&SheetProperties::default()), None);
    }
}
