use error_stack::ResultExt;
use thiserror::Error;
use tracing::{info, instrument};

use crate::{
    config::app_config::AppConfig,
    input::{load_record, Record},
    sheets::{
        appender::{AppendOutcome, SheetAppender},
        spreadsheet_manager::SpreadsheetManager,
        worksheet::Worksheet,
    },
};

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppError {
    #[error("Invalid configuration")]
    Config,
    #[error("Could not set up logging")]
    Logging,
    #[error("Could not load the record to upload")]
    Input,
    #[error("Could not append the record to the worksheet")]
    Sheets,
}

/// Loads the configured data file and appends it to the configured worksheet.
#[instrument(skip(config), fields(data_file = %config.input.data_file.display()))]
pub async fn run(config: AppConfig) -> error_stack::Result<AppendOutcome, AppError> {
    let record = load_record(&config.input.data_file).change_context(AppError::Input)?;

    let worksheet = SpreadsheetManager::new(config.sheets)
        .await
        .change_context(AppError::Sheets)?;

    append_record(&SheetAppender::new(worksheet), &record).await
}

pub async fn append_record<W: Worksheet>(
    appender: &SheetAppender<W>,
    record: &Record,
) -> error_stack::Result<AppendOutcome, AppError> {
    let outcome = appender
        .append(record)
        .await
        .change_context(AppError::Sheets)
        .attach_printable_lazy(|| format!("Worksheet: {}", appender.worksheet().title()))?;

    info!(
        row = %outcome.row,
        added_columns = ?outcome.added_columns,
        grown_rows = outcome.grown_rows,
        grown_columns = outcome.grown_columns,
        "record appended"
    );
    Ok(outcome)
}
