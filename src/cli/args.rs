use std::path::PathBuf;

use clap::Parser;

use crate::config::app_config::ConfigOverrides;

#[derive(Parser, Debug)]
#[command(name = "json-to-sheets")]
#[command(about = "Appends a JSON record as a new row of a date-keyed Google Sheets worksheet")]
pub struct Cli {
    /// Service account key file used for the Google APIs
    #[arg(long = "keyfile", required = true)]
    pub key_file: PathBuf,

    /// Id of the spreadsheet that receives the data
    #[arg(long = "spreadsheetid", required = true)]
    pub spreadsheet_id: String,

    /// Worksheet title. Defaults to the first worksheet
    #[arg(long = "worksheetname")]
    pub worksheet_name: Option<String>,

    /// JSON file to upload. It must include a "Date" field
    #[arg(long = "datafile", required = true)]
    pub data_file: PathBuf,
}

impl From<Cli> for ConfigOverrides {
    fn from(cli: Cli) -> Self {
        ConfigOverrides {
            key_file: Some(cli.key_file),
            spreadsheet_id: Some(cli.spreadsheet_id),
            worksheet_name: cli.worksheet_name,
            data_file: Some(cli.data_file),
        }
    }
}
