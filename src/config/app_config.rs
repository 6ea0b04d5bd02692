use std::path::PathBuf;

use config::{builder::DefaultState, Config, ConfigBuilder};
use error_stack::{Report, ResultExt};
use thiserror::Error;

use super::{input_config::InputConfig, log_config::LogConfig, sheets_config::SpreadsheetConfig};

/// Base name of the optional configuration file (`Config.toml`, `Config.yaml`, ...).
pub const CONFIG_FILE: &str = "Config";
pub const ENV_PREFIX: &str = "JSON_TO_SHEETS";

#[derive(serde::Deserialize, Debug, Clone)]
pub struct AppConfig {
    pub sheets: SpreadsheetConfig,
    pub input: InputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

/// Values given on the command line. They take precedence over file and environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub key_file: Option<PathBuf>,
    pub spreadsheet_id: Option<String>,
    pub worksheet_name: Option<String>,
    pub data_file: Option<PathBuf>,
}

#[derive(Error, Debug)]
#[error("Failed to load configuration")]
pub struct AppConfigError;

fn path_value(path: Option<PathBuf>) -> Option<String> {
    path.map(|path| path.to_string_lossy().into_owned())
}

impl AppConfig {
    /// Layers `Config.*` in the working directory, `JSON_TO_SHEETS_*`
    /// environment variables and `overrides`, in increasing precedence.
    pub fn load(overrides: ConfigOverrides) -> error_stack::Result<Self, AppConfigError> {
        let builder = Config::builder()
            .add_source(config::File::with_name(CONFIG_FILE).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            );

        Self::from_builder(builder, overrides)
    }

    pub fn from_builder(
        builder: ConfigBuilder<DefaultState>,
        overrides: ConfigOverrides,
    ) -> error_stack::Result<Self, AppConfigError> {
        let config = builder
            .set_override_option("sheets.priv_key", path_value(overrides.key_file))
            .and_then(|builder| {
                builder.set_override_option("sheets.spreadsheet_id", overrides.spreadsheet_id)
            })
            .and_then(|builder| {
                builder.set_override_option("sheets.worksheet_name", overrides.worksheet_name)
            })
            .and_then(|builder| {
                builder.set_override_option("input.data_file", path_value(overrides.data_file))
            })
            .and_then(|builder| builder.build())
            .map_err(|error| match error {
                config::ConfigError::NotFound(property) => {
                    Report::new(AppConfigError)
                        .attach_printable(format!("Missing config property: {property}"))
                }
                other => Report::new(other).change_context(AppConfigError),
            })?;

        config
            .try_deserialize()
            .change_context(AppConfigError)
            .attach_printable("Configuration does not match the expected layout")
    }
}
