use std::path::PathBuf;

#[derive(serde::Deserialize, Debug, Clone)]
#[serde(default)]
pub struct LogConfig {
    /// Maximum level written to the terminal and the log file.
    pub level: String,
    /// Optional plain-text log file.
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        LogConfig {
            level: "warn".to_string(),
            file: None,
        }
    }
}
