use std::path::PathBuf;

#[derive(serde::Deserialize, Debug, Clone)]
pub struct InputConfig {
    /// JSON file holding the record to upload.
    pub data_file: PathBuf,
}
