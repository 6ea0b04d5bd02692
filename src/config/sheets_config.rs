#[derive(serde::Deserialize, Debug, Clone)]
pub struct SpreadsheetConfig {
    /// Path to the service account key file.
    pub priv_key: Box<str>,
    pub spreadsheet_id: Box<str>,
    /// Worksheet title. The first worksheet is used when absent.
    #[serde(default)]
    pub worksheet_name: Option<Box<str>>,
    #[serde(default)]
    pub value_input_option: ValueInputOption,
}

/// How the service interprets written values.
#[derive(
    serde::Deserialize, Debug, Clone, Copy, Default, PartialEq, Eq, strum::AsRefStr, strum::Display,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored exactly as given.
    #[default]
    Raw,
    /// Parsed as if typed into the UI (dates, numbers, formulas).
    UserEntered,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_input_option_wire_names() {
        assert_eq!(ValueInputOption::Raw.as_ref(), "RAW");
        assert_eq!(ValueInputOption::UserEntered.as_ref(), "USER_ENTERED");
    }

    #[test]
    fn test_value_input_option_deserialize() {
        let option: ValueInputOption = serde_json::from_str("\"USER_ENTERED\"").unwrap();
        assert_eq!(option, ValueInputOption::UserEntered);
    }
}
