use std::path::Path;

use error_stack::{report, ResultExt};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::instrument;

use super::normalize::normalize_keys;
use crate::sheets::domain::header_row::DATE_FIELD;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputError {
    #[error("Failed to read the data file")]
    Read,
    #[error("Data file is not valid JSON")]
    Parse,
    #[error("Data file must hold a JSON object")]
    NotAnObject,
    #[error("Record has no \"Date\" field")]
    MissingDate,
}

/// One row to append: field name -> opaque cell payload, in input order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    fields: Map<String, Value>,
}

impl Record {
    /// Normalizes the keys of `fields` and checks that a date is present.
    pub fn new(fields: Map<String, Value>) -> error_stack::Result<Self, InputError> {
        let fields = normalize_keys(fields);
        if !fields.contains_key(DATE_FIELD) {
            return Err(report!(InputError::MissingDate)).attach_printable_lazy(|| {
                format!(
                    "Fields present: {:?}",
                    fields.keys().collect::<Vec<_>>()
                )
            });
        }
        Ok(Record { fields })
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl TryFrom<Value> for Record {
    type Error = error_stack::Report<InputError>;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(fields) => Record::new(fields),
            other => Err(report!(InputError::NotAnObject))
                .attach_printable(format!("Top-level value: {other}")),
        }
    }
}

impl std::str::FromStr for Record {
    type Err = error_stack::Report<InputError>;

    fn from_str(json: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(json).change_context(InputError::Parse)?;
        Record::try_from(value)
    }
}

#[instrument]
pub fn load_record(path: &Path) -> error_stack::Result<Record, InputError> {
    let contents = std::fs::read_to_string(path)
        .change_context(InputError::Read)
        .attach_printable_lazy(|| format!("Data file: {}", path.display()))?;

    contents
        .parse::<Record>()
        .attach_printable_lazy(|| format!("Data file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_record_keeps_input_order() {
        let record: Record = r#"{"Date": "2023-01-01", "Zeta": 1, "Alpha": 2}"#
            .parse()
            .unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Date", "Zeta", "Alpha"]);
        assert_eq!(
            record.iter().next(),
            Some(("Date", &json!("2023-01-01")))
        );
    }

    #[test]
    fn test_record_keys_are_normalized() {
        let record: Record = r#"{"Date": "d", "0042": "x"}"#.parse().unwrap();
        assert_eq!(record.keys().collect::<Vec<_>>(), vec!["Date", "42"]);
    }

    #[test]
    fn test_missing_date_is_rejected() {
        let error = r#"{"Amount": 5}"#.parse::<Record>().unwrap_err();
        assert_eq!(*error.current_context(), InputError::MissingDate);
    }

    #[test]
    fn test_array_is_rejected() {
        let error = r#"[{"Date": "d"}]"#.parse::<Record>().unwrap_err();
        assert_eq!(*error.current_context(), InputError::NotAnObject);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let error = r#"{"Date": "#.parse::<Record>().unwrap_err();
        assert_eq!(*error.current_context(), InputError::Parse);
    }

    #[test]
    fn test_load_record_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"Date": "2023-01-02", "007": 7}}"#).unwrap();

        let record = load_record(file.path()).unwrap();

        assert_eq!(
            record.iter().collect::<Vec<_>>(),
            vec![("Date", &json!("2023-01-02")), ("7", &json!(7))]
        );
    }

    #[test]
    fn test_load_record_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let error = load_record(&dir.path().join("absent.json")).unwrap_err();
        assert_eq!(*error.current_context(), InputError::Read);
    }
}
