use google_sheets4::api::ValueRange;
use serde_json::Value;

pub trait ValueRangeFactory {
    fn from_rows(rows: Vec<Vec<Value>>) -> Self;
}

impl ValueRangeFactory for ValueRange {
    fn from_rows(rows: Vec<Vec<Value>>) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: None,
            values: Some(rows),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_rows_keeps_payload_types() {
        let value_range = ValueRange::from_rows(vec![vec![json!("2023-01-01"), json!(5)]]);
        assert_eq!(
            value_range.major_dimension,
            Some("ROWS".to_string()),
            "Major dimension should be ROWS"
        );
        assert_eq!(value_range.range, None, "Range should be None");
        assert_eq!(
            value_range.values,
            Some(vec![vec![json!("2023-01-01"), json!(5)]]),
            "Numbers should not be turned into strings"
        );
    }
}
