use serde_json::{Map, Value};

fn is_digit_key(key: &str) -> bool {
    !key.is_empty() && key.bytes().all(|byte| byte.is_ascii_digit())
}

/// Strips leading zeros from every all-digit key.
///
/// `"007"` becomes `"7"` and `"000"` becomes `""`. Renamed entries are
/// applied after the pass over the input keys, so a renamed key that
/// collides with an existing one overwrites its value in place. Every other
/// key keeps its value and position.
pub fn normalize_keys(fields: Map<String, Value>) -> Map<String, Value> {
    let mut normalized = Map::with_capacity(fields.len());
    let mut renamed = Vec::new();

    for (key, value) in fields {
        if is_digit_key(&key) && key.starts_with('0') {
            renamed.push((key.trim_start_matches('0').to_owned(), value));
        } else {
            normalized.insert(key, value);
        }
    }

    for (key, value) in renamed {
        tracing::debug!(key = %key, "renamed zero-padded key");
        normalized.insert(key, value);
    }

    normalized
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!("test input must be an object"),
        }
    }

    fn keys(map: &Map<String, Value>) -> Vec<&str> {
        map.keys().map(String::as_str).collect()
    }

    #[test]
    fn test_leading_zeros_are_stripped() {
        let normalized = normalize_keys(object(json!({ "007": "x" })));
        assert_eq!(Value::Object(normalized), json!({ "7": "x" }));
    }

    #[test]
    fn test_all_zero_key_collapses_to_empty() {
        let normalized = normalize_keys(object(json!({ "000": "x" })));
        assert_eq!(Value::Object(normalized), json!({ "": "x" }));
    }

    #[test]
    fn test_non_digit_keys_are_unchanged() {
        let input = json!({ "Date": "2023-01-01", "0x1F": 1, "a01": 2, "-01": 3, "": 4 });
        let normalized = normalize_keys(object(input.clone()));
        assert_eq!(Value::Object(normalized), input);
    }

    #[test]
    fn test_digit_key_without_leading_zero_is_kept() {
        let normalized = normalize_keys(object(json!({ "Date": "d", "7": "x", "10": "y" })));
        assert_eq!(keys(&normalized), vec!["Date", "7", "10"]);
    }

    #[test]
    fn test_non_ascii_digits_are_not_digit_keys() {
        let normalized = normalize_keys(object(json!({ "０７": "x" })));
        assert_eq!(keys(&normalized), vec!["０７"]);
    }

    #[test]
    fn test_collision_overwrites_in_place() {
        let normalized = normalize_keys(object(json!({ "Date": "d", "7": "old", "007": "new", "Fee": 1 })));
        assert_eq!(keys(&normalized), vec!["Date", "7", "Fee"]);
        assert_eq!(normalized["7"], json!("new"));
    }

    #[test]
    fn test_later_rename_wins() {
        let normalized = normalize_keys(object(json!({ "07": "first", "007": "second" })));
        assert_eq!(Value::Object(normalized), json!({ "7": "second" }));
    }

    #[test]
    fn test_renamed_keys_move_to_the_end() {
        let normalized = normalize_keys(object(json!({ "01": 1, "Date": "d", "Amount": 2 })));
        assert_eq!(keys(&normalized), vec!["Date", "Amount", "1"]);
    }
}
