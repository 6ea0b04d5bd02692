use serde_json::Value;

/// Text the sheet would show for a cell payload.
pub fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

pub trait FlattenDoubleVec<T> {
    fn flatten_double_vec(self) -> T;
}

impl FlattenDoubleVec<Vec<String>> for Vec<Vec<Value>> {
    fn flatten_double_vec(self) -> Vec<String> {
        self.iter().flatten().map(cell_text).collect()
    }
}
