use serde_json::Value;

pub fn format_2dp(value: f64) -> String {
    format!("{value:.2}")
}

pub fn stat_value_text(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
