use serde_json::{Map, Value};

/// Formats the current-weather report for a city.
pub fn format_current_weather(city: &str, temp: &serde_json::Number, description: &str) -> String {
    format!("Current weather in {}: {}\u{00b0}C, {}", city, temp, description)
}

/// Formats an IP geolocation record into one line per field.
///
/// Fields holding an empty string or `false` are dropped. Objects and
/// arrays are inlined as compact JSON; other scalars print bare.
pub fn format_ip_details(details: &Map<String, Value>) -> String {
    let mut output = String::new();
    for (key, value) in details {
        if let Some(text) = ip_value_text(value) {
            output.push_str(&format!("ip details {} - {}\n", key, text));
        }
    }
    output
}

fn ip_value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::Bool(false) => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(true) => Some("true".to_string()),
        Value::Null => Some("null".to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Object(_) | Value::Array(_) => serde_json::to_string(value).ok(),
    }
}
