use crate::Value;

/// Converts a runtime value for `--print-result`.
///
/// `undefined` and non-finite numbers become `null`; functions become
/// their display string.
pub fn value_to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Null | Value::Undefined => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => number_to_json(*n),
        Value::String(s) => serde_json::Value::String(s.to_string()),
        Value::Array(items) => {
            serde_json::Value::Array(items.borrow().iter().map(value_to_json).collect())
        }
        Value::Object(entries) => {
            let mut map = serde_json::Map::new();
            for (key, entry) in entries.borrow().iter() {
                map.insert(key.clone(), value_to_json(entry));
            }
            serde_json::Value::Object(map)
        }
        Value::Function(_) | Value::NativeFunction(_) => {
            serde_json::Value::String(value.to_string())
        }
    }
}

fn number_to_json(n: f64) -> serde_json::Value {
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        return serde_json::Value::from(n as i64);
    }
    serde_json::Number::from_f64(n)
        .map(serde_json::Value::Number)
        .unwrap_or(serde_json::Value::Null)
}

pub fn to_json_string(value: &Value, compact: bool) -> String {
    let json = value_to_json(value);
    let rendered = if compact {
        serde_json::to_string(&json)
    } else {
        serde_json::to_string_pretty(&json)
    };
    rendered.unwrap_or_else(|_| "null".to_string())
}
