// Serde helpers for loosely-typed API fields
//
// Identifiers and amounts arrive as either JSON strings or numbers depending
// on the endpoint, so they are normalized to their text form.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Text form of a scalar JSON value; None for null, arrays and objects
pub fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Deserialize a string-or-number field into `Option<String>`
pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_text))
}

/// Treat empty strings like missing values
pub fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
