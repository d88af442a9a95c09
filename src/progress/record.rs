// Progress payload as returned by the papers progress endpoint

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::collections::BTreeMap;

/// Sparse, loosely-typed progress record for one paper
///
/// Keeps the difference between a key that is absent and a key that is
/// present as null, since stage inclusion depends on presence alone.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressRecord {
    fields: BTreeMap<String, Option<String>>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a record from an arbitrary JSON document
    ///
    /// Anything other than an object yields an empty record. Numbers and
    /// booleans keep their textual form; arrays and objects count as present
    /// but carry no value.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            if !value.is_null() {
                log::debug!("progress payload is not an object; treating as empty");
            }
            return Self::default();
        };

        let fields = object
            .iter()
            .map(|(key, value)| (key.clone(), scalar_text(value)))
            .collect();
        Self { fields }
    }

    /// Parse a record from JSON text
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Ok(Self::from_value(&value))
    }

    /// Set a field to a string value
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.insert(key, Some(value.to_string()));
        self
    }

    /// Set a field to null
    pub fn with_null(mut self, key: &str) -> Self {
        self.insert(key, None);
        self
    }

    pub fn insert(&mut self, key: &str, value: Option<String>) {
        self.fields.insert(key.to_string(), value);
    }

    /// Whether the key appears in the payload at all, null included
    pub fn contains(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Non-null value of a field
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).and_then(|v| v.as_deref())
    }

    /// Non-null, non-empty value of a field
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.is_empty())
    }

    /// First field in `candidates` carrying a non-null value
    pub fn first_of(&self, candidates: &[&str]) -> Option<&str> {
        candidates.iter().find_map(|field| self.get(field))
    }

    pub fn any_present(&self, candidates: &[&str]) -> bool {
        candidates.iter().any(|field| self.contains(field))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

impl<'de> Deserialize<'de> for ProgressRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_value(&value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_presence_is_distinct_from_value() {
        let record = ProgressRecord::from_value(&json!({
            "submission_status": "finished",
            "review_time": null,
        }));
        assert!(record.contains("submission_status"));
        assert!(record.contains("review_time"));
        assert!(!record.contains("review_status"));
        assert_eq!(record.get("submission_status"), Some("finished"));
        assert_eq!(record.get("review_time"), None);
    }

    #[test]
    fn test_non_object_payload_is_empty() {
        assert!(ProgressRecord::from_value(&json!(null)).is_empty());
        assert!(ProgressRecord::from_value(&json!([1, 2])).is_empty());
        assert!(ProgressRecord::from_value(&json!("finished")).is_empty());
    }

    #[test]
    fn test_scalars_keep_text_form() {
        let record = ProgressRecord::from_value(&json!({
            "paper_id": 42,
            "flag": true,
            "nested": {"a": 1},
        }));
        assert_eq!(record.get("paper_id"), Some("42"));
        assert_eq!(record.get("flag"), Some("true"));
        assert!(record.contains("nested"));
        assert_eq!(record.get("nested"), None);
    }

    #[test]
    fn test_first_of_skips_nulls() {
        let record = ProgressRecord::new()
            .with_null("review_status")
            .with("review_stage", "finished");
        assert_eq!(
            record.first_of(&["review_status", "review_stage"]),
            Some("finished")
        );
        assert_eq!(record.first_of(&[]), None);
    }

    #[test]
    fn test_empty_string_is_a_value_but_not_non_empty() {
        let record = ProgressRecord::new().with("payment_status", "");
        assert_eq!(record.get("payment_status"), Some(""));
        assert_eq!(record.get_non_empty("payment_status"), None);
    }

    #[test]
    fn test_deserialize_from_json_text() {
        let record: ProgressRecord =
            serde_json::from_str(r#"{"submission_time": "2024-01-02 10:00:00"}"#).unwrap();
        assert_eq!(record.len(), 1);
        assert_eq!(record.get("submission_time"), Some("2024-01-02 10:00:00"));
    }
}
