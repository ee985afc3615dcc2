//! Document input decoding
//!
//! Predicted and ground-truth records reach the comparator either as an
//! already parsed JSON value or as JSON text. Text that went through a CSV
//! round trip arrives wrapped in quotes with every inner quote doubled; that
//! convention is undone before decoding.

use crate::error::{Error, Result};
use serde_json::{Map, Value};

/// A record supplied to the comparator
#[derive(Debug, Clone, PartialEq)]
pub enum DocumentInput {
    /// Already decoded JSON
    Json(Value),
    /// JSON text, possibly CSV-quoted
    Text(String),
}

impl From<Value> for DocumentInput {
    fn from(value: Value) -> Self {
        DocumentInput::Json(value)
    }
}

impl From<&Value> for DocumentInput {
    fn from(value: &Value) -> Self {
        DocumentInput::Json(value.clone())
    }
}

impl From<String> for DocumentInput {
    fn from(text: String) -> Self {
        DocumentInput::Text(text)
    }
}

impl From<&str> for DocumentInput {
    fn from(text: &str) -> Self {
        DocumentInput::Text(text.to_string())
    }
}

impl DocumentInput {
    /// Decode into a JSON object
    ///
    /// `label` names the input in error messages (e.g. "predicted"). A JSON
    /// string value is treated as JSON text and decoded.
    pub fn into_object(self, label: &str) -> Result<Map<String, Value>> {
        let value = match self {
            DocumentInput::Json(Value::String(text)) | DocumentInput::Text(text) => {
                parse_json_text(&text, label)?
            }
            DocumentInput::Json(value) => value,
        };

        match value {
            Value::Object(map) => Ok(map),
            other => Err(Error::InvalidInput(format!(
                "{} document must be a JSON object, got {}",
                label,
                json_type_name(&other)
            ))),
        }
    }
}

/// Undo CSV-style quoting: strip the outer quotes and collapse `""` to `"`
///
/// Returns `None` when the text is not wrapped in quote characters.
pub fn unescape_csv_quoted(text: &str) -> Option<String> {
    let inner = text.strip_prefix('"')?.strip_suffix('"')?;
    Some(inner.replace("\"\"", "\""))
}

/// Decode JSON text, trying the CSV-unescaped form first when it applies
pub fn parse_json_text(text: &str, label: &str) -> Result<Value> {
    let trimmed = text.trim();
    let mut first_error = None;

    if let Some(unescaped) = unescape_csv_quoted(trimmed) {
        match serde_json::from_str(&unescaped) {
            Ok(value) => return Ok(value),
            Err(e) => first_error = Some(e),
        }
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(value),
        Err(e) => Err(Error::invalid_json(label, first_error.unwrap_or(e))),
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_unescape_csv_quoted() {
        assert_eq!(
            unescape_csv_quoted(r#""{""a"": 1}""#),
            Some(r#"{"a": 1}"#.to_string())
        );
        assert_eq!(unescape_csv_quoted(r#"{"a": 1}"#), None);
        assert_eq!(unescape_csv_quoted("\""), None);
    }

    #[test]
    fn test_parse_plain_json() {
        let value = parse_json_text(r#"{"flag": true, "n": 3}"#, "predicted").unwrap();
        assert_eq!(value, json!({"flag": true, "n": 3}));
    }

    #[test]
    fn test_parse_csv_quoted_json() {
        let text = r#""{""subject"": ""Trip to Rome"", ""urgent"": false}""#;
        let value = parse_json_text(text, "ground truth").unwrap();
        assert_eq!(value, json!({"subject": "Trip to Rome", "urgent": false}));
    }

    #[test]
    fn test_quoted_json_string_literal_falls_back_to_raw() {
        // A JSON string literal is quote-wrapped but has no doubled quotes
        let value = parse_json_text(r#""hello""#, "predicted").unwrap();
        assert_eq!(value, json!("hello"));
    }

    #[test]
    fn test_parse_failure_names_input() {
        let err = parse_json_text("{not json", "ground truth").unwrap_err();
        match err {
            Error::InvalidJson { input, .. } => assert_eq!(input, "ground truth"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_insertion_order_preserved() {
        let value = parse_json_text(r#"{"z": 1, "a": 2, "m": 3}"#, "predicted").unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
    }

    #[test]
    fn test_into_object_rejects_non_objects() {
        let err = DocumentInput::from(json!([1, 2])).into_object("predicted").unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(err.to_string().contains("array"));
    }

    #[test]
    fn test_into_object_decodes_json_string_value() {
        let input = DocumentInput::from(json!(r#"{"urgent": true, "group_size": 4}"#));
        let map = input.into_object("predicted").unwrap();
        assert_eq!(map.get("urgent"), Some(&json!(true)));
        assert_eq!(map.get("group_size"), Some(&json!(4)));

        let err = DocumentInput::from(json!("not json")).into_object("ground truth").unwrap_err();
        assert!(matches!(err, Error::InvalidJson { .. }));
    }

    #[test]
    fn test_into_object_from_text() {
        let map = DocumentInput::from(r#"{"a": {"b": 1}}"#).into_object("predicted").unwrap();
        assert_eq!(map.get("a"), Some(&json!({"b": 1})));
    }
}
