//! Helpers for reading loosely-typed JSON request bodies.
//!
//! Request bodies are accepted as arbitrary JSON so that a missing field can
//! be reported by name instead of as a generic deserialization failure.

use serde_json::Value;

/// Returns `true` if `payload` is an object containing `key`.
///
/// A key that is present with a `null` value counts as present.
#[must_use]
pub fn has_field(payload: &Value, key: &str) -> bool {
    payload.as_object().is_some_and(|map| map.contains_key(key))
}

/// Convert a JSON value into the text stored in a text column.
///
/// Strings are taken verbatim, `null` becomes SQL `NULL`, and every other
/// value is stored as its compact JSON text (so a numeric zip `0` becomes
/// `"0"`).
#[must_use]
pub fn field_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_has_field() {
        let payload = json!({"name": "A", "zip": null});
        assert!(has_field(&payload, "name"));
        assert!(has_field(&payload, "zip"));
        assert!(!has_field(&payload, "city"));
    }

    #[test]
    fn test_has_field_non_object() {
        assert!(!has_field(&json!(["name"]), "name"));
        assert!(!has_field(&json!("name"), "name"));
        assert!(!has_field(&Value::Null, "name"));
    }

    #[test]
    fn test_field_text() {
        assert_eq!(field_text(&json!("1 St")), Some("1 St".to_string()));
        assert_eq!(field_text(&json!(0)), Some("0".to_string()));
        assert_eq!(field_text(&json!(true)), Some("true".to_string()));
        assert_eq!(field_text(&Value::Null), None);
    }
}
