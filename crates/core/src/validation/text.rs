//! Text form of JSON values.
//!
//! Every value the engine compares is first reduced to text, so a rule
//! written against `"true"` matches a JSON boolean and a rule written
//! against `"42"` matches a number.

use std::borrow::Cow;

use serde_json::Value;

/// Text form of a JSON value.
///
/// Strings are returned verbatim, `null` as the empty string, booleans and
/// numbers in their JSON spelling, arrays and objects as compact JSON.
pub fn value_text(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed(""),
        Value::Bool(true) => Cow::Borrowed("true"),
        Value::Bool(false) => Cow::Borrowed("false"),
        Value::Number(n) => Cow::Owned(n.to_string()),
        Value::Array(_) | Value::Object(_) => Cow::Owned(value.to_string()),
    }
}

/// Empty or whitespace-only text.
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Text of `object[field]`, or `None` when the field is absent or `null`.
pub fn field_text<'a>(object: &'a Value, field: &str) -> Option<Cow<'a, str>> {
    match object.get(field) {
        None | Some(Value::Null) => None,
        Some(value) => Some(value_text(value)),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn value_text_covers_every_json_kind() {
        assert_eq!(value_text(&json!("abc")), "abc");
        assert_eq!(value_text(&json!(null)), "");
        assert_eq!(value_text(&json!(true)), "true");
        assert_eq!(value_text(&json!(12.5)), "12.5");
        assert_eq!(value_text(&json!([1, 2])), "[1,2]");
        assert_eq!(value_text(&json!({"a": 1})), r#"{"a":1}"#);
    }

    #[test]
    fn field_text_treats_null_as_absent() {
        let payload = json!({"a": null, "b": false});
        assert!(field_text(&payload, "a").is_none());
        assert!(field_text(&payload, "missing").is_none());
        assert_eq!(field_text(&payload, "b").as_deref(), Some("false"));
    }

    #[test]
    fn whitespace_only_is_blank() {
        assert!(is_blank(""));
        assert!(is_blank(" \t\n"));
        assert!(!is_blank(" x "));
    }
}
