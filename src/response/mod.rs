//! Replies from the task server.
//!
//! The server sends an open-ended JSON object. [`TaskResponse`] keeps it
//! verbatim and offers guarded accessors; [`ResponseKind`] classifies it
//! into one of the known shapes.

pub mod kind;

pub use kind::{ResponseKind, Tool};

use serde_json::Value;

use crate::consts::NOT_AVAILABLE;

/// A reply exactly as the server sent it.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskResponse(Value);

impl TaskResponse {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Top-level field, treating `null` as absent. Non-object replies have no fields.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.0.get(key).filter(|v| !v.is_null())
    }

    /// Field from the nested `data` object, falling back to the top level.
    pub fn nested_field(&self, key: &str) -> Option<&Value> {
        self.field("data")
            .and_then(|data| data.get(key))
            .filter(|v| !v.is_null())
            .or_else(|| self.field(key))
    }

    /// The tool tag: `tool`, or `tool_used` when `tool` is missing or empty.
    pub fn tool_tag(&self) -> Option<&str> {
        ["tool", "tool_used"]
            .iter()
            .filter_map(|key| self.field(key).and_then(Value::as_str))
            .find(|tag| !tag.is_empty())
    }

    /// Classify into a known shape.
    pub fn kind(&self) -> ResponseKind {
        kind::classify(self)
    }

    /// Pretty-printed JSON of the whole reply.
    pub fn pretty(&self) -> String {
        pretty(&self.0)
    }
}

pub(crate) fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// JavaScript truthiness: `null`, `false`, `0`, `NaN` and `""` are falsy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// String form of a JSON value as a browser would print it.
///
/// Integral floats drop their fraction (`4.0` → `4`), arrays join with
/// commas, objects fall back to compact JSON.
pub fn coerce(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if n.is_i64() || n.is_u64() {
                return n.to_string();
            }
            match n.as_f64() {
                Some(f) if f.is_finite() && f.fract() == 0.0 && f.abs() < 1e21 => {
                    format!("{f:.0}")
                }
                Some(f) => f.to_string(),
                None => n.to_string(),
            }
        }
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(coerce).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Like [`coerce`], but a missing or `null` value becomes [`NOT_AVAILABLE`].
pub fn display_or_na(value: Option<&Value>) -> String {
    match value {
        Some(v) if !v.is_null() => coerce(v),
        _ => NOT_AVAILABLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn field_treats_null_as_missing() {
        let resp = TaskResponse::new(json!({"a": null, "b": 1}));
        assert!(resp.field("a").is_none());
        assert_eq!(resp.field("b"), Some(&json!(1)));
        assert!(resp.field("c").is_none());
    }

    #[test]
    fn field_on_non_object_is_none() {
        let resp = TaskResponse::new(json!([1, 2, 3]));
        assert!(resp.field("tool").is_none());
        let resp = TaskResponse::new(json!("plain"));
        assert!(resp.field("tool").is_none());
    }

    #[test]
    fn nested_field_prefers_data() {
        let resp = TaskResponse::new(json!({"city": "Top", "data": {"city": "Nested"}}));
        assert_eq!(resp.nested_field("city"), Some(&json!("Nested")));
    }

    #[test]
    fn nested_field_falls_back_to_top_level() {
        let resp = TaskResponse::new(json!({"city": "Top", "data": {"temp_c": 3}}));
        assert_eq!(resp.nested_field("city"), Some(&json!("Top")));
        let resp = TaskResponse::new(json!({"city": "Top", "data": "not an object"}));
        assert_eq!(resp.nested_field("city"), Some(&json!("Top")));
    }

    #[test]
    fn tool_tag_falls_back_to_tool_used() {
        let resp = TaskResponse::new(json!({"tool_used": "calculator"}));
        assert_eq!(resp.tool_tag(), Some("calculator"));
        let resp = TaskResponse::new(json!({"tool": "", "tool_used": "todo"}));
        assert_eq!(resp.tool_tag(), Some("todo"));
        let resp = TaskResponse::new(json!({"tool": "weather", "tool_used": "todo"}));
        assert_eq!(resp.tool_tag(), Some("weather"));
    }

    #[test]
    fn tool_tag_ignores_non_strings() {
        let resp = TaskResponse::new(json!({"tool": 7}));
        assert!(resp.tool_tag().is_none());
    }

    #[test]
    fn truthiness() {
        assert!(!is_truthy(&json!(null)));
        assert!(!is_truthy(&json!(false)));
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!("")));
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(-1)));
        assert!(is_truthy(&json!("boom")));
        assert!(is_truthy(&json!([])));
        assert!(is_truthy(&json!({})));
    }

    #[test]
    fn coerce_numbers() {
        assert_eq!(coerce(&json!(4)), "4");
        assert_eq!(coerce(&json!(-12)), "-12");
        assert_eq!(coerce(&json!(4.0)), "4");
        assert_eq!(coerce(&json!(2.5)), "2.5");
    }

    #[test]
    fn coerce_other_scalars() {
        assert_eq!(coerce(&json!("x")), "x");
        assert_eq!(coerce(&json!(true)), "true");
        assert_eq!(coerce(&json!(null)), "");
    }

    #[test]
    fn coerce_collections() {
        assert_eq!(coerce(&json!([1, "a", null])), "1,a,");
        assert_eq!(coerce(&json!({"k": 1})), r#"{"k":1}"#);
    }

    #[test]
    fn display_or_na_placeholder() {
        assert_eq!(display_or_na(None), NOT_AVAILABLE);
        assert_eq!(display_or_na(Some(&json!(null))), NOT_AVAILABLE);
        assert_eq!(display_or_na(Some(&json!(0))), "0");
    }

    #[test]
    fn pretty_keeps_server_key_order() {
        let value: Value = serde_json::from_str(r#"{"zeta": 1, "alpha": 2}"#).unwrap();
        let text = TaskResponse::new(value).pretty();
        assert!(text.find("zeta").unwrap() < text.find("alpha").unwrap());
    }

    #[test]
    fn pretty_dump_contains_keys() {
        let resp = TaskResponse::new(json!({"foo": "bar"}));
        let text = resp.pretty();
        assert!(text.contains("\"foo\": \"bar\""));
    }
}
