//! Lenient extraction of a JSON object from model output

use serde_json::{Map, Value};
use tracing::debug;

/// Find the JSON object in `text`
///
/// Accepts the whole text as an object, or failing that the span from the
/// first `{` to the last `}` (models like to wrap JSON in prose or code
/// fences). Anything that is not an object yields `None`.
pub(crate) fn parse_json_object(text: &str) -> Option<Map<String, Value>> {
    let trimmed = text.trim();
    if let Some(obj) = as_object(trimmed) {
        return Some(obj);
    }

    let start = trimmed.find('{')?;
    let end = trimmed.rfind('}')?;
    if end <= start {
        return None;
    }
    debug!(start, end, "parse_json_object: retrying on embedded object");
    as_object(&trimmed[start..=end])
}

fn as_object(text: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(text).ok()? {
        Value::Object(map) => Some(map),
        _ => None,
    }
}

/// String value of `key`, `None` if missing or not a string
pub(crate) fn string_field<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        let obj = parse_json_object(r#"{"intent":"cancel","reason":"x"}"#).unwrap();
        assert_eq!(string_field(&obj, "intent"), Some("cancel"));
    }

    #[test]
    fn test_code_fenced_object() {
        let text = "```json\n{\"intent\": \"replace\"}\n```";
        let obj = parse_json_object(text).unwrap();
        assert_eq!(string_field(&obj, "intent"), Some("replace"));
    }

    #[test]
    fn test_object_inside_prose() {
        let text = "Sure! Here is my answer: {\"next_action\": \"finish\"} Hope that helps.";
        let obj = parse_json_object(text).unwrap();
        assert_eq!(string_field(&obj, "next_action"), Some("finish"));
    }

    #[test]
    fn test_rejects_non_json() {
        assert!(parse_json_object("I think the user wants to cancel.").is_none());
        assert!(parse_json_object("").is_none());
        assert!(parse_json_object("} backwards {").is_none());
        assert!(parse_json_object("{not json}").is_none());
    }

    #[test]
    fn test_rejects_non_object_json() {
        assert!(parse_json_object(r#"["cancel"]"#).is_none());
        assert!(parse_json_object(r#""cancel""#).is_none());
        assert!(parse_json_object("42").is_none());
    }

    #[test]
    fn test_string_field_ignores_non_strings() {
        let obj = parse_json_object(r#"{"intent": 3, "reason": null}"#).unwrap();
        assert_eq!(string_field(&obj, "intent"), None);
        assert_eq!(string_field(&obj, "reason"), None);
        assert_eq!(string_field(&obj, "missing"), None);
    }
}
