//! The in-memory configuration mapping and its on-disk JSON form.
//!
//! Values are stored as [`serde_json::Value`], a tagged union over the JSON
//! data model (`Null`, `Bool`, `Number`, `String`, `Array`, `Object`).  Callers
//! that want typed access go through serde on the way in and out; callers that
//! want to inspect heterogeneous content can match on the variants directly.
//!
//! The workspace enables serde_json's `preserve_order` feature, so the mapping
//! iterates (and is written to disk) in insertion order.

use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use serde_json::{Map, Value};

/// Mapping from configuration key to stored JSON value.
pub type ConfigMap = Map<String, Value>;

/// Indentation width used when the options do not say otherwise.
pub const DEFAULT_INDENT: usize = 2;

/// Looks up `key`, treating a stored `null` the same as an absent key.
///
/// Use [`ConfigMap::get`] directly when explicit `null` must be told apart
/// from "never set".
pub fn lookup<'a>(map: &'a ConfigMap, key: &str) -> Option<&'a Value> {
    map.get(key).filter(|value| !value.is_null())
}

/// Parses the text of a configuration file.
///
/// Empty or whitespace-only text is an empty mapping.  Anything else must be
/// a single JSON object; valid JSON of another shape (an array, a bare
/// number) is rejected.
///
/// # Errors
///
/// Returns the [`serde_json::Error`] describing the first syntax or type error.
pub fn parse_document(text: &str) -> Result<ConfigMap, serde_json::Error> {
    if text.trim().is_empty() {
        return Ok(ConfigMap::new());
    }
    serde_json::from_str(text)
}

/// Renders `map` as pretty-printed JSON indented by `indent` spaces per level.
///
/// # Errors
///
/// Returns a [`serde_json::Error`] if serialization fails, which for a map of
/// `Value`s only happens on an I/O-level failure of the in-memory buffer.
pub fn render_document(map: &ConfigMap, indent: usize) -> Result<String, serde_json::Error> {
    let indent = " ".repeat(indent);
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(indent.as_bytes());
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    map.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(<serde_json::Error as serde::ser::Error>::custom)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map_of(value: Value) -> ConfigMap {
        match value {
            Value::Object(map) => map,
            other => panic!("expected object, got {other}"),
        }
    }

    #[test]
    fn test_lookup_returns_stored_value() {
        let map = map_of(json!({ "theme": "dark" }));
        assert_eq!(lookup(&map, "theme"), Some(&json!("dark")));
    }

    #[test]
    fn test_lookup_treats_null_as_absent() {
        // Arrange
        let map = map_of(json!({ "proxy": null }));

        // Act / Assert
        assert!(map.contains_key("proxy"));
        assert_eq!(lookup(&map, "proxy"), None);
    }

    #[test]
    fn test_lookup_missing_key_is_none() {
        let map = ConfigMap::new();
        assert_eq!(lookup(&map, "missing"), None);
    }

    #[test]
    fn test_parse_empty_text_is_empty_map() {
        assert!(parse_document("").unwrap().is_empty());
        assert!(parse_document("  \n\t").unwrap().is_empty());
    }

    #[test]
    fn test_parse_object_keeps_nested_values() {
        let map = parse_document(r#"{"window": {"w": 800, "h": 600}, "recent": ["a", "b"]}"#)
            .expect("valid document");
        assert_eq!(map["window"]["w"], json!(800));
        assert_eq!(map["recent"], json!(["a", "b"]));
    }

    #[test]
    fn test_parse_rejects_invalid_json() {
        assert!(parse_document("{ not json").is_err());
    }

    #[test]
    fn test_parse_rejects_non_object_root() {
        assert!(parse_document("[1, 2, 3]").is_err());
        assert!(parse_document("42").is_err());
    }

    #[test]
    fn test_render_empty_map_is_braces() {
        assert_eq!(render_document(&ConfigMap::new(), DEFAULT_INDENT).unwrap(), "{}");
    }

    #[test]
    fn test_render_uses_two_space_indentation() {
        // Arrange
        let map = map_of(json!({ "a": 1, "b": { "c": true } }));

        // Act
        let text = render_document(&map, DEFAULT_INDENT).unwrap();

        // Assert
        assert_eq!(text, "{\n  \"a\": 1,\n  \"b\": {\n    \"c\": true\n  }\n}");
    }

    #[test]
    fn test_render_honours_custom_indent() {
        let map = map_of(json!({ "a": 1 }));
        let text = render_document(&map, 4).unwrap();
        assert_eq!(text, "{\n    \"a\": 1\n}");
    }

    #[test]
    fn test_render_keeps_insertion_order() {
        // Arrange: insert keys in non-alphabetical order
        let mut map = ConfigMap::new();
        map.insert("zeta".into(), json!(1));
        map.insert("alpha".into(), json!(2));

        // Act
        let text = render_document(&map, DEFAULT_INDENT).unwrap();

        // Assert
        let zeta = text.find("zeta").unwrap();
        let alpha = text.find("alpha").unwrap();
        assert!(zeta < alpha, "insertion order must survive rendering: {text}");
    }

    #[test]
    fn test_render_then_parse_reproduces_map() {
        let map = map_of(json!({
            "flag": false,
            "ratio": 0.25,
            "name": "café",
            "list": [1, "two", null],
            "nested": { "deep": { "x": -3 } }
        }));
        let restored = parse_document(&render_document(&map, DEFAULT_INDENT).unwrap()).unwrap();
        assert_eq!(restored, map);
    }
}
