//! Minimal JSON object builder.
//!
//! # Responsibilities
//! - Collect key/value members in insertion order
//! - Serialize to compact JSON text with RFC 8259 string escaping
//!
//! # Design Decisions
//! - Only objects are built at the top level; handlers never return arrays
//! - Re-inserting a key replaces the value in place, keeping its position
//! - Serialization writes into a single growing `String`

use std::fmt::Write as _;

/// A JSON value that can appear as an object member.
#[derive(Debug, Clone, PartialEq)]
pub enum JsonValue {
    Null,
    Bool(bool),
    Int(i64),
    String(String),
    Object(JsonObject),
}

impl From<bool> for JsonValue {
    fn from(v: bool) -> Self {
        JsonValue::Bool(v)
    }
}

impl From<i64> for JsonValue {
    fn from(v: i64) -> Self {
        JsonValue::Int(v)
    }
}

impl From<u16> for JsonValue {
    fn from(v: u16) -> Self {
        JsonValue::Int(i64::from(v))
    }
}

impl From<&str> for JsonValue {
    fn from(v: &str) -> Self {
        JsonValue::String(v.to_string())
    }
}

impl From<String> for JsonValue {
    fn from(v: String) -> Self {
        JsonValue::String(v)
    }
}

impl From<JsonObject> for JsonValue {
    fn from(v: JsonObject) -> Self {
        JsonValue::Object(v)
    }
}

impl<T: Into<JsonValue>> From<Option<T>> for JsonValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(JsonValue::Null)
    }
}

/// An ordered JSON object.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonObject {
    members: Vec<(String, JsonValue)>,
}

impl JsonObject {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<JsonValue>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert a member. An existing key keeps its position and gets the new value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        let key = key.into();
        let value = value.into();
        match self.members.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.members.push((key, value)),
        }
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Serialize to compact JSON text.
    pub fn to_json(&self) -> String {
        let mut out = String::with_capacity(64);
        self.write_into(&mut out);
        out
    }

    fn write_into(&self, out: &mut String) {
        out.push('{');
        for (i, (key, value)) in self.members.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            write_string(out, key);
            out.push(':');
            write_value(out, value);
        }
        out.push('}');
    }
}

impl std::fmt::Display for JsonObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_json())
    }
}

fn write_value(out: &mut String, value: &JsonValue) {
    match value {
        JsonValue::Null => out.push_str("null"),
        JsonValue::Bool(true) => out.push_str("true"),
        JsonValue::Bool(false) => out.push_str("false"),
        JsonValue::Int(n) => {
            let _ = write!(out, "{}", n);
        }
        JsonValue::String(s) => write_string(out, s),
        JsonValue::Object(obj) => obj.write_into(out),
    }
}

fn write_string(out: &mut String, s: &str) {
    out.reserve(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0c}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object() {
        assert_eq!(JsonObject::new().to_json(), "{}");
    }

    #[test]
    fn members_keep_insertion_order() {
        let obj = JsonObject::new()
            .with("z", 1i64)
            .with("a", true)
            .with("m", "text")
            .with("n", JsonValue::Null);
        assert_eq!(obj.to_json(), r#"{"z":1,"a":true,"m":"text","n":null}"#);
    }

    #[test]
    fn insert_replaces_existing_key_in_place() {
        let mut obj = JsonObject::new().with("a", 1i64).with("b", 2i64);
        obj.insert("a", "one");
        assert_eq!(obj.len(), 2);
        assert_eq!(obj.to_json(), r#"{"a":"one","b":2}"#);
    }

    #[test]
    fn optional_values_become_null() {
        let missing: Option<&str> = None;
        let obj = JsonObject::new().with("env", missing).with("port", Some(8080u16));
        assert_eq!(obj.to_json(), r#"{"env":null,"port":8080}"#);
    }

    #[test]
    fn nested_objects() {
        let inner = JsonObject::new().with("k", -5i64);
        let obj = JsonObject::new().with("inner", inner).with("after", false);
        assert_eq!(obj.to_json(), r#"{"inner":{"k":-5},"after":false}"#);
    }

    #[test]
    fn strings_are_escaped() {
        let obj = JsonObject::new().with("s", "a\"b\\c\nd\te\u{01}f\u{0c}");
        assert_eq!(obj.to_json(), r#"{"s":"a\"b\\c\nd\te\u0001f\f"}"#);

        let parsed: serde_json::Value = serde_json::from_str(&obj.to_json()).unwrap();
        assert_eq!(parsed["s"], "a\"b\\c\nd\te\u{01}f\u{0c}");
    }

    #[test]
    fn keys_are_escaped_and_unicode_passes_through() {
        let obj = JsonObject::new().with("qu\"ote", "héllo ✓");
        let parsed: serde_json::Value = serde_json::from_str(&obj.to_json()).unwrap();
        assert_eq!(parsed["qu\"ote"], "héllo ✓");
    }
}
