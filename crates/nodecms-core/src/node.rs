//! Content node helpers.
//!
//! A content node is a plain JSON value: an object with a string `type` tag
//! and an `attributes` map. Children live in `attributes.content`, with a
//! top-level `children` array accepted as a fallback.

use serde_json::{Map, Value};

/// A content node. Any JSON value can be handed to the renderer; only objects
/// with a string `type` are dispatched to a component.
pub type Node = Value;

/// Build a node from a type tag and an attributes value.
///
/// Non-object attributes are replaced by an empty map.
pub fn node(node_type: impl Into<String>, attributes: Value) -> Node {
    let attributes = match attributes {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    let mut map = Map::new();
    map.insert("type".to_string(), Value::String(node_type.into()));
    map.insert("attributes".to_string(), attributes);
    Value::Object(map)
}

/// Read-only accessors for content nodes.
pub trait NodeExt {
    /// The `type` tag, if present and a string.
    fn node_type(&self) -> Option<&str>;

    /// The `attributes` map, if present.
    fn attributes(&self) -> Option<&Map<String, Value>>;

    /// A single attribute value. `null` counts as absent.
    fn attr(&self, name: &str) -> Option<&Value>;

    /// A string attribute.
    fn attr_str(&self, name: &str) -> Option<&str> {
        self.attr(name).and_then(Value::as_str)
    }

    /// A boolean attribute, `false` when absent or not a boolean.
    fn attr_bool(&self, name: &str) -> bool {
        self.attr(name).and_then(Value::as_bool).unwrap_or(false)
    }

    /// A string or number attribute formatted as text.
    fn attr_text(&self, name: &str) -> Option<String> {
        match self.attr(name)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Bool(b) => Some(b.to_string()),
            _ => None,
        }
    }

    /// Child content: `attributes.content`, falling back to a top-level
    /// `children` array.
    fn children(&self) -> Option<&Value>;

    /// Name of the JSON kind, used in diagnostics.
    fn kind_name(&self) -> &'static str;
}

impl NodeExt for Value {
    fn node_type(&self) -> Option<&str> {
        self.get("type").and_then(Value::as_str)
    }

    fn attributes(&self) -> Option<&Map<String, Value>> {
        self.get("attributes").and_then(Value::as_object)
    }

    fn attr(&self, name: &str) -> Option<&Value> {
        self.attributes()
            .and_then(|attrs| attrs.get(name))
            .filter(|v| !v.is_null())
    }

    fn children(&self) -> Option<&Value> {
        self.attr("content")
            .or_else(|| self.get("children").filter(|v| v.is_array()))
    }

    fn kind_name(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
        }
    }
}
