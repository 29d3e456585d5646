//! Extracted attribute values
//!
//! [`AttributeValue`] is the closed set of shapes an attribute path can
//! resolve to. The equality engine dispatches on it exhaustively.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A value resolved from an instance record by an attribute path
///
/// Serialized untagged, so a report carries `"t2.micro"`, `true`, `100`,
/// `["sg-a"]` or `{"Name": "web"}` rather than a wrapper object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Bool(bool),
    Int(i64),
    String(String),
    StringList(Vec<String>),
    StringMap(BTreeMap<String, String>),
    /// Opaque nested structure (the whole root volume sub-record)
    Structural(serde_json::Value),
}

impl AttributeValue {
    /// Short name of the variant, used in debug logs
    pub fn kind_name(&self) -> &'static str {
        match self {
            AttributeValue::Bool(_) => "bool",
            AttributeValue::Int(_) => "int",
            AttributeValue::String(_) => "string",
            AttributeValue::StringList(_) => "string_list",
            AttributeValue::StringMap(_) => "string_map",
            AttributeValue::Structural(_) => "structural",
        }
    }
}

impl fmt::Display for AttributeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeValue::Bool(b) => write!(f, "{}", b),
            AttributeValue::Int(n) => write!(f, "{}", n),
            AttributeValue::String(s) if s.is_empty() => f.write_str("(empty)"),
            AttributeValue::String(s) => f.write_str(s),
            AttributeValue::StringList(items) => write!(f, "[{}]", items.join(", ")),
            AttributeValue::StringMap(map) => {
                let pairs: Vec<String> = map.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
                write!(f, "{{{}}}", pairs.join(", "))
            }
            AttributeValue::Structural(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for AttributeValue {
    fn from(s: &str) -> Self {
        AttributeValue::String(s.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(s: String) -> Self {
        AttributeValue::String(s)
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<i64> for AttributeValue {
    fn from(n: i64) -> Self {
        AttributeValue::Int(n)
    }
}

impl From<Vec<String>> for AttributeValue {
    fn from(items: Vec<String>) -> Self {
        AttributeValue::StringList(items)
    }
}

impl From<BTreeMap<String, String>> for AttributeValue {
    fn from(map: BTreeMap<String, String>) -> Self {
        AttributeValue::StringMap(map)
    }
}
