//! Caller-supplied per-tag decode hints.

use serde_json::{Map, Value};

use super::types::LogicalType;

/// Recursive per-tag hint mapping parsed from a JSON document.
///
/// Two key shapes are recognized: `"<tag>"` holds either a type-name string
/// or a sub-mapping (which marks the field as a nested message), and
/// `"<tag>options"` holds the hint mapping used when recursing into that
/// message.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    map: Map<String, Value>,
}

impl Options {
    /// Parses a JSON options document; `None` when it is not a JSON object.
    pub fn from_slice(raw: &[u8]) -> Option<Options> {
        let map = serde_json::from_slice(raw).ok()?;
        Some(Options { map })
    }

    pub fn from_map(map: Map<String, Value>) -> Options {
        Options { map }
    }

    /// Hint for `tag`: a sub-mapping marks a message, a recognized type-name
    /// string maps through the name table, anything else is no hint.
    pub fn type_by_tag(&self, tag: u64) -> Option<LogicalType> {
        match self.map.get(&tag.to_string())? {
            Value::Object(_) => Some(LogicalType::Message),
            Value::String(name) => LogicalType::from_name(name),
            _ => None,
        }
    }

    /// Nested hints for recursing into the message under `tag`.
    ///
    /// `"<tag>options"` takes precedence; otherwise the sub-mapping stored
    /// directly under `"<tag>"` is used.
    pub fn options_by_tag(&self, tag: u64) -> Option<Options> {
        if let Some(Value::Object(map)) = self.map.get(&format!("{tag}options")) {
            return Some(Options { map: map.clone() });
        }
        match self.map.get(&tag.to_string()) {
            Some(Value::Object(map)) => Some(Options { map: map.clone() }),
            _ => None,
        }
    }
}
