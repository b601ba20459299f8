//! Ordered tag/type keyed accumulator for decode results.

use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::WireValue;

/// Ordered-insertion mapping from formatted `NNNN_typename` key to value.
///
/// The decoders cannot know up front whether a tag repeats, so values are
/// appended optimistically under singular keys; a collision promotes the
/// binding to an array in stream order, and [`TagMap::fix_tag_type_names`]
/// pluralizes the keys of array-valued bindings afterwards.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TagMap {
    entries: Vec<(String, WireValue)>,
}

impl TagMap {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Looks up a key at this level.
    pub fn get(&self, key: &str) -> Option<&WireValue> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    /// Iterates the bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &(String, WireValue)> {
        self.entries.iter()
    }

    /// Binds `key` to `value`. An occupied key extends its array, or promotes
    /// the previous scalar to `[previous, value]`.
    pub fn append(&mut self, key: String, value: WireValue) {
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => match existing {
                WireValue::Array(items) => items.push(value),
                _ => {
                    let previous = std::mem::replace(existing, WireValue::Null);
                    *existing = WireValue::Array(vec![previous, value]);
                }
            },
            None => self.entries.push((key, value)),
        }
    }

    /// Appends `value` to the array under `key`, binding `[value]` when the
    /// key is absent.
    pub fn append_array_item(&mut self, key: String, value: WireValue) {
        if self.get(&key).is_none() {
            self.entries.push((key, WireValue::Array(vec![value])));
            return;
        }
        self.append(key, value);
    }

    /// Renames every array-valued binding by suffixing `s`, recursing into
    /// nested objects. Keys already ending in `s` are left as they are, so
    /// running the pass twice is equivalent to running it once.
    pub fn fix_tag_type_names(&mut self) {
        for (key, value) in &mut self.entries {
            match value {
                WireValue::Object(inner) => inner.fix_tag_type_names(),
                WireValue::Array(_) => {
                    if !key.ends_with('s') {
                        key.push('s');
                    }
                }
                _ => {}
            }
        }
    }
}

impl Serialize for TagMap {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn append_binds_then_promotes() {
        let mut map = TagMap::new();
        map.append("0001_varint".into(), WireValue::UInt(1));
        assert_eq!(map.get("0001_varint"), Some(&WireValue::UInt(1)));

        map.append("0001_varint".into(), WireValue::UInt(2));
        map.append("0001_varint".into(), WireValue::UInt(3));
        assert_eq!(
            map.get("0001_varint"),
            Some(&WireValue::Array(vec![
                WireValue::UInt(1),
                WireValue::UInt(2),
                WireValue::UInt(3),
            ]))
        );
    }

    #[test]
    fn append_array_item_starts_as_array() {
        let mut map = TagMap::new();
        map.append_array_item("0002_packed.int32s".into(), WireValue::Int(7));
        assert_eq!(
            map.get("0002_packed.int32s"),
            Some(&WireValue::Array(vec![WireValue::Int(7)]))
        );

        map.append_array_item("0002_packed.int32s".into(), WireValue::Int(8));
        assert_eq!(
            map.get("0002_packed.int32s"),
            Some(&WireValue::Array(vec![
                WireValue::Int(7),
                WireValue::Int(8),
            ]))
        );
    }

    #[test]
    fn fix_renames_array_keys_only() {
        let mut map = TagMap::new();
        map.append("0001_varint".into(), WireValue::UInt(1));
        map.append("0001_varint".into(), WireValue::UInt(2));
        map.append("0002_string".into(), WireValue::Str("x".into()));
        map.fix_tag_type_names();

        assert!(map.get("0001_varint").is_none());
        assert!(matches!(
            map.get("0001_varints"),
            Some(WireValue::Array(_))
        ));
        assert_eq!(map.get("0002_string"), Some(&WireValue::Str("x".into())));
    }

    #[test]
    fn fix_recurses_into_objects() {
        let mut inner = TagMap::new();
        inner.append("0003_varint".into(), WireValue::UInt(1));
        inner.append("0003_varint".into(), WireValue::UInt(2));

        let mut map = TagMap::new();
        map.append("0001_message".into(), WireValue::Object(inner));
        map.fix_tag_type_names();

        let Some(WireValue::Object(inner)) = map.get("0001_message") else {
            panic!("nested object expected");
        };
        assert!(inner.get("0003_varints").is_some());
    }

    #[test]
    fn fix_does_not_descend_into_arrays() {
        let mut element = TagMap::new();
        element.append("0003_varint".into(), WireValue::UInt(1));
        element.append("0003_varint".into(), WireValue::UInt(2));

        let mut map = TagMap::new();
        map.append_array_item("0001_message".into(), WireValue::Object(element));
        map.fix_tag_type_names();

        let Some(WireValue::Array(items)) = map.get("0001_messages") else {
            panic!("array expected");
        };
        let WireValue::Object(element) = &items[0] else {
            panic!("object element expected");
        };
        assert!(element.get("0003_varint").is_some());
    }

    #[test]
    fn fix_is_idempotent() {
        let mut map = TagMap::new();
        map.append("0001_varint".into(), WireValue::UInt(1));
        map.append("0001_varint".into(), WireValue::UInt(2));
        map.append_array_item("0002_packed.int32s".into(), WireValue::Int(3));

        map.fix_tag_type_names();
        let once = map.clone();
        map.fix_tag_type_names();
        assert_eq!(map, once);
        assert!(map.get("0002_packed.int32s").is_some());
    }

    #[test]
    fn serializes_in_insertion_order() {
        let mut map = TagMap::new();
        map.append("0002_string".into(), WireValue::Str("b".into()));
        map.append("0001_varint".into(), WireValue::UInt(1));
        assert_eq!(
            serde_json::to_string(&map).unwrap(),
            r#"{"0002_string":"b","0001_varint":1}"#
        );
    }
}
