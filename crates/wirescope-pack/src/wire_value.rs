//! Decoded value model shared by the PB and JCE decoders.

use serde::ser::{Serialize, Serializer};

use crate::TagMap;

/// A single decoded value.
///
/// Composite fields decode to [`TagMap`] objects; repeated fields collect
/// into `Array`. 32-bit floats keep their own variant so they serialize at
/// single precision instead of being widened to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    Null,
    Bool(bool),
    Int(i64),
    UInt(u64),
    F32(f32),
    F64(f64),
    Str(String),
    Array(Vec<WireValue>),
    Object(TagMap),
}

impl Serialize for WireValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            WireValue::Null => serializer.serialize_unit(),
            WireValue::Bool(v) => serializer.serialize_bool(*v),
            WireValue::Int(v) => serializer.serialize_i64(*v),
            WireValue::UInt(v) => serializer.serialize_u64(*v),
            WireValue::F32(v) => serializer.serialize_f32(*v),
            WireValue::F64(v) => serializer.serialize_f64(*v),
            WireValue::Str(v) => serializer.serialize_str(v),
            WireValue::Array(items) => items.serialize(serializer),
            WireValue::Object(map) => map.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_json(value: &WireValue) -> String {
        serde_json::to_string(value).unwrap()
    }

    #[test]
    fn serializes_scalars() {
        assert_eq!(to_json(&WireValue::Null), "null");
        assert_eq!(to_json(&WireValue::Bool(true)), "true");
        assert_eq!(to_json(&WireValue::Int(-42)), "-42");
        assert_eq!(to_json(&WireValue::UInt(u64::MAX)), "18446744073709551615");
        assert_eq!(to_json(&WireValue::Str("abc".into())), "\"abc\"");
    }

    #[test]
    fn serializes_f32_at_single_precision() {
        let value = WireValue::F32(f32::from_bits(0x4048_f5c3));
        assert_eq!(to_json(&value), "3.14");
    }

    #[test]
    fn serializes_arrays_in_order() {
        let value = WireValue::Array(vec![
            WireValue::Int(1),
            WireValue::Str("x".into()),
            WireValue::Null,
        ]);
        assert_eq!(to_json(&value), "[1,\"x\",null]");
    }
}
