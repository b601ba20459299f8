//! Schema-less wire-format decoders producing self-describing JSON.
//!
//! Two binary formats are supported: the Protocol Buffers wire format
//! (with optional caller-supplied per-tag type hints) and the JCE
//! (Tars-family) encoding, which carries its types on the wire. Both decode
//! into the shared [`TagMap`] accumulator, whose keys have the form
//! `NNNN_typename`: the zero-padded field tag plus the type interpretation
//! used to render the value.

mod tag_map;
mod wire_value;

pub mod codecs;
pub mod jce;
pub mod pb;

pub use codecs::{CodecError, Codecs, WireCodec};
pub use tag_map::TagMap;
pub use wire_value::WireValue;

#[cfg(test)]
mod tests {
    use super::{jce, pb};
    use serde_json::{json, Value};

    fn parse(js: &str) -> Value {
        serde_json::from_str(js).expect("decode output is valid JSON")
    }

    #[test]
    fn pb_decode_smoke() {
        let js = pb::decode(&[0x08, 0x96, 0x01], None).unwrap();
        assert_eq!(parse(&js), json!({"0001_varint": 150}));
    }

    #[test]
    fn jce_decode_smoke() {
        let js = jce::decode(&[0x02, 0x00, 0x00, 0x00, 0x07]).unwrap();
        assert_eq!(parse(&js), json!({"0000_int": 7}));
    }

    #[test]
    fn empty_input_decodes_to_empty_object() {
        assert_eq!(pb::decode(&[], None).unwrap(), "{}");
        assert_eq!(jce::decode(&[]).unwrap(), "{}");
    }
}
