//! PB wire stream decoder.

use wirescope_buffers::Reader;

use crate::{TagMap, WireValue};

use super::constants::{
    CARRIAGE_RETURN, DEFAULT_MAX_DEPTH, DELETE_CHAR, HORIZONTAL_TAB, LINE_FEED, MAX_CTRL_CHAR,
    MAX_TAG_VALUE, MAX_VARINT_LEN,
};
use super::error::PbDecodeError;
use super::options::Options;
use super::types::{FieldMeta, LogicalType, PackedType, WireType};

/// Schema-less PB decoder.
///
/// Walks a raw PB byte stream into a [`TagMap`], consulting per-tag hints
/// and recursing into nested messages up to `max_depth` levels.
#[derive(Debug, Clone)]
pub struct PbDecoder {
    /// Recursion cap for nested messages and auto-detect probes.
    pub max_depth: usize,
}

impl Default for PbDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl PbDecoder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Decodes `raw` into its JSON rendering.
    pub fn decode(&self, raw: &[u8], opts: Option<&Options>) -> Result<String, PbDecodeError> {
        let result = self.decode_value(raw, opts)?;
        Ok(serde_json::to_string(&result)?)
    }

    /// Decodes `raw` and returns the accumulator itself, fix-up pass applied.
    pub fn decode_value(
        &self,
        raw: &[u8],
        opts: Option<&Options>,
    ) -> Result<TagMap, PbDecodeError> {
        let mut result = self.decode_message(raw, opts, 0)?;
        result.fix_tag_type_names();
        Ok(result)
    }

    fn decode_message(
        &self,
        raw: &[u8],
        opts: Option<&Options>,
        depth: usize,
    ) -> Result<TagMap, PbDecodeError> {
        if depth > self.max_depth {
            return Err(PbDecodeError::DepthExceeded);
        }
        let mut result = TagMap::new();
        let mut r = Reader::new(raw);
        while r.size() > 0 {
            let meta = read_tag_header(&mut r)?;
            match meta.wire_type {
                WireType::Varint => read_varint_field(&mut r, meta.tag, opts, &mut result)?,
                WireType::Fixed32 => read_fixed32_field(&mut r, meta.tag, opts, &mut result)?,
                WireType::Fixed64 => read_fixed64_field(&mut r, meta.tag, opts, &mut result)?,
                WireType::Bytes => {
                    let length = read_varint(&mut r)?;
                    let length =
                        usize::try_from(length).map_err(|_| PbDecodeError::InvalidData)?;
                    let data = r.buf(length).ok_or(PbDecodeError::InvalidData)?;
                    self.read_bytes_field(data, meta.tag, opts, &mut result, depth)?;
                }
                WireType::StartGroup | WireType::EndGroup => {
                    return Err(PbDecodeError::GroupDeprecated)
                }
            }
        }
        Ok(result)
    }

    /// Length-delimited payload. Explicit hints win; otherwise probe for a
    /// nested message and fall back to the text heuristic.
    ///
    /// The probe runs with the options in scope for the enclosing message,
    /// not a per-tag sub-mapping, so hints meant for an inner message only
    /// apply once the outer field is explicitly typed.
    fn read_bytes_field(
        &self,
        data: &[u8],
        tag: u64,
        opts: Option<&Options>,
        result: &mut TagMap,
        depth: usize,
    ) -> Result<(), PbDecodeError> {
        let hint = opts.and_then(|o| o.type_by_tag(tag));
        match hint {
            Some(LogicalType::Bytes) => {
                result.append(
                    LogicalType::Bytes.key(tag),
                    WireValue::Str(hex::encode(data)),
                );
            }
            Some(LogicalType::String) => {
                result.append(LogicalType::String.key(tag), text_value(data));
            }
            Some(LogicalType::Message) => {
                let nested_opts = opts.and_then(|o| o.options_by_tag(tag));
                let nested = self.decode_message(data, nested_opts.as_ref(), depth + 1)?;
                result.append(LogicalType::Message.key(tag), WireValue::Object(nested));
            }
            Some(LogicalType::Packed(base)) => read_packed(data, tag, base, result)?,
            _ => match self.decode_message(data, opts, depth + 1) {
                Ok(nested) => {
                    result.append(LogicalType::Message.key(tag), WireValue::Object(nested));
                }
                Err(_) if is_text(data) => {
                    result.append(LogicalType::String.key(tag), text_value(data));
                }
                Err(_) => {
                    result.append(
                        LogicalType::Bytes.key(tag),
                        WireValue::Str(hex::encode(data)),
                    );
                }
            },
        }
        Ok(())
    }
}

/// Decodes `raw` with a default-configured [`PbDecoder`].
pub fn decode(raw: &[u8], opts: Option<&Options>) -> Result<String, PbDecodeError> {
    PbDecoder::new().decode(raw, opts)
}

/// Decodes `raw` into a [`TagMap`] with a default-configured [`PbDecoder`].
pub fn decode_value(raw: &[u8], opts: Option<&Options>) -> Result<TagMap, PbDecodeError> {
    PbDecoder::new().decode_value(raw, opts)
}

fn read_tag_header(r: &mut Reader) -> Result<FieldMeta, PbDecodeError> {
    let key = read_varint(r)?;
    let tag = key >> 3;
    if tag == 0 {
        return Err(PbDecodeError::InvalidData);
    }
    if tag > MAX_TAG_VALUE {
        return Err(PbDecodeError::TagTooBig);
    }
    let wire_type = WireType::from_low3(key & 0x7).ok_or(PbDecodeError::UnknownType)?;
    Ok(FieldMeta { tag, wire_type })
}

fn read_varint(r: &mut Reader) -> Result<u64, PbDecodeError> {
    let mut value: u64 = 0;
    for i in 0..MAX_VARINT_LEN {
        let byte = r.u8().ok_or(PbDecodeError::InvalidData)?;
        value |= u64::from(byte & 0x7f) << (7 * i);
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(PbDecodeError::InvalidData)
}

/// Inverse of the ZigZag mapping: keeps small magnitudes small.
fn decode_zigzag(value: u64) -> i64 {
    ((value >> 1) as i64) ^ -((value & 1) as i64)
}

fn read_varint_field(
    r: &mut Reader,
    tag: u64,
    opts: Option<&Options>,
    result: &mut TagMap,
) -> Result<(), PbDecodeError> {
    let value = read_varint(r)?;
    match opts.and_then(|o| o.type_by_tag(tag)) {
        Some(LogicalType::Int32) => result.append(
            LogicalType::Int32.key(tag),
            WireValue::Int(i64::from(value as u32 as i32)),
        ),
        Some(LogicalType::Int64) => {
            result.append(LogicalType::Int64.key(tag), WireValue::Int(value as i64))
        }
        Some(LogicalType::UInt) => {
            result.append(LogicalType::UInt.key(tag), WireValue::UInt(value))
        }
        Some(LogicalType::SInt) => result.append(
            LogicalType::SInt.key(tag),
            WireValue::Int(decode_zigzag(value)),
        ),
        Some(LogicalType::Bool) => {
            result.append(LogicalType::Bool.key(tag), WireValue::Bool(value != 0))
        }
        _ => result.append(LogicalType::Varint.key(tag), WireValue::UInt(value)),
    }
    Ok(())
}

fn read_fixed32_field(
    r: &mut Reader,
    tag: u64,
    opts: Option<&Options>,
    result: &mut TagMap,
) -> Result<(), PbDecodeError> {
    let value = r.u32_le().ok_or(PbDecodeError::InvalidData)?;
    match opts.and_then(|o| o.type_by_tag(tag)) {
        Some(LogicalType::SFixed32) => result.append(
            LogicalType::SFixed32.key(tag),
            WireValue::Int(i64::from(value as i32)),
        ),
        Some(LogicalType::Fixed32) => result.append(
            LogicalType::Fixed32.key(tag),
            WireValue::UInt(u64::from(value)),
        ),
        _ => result.append(
            LogicalType::Float.key(tag),
            WireValue::F32(f32::from_bits(value)),
        ),
    }
    Ok(())
}

fn read_fixed64_field(
    r: &mut Reader,
    tag: u64,
    opts: Option<&Options>,
    result: &mut TagMap,
) -> Result<(), PbDecodeError> {
    let value = r.u64_le().ok_or(PbDecodeError::InvalidData)?;
    match opts.and_then(|o| o.type_by_tag(tag)) {
        // decimal strings: a double-based JSON reader cannot hold them exactly
        Some(LogicalType::SFixed64) => result.append(
            LogicalType::SFixed64.key(tag),
            WireValue::Str((value as i64).to_string()),
        ),
        Some(LogicalType::Fixed64) => result.append(
            LogicalType::Fixed64.key(tag),
            WireValue::Str(value.to_string()),
        ),
        _ => result.append(
            LogicalType::Double.key(tag),
            WireValue::F64(f64::from_bits(value)),
        ),
    }
    Ok(())
}

/// Packed repeated payload: one element after another until exhausted, all
/// appended as array items so the key needs no rename afterwards.
fn read_packed(
    data: &[u8],
    tag: u64,
    base: PackedType,
    result: &mut TagMap,
) -> Result<(), PbDecodeError> {
    let key = LogicalType::Packed(base).key(tag);
    let mut r = Reader::new(data);
    while r.size() > 0 {
        let value = match base {
            PackedType::Int32 => {
                WireValue::Int(i64::from(read_varint(&mut r)? as u32 as i32))
            }
            PackedType::Int64 => WireValue::Int(read_varint(&mut r)? as i64),
            PackedType::UInt => WireValue::UInt(read_varint(&mut r)?),
            PackedType::SInt => WireValue::Int(decode_zigzag(read_varint(&mut r)?)),
            PackedType::Bool => WireValue::Bool(read_varint(&mut r)? != 0),
            PackedType::Fixed32 => {
                let v = r.u32_le().ok_or(PbDecodeError::InvalidData)?;
                WireValue::UInt(u64::from(v))
            }
            PackedType::Float => {
                let v = r.u32_le().ok_or(PbDecodeError::InvalidData)?;
                WireValue::F32(f32::from_bits(v))
            }
            PackedType::SFixed32 => {
                let v = r.u32_le().ok_or(PbDecodeError::InvalidData)?;
                WireValue::Int(i64::from(v as i32))
            }
            PackedType::Fixed64 => {
                let v = r.u64_le().ok_or(PbDecodeError::InvalidData)?;
                WireValue::Str(v.to_string())
            }
            PackedType::Double => {
                let v = r.u64_le().ok_or(PbDecodeError::InvalidData)?;
                WireValue::F64(f64::from_bits(v))
            }
            PackedType::SFixed64 => {
                let v = r.u64_le().ok_or(PbDecodeError::InvalidData)?;
                WireValue::Str((v as i64).to_string())
            }
        };
        result.append_array_item(key.clone(), value);
    }
    Ok(())
}

/// Text heuristic for unhinted length-delimited payloads: HT, LF and CR are
/// text; DEL and any other byte at or below 0x1f are not.
fn is_text(data: &[u8]) -> bool {
    for &c in data {
        match c {
            HORIZONTAL_TAB | LINE_FEED | CARRIAGE_RETURN => {}
            DELETE_CHAR => return false,
            c if c <= MAX_CTRL_CHAR => return false,
            _ => {}
        }
    }
    true
}

fn text_value(data: &[u8]) -> WireValue {
    WireValue::Str(String::from_utf8_lossy(data).into_owned())
}
