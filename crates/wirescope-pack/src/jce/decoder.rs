//! JCE wire stream decoder.

use wirescope_buffers::Reader;

use crate::{TagMap, WireValue};

use super::constants::{DEFAULT_MAX_DEPTH, EXTENDED_TAG};
use super::error::JceDecodeError;
use super::types::{FieldMeta, JceType};

/// JCE decoder.
///
/// Consumes self-describing tag/type elements into a [`TagMap`], recursing
/// into structs, maps and lists up to `max_depth` levels. JCE keys carry
/// their wire type directly, so no fix-up pass runs on the result.
#[derive(Debug, Clone)]
pub struct JceDecoder {
    /// Recursion cap for nested composites.
    pub max_depth: usize,
}

impl Default for JceDecoder {
    fn default() -> Self {
        Self::new()
    }
}

impl JceDecoder {
    pub fn new() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Decodes `raw` into its JSON rendering.
    pub fn decode(&self, raw: &[u8]) -> Result<String, JceDecodeError> {
        let result = self.decode_value(raw)?;
        Ok(serde_json::to_string(&result)?)
    }

    /// Decodes `raw` and returns the accumulator itself.
    ///
    /// The top level consumes elements until the stream is exhausted or a
    /// `StructEnd` closes it; bytes trailing a top-level `StructEnd` are
    /// invalid.
    pub fn decode_value(&self, raw: &[u8]) -> Result<TagMap, JceDecodeError> {
        let mut r = Reader::new(raw);
        let mut result = TagMap::new();
        self.read_elements(&mut r, &mut result, 0)?;
        if r.size() > 0 {
            return Err(JceDecodeError::InvalidData);
        }
        Ok(result)
    }

    /// Reads elements until the stream is exhausted or a `StructEnd` closes
    /// the current level.
    fn read_elements(
        &self,
        r: &mut Reader,
        result: &mut TagMap,
        depth: usize,
    ) -> Result<(), JceDecodeError> {
        while r.size() > 0 {
            if self.read_element(r, result, depth)? {
                break;
            }
        }
        Ok(())
    }

    /// Decodes one element into `result`; `Ok(true)` when it was a
    /// `StructEnd`.
    fn read_element(
        &self,
        r: &mut Reader,
        result: &mut TagMap,
        depth: usize,
    ) -> Result<bool, JceDecodeError> {
        let meta = read_header(r)?;
        match meta.wire_type {
            JceType::Zero => result.append(JceType::Zero.key(meta.tag), WireValue::Int(0)),
            JceType::Char => read_char(r, meta.tag, result)?,
            JceType::Short => read_short(r, meta.tag, result)?,
            JceType::Int => read_int(r, meta.tag, result)?,
            JceType::Int64 => read_int64(r, meta.tag, result)?,
            JceType::Float => read_float(r, meta.tag, result)?,
            JceType::Double => read_double(r, meta.tag, result)?,
            JceType::String1 => read_string1(r, meta.tag, result)?,
            JceType::String4 => read_string4(r, meta.tag, result)?,
            JceType::Map => self.read_map(r, meta.tag, result, depth)?,
            JceType::List => self.read_list(r, meta.tag, result, depth)?,
            JceType::SimpleList => read_simple_list(r, meta.tag, result)?,
            JceType::StructBegin => self.read_struct(r, meta.tag, result, depth)?,
            JceType::StructEnd => return Ok(true),
            // synthetic codes, never produced by read_header
            JceType::EmptyMap | JceType::EmptyList | JceType::EmptySimpleList => {
                return Err(JceDecodeError::UnknownType)
            }
        }
        Ok(false)
    }

    /// Map keys allow scalars, strings and structs; `StructEnd` ends the key
    /// position without emitting anything.
    fn read_map_key(
        &self,
        r: &mut Reader,
        result: &mut TagMap,
        depth: usize,
    ) -> Result<(), JceDecodeError> {
        let meta = read_header(r)?;
        match meta.wire_type {
            JceType::Char => read_char(r, meta.tag, result),
            JceType::Short => read_short(r, meta.tag, result),
            JceType::Int => read_int(r, meta.tag, result),
            JceType::Int64 => read_int64(r, meta.tag, result),
            JceType::Float => read_float(r, meta.tag, result),
            JceType::Double => read_double(r, meta.tag, result),
            JceType::String1 => read_string1(r, meta.tag, result),
            JceType::String4 => read_string4(r, meta.tag, result),
            JceType::StructBegin => self.read_struct(r, meta.tag, result, depth),
            JceType::StructEnd => Ok(()),
            _ => Err(JceDecodeError::UnknownType),
        }
    }

    fn read_struct(
        &self,
        r: &mut Reader,
        tag: u64,
        result: &mut TagMap,
        depth: usize,
    ) -> Result<(), JceDecodeError> {
        if depth >= self.max_depth {
            return Err(JceDecodeError::DepthExceeded);
        }
        let mut nested = TagMap::new();
        self.read_elements(r, &mut nested, depth + 1)?;
        result.append(JceType::StructBegin.key(tag), WireValue::Object(nested));
        Ok(())
    }

    fn read_map(
        &self,
        r: &mut Reader,
        tag: u64,
        result: &mut TagMap,
        depth: usize,
    ) -> Result<(), JceDecodeError> {
        if depth >= self.max_depth {
            return Err(JceDecodeError::DepthExceeded);
        }
        let length = read_length(r)?;
        if length == 0 {
            result.append(JceType::EmptyMap.key(tag), WireValue::Null);
            return Ok(());
        }
        let key = JceType::Map.key(tag);
        for _ in 0..length {
            let mut entry = TagMap::new();
            self.read_map_key(r, &mut entry, depth + 1)?;
            self.read_element(r, &mut entry, depth + 1)?;
            result.append_array_item(key.clone(), WireValue::Object(entry));
        }
        Ok(())
    }

    fn read_list(
        &self,
        r: &mut Reader,
        tag: u64,
        result: &mut TagMap,
        depth: usize,
    ) -> Result<(), JceDecodeError> {
        if depth >= self.max_depth {
            return Err(JceDecodeError::DepthExceeded);
        }
        let length = read_length(r)?;
        if length == 0 {
            result.append(JceType::EmptyList.key(tag), WireValue::Null);
            return Ok(());
        }
        let key = JceType::List.key(tag);
        for _ in 0..length {
            let mut item = TagMap::new();
            self.read_element(r, &mut item, depth + 1)?;
            result.append_array_item(key.clone(), WireValue::Object(item));
        }
        Ok(())
    }
}

/// Decodes `raw` with a default-configured [`JceDecoder`].
pub fn decode(raw: &[u8]) -> Result<String, JceDecodeError> {
    JceDecoder::new().decode(raw)
}

/// Decodes `raw` into a [`TagMap`] with a default-configured [`JceDecoder`].
pub fn decode_value(raw: &[u8]) -> Result<TagMap, JceDecodeError> {
    JceDecoder::new().decode_value(raw)
}

/// Tag/type header: low nibble type, high nibble tag; tag nibble 15 means
/// the full 8-bit tag follows.
fn read_header(r: &mut Reader) -> Result<FieldMeta, JceDecodeError> {
    let first = r.u8().ok_or(JceDecodeError::InvalidData)?;
    let wire_type = JceType::from_wire(first & 0x0f).ok_or(JceDecodeError::UnknownType)?;
    let nibble = first >> 4;
    let tag = if nibble == EXTENDED_TAG {
        u64::from(r.u8().ok_or(JceDecodeError::InvalidData)?)
    } else {
        u64::from(nibble)
    };
    Ok(FieldMeta { tag, wire_type })
}

/// Length prefix of a map, list or simple list: a full header whose payload
/// must be one of the integer types.
fn read_length(r: &mut Reader) -> Result<usize, JceDecodeError> {
    let meta = read_header(r)?;
    let length = match meta.wire_type {
        JceType::Zero => 0,
        JceType::Char => usize::from(r.u8().ok_or(JceDecodeError::InvalidData)?),
        JceType::Short => usize::from(r.u16().ok_or(JceDecodeError::InvalidData)?),
        JceType::Int => r.u32().ok_or(JceDecodeError::InvalidData)? as usize,
        _ => return Err(JceDecodeError::UnknownType),
    };
    Ok(length)
}

fn read_char(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    let value = r.u8().ok_or(JceDecodeError::InvalidData)?;
    result.append(JceType::Char.key(tag), WireValue::UInt(u64::from(value)));
    Ok(())
}

fn read_short(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    let value = r.i16().ok_or(JceDecodeError::InvalidData)?;
    result.append(JceType::Short.key(tag), WireValue::Int(i64::from(value)));
    Ok(())
}

fn read_int(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    let value = r.i32().ok_or(JceDecodeError::InvalidData)?;
    result.append(JceType::Int.key(tag), WireValue::Int(i64::from(value)));
    Ok(())
}

fn read_int64(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    let value = r.i64().ok_or(JceDecodeError::InvalidData)?;
    result.append(JceType::Int64.key(tag), WireValue::Int(value));
    Ok(())
}

fn read_float(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    let value = r.f32().ok_or(JceDecodeError::InvalidData)?;
    result.append(JceType::Float.key(tag), WireValue::F32(value));
    Ok(())
}

fn read_double(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    let value = r.f64().ok_or(JceDecodeError::InvalidData)?;
    result.append(JceType::Double.key(tag), WireValue::F64(value));
    Ok(())
}

fn read_string1(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    let length = usize::from(r.u8().ok_or(JceDecodeError::InvalidData)?);
    let data = r.buf(length).ok_or(JceDecodeError::InvalidData)?;
    result.append(
        JceType::String1.key(tag),
        WireValue::Str(String::from_utf8_lossy(data).into_owned()),
    );
    Ok(())
}

fn read_string4(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    let length = r.u32().ok_or(JceDecodeError::InvalidData)? as usize;
    let data = r.buf(length).ok_or(JceDecodeError::InvalidData)?;
    result.append(
        JceType::String4.key(tag),
        WireValue::Str(String::from_utf8_lossy(data).into_owned()),
    );
    Ok(())
}

/// Simple list: an element-type header (content not interpreted), a length
/// element, then the raw bytes rendered as per-byte integers.
fn read_simple_list(r: &mut Reader, tag: u64, result: &mut TagMap) -> Result<(), JceDecodeError> {
    read_header(r)?;
    let length = read_length(r)?;
    if length == 0 {
        result.append(JceType::EmptySimpleList.key(tag), WireValue::Null);
        return Ok(());
    }
    let data = r.buf(length).ok_or(JceDecodeError::InvalidData)?;
    let items = data
        .iter()
        .map(|&b| WireValue::UInt(u64::from(b)))
        .collect();
    result.append(JceType::SimpleList.key(tag), WireValue::Array(items));
    Ok(())
}
