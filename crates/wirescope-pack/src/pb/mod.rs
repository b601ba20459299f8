//! Schema-less Protocol Buffers wire decoding.
//!
//! The decoder walks the tag/wire-type stream without a schema. Callers may
//! steer rendering with per-tag [`Options`] hints; unhinted length-delimited
//! fields go through nested-message auto-detection and a control-character
//! text heuristic.

mod constants;
mod decoder;
mod error;
mod options;
mod types;

pub use constants::{DEFAULT_MAX_DEPTH, MAX_TAG_VALUE};
pub use decoder::{decode, decode_value, PbDecoder};
pub use error::PbDecodeError;
pub use options::Options;
pub use types::{FieldMeta, LogicalType, PackedType, WireType};
