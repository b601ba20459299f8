//! Combined decoder surface for the supported wire formats.

mod jce;
mod pb;
mod registry;
mod types;

pub use jce::JceWireCodec;
pub use pb::PbWireCodec;
pub use registry::Codecs;
pub use types::{CodecError, WireCodec};
