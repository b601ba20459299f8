//! Common codec trait and aggregate error.

use crate::jce::JceDecodeError;
use crate::pb::{Options, PbDecodeError};

#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    #[error("pb decode error: {0}")]
    Pb(#[from] PbDecodeError),
    #[error("jce decode error: {0}")]
    Jce(#[from] JceDecodeError),
}

/// A wire-format decoder exposed under a stable identifier.
///
/// Formats that carry their types on the wire ignore `opts`.
pub trait WireCodec {
    fn id(&self) -> &'static str;
    fn decode(&self, raw: &[u8], opts: Option<&Options>) -> Result<String, CodecError>;
}
