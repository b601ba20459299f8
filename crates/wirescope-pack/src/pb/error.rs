//! PB decoder error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PbDecodeError {
    #[error("invalid wire data")]
    InvalidData,
    #[error("unknown type")]
    UnknownType,
    #[error("tag too big")]
    TagTooBig,
    #[error("group wire types are deprecated")]
    GroupDeprecated,
    #[error("max decode depth exceeded")]
    DepthExceeded,
    #[error("json rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}
