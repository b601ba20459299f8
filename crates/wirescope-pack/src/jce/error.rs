//! JCE decoder error type.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum JceDecodeError {
    #[error("invalid jce data")]
    InvalidData,
    #[error("unknown type")]
    UnknownType,
    #[error("max decode depth exceeded")]
    DepthExceeded,
    #[error("json rendering failed: {0}")]
    Json(#[from] serde_json::Error),
}
