//! JCE codec wrapper.

use crate::jce::JceDecoder;
use crate::pb::Options;

use super::types::{CodecError, WireCodec};

pub struct JceWireCodec {
    pub decoder: JceDecoder,
}

impl Default for JceWireCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl JceWireCodec {
    pub fn new() -> Self {
        Self {
            decoder: JceDecoder::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        "jce"
    }

    /// JCE carries its types on the wire; `opts` is ignored.
    pub fn decode(&self, raw: &[u8], _opts: Option<&Options>) -> Result<String, CodecError> {
        Ok(self.decoder.decode(raw)?)
    }
}

impl WireCodec for JceWireCodec {
    fn id(&self) -> &'static str {
        self.id()
    }

    fn decode(&self, raw: &[u8], opts: Option<&Options>) -> Result<String, CodecError> {
        self.decode(raw, opts)
    }
}
