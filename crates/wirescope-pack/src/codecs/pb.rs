//! PB codec wrapper.

use crate::pb::{Options, PbDecoder};

use super::types::{CodecError, WireCodec};

pub struct PbWireCodec {
    pub decoder: PbDecoder,
}

impl Default for PbWireCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl PbWireCodec {
    pub fn new() -> Self {
        Self {
            decoder: PbDecoder::new(),
        }
    }

    pub fn id(&self) -> &'static str {
        "pb"
    }

    pub fn decode(&self, raw: &[u8], opts: Option<&Options>) -> Result<String, CodecError> {
        Ok(self.decoder.decode(raw, opts)?)
    }
}

impl WireCodec for PbWireCodec {
    fn id(&self) -> &'static str {
        self.id()
    }

    fn decode(&self, raw: &[u8], opts: Option<&Options>) -> Result<String, CodecError> {
        self.decode(raw, opts)
    }
}
