//! Aggregate codec holder.

use super::{JceWireCodec, PbWireCodec, WireCodec};

pub struct Codecs {
    pub pb: PbWireCodec,
    pub jce: JceWireCodec,
}

impl Default for Codecs {
    fn default() -> Self {
        Self::new()
    }
}

impl Codecs {
    pub fn new() -> Self {
        Self {
            pb: PbWireCodec::new(),
            jce: JceWireCodec::new(),
        }
    }

    /// Resolves a codec by its identifier.
    pub fn by_id(&self, id: &str) -> Option<&dyn WireCodec> {
        match id {
            "pb" => Some(&self.pb),
            "jce" => Some(&self.jce),
            _ => None,
        }
    }
}
