//! Bounds-checked binary buffer reading for the wirescope decoders.

mod reader;

pub use reader::Reader;
