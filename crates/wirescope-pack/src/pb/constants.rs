//! Wire-level constants for the PB decoder.

/// Horizontal tab, allowed in text payloads.
pub(crate) const HORIZONTAL_TAB: u8 = 9;
/// Line feed, allowed in text payloads.
pub(crate) const LINE_FEED: u8 = 10;
/// Carriage return, allowed in text payloads.
pub(crate) const CARRIAGE_RETURN: u8 = 13;
/// Highest ASCII control character.
pub(crate) const MAX_CTRL_CHAR: u8 = 31;
/// DEL, treated as non-text.
pub(crate) const DELETE_CHAR: u8 = 127;

/// Longest legal varint encoding of a 64-bit value.
pub(crate) const MAX_VARINT_LEN: usize = 10;

/// Largest tag the four-digit key format can display.
pub const MAX_TAG_VALUE: u64 = 9999;

/// Default recursion cap for nested messages.
pub const DEFAULT_MAX_DEPTH: usize = 100;
