//! SLIP special characters.
//!
//! The numeric values are the RFC 1055 assignments and must match every peer
//! on the link.

/// Frame boundary.
pub const END: u8 = 0xC0;

/// Escape introducer.
pub const ESC: u8 = 0xDB;

/// Escaped stand-in for `END` (follows `ESC`).
pub const ESC_END: u8 = 0xDC;

/// Escaped stand-in for `ESC` (follows `ESC`).
pub const ESC_ESC: u8 = 0xDD;

/// Returns true if the byte must be escaped inside a payload.
pub fn needs_escape(byte: u8) -> bool {
    byte == END || byte == ESC
}

/// Resolve the byte following an `ESC`.
///
/// Unknown escape targets are passed through unchanged.
pub fn unescape(byte: u8) -> u8 {
    match byte {
        ESC_END => END,
        ESC_ESC => ESC,
        other => other,
    }
}
