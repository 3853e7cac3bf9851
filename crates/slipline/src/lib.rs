//! SLIP packet framing and FCS-16 checksums for serial byte streams.
//!
//! slipline recovers packet boundaries from links that only carry raw bytes
//! (UARTs, pipes, stdio) and optionally guards each packet with a PPP-style
//! frame check sequence.
//!
//! # Crate Structure
//!
//! - [`frame`]: SLIP reader/writer, value codec and configuration
//! - [`fcs`]: CRC-16 frame check sequence

/// Re-export frame types.
pub mod frame {
    pub use slipline_frame::*;
}

/// Re-export the frame check sequence engine.
pub mod fcs {
    pub use slipline_frame::fcs::*;
}
