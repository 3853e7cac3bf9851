//! SLIP (RFC 1055) packet framing with an optional FCS-16 frame check sequence.
//!
//! Every packet on the wire is delimited by `END` bytes:
//! - A leading `END` flushes any line noise the peer accumulated
//! - `END` and `ESC` inside the payload are replaced by two-byte escapes
//! - A trailing `END` terminates the packet
//!
//! The checksum engine in [`fcs`] is independent of the framing; callers
//! append and verify it around the payload when the link needs it.

pub mod codec;
pub mod error;
pub mod fcs;
pub mod reader;
pub mod slip;
pub mod value;
pub mod writer;

pub use codec::{encode_packet, encoded_len, FrameConfig, Packet, DEFAULT_MAX_PACKET};
pub use error::{FrameError, Result};
pub use fcs::{Fcs16, FCS_GOOD, FCS_INITIAL};
pub use reader::FrameReader;
pub use slip::{END, ESC, ESC_END, ESC_ESC};
pub use value::{Decoder, Encoder, Marshal, Unmarshal};
pub use writer::FrameWriter;
