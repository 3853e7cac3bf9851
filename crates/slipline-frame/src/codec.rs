use bytes::{BufMut, Bytes, BytesMut};

use crate::slip::{needs_escape, END, ESC, ESC_END, ESC_ESC};

/// Default maximum decoded packet size: 16 MiB.
pub const DEFAULT_MAX_PACKET: usize = 16 * 1024 * 1024;

/// One decoded packet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Packet {
    /// Unstuffed packet bytes.
    pub payload: Bytes,
    /// True when input ended before a terminating `END` was seen.
    pub is_prefix: bool,
}

impl Packet {
    /// Create a complete (END-terminated) packet.
    pub fn complete(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            is_prefix: false,
        }
    }

    /// Create a packet cut short by end of input.
    pub fn prefix(payload: impl Into<Bytes>) -> Self {
        Self {
            payload: payload.into(),
            is_prefix: true,
        }
    }

    /// The stuffed wire size of this payload (both delimiters included).
    pub fn wire_size(&self) -> usize {
        encoded_len(&self.payload)
    }
}

/// Exact encoded length of `payload`, both `END` delimiters included.
pub fn encoded_len(payload: &[u8]) -> usize {
    let escapes = payload.iter().filter(|&&b| needs_escape(b)).count();
    payload.len() + escapes + 2
}

/// Encode a payload into the SLIP wire format.
///
/// Wire format:
/// ```text
/// ┌──────┬──────────────────────────────────┬──────┐
/// │ END  │ payload                          │ END  │
/// │ 0xC0 │ END -> ESC ESC_END (0xDB 0xDC)   │ 0xC0 │
/// │      │ ESC -> ESC ESC_ESC (0xDB 0xDD)   │      │
/// └──────┴──────────────────────────────────┴──────┘
/// ```
pub fn encode_packet(payload: &[u8], dst: &mut BytesMut) {
    dst.reserve(encoded_len(payload));
    dst.put_u8(END);
    for &byte in payload {
        match byte {
            END => dst.put_slice(&[ESC, ESC_END]),
            ESC => dst.put_slice(&[ESC, ESC_ESC]),
            other => dst.put_u8(other),
        }
    }
    dst.put_u8(END);
}

/// Configuration shared by [`FrameReader`](crate::FrameReader) and
/// [`FrameWriter`](crate::FrameWriter).
#[derive(Debug, Clone)]
pub struct FrameConfig {
    /// Maximum unstuffed packet size in bytes. Default: 16 MiB.
    pub max_packet_size: usize,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            max_packet_size: DEFAULT_MAX_PACKET,
        }
    }
}
