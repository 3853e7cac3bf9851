/// Errors that can occur while framing, unframing or converting packets.
#[derive(Debug, thiserror::Error)]
pub enum FrameError {
    /// An I/O error occurred while reading or writing packets.
    #[error("frame I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The output stream accepted zero bytes of a packet.
    #[error("connection closed (incomplete packet written)")]
    ConnectionClosed,

    /// The packet exceeds the configured maximum size.
    #[error("packet too large ({size} bytes, max {max})")]
    PacketTooLarge { size: usize, max: usize },

    /// End of input was reached before a terminating `END` delimiter.
    #[error("stream ended before packet was terminated ({buffered} bytes buffered)")]
    StreamEnded { buffered: usize },

    /// The value exposes none of the supported conversion capabilities.
    #[error("unsupported value type: {type_name}")]
    UnsupportedType { type_name: &'static str },

    /// A value's own marshal or unmarshal capability failed.
    #[error("value conversion failed: {0}")]
    Marshal(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A text target received bytes that are not valid UTF-8.
    #[error("packet is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),

    /// A single-byte target received a packet of a different length.
    #[error("expected a 1-byte packet, got {len} bytes")]
    InvalidByteLength { len: usize },
}

pub type Result<T> = std::result::Result<T, FrameError>;
