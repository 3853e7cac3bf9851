use std::io::{ErrorKind, Read};

use bytes::{BufMut, BytesMut};
use tracing::{debug, trace};

use crate::codec::{FrameConfig, Packet};
use crate::error::{FrameError, Result};
use crate::slip::{unescape, END, ESC, ESC_END, ESC_ESC};

const INITIAL_BUFFER_CAPACITY: usize = 256;

/// Reads SLIP packets from any `Read` stream.
///
/// The reader pulls one byte at a time and never consumes input past the
/// terminating `END`, so nothing is buffered between calls. Wrap unbuffered
/// sources (files, sockets, serial ports) in [`std::io::BufReader`].
pub struct FrameReader<T> {
    inner: T,
    config: FrameConfig,
}

impl<T: Read> FrameReader<T> {
    /// Create a new frame reader with default configuration.
    pub fn new(inner: T) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    /// Create a new frame reader with explicit configuration.
    pub fn with_config(inner: T, config: FrameConfig) -> Self {
        Self { inner, config }
    }

    /// Read the next packet (blocking).
    ///
    /// Consumes input up to and including the next `END`. Delimiters that
    /// arrive before any payload byte are skipped.
    ///
    /// When input ends first, the bytes decoded so far are returned with
    /// [`Packet::is_prefix`] set. Joining successive prefix results is up to
    /// the caller.
    ///
    /// An `ESC` followed by anything but `ESC_END`/`ESC_ESC` is not rejected:
    /// the following byte is kept as-is.
    ///
    /// A packet over `max_packet_size` is read through its `END` and dropped
    /// before [`FrameError::PacketTooLarge`] is returned, so the next call
    /// starts on a frame boundary.
    pub fn read_packet(&mut self) -> Result<Packet> {
        let mut buf = BytesMut::with_capacity(INITIAL_BUFFER_CAPACITY);
        let mut escaped = false;

        loop {
            let Some(byte) = self.next_byte()? else {
                if escaped {
                    trace!("input ended after ESC");
                }
                debug!(len = buf.len(), "input ended before END");
                return Ok(Packet::prefix(buf.freeze()));
            };

            if escaped {
                escaped = false;
                if byte != ESC_END && byte != ESC_ESC {
                    trace!(byte, "unknown escape target kept literally");
                }
                self.push(&mut buf, unescape(byte))?;
                continue;
            }

            match byte {
                END if buf.is_empty() => trace!("skipping empty delimiter"),
                END => {
                    debug!(len = buf.len(), "packet complete");
                    return Ok(Packet::complete(buf.freeze()));
                }
                ESC => escaped = true,
                other => self.push(&mut buf, other)?,
            }
        }
    }

    fn next_byte(&mut self) -> Result<Option<u8>> {
        let mut byte = [0u8; 1];
        loop {
            match self.inner.read(&mut byte) {
                Ok(0) => return Ok(None),
                Ok(_) => return Ok(Some(byte[0])),
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(FrameError::Io(err)),
            }
        }
    }

    fn push(&mut self, buf: &mut BytesMut, byte: u8) -> Result<()> {
        if buf.len() >= self.config.max_packet_size {
            let size = buf.len() + 1;
            let skipped = self.discard_frame()?;
            debug!(size, skipped, "oversized packet discarded");
            return Err(FrameError::PacketTooLarge {
                size,
                max: self.config.max_packet_size,
            });
        }
        buf.put_u8(byte);
        Ok(())
    }

    /// Consume input through the next unescaped `END` or end of input.
    fn discard_frame(&mut self) -> Result<usize> {
        let mut escaped = false;
        let mut skipped = 0;
        while let Some(byte) = self.next_byte()? {
            if escaped {
                escaped = false;
            } else if byte == END {
                break;
            } else if byte == ESC {
                escaped = true;
            }
            skipped += 1;
        }
        Ok(skipped)
    }

    /// Borrow the underlying stream.
    pub fn get_ref(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the underlying stream.
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Consume the reader and return the inner stream.
    pub fn into_inner(self) -> T {
        self.inner
    }

    /// Update maximum packet size for subsequent reads.
    pub fn set_max_packet_size(&mut self, max_packet_size: usize) {
        self.config.max_packet_size = max_packet_size;
    }

    /// Current frame reader configuration.
    pub fn config(&self) -> &FrameConfig {
        &self.config
    }
}

impl<T: Read> Iterator for FrameReader<T> {
    type Item = Result<Packet>;

    /// Yields packets until input is exhausted.
    ///
    /// A final non-empty prefix is yielded once; an empty one ends iteration.
    fn next(&mut self) -> Option<Self::Item> {
        match self.read_packet() {
            Ok(packet) if packet.is_prefix && packet.payload.is_empty() => None,
            other => Some(other),
        }
    }
}
