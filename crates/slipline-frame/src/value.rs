//! Typed values over SLIP packets.
//!
//! A value is converted by the first capability it exposes, in this order:
//! 1. binary marshal/unmarshal ([`BinaryMarshal`], [`BinaryUnmarshal`])
//! 2. text marshal/unmarshal ([`TextMarshal`], [`TextUnmarshal`])
//! 3. raw byte sequence
//! 4. single raw byte
//! 5. raw string
//!
//! A value exposing none of them fails with
//! [`FrameError::UnsupportedType`] naming the type.

use std::io::{Read, Write};

use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::codec::FrameConfig;
use crate::error::{FrameError, Result};
use crate::reader::FrameReader;
use crate::writer::FrameWriter;

/// Error type returned by user capabilities.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Produce a binary representation.
pub trait BinaryMarshal {
    fn marshal_binary(&self) -> std::result::Result<Vec<u8>, BoxError>;
}

/// Produce a text representation.
pub trait TextMarshal {
    fn marshal_text(&self) -> std::result::Result<String, BoxError>;
}

/// Restore state from a binary representation.
pub trait BinaryUnmarshal {
    fn unmarshal_binary(&mut self, data: &[u8]) -> std::result::Result<(), BoxError>;
}

/// Restore state from a text representation.
pub trait TextUnmarshal {
    fn unmarshal_text(&mut self, text: &str) -> std::result::Result<(), BoxError>;
}

/// A value that can be written as a packet.
///
/// Every accessor defaults to "not supported"; implement the ones the type
/// actually offers.
pub trait Marshal {
    /// Name reported when no capability applies.
    fn type_name(&self) -> &'static str;

    fn binary(&self) -> Option<&dyn BinaryMarshal> {
        None
    }

    fn text(&self) -> Option<&dyn TextMarshal> {
        None
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        None
    }

    fn raw_byte(&self) -> Option<u8> {
        None
    }

    fn raw_str(&self) -> Option<&str> {
        None
    }
}

/// A value that can be filled from a packet.
pub trait Unmarshal {
    /// Name reported when no capability applies.
    fn type_name(&self) -> &'static str;

    fn binary_mut(&mut self) -> Option<&mut dyn BinaryUnmarshal> {
        None
    }

    fn text_mut(&mut self) -> Option<&mut dyn TextUnmarshal> {
        None
    }

    fn raw_bytes_mut(&mut self) -> Option<&mut Vec<u8>> {
        None
    }

    fn raw_byte_mut(&mut self) -> Option<&mut u8> {
        None
    }

    fn raw_string_mut(&mut self) -> Option<&mut String> {
        None
    }
}

/// The capability selected for marshaling a value.
pub enum Capability<'a> {
    Binary(&'a dyn BinaryMarshal),
    Text(&'a dyn TextMarshal),
    Bytes(&'a [u8]),
    Byte(u8),
    Str(&'a str),
}

impl Capability<'_> {
    /// Short label used in logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Capability::Binary(_) => "binary",
            Capability::Text(_) => "text",
            Capability::Bytes(_) => "bytes",
            Capability::Byte(_) => "byte",
            Capability::Str(_) => "str",
        }
    }

    /// Run the capability and return the packet payload.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        match self {
            Capability::Binary(v) => v.marshal_binary().map_err(FrameError::Marshal),
            Capability::Text(v) => v
                .marshal_text()
                .map(String::into_bytes)
                .map_err(FrameError::Marshal),
            Capability::Bytes(b) => Ok(b.to_vec()),
            Capability::Byte(b) => Ok(vec![b]),
            Capability::Str(s) => Ok(s.as_bytes().to_vec()),
        }
    }
}

/// Pick the highest-priority capability `value` exposes.
pub fn resolve<M: Marshal + ?Sized>(value: &M) -> Result<Capability<'_>> {
    if let Some(v) = value.binary() {
        return Ok(Capability::Binary(v));
    }
    if let Some(v) = value.text() {
        return Ok(Capability::Text(v));
    }
    if let Some(b) = value.raw_bytes() {
        return Ok(Capability::Bytes(b));
    }
    if let Some(b) = value.raw_byte() {
        return Ok(Capability::Byte(b));
    }
    if let Some(s) = value.raw_str() {
        return Ok(Capability::Str(s));
    }
    Err(FrameError::UnsupportedType {
        type_name: value.type_name(),
    })
}

/// Convert a value to packet bytes.
pub fn to_bytes<M: Marshal + ?Sized>(value: &M) -> Result<Vec<u8>> {
    resolve(value)?.into_bytes()
}

/// Fill `target` from packet bytes.
pub fn from_bytes<U: Unmarshal + ?Sized>(data: &[u8], target: &mut U) -> Result<()> {
    let type_name = target.type_name();

    if let Some(t) = target.binary_mut() {
        return t.unmarshal_binary(data).map_err(FrameError::Marshal);
    }
    if let Some(t) = target.text_mut() {
        let text = std::str::from_utf8(data)?;
        return t.unmarshal_text(text).map_err(FrameError::Marshal);
    }
    if let Some(t) = target.raw_bytes_mut() {
        t.clear();
        t.extend_from_slice(data);
        return Ok(());
    }
    if let Some(t) = target.raw_byte_mut() {
        let [byte] = data else {
            return Err(FrameError::InvalidByteLength { len: data.len() });
        };
        *t = *byte;
        return Ok(());
    }
    if let Some(t) = target.raw_string_mut() {
        let text = std::str::from_utf8(data)?;
        t.clear();
        t.push_str(text);
        return Ok(());
    }
    Err(FrameError::UnsupportedType { type_name })
}

/// Writes typed values, one packet each.
pub struct Encoder<W> {
    writer: FrameWriter<W>,
}

impl<W: Write> Encoder<W> {
    pub fn new(inner: W) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    pub fn with_config(inner: W, config: FrameConfig) -> Self {
        Self {
            writer: FrameWriter::with_config(inner, config),
        }
    }

    /// Marshal `value` and write it as one packet.
    pub fn encode<M: Marshal + ?Sized>(&mut self, value: &M) -> Result<()> {
        let capability = resolve(value)?;
        debug!(kind = capability.kind(), "encoding value");
        let data = capability.into_bytes()?;
        self.writer.write_packet(&data)
    }

    pub fn get_ref(&self) -> &W {
        self.writer.get_ref()
    }

    pub fn into_inner(self) -> W {
        self.writer.into_inner()
    }
}

/// Reads typed values, one packet each.
pub struct Decoder<R> {
    reader: FrameReader<R>,
}

impl<R: Read> Decoder<R> {
    pub fn new(inner: R) -> Self {
        Self::with_config(inner, FrameConfig::default())
    }

    pub fn with_config(inner: R, config: FrameConfig) -> Self {
        Self {
            reader: FrameReader::with_config(inner, config),
        }
    }

    /// Read the next packet and unmarshal it into `target`.
    pub fn decode<U: Unmarshal + ?Sized>(&mut self, target: &mut U) -> Result<()> {
        let data = self.next_payload()?;
        from_bytes(&data, target)
    }

    /// Read one whole packet, joining prefix results.
    ///
    /// A prefix result that adds no bytes means input is exhausted; this
    /// returns [`FrameError::StreamEnded`] with the count of bytes dropped.
    pub fn next_payload(&mut self) -> Result<Bytes> {
        let mut buf = BytesMut::new();
        loop {
            let packet = self.reader.read_packet()?;
            if packet.is_prefix && packet.payload.is_empty() {
                return Err(FrameError::StreamEnded {
                    buffered: buf.len(),
                });
            }
            buf.extend_from_slice(&packet.payload);
            if !packet.is_prefix {
                return Ok(buf.freeze());
            }
            debug!(len = buf.len(), "joining prefix chunk");
        }
    }

    pub fn get_ref(&self) -> &R {
        self.reader.get_ref()
    }

    pub fn into_inner(self) -> R {
        self.reader.into_inner()
    }
}

impl Marshal for [u8] {
    fn type_name(&self) -> &'static str {
        "[u8]"
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl<const N: usize> Marshal for [u8; N] {
    fn type_name(&self) -> &'static str {
        "[u8; N]"
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl Marshal for Vec<u8> {
    fn type_name(&self) -> &'static str {
        "Vec<u8>"
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl Marshal for Bytes {
    fn type_name(&self) -> &'static str {
        "Bytes"
    }

    fn raw_bytes(&self) -> Option<&[u8]> {
        Some(self)
    }
}

impl Marshal for u8 {
    fn type_name(&self) -> &'static str {
        "u8"
    }

    fn raw_byte(&self) -> Option<u8> {
        Some(*self)
    }
}

impl Marshal for str {
    fn type_name(&self) -> &'static str {
        "str"
    }

    fn raw_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl Marshal for String {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn raw_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl Unmarshal for Vec<u8> {
    fn type_name(&self) -> &'static str {
        "Vec<u8>"
    }

    fn raw_bytes_mut(&mut self) -> Option<&mut Vec<u8>> {
        Some(self)
    }
}

impl Unmarshal for u8 {
    fn type_name(&self) -> &'static str {
        "u8"
    }

    fn raw_byte_mut(&mut self) -> Option<&mut u8> {
        Some(self)
    }
}

impl Unmarshal for String {
    fn type_name(&self) -> &'static str {
        "String"
    }

    fn raw_string_mut(&mut self) -> Option<&mut String> {
        Some(self)
    }
}
