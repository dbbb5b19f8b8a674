// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Unified codec trait for both wire formats.
//!
//! This module provides the [`ValueCodec`] trait implemented by the AMF0
//! and AMF3 codec sessions, plus [`AnyCodec`] for picking a format at run
//! time.

use std::io::{ErrorKind, Read, Write};

use crate::core::{AmfError, BatchDecodeError, Format, Result, Value};

use super::amf0::Amf0Codec;
use super::amf3::Amf3Codec;

/// Stateful decoder/encoder for one wire format.
///
/// A codec instance is a session: reference tables filled by one call are
/// visible to the next. All operations take `&mut self`, so a session is
/// never shared between concurrent callers.
pub trait ValueCodec {
    /// Wire format handled by this codec.
    fn format(&self) -> Format;

    /// Decode one value, or return `None` if the stream ends cleanly before
    /// the next marker.
    fn try_decode<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Option<Value>>;

    /// Encode one value, returning the number of bytes written.
    fn encode<W: Write + ?Sized>(&mut self, w: &mut W, value: &Value) -> Result<usize>;

    /// Decode one value.
    ///
    /// # Errors
    ///
    /// A stream that ends before the marker is a stream error, like any
    /// other short read.
    fn decode<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Value> {
        self.try_decode(r)?.ok_or_else(|| {
            AmfError::Stream(std::io::Error::new(
                ErrorKind::UnexpectedEof,
                "stream ended before a value marker",
            ))
        })
    }

    /// Decode values until the stream ends cleanly.
    ///
    /// # Errors
    ///
    /// Any other failure stops the batch; the values decoded so far are
    /// returned inside the error.
    fn decode_batch<R: Read + ?Sized>(
        &mut self,
        r: &mut R,
    ) -> std::result::Result<Vec<Value>, BatchDecodeError> {
        let mut decoded = Vec::new();
        loop {
            match self.try_decode(r) {
                Ok(Some(value)) => decoded.push(value),
                Ok(None) => return Ok(decoded),
                Err(source) => return Err(BatchDecodeError { decoded, source }),
            }
        }
    }

    /// Encode values in order, stopping at the first failure.
    fn encode_batch<W: Write + ?Sized>(&mut self, w: &mut W, values: &[Value]) -> Result<()> {
        for value in values {
            self.encode(w, value)?;
        }
        Ok(())
    }

    /// Encode one value into a new buffer.
    fn encode_to_vec(&mut self, value: &Value) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        self.encode(&mut buf, value)?;
        Ok(buf)
    }
}

/// A codec session chosen at run time.
#[derive(Debug, Clone)]
pub enum AnyCodec {
    Amf0(Amf0Codec),
    Amf3(Amf3Codec),
}

impl AnyCodec {
    /// Create a session with default configuration.
    pub fn new(format: Format) -> Self {
        match format {
            Format::Amf0 => AnyCodec::Amf0(Amf0Codec::new()),
            Format::Amf3 => AnyCodec::Amf3(Amf3Codec::new()),
        }
    }
}

impl ValueCodec for AnyCodec {
    fn format(&self) -> Format {
        match self {
            AnyCodec::Amf0(codec) => codec.format(),
            AnyCodec::Amf3(codec) => codec.format(),
        }
    }

    fn try_decode<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Option<Value>> {
        match self {
            AnyCodec::Amf0(codec) => codec.try_decode(r),
            AnyCodec::Amf3(codec) => codec.try_decode(r),
        }
    }

    fn encode<W: Write + ?Sized>(&mut self, w: &mut W, value: &Value) -> Result<usize> {
        match self {
            AnyCodec::Amf0(codec) => codec.encode(w, value),
            AnyCodec::Amf3(codec) => codec.encode(w, value),
        }
    }
}
