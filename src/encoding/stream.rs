// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Byte-stream primitives shared by both codecs.
//!
//! Reads never tolerate partial data: a source that yields fewer bytes than
//! requested fails with `UnexpectedEof`. Writes go through `write_all`, so a
//! sink that stops accepting bytes fails with `WriteZero`.

use std::io::{ErrorKind, Read, Write};

use tracing::warn;

use crate::core::{AmfError, Result};

use super::builder::Utf8Policy;

/// Largest element count used to pre-size collections from a wire count.
const MAX_PREALLOC: usize = 1024;

/// Read one byte.
pub fn read_byte<R: Read + ?Sized>(r: &mut R) -> Result<u8> {
    let mut buf = [0u8; 1];
    r.read_exact(&mut buf)?;
    Ok(buf[0])
}

/// Read exactly `n` bytes.
///
/// The buffer grows as data arrives, so a hostile length prefix cannot
/// force a large allocation up front.
pub fn read_bytes<R: Read + ?Sized>(r: &mut R, n: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(n.min(8 * 1024));
    Read::take(&mut *r, n as u64).read_to_end(&mut buf)?;
    if buf.len() != n {
        return Err(AmfError::Stream(std::io::Error::new(
            ErrorKind::UnexpectedEof,
            format!("expected {n} bytes, got {}", buf.len()),
        )));
    }
    Ok(buf)
}

/// Read the marker byte that starts a value.
///
/// Returns `None` when the stream ends cleanly before the marker.
pub fn read_marker<R: Read + ?Sized>(r: &mut R) -> Result<Option<u8>> {
    let mut buf = [0u8; 1];
    loop {
        match r.read(&mut buf) {
            Ok(0) => return Ok(None),
            Ok(_) => return Ok(Some(buf[0])),
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e.into()),
        }
    }
}

/// Read one byte and fail unless it equals `target`.
pub fn expect_byte<R: Read + ?Sized>(r: &mut R, target: u8, context: &str) -> Result<()> {
    let got = read_byte(r)?;
    if got != target {
        return Err(AmfError::framing(
            context,
            format!("expected {target:#04x} got {got:#04x}"),
        ));
    }
    Ok(())
}

/// Write one byte.
pub fn write_byte<W: Write + ?Sized>(w: &mut W, b: u8) -> Result<usize> {
    w.write_all(&[b])?;
    Ok(1)
}

/// Write all of `data`.
pub fn write_bytes<W: Write + ?Sized>(w: &mut W, data: &[u8]) -> Result<usize> {
    w.write_all(data)?;
    Ok(data.len())
}

/// Turn wire bytes into text according to `policy`.
pub fn bytes_to_string(buf: Vec<u8>, policy: Utf8Policy, context: &str) -> Result<String> {
    match String::from_utf8(buf) {
        Ok(s) => Ok(s),
        Err(e) => match policy {
            Utf8Policy::Strict => Err(AmfError::framing(context, e.to_string())),
            Utf8Policy::Lossy => {
                warn!(
                    context = context,
                    valid_up_to = e.utf8_error().valid_up_to(),
                    "Invalid UTF-8 in string, replacing bad sequences"
                );
                Ok(String::from_utf8_lossy(e.as_bytes()).into_owned())
            }
        },
    }
}

/// Capacity hint for a collection whose length came off the wire.
pub fn prealloc(count: usize) -> usize {
    count.min(MAX_PREALLOC)
}

/// Nesting depth of the decode calls currently in progress.
///
/// Decoding recurses once per nested value, so a limit keeps hostile input
/// from exhausting the thread stack.
#[derive(Debug, Clone, Copy, Default)]
pub struct NestingDepth {
    current: usize,
}

impl NestingDepth {
    /// Enter one more level, failing if that would exceed `limit`.
    pub fn enter(&mut self, limit: usize, context: &str) -> Result<()> {
        if self.current >= limit {
            return Err(AmfError::framing(
                context,
                format!("values nested deeper than {limit} levels"),
            ));
        }
        self.current += 1;
        Ok(())
    }

    pub fn leave(&mut self) {
        self.current = self.current.saturating_sub(1);
    }

    pub fn current(&self) -> usize {
        self.current
    }
}
