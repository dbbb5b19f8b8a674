// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF0 codec.
//!
//! One reference table holds objects, typed objects, ECMA arrays and strict
//! arrays in the order they are decoded. The avmplus marker hands the rest
//! of a value to a composed AMF3 session, whose tables persist alongside.

mod decoder;
mod encoder;

use std::io::{Read, Write};

use crate::core::{Format, Result, TableKind, Value};
use crate::encoding::amf3::{Amf3Codec, HandlerRegistry};
use crate::encoding::builder::CodecConfig;
use crate::encoding::codec::ValueCodec;
use crate::encoding::stream::{read_marker, NestingDepth};
use crate::encoding::table::ReferenceTable;

/// AMF0 type markers.
pub mod marker {
    pub const NUMBER: u8 = 0x00;
    pub const BOOLEAN: u8 = 0x01;
    pub const STRING: u8 = 0x02;
    pub const OBJECT: u8 = 0x03;
    pub const MOVIECLIP: u8 = 0x04;
    pub const NULL: u8 = 0x05;
    pub const UNDEFINED: u8 = 0x06;
    pub const REFERENCE: u8 = 0x07;
    pub const ECMA_ARRAY: u8 = 0x08;
    pub const OBJECT_END: u8 = 0x09;
    pub const STRICT_ARRAY: u8 = 0x0A;
    pub const DATE: u8 = 0x0B;
    pub const LONG_STRING: u8 = 0x0C;
    pub const UNSUPPORTED: u8 = 0x0D;
    pub const RECORDSET: u8 = 0x0E;
    pub const XML_DOCUMENT: u8 = 0x0F;
    pub const TYPED_OBJECT: u8 = 0x10;
    pub const AVMPLUS: u8 = 0x11;
}

/// AMF0 codec session.
#[derive(Debug, Clone)]
pub struct Amf0Codec {
    config: CodecConfig,
    references: ReferenceTable<Value>,
    encoded: Vec<Value>,
    depth: NestingDepth,
    amf3: Amf3Codec,
}

impl Default for Amf0Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Amf0Codec {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default(), HandlerRegistry::new())
    }

    /// Create a session; the handlers go to the composed AMF3 session.
    pub fn with_config(config: CodecConfig, handlers: HandlerRegistry) -> Self {
        Self {
            config,
            references: ReferenceTable::new(TableKind::Amf0Object),
            encoded: Vec::new(),
            depth: NestingDepth::default(),
            amf3: Amf3Codec::with_config(config, handlers),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Composed AMF3 session used after the avmplus marker.
    pub fn amf3(&self) -> &Amf3Codec {
        &self.amf3
    }

    pub fn amf3_mut(&mut self) -> &mut Amf3Codec {
        &mut self.amf3
    }

    /// Composites decoded so far, in reference order.
    pub fn references(&self) -> &[Value] {
        self.references.entries()
    }

    /// Composites encoded so far. Kept for inspection only; the encoder
    /// never emits references on its own.
    pub fn encoded_references(&self) -> &[Value] {
        &self.encoded
    }
}

impl ValueCodec for Amf0Codec {
    fn format(&self) -> Format {
        Format::Amf0
    }

    fn try_decode<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Option<Value>> {
        let Some(marker) = read_marker(r)? else {
            return Ok(None);
        };

        self.depth.enter(self.config.max_depth, "amf0")?;
        let value = self.decode_value(marker, r);
        self.depth.leave();
        value.map(Some)
    }

    fn encode<W: Write + ?Sized>(&mut self, w: &mut W, value: &Value) -> Result<usize> {
        self.encode_value(w, value)
    }
}
