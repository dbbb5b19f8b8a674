// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF3 codec.
//!
//! A codec session owns three reference tables (strings, composite values,
//! object traits) that persist across decode calls, so a value may refer
//! back to anything decoded earlier in the same session. Create a new
//! session to start with empty tables.
//!
//! Encoding never emits back-references; every string, composite and trait
//! is written inline.

mod decoder;
mod encoder;
pub mod external;
pub mod registry;
pub mod u29;

use std::io::{Read, Write};
use std::sync::Arc;

use crate::core::{Format, Result, TableKind, Value};
use crate::encoding::builder::CodecConfig;
use crate::encoding::codec::ValueCodec;
use crate::encoding::stream::{read_marker, NestingDepth};
use crate::encoding::table::ReferenceTable;

pub use external::{ArrayCollectionHandler, ACKNOWLEDGE_MESSAGE, ARRAY_COLLECTION, ASYNC_MESSAGE};
pub use registry::{ExternalHandler, HandlerRegistry};
pub use u29::{read_u29, read_u29_header, write_u29, write_u29_header, U29Header};

/// AMF3 type markers.
pub mod marker {
    pub const UNDEFINED: u8 = 0x00;
    pub const NULL: u8 = 0x01;
    pub const FALSE: u8 = 0x02;
    pub const TRUE: u8 = 0x03;
    pub const INTEGER: u8 = 0x04;
    pub const DOUBLE: u8 = 0x05;
    pub const STRING: u8 = 0x06;
    pub const XML_DOCUMENT: u8 = 0x07;
    pub const DATE: u8 = 0x08;
    pub const ARRAY: u8 = 0x09;
    pub const OBJECT: u8 = 0x0A;
    pub const XML: u8 = 0x0B;
    pub const BYTE_ARRAY: u8 = 0x0C;
    pub const VECTOR_INT: u8 = 0x0D;
    pub const VECTOR_UINT: u8 = 0x0E;
    pub const VECTOR_DOUBLE: u8 = 0x0F;
    pub const VECTOR_OBJECT: u8 = 0x10;
    pub const DICTIONARY: u8 = 0x11;
}

/// Object shape descriptor cached in the trait table.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ObjectTraits {
    /// Class name (empty for anonymous objects)
    pub class_name: String,
    /// Body is produced by a class-specific handler
    pub externalizable: bool,
    /// Dynamic key/value pairs follow the sealed values
    pub dynamic: bool,
    /// Sealed property names in wire order
    pub sealed: Vec<String>,
}

/// AMF3 codec session.
#[derive(Debug, Clone)]
pub struct Amf3Codec {
    config: CodecConfig,
    strings: ReferenceTable<String>,
    objects: ReferenceTable<Value>,
    traits: ReferenceTable<Arc<ObjectTraits>>,
    handlers: HandlerRegistry,
    depth: NestingDepth,
}

impl Default for Amf3Codec {
    fn default() -> Self {
        Self::new()
    }
}

impl Amf3Codec {
    /// Create a session with the default configuration.
    pub fn new() -> Self {
        Self::with_config(CodecConfig::default(), HandlerRegistry::new())
    }

    /// Create a session from a configuration and a set of handlers.
    pub fn with_config(config: CodecConfig, mut handlers: HandlerRegistry) -> Self {
        if config.array_collection && !handlers.contains(ARRAY_COLLECTION) {
            handlers.register(ARRAY_COLLECTION, ArrayCollectionHandler);
        }
        Self {
            config,
            strings: ReferenceTable::new(TableKind::String),
            objects: ReferenceTable::new(TableKind::Object),
            traits: ReferenceTable::new(TableKind::Trait),
            handlers,
            depth: NestingDepth::default(),
        }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Register a handler for an externalizable class name.
    pub fn register_external_handler<H>(&mut self, class_name: impl Into<String>, handler: H)
    where
        H: ExternalHandler + 'static,
    {
        self.handlers.register(class_name, handler);
    }

    pub fn has_external_handler(&self, class_name: &str) -> bool {
        self.handlers.contains(class_name)
    }

    pub fn handlers(&self) -> &HandlerRegistry {
        &self.handlers
    }

    /// Strings cached so far, in reference order.
    pub fn string_references(&self) -> &[String] {
        self.strings.entries()
    }

    /// Composite values cached so far, in reference order.
    pub fn object_references(&self) -> &[Value] {
        self.objects.entries()
    }

    /// Append a value to the composite table, returning its index.
    ///
    /// External handlers call this when their wire format registers more
    /// than the enclosing object.
    pub fn push_object_reference(&mut self, value: Value) -> usize {
        self.objects.push(value)
    }

    /// Object traits cached so far, in reference order.
    pub fn traits(&self) -> &[Arc<ObjectTraits>] {
        self.traits.entries()
    }
}

impl ValueCodec for Amf3Codec {
    fn format(&self) -> Format {
        Format::Amf3
    }

    fn try_decode<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Option<Value>> {
        let Some(marker) = read_marker(r)? else {
            return Ok(None);
        };

        self.depth.enter(self.config.max_depth, "amf3")?;
        let value = self.decode_value(marker, r);
        self.depth.leave();
        value.map(Some)
    }

    fn encode<W: Write + ?Sized>(&mut self, w: &mut W, value: &Value) -> Result<usize> {
        self.encode_value(w, value)
    }
}
