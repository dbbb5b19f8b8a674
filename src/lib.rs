// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! # amfcodec
//!
//! Codec for the AMF0 and AMF3 binary object-serialization formats.
//!
//! The library converts between a byte stream and a closed [`Value`] model
//! covering numbers, strings, booleans, dates, byte blobs, dense and
//! associative arrays, and typed or externally defined object graphs.
//!
//! ## Architecture
//!
//! - `core/` - Value model, errors and the format identifier
//! - `encoding/amf0/` - AMF0 session (composes an AMF3 session for the
//!   avmplus switch)
//! - `encoding/amf3/` - AMF3 session: U29 integers, reference tables, object
//!   traits, external handlers and the messaging envelopes
//! - `encoding/codec.rs` - The [`ValueCodec`] trait both sessions implement
//! - `encoding/builder.rs` - [`CodecConfig`] and [`CodecBuilder`]
//! - `encoding/json/` - JSON bridge used by the command-line tool
//!
//! ## Sessions
//!
//! Each codec instance owns its reference tables. Values decoded by one call
//! can be referred to by the next, so decode a whole conversation with one
//! instance and start a new instance for a new conversation.
//!
//! ## Example: Decoding a command batch
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use amfcodec::{Amf0Codec, Value, ValueCodec};
//!
//! let mut data = b"\x02\x00\x07publish\x00".to_vec();
//! data.extend_from_slice(&0.0f64.to_be_bytes());
//! data.push(0x05);
//!
//! let mut codec = Amf0Codec::new();
//! let values = codec.decode_batch(&mut data.as_slice())?;
//! assert_eq!(
//!     values,
//!     vec![Value::from("publish"), Value::Number(0.0), Value::Null]
//! );
//! # Ok(())
//! # }
//! ```
//!
//! ## Example: Encoding an object
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use amfcodec::{Amf3Codec, Object, Value, ValueCodec};
//!
//! let mut object = Object::new();
//! object.insert("foo".to_string(), Value::from("bar"));
//!
//! let mut codec = Amf3Codec::new();
//! let bytes = codec.encode_to_vec(&Value::Object(object.clone()))?;
//!
//! let decoded = Amf3Codec::new().decode(&mut bytes.as_slice())?;
//! assert_eq!(decoded, Value::Object(object));
//! # Ok(())
//! # }
//! ```

// Core types
pub mod core;

// Re-export core types for convenience
pub use core::{
    AmfError, BatchDecodeError, DenseArray, Format, Object, Result, TableKind, TypedObject, Value,
    U29_MAX,
};

// Encoding/decoding
pub mod encoding;

pub use encoding::{
    json, Amf0Codec, Amf3Codec, AnyCodec, ArrayCollectionHandler, CodecBuilder, CodecConfig,
    ExternalHandler, HandlerRegistry, ObjectTraits, Utf8Policy, ValueCodec,
};
