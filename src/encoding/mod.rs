// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Wire format encoding/decoding implementations.
//!
//! This module provides the codec sessions and their shared plumbing:
//! - [`amf0`] - AMF0 encoding/decoding
//! - [`amf3`] - AMF3 encoding/decoding, traits and external handlers
//! - [`codec`] - Unified codec interface
//! - [`builder`] - Codec configuration
//! - [`json`] - JSON bridge for tooling
//! - [`stream`] - Byte-stream primitives
//! - [`table`] - Back-reference tables

pub mod amf0;
pub mod amf3;
pub mod builder;
pub mod codec;
pub mod date;
pub mod json;
pub mod stream;
pub mod table;

pub use amf0::Amf0Codec;
pub use amf3::{
    Amf3Codec, ArrayCollectionHandler, ExternalHandler, HandlerRegistry, ObjectTraits, U29Header,
};
pub use builder::{CodecBuilder, CodecConfig, Utf8Policy};
pub use codec::{AnyCodec, ValueCodec};
pub use table::ReferenceTable;
