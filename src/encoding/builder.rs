// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Builder pattern for creating configured codecs.
//!
//! The `CodecBuilder` provides a fluent API for configuring and creating
//! AMF0 and AMF3 codec sessions.

use crate::core::Format;

use super::amf0::Amf0Codec;
use super::amf3::{Amf3Codec, ExternalHandler, HandlerRegistry};
use super::codec::AnyCodec;

/// How string payloads that are not valid UTF-8 are handled on decode.
///
/// With `Lossy` a decoded string no longer holds the original bytes, so
/// re-encoding it does not reproduce the input. Use `Strict` when byte
/// fidelity matters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Utf8Policy {
    /// Replace invalid sequences with U+FFFD and log a warning
    #[default]
    Lossy,
    /// Fail with a framing error
    Strict,
}

/// Default limit on how deeply decoded values may nest.
pub const DEFAULT_MAX_DEPTH: usize = 256;

/// Configuration shared by both codecs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecConfig {
    /// Treatment of invalid UTF-8 in string payloads
    pub utf8: Utf8Policy,
    /// Register the built-in `flex.messaging.io.ArrayCollection` handler
    pub array_collection: bool,
    /// Deepest value nesting accepted on decode; a top-level scalar has
    /// depth 1
    pub max_depth: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            utf8: Utf8Policy::Lossy,
            array_collection: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Builder for creating codec sessions.
///
/// # Example
///
/// ```rust
/// use amfcodec::{CodecBuilder, Utf8Policy, ValueCodec};
///
/// let mut codec = CodecBuilder::new()
///     .utf8(Utf8Policy::Strict)
///     .build_amf3();
///
/// let value = codec.decode(&mut &[0x06u8, 0x07, b'f', b'o', b'o'][..])?;
/// assert_eq!(value.as_str(), Some("foo"));
/// # Ok::<(), amfcodec::AmfError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct CodecBuilder {
    config: CodecConfig,
    handlers: HandlerRegistry,
}

impl CodecBuilder {
    /// Create a new builder with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: CodecConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the UTF-8 policy for decoded strings.
    pub fn utf8(mut self, policy: Utf8Policy) -> Self {
        self.config.utf8 = policy;
        self
    }

    /// Enable or disable the built-in ArrayCollection handler.
    pub fn array_collection(mut self, enabled: bool) -> Self {
        self.config.array_collection = enabled;
        self
    }

    /// Set the deepest value nesting accepted on decode.
    pub fn max_depth(mut self, depth: usize) -> Self {
        self.config.max_depth = depth;
        self
    }

    /// Register a handler for an externalizable class name.
    ///
    /// A handler registered here takes precedence over a built-in one for
    /// the same name.
    pub fn handler<H>(mut self, class_name: impl Into<String>, handler: H) -> Self
    where
        H: ExternalHandler + 'static,
    {
        self.handlers.register(class_name, handler);
        self
    }

    /// Build an AMF3 codec session.
    pub fn build_amf3(self) -> Amf3Codec {
        Amf3Codec::with_config(self.config, self.handlers)
    }

    /// Build an AMF0 codec session; its composed AMF3 codec shares the
    /// configuration and handlers.
    pub fn build_amf0(self) -> Amf0Codec {
        Amf0Codec::with_config(self.config, self.handlers)
    }

    /// Build a codec session for `format`.
    pub fn build(self, format: Format) -> AnyCodec {
        match format {
            Format::Amf0 => AnyCodec::Amf0(self.build_amf0()),
            Format::Amf3 => AnyCodec::Amf3(self.build_amf3()),
        }
    }
}
