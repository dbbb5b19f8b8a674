// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Handler registry for externalizable AMF3 classes.
//!
//! An externalizable object carries no trait-described body; its class
//! controls the bytes that follow. The registry maps class names to
//! handlers that consume exactly those bytes.
//!
//! # Example
//!
//! ```
//! use std::io::Read;
//! use amfcodec::{Amf3Codec, Result, Value, ValueCodec};
//!
//! let mut codec = Amf3Codec::new();
//! codec.register_external_handler(
//!     "com.example.Wrapper",
//!     |codec: &mut Amf3Codec, reader: &mut dyn Read| -> Result<Value> { codec.decode(reader) },
//! );
//! assert!(codec.has_external_handler("com.example.Wrapper"));
//! ```

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::sync::Arc;

use crate::core::{Result, Value};

use super::Amf3Codec;

/// Decoder for the body of one externalizable class.
///
/// The handler receives the codec session so it can decode nested values
/// against the same reference tables.
pub trait ExternalHandler: Send + Sync {
    /// Consume the externalized body and return the decoded value.
    fn decode(&self, codec: &mut Amf3Codec, reader: &mut dyn Read) -> Result<Value>;
}

impl<F> ExternalHandler for F
where
    F: Fn(&mut Amf3Codec, &mut dyn Read) -> Result<Value> + Send + Sync,
{
    fn decode(&self, codec: &mut Amf3Codec, reader: &mut dyn Read) -> Result<Value> {
        self(codec, reader)
    }
}

/// Registry of external handlers keyed by class name.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<String, Arc<dyn ExternalHandler>>,
}

impl HandlerRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a handler, replacing any previous one for `class_name`.
    pub fn register<H>(&mut self, class_name: impl Into<String>, handler: H)
    where
        H: ExternalHandler + 'static,
    {
        self.handlers.insert(class_name.into(), Arc::new(handler));
    }

    /// Unregister a handler.
    ///
    /// # Returns
    ///
    /// `true` if a handler was removed, `false` if none was registered
    pub fn unregister(&mut self, class_name: &str) -> bool {
        self.handlers.remove(class_name).is_some()
    }

    /// Check if a class name has a handler.
    pub fn contains(&self, class_name: &str) -> bool {
        self.handlers.contains_key(class_name)
    }

    /// Get the handler for a class name.
    ///
    /// The handler is shared, so it stays usable while the codec that owns
    /// the registry is borrowed mutably.
    pub fn get(&self, class_name: &str) -> Option<Arc<dyn ExternalHandler>> {
        self.handlers.get(class_name).cloned()
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlers.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("class_names", &self.class_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullHandler;

    impl ExternalHandler for NullHandler {
        fn decode(&self, _codec: &mut Amf3Codec, _reader: &mut dyn Read) -> Result<Value> {
            Ok(Value::Null)
        }
    }

    #[test]
    fn test_register_and_unregister() {
        let mut registry = HandlerRegistry::new();
        assert!(registry.is_empty());

        registry.register("b.Second", NullHandler);
        registry.register("a.First", |_: &mut Amf3Codec, _: &mut dyn Read| -> Result<Value> {
            Ok(Value::Undefined)
        });

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("a.First"));
        assert_eq!(registry.class_names(), vec!["a.First", "b.Second"]);

        assert!(registry.unregister("a.First"));
        assert!(!registry.unregister("a.First"));
        assert!(registry.get("a.First").is_none());
    }

    #[test]
    fn test_handler_invocation() {
        let mut registry = HandlerRegistry::new();
        registry.register("x.Y", NullHandler);

        let handler = registry.get("x.Y").unwrap();
        let mut codec = Amf3Codec::new();
        let mut input: &[u8] = &[];
        assert_eq!(handler.decode(&mut codec, &mut input).unwrap(), Value::Null);
    }

    #[test]
    fn test_debug_lists_names() {
        let mut registry = HandlerRegistry::new();
        registry.register("x.Y", NullHandler);
        assert_eq!(
            format!("{registry:?}"),
            "HandlerRegistry { class_names: [\"x.Y\"] }"
        );
    }
}
