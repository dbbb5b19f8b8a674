// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core error types for amfcodec.
//!
//! Every failure surfaces exactly where the violated expectation occurs:
//! - Stream failures (short reads and writes)
//! - Framing violations (unknown markers, malformed termination)
//! - Back-reference indices outside the current table
//! - Values outside the 29-bit integer domain
//! - Values or external types with no wire mapping

use std::fmt;

use thiserror::Error;

use super::value::Value;

/// Identifies which reference table a failed lookup targeted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TableKind {
    /// AMF0 composite table (objects, typed objects, arrays).
    Amf0Object,
    /// AMF3 string table.
    String,
    /// AMF3 composite value table.
    Object,
    /// AMF3 trait table.
    Trait,
}

impl TableKind {
    /// Short name used in messages and log fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            TableKind::Amf0Object => "amf0-object",
            TableKind::String => "string",
            TableKind::Object => "object",
            TableKind::Trait => "trait",
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors that can occur while encoding or decoding AMF data.
#[derive(Debug, Error)]
pub enum AmfError {
    /// The underlying reader or writer failed, including short reads.
    #[error("stream error: {0}")]
    Stream(#[from] std::io::Error),

    /// Unexpected, reserved or unsupported marker, or malformed framing.
    #[error("framing error in {context}: {message}")]
    Framing {
        /// What was being decoded
        context: String,
        /// Error message
        message: String,
    },

    /// Back-reference index at or beyond the current table length.
    #[error("{table} reference {index} out of range (table length {len})")]
    Reference {
        /// Table the index was resolved against
        table: TableKind,
        /// Index read from the stream
        index: usize,
        /// Table length at the point of resolution
        len: usize,
    },

    /// Variable-length integer outside the 29-bit domain.
    #[error("value {value:#x} exceeds the 29-bit integer range")]
    Range {
        /// Offending value
        value: u64,
    },

    /// No wire mapping for a value, or no handler for an external type.
    #[error("type error: {message}")]
    Type {
        /// Error message
        message: String,
    },
}

impl AmfError {
    /// Create a framing error.
    pub fn framing(context: impl Into<String>, message: impl Into<String>) -> Self {
        AmfError::Framing {
            context: context.into(),
            message: message.into(),
        }
    }

    /// Create a framing error for an unknown or reserved marker byte.
    pub fn unexpected_marker(context: impl Into<String>, marker: u8) -> Self {
        AmfError::Framing {
            context: context.into(),
            message: format!("unexpected marker {marker:#04x}"),
        }
    }

    /// Create a reference error.
    pub fn reference(table: TableKind, index: usize, len: usize) -> Self {
        AmfError::Reference { table, index, len }
    }

    /// Create a range error.
    pub fn range(value: impl Into<u64>) -> Self {
        AmfError::Range {
            value: value.into(),
        }
    }

    /// Create a type error.
    pub fn type_error(message: impl Into<String>) -> Self {
        AmfError::Type {
            message: message.into(),
        }
    }

    /// Create a type error for a value that has no wire form in `format`.
    pub fn unencodable(format: &str, value: &Value) -> Self {
        AmfError::Type {
            message: format!("{format} has no wire mapping for {}", value.type_name()),
        }
    }

    /// Whether this is a clean or short end of the underlying stream.
    pub fn is_eof(&self) -> bool {
        matches!(self, AmfError::Stream(e) if e.kind() == std::io::ErrorKind::UnexpectedEof)
    }

    /// Get structured fields for logging.
    pub fn log_fields(&self) -> Vec<(&'static str, String)> {
        match self {
            AmfError::Stream(err) => vec![
                ("kind", format!("{:?}", err.kind())),
                ("message", err.to_string()),
            ],
            AmfError::Framing { context, message } => {
                vec![("context", context.clone()), ("message", message.clone())]
            }
            AmfError::Reference { table, index, len } => vec![
                ("table", table.to_string()),
                ("index", index.to_string()),
                ("len", len.to_string()),
            ],
            AmfError::Range { value } => vec![("value", value.to_string())],
            AmfError::Type { message } => vec![("message", message.clone())],
        }
    }
}

/// Result type for amfcodec operations.
pub type Result<T> = std::result::Result<T, AmfError>;

/// Batch decode stopped on an error other than a clean end of stream.
///
/// Values decoded before the failure are kept in `decoded`.
#[derive(Debug, Error)]
#[error("batch decode stopped after {} value(s): {source}", decoded.len())]
pub struct BatchDecodeError {
    /// Values decoded before the failure
    pub decoded: Vec<Value>,
    /// The error that stopped the batch
    #[source]
    pub source: AmfError,
}
