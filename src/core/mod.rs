// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Core types used throughout amfcodec.
//!
//! This module provides the foundational types for the library:
//! - [`AmfError`] - Error taxonomy shared by both codecs
//! - [`Value`] - Unified value representation
//! - [`Format`] - Wire format identifier

pub mod error;
pub mod value;

pub use error::{AmfError, BatchDecodeError, Result, TableKind};
pub use value::{DenseArray, Object, TypedObject, Value, U29_MAX};

/// Wire format identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    /// Legacy format (AMF0)
    Amf0,
    /// Successor format (AMF3)
    Amf3,
}

/// Error returned when parsing a `Format` from string fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseFormatError {
    _private: (),
}

impl std::fmt::Display for ParseFormatError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid format name, expected 'amf0' or 'amf3'")
    }
}

impl std::error::Error for ParseFormatError {}

impl std::str::FromStr for Format {
    type Err = ParseFormatError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "amf0" | "0" => Ok(Format::Amf0),
            "amf3" | "3" => Ok(Format::Amf3),
            _ => Err(ParseFormatError { _private: () }),
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Format {
    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Format::Amf0 => "amf0",
            Format::Amf3 => "amf3",
        }
    }
}
