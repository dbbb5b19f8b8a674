// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF value type system.
//!
//! Provides the closed value representation shared by the AMF0 and AMF3
//! codecs. All variants are serde-serializable.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Largest value representable by the AMF3 29-bit integer.
pub const U29_MAX: u32 = 0x1FFF_FFFF;

/// String-keyed property map.
///
/// Key order is irrelevant on the wire; a sorted map keeps encoding
/// deterministic.
pub type Object = BTreeMap<String, Value>;

/// An object tagged with a class name.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TypedObject {
    /// Class name (empty for anonymous objects)
    pub type_name: String,
    /// Property map
    pub object: Object,
}

impl TypedObject {
    /// Create a typed object from a class name and properties.
    pub fn new(type_name: impl Into<String>, object: Object) -> Self {
        Self {
            type_name: type_name.into(),
            object,
        }
    }
}

/// AMF3 array: an associative part plus a dense, ordered part.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DenseArray {
    /// Named entries
    pub associative: Object,
    /// Densely indexed entries
    pub dense: Vec<Value>,
}

impl DenseArray {
    /// Create an array with only a dense part.
    pub fn from_dense(dense: Vec<Value>) -> Self {
        Self {
            associative: Object::new(),
            dense,
        }
    }
}

/// A value that can be carried by either wire format.
///
/// Host data is converted into a `Value` before encoding; the encoders
/// match exhaustively over the variants.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    Undefined,
    Null,
    Boolean(bool),
    Number(f64),

    /// 29-bit unsigned integer (AMF3 wire form only)
    Integer(u32),

    /// Text. A decode with the lossy UTF-8 policy replaces invalid
    /// sequences, so re-encoding may not reproduce the wire bytes.
    String(String),

    /// UTC instant, whole seconds after a decode
    Date(DateTime<Utc>),

    ByteArray(Vec<u8>),
    Array(Vec<Value>),
    Object(Object),
    TypedObject(TypedObject),
    DenseArray(DenseArray),
}

impl Value {
    /// Build a byte array value.
    pub fn bytes(data: impl Into<Vec<u8>>) -> Self {
        Value::ByteArray(data.into())
    }

    /// Get the type name of this value as a string.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Undefined => "undefined",
            Value::Null => "null",
            Value::Boolean(_) => "boolean",
            Value::Number(_) => "number",
            Value::Integer(_) => "integer",
            Value::String(_) => "string",
            Value::Date(_) => "date",
            Value::ByteArray(_) => "bytearray",
            Value::Array(_) => "array",
            Value::Object(_) => "object",
            Value::TypedObject(_) => "typed-object",
            Value::DenseArray(_) => "dense-array",
        }
    }

    /// Check if this value is null.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Check if this value is null or undefined.
    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Null | Value::Undefined)
    }

    /// Check if this value occupies a slot in a composite reference table.
    pub fn is_composite(&self) -> bool {
        matches!(
            self,
            Value::Array(_)
                | Value::Object(_)
                | Value::TypedObject(_)
                | Value::DenseArray(_)
                | Value::Date(_)
                | Value::ByteArray(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Try to convert this value to f64 (numbers and integers).
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(v) => Some(*v),
            Value::Integer(v) => Some(f64::from(*v)),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Value::ByteArray(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    /// Try to get the property map of an object or typed object.
    pub fn as_object(&self) -> Option<&Object> {
        match self {
            Value::Object(o) => Some(o),
            Value::TypedObject(t) => Some(&t.object),
            _ => None,
        }
    }

    /// Try to get the ordered elements of an array or a dense array.
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(a) => Some(a),
            Value::DenseArray(a) => Some(&a.dense),
            _ => None,
        }
    }

    /// Look up a property on an object, typed object or dense array.
    pub fn get(&self, key: &str) -> Option<&Value> {
        match self {
            Value::DenseArray(a) => a.associative.get(key),
            _ => self.as_object()?.get(key),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => write!(f, "undefined"),
            Value::Null => write!(f, "null"),
            Value::Boolean(v) => write!(f, "{v}"),
            Value::Number(v) => write!(f, "{v}"),
            Value::Integer(v) => write!(f, "{v}"),
            Value::String(v) => write!(f, "\"{v}\""),
            Value::Date(v) => write!(f, "Date({})", v.to_rfc3339()),
            Value::ByteArray(v) => write!(f, "<{} bytes>", v.len()),
            Value::Array(v) => write!(f, "[{} elements]", v.len()),
            Value::Object(v) => write!(f, "{{{} properties}}", v.len()),
            Value::TypedObject(v) => write!(f, "{}{{{} properties}}", v.type_name, v.object.len()),
            Value::DenseArray(v) => write!(
                f,
                "[{} elements, {} named]",
                v.dense.len(),
                v.associative.len()
            ),
        }
    }
}

// =============================================================================
// Host conversions
// =============================================================================

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Boolean(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Number(v)
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Number(f64::from(v))
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        if v <= U29_MAX {
            Value::Integer(v)
        } else {
            Value::Number(f64::from(v))
        }
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match u32::try_from(v) {
            Ok(v) => Value::from(v),
            Err(_) => Value::Number(v as f64),
        }
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::from(i64::from(v))
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        match u32::try_from(v) {
            Ok(v) => Value::from(v),
            Err(_) => Value::Number(v as f64),
        }
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::String(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::String(v)
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<Vec<Value>> for Value {
    fn from(v: Vec<Value>) -> Self {
        Value::Array(v)
    }
}

impl From<Object> for Value {
    fn from(v: Object) -> Self {
        Value::Object(v)
    }
}

impl From<TypedObject> for Value {
    fn from(v: TypedObject) -> Self {
        Value::TypedObject(v)
    }
}

impl From<DenseArray> for Value {
    fn from(v: DenseArray) -> Self {
        Value::DenseArray(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}
