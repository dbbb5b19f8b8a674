// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF3 encoder.
//!
//! Everything is written inline: strings never use the string table and
//! objects always carry a full trait with sealed names in key order.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use chrono::{DateTime, Utc};

use crate::core::{AmfError, Object, Result, Value, U29_MAX};
use crate::encoding::codec::ValueCodec;
use crate::encoding::date::date_to_millis;
use crate::encoding::stream::{write_byte, write_bytes};

use super::marker::*;
use super::u29::{write_literal_len, write_u29};
use super::Amf3Codec;

/// Inline object, inline trait.
const INLINE_TRAIT: u32 = 0x03;
/// Dynamic flag within an inline trait header.
const DYNAMIC_TRAIT: u32 = 0x08;
/// Sealed-count field offset within an inline trait header.
const SEALED_COUNT_SHIFT: u32 = 4;

impl Amf3Codec {
    pub(super) fn encode_value<W: Write + ?Sized>(&mut self, w: &mut W, value: &Value) -> Result<usize> {
        match value {
            Value::Date(date) => encode_date(w, date),
            Value::Object(object) => self.encode_typed_object(w, "", object),
            Value::TypedObject(typed) => self.encode_typed_object(w, &typed.type_name, &typed.object),
            Value::ByteArray(data) => encode_byte_array(w, data),
            Value::Undefined => write_byte(w, UNDEFINED),
            Value::Null => write_byte(w, NULL),
            Value::Boolean(true) => write_byte(w, TRUE),
            Value::Boolean(false) => write_byte(w, FALSE),
            Value::Integer(v) if *v <= U29_MAX => Ok(write_byte(w, INTEGER)? + write_u29(w, *v)?),
            Value::Integer(v) => encode_double(w, f64::from(*v)),
            Value::Number(v) => encode_double(w, *v),
            Value::String(s) => Ok(write_byte(w, STRING)? + write_string(w, s)?),
            Value::Array(items) => self.encode_array(w, &Object::new(), items),
            Value::DenseArray(array) => self.encode_array(w, &array.associative, &array.dense),
        }
    }

    fn encode_array<W: Write + ?Sized>(
        &mut self,
        w: &mut W,
        associative: &Object,
        dense: &[Value],
    ) -> Result<usize> {
        let mut n = write_byte(w, ARRAY)?;
        n += write_literal_len(w, dense.len())?;
        n += self.write_pairs(w, associative)?;
        for item in dense {
            n += self.encode(w, item)?;
        }
        Ok(n)
    }

    fn encode_typed_object<W: Write + ?Sized>(
        &mut self,
        w: &mut W,
        class_name: &str,
        object: &Object,
    ) -> Result<usize> {
        let mut n = write_byte(w, OBJECT)?;
        n += write_u29(w, trait_header(INLINE_TRAIT, object.len())?)?;
        n += write_string(w, class_name)?;
        for key in object.keys() {
            n += write_string(w, key)?;
        }
        for value in object.values() {
            n += self.encode(w, value)?;
        }
        Ok(n)
    }

    /// Encode a dynamic object.
    ///
    /// `sealed` members are described by the trait and written in key order;
    /// `dynamic` members follow as name/value pairs closed by one empty name.
    ///
    /// # Example
    ///
    /// ```
    /// use amfcodec::{Amf3Codec, Object, Value, ValueCodec};
    ///
    /// let mut sealed = Object::new();
    /// sealed.insert("foo".into(), Value::from("bar"));
    /// let mut dynamic = Object::new();
    /// dynamic.insert("baz".into(), Value::Null);
    ///
    /// let mut codec = Amf3Codec::new();
    /// let mut buf = Vec::new();
    /// codec.encode_dynamic_object(&mut buf, "", &sealed, &dynamic)?;
    ///
    /// let value = Amf3Codec::new().decode(&mut buf.as_slice())?;
    /// assert_eq!(value.get("foo"), Some(&Value::from("bar")));
    /// assert_eq!(value.get("baz"), Some(&Value::Null));
    /// # Ok::<(), amfcodec::AmfError>(())
    /// ```
    pub fn encode_dynamic_object<W: Write + ?Sized>(
        &mut self,
        w: &mut W,
        class_name: &str,
        sealed: &Object,
        dynamic: &Object,
    ) -> Result<usize> {
        let mut n = write_byte(w, OBJECT)?;
        n += write_u29(w, trait_header(INLINE_TRAIT | DYNAMIC_TRAIT, sealed.len())?)?;
        n += write_string(w, class_name)?;
        for key in sealed.keys() {
            n += write_string(w, key)?;
        }
        for value in sealed.values() {
            n += self.encode(w, value)?;
        }
        n += self.write_pairs(w, dynamic)?;
        Ok(n)
    }

    /// Write name/value pairs followed by the empty-name terminator.
    fn write_pairs<W: Write + ?Sized>(&mut self, w: &mut W, pairs: &Object) -> Result<usize> {
        let mut n = 0;
        for (key, value) in pairs {
            if key.is_empty() {
                return Err(AmfError::type_error(
                    "amf3 cannot encode an empty property name outside a trait",
                ));
            }
            n += write_string(w, key)?;
            n += self.encode(w, value)?;
        }
        n += write_string(w, "")?;
        Ok(n)
    }
}

/// Build an inline trait header for `count` sealed members.
fn trait_header(flags: u32, count: usize) -> Result<u32> {
    let count = u32::try_from(count)
        .ok()
        .filter(|c| *c <= U29_MAX >> SEALED_COUNT_SHIFT)
        .ok_or_else(|| AmfError::range(count as u64))?;
    Ok(flags | (count << SEALED_COUNT_SHIFT))
}

/// Write a string body (no marker) as an inline literal.
fn write_string<W: Write + ?Sized>(w: &mut W, s: &str) -> Result<usize> {
    let n = write_literal_len(w, s.len())?;
    Ok(n + write_bytes(w, s.as_bytes())?)
}

fn encode_double<W: Write + ?Sized>(w: &mut W, v: f64) -> Result<usize> {
    let n = write_byte(w, DOUBLE)?;
    w.write_f64::<BigEndian>(v)?;
    Ok(n + 8)
}

fn encode_date<W: Write + ?Sized>(w: &mut W, date: &DateTime<Utc>) -> Result<usize> {
    let n = write_byte(w, DATE)? + write_u29(w, 0x01)?;
    w.write_f64::<BigEndian>(date_to_millis(date))?;
    Ok(n + 8)
}

fn encode_byte_array<W: Write + ?Sized>(w: &mut W, data: &[u8]) -> Result<usize> {
    let n = write_byte(w, BYTE_ARRAY)? + write_literal_len(w, data.len())?;
    Ok(n + write_bytes(w, data)?)
}
