// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF0 encoder.

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};
use chrono::{DateTime, Utc};

use crate::core::{AmfError, Object, Result, Value};
use crate::encoding::codec::ValueCodec;
use crate::encoding::date::date_to_millis;
use crate::encoding::stream::{write_byte, write_bytes};

use super::marker::*;
use super::Amf0Codec;

impl Amf0Codec {
    pub(super) fn encode_value<W: Write + ?Sized>(&mut self, w: &mut W, value: &Value) -> Result<usize> {
        match value {
            Value::Object(object) => {
                self.encoded.push(value.clone());
                let n = write_byte(w, OBJECT)?;
                Ok(n + self.write_properties(w, object)?)
            }
            Value::TypedObject(typed) => {
                self.encoded.push(value.clone());
                let mut n = write_byte(w, TYPED_OBJECT)?;
                n += write_string(w, &typed.type_name)?;
                Ok(n + self.write_properties(w, &typed.object)?)
            }
            Value::Date(date) => encode_date(w, date),
            Value::Undefined => self.encode_undefined(w),
            Value::Null => write_byte(w, NULL),
            Value::Number(v) => encode_number(w, *v),
            Value::Integer(v) => encode_number(w, f64::from(*v)),
            Value::Boolean(b) => Ok(write_byte(w, BOOLEAN)? + write_byte(w, u8::from(*b))?),
            Value::String(s) if s.len() <= usize::from(u16::MAX) => {
                Ok(write_byte(w, STRING)? + write_string(w, s)?)
            }
            Value::String(s) => Ok(write_byte(w, LONG_STRING)? + write_long_string(w, s)?),
            Value::Array(items) => {
                self.encoded.push(value.clone());
                let mut n = write_byte(w, STRICT_ARRAY)?;
                n += write_u32_len(w, items.len(), "amf0 strict array")?;
                for item in items {
                    n += self.encode(w, item)?;
                }
                Ok(n)
            }
            Value::ByteArray(_) | Value::DenseArray(_) => Err(AmfError::unencodable("amf0", value)),
        }
    }

    /// Write the avmplus marker and encode `value` with the composed AMF3
    /// session.
    pub fn encode_with_amf3<W: Write + ?Sized>(&mut self, w: &mut W, value: &Value) -> Result<usize> {
        let n = write_byte(w, AVMPLUS)?;
        Ok(n + self.amf3.encode(w, value)?)
    }

    /// Encode `xml` as an xml document (long string body).
    pub fn encode_xml_document<W: Write + ?Sized>(&mut self, w: &mut W, xml: &str) -> Result<usize> {
        Ok(write_byte(w, XML_DOCUMENT)? + write_long_string(w, xml)?)
    }

    /// Encode a reference to a composite the reader has already seen.
    pub fn encode_reference<W: Write + ?Sized>(&mut self, w: &mut W, index: u16) -> Result<usize> {
        let n = write_byte(w, REFERENCE)?;
        w.write_u16::<BigEndian>(index)?;
        Ok(n + 2)
    }

    /// Encode `object` as an ECMA array.
    pub fn encode_ecma_array<W: Write + ?Sized>(&mut self, w: &mut W, object: &Object) -> Result<usize> {
        self.encoded.push(Value::Object(object.clone()));
        let mut n = write_byte(w, ECMA_ARRAY)?;
        n += write_u32_len(w, object.len(), "amf0 ecma array")?;
        Ok(n + self.write_properties(w, object)?)
    }

    pub fn encode_undefined<W: Write + ?Sized>(&mut self, w: &mut W) -> Result<usize> {
        write_byte(w, UNDEFINED)
    }

    pub fn encode_unsupported<W: Write + ?Sized>(&mut self, w: &mut W) -> Result<usize> {
        write_byte(w, UNSUPPORTED)
    }

    /// Write key/value pairs in key order, then the empty key and end marker.
    fn write_properties<W: Write + ?Sized>(&mut self, w: &mut W, object: &Object) -> Result<usize> {
        let mut n = 0;
        for (key, value) in object {
            if key.is_empty() {
                return Err(AmfError::type_error(
                    "amf0 cannot encode an empty property name",
                ));
            }
            n += write_string(w, key)?;
            n += self.encode(w, value)?;
        }
        n += write_string(w, "")?;
        Ok(n + write_byte(w, OBJECT_END)?)
    }
}

/// Write a u16-length string body.
fn write_string<W: Write + ?Sized>(w: &mut W, s: &str) -> Result<usize> {
    let len = u16::try_from(s.len()).map_err(|_| {
        AmfError::type_error(format!(
            "amf0 short string of {} bytes exceeds 65535",
            s.len()
        ))
    })?;
    w.write_u16::<BigEndian>(len)?;
    Ok(2 + write_bytes(w, s.as_bytes())?)
}

/// Write a u32-length string body.
fn write_long_string<W: Write + ?Sized>(w: &mut W, s: &str) -> Result<usize> {
    let n = write_u32_len(w, s.len(), "amf0 long string")?;
    Ok(n + write_bytes(w, s.as_bytes())?)
}

fn write_u32_len<W: Write + ?Sized>(w: &mut W, len: usize, what: &str) -> Result<usize> {
    let len = u32::try_from(len)
        .map_err(|_| AmfError::type_error(format!("{what} length {len} exceeds u32")))?;
    w.write_u32::<BigEndian>(len)?;
    Ok(4)
}

fn encode_number<W: Write + ?Sized>(w: &mut W, v: f64) -> Result<usize> {
    let n = write_byte(w, NUMBER)?;
    w.write_f64::<BigEndian>(v)?;
    Ok(n + 8)
}

fn encode_date<W: Write + ?Sized>(w: &mut W, date: &DateTime<Utc>) -> Result<usize> {
    let n = write_byte(w, DATE)?;
    w.write_f64::<BigEndian>(date_to_millis(date))?;
    w.write_i16::<BigEndian>(0)?;
    Ok(n + 10)
}
