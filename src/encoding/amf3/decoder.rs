// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF3 decoder.

use std::io::Read;
use std::sync::Arc;

use byteorder::{BigEndian, ReadBytesExt};
use tracing::{debug, trace};

use crate::core::{AmfError, DenseArray, Object, Result, Value};
use crate::encoding::codec::ValueCodec;
use crate::encoding::date::date_from_millis;
use crate::encoding::stream::{bytes_to_string, prealloc, read_bytes};

use super::external::{self, ACKNOWLEDGE_MESSAGE, ASYNC_MESSAGE};
use super::marker::*;
use super::u29::{read_u29, read_u29_header, U29Header};
use super::{Amf3Codec, ObjectTraits};

impl Amf3Codec {
    /// Decode the value introduced by `marker`.
    pub(super) fn decode_value<R: Read + ?Sized>(&mut self, marker: u8, r: &mut R) -> Result<Value> {
        match marker {
            UNDEFINED => Ok(Value::Undefined),
            NULL => Ok(Value::Null),
            FALSE => Ok(Value::Boolean(false)),
            TRUE => Ok(Value::Boolean(true)),
            INTEGER => Ok(Value::Integer(read_u29(r)?)),
            DOUBLE => Ok(Value::Number(r.read_f64::<BigEndian>()?)),
            STRING => Ok(Value::String(self.read_string(r)?)),
            XML_DOCUMENT | XML => self.decode_xml(r),
            DATE => self.decode_date(r),
            ARRAY => self.decode_array(r),
            OBJECT => self.decode_object(r),
            BYTE_ARRAY => self.decode_byte_array(r),
            VECTOR_INT..=DICTIONARY => Err(AmfError::framing(
                "amf3",
                format!("unsupported marker {marker:#04x}"),
            )),
            _ => Err(AmfError::unexpected_marker("amf3", marker)),
        }
    }

    /// Read a string body (no marker) against the string table.
    ///
    /// External handlers use this for class-specific string fields.
    pub fn read_string<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<String> {
        match read_u29_header(r)? {
            U29Header::Reference(index) => Ok(self.strings.get(index as usize)?.clone()),
            U29Header::Literal(0) => Ok(String::new()),
            U29Header::Literal(len) => {
                let buf = read_bytes(r, len as usize)?;
                let s = bytes_to_string(buf, self.config.utf8, "amf3 string")?;
                self.strings.push(s.clone());
                Ok(s)
            }
        }
    }

    /// Resolve a composite-table reference, checking the kind of the entry.
    fn resolve_object(&self, index: u32, kind: &str, accept: fn(&Value) -> bool) -> Result<Value> {
        let value = self.objects.get(index as usize)?;
        if !accept(value) {
            return Err(AmfError::framing(
                format!("amf3 {kind} reference"),
                format!("entry {index} holds {}", value.type_name()),
            ));
        }
        Ok(value.clone())
    }

    fn decode_xml<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Value> {
        let len = match read_u29_header(r)? {
            U29Header::Reference(index) => {
                return self.resolve_object(index, "xml", |v| matches!(v, Value::String(_)));
            }
            U29Header::Literal(0) => return Ok(Value::String(String::new())),
            U29Header::Literal(len) => len,
        };

        let buf = read_bytes(r, len as usize)?;
        let value = Value::String(bytes_to_string(buf, self.config.utf8, "amf3 xml")?);
        self.objects.push(value.clone());
        Ok(value)
    }

    fn decode_date<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Value> {
        if let U29Header::Reference(index) = read_u29_header(r)? {
            return self.resolve_object(index, "date", |v| matches!(v, Value::Date(_)));
        }

        let millis = r.read_f64::<BigEndian>()?;
        let value = Value::Date(date_from_millis(millis, "amf3 date")?);
        self.objects.push(value.clone());
        Ok(value)
    }

    fn decode_byte_array<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Value> {
        let len = match read_u29_header(r)? {
            U29Header::Reference(index) => {
                return self.resolve_object(index, "bytearray", |v| {
                    matches!(v, Value::ByteArray(_))
                });
            }
            U29Header::Literal(0) => return Ok(Value::ByteArray(Vec::new())),
            U29Header::Literal(len) => len,
        };

        let value = Value::ByteArray(read_bytes(r, len as usize)?);
        self.objects.push(value.clone());
        Ok(value)
    }

    fn decode_array<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Value> {
        let count = match read_u29_header(r)? {
            U29Header::Reference(index) => {
                return self.resolve_object(index, "array", |v| matches!(v, Value::DenseArray(_)));
            }
            U29Header::Literal(count) => count as usize,
        };

        let slot = self.objects.push(Value::DenseArray(DenseArray::default()));

        let mut associative = Object::new();
        loop {
            let key = self.read_string(r)?;
            if key.is_empty() {
                break;
            }
            let value = self.decode(r)?;
            associative.insert(key, value);
        }

        let mut dense = Vec::with_capacity(prealloc(count));
        for _ in 0..count {
            dense.push(self.decode(r)?);
        }

        let value = Value::DenseArray(DenseArray { associative, dense });
        self.objects.replace(slot, value.clone())?;
        Ok(value)
    }

    fn decode_object<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Value> {
        let header = read_u29(r)?;
        if header & 0x01 == 0 {
            return Ok(self.objects.get((header >> 1) as usize)?.clone());
        }

        let header = header >> 1;
        let traits = if header & 0x01 == 0 {
            Arc::clone(self.traits.get((header >> 1) as usize)?)
        } else {
            let traits = Arc::new(self.read_traits(header, r)?);
            let index = self.traits.push(Arc::clone(&traits));
            trace!(
                index,
                class_name = %traits.class_name,
                sealed = traits.sealed.len(),
                dynamic = traits.dynamic,
                externalizable = traits.externalizable,
                "Registered object traits"
            );
            traits
        };

        let slot = self.objects.push(Value::Object(Object::new()));

        let value = if traits.externalizable {
            self.decode_external(&traits.class_name, r)?
        } else {
            let mut object = Object::new();
            for name in &traits.sealed {
                let value = self.decode(r)?;
                object.insert(name.clone(), value);
            }
            if traits.dynamic {
                loop {
                    let key = self.read_string(r)?;
                    if key.is_empty() {
                        break;
                    }
                    let value = self.decode(r)?;
                    object.insert(key, value);
                }
            }
            Value::Object(object)
        };

        self.objects.replace(slot, value.clone())?;
        Ok(value)
    }

    /// Read an inline trait; `header` has the object and trait flags shifted out
    /// down to the trait flag.
    fn read_traits<R: Read + ?Sized>(&mut self, header: u32, r: &mut R) -> Result<ObjectTraits> {
        let externalizable = header & 0x02 != 0;
        let dynamic = header & 0x04 != 0;
        let count = (header >> 3) as usize;

        let class_name = self.read_string(r)?;
        let mut sealed = Vec::with_capacity(prealloc(count));
        for _ in 0..count {
            sealed.push(self.read_string(r)?);
        }

        Ok(ObjectTraits {
            class_name,
            externalizable,
            dynamic,
            sealed,
        })
    }

    fn decode_external<R: Read + ?Sized>(&mut self, class_name: &str, r: &mut R) -> Result<Value> {
        match class_name {
            ASYNC_MESSAGE => external::decode_async_message(self, r),
            ACKNOWLEDGE_MESSAGE => external::decode_acknowledge_message(self, r),
            _ => {
                let handler = self.handlers.get(class_name).ok_or_else(|| {
                    AmfError::type_error(format!(
                        "no external handler registered for '{class_name}'"
                    ))
                })?;
                debug!(context = "amf3", class_name, "Dispatching externalizable object");
                let mut reader = &mut *r;
                handler.decode(self, &mut reader)
            }
        }
    }
}
