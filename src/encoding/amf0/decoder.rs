// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF0 decoder.

use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};
use tracing::debug;

use crate::core::{AmfError, Object, Result, TypedObject, Value};
use crate::encoding::codec::ValueCodec;
use crate::encoding::date::date_from_millis;
use crate::encoding::stream::{bytes_to_string, expect_byte, prealloc, read_bytes};

use super::marker::*;
use super::Amf0Codec;

impl Amf0Codec {
    /// Decode the value introduced by `marker`.
    pub(super) fn decode_value<R: Read + ?Sized>(&mut self, marker: u8, r: &mut R) -> Result<Value> {
        match marker {
            NUMBER => Ok(Value::Number(r.read_f64::<BigEndian>()?)),
            BOOLEAN => Ok(Value::Boolean(r.read_u8()? == 1)),
            STRING => Ok(Value::String(self.read_string(r)?)),
            OBJECT => self.decode_object(r).map(Value::Object),
            NULL => Ok(Value::Null),
            UNDEFINED | UNSUPPORTED => Ok(Value::Undefined),
            REFERENCE => {
                let index = r.read_u16::<BigEndian>()?;
                Ok(self.references.get(usize::from(index))?.clone())
            }
            ECMA_ARRAY => {
                // The count is advisory; the body ends with the object terminator.
                let _count = r.read_u32::<BigEndian>()?;
                self.decode_object(r).map(Value::Object)
            }
            STRICT_ARRAY => self.decode_strict_array(r),
            DATE => {
                let millis = r.read_f64::<BigEndian>()?;
                let _time_zone = r.read_i16::<BigEndian>()?;
                Ok(Value::Date(date_from_millis(millis, "amf0 date")?))
            }
            LONG_STRING | XML_DOCUMENT => Ok(Value::String(self.read_long_string(r)?)),
            TYPED_OBJECT => self.decode_typed_object(r),
            AVMPLUS => {
                debug!(context = "amf0", "Switching to AMF3 for the next value");
                self.amf3.decode(r)
            }
            MOVIECLIP | RECORDSET => Err(AmfError::framing(
                "amf0",
                format!("reserved marker {marker:#04x}"),
            )),
            _ => Err(AmfError::unexpected_marker("amf0", marker)),
        }
    }

    /// Read a u16-length string body.
    fn read_string<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<String> {
        let len = r.read_u16::<BigEndian>()?;
        let buf = read_bytes(r, usize::from(len))?;
        bytes_to_string(buf, self.config.utf8, "amf0 string")
    }

    /// Read a u32-length string body.
    fn read_long_string<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<String> {
        let len = r.read_u32::<BigEndian>()?;
        let buf = read_bytes(r, len as usize)?;
        bytes_to_string(buf, self.config.utf8, "amf0 long string")
    }

    fn decode_object<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Object> {
        let slot = self.references.push(Value::Object(Object::new()));
        let object = self.read_properties(r)?;
        self.references.replace(slot, Value::Object(object.clone()))?;
        Ok(object)
    }

    fn decode_typed_object<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Value> {
        let slot = self
            .references
            .push(Value::TypedObject(TypedObject::default()));
        let type_name = self.read_string(r)?;
        let object = self.read_properties(r)?;
        let value = Value::TypedObject(TypedObject { type_name, object });
        self.references.replace(slot, value.clone())?;
        Ok(value)
    }

    fn decode_strict_array<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Value> {
        let count = r.read_u32::<BigEndian>()? as usize;
        let slot = self.references.push(Value::Array(Vec::new()));

        let mut items = Vec::with_capacity(prealloc(count));
        for _ in 0..count {
            items.push(self.decode(r)?);
        }

        let value = Value::Array(items);
        self.references.replace(slot, value.clone())?;
        Ok(value)
    }

    /// Read key/value pairs up to the empty key and end marker.
    fn read_properties<R: Read + ?Sized>(&mut self, r: &mut R) -> Result<Object> {
        let mut object = Object::new();
        loop {
            let key = self.read_string(r)?;
            if key.is_empty() {
                expect_byte(r, OBJECT_END, "amf0 object")?;
                return Ok(object);
            }
            let value = self.decode(r)?;
            object.insert(key, value);
        }
    }
}
