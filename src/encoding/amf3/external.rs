// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Built-in externalizable types.
//!
//! The messaging envelopes write their fields in layers. Each layer starts
//! with one or more flag bytes; a flag byte with bit 7 set is followed by
//! another. Within flag byte `i`, bit `p` says whether the `p`th field of
//! that layer's group is present. Bits beyond the known fields (up to bit 6)
//! mark values the decoder has no name for; they are kept as `extra_{i}_{p}`
//! so the stream stays aligned.

use std::io::Read;

use tracing::debug;

use crate::core::{Object, Result, Value};
use crate::encoding::codec::ValueCodec;
use crate::encoding::stream::read_byte;

use super::registry::ExternalHandler;
use super::Amf3Codec;

/// Class alias of the async message envelope.
pub const ASYNC_MESSAGE: &str = "DSA";

/// Class alias of the acknowledge message envelope.
pub const ACKNOWLEDGE_MESSAGE: &str = "DSK";

/// Class name of the collection wrapper whose body is a single value.
pub const ARRAY_COLLECTION: &str = "flex.messaging.io.ArrayCollection";

/// Highest flag bit that can announce a field; bit 7 chains flag bytes.
const LAST_FIELD_BIT: usize = 6;

const ABSTRACT_MESSAGE_FIELDS: &[&[&str]] = &[
    &[
        "body",
        "clientId",
        "destination",
        "headers",
        "messageId",
        "timeStamp",
        "timeToLive",
    ],
    &["clientIdBytes", "messageIdBytes"],
];

const ASYNC_MESSAGE_FIELDS: &[&[&str]] = &[&["correlationId", "correlationIdBytes"]];

/// Read flag bytes until one has bit 7 clear.
pub fn read_flag_groups<R: Read + ?Sized>(r: &mut R) -> Result<Vec<u8>> {
    let mut flags = Vec::new();
    loop {
        let byte = read_byte(r)?;
        flags.push(byte);
        if byte & 0x80 == 0 {
            return Ok(flags);
        }
    }
}

/// Decode one layer of optional fields into `object`.
///
/// `groups[i]` names the fields announced by flag byte `i`; flag bytes
/// without a group decode only `extra_*` values.
pub fn decode_flagged_fields<R: Read + ?Sized>(
    codec: &mut Amf3Codec,
    r: &mut R,
    object: &mut Object,
    groups: &[&[&str]],
) -> Result<()> {
    let flags = read_flag_groups(r)?;
    let no_fields: &[&str] = &[];

    for (i, &byte) in flags.iter().enumerate() {
        let names = groups.get(i).copied().unwrap_or(no_fields);

        for (bit, name) in names.iter().enumerate().take(LAST_FIELD_BIT + 1) {
            if byte & (1u8 << bit) != 0 {
                let value = codec.decode(r)?;
                object.insert((*name).to_string(), value);
            }
        }

        for bit in names.len()..=LAST_FIELD_BIT {
            if byte & (1u8 << bit) != 0 {
                let key = format!("extra_{i}_{bit}");
                debug!(context = "amf3 envelope", key = %key, "Decoding unnamed envelope field");
                let value = codec.decode(r)?;
                object.insert(key, value);
            }
        }
    }

    Ok(())
}

fn decode_abstract_message<R: Read + ?Sized>(codec: &mut Amf3Codec, r: &mut R) -> Result<Object> {
    let mut object = Object::new();
    decode_flagged_fields(codec, r, &mut object, ABSTRACT_MESSAGE_FIELDS)?;
    Ok(object)
}

fn decode_async_fields<R: Read + ?Sized>(codec: &mut Amf3Codec, r: &mut R) -> Result<Object> {
    let mut object = decode_abstract_message(codec, r)?;
    decode_flagged_fields(codec, r, &mut object, ASYNC_MESSAGE_FIELDS)?;
    Ok(object)
}

/// Decode the body of a `DSA` envelope.
pub fn decode_async_message<R: Read + ?Sized>(codec: &mut Amf3Codec, r: &mut R) -> Result<Value> {
    decode_async_fields(codec, r).map(Value::Object)
}

/// Decode the body of a `DSK` envelope.
pub fn decode_acknowledge_message<R: Read + ?Sized>(
    codec: &mut Amf3Codec,
    r: &mut R,
) -> Result<Value> {
    let mut object = decode_async_fields(codec, r)?;
    decode_flagged_fields(codec, r, &mut object, &[])?;
    Ok(Value::Object(object))
}

/// Handler for `flex.messaging.io.ArrayCollection`: the body is one value.
///
/// The collection takes a second composite slot after its body, so later
/// object references line up with peers that count the container twice.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayCollectionHandler;

impl ExternalHandler for ArrayCollectionHandler {
    fn decode(&self, codec: &mut Amf3Codec, reader: &mut dyn Read) -> Result<Value> {
        let value = codec.decode(reader)?;
        codec.push_object_reference(value.clone());
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_flag_groups() {
        let mut r: &[u8] = &[0x81, 0x80, 0x02, 0xFF];
        assert_eq!(read_flag_groups(&mut r).unwrap(), vec![0x81, 0x80, 0x02]);
        assert_eq!(r, &[0xFF]);
    }

    #[test]
    fn test_named_and_extra_fields() {
        let mut codec = Amf3Codec::new();
        let mut object = Object::new();
        // bit 0 names "a", bit 2 has no name
        let mut r: &[u8] = &[0x05, 0x03, 0x02];
        let groups: &[&[&str]] = &[&["a"]];
        decode_flagged_fields(&mut codec, &mut r, &mut object, groups).unwrap();
        assert_eq!(object.get("a"), Some(&Value::Boolean(true)));
        assert_eq!(object.get("extra_0_2"), Some(&Value::Boolean(false)));
        assert_eq!(object.len(), 2);
    }

    #[test]
    fn test_positions_are_tested_individually() {
        let mut codec = Amf3Codec::new();
        let mut object = Object::new();
        // only bit 1 set: "b" present, "a" absent
        let mut r: &[u8] = &[0x02, 0x01];
        let groups: &[&[&str]] = &[&["a", "b"]];
        decode_flagged_fields(&mut codec, &mut r, &mut object, groups).unwrap();
        assert_eq!(object.get("b"), Some(&Value::Null));
        assert!(object.get("a").is_none());
    }

    #[test]
    fn test_array_collection_handler() {
        let mut codec = Amf3Codec::new();
        let mut r: &[u8] = &[0x04, 0x07];
        let value = ArrayCollectionHandler.decode(&mut codec, &mut r).unwrap();
        assert_eq!(value, Value::Integer(7));
        assert_eq!(codec.object_references(), &[Value::Integer(7)]);
    }
}
