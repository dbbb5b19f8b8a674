// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! AMF0 codec integration tests.

mod common;

use amfcodec::{
    Amf0Codec, AmfError, CodecBuilder, Object, TableKind, TypedObject, Utf8Policy, Value,
    ValueCodec,
};
use chrono::{DateTime, TimeZone, Utc};
use proptest::prelude::*;

use common::{decode_amf0, encode_amf0, object, push_f64};

// ============================================================================
// Decoding
// ============================================================================

#[test]
fn test_decode_string() {
    let value = decode_amf0(&[0x02, 0x00, 0x03, b'f', b'o', b'o']);
    assert_eq!(value, Value::from("foo"));
}

#[test]
fn test_decode_object() {
    let data = [
        0x03, 0x00, 0x03, b'f', b'o', b'o', 0x02, 0x00, 0x03, b'b', b'a', b'r', 0x00, 0x00, 0x09,
    ];
    let value = decode_amf0(&data);
    assert_eq!(value, Value::Object(object([("foo", Value::from("bar"))])));
}

#[test]
fn test_decode_number() {
    let mut data = vec![0x00];
    push_f64(&mut data, 1.2);
    assert_eq!(decode_amf0(&data), Value::Number(1.2));
}

#[test]
fn test_decode_booleans_and_absence() {
    assert_eq!(decode_amf0(&[0x01, 0x01]), Value::Boolean(true));
    assert_eq!(decode_amf0(&[0x01, 0x00]), Value::Boolean(false));
    assert_eq!(decode_amf0(&[0x05]), Value::Null);
    assert_eq!(decode_amf0(&[0x06]), Value::Undefined);
    assert_eq!(decode_amf0(&[0x0D]), Value::Undefined);
}

#[test]
fn test_decode_self_reference() {
    let data = [
        0x03, 0x00, 0x03, b'f', b'o', b'o', 0x07, 0x00, 0x00, 0x00, 0x00, 0x09,
    ];
    let value = decode_amf0(&data);
    assert!(matches!(value.get("foo"), Some(Value::Object(_))));
}

#[test]
fn test_decode_ecma_array() {
    let data = [
        0x08, 0x00, 0x00, 0x00, 0x01, 0x00, 0x03, b'f', b'o', b'o', 0x02, 0x00, 0x03, b'b',
        b'a', b'r', 0x00, 0x00, 0x09,
    ];
    let value = decode_amf0(&data);
    assert_eq!(value.get("foo"), Some(&Value::from("bar")));
}

#[test]
fn test_decode_strict_array() {
    let data = [
        0x0A, 0x00, 0x00, 0x00, 0x03, 0x00, 0x40, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
        0x02, 0x00, 0x03, b'f', b'o', b'o', 0x05,
    ];
    assert_eq!(
        decode_amf0(&data),
        Value::Array(vec![Value::Number(5.0), Value::from("foo"), Value::Null])
    );
}

#[test]
fn test_decode_date() {
    let mut data = vec![0x0B];
    push_f64(&mut data, 1_257_894_000_123.0);
    data.extend_from_slice(&[0x00, 0x00]);
    let expected = Utc.with_ymd_and_hms(2009, 11, 10, 23, 0, 0).unwrap();
    assert_eq!(decode_amf0(&data), Value::Date(expected));
}

#[test]
fn test_decode_long_string() {
    let value = decode_amf0(&[0x0C, 0x00, 0x00, 0x00, 0x03, b'f', b'o', b'o']);
    assert_eq!(value, Value::from("foo"));
}

#[test]
fn test_decode_typed_object() {
    let data = [
        0x10, 0x00, 0x03, b'a', b'.', b'B', 0x00, 0x01, b'x', 0x01, 0x01, 0x00, 0x00, 0x09,
    ];
    let value = decode_amf0(&data);
    assert_eq!(
        value,
        Value::TypedObject(TypedObject::new(
            "a.B",
            object([("x", Value::Boolean(true))])
        ))
    );
}

#[test]
fn test_decode_avmplus_string() {
    assert_eq!(
        decode_amf0(&[0x11, 0x06, 0x07, b'f', b'o', b'o']),
        Value::from("foo")
    );
}

#[test]
fn test_decode_batch_command() {
    let mut data = vec![0x02, 0x00, 0x07];
    data.extend_from_slice(b"publish");
    data.push(0x00);
    push_f64(&mut data, 0.0);
    data.push(0x05);
    data.extend_from_slice(&[0x02, 0x00, 0x09]);
    data.extend_from_slice(b"camstream");
    data.extend_from_slice(&[0x02, 0x00, 0x04]);
    data.extend_from_slice(b"live");

    let values = Amf0Codec::new().decode_batch(&mut data.as_slice()).unwrap();
    assert_eq!(
        values,
        vec![
            Value::from("publish"),
            Value::Number(0.0),
            Value::Null,
            Value::from("camstream"),
            Value::from("live"),
        ]
    );
}

#[test]
fn test_session_references_span_calls() {
    let mut codec = Amf0Codec::new();
    let first = [0x03, 0x00, 0x01, b'a', 0x05, 0x00, 0x00, 0x09];
    let object = codec.decode(&mut &first[..]).unwrap();

    let reference = codec.decode(&mut &[0x07u8, 0x00, 0x00][..]).unwrap();
    assert_eq!(reference, object);

    // A new session starts with an empty table.
    let err = Amf0Codec::new()
        .decode(&mut &[0x07u8, 0x00, 0x00][..])
        .unwrap_err();
    assert!(matches!(
        err,
        AmfError::Reference {
            table: TableKind::Amf0Object,
            ..
        }
    ));
}

// ============================================================================
// Decoding failures
// ============================================================================

#[test]
fn test_truncated_input_is_stream_error() {
    let cases: &[&[u8]] = &[
        &[0x00, 0x40, 0x14],
        &[0x02, 0x00, 0x05, b'a'],
        &[0x03, 0x00, 0x01, b'a', 0x05],
        &[0x0A, 0x00, 0x00, 0x00, 0x02, 0x05],
        &[0x0B, 0x00, 0x00],
    ];
    for data in cases {
        let err = Amf0Codec::new().decode(&mut &data[..]).unwrap_err();
        assert!(err.is_eof(), "{data:02x?}: {err}");
    }
}

#[test]
fn test_reserved_and_unknown_markers() {
    for marker in [0x04u8, 0x0E, 0x09, 0x12, 0xFF] {
        let err = Amf0Codec::new().decode(&mut &[marker][..]).unwrap_err();
        assert!(matches!(err, AmfError::Framing { .. }), "marker {marker:#04x}");
    }
}

#[test]
fn test_bad_object_terminator() {
    let data = [0x03, 0x00, 0x00, 0x05];
    let err = Amf0Codec::new().decode(&mut &data[..]).unwrap_err();
    assert!(matches!(err, AmfError::Framing { .. }));
}

#[test]
fn test_deep_nesting_is_framing_error() {
    let mut data = Vec::new();
    for _ in 0..200_000 {
        data.extend_from_slice(&[0x0A, 0x00, 0x00, 0x00, 0x01]);
    }
    data.push(0x05);

    let mut codec = Amf0Codec::new();
    let err = codec.decode(&mut data.as_slice()).unwrap_err();
    assert!(matches!(err, AmfError::Framing { .. }), "{err}");

    // the session is still usable afterwards
    assert_eq!(codec.decode(&mut &[0x05u8][..]).unwrap(), Value::Null);
}

#[test]
fn test_configured_depth_limit() {
    fn nested(levels: usize) -> Vec<u8> {
        let mut data = Vec::new();
        for _ in 0..levels {
            data.extend_from_slice(&[0x0A, 0x00, 0x00, 0x00, 0x01]);
        }
        data.push(0x05);
        data
    }

    // three arrays around a null nest four values deep
    let mut codec = CodecBuilder::new().max_depth(4).build_amf0();
    let value = codec.decode(&mut nested(3).as_slice()).unwrap();
    assert_eq!(
        value,
        Value::Array(vec![Value::Array(vec![Value::Array(vec![Value::Null])])])
    );

    let err = codec.decode(&mut nested(4).as_slice()).unwrap_err();
    assert!(matches!(err, AmfError::Framing { .. }));

    // objects count the same way
    let object = [
        0x03, 0x00, 0x01, b'a', 0x03, 0x00, 0x01, b'b', 0x05, 0x00, 0x00, 0x09, 0x00, 0x00,
        0x09,
    ];
    let mut shallow = CodecBuilder::new().max_depth(2).build_amf0();
    assert!(matches!(
        shallow.decode(&mut &object[..]),
        Err(AmfError::Framing { .. })
    ));
    assert!(CodecBuilder::new()
        .max_depth(3)
        .build_amf0()
        .decode(&mut &object[..])
        .is_ok());
}

#[test]
fn test_lossy_utf8_does_not_round_trip_bytes() {
    let data = [0x02, 0x00, 0x02, 0xC3, 0x28];

    let value = decode_amf0(&data);
    assert_eq!(value, Value::from("\u{fffd}("));
    assert_ne!(encode_amf0(&value), data.to_vec());

    let mut strict = CodecBuilder::new().utf8(Utf8Policy::Strict).build_amf0();
    assert!(matches!(
        strict.decode(&mut &data[..]),
        Err(AmfError::Framing { .. })
    ));
}

// ============================================================================
// Encoding
// ============================================================================

#[test]
fn test_encode_string() {
    assert_eq!(
        encode_amf0(&Value::from("foo")),
        vec![0x02, 0x00, 0x03, b'f', b'o', b'o']
    );
}

#[test]
fn test_encode_long_string() {
    let text = "a".repeat(524_288);
    let bytes = encode_amf0(&Value::from(text.as_str()));
    assert_eq!(&bytes[..5], &[0x0C, 0x00, 0x08, 0x00, 0x00]);
    assert_eq!(bytes.len(), 5 + 524_288);
    assert_eq!(decode_amf0(&bytes), Value::from(text));
}

#[test]
fn test_multibyte_string_round_trip() {
    let text = "héllo wörld, 日本語 😀";
    let bytes = encode_amf0(&Value::from(text));
    assert_eq!(&bytes[..3], &[0x02, 0x00, text.len() as u8]);
    assert_eq!(decode_amf0(&bytes), Value::from(text));
}

#[test]
fn test_short_string_limit_counts_bytes() {
    // 65534 chars but 65536 bytes
    let text = format!("{}é", "a".repeat(65_534));
    let bytes = encode_amf0(&Value::from(text.as_str()));
    assert_eq!(&bytes[..5], &[0x0C, 0x00, 0x01, 0x00, 0x00]);
    assert_eq!(decode_amf0(&bytes), Value::from(text));
}

#[test]
fn test_encode_object() {
    let value = Value::Object(object([("foo", Value::from("bar"))]));
    let bytes = encode_amf0(&value);
    assert_eq!(
        bytes,
        vec![
            0x03, 0x00, 0x03, b'f', b'o', b'o', 0x02, 0x00, 0x03, b'b', b'a', b'r', 0x00, 0x00,
            0x09
        ]
    );
    assert_eq!(decode_amf0(&bytes), value);
}

#[test]
fn test_encode_strict_array() {
    let value = Value::Array(vec![Value::Number(5.0), Value::from("foo"), Value::Null]);
    let bytes = encode_amf0(&value);
    assert_eq!(
        bytes,
        vec![
            0x0A, 0x00, 0x00, 0x00, 0x03, 0x00, 0x40, 0x14, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00,
            0x02, 0x00, 0x03, b'f', b'o', b'o', 0x05
        ]
    );
}

#[test]
fn test_encode_scalars() {
    let mut number = vec![0x00];
    push_f64(&mut number, 1.2);
    assert_eq!(encode_amf0(&Value::Number(1.2)), number);
    assert_eq!(encode_amf0(&Value::Boolean(true)), vec![0x01, 0x01]);
    assert_eq!(encode_amf0(&Value::Boolean(false)), vec![0x01, 0x00]);
    assert_eq!(encode_amf0(&Value::Null), vec![0x05]);
    assert_eq!(encode_amf0(&Value::Undefined), vec![0x06]);
}

#[test]
fn test_date_round_trip() {
    let date: DateTime<Utc> = Utc.with_ymd_and_hms(1983, 9, 4, 12, 4, 8).unwrap();
    let bytes = encode_amf0(&Value::Date(date));
    assert_eq!(bytes.len(), 11);
    assert_eq!(decode_amf0(&bytes), Value::Date(date));
}

#[test]
fn test_typed_object_round_trip() {
    let value = Value::TypedObject(TypedObject::new(
        "com.example.Point",
        object([("x", Value::Number(1.0)), ("y", Value::Number(-2.5))]),
    ));
    assert_eq!(decode_amf0(&encode_amf0(&value)), value);
}

#[test]
fn test_nested_round_trip() {
    let value = Value::Object(object([
        ("app", Value::from("live")),
        ("flashVer", Value::from("LNX 9,0,124,2")),
        ("audioCodecs", Value::Number(3575.0)),
        ("fpad", Value::Boolean(false)),
        (
            "list",
            Value::Array(vec![Value::Null, Value::Object(Object::new())]),
        ),
    ]));
    assert_eq!(decode_amf0(&encode_amf0(&value)), value);
}

#[test]
fn test_integer_encodes_as_number() {
    let bytes = encode_amf0(&Value::Integer(42));
    assert_eq!(decode_amf0(&bytes), Value::Number(42.0));
}

#[test]
fn test_amf3_payload_round_trip() {
    let mut codec = Amf0Codec::new();
    let value = Value::bytes(vec![1u8, 2, 3]);
    let mut buf = Vec::new();
    codec.encode_with_amf3(&mut buf, &value).unwrap();
    assert_eq!(buf[0], 0x11);
    assert_eq!(decode_amf0(&buf), value);
}

#[test]
fn test_encode_batch_stops_at_unencodable_value() {
    let mut codec = Amf0Codec::new();
    let mut buf = Vec::new();
    let err = codec
        .encode_batch(&mut buf, &[Value::Null, Value::bytes(vec![0u8])])
        .unwrap_err();
    assert!(matches!(err, AmfError::Type { .. }));
    assert_eq!(buf, vec![0x05]);
}

#[test]
fn test_short_write_is_stream_error() {
    let mut storage = [0u8; 4];
    let mut sink: &mut [u8] = &mut storage;
    let err = Amf0Codec::new()
        .encode(&mut sink, &Value::from("foobar"))
        .unwrap_err();
    assert!(matches!(err, AmfError::Stream(_)));
}

#[test]
fn test_empty_property_name_is_type_error() {
    let value = Value::Object(object([("", Value::Null), ("a", Value::Boolean(true))]));
    let err = Amf0Codec::new().encode_to_vec(&value).unwrap_err();
    assert!(matches!(err, AmfError::Type { .. }));

    let typed = Value::TypedObject(TypedObject::new("a.B", object([("", Value::Null)])));
    let err = Amf0Codec::new().encode_to_vec(&typed).unwrap_err();
    assert!(matches!(err, AmfError::Type { .. }));
}

// ============================================================================
// Properties
// ============================================================================

/// Text whose encoded length lands near the short string limit, or well
/// below it, with a multi-byte tail.
fn text_strategy() -> impl Strategy<Value = String> {
    (
        prop_oneof![0usize..64, 65_500usize..65_600],
        proptest::collection::vec(any::<char>(), 0..8),
    )
        .prop_map(|(n, tail)| {
            let mut text = "a".repeat(n);
            text.extend(tail);
            text
        })
}

proptest! {
    #[test]
    fn prop_string_round_trip(text in text_strategy()) {
        let value = Value::from(text.as_str());
        let bytes = encode_amf0(&value);
        let marker = if text.len() <= 65_535 { 0x02 } else { 0x0C };
        prop_assert_eq!(bytes[0], marker);
        prop_assert_eq!(decode_amf0(&bytes), value);
    }

    #[test]
    fn prop_number_round_trip(v in any::<f64>().prop_filter("NaN never equals itself", |v| !v.is_nan())) {
        prop_assert_eq!(decode_amf0(&encode_amf0(&Value::Number(v))), Value::Number(v));
    }

    #[test]
    fn prop_boolean_round_trip(b in any::<bool>()) {
        prop_assert_eq!(decode_amf0(&encode_amf0(&Value::Boolean(b))), Value::Boolean(b));
    }
}
