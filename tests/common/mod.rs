// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! Common utilities for integration tests.

#![allow(dead_code)]

use amfcodec::{Amf0Codec, Amf3Codec, Object, Value, ValueCodec};

/// Build an object from key/value pairs.
pub fn object<const N: usize>(pairs: [(&str, Value); N]) -> Object {
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

/// Append a big-endian f64 to a byte vector.
pub fn push_f64(buf: &mut Vec<u8>, v: f64) {
    buf.extend_from_slice(&v.to_be_bytes());
}

/// Encode with a fresh AMF0 session.
pub fn encode_amf0(value: &Value) -> Vec<u8> {
    Amf0Codec::new()
        .encode_to_vec(value)
        .unwrap_or_else(|e| panic!("AMF0 encode of {value} failed: {e}"))
}

/// Encode with a fresh AMF3 session.
pub fn encode_amf3(value: &Value) -> Vec<u8> {
    Amf3Codec::new()
        .encode_to_vec(value)
        .unwrap_or_else(|e| panic!("AMF3 encode of {value} failed: {e}"))
}

/// Decode one value with a fresh AMF0 session, checking all input is used.
pub fn decode_amf0(data: &[u8]) -> Value {
    let mut input = data;
    let value = Amf0Codec::new()
        .decode(&mut input)
        .unwrap_or_else(|e| panic!("AMF0 decode of {data:02x?} failed: {e}"));
    assert!(input.is_empty(), "{} trailing bytes", input.len());
    value
}

/// Decode one value with a fresh AMF3 session, checking all input is used.
pub fn decode_amf3(data: &[u8]) -> Value {
    let mut input = data;
    let value = Amf3Codec::new()
        .decode(&mut input)
        .unwrap_or_else(|e| panic!("AMF3 decode of {data:02x?} failed: {e}"));
    assert!(input.is_empty(), "{} trailing bytes", input.len());
    value
}
