// SPDX-FileCopyrightText: 2026 ArcheBase
//
// SPDX-License-Identifier: MulanPSL-2.0

//! JSON bridge for [`Value`].
//!
//! Plain JSON has no dates, byte blobs or class names, so those are carried
//! in tagged objects:
//!
//! | Value | JSON |
//! |-------|------|
//! | `Date` | `{"$date": "2009-11-10T23:00:00Z"}` |
//! | `ByteArray` | `{"$bytes": "0102ff"}` |
//! | `TypedObject` | `{"$type": "a.B", ...properties}` |
//! | `DenseArray` with named entries | `{"$dense": [...], ...named}` |
//!
//! `Undefined` and non-finite numbers have no JSON form and become `null`.
//!
//! ## Example
//!
//! ```
//! use amfcodec::json::{from_json, to_json};
//! use amfcodec::Value;
//!
//! let value = from_json(&serde_json::json!({"x": 1, "y": [true, null]}))?;
//! assert_eq!(value.get("x"), Some(&Value::Integer(1)));
//! assert_eq!(to_json(&value), serde_json::json!({"x": 1, "y": [true, null]}));
//! # Ok::<(), amfcodec::AmfError>(())
//! ```

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Number};

use crate::core::{AmfError, DenseArray, Object, Result, TypedObject, Value, U29_MAX};

const DATE_TAG: &str = "$date";
const BYTES_TAG: &str = "$bytes";
const TYPE_TAG: &str = "$type";
const DENSE_TAG: &str = "$dense";

/// Convert a value to JSON.
pub fn to_json(value: &Value) -> serde_json::Value {
    match value {
        Value::Undefined | Value::Null => serde_json::Value::Null,
        Value::Boolean(b) => serde_json::Value::Bool(*b),
        Value::Number(v) => Number::from_f64(*v)
            .map(serde_json::Value::Number)
            .unwrap_or(serde_json::Value::Null),
        Value::Integer(v) => serde_json::Value::Number(Number::from(*v)),
        Value::String(s) => serde_json::Value::String(s.clone()),
        Value::Date(date) => tagged(
            DATE_TAG,
            serde_json::Value::String(date.to_rfc3339_opts(SecondsFormat::AutoSi, true)),
        ),
        Value::ByteArray(data) => tagged(BYTES_TAG, serde_json::Value::String(hex::encode(data))),
        Value::Array(items) => serde_json::Value::Array(items.iter().map(to_json).collect()),
        Value::Object(object) => serde_json::Value::Object(object_to_map(object)),
        Value::TypedObject(typed) => {
            let mut map = object_to_map(&typed.object);
            map.insert(
                TYPE_TAG.to_string(),
                serde_json::Value::String(typed.type_name.clone()),
            );
            serde_json::Value::Object(map)
        }
        Value::DenseArray(array) if array.associative.is_empty() => {
            serde_json::Value::Array(array.dense.iter().map(to_json).collect())
        }
        Value::DenseArray(array) => {
            let mut map = object_to_map(&array.associative);
            map.insert(
                DENSE_TAG.to_string(),
                serde_json::Value::Array(array.dense.iter().map(to_json).collect()),
            );
            serde_json::Value::Object(map)
        }
    }
}

/// Convert JSON to a value.
///
/// Non-negative integers up to `0x1FFFFFFF` become `Integer`; every other
/// number becomes `Number`.
///
/// # Errors
///
/// Returns a type error for a malformed `$date` or `$bytes` tag, or a
/// `$type`/`$dense` tag of the wrong JSON type.
pub fn from_json(json: &serde_json::Value) -> Result<Value> {
    match json {
        serde_json::Value::Null => Ok(Value::Null),
        serde_json::Value::Bool(b) => Ok(Value::Boolean(*b)),
        serde_json::Value::Number(n) => Ok(number_from_json(n)),
        serde_json::Value::String(s) => Ok(Value::String(s.clone())),
        serde_json::Value::Array(items) => items
            .iter()
            .map(from_json)
            .collect::<Result<Vec<_>>>()
            .map(Value::Array),
        serde_json::Value::Object(map) => object_from_json(map),
    }
}

fn tagged(tag: &str, value: serde_json::Value) -> serde_json::Value {
    let mut map = Map::new();
    map.insert(tag.to_string(), value);
    serde_json::Value::Object(map)
}

fn object_to_map(object: &Object) -> Map<String, serde_json::Value> {
    object
        .iter()
        .map(|(key, value)| (key.clone(), to_json(value)))
        .collect()
}

fn number_from_json(n: &Number) -> Value {
    match n.as_u64() {
        Some(v) if v <= u64::from(U29_MAX) => Value::Integer(v as u32),
        _ => Value::Number(n.as_f64().unwrap_or(f64::NAN)),
    }
}

fn object_from_json(map: &Map<String, serde_json::Value>) -> Result<Value> {
    if map.len() == 1 {
        if let Some(date) = map.get(DATE_TAG) {
            return date_from_json(date);
        }
        if let Some(bytes) = map.get(BYTES_TAG) {
            return bytes_from_json(bytes);
        }
    }

    let mut object = Object::new();
    for (key, value) in map {
        if key != TYPE_TAG && key != DENSE_TAG {
            object.insert(key.clone(), from_json(value)?);
        }
    }

    if let Some(type_name) = map.get(TYPE_TAG) {
        let type_name = type_name
            .as_str()
            .ok_or_else(|| AmfError::type_error(format!("{TYPE_TAG} must be a string")))?;
        return Ok(Value::TypedObject(TypedObject::new(type_name, object)));
    }

    if let Some(dense) = map.get(DENSE_TAG) {
        let dense = dense
            .as_array()
            .ok_or_else(|| AmfError::type_error(format!("{DENSE_TAG} must be an array")))?
            .iter()
            .map(from_json)
            .collect::<Result<Vec<_>>>()?;
        return Ok(Value::DenseArray(DenseArray {
            associative: object,
            dense,
        }));
    }

    Ok(Value::Object(object))
}

fn date_from_json(json: &serde_json::Value) -> Result<Value> {
    let text = json
        .as_str()
        .ok_or_else(|| AmfError::type_error(format!("{DATE_TAG} must be a string")))?;
    let date = DateTime::parse_from_rfc3339(text)
        .map_err(|e| AmfError::type_error(format!("invalid {DATE_TAG} '{text}': {e}")))?;
    Ok(Value::Date(date.with_timezone(&Utc)))
}

fn bytes_from_json(json: &serde_json::Value) -> Result<Value> {
    let text = json
        .as_str()
        .ok_or_else(|| AmfError::type_error(format!("{BYTES_TAG} must be a string")))?;
    let data = hex::decode(text)
        .map_err(|e| AmfError::type_error(format!("invalid {BYTES_TAG} '{text}': {e}")))?;
    Ok(Value::ByteArray(data))
}
