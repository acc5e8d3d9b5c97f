// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-field and bulk decoding of hex into display-safe values.

use crate::error::ArgError;
use crate::hex_utils::parse_hex;
use crate::registry::{ArgField, TypeId, TypeRegistry};
use crate::value::FormValue;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Error key used for failures that belong to no single field.
pub const GLOBAL_ERROR_KEY: &str = "_global";

/// Result of decoding a single argument.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeResult {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bytes_consumed: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DecodeResult {
    fn ok(value: Value, bytes_consumed: usize) -> Self {
        DecodeResult {
            success: true,
            value: Some(value),
            bytes_consumed: Some(bytes_consumed),
            error: None,
        }
    }

    fn failure(error: impl ToString) -> Self {
        DecodeResult {
            success: false,
            value: None,
            bytes_consumed: None,
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecodeAllResult {
    pub success: bool,
    /// Decoded fields, in declared order, up to the first fatal failure.
    pub values: Map<String, Value>,
    pub errors: BTreeMap<String, String>,
    pub warnings: Vec<String>,
    pub total_bytes_consumed: usize,
}

/// Decode a value from the front of `bytes` and measure how many bytes it used.
///
/// The codec decodes a prefix of the buffer; consumption is the length of the
/// value's re-encoding.
fn decode_prefix<R>(registry: &R, type_id: TypeId, bytes: &[u8]) -> Result<(FormValue, usize), ArgError>
where
    R: TypeRegistry + ?Sized,
{
    let codec = registry.find_codec(type_id)?;
    let value = codec.try_decode(bytes)?;
    let consumed = codec.try_encode(&value)?.len();
    Ok((value, consumed))
}

/// Decode one argument from hex.
pub fn decode_arg<R>(registry: &R, type_id: TypeId, hex: &str) -> DecodeResult
where
    R: TypeRegistry + ?Sized,
{
    let bytes = match parse_hex(hex) {
        Ok(bytes) => bytes,
        Err(e) => return DecodeResult::failure(format!("Invalid hex: {e}")),
    };

    match decode_prefix(registry, type_id, &bytes) {
        Ok((value, consumed)) => DecodeResult::ok(flatten_decoded_value(&value), consumed),
        Err(e) => DecodeResult::failure(e),
    }
}

/// Decode consecutive arguments from one byte stream.
///
/// Fields are consumed in order with a running offset. Running out of bytes or a
/// decode failure is fatal: later fields cannot be located once the stream is out
/// of sync, so decoding stops there. Bytes left over after the last field produce a
/// warning but not a failure. Malformed hex is reported under [`GLOBAL_ERROR_KEY`].
pub fn decode_all_args<R>(registry: &R, fields: &[ArgField], hex: &str) -> DecodeAllResult
where
    R: TypeRegistry + ?Sized,
{
    let mut result = DecodeAllResult {
        success: true,
        values: Map::new(),
        errors: BTreeMap::new(),
        warnings: Vec::new(),
        total_bytes_consumed: 0,
    };

    let bytes = match parse_hex(hex) {
        Ok(bytes) => bytes,
        Err(e) => {
            result.success = false;
            result
                .errors
                .insert(GLOBAL_ERROR_KEY.to_string(), format!("Invalid hex: {e}"));
            return result;
        }
    };

    let mut offset = 0;
    for field in fields {
        if offset >= bytes.len() {
            tracing::warn!(field = %field.name, offset, "Ran out of bytes before field");
            result.success = false;
            result.errors.insert(
                field.name.clone(),
                format!("No bytes left to decode field '{}'", field.name),
            );
            break;
        }

        match decode_prefix(registry, field.type_id, &bytes[offset..]) {
            Ok((value, consumed)) => {
                result
                    .values
                    .insert(field.name.clone(), flatten_decoded_value(&value));
                offset += consumed;
            }
            Err(e) => {
                tracing::warn!(field = %field.name, offset, error = %e, "Failed to decode field");
                result.success = false;
                result.errors.insert(field.name.clone(), e.to_string());
                break;
            }
        }
    }

    // A codec that reports more than it was given is clamped to the buffer.
    result.total_bytes_consumed = offset.min(bytes.len());

    if result.success && offset < bytes.len() {
        let remaining = bytes.len() - offset;
        tracing::warn!(remaining, "Trailing bytes after last field");
        result.warnings.push(format!(
            "{remaining} trailing byte{} not consumed by any field",
            if remaining == 1 { " was" } else { "s were" }
        ));
    }

    result
}

/// Turn a decoded value into something safe to display and serialize.
///
/// Integers become decimal strings and byte blobs become hex. A variant without a
/// payload keeps its tag as `{"type": name}`; a variant with a payload is replaced by
/// its flattened payload and the tag is dropped.
pub fn flatten_decoded_value(value: &FormValue) -> Value {
    match value {
        FormValue::Null => Value::Null,
        FormValue::Unsigned(n) => Value::String(n.to_string()),
        FormValue::Signed(n) => Value::String(n.to_string()),
        FormValue::Bytes(b) => Value::String(crate::hex_utils::to_hex(b)),
        FormValue::Array(items) => Value::Array(items.iter().map(flatten_decoded_value).collect()),
        FormValue::Variant { name, value: None } => {
            let mut map = Map::new();
            map.insert("type".to_string(), Value::String(name.clone()));
            Value::Object(map)
        }
        FormValue::Variant {
            value: Some(payload),
            ..
        } => flatten_decoded_value(payload),
        FormValue::Bool(b) => Value::Bool(*b),
        FormValue::Str(s) => Value::String(s.clone()),
        FormValue::Object(fields) => Value::Object(
            fields
                .iter()
                .map(|(k, v)| (k.clone(), flatten_decoded_value(v)))
                .collect(),
        ),
    }
}
