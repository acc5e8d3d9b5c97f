// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Per-field and bulk encoding of form values to hex.

use crate::coerce::{coerce_for_type, coerce_value_for_type};
use crate::error::ArgError;
use crate::hex_utils::{strip_hex_prefix, to_hex};
use crate::registry::{ArgField, TypeId, TypeRegistry};
use crate::value::{FormValue, FormValues};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result of encoding a single argument.
///
/// On failure `hex` is always `"0x"` and `error` carries the codec's message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeResult {
    pub success: bool,
    pub hex: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl EncodeResult {
    pub fn ok(hex: String) -> Self {
        EncodeResult {
            success: true,
            hex,
            error: None,
        }
    }

    pub fn failure(error: impl ToString) -> Self {
        EncodeResult {
            success: false,
            hex: "0x".to_string(),
            error: Some(error.to_string()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldEncodeResult {
    pub name: String,
    #[serde(flatten)]
    pub result: EncodeResult,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodeAllResult {
    /// One entry per field, in declared order.
    pub results: Vec<FieldEncodeResult>,
    pub errors: BTreeMap<String, String>,
    /// `0x` followed by every successful field's bytes, in order.
    pub concatenated: String,
    pub has_errors: bool,
}

fn try_encode<R>(registry: &R, type_id: TypeId, value: &FormValue) -> Result<Vec<u8>, ArgError>
where
    R: TypeRegistry + ?Sized,
{
    let codec = registry.find_codec(type_id)?;
    Ok(codec.try_encode(value)?)
}

/// Encode one argument.
///
/// The value is coerced against the target type first, so text fields keep digit-only
/// input as typed. If the plain encode fails, a type-aware coercion
/// (address string into `MultiAddress::Id`) is tried once; if that also fails, the
/// error from the plain attempt is the one reported.
pub fn encode_arg<R>(registry: &R, type_id: TypeId, value: &FormValue) -> EncodeResult
where
    R: TypeRegistry + ?Sized,
{
    let coerced = coerce_value_for_type(registry, type_id, value);

    let basic_error = match try_encode(registry, type_id, &coerced) {
        Ok(bytes) => return EncodeResult::ok(to_hex(&bytes)),
        Err(e) => e,
    };

    if let Some(smart) = coerce_for_type(registry, type_id, &coerced) {
        match try_encode(registry, type_id, &smart) {
            Ok(bytes) => return EncodeResult::ok(to_hex(&bytes)),
            Err(e) => {
                tracing::debug!(type_id, error = %e, "Smart coercion did not help");
            }
        }
    }

    EncodeResult::failure(basic_error)
}

/// Encode every field in declared order.
///
/// Never stops at the first failure: each field gets its own result, failures are
/// collected into `errors`, and only successful fields contribute to `concatenated`.
/// A field missing from `values` is encoded as null.
pub fn encode_all_args<R>(registry: &R, fields: &[ArgField], values: &FormValues) -> EncodeAllResult
where
    R: TypeRegistry + ?Sized,
{
    let mut results = Vec::with_capacity(fields.len());
    let mut errors = BTreeMap::new();
    let mut concatenated = String::from("0x");

    for field in fields {
        let value = values.get(&field.name).unwrap_or(&FormValue::Null);
        let result = encode_arg(registry, field.type_id, value);

        if result.success {
            concatenated.push_str(strip_hex_prefix(&result.hex));
        } else if let Some(error) = &result.error {
            errors.insert(field.name.clone(), error.clone());
        }

        results.push(FieldEncodeResult {
            name: field.name.clone(),
            result,
        });
    }

    EncodeAllResult {
        results,
        has_errors: !errors.is_empty(),
        errors,
        concatenated,
    }
}
