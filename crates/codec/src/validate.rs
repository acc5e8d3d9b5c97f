// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Field, structure, vector and format validation.
//!
//! Argument validity is decided by the encode engine: a value is valid when it
//! encodes, and encodes to at least one byte. The format checks at the bottom of
//! this module need no registry.

use crate::encode::encode_arg;
use crate::registry::{ArgField, TypeId, TypeRegistry};
use crate::value::{FormFields, FormValue, FormValues};
use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

lazy_static! {
    static ref AMOUNT_RE: Regex = Regex::new(r"^\d+(\.\d+)?$").expect("valid amount regex");
}

const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldValidation {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl FieldValidation {
    pub fn valid() -> Self {
        FieldValidation {
            valid: true,
            error: None,
        }
    }

    pub fn invalid(error: impl Into<String>) -> Self {
        FieldValidation {
            valid: false,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationSummary {
    pub valid: bool,
    pub results: BTreeMap<String, FieldValidation>,
    /// Error messages in field declaration order.
    pub errors: Vec<String>,
}

/// Validate one argument against its type.
pub fn validate_field<R>(registry: &R, type_id: TypeId, value: &FormValue, name: &str) -> FieldValidation
where
    R: TypeRegistry + ?Sized,
{
    if value.is_empty_input() {
        return FieldValidation::invalid(format!("{name} is required"));
    }

    let encoded = encode_arg(registry, type_id, value);
    if !encoded.success {
        let reason = encoded.error.unwrap_or_else(|| "invalid value".to_string());
        return FieldValidation::invalid(format!("{name}: {reason}"));
    }

    // A zero-length encoding never satisfies a required field.
    if encoded.hex == "0x" {
        return FieldValidation::invalid(format!("{name} must not be empty"));
    }

    FieldValidation::valid()
}

/// Validate every field independently.
pub fn validate_all_args<R>(registry: &R, fields: &[ArgField], values: &FormValues) -> ValidationSummary
where
    R: TypeRegistry + ?Sized,
{
    let mut results = BTreeMap::new();
    let mut errors = Vec::new();

    for field in fields {
        let value = values.get(&field.name).unwrap_or(&FormValue::Null);
        let result = validate_field(registry, field.type_id, value, &field.name);
        if let Some(error) = &result.error {
            errors.push(error.clone());
        }
        results.insert(field.name.clone(), result);
    }

    ValidationSummary {
        valid: errors.is_empty(),
        results,
        errors,
    }
}

/// SS58-looking text: 40 to 52 base58 characters. Does not verify the checksum.
pub fn is_valid_address_format(address: &str) -> bool {
    (40..=52).contains(&address.len()) && address.chars().all(|c| BASE58_ALPHABET.contains(c))
}

/// `0x` followed by hex digits; `"0x"` alone is valid.
pub fn is_valid_hex_format(hex: &str) -> bool {
    hex.strip_prefix("0x")
        .is_some_and(|rest| rest.chars().all(|c| c.is_ascii_hexdigit()))
}

/// A non-negative decimal amount such as `10` or `1.25`.
pub fn validate_amount(amount: &str) -> FieldValidation {
    let amount = amount.trim();
    if amount.is_empty() {
        return FieldValidation::invalid("Amount is required");
    }
    if !AMOUNT_RE.is_match(amount) {
        return FieldValidation::invalid("Amount must be a non-negative number");
    }
    FieldValidation::valid()
}

fn plural(count: usize, word: &str) -> String {
    if count == 1 {
        format!("{count} {word}")
    } else {
        format!("{count} {word}s")
    }
}

/// Check item count bounds, then that no item is left empty.
pub fn validate_vector_constraints(
    items: &[FormValue],
    min_items: Option<usize>,
    max_items: Option<usize>,
    name: &str,
) -> FieldValidation {
    if let Some(min) = min_items
        && items.len() < min
    {
        return FieldValidation::invalid(format!(
            "{name} must have at least {}",
            plural(min, "item")
        ));
    }

    if let Some(max) = max_items
        && items.len() > max
    {
        return FieldValidation::invalid(format!(
            "{name} must have at most {}",
            plural(max, "item")
        ));
    }

    let empty = items.iter().filter(|item| item.is_null()).count();
    if empty > 0 {
        return FieldValidation::invalid(format!(
            "{name} has {} without a value",
            plural(empty, "item")
        ));
    }

    FieldValidation::valid()
}

/// Check that every required struct field has a value. `0` and `false` count as
/// values; null and the empty string do not.
pub fn validate_struct_fields(
    value: &FormFields,
    required: &[&str],
    name: &str,
) -> FieldValidation {
    let missing: Vec<&str> = required
        .iter()
        .copied()
        .filter(|field| value.get(*field).is_none_or(FormValue::is_empty_input))
        .collect();

    match missing.as_slice() {
        [] => FieldValidation::valid(),
        [field] => FieldValidation::invalid(format!("{name} is missing field {field}")),
        fields => FieldValidation::invalid(format!(
            "{name} is missing fields {}",
            fields.join(", ")
        )),
    }
}
