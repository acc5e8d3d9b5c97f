// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Coercion of loosely-typed form input into codec-ready values.
//!
//! Form fields hold text. Before encoding, `"true"`/`"false"` become booleans and
//! all-digit strings become integers. Everything else is left for the codec to
//! interpret. Text bound for a string, a character or a byte blob is kept as typed
//! when the target type is known.

use crate::address::decode_address;
use crate::registry::{Field, PrimitiveKind, TypeDef, TypeId, TypeRegistry};
use crate::value::{FormFields, FormValue};
use primitive_types::U256;
use std::borrow::Cow;

/// Coerce a form value field-by-field.
///
/// Returns `Cow::Borrowed` when nothing in the tree changed, so callers can tell an
/// untouched value apart from a rebuilt one.
pub fn coerce_value(value: &FormValue) -> Cow<'_, FormValue> {
    match value {
        FormValue::Str(s) => match coerce_str(s) {
            Some(coerced) => Cow::Owned(coerced),
            None => Cow::Borrowed(value),
        },
        FormValue::Array(items) => {
            let coerced: Vec<Cow<'_, FormValue>> = items.iter().map(coerce_value).collect();
            if coerced.iter().all(|c| matches!(c, Cow::Borrowed(_))) {
                return Cow::Borrowed(value);
            }
            Cow::Owned(FormValue::Array(
                coerced.into_iter().map(Cow::into_owned).collect(),
            ))
        }
        FormValue::Object(fields) => {
            let coerced: Vec<(&String, Cow<'_, FormValue>)> = fields
                .iter()
                .map(|(k, v)| (k, coerce_value(v)))
                .collect();
            if coerced.iter().all(|(_, c)| matches!(c, Cow::Borrowed(_))) {
                return Cow::Borrowed(value);
            }
            Cow::Owned(FormValue::Object(
                coerced
                    .into_iter()
                    .map(|(k, v)| (k.clone(), v.into_owned()))
                    .collect::<FormFields>(),
            ))
        }
        FormValue::Variant {
            name,
            value: Some(inner),
        } => match coerce_value(inner) {
            Cow::Borrowed(_) => Cow::Borrowed(value),
            Cow::Owned(coerced) => Cow::Owned(FormValue::variant(name.clone(), coerced)),
        },
        // Bytes pass through unchanged, as do already-typed scalars.
        _ => Cow::Borrowed(value),
    }
}

/// Type nesting followed by [`coerce_value_for_type`] before it falls back to
/// [`coerce_value`] for the rest of the tree.
const MAX_TYPE_DEPTH: usize = 64;

/// Coerce a form value against the shape of `type_id`.
///
/// Same rules as [`coerce_value`], except that strings headed for a `str`, a `char`
/// or a `u8` sequence/array stay strings, so `"007"` is not read as the number 7.
/// Parts of the value whose type cannot be matched are coerced without a type.
pub fn coerce_value_for_type<'a, R>(registry: &R, type_id: TypeId, value: &'a FormValue) -> Cow<'a, FormValue>
where
    R: TypeRegistry + ?Sized,
{
    coerce_typed(registry, type_id, value, 0)
}

fn coerce_typed<'a, R>(registry: &R, type_id: TypeId, value: &'a FormValue, depth: usize) -> Cow<'a, FormValue>
where
    R: TypeRegistry + ?Sized,
{
    if depth > MAX_TYPE_DEPTH {
        return coerce_value(value);
    }
    let Ok(type_def) = registry.find_type(type_id) else {
        return coerce_value(value);
    };

    match (&type_def, value) {
        (TypeDef::Primitive(PrimitiveKind::Str | PrimitiveKind::Char), FormValue::Str(_)) => Cow::Borrowed(value),
        (TypeDef::Sequence { elem } | TypeDef::SizedVec { elem, .. }, FormValue::Str(_)) if registry.is_byte(*elem) => {
            Cow::Borrowed(value)
        }
        (TypeDef::Compact { inner }, _) => coerce_typed(registry, *inner, value, depth + 1),
        (TypeDef::Sequence { elem } | TypeDef::SizedVec { elem, .. }, FormValue::Array(items)) => {
            rebuild_array(value, items.iter().map(|item| coerce_typed(registry, *elem, item, depth + 1)))
        }
        (TypeDef::Tuple { fields }, FormValue::Array(items)) if fields.len() == items.len() => rebuild_array(
            value,
            fields
                .iter()
                .zip(items)
                .map(|(id, item)| coerce_typed(registry, *id, item, depth + 1)),
        ),
        (TypeDef::Tuple { fields }, _) if fields.len() == 1 => coerce_typed(registry, fields[0], value, depth + 1),
        (TypeDef::Struct { fields }, _) => coerce_fields(registry, fields, value, depth + 1),
        (TypeDef::Enum { variants }, FormValue::Variant { name, value: Some(inner) }) => {
            let Some(variant) = variants.iter().find(|v| &v.name == name) else {
                return coerce_value(value);
            };
            match coerce_fields(registry, &variant.fields, inner, depth + 1) {
                Cow::Borrowed(_) => Cow::Borrowed(value),
                Cow::Owned(coerced) => Cow::Owned(FormValue::variant(name.clone(), coerced)),
            }
        }
        _ => coerce_value(value),
    }
}

/// Coerce a struct body or variant payload: a single unnamed field takes the value
/// as is, named fields match object keys, unnamed fields match array positions.
fn coerce_fields<'a, R>(registry: &R, fields: &[Field], value: &'a FormValue, depth: usize) -> Cow<'a, FormValue>
where
    R: TypeRegistry + ?Sized,
{
    match (fields, value) {
        ([field], _) if field.name.is_none() => coerce_typed(registry, field.type_id, value, depth),
        (fields, FormValue::Object(map)) => {
            let coerced: Vec<(&String, Cow<'a, FormValue>)> = map
                .iter()
                .map(|(key, item)| {
                    let field = fields.iter().find(|f| f.name.as_deref() == Some(key.as_str()));
                    let item = match field {
                        Some(field) => coerce_typed(registry, field.type_id, item, depth),
                        None => coerce_value(item),
                    };
                    (key, item)
                })
                .collect();
            if coerced.iter().all(|(_, c)| matches!(c, Cow::Borrowed(_))) {
                return Cow::Borrowed(value);
            }
            Cow::Owned(FormValue::Object(
                coerced
                    .into_iter()
                    .map(|(k, v)| (k.clone(), v.into_owned()))
                    .collect::<FormFields>(),
            ))
        }
        (fields, FormValue::Array(items)) if fields.len() == items.len() => rebuild_array(
            value,
            fields
                .iter()
                .zip(items)
                .map(|(field, item)| coerce_typed(registry, field.type_id, item, depth)),
        ),
        _ => coerce_value(value),
    }
}

fn rebuild_array<'a, I>(value: &'a FormValue, items: I) -> Cow<'a, FormValue>
where
    I: Iterator<Item = Cow<'a, FormValue>>,
{
    let coerced: Vec<Cow<'a, FormValue>> = items.collect();
    if coerced.iter().all(|c| matches!(c, Cow::Borrowed(_))) {
        return Cow::Borrowed(value);
    }
    Cow::Owned(FormValue::Array(coerced.into_iter().map(Cow::into_owned).collect()))
}

fn coerce_str(s: &str) -> Option<FormValue> {
    match s {
        "true" => return Some(FormValue::Bool(true)),
        "false" => return Some(FormValue::Bool(false)),
        _ => {}
    }

    if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
        // Too large even for u256: leave the text for the codec to reject.
        return U256::from_dec_str(s).ok().map(FormValue::Unsigned);
    }

    None
}

/// Type-aware fallback used when a plain encode fails.
///
/// If `type_id` is an enum with an `Id` member (a MultiAddress) and `value` is a
/// string that decodes as a chain address, returns `{type: "Id", value: bytes}`.
/// Returns `None` when not applicable so the caller surfaces its original error.
pub fn coerce_for_type<R>(registry: &R, type_id: TypeId, value: &FormValue) -> Option<FormValue>
where
    R: TypeRegistry + ?Sized,
{
    let FormValue::Str(text) = value else {
        return None;
    };

    let type_def = registry.find_type(type_id).ok()?;
    type_def.variant("Id")?;

    let account = decode_address(text)?;
    tracing::debug!(type_id, "Coerced address string into MultiAddress::Id");
    Some(FormValue::variant("Id", FormValue::Bytes(account.to_vec())))
}
