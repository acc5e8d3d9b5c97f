// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Dynamically shaped form values.
//!
//! A [`FormValue`] is what the form layer holds for a single call argument: mostly
//! strings typed by the user, plus the structure (objects, arrays, tagged variants)
//! needed to describe composite arguments. Coercion turns these into codec-ready
//! values, and the decode engine produces them back from bytes.

use crate::hex_utils::to_hex;
use indexmap::IndexMap;
use primitive_types::U256;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Form values keyed by argument name.
pub type FormValues = BTreeMap<String, FormValue>;

/// Fields of an object value, in the order they were declared or entered.
pub type FormFields = IndexMap<String, FormValue>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FormValue {
    #[default]
    Null,
    Bool(bool),
    /// Non-negative integer, wide enough for `u256`.
    Unsigned(U256),
    /// Integer that may be negative.
    Signed(i128),
    Str(String),
    /// Raw byte blob.
    Bytes(Vec<u8>),
    /// Tagged enum value, `{type, value?}`.
    Variant {
        name: String,
        value: Option<Box<FormValue>>,
    },
    Object(FormFields),
    Array(Vec<FormValue>),
}

impl FormValue {
    pub fn str(s: impl Into<String>) -> Self {
        FormValue::Str(s.into())
    }

    pub fn unsigned(n: impl Into<U256>) -> Self {
        FormValue::Unsigned(n.into())
    }

    /// A variant without payload, e.g. `{type: "Staked"}`.
    pub fn unit_variant(name: impl Into<String>) -> Self {
        FormValue::Variant {
            name: name.into(),
            value: None,
        }
    }

    pub fn variant(name: impl Into<String>, value: FormValue) -> Self {
        FormValue::Variant {
            name: name.into(),
            value: Some(Box::new(value)),
        }
    }

    pub fn object<K, I>(fields: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, FormValue)>,
    {
        FormValue::Object(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }

    pub fn is_null(&self) -> bool {
        matches!(self, FormValue::Null)
    }

    /// True for the values a form treats as "nothing entered".
    pub fn is_empty_input(&self) -> bool {
        match self {
            FormValue::Null => true,
            FormValue::Str(s) => s.is_empty(),
            _ => false,
        }
    }

    /// Short name of the value's shape, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            FormValue::Null => "null",
            FormValue::Bool(_) => "boolean",
            FormValue::Unsigned(_) | FormValue::Signed(_) => "integer",
            FormValue::Str(_) => "string",
            FormValue::Bytes(_) => "bytes",
            FormValue::Variant { .. } => "variant",
            FormValue::Object(_) => "object",
            FormValue::Array(_) => "array",
        }
    }

    /// Build a form value from JSON form state.
    ///
    /// Objects whose only keys are a string `type` and an optional `value` become
    /// tagged variants. Integers become numbers; fractional numbers are kept as their
    /// string form since no codec accepts them directly.
    pub fn from_json(json: &Value) -> Self {
        match json {
            Value::Null => FormValue::Null,
            Value::Bool(b) => FormValue::Bool(*b),
            Value::Number(n) => {
                if let Some(u) = n.as_u64() {
                    FormValue::Unsigned(U256::from(u))
                } else if let Some(i) = n.as_i64() {
                    FormValue::Signed(i as i128)
                } else {
                    FormValue::Str(n.to_string())
                }
            }
            Value::String(s) => FormValue::Str(s.clone()),
            Value::Array(items) => FormValue::Array(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => {
                let only_tag_keys = map.keys().all(|k| k == "type" || k == "value");
                match map.get("type") {
                    Some(Value::String(name)) if only_tag_keys => FormValue::Variant {
                        name: name.clone(),
                        value: map.get("value").map(|v| Box::new(Self::from_json(v))),
                    },
                    _ => FormValue::Object(
                        map.iter()
                            .map(|(k, v)| (k.clone(), Self::from_json(v)))
                            .collect(),
                    ),
                }
            }
        }
    }

    /// Serialize back to JSON form state, keeping variant tags.
    ///
    /// Integers are written as decimal strings so `u128`/`u256` values survive.
    pub fn to_json(&self) -> Value {
        match self {
            FormValue::Null => Value::Null,
            FormValue::Bool(b) => Value::Bool(*b),
            FormValue::Unsigned(n) => Value::String(n.to_string()),
            FormValue::Signed(n) => Value::String(n.to_string()),
            FormValue::Str(s) => Value::String(s.clone()),
            FormValue::Bytes(b) => Value::String(to_hex(b)),
            FormValue::Variant { name, value } => {
                let mut map = Map::new();
                map.insert("type".to_string(), Value::String(name.clone()));
                if let Some(inner) = value {
                    map.insert("value".to_string(), inner.to_json());
                }
                Value::Object(map)
            }
            FormValue::Object(fields) => Value::Object(
                fields
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            FormValue::Array(items) => Value::Array(items.iter().map(Self::to_json).collect()),
        }
    }
}

impl From<&str> for FormValue {
    fn from(s: &str) -> Self {
        FormValue::Str(s.to_string())
    }
}

impl From<bool> for FormValue {
    fn from(b: bool) -> Self {
        FormValue::Bool(b)
    }
}

impl From<Vec<u8>> for FormValue {
    fn from(bytes: Vec<u8>) -> Self {
        FormValue::Bytes(bytes)
    }
}
