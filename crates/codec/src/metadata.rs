// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! [`TypeRegistry`] backed by runtime metadata.
//!
//! Type shapes come from the metadata's `PortableRegistry`. Encoding goes through
//! `scale-value`: a [`FormValue`] is first shaped into a `scale_value::Value` guided
//! by the target type, then encoded with `encode_as_type`. Decoding runs the other
//! way with `decode_as_type`.

use crate::address::decode_address;
use crate::error::{CodecError, MetadataError, RegistryError};
use crate::hex_utils::parse_hex;
use crate::registry::{ArgCodec, ArgField, Field, PrimitiveKind, TypeDef, TypeId, TypeRegistry, Variant};
use crate::value::{FormFields, FormValue};
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed};
use parity_scale_codec::Decode;
use primitive_types::U256;
use scale_info::form::PortableForm;
use scale_info::{PortableRegistry, TypeDefPrimitive};
use scale_value::scale::{decode_as_type, encode_as_type};
use scale_value::{Composite, Primitive, Value, ValueDef};

/// Values nesting deeper than this are rejected before they reach the encoder.
const MAX_NESTING: usize = 128;

#[derive(Debug, Clone)]
struct PalletCalls {
    name: String,
    /// Type id of the pallet's call enum.
    calls: Option<TypeId>,
}

#[derive(Debug, Clone)]
pub struct MetadataRegistry {
    types: PortableRegistry,
    pallets: Vec<PalletCalls>,
}

impl MetadataRegistry {
    /// A registry over bare types, with no pallets.
    pub fn new(types: PortableRegistry) -> Self {
        MetadataRegistry {
            types,
            pallets: Vec::new(),
        }
    }

    /// Register a pallet whose calls are the variants of `call_type`.
    pub fn with_pallet(mut self, name: impl Into<String>, call_type: Option<TypeId>) -> Self {
        self.pallets.push(PalletCalls {
            name: name.into(),
            calls: call_type,
        });
        self
    }

    /// Load SCALE-encoded `RuntimeMetadataPrefixed`, given either as raw bytes or as
    /// `0x`-prefixed hex text (the format returned by `state_getMetadata`).
    pub fn from_metadata_bytes(data: &[u8]) -> Result<Self, MetadataError> {
        let trimmed = data.trim_ascii();
        let bytes = if trimmed.starts_with(b"0x") {
            let text = String::from_utf8_lossy(trimmed);
            parse_hex(&text)?
        } else {
            trimmed.to_vec()
        };

        let prefixed = RuntimeMetadataPrefixed::decode(&mut &bytes[..])?;
        let registry = match prefixed.1 {
            RuntimeMetadata::V14(m) => {
                let pallets = m
                    .pallets
                    .iter()
                    .map(|p| PalletCalls {
                        name: p.name.clone(),
                        calls: p.calls.as_ref().map(|c| c.ty.id),
                    })
                    .collect();
                MetadataRegistry {
                    types: m.types,
                    pallets,
                }
            }
            RuntimeMetadata::V15(m) => {
                let pallets = m
                    .pallets
                    .iter()
                    .map(|p| PalletCalls {
                        name: p.name.clone(),
                        calls: p.calls.as_ref().map(|c| c.ty.id),
                    })
                    .collect();
                MetadataRegistry {
                    types: m.types,
                    pallets,
                }
            }
            other => return Err(MetadataError::UnsupportedVersion(other.version())),
        };

        tracing::debug!(
            types = registry.types.types.len(),
            pallets = registry.pallets.len(),
            "Loaded runtime metadata"
        );
        Ok(registry)
    }

    pub fn types(&self) -> &PortableRegistry {
        &self.types
    }

    /// Pallet names, in metadata order.
    pub fn pallets(&self) -> Vec<&str> {
        self.pallets.iter().map(|p| p.name.as_str()).collect()
    }

    fn find_pallet(&self, pallet: &str) -> Result<&PalletCalls, MetadataError> {
        self.pallets
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(pallet))
            .ok_or_else(|| MetadataError::PalletNotFound(pallet.to_string()))
    }

    fn call_variants(&self, pallet: &str) -> Result<&[scale_info::Variant<PortableForm>], MetadataError> {
        let entry = self.find_pallet(pallet)?;
        let call_type = entry
            .calls
            .ok_or_else(|| MetadataError::NoCalls(entry.name.clone()))?;
        match self.types.resolve(call_type).map(|ty| &ty.type_def) {
            Some(scale_info::TypeDef::Variant(v)) => Ok(&v.variants),
            _ => Err(MetadataError::InvalidCallType(call_type)),
        }
    }

    /// Call names of a pallet, ordered by call index.
    pub fn calls(&self, pallet: &str) -> Result<Vec<String>, MetadataError> {
        let mut variants: Vec<_> = self.call_variants(pallet)?.iter().collect();
        variants.sort_by_key(|v| v.index);
        Ok(variants.into_iter().map(|v| v.name.clone()).collect())
    }

    /// Declared arguments of a call.
    pub fn call_fields(&self, pallet: &str, call: &str) -> Result<Vec<ArgField>, MetadataError> {
        let variants = self.call_variants(pallet)?;
        let variant = variants
            .iter()
            .find(|v| v.name == call)
            .or_else(|| variants.iter().find(|v| v.name.eq_ignore_ascii_case(call)))
            .ok_or_else(|| MetadataError::CallNotFound {
                pallet: pallet.to_string(),
                call: call.to_string(),
            })?;

        Ok(variant
            .fields
            .iter()
            .enumerate()
            .map(|(i, f)| {
                let name = f.name.clone().unwrap_or_else(|| i.to_string());
                ArgField::new(name, f.ty.id)
            })
            .collect())
    }

    /// Human-readable name of a type, e.g. `AccountId32`, `Vec<u32>` or `Bytes`.
    pub fn type_name(&self, type_id: TypeId) -> String {
        let Some(ty) = self.types.resolve(type_id) else {
            return type_id.to_string();
        };
        if let Some(last) = ty.path.segments.last() {
            return last.clone();
        }
        match &ty.type_def {
            scale_info::TypeDef::Primitive(p) => format!("{p:?}").to_lowercase(),
            scale_info::TypeDef::Compact(c) => format!("Compact<{}>", self.type_name(c.type_param.id)),
            scale_info::TypeDef::Sequence(s) => match self.type_name(s.type_param.id).as_str() {
                "u8" => "Bytes".to_string(),
                inner => format!("Vec<{inner}>"),
            },
            scale_info::TypeDef::Array(a) => format!("[{}; {}]", self.type_name(a.type_param.id), a.len),
            scale_info::TypeDef::Tuple(t) => {
                let inner: Vec<String> = t.fields.iter().map(|f| self.type_name(f.id)).collect();
                format!("({})", inner.join(", "))
            }
            scale_info::TypeDef::BitSequence(_) => "BitVec".to_string(),
            _ => type_id.to_string(),
        }
    }

    fn resolve(&self, type_id: TypeId) -> Result<&scale_info::Type<PortableForm>, CodecError> {
        self.types
            .resolve(type_id)
            .ok_or(CodecError::UnknownType(type_id))
    }

    fn is_u8(&self, type_id: TypeId) -> bool {
        matches!(
            self.types.resolve(type_id).map(|ty| &ty.type_def),
            Some(scale_info::TypeDef::Primitive(TypeDefPrimitive::U8))
        )
    }

    /// Shape a form value into a `scale_value::Value` for `type_id`.
    fn shape_value(&self, type_id: TypeId, value: &FormValue, depth: usize) -> Result<Value, CodecError> {
        if depth > MAX_NESTING {
            return Err(CodecError::TooDeep);
        }
        let ty = self.resolve(type_id)?;

        match &ty.type_def {
            scale_info::TypeDef::Composite(c) => {
                let fields = self.fields_to_composite(&c.fields, value, depth)?;
                Ok(composite(fields))
            }
            scale_info::TypeDef::Variant(v) => self.variant_to_scale_value(&v.variants, value, depth),
            scale_info::TypeDef::Sequence(s) => {
                let elem = s.type_param.id;
                if self.is_u8(elem) {
                    return bytes_to_scale_value(value, None);
                }
                let FormValue::Array(items) = value else {
                    return Err(CodecError::mismatch("array", value.kind()));
                };
                let items = items
                    .iter()
                    .map(|item| self.shape_value(elem, item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(composite(Composite::Unnamed(items)))
            }
            scale_info::TypeDef::Array(a) => {
                let elem = a.type_param.id;
                if self.is_u8(elem) {
                    return bytes_to_scale_value(value, Some(a.len as usize));
                }
                let FormValue::Array(items) = value else {
                    return Err(CodecError::mismatch("array", value.kind()));
                };
                if items.len() != a.len as usize {
                    return Err(CodecError::LengthMismatch {
                        expected: a.len as usize,
                        found: items.len(),
                    });
                }
                let items = items
                    .iter()
                    .map(|item| self.shape_value(elem, item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(composite(Composite::Unnamed(items)))
            }
            scale_info::TypeDef::Tuple(t) => {
                let ids: Vec<TypeId> = t.fields.iter().map(|f| f.id).collect();
                let items = match (ids.as_slice(), value) {
                    ([], _) => Vec::new(),
                    (ids, FormValue::Array(items)) if items.len() == ids.len() => ids
                        .iter()
                        .zip(items)
                        .map(|(id, item)| self.shape_value(*id, item, depth + 1))
                        .collect::<Result<Vec<_>, _>>()?,
                    ([id], value) => vec![self.shape_value(*id, value, depth + 1)?],
                    (ids, FormValue::Array(items)) => {
                        return Err(CodecError::LengthMismatch {
                            expected: ids.len(),
                            found: items.len(),
                        });
                    }
                    (_, other) => return Err(CodecError::mismatch("tuple", other.kind())),
                };
                Ok(composite(Composite::Unnamed(items)))
            }
            scale_info::TypeDef::Primitive(p) => primitive_to_scale_value(primitive_kind(p), value),
            scale_info::TypeDef::Compact(c) => self.shape_value(c.type_param.id, value, depth + 1),
            scale_info::TypeDef::BitSequence(_) => bits_to_scale_value(value),
        }
    }

    fn fields_to_composite(
        &self,
        fields: &[scale_info::Field<PortableForm>],
        value: &FormValue,
        depth: usize,
    ) -> Result<Composite<()>, CodecError> {
        let named = fields.iter().all(|f| f.name.is_some());

        match fields {
            [] => Ok(Composite::Unnamed(Vec::new())),
            [field] if field.name.is_none() => {
                let inner = self.shape_value(field.ty.id, value, depth + 1)?;
                Ok(Composite::Unnamed(vec![inner]))
            }
            fields if named => {
                let FormValue::Object(map) = value else {
                    return Err(CodecError::mismatch("object", value.kind()));
                };
                let mut out = Vec::with_capacity(fields.len());
                for field in fields {
                    let name = field.name.clone().unwrap_or_default();
                    let item = map
                        .get(&name)
                        .ok_or_else(|| CodecError::MissingField(name.clone()))?;
                    out.push((name, self.shape_value(field.ty.id, item, depth + 1)?));
                }
                Ok(Composite::Named(out))
            }
            fields => {
                let FormValue::Array(items) = value else {
                    return Err(CodecError::mismatch("array", value.kind()));
                };
                if items.len() != fields.len() {
                    return Err(CodecError::LengthMismatch {
                        expected: fields.len(),
                        found: items.len(),
                    });
                }
                let out = fields
                    .iter()
                    .zip(items)
                    .map(|(field, item)| self.shape_value(field.ty.id, item, depth + 1))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Composite::Unnamed(out))
            }
        }
    }

    fn variant_to_scale_value(
        &self,
        variants: &[scale_info::Variant<PortableForm>],
        value: &FormValue,
        depth: usize,
    ) -> Result<Value, CodecError> {
        let (name, payload) = match value {
            FormValue::Variant { name, value } => (name.as_str(), value.as_deref()),
            // A bare name selects a variant without fields, e.g. "Staked".
            FormValue::Str(name) => (name.as_str(), None),
            // Null maps onto `Option::None` and similar.
            FormValue::Null if variants.iter().any(|v| v.name == "None" && v.fields.is_empty()) => {
                ("None", None)
            }
            other => return Err(CodecError::mismatch("variant", other.kind())),
        };

        let variant = variants
            .iter()
            .find(|v| v.name == name)
            .ok_or_else(|| CodecError::UnknownVariant(name.to_string()))?;

        let values = if variant.fields.is_empty() {
            Composite::Unnamed(Vec::new())
        } else {
            let payload = payload.unwrap_or(&FormValue::Null);
            self.fields_to_composite(&variant.fields, payload, depth)?
        };
        Ok(Value::variant(variant.name.clone(), values))
    }

    /// Turn a decoded `scale_value::Value` back into a form value.
    fn form_value(&self, value: &Value<TypeId>) -> FormValue {
        match &value.value {
            ValueDef::Primitive(p) => match p {
                Primitive::Bool(b) => FormValue::Bool(*b),
                Primitive::Char(c) => FormValue::Str(c.to_string()),
                Primitive::String(s) => FormValue::Str(s.clone()),
                Primitive::U128(n) => FormValue::Unsigned(U256::from(*n)),
                Primitive::I128(n) => FormValue::Signed(*n),
                Primitive::U256(bytes) => FormValue::Unsigned(U256::from_little_endian(bytes)),
                Primitive::I256(bytes) => FormValue::Bytes(bytes.to_vec()),
            },
            ValueDef::BitSequence(bits) => FormValue::Array(bits.iter().map(FormValue::Bool).collect()),
            ValueDef::Variant(v) => FormValue::Variant {
                name: v.name.clone(),
                value: self.payload_from_composite(&v.values).map(Box::new),
            },
            ValueDef::Composite(c) => self.composite_from_scale_value(value.context, c),
        }
    }

    fn composite_from_scale_value(&self, type_id: TypeId, c: &Composite<TypeId>) -> FormValue {
        let type_def = self.types.resolve(type_id).map(|ty| &ty.type_def);

        let is_bytes = match type_def {
            Some(scale_info::TypeDef::Sequence(s)) => self.is_u8(s.type_param.id),
            Some(scale_info::TypeDef::Array(a)) => self.is_u8(a.type_param.id),
            _ => false,
        };
        if is_bytes {
            let items: Vec<&Value<TypeId>> = match c {
                Composite::Named(fields) => fields.iter().map(|(_, v)| v).collect(),
                Composite::Unnamed(items) => items.iter().collect(),
            };
            return FormValue::Bytes(items.into_iter().filter_map(scalar_byte).collect());
        }

        match c {
            Composite::Named(fields) if fields.is_empty() => FormValue::Null,
            Composite::Named(fields) => FormValue::Object(
                fields
                    .iter()
                    .map(|(name, v)| (name.clone(), self.form_value(v)))
                    .collect::<FormFields>(),
            ),
            Composite::Unnamed(items) => match (type_def, items.as_slice()) {
                (Some(scale_info::TypeDef::Sequence(_) | scale_info::TypeDef::Array(_)), items) => {
                    FormValue::Array(items.iter().map(|v| self.form_value(v)).collect())
                }
                (_, []) => FormValue::Null,
                // Newtype wrappers decode to their inner value.
                (Some(scale_info::TypeDef::Composite(_)), [inner]) => self.form_value(inner),
                (_, items) => FormValue::Array(items.iter().map(|v| self.form_value(v)).collect()),
            },
        }
    }

    fn payload_from_composite(&self, c: &Composite<TypeId>) -> Option<FormValue> {
        match c {
            Composite::Named(fields) if fields.is_empty() => None,
            Composite::Named(fields) => Some(FormValue::Object(
                fields
                    .iter()
                    .map(|(name, v)| (name.clone(), self.form_value(v)))
                    .collect(),
            )),
            Composite::Unnamed(items) => match items.as_slice() {
                [] => None,
                [single] => Some(self.form_value(single)),
                items => Some(FormValue::Array(
                    items.iter().map(|v| self.form_value(v)).collect(),
                )),
            },
        }
    }
}

fn composite(fields: Composite<()>) -> Value {
    Value {
        value: ValueDef::Composite(fields),
        context: (),
    }
}

fn scalar_byte(value: &Value<TypeId>) -> Option<u8> {
    match value.value {
        ValueDef::Primitive(Primitive::U128(n)) => u8::try_from(n).ok(),
        _ => None,
    }
}

/// Byte blobs accept raw bytes, `0x` hex, an SS58 address (for 32-byte targets),
/// UTF-8 text, or an array of small integers.
fn bytes_to_scale_value(value: &FormValue, expected_len: Option<usize>) -> Result<Value, CodecError> {
    let bytes = match value {
        FormValue::Bytes(bytes) => bytes.clone(),
        FormValue::Str(s) if s.starts_with("0x") || s.starts_with("0X") => {
            parse_hex(s).map_err(|e| CodecError::InvalidHex(e.to_string()))?
        }
        FormValue::Str(s) => match expected_len {
            Some(32) => match decode_address(s) {
                Some(account) => account.to_vec(),
                None => s.as_bytes().to_vec(),
            },
            _ => s.as_bytes().to_vec(),
        },
        FormValue::Array(items) => items
            .iter()
            .map(|item| match item {
                FormValue::Unsigned(n) if n.bits() <= 8 => Ok(n.low_u32() as u8),
                FormValue::Unsigned(n) => Err(CodecError::OutOfRange {
                    value: n.to_string(),
                    target: "u8".to_string(),
                }),
                other => Err(CodecError::mismatch("byte", other.kind())),
            })
            .collect::<Result<Vec<_>, _>>()?,
        other => return Err(CodecError::mismatch("bytes", other.kind())),
    };

    if let Some(expected) = expected_len
        && bytes.len() != expected
    {
        return Err(CodecError::LengthMismatch {
            expected,
            found: bytes.len(),
        });
    }

    Ok(composite(Composite::Unnamed(
        bytes.into_iter().map(|b| Value::u128(b as u128)).collect(),
    )))
}

fn bits_to_scale_value(value: &FormValue) -> Result<Value, CodecError> {
    let FormValue::Array(items) = value else {
        return Err(CodecError::mismatch("array of booleans", value.kind()));
    };
    let bits = items
        .iter()
        .map(|item| match item {
            FormValue::Bool(b) => Ok(*b),
            FormValue::Unsigned(n) if *n <= U256::one() => Ok(!n.is_zero()),
            other => Err(CodecError::mismatch("boolean", other.kind())),
        })
        .collect::<Result<scale_value::BitSequence, _>>()?;
    Ok(Value {
        value: ValueDef::BitSequence(bits),
        context: (),
    })
}

fn primitive_kind(p: &TypeDefPrimitive) -> PrimitiveKind {
    match p {
        TypeDefPrimitive::Bool => PrimitiveKind::Bool,
        TypeDefPrimitive::Char => PrimitiveKind::Char,
        TypeDefPrimitive::Str => PrimitiveKind::Str,
        TypeDefPrimitive::U8 => PrimitiveKind::U8,
        TypeDefPrimitive::U16 => PrimitiveKind::U16,
        TypeDefPrimitive::U32 => PrimitiveKind::U32,
        TypeDefPrimitive::U64 => PrimitiveKind::U64,
        TypeDefPrimitive::U128 => PrimitiveKind::U128,
        TypeDefPrimitive::U256 => PrimitiveKind::U256,
        TypeDefPrimitive::I8 => PrimitiveKind::I8,
        TypeDefPrimitive::I16 => PrimitiveKind::I16,
        TypeDefPrimitive::I32 => PrimitiveKind::I32,
        TypeDefPrimitive::I64 => PrimitiveKind::I64,
        TypeDefPrimitive::I128 => PrimitiveKind::I128,
        TypeDefPrimitive::I256 => PrimitiveKind::I256,
    }
}

/// Bit width and signedness of integer primitives.
fn integer_width(kind: PrimitiveKind) -> Option<(usize, bool)> {
    use PrimitiveKind::*;
    match kind {
        U8 => Some((8, false)),
        U16 => Some((16, false)),
        U32 => Some((32, false)),
        U64 => Some((64, false)),
        U128 => Some((128, false)),
        U256 => Some((256, false)),
        I8 => Some((8, true)),
        I16 => Some((16, true)),
        I32 => Some((32, true)),
        I64 => Some((64, true)),
        I128 => Some((128, true)),
        I256 => Some((256, true)),
        Bool | Char | Str => None,
    }
}

fn u256_to_le(n: &U256) -> [u8; 32] {
    let mut out = [0u8; 32];
    for (i, word) in n.0.iter().enumerate() {
        out[i * 8..(i + 1) * 8].copy_from_slice(&word.to_le_bytes());
    }
    out
}

fn primitive_to_scale_value(kind: PrimitiveKind, value: &FormValue) -> Result<Value, CodecError> {
    match kind {
        PrimitiveKind::Bool => match value {
            FormValue::Bool(b) => Ok(Value::bool(*b)),
            other => Err(CodecError::mismatch("boolean", other.kind())),
        },
        PrimitiveKind::Char => match value {
            FormValue::Str(s) if s.chars().count() == 1 => {
                let c = s.chars().next().unwrap_or_default();
                Ok(Value::char(c))
            }
            other => Err(CodecError::mismatch("single character", other.kind())),
        },
        // Numbers and booleans given as JSON values are written as their text.
        PrimitiveKind::Str => match value {
            FormValue::Str(s) => Ok(Value::string(s.clone())),
            FormValue::Unsigned(n) => Ok(Value::string(n.to_string())),
            FormValue::Signed(n) => Ok(Value::string(n.to_string())),
            FormValue::Bool(b) => Ok(Value::string(b.to_string())),
            other => Err(CodecError::mismatch("string", other.kind())),
        },
        PrimitiveKind::I256 => match value {
            FormValue::Bytes(bytes) if bytes.len() == 32 => {
                let mut raw = [0u8; 32];
                raw.copy_from_slice(bytes);
                Ok(Value {
                    value: ValueDef::Primitive(Primitive::I256(raw)),
                    context: (),
                })
            }
            _ => Err(CodecError::Unsupported("256-bit signed integers from text")),
        },
        kind => {
            let (bits, signed) = integer_width(kind).ok_or(CodecError::Unsupported("primitive kinds"))?;
            let target = format!("{}{bits}", if signed { "i" } else { "u" });
            if signed {
                signed_to_scale_value(value, bits, target)
            } else {
                unsigned_to_scale_value(value, bits, target)
            }
        }
    }
}

fn unsigned_to_scale_value(value: &FormValue, bits: usize, target: String) -> Result<Value, CodecError> {
    let n = match value {
        FormValue::Unsigned(n) => *n,
        FormValue::Signed(n) if *n >= 0 => U256::from(*n as u128),
        FormValue::Signed(n) => {
            return Err(CodecError::OutOfRange {
                value: n.to_string(),
                target,
            });
        }
        FormValue::Str(s) => {
            U256::from_dec_str(s.trim()).map_err(|_| CodecError::mismatch("integer", "string"))?
        }
        other => return Err(CodecError::mismatch("integer", other.kind())),
    };

    if n.bits() > bits {
        return Err(CodecError::OutOfRange {
            value: n.to_string(),
            target,
        });
    }

    if bits <= 128 {
        Ok(Value::u128(n.low_u128()))
    } else {
        Ok(Value {
            value: ValueDef::Primitive(Primitive::U256(u256_to_le(&n))),
            context: (),
        })
    }
}

fn signed_to_scale_value(value: &FormValue, bits: usize, target: String) -> Result<Value, CodecError> {
    let out_of_range = |v: String| CodecError::OutOfRange {
        value: v,
        target: target.clone(),
    };

    let n: i128 = match value {
        FormValue::Signed(n) => *n,
        FormValue::Unsigned(n) if n.bits() < 128 => n.low_u128() as i128,
        FormValue::Unsigned(n) => return Err(out_of_range(n.to_string())),
        FormValue::Str(s) => s
            .trim()
            .parse::<i128>()
            .map_err(|_| CodecError::mismatch("integer", "string"))?,
        other => return Err(CodecError::mismatch("integer", other.kind())),
    };

    if bits < 128 {
        let max = (1i128 << (bits - 1)) - 1;
        let min = -(1i128 << (bits - 1));
        if n < min || n > max {
            return Err(out_of_range(n.to_string()));
        }
    }
    Ok(Value::i128(n))
}

fn convert_fields(fields: &[scale_info::Field<PortableForm>]) -> Vec<Field> {
    fields
        .iter()
        .map(|f| Field {
            name: f.name.clone(),
            type_id: f.ty.id,
        })
        .collect()
}

impl TypeRegistry for MetadataRegistry {
    fn find_type(&self, id: TypeId) -> Result<TypeDef, RegistryError> {
        let ty = self.types.resolve(id).ok_or(RegistryError::UnknownType(id))?;

        Ok(match &ty.type_def {
            scale_info::TypeDef::Composite(c) => TypeDef::Struct {
                fields: convert_fields(&c.fields),
            },
            scale_info::TypeDef::Variant(v) => TypeDef::Enum {
                variants: v
                    .variants
                    .iter()
                    .map(|var| Variant {
                        name: var.name.clone(),
                        index: var.index,
                        fields: convert_fields(&var.fields),
                    })
                    .collect(),
            },
            scale_info::TypeDef::Sequence(s) => TypeDef::Sequence {
                elem: s.type_param.id,
            },
            scale_info::TypeDef::Array(a) => TypeDef::SizedVec {
                elem: a.type_param.id,
                len: a.len,
            },
            scale_info::TypeDef::Tuple(t) => TypeDef::Tuple {
                fields: t.fields.iter().map(|f| f.id).collect(),
            },
            scale_info::TypeDef::Primitive(p) => TypeDef::Primitive(primitive_kind(p)),
            scale_info::TypeDef::Compact(c) => TypeDef::Compact {
                inner: c.type_param.id,
            },
            scale_info::TypeDef::BitSequence(_) => TypeDef::BitSequence,
        })
    }

    fn find_codec(&self, id: TypeId) -> Result<Box<dyn ArgCodec + '_>, RegistryError> {
        if self.types.resolve(id).is_none() {
            return Err(RegistryError::NoCodec(id));
        }
        Ok(Box::new(MetadataCodec {
            registry: self,
            type_id: id,
        }))
    }
}

struct MetadataCodec<'a> {
    registry: &'a MetadataRegistry,
    type_id: TypeId,
}

impl ArgCodec for MetadataCodec<'_> {
    fn try_encode(&self, value: &FormValue) -> Result<Vec<u8>, CodecError> {
        let shaped = self.registry.shape_value(self.type_id, value, 0)?;
        let mut out = Vec::new();
        encode_as_type(&shaped, self.type_id, &self.registry.types, &mut out)
            .map_err(|e| CodecError::Encode(e.to_string()))?;
        Ok(out)
    }

    fn try_decode(&self, bytes: &[u8]) -> Result<FormValue, CodecError> {
        let mut cursor = bytes;
        let decoded = decode_as_type(&mut cursor, self.type_id, &self.registry.types)
            .map_err(|e| CodecError::Decode(e.to_string()))?;
        Ok(self.registry.form_value(&decoded))
    }
}
