// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! The type registry seam.
//!
//! The engine never builds type definitions or byte encodings itself. It asks a
//! [`TypeRegistry`] for the shape of a type and for an [`ArgCodec`] that can turn a
//! [`FormValue`] into bytes and back. [`MetadataRegistry`](crate::MetadataRegistry)
//! provides both from runtime metadata; tests use hand-written registries.

use crate::error::{CodecError, RegistryError};
use crate::value::FormValue;
use serde::Serialize;

/// Key of a type in the registry.
pub type TypeId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrimitiveKind {
    Bool,
    Char,
    Str,
    U8,
    U16,
    U32,
    U64,
    U128,
    U256,
    I8,
    I16,
    I32,
    I64,
    I128,
    I256,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    /// `None` for tuple-struct fields and unnamed variant payloads.
    pub name: Option<String>,
    pub type_id: TypeId,
}

impl Field {
    pub fn named(name: impl Into<String>, type_id: TypeId) -> Self {
        Field {
            name: Some(name.into()),
            type_id,
        }
    }

    pub fn unnamed(type_id: TypeId) -> Self {
        Field {
            name: None,
            type_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    pub name: String,
    pub index: u8,
    pub fields: Vec<Field>,
}

/// Shape of a registry type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeDef {
    Primitive(PrimitiveKind),
    Struct { fields: Vec<Field> },
    Enum { variants: Vec<Variant> },
    Sequence { elem: TypeId },
    SizedVec { elem: TypeId, len: u32 },
    Tuple { fields: Vec<TypeId> },
    Compact { inner: TypeId },
    BitSequence,
}

impl TypeDef {
    pub fn variant(&self, name: &str) -> Option<&Variant> {
        match self {
            TypeDef::Enum { variants } => variants.iter().find(|v| v.name == name),
            _ => None,
        }
    }
}

/// Encoder/decoder for one registry type.
pub trait ArgCodec {
    fn try_encode(&self, value: &FormValue) -> Result<Vec<u8>, CodecError>;

    /// Decode a value from the front of `bytes`. Trailing bytes are left unread;
    /// callers measure consumption by re-encoding the result.
    fn try_decode(&self, bytes: &[u8]) -> Result<FormValue, CodecError>;
}

/// Read-only source of type definitions and codecs.
pub trait TypeRegistry {
    fn find_type(&self, id: TypeId) -> Result<TypeDef, RegistryError>;

    fn find_codec(&self, id: TypeId) -> Result<Box<dyn ArgCodec + '_>, RegistryError>;

    /// True when `id` is the `u8` primitive, i.e. sequences of it are byte blobs.
    fn is_byte(&self, id: TypeId) -> bool {
        matches!(self.find_type(id), Ok(TypeDef::Primitive(PrimitiveKind::U8)))
    }
}

/// A named call argument, in declared order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgField {
    pub name: String,
    pub type_id: TypeId,
}

impl ArgField {
    pub fn new(name: impl Into<String>, type_id: TypeId) -> Self {
        ArgField {
            name: name.into(),
            type_id,
        }
    }
}
