// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::registry::TypeId;
use thiserror::Error;

/// Failures raised while looking up a type in a [`TypeRegistry`](crate::TypeRegistry).
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Unknown type id {0}")]
    UnknownType(TypeId),

    #[error("No codec available for type id {0}")]
    NoCodec(TypeId),
}

/// Failures raised by an [`ArgCodec`](crate::ArgCodec) while encoding or decoding a value.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    #[error("Unknown type id {0}")]
    UnknownType(TypeId),

    #[error("Expected {expected}, got {found}")]
    Mismatch { expected: String, found: String },

    #[error("Missing field '{0}'")]
    MissingField(String),

    #[error("Unknown variant '{0}'")]
    UnknownVariant(String),

    #[error("Expected {expected} items, got {found}")]
    LengthMismatch { expected: usize, found: usize },

    #[error("Value {value} does not fit in {target}")]
    OutOfRange { value: String, target: String },

    #[error("Invalid hex: {0}")]
    InvalidHex(String),

    #[error("Not enough bytes: needed {needed}, {remaining} remaining")]
    NotEnoughBytes { needed: usize, remaining: usize },

    #[error("Value nests deeper than the type registry allows")]
    TooDeep,

    #[error("{0} are not supported")]
    Unsupported(&'static str),

    #[error("{0}")]
    Encode(String),

    #[error("{0}")]
    Decode(String),
}

impl CodecError {
    pub(crate) fn mismatch(expected: impl Into<String>, found: impl Into<String>) -> Self {
        CodecError::Mismatch {
            expected: expected.into(),
            found: found.into(),
        }
    }
}

/// Either side of a registry-backed codec call.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ArgError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Codec(#[from] CodecError),
}

#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("Invalid metadata hex: {0}")]
    InvalidHex(#[from] hex::FromHexError),

    #[error("Failed to decode runtime metadata: {0}")]
    Decode(#[from] parity_scale_codec::Error),

    #[error("Unsupported metadata version V{0}; only V14 and V15 are supported")]
    UnsupportedVersion(u32),

    #[error("Pallet '{0}' not found")]
    PalletNotFound(String),

    #[error("Pallet '{0}' has no calls")]
    NoCalls(String),

    #[error("Call '{call}' not found in pallet '{pallet}'")]
    CallNotFound { pallet: String, call: String },

    #[error("Call type {0} is not an enum")]
    InvalidCallType(TypeId),
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DenominationError {
    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Amount has {found} decimal places, at most {max} are allowed")]
    TooManyDecimals { found: usize, max: u32 },

    #[error("Amount '{0}' is too large")]
    Overflow(String),
}
