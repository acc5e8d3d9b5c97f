// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Metadata-driven argument codec for building Substrate calls from form input.
//!
//! The crate turns loosely-typed form values into SCALE bytes (and back) using a
//! runtime type registry, breaks encoded arguments down into a tree of hex
//! fragments, and applies edits made on those fragments back into the form value.
//!
//! Every public operation returns plain result data. Registry and codec failures are
//! caught at the function boundary and reported inside the result.

pub mod address;
pub mod coerce;
pub mod decode;
pub mod denomination;
pub mod encode;
pub mod error;
pub mod hex_tree;
pub mod hex_utils;
pub mod metadata;
pub mod patch;
pub mod registry;
pub mod validate;
pub mod value;

#[cfg(test)]
pub mod test_fixtures;

pub use address::{decode_address, encode_address};
pub use decode::{DecodeAllResult, DecodeResult, decode_all_args, decode_arg, flatten_decoded_value};
pub use denomination::{Denomination, from_planck, get_denominations, to_planck};
pub use encode::{EncodeAllResult, EncodeResult, encode_all_args, encode_arg};
pub use error::{CodecError, DenominationError, MetadataError, RegistryError};
pub use hex_tree::{
    CompoundType, Decomposition, HexTreeChild, HexTreeNode, SkipReason, decompose_arg_hex, explain_decomposition,
};
pub use metadata::MetadataRegistry;
pub use patch::{PathSegment, child_path, patch_value_at_path, path_segment_for_child};
pub use registry::{ArgCodec, ArgField, Field, PrimitiveKind, TypeDef, TypeId, TypeRegistry, Variant};
pub use validate::{FieldValidation, ValidationSummary, validate_all_args, validate_field};
pub use value::{FormFields, FormValue, FormValues};
