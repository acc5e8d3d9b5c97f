// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Hex decomposition of encoded arguments.
//!
//! Builds a tree mirroring a type's structure so that each sub-element's encoded
//! bytes can be shown and edited on their own. Decomposition is a display aid: any
//! shape mismatch or registry failure turns the node into a plain leaf. The reason
//! is kept in [`Decomposition::skipped`] for debugging.

use crate::encode::encode_arg;
use crate::registry::{Field, TypeDef, TypeId, TypeRegistry};
use crate::value::FormValue;
use serde::Serialize;
use std::fmt;

/// Nodes at this depth or deeper are always leaves. Newtype structs are looked
/// through without using up a level.
pub const MAX_DEPTH: usize = 4;

/// Newtype wrappers looked through in a row before giving up.
const MAX_NEWTYPE_HOPS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CompoundType {
    Sequence,
    SizedVec,
    Struct,
    Enum,
    Tuple,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum HexTreeNode {
    Leaf,
    #[serde(rename_all = "camelCase")]
    Compound {
        compound_type: CompoundType,
        children: Vec<HexTreeChild>,
    },
}

impl HexTreeNode {
    pub fn is_leaf(&self) -> bool {
        matches!(self, HexTreeNode::Leaf)
    }

    pub fn children(&self) -> &[HexTreeChild] {
        match self {
            HexTreeNode::Leaf => &[],
            HexTreeNode::Compound { children, .. } => children,
        }
    }

    pub fn compound_type(&self) -> Option<CompoundType> {
        match self {
            HexTreeNode::Leaf => None,
            HexTreeNode::Compound { compound_type, .. } => Some(*compound_type),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HexTreeChild {
    /// `[i]` for positions, the field name for struct fields, the variant name (or
    /// `Variant.field`) for enum payloads.
    pub label: String,
    pub type_id: TypeId,
    /// Encoding of this sub-value alone; `"0x"` when it does not encode.
    pub hex: String,
    pub node: HexTreeNode,
}

/// Why a node was left as a leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    DepthLimit,
    EmptyValue,
    /// `Vec<u8>` or `[u8; N]`, shown as one blob rather than per byte.
    ByteBlob,
    /// Primitive, compact or bit sequence types have no parts.
    Scalar,
    /// The value does not have the shape the type calls for.
    ShapeMismatch(String),
    Registry(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DepthLimit => write!(f, "depth limit reached"),
            SkipReason::EmptyValue => write!(f, "value is empty"),
            SkipReason::ByteBlob => write!(f, "byte blob"),
            SkipReason::Scalar => write!(f, "scalar type"),
            SkipReason::ShapeMismatch(detail) => write!(f, "shape mismatch: {detail}"),
            SkipReason::Registry(detail) => write!(f, "registry error: {detail}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposition {
    pub node: HexTreeNode,
    pub skipped: Option<SkipReason>,
}

/// Decompose `value` of type `type_id` into a hex tree.
pub fn decompose_arg_hex<R>(registry: &R, type_id: TypeId, value: &FormValue, depth: usize) -> HexTreeNode
where
    R: TypeRegistry + ?Sized,
{
    explain_decomposition(registry, type_id, value, depth).node
}

/// Like [`decompose_arg_hex`], but also reports why the root became a leaf.
pub fn explain_decomposition<R>(
    registry: &R,
    type_id: TypeId,
    value: &FormValue,
    depth: usize,
) -> Decomposition
where
    R: TypeRegistry + ?Sized,
{
    match decompose(registry, type_id, value, depth) {
        Ok(node) => Decomposition {
            node,
            skipped: None,
        },
        Err(reason) => {
            tracing::trace!(type_id, depth, ?reason, "Decomposition skipped");
            Decomposition {
                node: HexTreeNode::Leaf,
                skipped: Some(reason),
            }
        }
    }
}

fn decompose<R>(registry: &R, type_id: TypeId, value: &FormValue, depth: usize) -> Result<HexTreeNode, SkipReason>
where
    R: TypeRegistry + ?Sized,
{
    if depth >= MAX_DEPTH {
        return Err(SkipReason::DepthLimit);
    }
    if value.is_empty_input() {
        return Err(SkipReason::EmptyValue);
    }

    let lookup = |id: TypeId| registry.find_type(id).map_err(|e| SkipReason::Registry(e.to_string()));
    let mut type_def = lookup(type_id)?;
    for _ in 0..MAX_NEWTYPE_HOPS {
        let inner = match &type_def {
            TypeDef::Struct { fields } => match fields.as_slice() {
                [Field { name: None, type_id }] => *type_id,
                _ => break,
            },
            _ => break,
        };
        type_def = lookup(inner)?;
    }

    let (compound_type, parts) = match type_def {
        TypeDef::Sequence { elem } => (CompoundType::Sequence, sequence_parts(registry, elem, value)?),
        TypeDef::SizedVec { elem, .. } => (CompoundType::SizedVec, sequence_parts(registry, elem, value)?),
        TypeDef::Struct { fields } => {
            if let [Field { name: None, .. }] = fields.as_slice() {
                return Err(SkipReason::DepthLimit);
            }
            (CompoundType::Struct, struct_parts(&fields, value)?)
        }
        TypeDef::Enum { variants } => {
            let FormValue::Variant { name, value: payload } = value else {
                return Err(mismatch("variant", value));
            };
            let variant = variants
                .iter()
                .find(|v| &v.name == name)
                .ok_or_else(|| SkipReason::ShapeMismatch(format!("unknown variant '{name}'")))?;
            let payload = payload.as_deref().unwrap_or(&FormValue::Null);
            (CompoundType::Enum, enum_parts(&variant.name, &variant.fields, payload)?)
        }
        TypeDef::Tuple { fields } => {
            let FormValue::Array(items) = value else {
                return Err(mismatch("array", value));
            };
            if items.len() != fields.len() {
                return Err(SkipReason::ShapeMismatch(format!(
                    "tuple of {} given {} items",
                    fields.len(),
                    items.len()
                )));
            }
            let parts = fields
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (ty, item))| (format!("[{i}]"), *ty, item.clone()))
                .collect();
            (CompoundType::Tuple, parts)
        }
        TypeDef::Primitive(_) | TypeDef::Compact { .. } | TypeDef::BitSequence => {
            return Err(SkipReason::Scalar);
        }
    };

    if parts.is_empty() {
        return Err(SkipReason::ShapeMismatch("no parts".to_string()));
    }

    let children = parts
        .into_iter()
        .map(|(label, child_type, child_value)| HexTreeChild {
            hex: encode_arg(registry, child_type, &child_value).hex,
            node: decompose_arg_hex(registry, child_type, &child_value, depth + 1),
            label,
            type_id: child_type,
        })
        .collect();

    Ok(HexTreeNode::Compound {
        compound_type,
        children,
    })
}

type Parts = Vec<(String, TypeId, FormValue)>;

fn mismatch(expected: &str, value: &FormValue) -> SkipReason {
    SkipReason::ShapeMismatch(format!("expected {expected}, got {}", value.kind()))
}

fn sequence_parts<R>(registry: &R, elem: TypeId, value: &FormValue) -> Result<Parts, SkipReason>
where
    R: TypeRegistry + ?Sized,
{
    if registry.is_byte(elem) {
        return Err(SkipReason::ByteBlob);
    }
    let FormValue::Array(items) = value else {
        return Err(mismatch("array", value));
    };
    Ok(items
        .iter()
        .enumerate()
        .map(|(i, item)| (format!("[{i}]"), elem, item.clone()))
        .collect())
}

fn struct_parts(fields: &[Field], value: &FormValue) -> Result<Parts, SkipReason> {
    match value {
        FormValue::Object(map) => Ok(fields
            .iter()
            .enumerate()
            .map(|(i, field)| {
                let label = field.name.clone().unwrap_or_else(|| format!("[{i}]"));
                let item = map.get(&label).cloned().unwrap_or_default();
                (label, field.type_id, item)
            })
            .collect()),
        FormValue::Array(items) if fields.iter().all(|f| f.name.is_none()) => {
            if items.len() != fields.len() {
                return Err(mismatch("one item per field", value));
            }
            Ok(fields
                .iter()
                .zip(items)
                .enumerate()
                .map(|(i, (field, item))| (format!("[{i}]"), field.type_id, item.clone()))
                .collect())
        }
        _ => Err(mismatch("object", value)),
    }
}

fn enum_parts(variant: &str, fields: &[Field], payload: &FormValue) -> Result<Parts, SkipReason> {
    match fields {
        [] => Ok(Vec::new()),
        [field] => Ok(vec![(variant.to_string(), field.type_id, payload.clone())]),
        _ => {
            let parts = fields
                .iter()
                .enumerate()
                .map(|(i, field)| {
                    let key = field.name.clone().unwrap_or_else(|| format!("[{i}]"));
                    let item = match payload {
                        FormValue::Object(map) => map.get(&key).cloned(),
                        FormValue::Array(items) => items.get(i).cloned(),
                        _ => None,
                    };
                    (format!("{variant}.{key}"), field.type_id, item.unwrap_or_default())
                })
                .collect();
            Ok(parts)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_fixtures::{self, MockRegistry, nested_value};

    fn labels(node: &HexTreeNode) -> Vec<&str> {
        node.children().iter().map(|c| c.label.as_str()).collect()
    }

    #[test]
    fn test_decompose_sequence() {
        let registry = MockRegistry::new();
        let value = FormValue::Array(vec![FormValue::str("1"), FormValue::str("2")]);
        let node = decompose_arg_hex(&registry, test_fixtures::U32_VEC, &value, 0);

        assert_eq!(node.compound_type(), Some(CompoundType::Sequence));
        assert_eq!(labels(&node), vec!["[0]", "[1]"]);
        assert_eq!(node.children()[0].hex, "0x01000000");
        assert_eq!(node.children()[1].hex, "0x02000000");
        assert!(node.children()[0].node.is_leaf());
    }

    #[test]
    fn test_decompose_struct() {
        let registry = MockRegistry::new();
        let value = FormValue::object([("a", FormValue::str("5")), ("b", FormValue::str("true"))]);
        let node = decompose_arg_hex(&registry, test_fixtures::PAIR_STRUCT, &value, 0);

        assert_eq!(node.compound_type(), Some(CompoundType::Struct));
        assert_eq!(labels(&node), vec!["a", "b"]);
        assert_eq!(node.children()[0].hex, "0x0500");
        assert_eq!(node.children()[1].hex, "0x01");
    }

    #[test]
    fn test_decompose_struct_missing_field_has_empty_hex() {
        let registry = MockRegistry::new();
        let value = FormValue::object([("a", FormValue::str("5"))]);
        let node = decompose_arg_hex(&registry, test_fixtures::PAIR_STRUCT, &value, 0);
        assert_eq!(node.children()[1].hex, "0x");
    }

    #[test]
    fn test_decompose_enum_single_field() {
        let registry = MockRegistry::new();
        let value = FormValue::variant("Index", FormValue::str("9"));
        let node = decompose_arg_hex(&registry, test_fixtures::MULTI_ADDRESS, &value, 0);

        assert_eq!(node.compound_type(), Some(CompoundType::Enum));
        assert_eq!(labels(&node), vec!["Index"]);
        assert_eq!(node.children()[0].hex, "0x09000000");
    }

    #[test]
    fn test_decompose_enum_multi_field() {
        let registry = MockRegistry::new();
        let value = FormValue::variant(
            "Pair",
            FormValue::Array(vec![FormValue::str("1"), FormValue::str("2")]),
        );
        let node = decompose_arg_hex(&registry, test_fixtures::PAYEE, &value, 0);
        assert_eq!(labels(&node), vec!["Pair.[0]", "Pair.[1]"]);
        assert_eq!(node.children()[1].hex, "0x0200");

        let named = FormValue::variant(
            "Named",
            FormValue::object([("x", FormValue::str("1")), ("y", FormValue::str("true"))]),
        );
        let node = decompose_arg_hex(&registry, test_fixtures::PAYEE, &named, 0);
        assert_eq!(labels(&node), vec!["Named.x", "Named.y"]);
        assert_eq!(node.children()[0].hex, "0x01");
    }

    #[test]
    fn test_decompose_enum_without_payload_is_leaf() {
        let registry = MockRegistry::new();
        let value = FormValue::unit_variant("Staked");
        let explained = explain_decomposition(&registry, test_fixtures::PAYEE, &value, 0);
        assert!(explained.node.is_leaf());
        assert!(matches!(explained.skipped, Some(SkipReason::ShapeMismatch(_))));
    }

    #[test]
    fn test_decompose_tuple() {
        let registry = MockRegistry::new();
        let value = FormValue::Array(vec![FormValue::str("1"), FormValue::str("2")]);
        let node = decompose_arg_hex(&registry, test_fixtures::TUPLE, &value, 0);
        assert_eq!(node.compound_type(), Some(CompoundType::Tuple));
        assert_eq!(labels(&node), vec!["[0]", "[1]"]);
        assert_eq!(node.children()[0].hex, "0x01");
        assert_eq!(node.children()[1].hex, "0x0200");
    }

    #[test]
    fn test_decompose_byte_blobs_are_leaves() {
        let registry = MockRegistry::new();
        let value = FormValue::Array(vec![FormValue::str("1"), FormValue::str("2")]);

        let explained = explain_decomposition(&registry, test_fixtures::BYTES, &value, 0);
        assert_eq!(explained.skipped, Some(SkipReason::ByteBlob));

        let explained = explain_decomposition(&registry, test_fixtures::BYTES4, &value, 0);
        assert_eq!(explained.skipped, Some(SkipReason::ByteBlob));
    }

    #[test]
    fn test_decompose_leaf_cases() {
        let registry = MockRegistry::new();
        let cases = [
            (test_fixtures::U32, FormValue::str("1"), SkipReason::Scalar),
            (test_fixtures::U32_VEC, FormValue::Null, SkipReason::EmptyValue),
            (test_fixtures::U32_VEC, FormValue::str(""), SkipReason::EmptyValue),
        ];
        for (type_id, value, reason) in cases {
            let explained = explain_decomposition(&registry, type_id, &value, 0);
            assert!(explained.node.is_leaf());
            assert_eq!(explained.skipped, Some(reason));
        }

        let explained = explain_decomposition(&registry, 777, &FormValue::str("1"), 0);
        assert!(matches!(explained.skipped, Some(SkipReason::Registry(_))));

        let explained =
            explain_decomposition(&registry, test_fixtures::U32_VEC, &FormValue::Array(vec![]), 0);
        assert!(matches!(explained.skipped, Some(SkipReason::ShapeMismatch(_))));

        let explained =
            explain_decomposition(&registry, test_fixtures::U32_VEC, &FormValue::str("1"), 0);
        assert!(matches!(explained.skipped, Some(SkipReason::ShapeMismatch(_))));
    }

    #[test]
    fn test_decompose_depth_limit() {
        let registry = MockRegistry::new();
        let value = FormValue::object([("a", FormValue::str("5")), ("b", FormValue::str("true"))]);
        let explained = explain_decomposition(&registry, test_fixtures::PAIR_STRUCT, &value, MAX_DEPTH);
        assert_eq!(explained.skipped, Some(SkipReason::DepthLimit));
    }

    #[test]
    fn test_decompose_newtype_does_not_use_depth() {
        let registry = MockRegistry::new();
        let value = FormValue::object([("a", FormValue::str("5")), ("b", FormValue::str("true"))]);

        let node = decompose_arg_hex(&registry, test_fixtures::WRAPPED_PAIR, &value, MAX_DEPTH - 1);
        assert_eq!(node.compound_type(), Some(CompoundType::Struct));
        let labels: Vec<_> = node.children().iter().map(|c| c.label.as_str()).collect();
        assert_eq!(labels, vec!["a", "b"]);
        assert_eq!(node.children()[0].hex, "0x0500");
    }

    #[test]
    fn test_decompose_endless_newtype_terminates() {
        let registry = MockRegistry::new();
        let value = FormValue::object([("x", FormValue::str("1"))]);
        let explained = explain_decomposition(&registry, test_fixtures::ENDLESS, &value, 0);
        assert_eq!(explained.node, HexTreeNode::Leaf);
        assert_eq!(explained.skipped, Some(SkipReason::DepthLimit));
    }

    #[test]
    fn test_decompose_recursive_type_terminates() {
        let registry = MockRegistry::new();
        let value = nested_value(50);
        let node = decompose_arg_hex(&registry, test_fixtures::RECURSIVE, &value, 0);

        let mut depth = 0;
        let mut current = &node;
        while let Some(child) = current.children().first() {
            depth += 1;
            current = &child.node;
        }
        assert_eq!(depth, MAX_DEPTH);
    }
}
