// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

//! Copy-on-write editing of nested form values.
//!
//! Edits made on a decomposed leaf are written back into the argument's form value
//! through [`patch_value_at_path`]. The input is never modified; callers swap in the
//! returned value.

use crate::hex_tree::CompoundType;
use crate::value::{FormFields, FormValue};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PathSegment {
    Index(usize),
    Key(String),
}

impl From<usize> for PathSegment {
    fn from(index: usize) -> Self {
        PathSegment::Index(index)
    }
}

impl From<&str> for PathSegment {
    fn from(key: &str) -> Self {
        PathSegment::Key(key.to_string())
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathSegment::Index(i) => write!(f, "[{i}]"),
            PathSegment::Key(k) => write!(f, "{k}"),
        }
    }
}

/// Return a copy of `root` with the node at `path` replaced by `new_value`.
///
/// An index segment treats the current node as an array and a key segment as an
/// object; a node of the wrong shape (or null) is replaced by a fresh container.
/// Arrays grow with nulls up to the index. On a tagged variant, the key `value`
/// addresses its payload and a final `type` key renames it when given a string.
/// Any other key segment on a variant, or a `type` edit that is not a plain rename,
/// leaves the variant unchanged.
pub fn patch_value_at_path(root: &FormValue, path: &[PathSegment], new_value: FormValue) -> FormValue {
    let Some((head, rest)) = path.split_first() else {
        return new_value;
    };

    match head {
        PathSegment::Index(index) => {
            let mut items = match root {
                FormValue::Array(items) => items.clone(),
                _ => Vec::new(),
            };
            if items.len() <= *index {
                items.resize(*index + 1, FormValue::Null);
            }
            let patched = patch_value_at_path(&items[*index], rest, new_value);
            items[*index] = patched;
            FormValue::Array(items)
        }
        PathSegment::Key(key) => match root {
            FormValue::Variant { name, value } if key == "value" => {
                let current = value.as_deref().unwrap_or(&FormValue::Null);
                FormValue::variant(name.clone(), patch_value_at_path(current, rest, new_value))
            }
            FormValue::Variant { value, .. } if key == "type" && rest.is_empty() => match new_value {
                FormValue::Str(name) => FormValue::Variant {
                    name,
                    value: value.clone(),
                },
                _ => root.clone(),
            },
            FormValue::Variant { .. } => root.clone(),
            _ => {
                let mut fields = match root {
                    FormValue::Object(fields) => fields.clone(),
                    _ => FormFields::new(),
                };
                let current = fields.get(key).cloned().unwrap_or_default();
                fields.insert(key.clone(), patch_value_at_path(&current, rest, new_value));
                FormValue::Object(fields)
            }
        },
    }
}

/// Path segment addressing a decomposition child inside its parent's value.
///
/// `"[N]"` labels address index `N`; children of an enum address the variant's
/// `value`; any other label is an object key.
pub fn path_segment_for_child(label: &str, parent: CompoundType) -> PathSegment {
    if let Some(index) = parse_index_label(label) {
        return PathSegment::Index(index);
    }
    if parent == CompoundType::Enum {
        return PathSegment::Key("value".to_string());
    }
    PathSegment::Key(label.to_string())
}

/// Full relative path of a decomposition child.
///
/// Same as [`path_segment_for_child`], except that children of a multi-field variant
/// (labelled `Variant.field` or `Variant.[i]`) also step into the payload field.
pub fn child_path(label: &str, parent: CompoundType) -> Vec<PathSegment> {
    if parent == CompoundType::Enum
        && let Some((_, field)) = label.split_once('.')
    {
        let field_segment = match parse_index_label(field) {
            Some(index) => PathSegment::Index(index),
            None => PathSegment::Key(field.to_string()),
        };
        return vec![PathSegment::Key("value".to_string()), field_segment];
    }
    vec![path_segment_for_child(label, parent)]
}

fn parse_index_label(label: &str) -> Option<usize> {
    label.strip_prefix('[')?.strip_suffix(']')?.parse().ok()
}
