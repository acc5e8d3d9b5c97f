//! Test fixtures: a hand-written type registry with small, predictable codecs.
//!
//! Integers are little-endian and fixed-width, sequences carry a one-byte length
//! prefix, enums a one-byte index. This keeps expected hex easy to write by hand
//! while exercising every `TypeDef` shape the engine handles.

use crate::error::{CodecError, RegistryError};
use crate::registry::{ArgCodec, Field, PrimitiveKind, TypeDef, TypeId, TypeRegistry, Variant};
use crate::value::{FormFields, FormValue};
use primitive_types::U256;
use std::collections::BTreeMap;

pub const ALICE: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

pub const U8: TypeId = 1;
pub const U16: TypeId = 2;
pub const U32: TypeId = 3;
pub const BOOL: TypeId = 4;
/// `Vec<u8>`
pub const BYTES: TypeId = 5;
/// `[u8; 32]`
pub const ACCOUNT: TypeId = 6;
/// `struct { a: u16, b: bool }`
pub const PAIR_STRUCT: TypeId = 7;
/// `enum { Id([u8; 32]), Index(u32) }`
pub const MULTI_ADDRESS: TypeId = 8;
/// `Vec<u32>`
pub const U32_VEC: TypeId = 9;
/// Always encodes to `0x0102`.
pub const FIXED_TWO: TypeId = 10;
/// `(u8, u16)`
pub const TUPLE: TypeId = 11;
/// `enum { Staked, Account([u8; 32]), Pair(u8, u16), Named { x: u8, y: bool } }`
pub const PAYEE: TypeId = 12;
/// Encodes every value to zero bytes.
pub const EMPTY: TypeId = 13;
/// `struct Nested { inner: Nested }` guarded only by the value's depth.
pub const RECURSIVE: TypeId = 14;
/// Codec that always fails.
pub const BROKEN: TypeId = 15;
/// `enum { Id(<broken>) }`
pub const BROKEN_ADDRESS: TypeId = 16;
/// `[u8; 4]`
pub const BYTES4: TypeId = 17;
/// Always encodes to `0x03`.
pub const FIXED_ONE: TypeId = 20;
/// `String`, length-prefixed UTF-8. Only accepts strings.
pub const TEXT: TypeId = 21;
/// `struct { label: String, count: u16 }`
pub const LABELLED: TypeId = 22;
/// `struct Wrapped(PairStruct)`
pub const WRAPPED_PAIR: TypeId = 23;
/// `struct Endless(Endless)`
pub const ENDLESS: TypeId = 24;

#[derive(Debug, Clone)]
pub enum MockCodec {
    /// Constant encoding; decodes `n` bytes as a blob.
    Fixed(Vec<u8>),
    Uint(usize),
    Bool,
    /// Length-prefixed byte blob.
    Bytes,
    FixedBytes(usize),
    Text,
    Seq(Box<MockCodec>),
    Struct(Vec<(String, MockCodec)>),
    Tuple(Vec<MockCodec>),
    Enum(Vec<(String, Vec<MockCodec>)>),
    Empty,
    Failing(&'static str),
}

impl MockCodec {
    fn encode(&self, value: &FormValue) -> Result<Vec<u8>, CodecError> {
        match self {
            MockCodec::Fixed(bytes) => {
                if value.is_null() {
                    return Err(CodecError::mismatch("a value", "null"));
                }
                Ok(bytes.clone())
            }
            MockCodec::Uint(width) => match value {
                FormValue::Unsigned(n) if n.bits() <= width * 8 => {
                    let le = n.low_u128().to_le_bytes();
                    Ok(le[..*width].to_vec())
                }
                FormValue::Unsigned(n) => Err(CodecError::OutOfRange {
                    value: n.to_string(),
                    target: format!("u{}", width * 8),
                }),
                other => Err(CodecError::mismatch("integer", other.kind())),
            },
            MockCodec::Bool => match value {
                FormValue::Bool(b) => Ok(vec![*b as u8]),
                other => Err(CodecError::mismatch("boolean", other.kind())),
            },
            MockCodec::Bytes => {
                let bytes = blob(value)?;
                let mut out = vec![bytes.len() as u8];
                out.extend(bytes);
                Ok(out)
            }
            MockCodec::FixedBytes(len) => {
                let bytes = blob(value)?;
                if bytes.len() != *len {
                    return Err(CodecError::LengthMismatch {
                        expected: *len,
                        found: bytes.len(),
                    });
                }
                Ok(bytes)
            }
            MockCodec::Text => match value {
                FormValue::Str(text) => {
                    let mut out = vec![text.len() as u8];
                    out.extend(text.as_bytes());
                    Ok(out)
                }
                other => Err(CodecError::mismatch("string", other.kind())),
            },
            MockCodec::Seq(elem) => match value {
                FormValue::Array(items) => {
                    let mut out = vec![items.len() as u8];
                    for item in items {
                        out.extend(elem.encode(item)?);
                    }
                    Ok(out)
                }
                other => Err(CodecError::mismatch("array", other.kind())),
            },
            MockCodec::Struct(fields) => match value {
                FormValue::Object(map) => {
                    let mut out = Vec::new();
                    for (name, codec) in fields {
                        let field = map
                            .get(name)
                            .ok_or_else(|| CodecError::MissingField(name.clone()))?;
                        out.extend(codec.encode(field)?);
                    }
                    Ok(out)
                }
                other => Err(CodecError::mismatch("object", other.kind())),
            },
            MockCodec::Tuple(codecs) => match value {
                FormValue::Array(items) if items.len() == codecs.len() => {
                    let mut out = Vec::new();
                    for (codec, item) in codecs.iter().zip(items) {
                        out.extend(codec.encode(item)?);
                    }
                    Ok(out)
                }
                other => Err(CodecError::mismatch("tuple", other.kind())),
            },
            MockCodec::Enum(variants) => {
                let FormValue::Variant { name, value } = value else {
                    return Err(CodecError::mismatch("variant", value.kind()));
                };
                let (index, (_, codecs)) = variants
                    .iter()
                    .enumerate()
                    .find(|(_, (n, _))| n == name)
                    .ok_or_else(|| CodecError::UnknownVariant(name.clone()))?;
                let mut out = vec![index as u8];
                match (codecs.len(), value.as_deref()) {
                    (0, _) => {}
                    (1, Some(payload)) => out.extend(codecs[0].encode(payload)?),
                    (_, Some(FormValue::Array(items))) if items.len() == codecs.len() => {
                        for (codec, item) in codecs.iter().zip(items) {
                            out.extend(codec.encode(item)?);
                        }
                    }
                    _ => return Err(CodecError::mismatch("variant payload", "missing")),
                }
                Ok(out)
            }
            MockCodec::Empty => Ok(Vec::new()),
            MockCodec::Failing(msg) => Err(CodecError::Encode(msg.to_string())),
        }
    }

    fn decode(&self, bytes: &[u8]) -> Result<(FormValue, usize), CodecError> {
        let take = |n: usize| {
            bytes.get(..n).ok_or(CodecError::NotEnoughBytes {
                needed: n,
                remaining: bytes.len(),
            })
        };
        match self {
            MockCodec::Fixed(fixed) => {
                Ok((FormValue::Bytes(take(fixed.len())?.to_vec()), fixed.len()))
            }
            MockCodec::Uint(width) => {
                let raw = take(*width)?;
                Ok((FormValue::Unsigned(U256::from_little_endian(raw)), *width))
            }
            MockCodec::Bool => match take(1)?[0] {
                0 => Ok((FormValue::Bool(false), 1)),
                1 => Ok((FormValue::Bool(true), 1)),
                b => Err(CodecError::Decode(format!("invalid bool byte {b}"))),
            },
            MockCodec::Bytes => {
                let len = take(1)?[0] as usize;
                let all = take(1 + len)?;
                Ok((FormValue::Bytes(all[1..].to_vec()), 1 + len))
            }
            MockCodec::FixedBytes(len) => Ok((FormValue::Bytes(take(*len)?.to_vec()), *len)),
            MockCodec::Text => {
                let len = take(1)?[0] as usize;
                let all = take(1 + len)?;
                let text = String::from_utf8(all[1..].to_vec())
                    .map_err(|e| CodecError::Decode(e.to_string()))?;
                Ok((FormValue::Str(text), 1 + len))
            }
            MockCodec::Seq(elem) => {
                let count = take(1)?[0] as usize;
                let mut offset = 1;
                let mut items = Vec::with_capacity(count);
                for _ in 0..count {
                    let (item, used) = elem.decode(&bytes[offset..])?;
                    items.push(item);
                    offset += used;
                }
                Ok((FormValue::Array(items), offset))
            }
            MockCodec::Struct(fields) => {
                let mut offset = 0;
                let mut map = FormFields::new();
                for (name, codec) in fields {
                    let (item, used) = codec.decode(&bytes[offset..])?;
                    map.insert(name.clone(), item);
                    offset += used;
                }
                Ok((FormValue::Object(map), offset))
            }
            MockCodec::Tuple(codecs) => {
                let mut offset = 0;
                let mut items = Vec::new();
                for codec in codecs {
                    let (item, used) = codec.decode(&bytes[offset..])?;
                    items.push(item);
                    offset += used;
                }
                Ok((FormValue::Array(items), offset))
            }
            MockCodec::Enum(variants) => {
                let index = take(1)?[0] as usize;
                let (name, codecs) = variants
                    .get(index)
                    .ok_or_else(|| CodecError::Decode(format!("invalid variant index {index}")))?;
                let mut offset = 1;
                let mut items = Vec::new();
                for codec in codecs {
                    let (item, used) = codec.decode(&bytes[offset..])?;
                    items.push(item);
                    offset += used;
                }
                let value = match items.len() {
                    0 => FormValue::unit_variant(name.clone()),
                    1 => FormValue::variant(name.clone(), items.remove(0)),
                    _ => FormValue::variant(name.clone(), FormValue::Array(items)),
                };
                Ok((value, offset))
            }
            MockCodec::Empty => Ok((FormValue::Null, 0)),
            MockCodec::Failing(msg) => Err(CodecError::Decode(msg.to_string())),
        }
    }
}

fn blob(value: &FormValue) -> Result<Vec<u8>, CodecError> {
    match value {
        FormValue::Bytes(b) => Ok(b.clone()),
        FormValue::Str(s) if s.starts_with("0x") => {
            crate::hex_utils::parse_hex(s).map_err(|e| CodecError::InvalidHex(e.to_string()))
        }
        other => Err(CodecError::mismatch("bytes", other.kind())),
    }
}

impl ArgCodec for MockCodec {
    fn try_encode(&self, value: &FormValue) -> Result<Vec<u8>, CodecError> {
        self.encode(value)
    }

    fn try_decode(&self, bytes: &[u8]) -> Result<FormValue, CodecError> {
        self.decode(bytes).map(|(value, _)| value)
    }
}

pub struct MockRegistry {
    types: BTreeMap<TypeId, (TypeDef, MockCodec)>,
}

impl MockRegistry {
    pub fn new() -> Self {
        use MockCodec as C;

        let account = || C::FixedBytes(32);
        let mut types = BTreeMap::new();
        let mut add = |id: TypeId, def: TypeDef, codec: MockCodec| {
            types.insert(id, (def, codec));
        };

        add(U8, TypeDef::Primitive(PrimitiveKind::U8), C::Uint(1));
        add(U16, TypeDef::Primitive(PrimitiveKind::U16), C::Uint(2));
        add(U32, TypeDef::Primitive(PrimitiveKind::U32), C::Uint(4));
        add(BOOL, TypeDef::Primitive(PrimitiveKind::Bool), C::Bool);
        add(BYTES, TypeDef::Sequence { elem: U8 }, C::Bytes);
        add(ACCOUNT, TypeDef::SizedVec { elem: U8, len: 32 }, account());
        add(BYTES4, TypeDef::SizedVec { elem: U8, len: 4 }, C::FixedBytes(4));
        add(
            PAIR_STRUCT,
            TypeDef::Struct {
                fields: vec![Field::named("a", U16), Field::named("b", BOOL)],
            },
            C::Struct(vec![("a".into(), C::Uint(2)), ("b".into(), C::Bool)]),
        );
        add(
            MULTI_ADDRESS,
            TypeDef::Enum {
                variants: vec![
                    variant("Id", 0, vec![Field::unnamed(ACCOUNT)]),
                    variant("Index", 1, vec![Field::unnamed(U32)]),
                ],
            },
            C::Enum(vec![
                ("Id".into(), vec![account()]),
                ("Index".into(), vec![C::Uint(4)]),
            ]),
        );
        add(
            U32_VEC,
            TypeDef::Sequence { elem: U32 },
            C::Seq(Box::new(C::Uint(4))),
        );
        add(
            FIXED_TWO,
            TypeDef::Primitive(PrimitiveKind::U16),
            C::Fixed(vec![0x01, 0x02]),
        );
        add(
            FIXED_ONE,
            TypeDef::Primitive(PrimitiveKind::U8),
            C::Fixed(vec![0x03]),
        );
        add(
            TUPLE,
            TypeDef::Tuple {
                fields: vec![U8, U16],
            },
            C::Tuple(vec![C::Uint(1), C::Uint(2)]),
        );
        add(
            PAYEE,
            TypeDef::Enum {
                variants: vec![
                    variant("Staked", 0, vec![]),
                    variant("Account", 1, vec![Field::unnamed(ACCOUNT)]),
                    variant("Pair", 2, vec![Field::unnamed(U8), Field::unnamed(U16)]),
                    variant(
                        "Named",
                        3,
                        vec![Field::named("x", U8), Field::named("y", BOOL)],
                    ),
                ],
            },
            C::Enum(vec![
                ("Staked".into(), vec![]),
                ("Account".into(), vec![account()]),
                ("Pair".into(), vec![C::Uint(1), C::Uint(2)]),
                // Named payloads are not needed by the codec tests.
                ("Named".into(), vec![C::Failing("named payloads unsupported")]),
            ]),
        );
        add(EMPTY, TypeDef::Primitive(PrimitiveKind::Str), C::Empty);
        add(TEXT, TypeDef::Primitive(PrimitiveKind::Str), C::Text);
        add(
            WRAPPED_PAIR,
            TypeDef::Struct {
                fields: vec![Field::unnamed(PAIR_STRUCT)],
            },
            C::Struct(vec![("a".into(), C::Uint(2)), ("b".into(), C::Bool)]),
        );
        add(
            ENDLESS,
            TypeDef::Struct {
                fields: vec![Field::unnamed(ENDLESS)],
            },
            C::Fixed(vec![0x00]),
        );
        add(
            LABELLED,
            TypeDef::Struct {
                fields: vec![Field::named("label", TEXT), Field::named("count", U16)],
            },
            C::Struct(vec![("label".into(), C::Text), ("count".into(), C::Uint(2))]),
        );
        add(
            RECURSIVE,
            TypeDef::Struct {
                fields: vec![Field::named("inner", RECURSIVE)],
            },
            C::Fixed(vec![0x00]),
        );
        add(
            BROKEN,
            TypeDef::Primitive(PrimitiveKind::U64),
            C::Failing("broken codec"),
        );
        add(
            BROKEN_ADDRESS,
            TypeDef::Enum {
                variants: vec![variant("Id", 0, vec![Field::unnamed(BROKEN)])],
            },
            C::Enum(vec![("Id".into(), vec![C::Failing("smart coercion failed")])]),
        );

        MockRegistry { types }
    }
}

impl Default for MockRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn variant(name: &str, index: u8, fields: Vec<Field>) -> Variant {
    Variant {
        name: name.to_string(),
        index,
        fields,
    }
}

impl TypeRegistry for MockRegistry {
    fn find_type(&self, id: TypeId) -> Result<TypeDef, RegistryError> {
        self.types
            .get(&id)
            .map(|(def, _)| def.clone())
            .ok_or(RegistryError::UnknownType(id))
    }

    fn find_codec(&self, id: TypeId) -> Result<Box<dyn ArgCodec + '_>, RegistryError> {
        self.types
            .get(&id)
            .map(|(_, codec)| Box::new(codec.clone()) as Box<dyn ArgCodec>)
            .ok_or(RegistryError::NoCodec(id))
    }
}

/// Build `count` levels of `{inner: {inner: ...}}` ending in null.
pub fn nested_value(count: usize) -> FormValue {
    (0..count).fold(FormValue::Null, |acc, _| FormValue::object([("inner", acc)]))
}
