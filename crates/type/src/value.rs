// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::ordered_float::{OrderedF32, OrderedF64, OrderedFloatError};
use crate::r#type::Type;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// A Tessera value, represented as a native Rust type.
///
/// Floating point variants wrap their payload in an ordered float so that
/// values are `Eq`, `Ord`, and `Hash` and can serve as predicate operands and
/// key components.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Value {
    /// A boolean: true or false.
    Bool(bool),
    /// A 4-byte floating point
    Float4(OrderedF32),
    /// An 8-byte floating point
    Float8(OrderedF64),
    /// A 1-byte signed integer
    Int1(i8),
    /// A 2-byte signed integer
    Int2(i16),
    /// A 4-byte signed integer
    Int4(i32),
    /// An 8-byte signed integer
    Int8(i64),
    /// A 1-byte unsigned integer
    Uint1(u8),
    /// A 2-byte unsigned integer
    Uint2(u16),
    /// A 4-byte unsigned integer
    Uint4(u32),
    /// An 8-byte unsigned integer
    Uint8(u64),
    /// A UTF-8 encoded text
    Utf8(String),
    /// A variable-length byte string
    Blob(#[serde(with = "serde_bytes")] Vec<u8>),
}

impl Value {
    /// The value's type.
    pub fn ty(&self) -> Type {
        match self {
            Value::Bool(_) => Type::Bool,
            Value::Float4(_) => Type::Float4,
            Value::Float8(_) => Type::Float8,
            Value::Int1(_) => Type::Int1,
            Value::Int2(_) => Type::Int2,
            Value::Int4(_) => Type::Int4,
            Value::Int8(_) => Type::Int8,
            Value::Uint1(_) => Type::Uint1,
            Value::Uint2(_) => Type::Uint2,
            Value::Uint4(_) => Type::Uint4,
            Value::Uint8(_) => Type::Uint8,
            Value::Utf8(_) => Type::Utf8,
            Value::Blob(_) => Type::Blob,
        }
    }

    /// The smallest value of the given type under key ordering.
    pub fn min_of(ty: Type) -> Value {
        match ty {
            Type::Bool => Value::Bool(false),
            Type::Float4 => Value::Float4(OrderedF32(f32::NEG_INFINITY)),
            Type::Float8 => Value::Float8(OrderedF64(f64::NEG_INFINITY)),
            Type::Int1 => Value::Int1(i8::MIN),
            Type::Int2 => Value::Int2(i16::MIN),
            Type::Int4 => Value::Int4(i32::MIN),
            Type::Int8 => Value::Int8(i64::MIN),
            Type::Uint1 => Value::Uint1(0),
            Type::Uint2 => Value::Uint2(0),
            Type::Uint4 => Value::Uint4(0),
            Type::Uint8 => Value::Uint8(0),
            Type::Utf8 => Value::Utf8(String::new()),
            Type::Blob => Value::Blob(Vec::new()),
        }
    }

    /// The largest value of the given type under key ordering, or None for
    /// variable-length types, which have no maximum.
    pub fn max_of(ty: Type) -> Option<Value> {
        match ty {
            Type::Bool => Some(Value::Bool(true)),
            Type::Float4 => Some(Value::Float4(OrderedF32(f32::INFINITY))),
            Type::Float8 => Some(Value::Float8(OrderedF64(f64::INFINITY))),
            Type::Int1 => Some(Value::Int1(i8::MAX)),
            Type::Int2 => Some(Value::Int2(i16::MAX)),
            Type::Int4 => Some(Value::Int4(i32::MAX)),
            Type::Int8 => Some(Value::Int8(i64::MAX)),
            Type::Uint1 => Some(Value::Uint1(u8::MAX)),
            Type::Uint2 => Some(Value::Uint2(u16::MAX)),
            Type::Uint4 => Some(Value::Uint4(u32::MAX)),
            Type::Uint8 => Some(Value::Uint8(u64::MAX)),
            Type::Utf8 | Type::Blob => None,
        }
    }

    /// A Float4 value, rejecting NaN.
    pub fn float4(v: f32) -> Result<Value, OrderedFloatError> {
        OrderedF32::try_from(v).map(Value::Float4)
    }

    /// A Float8 value, rejecting NaN.
    pub fn float8(v: f64) -> Result<Value, OrderedFloatError> {
        OrderedF64::try_from(v).map(Value::Float8)
    }

    /// A Blob value over the given bytes.
    pub fn blob(bytes: impl Into<Vec<u8>>) -> Value {
        Value::Blob(bytes.into())
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<i8> for Value {
    fn from(v: i8) -> Self {
        Value::Int1(v)
    }
}

impl From<i16> for Value {
    fn from(v: i16) -> Self {
        Value::Int2(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Int4(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Int8(v)
    }
}

impl From<u8> for Value {
    fn from(v: u8) -> Self {
        Value::Uint1(v)
    }
}

impl From<u16> for Value {
    fn from(v: u16) -> Self {
        Value::Uint2(v)
    }
}

impl From<u32> for Value {
    fn from(v: u32) -> Self {
        Value::Uint4(v)
    }
}

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        Value::Uint8(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Utf8(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Utf8(v)
    }
}

impl TryFrom<f32> for Value {
    type Error = OrderedFloatError;

    fn try_from(v: f32) -> Result<Self, Self::Error> {
        Value::float4(v)
    }
}

impl TryFrom<f64> for Value {
    type Error = OrderedFloatError;

    fn try_from(v: f64) -> Result<Self, Self::Error> {
        Value::float8(v)
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(true) => f.write_str("true"),
            Value::Bool(false) => f.write_str("false"),
            Value::Float4(value) => Display::fmt(value, f),
            Value::Float8(value) => Display::fmt(value, f),
            Value::Int1(value) => Display::fmt(value, f),
            Value::Int2(value) => Display::fmt(value, f),
            Value::Int4(value) => Display::fmt(value, f),
            Value::Int8(value) => Display::fmt(value, f),
            Value::Uint1(value) => Display::fmt(value, f),
            Value::Uint2(value) => Display::fmt(value, f),
            Value::Uint4(value) => Display::fmt(value, f),
            Value::Uint8(value) => Display::fmt(value, f),
            Value::Utf8(value) => Display::fmt(value, f),
            Value::Blob(value) => {
                for byte in value {
                    write!(f, "{byte:02x}")?;
                }
                Ok(())
            }
        }
    }
}
