// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// All column types a Tessera table may declare.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
    /// A boolean: true or false.
    Bool,
    /// A 4-byte floating point
    Float4,
    /// An 8-byte floating point
    Float8,
    /// A 1-byte signed integer
    Int1,
    /// A 2-byte signed integer
    Int2,
    /// A 4-byte signed integer
    Int4,
    /// An 8-byte signed integer
    Int8,
    /// A 1-byte unsigned integer
    Uint1,
    /// A 2-byte unsigned integer
    Uint2,
    /// A 4-byte unsigned integer
    Uint4,
    /// An 8-byte unsigned integer
    Uint8,
    /// A UTF-8 encoded text
    Utf8,
    /// A variable-length byte string
    Blob,
}

impl Type {
    /// The width in bytes of a fixed-width type, or None for variable-length
    /// types.
    pub fn fixed_width(&self) -> Option<usize> {
        match self {
            Type::Bool | Type::Int1 | Type::Uint1 => Some(1),
            Type::Int2 | Type::Uint2 => Some(2),
            Type::Float4 | Type::Int4 | Type::Uint4 => Some(4),
            Type::Float8 | Type::Int8 | Type::Uint8 => Some(8),
            Type::Utf8 | Type::Blob => None,
        }
    }

    /// Whether values of the type vary in encoded length.
    pub fn is_variable_width(&self) -> bool {
        self.fixed_width().is_none()
    }
}

impl Display for Type {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Type::Bool => f.write_str("BOOL"),
            Type::Float4 => f.write_str("FLOAT4"),
            Type::Float8 => f.write_str("FLOAT8"),
            Type::Int1 => f.write_str("INT1"),
            Type::Int2 => f.write_str("INT2"),
            Type::Int4 => f.write_str("INT4"),
            Type::Int8 => f.write_str("INT8"),
            Type::Uint1 => f.write_str("UINT1"),
            Type::Uint2 => f.write_str("UINT2"),
            Type::Uint4 => f.write_str("UINT4"),
            Type::Uint8 => f.write_str("UINT8"),
            Type::Utf8 => f.write_str("UTF8"),
            Type::Blob => f.write_str("BLOB"),
        }
    }
}
