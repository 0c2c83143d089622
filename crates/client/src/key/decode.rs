// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Result;
use crate::error::Error;
use crate::schema::Schema;
use tessera_type::{OrderedF32, OrderedF64, Type, Value};

/// Decodes a range key back into column values.
///
/// The encoding is not self-describing: the caller supplies the same column
/// list the key was encoded with. The whole input must be consumed.
pub fn decode_range_key(bytes: &[u8], column_indexes: &[usize], schema: &Schema) -> Result<Vec<Value>> {
    let mut decoder = Decoder { input: bytes };
    let mut values = Vec::with_capacity(column_indexes.len());
    for (i, &index) in column_indexes.iter().enumerate() {
        let column = schema.column(index)?;
        values.push(decoder.decode_value(column.ty, i + 1 == column_indexes.len())?);
    }
    if !decoder.input.is_empty() {
        return Err(Error::InvalidKey(format!("{} trailing bytes", decoder.input.len())));
    }
    Ok(values)
}

struct Decoder<'a> {
    input: &'a [u8],
}

impl Decoder<'_> {
    fn decode_value(&mut self, ty: Type, is_last: bool) -> Result<Value> {
        Ok(match ty {
            Type::Bool => match self.take_array::<1>()?[0] {
                0x00 => Value::Bool(false),
                0x01 => Value::Bool(true),
                byte => return Err(Error::InvalidKey(format!("invalid boolean byte {byte:#04x}"))),
            },
            Type::Float4 => {
                let ordered = u32::from_be_bytes(self.take_array()?);
                let bits = if ordered & (1 << 31) != 0 { ordered ^ (1 << 31) } else { !ordered };
                let float = OrderedF32::try_from(f32::from_bits(bits))
                    .map_err(|e| Error::InvalidKey(e.to_string()))?;
                Value::Float4(float)
            }
            Type::Float8 => {
                let ordered = u64::from_be_bytes(self.take_array()?);
                let bits = if ordered & (1 << 63) != 0 { ordered ^ (1 << 63) } else { !ordered };
                let float = OrderedF64::try_from(f64::from_bits(bits))
                    .map_err(|e| Error::InvalidKey(e.to_string()))?;
                Value::Float8(float)
            }
            Type::Int1 => Value::Int1((self.take_array::<1>()?[0] ^ 0x80) as i8),
            Type::Int2 => {
                let mut bytes = self.take_array::<2>()?;
                bytes[0] ^= 0x80;
                Value::Int2(i16::from_be_bytes(bytes))
            }
            Type::Int4 => {
                let mut bytes = self.take_array::<4>()?;
                bytes[0] ^= 0x80;
                Value::Int4(i32::from_be_bytes(bytes))
            }
            Type::Int8 => {
                let mut bytes = self.take_array::<8>()?;
                bytes[0] ^= 0x80;
                Value::Int8(i64::from_be_bytes(bytes))
            }
            Type::Uint1 => Value::Uint1(self.take_array::<1>()?[0]),
            Type::Uint2 => Value::Uint2(u16::from_be_bytes(self.take_array()?)),
            Type::Uint4 => Value::Uint4(u32::from_be_bytes(self.take_array()?)),
            Type::Uint8 => Value::Uint8(u64::from_be_bytes(self.take_array()?)),
            Type::Utf8 => {
                let bytes = if is_last { self.take_rest().to_vec() } else { self.take_escaped_bytes()? };
                let text = String::from_utf8(bytes)
                    .map_err(|e| Error::InvalidKey(format!("invalid utf8: {e}")))?;
                Value::Utf8(text)
            }
            Type::Blob => {
                let bytes = if is_last { self.take_rest().to_vec() } else { self.take_escaped_bytes()? };
                Value::Blob(bytes)
            }
        })
    }

    /// Chops off and returns the next len bytes, or errors if there aren't
    /// enough left.
    fn take_bytes(&mut self, len: usize) -> Result<&[u8]> {
        if self.input.len() < len {
            return Err(Error::InvalidKey(format!(
                "insufficient bytes, expected {len} for {:x?}",
                self.input
            )));
        }
        let bytes = &self.input[..len];
        self.input = &self.input[len..];
        Ok(bytes)
    }

    fn take_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let bytes = self.take_bytes(N)?;
        let mut array = [0u8; N];
        array.copy_from_slice(bytes);
        Ok(array)
    }

    fn take_rest(&mut self) -> &[u8] {
        let rest = self.input;
        self.input = &[];
        rest
    }

    /// Chops off and unescapes the next embedded byte string, up to and
    /// including its 0x00 0x00 terminator.
    fn take_escaped_bytes(&mut self) -> Result<Vec<u8>> {
        let mut decoded = Vec::new();
        let mut iter = self.input.iter().enumerate();
        let taken = loop {
            match iter.next() {
                Some((_, 0x00)) => match iter.next() {
                    Some((i, 0x00)) => break i + 1,
                    Some((_, 0x01)) => decoded.push(0x00),
                    _ => return Err(Error::InvalidKey("invalid escape sequence".into())),
                },
                Some((_, byte)) => decoded.push(*byte),
                None => return Err(Error::InvalidKey("unterminated embedded value".into())),
            }
        };
        self.input = &self.input[taken..];
        Ok(decoded)
    }
}
