// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use tessera_type::Value;

/// Appends the order-preserving encoding of a single column value.
///
/// Signed integers are big-endian with the sign bit flipped, so that negative
/// values order before positive ones. Unsigned integers and booleans are
/// plain big-endian. Floats flip the sign bit when positive and all bits when
/// negative, mapping IEEE-754 sign-magnitude onto an unsigned order.
///
/// Variable-length values in embedded position (`is_last == false`) escape
/// 0x00 as 0x00 0x01 and close with a 0x00 0x00 terminator, so a value
/// always orders before any of its extensions. The last column of a key is
/// emitted raw.
pub fn encode_column_into(buf: &mut Vec<u8>, value: &Value, is_last: bool) {
    match value {
        Value::Bool(v) => buf.push(*v as u8),
        Value::Float4(v) => buf.extend_from_slice(&order_f32(v.0).to_be_bytes()),
        Value::Float8(v) => buf.extend_from_slice(&order_f64(v.0).to_be_bytes()),
        Value::Int1(v) => buf.push((*v as u8) ^ 0x80),
        Value::Int2(v) => {
            let mut bytes = v.to_be_bytes();
            bytes[0] ^= 0x80;
            buf.extend_from_slice(&bytes);
        }
        Value::Int4(v) => {
            let mut bytes = v.to_be_bytes();
            bytes[0] ^= 0x80;
            buf.extend_from_slice(&bytes);
        }
        Value::Int8(v) => {
            let mut bytes = v.to_be_bytes();
            bytes[0] ^= 0x80;
            buf.extend_from_slice(&bytes);
        }
        Value::Uint1(v) => buf.push(*v),
        Value::Uint2(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::Uint4(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::Uint8(v) => buf.extend_from_slice(&v.to_be_bytes()),
        Value::Utf8(v) => encode_bytes(buf, v.as_bytes(), is_last),
        Value::Blob(v) => encode_bytes(buf, v, is_last),
    }
}

fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8], is_last: bool) {
    if is_last {
        buf.extend_from_slice(bytes);
        return;
    }
    for &byte in bytes {
        if byte == 0x00 {
            buf.push(0x00);
            buf.push(0x01);
        } else {
            buf.push(byte);
        }
    }
    buf.push(0x00);
    buf.push(0x00);
}

fn order_f32(v: f32) -> u32 {
    let bits = v.to_bits();
    if bits & (1 << 31) != 0 { !bits } else { bits ^ (1 << 31) }
}

fn order_f64(v: f64) -> u64 {
    let bits = v.to_bits();
    if bits & (1 << 63) != 0 { !bits } else { bits ^ (1 << 63) }
}
