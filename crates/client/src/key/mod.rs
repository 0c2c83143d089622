// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

//! Order-preserving key encoding.
//!
//! Partition and primary keys are byte strings that must sort bytewise in
//! exactly the order their column tuples sort, because the server addresses
//! tablets by comparing raw key bytes. The encoding is wire visible: the
//! server produces the same bytes for the same rows, and a single byte of
//! disagreement silently misroutes scans.

pub use decode::decode_range_key;
pub use encode::encode_column_into;
pub use format::Raw;

mod decode;
mod encode;
mod format;

use crate::Result;
use crate::error::Error;
use crate::row::PartialRow;

/// Appends a hash bucket index as 4 bytes big-endian.
pub fn encode_hash_bucket(buf: &mut Vec<u8>, bucket: u32) {
    buf.extend_from_slice(&bucket.to_be_bytes());
}

/// Encodes the given columns of the row in order, appending to `buf`.
///
/// Every column but the last is encoded in embedded form: variable-length
/// values get their 0x00 bytes escaped and a terminator appended so that the
/// following column starts at an unambiguous boundary. The last column is
/// encoded raw.
pub fn encode_columns(row: &PartialRow<'_>, column_indexes: &[usize], buf: &mut Vec<u8>) -> Result<()> {
    for (i, &index) in column_indexes.iter().enumerate() {
        let column = row.schema().column(index)?;
        let value = row
            .get(index)
            .ok_or_else(|| Error::ColumnNotSet { column: column.name.clone() })?;
        encode::encode_column_into(buf, value, i + 1 == column_indexes.len());
    }
    Ok(())
}

/// Encodes the listed columns as a range key.
pub fn encode_range_key(row: &PartialRow<'_>, column_indexes: &[usize]) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_columns(row, column_indexes, &mut buf)?;
    Ok(buf)
}

/// Encodes the row's primary key columns.
pub fn encode_primary_key(row: &PartialRow<'_>) -> Result<Vec<u8>> {
    let indexes: Vec<usize> = (0..row.schema().num_key_columns()).collect();
    encode_range_key(row, &indexes)
}

/// Lexicographically bumps the key formed by the given columns to its
/// immediate successor: the rightmost column is incremented, wrapping to the
/// column minimum and carrying left on overflow.
///
/// Returns false when the carry propagates out of the leftmost column, i.e.
/// the key already was the largest in its space and no successor exists.
pub fn increment_key(row: &mut PartialRow<'_>, column_indexes: &[usize]) -> Result<bool> {
    for &index in column_indexes.iter().rev() {
        if row.increment_column(index)? {
            return Ok(true);
        }
    }
    Ok(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{ColumnSchema, Schema};
    use tessera_type::{Type, Value};

    fn schema(types: &[Type]) -> Schema {
        let columns = types
            .iter()
            .enumerate()
            .map(|(i, &ty)| ColumnSchema::new(i as u32, format!("c{i}"), ty))
            .collect::<Vec<_>>();
        let len = columns.len();
        Schema::new(columns, len).unwrap()
    }

    #[test]
    fn test_encode_range_key_multi_column() {
        let schema = schema(&[Type::Utf8, Type::Int4]);
        let mut row = schema.new_row();
        row.set(0, Value::from("ab")).unwrap();
        row.set(1, Value::Int4(1)).unwrap();

        let key = encode_range_key(&row, &[0, 1]).unwrap();
        assert_eq!(key, vec![b'a', b'b', 0x00, 0x00, 0x80, 0x00, 0x00, 0x01]);
    }

    #[test]
    fn test_encode_primary_key_uses_key_columns() {
        let schema = Schema::new(
            vec![
                ColumnSchema::new(0, "k", Type::Int2),
                ColumnSchema::new(1, "v", Type::Int2),
            ],
            1,
        )
        .unwrap();
        let mut row = schema.new_row();
        row.set(0, Value::Int2(0)).unwrap();
        row.set(1, Value::Int2(99)).unwrap();

        assert_eq!(encode_primary_key(&row).unwrap(), vec![0x80, 0x00]);
    }

    #[test]
    fn test_encode_unset_column() {
        let schema = schema(&[Type::Int4]);
        let row = schema.new_row();
        assert!(encode_range_key(&row, &[0]).is_err());
    }

    #[test]
    fn test_increment_key_carries() {
        let schema = schema(&[Type::Int1, Type::Int1]);
        let mut row = schema.new_row();
        row.set(0, Value::Int1(0)).unwrap();
        row.set(1, Value::Int1(i8::MAX)).unwrap();

        assert!(increment_key(&mut row, &[0, 1]).unwrap());
        assert_eq!(row.get(0), Some(&Value::Int1(1)));
        assert_eq!(row.get(1), Some(&Value::Int1(i8::MIN)));
    }

    #[test]
    fn test_increment_key_overflows_out_of_prefix() {
        let schema = schema(&[Type::Int1, Type::Int1]);
        let mut row = schema.new_row();
        row.set(0, Value::Int1(i8::MAX)).unwrap();
        row.set(1, Value::Int1(i8::MAX)).unwrap();

        assert!(!increment_key(&mut row, &[0, 1]).unwrap());
        assert_eq!(row.get(0), Some(&Value::Int1(i8::MIN)));
        assert_eq!(row.get(1), Some(&Value::Int1(i8::MIN)));
    }

    #[test]
    fn test_increment_key_produces_lexicographic_successor() {
        let schema = schema(&[Type::Int2]);
        let mut row = schema.new_row();
        row.set_min(0).unwrap();
        let before = encode_range_key(&row, &[0]).unwrap();

        assert!(increment_key(&mut row, &[0]).unwrap());
        let after = encode_range_key(&row, &[0]).unwrap();

        assert!(before < after);
        assert_eq!(
            decode_range_key(&after, &[0], &schema).unwrap(),
            vec![Value::Int2(i16::MIN + 1)]
        );
    }

    #[test]
    fn test_increment_key_string_appends_zero() {
        let schema = schema(&[Type::Utf8]);
        let mut row = schema.new_row();
        row.set(0, Value::from("a")).unwrap();

        assert!(increment_key(&mut row, &[0]).unwrap());
        let key = encode_range_key(&row, &[0]).unwrap();
        // "a\0" is the smallest string strictly greater than "a".
        assert_eq!(key, vec![b'a', 0x00]);
    }

    #[test]
    fn test_encode_hash_bucket_big_endian() {
        let mut buf = Vec::new();
        encode_hash_bucket(&mut buf, 0x0102_0304);
        assert_eq!(buf, vec![0x01, 0x02, 0x03, 0x04]);
    }
}
