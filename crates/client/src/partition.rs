// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Result;
use crate::error::Error;
use crate::hash::hash64;
use crate::key;
use crate::row::PartialRow;
use crate::schema::{ColumnId, Schema};
use serde::{Deserialize, Serialize};

/// One hash component of a table's partitioning: a subset of primary key
/// columns bucketed by seeded hash.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct HashSchema {
    /// The primary key columns fed into the hash.
    pub column_ids: Vec<ColumnId>,
    /// How many buckets the component spreads rows over, at least 2.
    pub num_buckets: u32,
    /// The seed mixed into the hash.
    pub seed: u32,
}

impl HashSchema {
    /// A hash component over the given columns.
    pub fn new(column_ids: Vec<ColumnId>, num_buckets: u32, seed: u32) -> Self {
        Self { column_ids, num_buckets, seed }
    }

    /// The bucket the row's hash columns fall into. All hash columns must be
    /// set.
    pub fn bucket_for(&self, row: &PartialRow<'_>) -> Result<u32> {
        let schema = row.schema();
        let mut indexes = Vec::with_capacity(self.column_ids.len());
        for &id in &self.column_ids {
            indexes.push(schema.index_of_id(id).ok_or(Error::SchemaMismatch { id })?);
        }
        let mut buf = Vec::new();
        key::encode_columns(row, &indexes, &mut buf)?;
        Ok((hash64(&buf, self.seed) % u64::from(self.num_buckets)) as u32)
    }
}

/// The range component: an ordered list of primary key columns whose encoded
/// values form the tail of the partition key. May be empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeSchema {
    /// The primary key columns whose encoding forms the range key.
    pub column_ids: Vec<ColumnId>,
}

/// A table's partitioning: hash components in order, then a range component.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PartitionSchema {
    /// The hash components, outermost first.
    pub hash_schemas: Vec<HashSchema>,
    /// The range component, possibly over no columns.
    pub range_schema: RangeSchema,
}

impl PartitionSchema {
    /// Checks the partitioning against the table schema: every referenced
    /// column must be a primary key column claimed by exactly one component,
    /// and hash components need at least two buckets.
    pub fn validate(&self, schema: &Schema) -> Result<()> {
        let mut claimed: Vec<ColumnId> = Vec::new();
        let mut claim = |id: ColumnId| -> Result<()> {
            let index = schema.index_of_id(id).ok_or(Error::SchemaMismatch { id })?;
            if index >= schema.num_key_columns() {
                return Err(Error::InvalidPartitionSchema(format!(
                    "column {} is not a primary key column",
                    schema.columns()[index].name
                )));
            }
            if claimed.contains(&id) {
                return Err(Error::InvalidPartitionSchema(format!(
                    "column {} is claimed by more than one component",
                    schema.columns()[index].name
                )));
            }
            claimed.push(id);
            Ok(())
        };

        for hash_schema in &self.hash_schemas {
            if hash_schema.column_ids.is_empty() {
                return Err(Error::InvalidPartitionSchema("hash component with no columns".into()));
            }
            if hash_schema.num_buckets < 2 {
                return Err(Error::InvalidPartitionSchema(format!(
                    "hash component needs at least 2 buckets, got {}",
                    hash_schema.num_buckets
                )));
            }
            for &id in &hash_schema.column_ids {
                claim(id)?;
            }
        }
        for &id in &self.range_schema.column_ids {
            claim(id)?;
        }
        Ok(())
    }

    /// True when the table is range partitioned on exactly the primary key
    /// columns, with no hash components. Primary key bounds and partition
    /// range bounds then live in the same key space.
    pub fn is_simple_range_partitioning(&self, schema: &Schema) -> bool {
        self.hash_schemas.is_empty()
            && self.range_schema.column_ids.len() == schema.num_key_columns()
            && self
                .range_schema
                .column_ids
                .iter()
                .zip(schema.columns())
                .all(|(id, column)| *id == column.id)
    }
}

/// A physical partition: one tablet's slice of the partition key space.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    /// Inclusive start key. Empty means from the beginning of the key space.
    #[serde(with = "serde_bytes")]
    pub partition_key_start: Vec<u8>,
    /// Exclusive end key. Empty means to the end of the key space.
    #[serde(with = "serde_bytes")]
    pub partition_key_end: Vec<u8>,
}

impl Partition {
    /// A partition covering the given key interval.
    pub fn new(partition_key_start: Vec<u8>, partition_key_end: Vec<u8>) -> Self {
        Self { partition_key_start, partition_key_end }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::ColumnSchema;
    use tessera_type::{Type, Value};

    fn schema() -> Schema {
        Schema::new(
            vec![
                ColumnSchema::new(0, "a", Type::Int4),
                ColumnSchema::new(1, "b", Type::Utf8),
                ColumnSchema::new(2, "v", Type::Int4),
            ],
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_bucket_for_is_stable_and_in_range() {
        let schema = schema();
        let hash_schema = HashSchema::new(vec![ColumnId(0), ColumnId(1)], 8, 42);

        let mut row = schema.new_row();
        row.set(0, Value::Int4(17)).unwrap();
        row.set(1, Value::from("x")).unwrap();

        let bucket = hash_schema.bucket_for(&row).unwrap();
        assert!(bucket < 8);
        assert_eq!(bucket, hash_schema.bucket_for(&row).unwrap());
    }

    #[test]
    fn test_bucket_for_requires_all_columns() {
        let schema = schema();
        let hash_schema = HashSchema::new(vec![ColumnId(0), ColumnId(1)], 8, 42);

        let mut row = schema.new_row();
        row.set(0, Value::Int4(17)).unwrap();
        assert!(hash_schema.bucket_for(&row).is_err());
    }

    #[test]
    fn test_validate_accepts_disjoint_key_columns() {
        let partition_schema = PartitionSchema {
            hash_schemas: vec![HashSchema::new(vec![ColumnId(0)], 2, 0)],
            range_schema: RangeSchema { column_ids: vec![ColumnId(1)] },
        };
        assert!(partition_schema.validate(&schema()).is_ok());
    }

    #[test]
    fn test_validate_rejects_unknown_column() {
        let partition_schema = PartitionSchema {
            hash_schemas: Vec::new(),
            range_schema: RangeSchema { column_ids: vec![ColumnId(9)] },
        };
        assert_eq!(
            partition_schema.validate(&schema()),
            Err(Error::SchemaMismatch { id: ColumnId(9) })
        );
    }

    #[test]
    fn test_validate_rejects_non_key_column() {
        let partition_schema = PartitionSchema {
            hash_schemas: Vec::new(),
            range_schema: RangeSchema { column_ids: vec![ColumnId(2)] },
        };
        assert!(partition_schema.validate(&schema()).is_err());
    }

    #[test]
    fn test_validate_rejects_reused_column() {
        let partition_schema = PartitionSchema {
            hash_schemas: vec![HashSchema::new(vec![ColumnId(0)], 2, 0)],
            range_schema: RangeSchema { column_ids: vec![ColumnId(0)] },
        };
        assert!(partition_schema.validate(&schema()).is_err());
    }

    #[test]
    fn test_validate_rejects_single_bucket() {
        let partition_schema = PartitionSchema {
            hash_schemas: vec![HashSchema::new(vec![ColumnId(0)], 1, 0)],
            range_schema: RangeSchema::default(),
        };
        assert!(partition_schema.validate(&schema()).is_err());
    }

    #[test]
    fn test_simple_range_partitioning() {
        let schema = schema();
        let simple = PartitionSchema {
            hash_schemas: Vec::new(),
            range_schema: RangeSchema { column_ids: vec![ColumnId(0), ColumnId(1)] },
        };
        assert!(simple.is_simple_range_partitioning(&schema));

        let reordered = PartitionSchema {
            hash_schemas: Vec::new(),
            range_schema: RangeSchema { column_ids: vec![ColumnId(1), ColumnId(0)] },
        };
        assert!(!reordered.is_simple_range_partitioning(&schema));

        let prefix = PartitionSchema {
            hash_schemas: Vec::new(),
            range_schema: RangeSchema { column_ids: vec![ColumnId(0)] },
        };
        assert!(!prefix.is_simple_range_partitioning(&schema));

        let hashed = PartitionSchema {
            hash_schemas: vec![HashSchema::new(vec![ColumnId(0)], 2, 0)],
            range_schema: RangeSchema { column_ids: vec![ColumnId(0), ColumnId(1)] },
        };
        assert!(!hashed.is_simple_range_partitioning(&schema));
    }
}
