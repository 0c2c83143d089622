// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::partition::PartitionSchema;
use crate::predicate::Predicate;
use crate::schema::Schema;
use std::collections::HashMap;

/// Everything a scan declares up front: the table's schemas, the simplified
/// predicates, and any explicit key bounds. Bounds are encoded key byte
/// strings; an empty bound is unbounded.
#[derive(Clone, Debug)]
pub struct ScanConfig {
    /// The table schema the scan runs against.
    pub schema: Schema,
    /// The table's partitioning.
    pub partition_schema: PartitionSchema,
    /// Simplified predicates, keyed by column name, at most one per column.
    pub predicates: HashMap<String, Predicate>,
    /// Inclusive encoded primary key lower bound.
    pub lower_bound_primary_key: Vec<u8>,
    /// Exclusive encoded primary key upper bound.
    pub exclusive_upper_bound_primary_key: Vec<u8>,
    /// Inclusive partition key lower bound.
    pub lower_bound_partition_key: Vec<u8>,
    /// Exclusive partition key upper bound.
    pub exclusive_upper_bound_partition_key: Vec<u8>,
}

impl ScanConfig {
    /// An unbounded, unfiltered scan of the table.
    pub fn new(schema: Schema, partition_schema: PartitionSchema) -> Self {
        Self {
            schema,
            partition_schema,
            predicates: HashMap::new(),
            lower_bound_primary_key: Vec::new(),
            exclusive_upper_bound_primary_key: Vec::new(),
            lower_bound_partition_key: Vec::new(),
            exclusive_upper_bound_partition_key: Vec::new(),
        }
    }

    /// Adds a predicate on the named column, replacing any existing one.
    pub fn with_predicate(mut self, column: impl Into<String>, predicate: Predicate) -> Self {
        self.predicates.insert(column.into(), predicate);
        self
    }
}
