// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::Result;
use crate::error::Error;
use crate::key;
use crate::key::Raw;
use crate::partition::{HashSchema, Partition};
use crate::predicate::Predicate;
use crate::scan::ScanConfig;
use crate::schema::{ColumnId, Schema};
use std::collections::{HashMap, VecDeque};
use std::fmt::{Display, Formatter};
use tessera_type::util::CowVec;
use tracing::{debug, instrument, trace};

/// A half-open interval of the partition key space.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PartitionKeyRange {
    lower: CowVec<u8>,
    upper: CowVec<u8>,
}

impl PartitionKeyRange {
    /// Inclusive lower bound. Empty means from the beginning of the key
    /// space.
    pub fn lower(&self) -> &[u8] {
        self.lower.as_slice()
    }

    /// Exclusive upper bound. Empty means to the end of the key space.
    pub fn upper(&self) -> &[u8] {
        self.upper.as_slice()
    }
}

impl Display for PartitionKeyRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let lower = if self.lower.is_empty() { "<start>".to_string() } else { Raw::hex(&self.lower) };
        let upper = if self.upper.is_empty() { "<end>".to_string() } else { Raw::hex(&self.upper) };
        write!(f, "[{lower}, {upper})")
    }
}

/// Computes the minimal set of partition key ranges a scan must visit and
/// drives iteration over them.
///
/// Construction pushes the scan's predicates into the table's hash and range
/// partitioning and intersects the result with any explicit scan bounds. The
/// produced ranges are pairwise disjoint, in ascending lower bound order, and
/// complete: a tablet no range overlaps cannot hold a row the scan accepts.
/// The scanner consumes ranges front to back, reporting each consumed
/// tablet's end key via [`PartitionPruner::remove_partition_key_range`].
#[derive(Debug)]
pub struct PartitionPruner {
    ranges: VecDeque<PartitionKeyRange>,
}

impl PartitionPruner {
    /// Builds the pruner for a scan, computing its partition key ranges.
    /// All configuration errors surface here; iteration never fails.
    #[instrument(name = "pruner::create", level = "debug", skip(config))]
    pub fn new(config: &ScanConfig) -> Result<Self> {
        let schema = &config.schema;
        let partition_schema = &config.partition_schema;
        partition_schema.validate(schema)?;
        for name in config.predicates.keys() {
            schema.column_by_name(name)?;
        }

        // An unsatisfiable scan is not an error, it just visits nothing.
        let unsatisfiable = config.predicates.values().any(|p| matches!(p, Predicate::None))
            || (!config.exclusive_upper_bound_primary_key.is_empty()
                && config.lower_bound_primary_key >= config.exclusive_upper_bound_primary_key);
        if unsatisfiable {
            debug!("scan is unsatisfiable, no partition key ranges");
            return Ok(Self { ranges: VecDeque::new() });
        }

        let range_indexes = resolve_column_ids(schema, &partition_schema.range_schema.column_ids)?;
        let mut range_lower = push_range_lower(schema, &range_indexes, &config.predicates)?;
        let mut range_upper = push_range_upper(schema, &range_indexes, &config.predicates)?;

        // With simple range partitioning the primary key bounds live in the
        // same key space as the range bounds and can tighten them further.
        if partition_schema.is_simple_range_partitioning(schema) {
            if config.lower_bound_primary_key > range_lower {
                range_lower = config.lower_bound_primary_key.clone();
            }
            if !config.exclusive_upper_bound_primary_key.is_empty()
                && (range_upper.is_empty() || config.exclusive_upper_bound_primary_key < range_upper)
            {
                range_upper = config.exclusive_upper_bound_primary_key.clone();
            }
        }

        let mut hash_buckets = Vec::with_capacity(partition_schema.hash_schemas.len());
        for hash_schema in &partition_schema.hash_schemas {
            hash_buckets.push(constrain_hash_bucket(schema, hash_schema, &config.predicates)?);
        }

        // The rightmost component that contributes bytes to the keys. Any
        // bytes past it would over-constrain the ranges.
        let constrained_index = if !range_lower.is_empty() || !range_upper.is_empty() {
            hash_buckets.len()
        } else {
            hash_buckets.iter().rposition(Option::is_some).map_or(0, |i| i + 1)
        };

        let mut pairs: Vec<(CowVec<u8>, CowVec<u8>)> = vec![(CowVec::default(), CowVec::default())];
        for (i, hash_schema) in partition_schema.hash_schemas[..constrained_index].iter().enumerate() {
            // The final byte group of the key turns its upper bucket from
            // inclusive into exclusive.
            let is_last = i + 1 == constrained_index && range_upper.is_empty();
            let bump = u32::from(is_last);
            match hash_buckets[i] {
                Some(bucket) => {
                    for (lower, upper) in &mut pairs {
                        key::encode_hash_bucket(lower.make_mut(), bucket);
                        key::encode_hash_bucket(upper.make_mut(), bucket + bump);
                    }
                }
                None => {
                    // Unconstrained: fork every pair once per bucket. Up to
                    // this component lower and upper are identical, so the
                    // lower doubles as the fork base.
                    let mut forked = Vec::with_capacity(pairs.len() * hash_schema.num_buckets as usize);
                    for (lower, _) in &mut pairs {
                        lower.to_shared();
                        for bucket in 0..hash_schema.num_buckets {
                            let mut new_lower = lower.clone();
                            let mut new_upper = lower.clone();
                            key::encode_hash_bucket(new_lower.make_mut(), bucket);
                            key::encode_hash_bucket(new_upper.make_mut(), bucket + bump);
                            forked.push((new_lower, new_upper));
                        }
                    }
                    pairs = forked;
                }
            }
        }

        let mut ranges = VecDeque::with_capacity(pairs.len());
        for (mut lower, mut upper) in pairs {
            lower.extend_from_slice(&range_lower);
            upper.extend_from_slice(&range_upper);

            if !config.lower_bound_partition_key.is_empty()
                && lower.as_slice() < config.lower_bound_partition_key.as_slice()
            {
                lower = CowVec::from(config.lower_bound_partition_key.clone());
            }
            if !config.exclusive_upper_bound_partition_key.is_empty()
                && (upper.is_empty()
                    || upper.as_slice() > config.exclusive_upper_bound_partition_key.as_slice())
            {
                upper = CowVec::from(config.exclusive_upper_bound_partition_key.clone());
            }
            if !upper.is_empty() && lower.as_slice() >= upper.as_slice() {
                continue;
            }
            ranges.push_back(PartitionKeyRange { lower, upper });
        }

        debug!(ranges = ranges.len(), "partition pruner created");
        Ok(Self { ranges })
    }

    /// Whether any range remains to scan.
    pub fn has_more_partition_key_ranges(&self) -> bool {
        !self.ranges.is_empty()
    }

    /// The lower bound of the next range to scan.
    pub fn next_partition_key(&self) -> Option<&[u8]> {
        self.ranges.front().map(PartitionKeyRange::lower)
    }

    /// The next range to scan.
    pub fn next_partition_key_range(&self) -> Option<&PartitionKeyRange> {
        self.ranges.front()
    }

    /// How many ranges remain to scan.
    pub fn ranges_remaining(&self) -> usize {
        self.ranges.len()
    }

    /// Advances past a consumed tablet, given its exclusive end key. An
    /// empty end key means the tablet extended to the end of the key space.
    pub fn remove_partition_key_range(&mut self, upper: &[u8]) {
        if upper.is_empty() {
            self.ranges.clear();
            return;
        }
        while let Some(head) = self.ranges.pop_front() {
            if upper <= head.lower.as_slice() {
                self.ranges.push_front(head);
                break;
            }
            // The tablet ends inside the head range: keep the remainder.
            if head.upper.is_empty() || upper < head.upper.as_slice() {
                self.ranges.push_front(PartitionKeyRange {
                    lower: CowVec::from(upper.to_vec()),
                    upper: head.upper,
                });
                break;
            }
        }
        trace!(remaining = self.ranges.len(), "advanced past tablet");
    }

    /// True when no remaining range overlaps the partition, i.e. the
    /// partition cannot hold a row the scan accepts.
    pub fn should_prune(&self, partition: &Partition) -> bool {
        for range in &self.ranges {
            // Ranges ending at or before the partition starts cannot overlap
            // it.
            if !range.upper.is_empty()
                && range.upper.as_slice() <= partition.partition_key_start.as_slice()
            {
                continue;
            }
            return !partition.partition_key_end.is_empty()
                && partition.partition_key_end.as_slice() <= range.lower.as_slice();
        }
        true
    }
}

fn resolve_column_ids(schema: &Schema, column_ids: &[ColumnId]) -> Result<Vec<usize>> {
    column_ids
        .iter()
        .map(|&id| schema.index_of_id(id).ok_or(Error::SchemaMismatch { id }))
        .collect()
}

/// Encodes the tightest range key lower bound the predicates imply, or an
/// empty key when the first range column is unconstrained.
///
/// Only equality values and range lowers are pushed; a range predicate with
/// just an upper stops the walk, since any lower value of that column still
/// satisfies it. Columns past the pushed prefix are filled with their type
/// minimum.
fn push_range_lower(
    schema: &Schema,
    range_indexes: &[usize],
    predicates: &HashMap<String, Predicate>,
) -> Result<Vec<u8>> {
    let mut row = schema.new_row();
    let mut pushed = 0;
    for &index in range_indexes {
        let column = schema.column(index)?;
        match predicates.get(&column.name) {
            Some(Predicate::Equality(value)) => {
                row.set(index, value.clone())?;
                pushed += 1;
            }
            Some(Predicate::Range { lower: Some(value), .. }) => {
                row.set(index, value.clone())?;
                pushed += 1;
            }
            _ => break,
        }
    }
    if pushed == 0 {
        return Ok(Vec::new());
    }
    for &index in &range_indexes[pushed..] {
        row.set_min(index)?;
    }
    key::encode_range_key(&row, range_indexes)
}

/// Encodes the tightest exclusive range key upper bound the predicates
/// imply, or an empty key when unbounded above.
///
/// Equality values extend the prefix; the first range upper is itself
/// exclusive and ends the walk, since further columns cannot tighten it
/// without cutting off satisfying rows. A prefix that ends on an equality is
/// made exclusive by incrementing it; if the increment overflows the prefix
/// the bound degenerates to unbounded.
fn push_range_upper(
    schema: &Schema,
    range_indexes: &[usize],
    predicates: &HashMap<String, Predicate>,
) -> Result<Vec<u8>> {
    let mut row = schema.new_row();
    let mut pushed = 0;
    let mut final_is_equality = false;
    for &index in range_indexes {
        let column = schema.column(index)?;
        match predicates.get(&column.name) {
            Some(Predicate::Equality(value)) => {
                row.set(index, value.clone())?;
                pushed += 1;
                final_is_equality = true;
            }
            Some(Predicate::Range { upper: Some(value), .. }) => {
                row.set(index, value.clone())?;
                pushed += 1;
                final_is_equality = false;
                break;
            }
            _ => break,
        }
    }
    if pushed == 0 {
        return Ok(Vec::new());
    }
    if final_is_equality && !key::increment_key(&mut row, &range_indexes[..pushed])? {
        // The equality prefix sits at the top of its key space: unbounded.
        return Ok(Vec::new());
    }
    for &index in &range_indexes[pushed..] {
        row.set_min(index)?;
    }
    key::encode_range_key(&row, range_indexes)
}

/// The single bucket the predicates pin this hash component to, or None when
/// some hash column lacks an equality predicate.
fn constrain_hash_bucket(
    schema: &Schema,
    hash_schema: &HashSchema,
    predicates: &HashMap<String, Predicate>,
) -> Result<Option<u32>> {
    let mut row = schema.new_row();
    for &id in &hash_schema.column_ids {
        let index = schema.index_of_id(id).ok_or(Error::SchemaMismatch { id })?;
        let column = schema.column(index)?;
        match predicates.get(&column.name) {
            Some(Predicate::Equality(value)) => row.set(index, value.clone())?,
            _ => return Ok(None),
        }
    }
    hash_schema.bucket_for(&row).map(Some)
}
