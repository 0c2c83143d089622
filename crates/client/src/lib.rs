// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

#![cfg_attr(not(debug_assertions), deny(missing_docs))]
#![cfg_attr(not(debug_assertions), deny(warnings))]

//! The scan-side core of the Tessera client: table and partition schemas,
//! partial rows, order-preserving key encoding, column predicates, and the
//! partition pruner that turns a scan's predicates into the minimal set of
//! partition key ranges to visit.

pub use error::Error;
pub use partition::{HashSchema, Partition, PartitionSchema, RangeSchema};
pub use predicate::{Predicate, PredicateKind};
pub use pruner::{PartitionKeyRange, PartitionPruner};
pub use row::PartialRow;
pub use scan::ScanConfig;
pub use schema::{ColumnId, ColumnSchema, Schema};

mod error;
pub mod hash;
pub mod key;
mod partition;
mod predicate;
mod pruner;
mod row;
mod scan;
mod schema;

/// The result type used throughout the client.
pub type Result<T> = std::result::Result<T, Error>;
