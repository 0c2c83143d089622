// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::predicate::PredicateKind;
use crate::schema::ColumnId;
use tessera_type::Type;
use thiserror::Error;

/// Client-side configuration and encoding errors.
///
/// Everything here surfaces synchronously while a scan is being set up;
/// iteration over partition key ranges never fails.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// The table schema itself is malformed.
    #[error("invalid schema: {0}")]
    InvalidSchema(String),

    /// The partition schema is malformed with respect to the table schema.
    #[error("invalid partition schema: {0}")]
    InvalidPartitionSchema(String),

    /// The partition schema references a column the table schema does not
    /// have.
    #[error("partition schema references unknown column id {id}")]
    SchemaMismatch {
        /// The unresolvable column id.
        id: ColumnId,
    },

    /// A lookup named a column the schema does not have.
    #[error("unknown column {name}")]
    UnknownColumn {
        /// The unresolvable column name.
        name: String,
    },

    /// A positional column lookup was past the end of the schema.
    #[error("column index {index} is out of bounds")]
    ColumnIndexOutOfBounds {
        /// The out-of-bounds index.
        index: usize,
    },

    /// A value of the wrong type was supplied for a column.
    #[error("type mismatch for column {column}: expected {expected}, got {actual}")]
    TypeMismatch {
        /// The column being set.
        column: String,
        /// The column's declared type.
        expected: Type,
        /// The type of the supplied value.
        actual: Type,
    },

    /// A column that must always hold a value was declared nullable.
    #[error("column {column} may not be nullable")]
    NotNullable {
        /// The offending column.
        column: String,
    },

    /// A key operation touched a column with no value set.
    #[error("column {column} has no value set")]
    ColumnNotSet {
        /// The unset column.
        column: String,
    },

    /// A predicate kind the pruner does not understand was applied to a
    /// range partition column. Unreachable with the built-in predicate
    /// variants; kept for wire-decoded predicates.
    #[error("unsupported {kind} predicate on range partition column {column}")]
    UnsupportedPredicate {
        /// The column the predicate applies to.
        column: String,
        /// The unsupported predicate kind.
        kind: PredicateKind,
    },

    /// A key byte string does not decode under the schema it was read with.
    #[error("invalid key encoding: {0}")]
    InvalidKey(String),
}
