// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use tessera_type::Value;

/// A simplified column predicate.
///
/// Predicates arrive already normalized: at most one per column, ranges
/// collapsed, contradictions folded into `None`. The pruner pushes `Equality`
/// and `Range` into partition keys; `IsNotNull` and `InList` constrain rows
/// but not partitions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    /// No value can satisfy the predicate.
    None,
    /// The column equals the value.
    Equality(Value),
    /// The column falls within the bounds: lower inclusive, upper exclusive,
    /// either side open.
    Range {
        /// Inclusive lower bound, None when unbounded below.
        lower: Option<Value>,
        /// Exclusive upper bound, None when unbounded above.
        upper: Option<Value>,
    },
    /// The column holds a value.
    IsNotNull,
    /// The column equals one of the listed values, sorted ascending.
    InList(Vec<Value>),
}

impl Predicate {
    /// An equality predicate on the given value.
    pub fn equality(value: impl Into<Value>) -> Self {
        Predicate::Equality(value.into())
    }

    /// A range predicate over the given bounds.
    pub fn range(lower: Option<Value>, upper: Option<Value>) -> Self {
        Predicate::Range { lower, upper }
    }

    /// The predicate's kind tag.
    pub fn kind(&self) -> PredicateKind {
        match self {
            Predicate::None => PredicateKind::None,
            Predicate::Equality(_) => PredicateKind::Equality,
            Predicate::Range { .. } => PredicateKind::Range,
            Predicate::IsNotNull => PredicateKind::IsNotNull,
            Predicate::InList(_) => PredicateKind::InList,
        }
    }
}

/// The kind of a [`Predicate`], without its operands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredicateKind {
    /// An unsatisfiable predicate.
    None,
    /// An equality predicate.
    Equality,
    /// A range predicate.
    Range,
    /// A non-null predicate.
    IsNotNull,
    /// A set membership predicate.
    InList,
}

impl Display for PredicateKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PredicateKind::None => f.write_str("NONE"),
            PredicateKind::Equality => f.write_str("EQUALITY"),
            PredicateKind::Range => f.write_str("RANGE"),
            PredicateKind::IsNotNull => f.write_str("IS NOT NULL"),
            PredicateKind::InList => f.write_str("IN LIST"),
        }
    }
}
