// Copyright (c) tessera.dev 2025
// This file is licensed under the AGPL-3.0-or-later

use crate::ordered_float::OrderedFloatError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};

/// An f64 with a total order: never NaN, -0.0 normalized to 0.0.
#[repr(transparent)]
#[derive(Copy, Clone, Default, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct OrderedF64(pub f64);

impl PartialEq for OrderedF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Hash for OrderedF64 {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl fmt::Debug for OrderedF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for OrderedF64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl From<OrderedF64> for f64 {
    fn from(v: OrderedF64) -> Self {
        v.0
    }
}

impl TryFrom<f64> for OrderedF64 {
    type Error = OrderedFloatError;

    fn try_from(f: f64) -> Result<Self, Self::Error> {
        let normalized = if f == 0.0 { 0.0 } else { f };
        if f.is_nan() { Err(OrderedFloatError) } else { Ok(OrderedF64(normalized)) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sorting() {
        let mut values = vec![
            OrderedF64::try_from(0.25).unwrap(),
            OrderedF64::try_from(-1000.0).unwrap(),
            OrderedF64::try_from(0.0).unwrap(),
            OrderedF64::try_from(f64::MAX).unwrap(),
        ];
        values.sort();
        let sorted: Vec<f64> = values.into_iter().map(|v| v.0).collect();
        assert_eq!(sorted, vec![-1000.0, 0.0, 0.25, f64::MAX]);
    }

    #[test]
    fn test_nan_fails() {
        assert!(OrderedF64::try_from(f64::NAN).is_err());
    }
}
