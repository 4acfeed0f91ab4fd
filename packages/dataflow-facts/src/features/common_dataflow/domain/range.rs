//! Integral value ranges

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed integral range `min..=max`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LongRange {
    pub min: i64,
    pub max: i64,
}

impl LongRange {
    /// Create a range; bounds are swapped if given in the wrong order
    pub fn new(min: i64, max: i64) -> Self {
        if min <= max {
            Self { min, max }
        } else {
            Self { min: max, max: min }
        }
    }

    pub fn singleton(value: i64) -> Self {
        Self {
            min: value,
            max: value,
        }
    }

    pub fn full() -> Self {
        Self {
            min: i64::MIN,
            max: i64::MAX,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.min <= value && value <= self.max
    }

    pub fn as_singleton(&self) -> Option<i64> {
        (self.min == self.max).then_some(self.min)
    }

    /// Smallest range covering both
    pub fn join(&self, other: &Self) -> Self {
        Self {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }

    /// Intersection, `None` when disjoint
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(Self { min, max })
    }
}

impl fmt::Display for LongRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_singleton() {
            Some(value) => write!(f, "{{{}}}", value),
            None => write!(f, "{{{}..{}}}", self.min, self.max),
        }
    }
}
