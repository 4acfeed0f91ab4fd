//! Source range types
//!
//! The interpreter reports a sub-range when a pushed value only covers part of
//! an expression (for example one operand of a polyadic `a + b + c`).

use serde::{Deserialize, Serialize};

/// Half-open character range `[start, end)` relative to the pushed expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextRange {
    pub start: u32,
    pub end: u32,
}

impl TextRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, other: &TextRange) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}
