//! Constant values observed by dataflow

use serde::{Deserialize, Serialize};
use std::fmt;

/// A concrete constant an expression may evaluate to
///
/// Floats are stored as raw bits so the type stays `Eq + Hash` and can live in
/// a possible-values set.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstValue {
    Int(i64),
    Float(u64),
    Bool(bool),
    Char(char),
    Str(String),
    Null,
}

impl ConstValue {
    pub fn float(value: f64) -> Self {
        Self::Float(value.to_bits())
    }

    pub fn str(value: impl Into<String>) -> Self {
        Self::Str(value.into())
    }

    /// Integral view (ints and chars), used for range queries
    pub fn as_integral(&self) -> Option<i64> {
        match self {
            Self::Int(v) => Some(*v),
            Self::Char(c) => Some(*c as i64),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(bits) => Some(f64::from_bits(*bits)),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl fmt::Display for ConstValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{}", v),
            Self::Float(bits) => write!(f, "{}", f64::from_bits(*bits)),
            Self::Bool(v) => write!(f, "{}", v),
            Self::Char(c) => write!(f, "'{}'", c),
            Self::Str(v) => write!(f, "\"{}\"", v),
            Self::Null => write!(f, "null"),
        }
    }
}
