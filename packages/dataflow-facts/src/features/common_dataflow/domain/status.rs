//! Interpreter run outcome

use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of one interpreter run over a unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RunnerStatus {
    Ok,
    /// No analyzable body
    NotApplicable,
    /// Size or path-count limits exceeded
    TooComplex,
    /// Interrupted (timeout, cancellation)
    Aborted,
}

impl RunnerStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, RunnerStatus::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RunnerStatus::Ok => "ok",
            RunnerStatus::NotApplicable => "not-applicable",
            RunnerStatus::TooComplex => "too-complex",
            RunnerStatus::Aborted => "aborted",
        }
    }
}

impl fmt::Display for RunnerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
