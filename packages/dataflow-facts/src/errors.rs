//! Error types for dataflow-facts
//!
//! Analysis outcomes (not applicable, too complex, aborted) are statuses, not
//! errors; queries collapse them to "no information". Errors are reserved for
//! caller mistakes and configuration problems.

use crate::config::ConfigError;
use crate::shared::models::ExprId;
use thiserror::Error;

/// Main error type for dataflow-facts operations
#[derive(Debug, Error)]
pub enum DataflowError {
    /// Query on a parenthesized expression; dataflow only tracks the inner one
    #[error("Expression {0} is parenthesized; query the deparenthesized expression")]
    ParenthesizedExpression(ExprId),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for dataflow-facts operations
pub type Result<T> = std::result::Result<T, DataflowError>;
