//! Shared module - Common types used across features
//!
//! Identity keys, constant values and source ranges. No dependency on any
//! feature module.

pub mod models;

// Re-exports for convenience
pub use models::*;
