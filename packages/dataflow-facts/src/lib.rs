/*
 * Dataflow Facts - Common Dataflow Result Aggregation
 *
 * Feature-First Hexagonal Architecture:
 * - shared/      : Identity keys, constant values, source ranges
 * - features/    : common_dataflow (domain → ports → application → infrastructure)
 * - config/      : Facade configuration (YAML v1 + builders)
 * - errors       : Crate error type
 *
 * Concurrency:
 * - Results shared as immutable `Arc`s
 * - DashMap per-container cache, one computation per unit and generation
 * - Rayon-aware waiting (waiters keep the pool busy)
 */

// Crate-level lint configuration
#![allow(clippy::type_complexity)] // Associated lattice types spell out long
#![allow(clippy::new_without_default)] // Default impl not always needed
#![allow(clippy::module_inception)] // Module naming intentional

// ═══════════════════════════════════════════════════════════════════════════
// Module Exports - Feature-First Architecture
// ═══════════════════════════════════════════════════════════════════════════

/// Shared models
pub mod shared;

/// Feature modules
pub mod features;

/// Configuration system
pub mod config;

/// Error types
pub mod errors;

// ═══════════════════════════════════════════════════════════════════════════
// Re-exports for Public API
// ═══════════════════════════════════════════════════════════════════════════

pub use config::{ConfigError, ConfigResult, DataflowConfig};
pub use errors::{DataflowError, Result};
pub use features::common_dataflow::{
    BodyAnalyzer, BodyResult, CommonDataflow, ConstantSet, ConstructorCall, ConstructorInfo,
    DfaInterceptor, DfaValue, FactPoint, Interpreter, Lattice, LongRange, MemoryState,
    ProgramModel, RecordingInterceptor, RunnerStatus, SpecialField, TypeOf, UnitKind,
};
pub use shared::models::{ConstValue, ContainerId, ExprId, TextRange, UnitId, VarId};
