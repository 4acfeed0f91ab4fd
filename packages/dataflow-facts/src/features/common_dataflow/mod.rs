/*
 * Common Dataflow
 *
 * Aggregates the callbacks of an abstract interpreter into per-expression
 * facts (joined abstract type, possible constants, contract failure) and
 * serves them through a concurrent per-container cache.
 *
 * Architecture:
 * - Domain: FactPoint, BodyResult (two assertion views), LongRange, RunnerStatus
 * - Ports: Lattice, MemoryState, Interpreter, DfaInterceptor, ProgramModel
 * - Application: RecordingInterceptor, BodyAnalyzer, CommonDataflow facade
 * - Infrastructure: ResultCache, SimpleType/MapState, ProgramTree, TraceInterpreter
 *
 * Flow:
 *   expression → unit → container generation → cached BodyResult
 *   (class units: initializers, then every constructor seeded from them)
 */

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;

pub use application::{BodyAnalyzer, CommonDataflow, RecordingInterceptor};
pub use domain::{
    BodyResult, ConstantSet, DfaValue, FactMap, FactPoint, LongRange, RunnerStatus, SpecialField,
};
pub use ports::{
    ConstructorCall, ConstructorInfo, DfaInterceptor, Interpreter, Lattice, MemoryState,
    ProgramModel, TypeOf, UnitKind,
};
