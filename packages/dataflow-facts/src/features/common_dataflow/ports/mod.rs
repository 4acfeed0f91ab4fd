/*
 * Common Dataflow Ports
 *
 * Interfaces of the external collaborators: abstract type lattice,
 * interpreter + memory state, and program model.
 */

mod engine;
mod lattice;
mod program_model;

pub use engine::{DfaInterceptor, Interpreter, MemoryState, TypeOf};
pub use lattice::Lattice;
pub use program_model::{ConstructorCall, ConstructorInfo, ProgramModel, UnitKind};
