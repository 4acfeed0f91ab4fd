/*
 * Common Dataflow Infrastructure
 *
 * - ResultCache / BlockingBudget: concurrent per-container memo
 * - SimpleType / MapState: built-in lattice and memory state
 * - ProgramTree: arena program model
 * - TraceInterpreter: script-driven interpreter
 */

mod blocking;
mod map_state;
mod program_tree;
mod result_cache;
mod simple_type;
mod trace_interpreter;

pub use blocking::{BlockingBudget, BlockingPermit};
pub use map_state::MapState;
pub use program_tree::{ExprShape, ProgramTree};
pub use result_cache::ResultCache;
pub use simple_type::{Nullability, RefFacts, SimpleType};
pub use trace_interpreter::{TraceInterpreter, TraceRun, TraceScript, TraceStep};
