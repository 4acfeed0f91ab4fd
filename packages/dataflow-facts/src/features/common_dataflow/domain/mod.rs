/*
 * Common Dataflow Domain Models
 *
 * Per-expression facts and the per-unit container holding them.
 */

mod body_result;
mod fact_point;
mod range;
mod status;
mod value;

pub use body_result::{BodyResult, FactMap};
pub use fact_point::{ConstantSet, FactPoint};
pub use range::LongRange;
pub use status::RunnerStatus;
pub use value::{DfaValue, SpecialField};
