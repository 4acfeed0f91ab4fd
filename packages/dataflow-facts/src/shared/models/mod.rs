//! Shared models

mod const_value;
mod ids;
mod text_range;

pub use const_value::ConstValue;
pub use ids::{ContainerId, ExprId, UnitId, VarId};
pub use text_range::TextRange;
