/*
 * Abstract Type Lattice Port
 *
 * The abstract value system is opaque to the aggregator. It only needs
 * join/meet, the two extremes, constant extraction and the few facet
 * operations used when refining a variable with its special field.
 */

use crate::features::common_dataflow::domain::{LongRange, SpecialField};
use crate::shared::models::ConstValue;
use std::fmt::Debug;

/// Abstract type lattice (the `DfType` of the interpreter)
pub trait Lattice: Clone + PartialEq + Debug + Send + Sync + 'static {
    /// Least element (nothing observed)
    fn bottom() -> Self;

    /// Greatest element (no information)
    fn top() -> Self;

    fn is_top(&self) -> bool {
        *self == Self::top()
    }

    /// Least upper bound ⊔
    fn join(&self, other: &Self) -> Self;

    /// Greatest lower bound ⊓
    fn meet(&self, other: &Self) -> Self;

    /// Concrete constant, if the type describes exactly one value
    fn constant(&self) -> Option<ConstValue>;

    /// Whether the type describes reference (object) values
    fn is_reference(&self) -> bool;

    /// Same type with nullability widened to "unknown"
    fn drop_nullability(&self) -> Self;

    /// Type of a qualifier whose `field` has type `field_type`
    fn from_special_field(field: SpecialField, field_type: &Self) -> Self;

    /// Integral range described by the type, if any
    fn integral_range(&self) -> Option<LongRange>;

    /// Boolean constant described by the type, if any
    fn as_bool(&self) -> Option<bool> {
        match self.constant() {
            Some(ConstValue::Bool(value)) => Some(value),
            _ => None,
        }
    }
}
