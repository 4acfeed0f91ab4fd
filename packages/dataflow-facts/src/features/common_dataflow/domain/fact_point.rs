/*
 * Fact Point
 *
 * Accumulates everything dataflow observed for one expression across all
 * visited paths:
 * - abstract type: joined over every observation (bottom → ... → top)
 * - possible constants: finite set until a non-constant value shows up
 * - contract failure: sticky flag
 */

use super::value::DfaValue;
use crate::features::common_dataflow::ports::{Lattice, MemoryState};
use crate::shared::models::ConstValue;
use rustc_hash::FxHashSet;

/// Possible constant values of an expression
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConstantSet {
    /// Nothing observed yet
    #[default]
    Empty,
    Single(ConstValue),
    Many(FxHashSet<ConstValue>),
    /// A non-constant value was observed; never reverts
    Unbounded,
}

impl ConstantSet {
    pub fn is_unbounded(&self) -> bool {
        matches!(self, ConstantSet::Unbounded)
    }

    pub fn contains(&self, value: &ConstValue) -> bool {
        match self {
            ConstantSet::Single(existing) => existing == value,
            ConstantSet::Many(values) => values.contains(value),
            ConstantSet::Empty | ConstantSet::Unbounded => false,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            ConstantSet::Single(_) => 1,
            ConstantSet::Many(values) => values.len(),
            ConstantSet::Empty | ConstantSet::Unbounded => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Add a constant; no-op once unbounded
    pub fn insert(&mut self, value: ConstValue) {
        match self {
            ConstantSet::Unbounded => {}
            ConstantSet::Empty => *self = ConstantSet::Single(value),
            ConstantSet::Single(existing) if *existing == value => {}
            ConstantSet::Single(existing) => {
                let first = std::mem::replace(existing, ConstValue::Null);
                let mut values = FxHashSet::default();
                values.insert(first);
                values.insert(value);
                *self = ConstantSet::Many(values);
            }
            ConstantSet::Many(values) => {
                values.insert(value);
            }
        }
    }

    /// Tracked constants; empty for both "nothing observed" and "unbounded"
    pub fn to_set(&self) -> FxHashSet<ConstValue> {
        match self {
            ConstantSet::Single(value) => std::iter::once(value.clone()).collect(),
            ConstantSet::Many(values) => values.clone(),
            ConstantSet::Empty | ConstantSet::Unbounded => FxHashSet::default(),
        }
    }
}

/// Per-expression accumulator
#[derive(Debug, Clone, PartialEq)]
pub struct FactPoint<T> {
    abstract_value: T,
    constants: ConstantSet,
    may_fail_by_contract: bool,
}

impl<T: Lattice> Default for FactPoint<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Lattice> FactPoint<T> {
    pub fn new() -> Self {
        Self {
            abstract_value: T::bottom(),
            constants: ConstantSet::Empty,
            may_fail_by_contract: false,
        }
    }

    pub fn abstract_value(&self) -> &T {
        &self.abstract_value
    }

    pub fn constants(&self) -> &ConstantSet {
        &self.constants
    }

    pub fn may_fail_by_contract(&self) -> bool {
        self.may_fail_by_contract
    }

    pub fn mark_contract_failure(&mut self) {
        self.may_fail_by_contract = true;
    }

    /// Track the constant `value` resolves to under `state`
    pub fn observe_value<S>(&mut self, state: &S, value: &DfaValue<T>)
    where
        S: MemoryState<Type = T>,
    {
        if self.constants.is_unbounded() {
            return;
        }
        match state.type_of(value).constant() {
            Some(constant) => self.constants.insert(constant),
            None => self.constants = ConstantSet::Unbounded,
        }
    }

    /// Join the (special-field refined) type of `value` under `state`
    pub fn observe_facts<S>(&mut self, state: &S, value: &DfaValue<T>)
    where
        S: MemoryState<Type = T>,
    {
        if self.abstract_value.is_top() {
            return;
        }
        let mut new_type = state.type_of(value);
        match value {
            DfaValue::Variable(var) => {
                if let Some(field) = state.special_field_of(var) {
                    if new_type.is_reference() {
                        let field_type = state.special_field_type(var, field);
                        let mut with_field = T::from_special_field(field, &field_type);
                        // nullability of the facet must not leak onto the container
                        if with_field.is_reference() {
                            with_field = with_field.drop_nullability();
                        }
                        new_type = new_type.meet(&with_field);
                    }
                }
            }
            DfaValue::Wrapped { field, inner } => {
                let inner_type = state.type_of(&DfaValue::Variable(inner.clone()));
                new_type = new_type.meet(&T::from_special_field(*field, &inner_type));
            }
            DfaValue::Typed(_) | DfaValue::ContractFail => {}
        }
        self.abstract_value = self.abstract_value.join(&new_type);
    }
}
