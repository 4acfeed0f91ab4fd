/*
 * Body Result
 *
 * Facts collected by one dataflow run over one analyzed unit.
 *
 * Two views are kept:
 * - primary:  facts with assertions enabled (or unknown)
 * - disabled: facts assuming the "assertions disabled" flag is set
 *
 * The disabled view shares the primary map until an observation is made
 * under a state where the flag is provably true or false; from then on it is
 * an independent deep copy (copy-on-write).
 */

use super::fact_point::FactPoint;
use super::status::RunnerStatus;
use super::value::DfaValue;
use crate::errors::{DataflowError, Result};
use crate::features::common_dataflow::ports::{Lattice, MemoryState, ProgramModel};
use crate::shared::models::{ConstValue, ExprId};
use rustc_hash::{FxHashMap, FxHashSet};

/// Expression → fact point
pub type FactMap<T> = FxHashMap<ExprId, FactPoint<T>>;

/// Assertions-disabled view of a [`BodyResult`]
#[derive(Debug, Clone, PartialEq)]
enum DisabledView<T> {
    /// Same facts as the primary view
    Shared,
    /// Diverged, independent facts
    Diverged(FactMap<T>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewTarget {
    Primary,
    Disabled,
}

/// Facts for every expression of one analyzed unit
#[derive(Debug, Clone, PartialEq)]
pub struct BodyResult<T> {
    primary: FactMap<T>,
    disabled: DisabledView<T>,
    status: RunnerStatus,
}

impl<T: Lattice> BodyResult<T> {
    pub fn new(status: RunnerStatus) -> Self {
        Self {
            primary: FactMap::default(),
            disabled: DisabledView::Shared,
            status,
        }
    }

    pub fn status(&self) -> RunnerStatus {
        self.status
    }

    /// Number of tracked expressions in the primary view
    pub fn len(&self) -> usize {
        self.primary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_empty()
    }

    /// Whether the assertions-disabled view has its own facts
    pub fn has_diverged_views(&self) -> bool {
        matches!(self.disabled, DisabledView::Diverged(_))
    }

    /// Snapshot of the primary facts with the views shared again
    pub fn copy(&self) -> Self {
        Self {
            primary: self.primary.clone(),
            disabled: DisabledView::Shared,
            status: self.status,
        }
    }

    /// Record that `value` was pushed for `expression` under `state`
    pub fn record<S, M>(&mut self, model: &M, expression: ExprId, state: &S, value: &DfaValue<T>)
    where
        S: MemoryState<Type = T>,
        M: ProgramModel + ?Sized,
    {
        let assertions_disabled = state
            .assertions_disabled_var()
            .and_then(|flag| state.type_of(&DfaValue::Variable(flag)).as_bool());

        match assertions_disabled {
            Some(disabled) => {
                self.fork_disabled_view();
                let target = if disabled {
                    ViewTarget::Disabled
                } else {
                    ViewTarget::Primary
                };
                self.update_point(target, model, expression, state, value);
            }
            None => {
                self.update_point(ViewTarget::Primary, model, expression, state, value);
                if self.has_diverged_views() {
                    self.update_point(ViewTarget::Disabled, model, expression, state, value);
                }
            }
        }
    }

    fn fork_disabled_view(&mut self) {
        if let DisabledView::Shared = self.disabled {
            self.disabled = DisabledView::Diverged(self.primary.clone());
        }
    }

    fn view_mut(&mut self, target: ViewTarget) -> &mut FactMap<T> {
        match (target, &mut self.disabled) {
            (ViewTarget::Disabled, DisabledView::Diverged(map)) => map,
            _ => &mut self.primary,
        }
    }

    fn update_point<S, M>(
        &mut self,
        target: ViewTarget,
        model: &M,
        expression: ExprId,
        state: &S,
        value: &DfaValue<T>,
    ) where
        S: MemoryState<Type = T>,
        M: ProgramModel + ?Sized,
    {
        let point = self.view_mut(target).entry(expression).or_default();
        if value.is_contract_fail() {
            point.mark_contract_failure();
            return;
        }
        if !point.abstract_value().is_top() {
            // a conditional expression takes the value of whichever branch ran
            if let Some(parent) = conditional_parent(model, expression) {
                self.record(model, parent, state, value);
            }
        }
        let point = self.view_mut(target).entry(expression).or_default();
        point.observe_facts(state, value);
        point.observe_value(state, value);
    }

    /// Fact point in the primary view
    pub fn point(&self, expression: ExprId) -> Option<&FactPoint<T>> {
        self.primary.get(&expression)
    }

    /// Whether dataflow visited `expression`.
    ///
    /// Dataflow tracks deparenthesized expressions only; `false` may also mean
    /// the expression is unreachable.
    pub fn was_analyzed<M>(&self, model: &M, expression: ExprId) -> Result<bool>
    where
        M: ProgramModel + ?Sized,
    {
        if model.is_parenthesized(expression) {
            return Err(DataflowError::ParenthesizedExpression(expression));
        }
        Ok(self.primary.contains_key(&expression))
    }

    /// True if the call cannot fail according to its contracts
    /// (e.g. `Optional.get()` under `Optional.isPresent()`); false if unknown or can fail
    pub fn cannot_fail_by_contract(&self, call: ExprId) -> bool {
        self.primary
            .get(&call)
            .is_some_and(|point| !point.may_fail_by_contract())
    }

    /// Possible values of `expression`; empty when unknown.
    ///
    /// A non-empty set guarantees the expression evaluates to one of its members.
    pub fn possible_values(&self, expression: ExprId) -> FxHashSet<ConstValue> {
        self.primary
            .get(&expression)
            .map(|point| point.constants().to_set())
            .unwrap_or_default()
    }

    /// Joined abstract type; top when nothing is known
    pub fn abstract_value(&self, expression: ExprId) -> T {
        self.primary
            .get(&expression)
            .map_or_else(T::top, |point| point.abstract_value().clone())
    }

    /// Joined abstract type assuming assertions are disabled; top when nothing is known
    pub fn abstract_value_ignoring_assertions(&self, expression: ExprId) -> T {
        let view = match &self.disabled {
            DisabledView::Shared => &self.primary,
            DisabledView::Diverged(map) => map,
        };
        view.get(&expression)
            .map_or_else(T::top, |point| point.abstract_value().clone())
    }
}

/// Conditional parent receiving the facts of `expression`, if it is a branch
fn conditional_parent<M>(model: &M, expression: ExprId) -> Option<ExprId>
where
    M: ProgramModel + ?Sized,
{
    let parent = model.skip_parenthesized_up(expression)?;
    (model.is_conditional(parent) && !model.is_within_condition(parent, expression))
        .then_some(parent)
}
