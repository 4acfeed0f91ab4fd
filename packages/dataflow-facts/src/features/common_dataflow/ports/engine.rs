/*
 * Interpreter Ports
 *
 * The interpreter walks a unit, keeps one memory state per explored path and
 * calls back into a `DfaInterceptor` for every value it pushes.
 */

use super::lattice::Lattice;
use crate::features::common_dataflow::domain::{DfaValue, RunnerStatus, SpecialField};
use crate::shared::models::{ExprId, TextRange, UnitId, VarId};

/// Interpreter memory state at one program point
///
/// `Clone` is the snapshot operation: a clone must be independent of the
/// original.
pub trait MemoryState: Clone + Send + Sync + 'static {
    type Type: Lattice;

    /// Abstract type of `value` under this state
    fn type_of(&self, value: &DfaValue<Self::Type>) -> Self::Type;

    /// Special field carried by `var`, if its type has one
    fn special_field_of(&self, var: &VarId) -> Option<SpecialField>;

    /// Abstract type of `qualifier.field` under this state
    fn special_field_type(&self, qualifier: &VarId, field: SpecialField) -> Self::Type;

    /// The synthetic "assertions disabled" flag variable, when the unit has assertions
    fn assertions_disabled_var(&self) -> Option<VarId>;
}

/// Callbacks the interpreter issues while running
pub trait DfaInterceptor<S: MemoryState> {
    /// A value is about to be pushed for `expression`.
    ///
    /// `range` is set when the value only covers part of the expression.
    fn before_expression_push(
        &mut self,
        value: &DfaValue<S::Type>,
        expression: ExprId,
        range: Option<TextRange>,
        state: &S,
    );

    /// End of the (static or instance) initializer sequence on one path
    fn before_initializer_end(&mut self, _is_static: bool, _state: &S) {}
}

/// Abstract interpreter
pub trait Interpreter: Send + Sync {
    type State: MemoryState;

    /// Run over `unit`.
    ///
    /// `seeds` are the entry states; an empty list means the interpreter's own
    /// default entry state.
    fn analyze(
        &self,
        unit: UnitId,
        seeds: Vec<Self::State>,
        interceptor: &mut dyn DfaInterceptor<Self::State>,
    ) -> RunnerStatus;

    /// Fresh state with nothing known
    fn create_empty_state(&self) -> Self::State;
}

/// Lattice type produced by an interpreter
pub type TypeOf<I> = <<I as Interpreter>::State as MemoryState>::Type;
