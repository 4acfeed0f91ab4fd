//! Interceptor that aggregates interpreter callbacks into a [`BodyResult`]

use crate::features::common_dataflow::domain::{BodyResult, DfaValue, RunnerStatus};
use crate::features::common_dataflow::ports::{DfaInterceptor, MemoryState, ProgramModel};
use crate::shared::models::{ExprId, TextRange};

/// Records every whole-expression push and every instance-initializer end state
pub struct RecordingInterceptor<'m, M: ?Sized, S: MemoryState> {
    model: &'m M,
    result: BodyResult<S::Type>,
    initializer_end_states: Vec<S>,
}

impl<'m, M, S> RecordingInterceptor<'m, M, S>
where
    M: ProgramModel + ?Sized,
    S: MemoryState,
{
    pub fn new(model: &'m M) -> Self {
        Self {
            model,
            result: BodyResult::new(RunnerStatus::Ok),
            initializer_end_states: Vec::new(),
        }
    }

    pub fn result(&self) -> &BodyResult<S::Type> {
        &self.result
    }

    /// Roll the aggregated facts back to `result`
    pub fn replace_result(&mut self, result: BodyResult<S::Type>) {
        self.result = result;
    }

    pub fn into_result(self) -> BodyResult<S::Type> {
        self.result
    }

    /// Snapshots taken at the end of the instance initializers, one per path
    pub fn initializer_end_states(&self) -> &[S] {
        &self.initializer_end_states
    }
}

impl<M, S> DfaInterceptor<S> for RecordingInterceptor<'_, M, S>
where
    M: ProgramModel + ?Sized,
    S: MemoryState,
{
    fn before_expression_push(
        &mut self,
        value: &DfaValue<S::Type>,
        expression: ExprId,
        range: Option<TextRange>,
        state: &S,
    ) {
        // partial pushes describe an operand, not the expression
        if range.is_none() {
            self.result.record(self.model, expression, state, value);
        }
    }

    fn before_initializer_end(&mut self, is_static: bool, state: &S) {
        if !is_static {
            self.initializer_end_states.push(state.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::common_dataflow::infrastructure::{MapState, ProgramTree, SimpleType};
    use crate::features::common_dataflow::ports::UnitKind;
    use crate::shared::models::ConstValue;

    #[test]
    fn test_partial_pushes_are_ignored() {
        let mut tree = ProgramTree::new();
        let file = tree.add_container();
        let method = tree.add_unit(file, UnitKind::Method);
        let sum = tree.add_expr(method);

        let mut interceptor = RecordingInterceptor::new(&tree);
        let state = MapState::new();
        interceptor.before_expression_push(
            &DfaValue::Typed(SimpleType::int(1)),
            sum,
            Some(TextRange::new(0, 1)),
            &state,
        );
        assert!(interceptor.result().is_empty());

        interceptor.before_expression_push(&DfaValue::Typed(SimpleType::int(3)), sum, None, &state);
        let values = interceptor.result().possible_values(sum);
        assert_eq!(values.len(), 1);
        assert!(values.contains(&ConstValue::Int(3)));
    }

    #[test]
    fn test_only_instance_initializer_ends_are_captured() {
        let tree = ProgramTree::new();
        let mut interceptor = RecordingInterceptor::<_, MapState>::new(&tree);

        interceptor.before_initializer_end(true, &MapState::new().with_var("s", SimpleType::int(0)));
        interceptor.before_initializer_end(false, &MapState::new().with_var("f", SimpleType::int(2)));

        let states = interceptor.initializer_end_states();
        assert_eq!(states.len(), 1);
        assert_eq!(states[0].var("f"), SimpleType::int(2));
    }
}
