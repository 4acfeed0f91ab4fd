/*
 * Body Analyzer
 *
 * Runs the interpreter over one unit and returns the aggregated facts.
 *
 * # Class units
 * The class run covers field and instance initializers. Every constructor
 * with a body is then re-run with the same interceptor, seeded with:
 * - one empty state, when it chains to `this(...)` or its implicit `super()`
 *   may have side effects
 * - the captured instance-initializer end states, otherwise
 *
 * A failed constructor run is rolled back to the last good snapshot, so the
 * result always reflects the initializers plus every constructor that ran
 * to completion.
 */

use super::interceptor::RecordingInterceptor;
use crate::features::common_dataflow::domain::{BodyResult, RunnerStatus};
use crate::features::common_dataflow::ports::{Interpreter, ProgramModel, TypeOf, UnitKind};
use crate::shared::models::UnitId;
use tracing::{debug, warn};

/// One-shot analysis of a unit
pub struct BodyAnalyzer<'a, I, M: ?Sized> {
    interpreter: &'a I,
    model: &'a M,
    stitch_constructors: bool,
}

impl<'a, I, M> BodyAnalyzer<'a, I, M>
where
    I: Interpreter,
    M: ProgramModel + ?Sized,
{
    pub fn new(interpreter: &'a I, model: &'a M) -> Self {
        Self {
            interpreter,
            model,
            stitch_constructors: true,
        }
    }

    /// Skip per-constructor re-runs for class units
    pub fn with_stitch_constructors(mut self, enabled: bool) -> Self {
        self.stitch_constructors = enabled;
        self
    }

    pub fn analyze(&self, unit: Option<UnitId>) -> BodyResult<TypeOf<I>> {
        let Some(unit) = unit else {
            return BodyResult::new(RunnerStatus::NotApplicable);
        };

        let mut interceptor = RecordingInterceptor::<M, I::State>::new(self.model);
        let status = self.interpreter.analyze(unit, Vec::new(), &mut interceptor);
        if !status.is_ok() {
            debug!(%unit, %status, "dataflow run did not complete");
            return BodyResult::new(status);
        }

        if !self.stitch_constructors || self.model.unit_kind(unit) != Some(UnitKind::Class) {
            debug!(%unit, expressions = interceptor.result().len(), "dataflow run finished");
            return interceptor.into_result();
        }

        let initializer_states = interceptor.initializer_end_states().to_vec();
        let mut best = interceptor.result().copy();
        for constructor in self.model.constructors(unit) {
            let Some(body) = constructor.body else {
                continue;
            };
            let seeds = if constructor.reuses_initializer_states() {
                initializer_states.clone()
            } else {
                vec![self.interpreter.create_empty_state()]
            };

            let status = self.interpreter.analyze(body, seeds, &mut interceptor);
            if status.is_ok() {
                best = interceptor.result().copy();
            } else {
                warn!(class = %unit, constructor = %body, %status, "constructor run discarded");
                interceptor.replace_result(best.copy());
            }
        }

        debug!(class = %unit, expressions = best.len(), "class dataflow run finished");
        best
    }
}
