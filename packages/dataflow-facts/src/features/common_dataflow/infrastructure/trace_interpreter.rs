/*
 * Trace Interpreter
 *
 * `Interpreter` that replays a recorded script of callbacks per unit instead
 * of executing code. Used to drive aggregation with known event sequences
 * and to observe how often (and with which seeds) units get analyzed.
 */

use crate::features::common_dataflow::domain::{DfaValue, RunnerStatus};
use crate::features::common_dataflow::ports::{DfaInterceptor, Interpreter, MemoryState};
use crate::shared::models::{ExprId, TextRange, UnitId};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tracing::debug;

/// One scripted interpreter event
#[derive(Clone)]
pub enum TraceStep<S: MemoryState> {
    /// Push `value` for `expression` under `state`
    Push {
        expression: ExprId,
        value: DfaValue<S::Type>,
        state: S,
        range: Option<TextRange>,
    },

    /// Push `value` once per entry state the run was seeded with
    PushFromSeeds {
        expression: ExprId,
        value: DfaValue<S::Type>,
    },

    /// End of the initializer sequence on one path
    InitializerEnd { is_static: bool, state: S },

    /// Abort the run with the given status
    Stop(RunnerStatus),
}

/// Script replayed for one unit
#[derive(Clone)]
pub struct TraceScript<S: MemoryState> {
    steps: Vec<TraceStep<S>>,
}

impl<S: MemoryState> Default for TraceScript<S> {
    fn default() -> Self {
        Self { steps: Vec::new() }
    }
}

impl<S: MemoryState> TraceScript<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(self, expression: ExprId, value: DfaValue<S::Type>, state: S) -> Self {
        self.step(TraceStep::Push {
            expression,
            value,
            state,
            range: None,
        })
    }

    /// Push that only covers `range` of the expression
    pub fn push_partial(
        self,
        expression: ExprId,
        value: DfaValue<S::Type>,
        state: S,
        range: TextRange,
    ) -> Self {
        self.step(TraceStep::Push {
            expression,
            value,
            state,
            range: Some(range),
        })
    }

    pub fn push_from_seeds(self, expression: ExprId, value: DfaValue<S::Type>) -> Self {
        self.step(TraceStep::PushFromSeeds { expression, value })
    }

    pub fn initializer_end(self, is_static: bool, state: S) -> Self {
        self.step(TraceStep::InitializerEnd { is_static, state })
    }

    pub fn stop(self, status: RunnerStatus) -> Self {
        self.step(TraceStep::Stop(status))
    }

    fn step(mut self, step: TraceStep<S>) -> Self {
        self.steps.push(step);
        self
    }
}

/// One completed `analyze` call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceRun {
    pub unit: UnitId,
    pub seed_count: usize,
    pub status: RunnerStatus,
}

/// Script-driven interpreter
pub struct TraceInterpreter<S: MemoryState> {
    scripts: FxHashMap<UnitId, TraceScript<S>>,

    /// Entry state when a run is not seeded
    empty_state: S,

    /// Artificial run time, to widen race windows
    delay: Option<Duration>,

    invocations: AtomicUsize,
    runs: Mutex<Vec<TraceRun>>,
}

impl<S: MemoryState> TraceInterpreter<S> {
    pub fn new(empty_state: S) -> Self {
        Self {
            scripts: FxHashMap::default(),
            empty_state,
            delay: None,
            invocations: AtomicUsize::new(0),
            runs: Mutex::new(Vec::new()),
        }
    }

    pub fn with_script(mut self, unit: UnitId, script: TraceScript<S>) -> Self {
        self.scripts.insert(unit, script);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Number of `analyze` calls so far
    pub fn invocations(&self) -> usize {
        self.invocations.load(Ordering::SeqCst)
    }

    /// Completed runs, in completion order
    pub fn runs(&self) -> Vec<TraceRun> {
        self.runs.lock().clone()
    }

    fn replay(
        &self,
        unit: UnitId,
        seeds: &[S],
        interceptor: &mut dyn DfaInterceptor<S>,
    ) -> RunnerStatus {
        let Some(script) = self.scripts.get(&unit) else {
            return RunnerStatus::Ok;
        };
        for step in &script.steps {
            match step {
                TraceStep::Push {
                    expression,
                    value,
                    state,
                    range,
                } => interceptor.before_expression_push(value, *expression, *range, state),
                TraceStep::PushFromSeeds { expression, value } => {
                    if seeds.is_empty() {
                        interceptor.before_expression_push(value, *expression, None, &self.empty_state);
                    }
                    for seed in seeds {
                        interceptor.before_expression_push(value, *expression, None, seed);
                    }
                }
                TraceStep::InitializerEnd { is_static, state } => {
                    interceptor.before_initializer_end(*is_static, state)
                }
                TraceStep::Stop(status) => return *status,
            }
        }
        RunnerStatus::Ok
    }
}

impl<S: MemoryState> Interpreter for TraceInterpreter<S> {
    type State = S;

    fn analyze(
        &self,
        unit: UnitId,
        seeds: Vec<S>,
        interceptor: &mut dyn DfaInterceptor<S>,
    ) -> RunnerStatus {
        self.invocations.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let status = self.replay(unit, &seeds, interceptor);
        debug!(%unit, seeds = seeds.len(), %status, "trace run finished");

        self.runs.lock().push(TraceRun {
            unit,
            seed_count: seeds.len(),
            status,
        });
        status
    }

    fn create_empty_state(&self) -> S {
        self.empty_state.clone()
    }
}
