/*
 * Common Dataflow Facade
 *
 * Entry point for expression-level dataflow queries:
 *
 *   expression → dataflow context (unit) → container
 *              → cached BodyResult for (container generation, unit)
 *
 * Results are computed lazily, shared as `Arc`s, and never mutated after
 * publication. Non-ok runs are cached like any other result but surface as
 * `None` ("no information").
 *
 * # Example
 * ```rust,ignore
 * let dataflow = CommonDataflow::new(interpreter, model, DataflowConfig::default())?;
 *
 * if let Some(result) = dataflow.resolve(call) {
 *     if result.cannot_fail_by_contract(call) { ... }
 * }
 * let range = dataflow.expression_range(index);
 * ```
 */

use super::analyzer::BodyAnalyzer;
use crate::config::DataflowConfig;
use crate::errors::Result;
use crate::features::common_dataflow::domain::{BodyResult, LongRange};
use crate::features::common_dataflow::infrastructure::ResultCache;
use crate::features::common_dataflow::ports::{Interpreter, Lattice, ProgramModel, TypeOf};
use crate::shared::models::{ConstValue, ContainerId, ExprId, UnitId};
use std::sync::Arc;
use tracing::debug;

/// Cached, thread-safe dataflow facts over a program model
pub struct CommonDataflow<I: Interpreter, M> {
    interpreter: I,
    model: M,
    cache: ResultCache<TypeOf<I>>,
    config: DataflowConfig,
}

impl<I, M> CommonDataflow<I, M>
where
    I: Interpreter,
    M: ProgramModel,
{
    pub fn new(interpreter: I, model: M, config: DataflowConfig) -> Result<Self> {
        config.validate()?;
        let cache = ResultCache::new(
            config.blocking.max_blocked_waiters,
            config.blocking.poll_interval(),
        );
        debug!(
            cache = config.cache.enabled,
            max_blocked_waiters = config.blocking.max_blocked_waiters,
            "dataflow facade created"
        );
        Ok(Self {
            interpreter,
            model,
            cache,
            config,
        })
    }

    pub fn interpreter(&self) -> &I {
        &self.interpreter
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    pub fn config(&self) -> &DataflowConfig {
        &self.config
    }

    /// Facts for the unit covering `expression`; `None` if dataflow did not
    /// complete there or the expression has no dataflow context
    pub fn resolve(&self, expression: ExprId) -> Option<Arc<BodyResult<TypeOf<I>>>> {
        let unit = self.model.dataflow_context(expression)?;
        let result = self.result_for(unit);
        result.status().is_ok().then_some(result)
    }

    /// Joined dataflow type of `expression`; top when nothing is known
    pub fn abstract_value(&self, expression: ExprId) -> TypeOf<I> {
        let expression = self.model.skip_parenthesized_down(expression);
        self.resolve(expression)
            .map_or_else(<TypeOf<I> as Lattice>::top, |result| result.abstract_value(expression))
    }

    /// Integral range of `expression`: its compile-time value if it has one,
    /// otherwise the range of its dataflow type
    pub fn expression_range(&self, expression: ExprId) -> Option<LongRange> {
        let constant = self
            .model
            .constant_value(expression)
            .and_then(|value| value.as_integral());
        if let Some(value) = constant {
            return Some(LongRange::singleton(value));
        }
        self.abstract_value(expression).integral_range()
    }

    /// Single value of `expression`, compile-time or proven by dataflow
    pub fn compute_value(&self, expression: ExprId) -> Option<ConstValue> {
        let expression = self.model.skip_parenthesized_down(expression);
        let value = match self.model.constant_value(expression) {
            Some(value) => value,
            None => self.resolve(expression)?.abstract_value(expression).constant()?,
        };
        (!value.is_null()).then_some(value)
    }

    /// Drop every cached result of `container`
    pub fn invalidate(&self, container: ContainerId) {
        self.cache.invalidate(container);
    }

    fn result_for(&self, unit: UnitId) -> Arc<BodyResult<TypeOf<I>>> {
        let analyze = || {
            BodyAnalyzer::new(&self.interpreter, &self.model)
                .with_stitch_constructors(self.config.analysis.stitch_constructors)
                .analyze(Some(unit))
        };

        let container = self
            .model
            .container_of(unit)
            .filter(|_| self.config.cache.enabled);
        match container {
            Some(container) => {
                let generation = self.model.modification_count(container);
                self.cache.get_or_compute(container, generation, unit, analyze)
            }
            None => Arc::new(analyze()),
        }
    }
}
