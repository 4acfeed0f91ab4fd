//! Test data builders
//!
//! Shorthands for pushed values, memory states and facades.

use dataflow_facts::features::common_dataflow::infrastructure::{
    MapState, ProgramTree, SimpleType, TraceInterpreter,
};
use dataflow_facts::{CommonDataflow, DataflowConfig, DfaValue, SpecialField};

/// Facade over the in-memory adapters
pub type TestDataflow = CommonDataflow<TraceInterpreter<MapState>, ProgramTree>;

/// Pushed integer constant
pub fn int(value: i64) -> DfaValue<SimpleType> {
    DfaValue::Typed(SimpleType::int(value))
}

/// Pushed value of an interpreter variable
pub fn var(name: &str) -> DfaValue<SimpleType> {
    DfaValue::variable(name)
}

/// State with the assertions flag bound to `disabled` (`None` = unknown)
pub fn assertions_state(disabled: Option<bool>) -> MapState {
    let flag = match disabled {
        Some(value) => SimpleType::boolean(value),
        None => SimpleType::Top,
    };
    MapState::new()
        .with_assertions_flag("$assertionsDisabled")
        .with_var("$assertionsDisabled", flag)
}

/// State where optional `name` is known to hold a value
pub fn present_optional(name: &str) -> MapState {
    MapState::new()
        .with_var(name, SimpleType::not_null())
        .with_special_field(name, SpecialField::OptionalValue)
        .with_field_type(name, SpecialField::OptionalValue, SimpleType::not_null())
}

/// State where optional `name` is known to be empty
pub fn empty_optional(name: &str) -> MapState {
    MapState::new()
        .with_var(name, SimpleType::not_null())
        .with_special_field(name, SpecialField::OptionalValue)
        .with_field_type(name, SpecialField::OptionalValue, SimpleType::null())
}

/// Facade with default configuration
pub fn facade(interpreter: TraceInterpreter<MapState>, tree: ProgramTree) -> TestDataflow {
    facade_with(interpreter, tree, DataflowConfig::default())
}

pub fn facade_with(
    interpreter: TraceInterpreter<MapState>,
    tree: ProgramTree,
    config: DataflowConfig,
) -> TestDataflow {
    match CommonDataflow::new(interpreter, tree, config) {
        Ok(dataflow) => dataflow,
        Err(err) => panic!("invalid test configuration: {err}"),
    }
}
