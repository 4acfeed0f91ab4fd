//! Property-based tests for fact aggregation
//!
//! Invariants that should hold for ALL observation sequences:
//! - Monotonicity: the abstract value only moves up the lattice
//! - Soundness: a non-empty possible-value set contains every observed constant
//! - Sticky failure: one contract failure is never forgotten
//! - View isolation: assertions-disabled observations never reach the primary view

mod common;

use common::*;
use dataflow_facts::features::common_dataflow::infrastructure::{MapState, ProgramTree, SimpleType};
use dataflow_facts::{BodyResult, ConstValue, DfaValue, ExprId, Lattice, RunnerStatus, UnitKind};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Observation {
    Int(i64),
    Unknown,
    ContractFail,
}

impl Observation {
    fn value(&self) -> DfaValue<SimpleType> {
        match self {
            Observation::Int(value) => int(*value),
            Observation::Unknown => DfaValue::Typed(SimpleType::Top),
            Observation::ContractFail => DfaValue::ContractFail,
        }
    }
}

fn observation() -> impl Strategy<Value = Observation> {
    prop_oneof![
        6 => (-50i64..50).prop_map(Observation::Int),
        1 => Just(Observation::Unknown),
        1 => Just(Observation::ContractFail),
    ]
}

fn single_expr() -> (ProgramTree, ExprId) {
    let mut tree = ProgramTree::new();
    let file = tree.add_container();
    let method = tree.add_unit(file, UnitKind::Method);
    let expr = tree.add_expr(method);
    (tree, expr)
}

proptest! {
    #[test]
    fn prop_abstract_value_is_monotone(observations in prop::collection::vec(observation(), 1..40)) {
        let (tree, expr) = single_expr();
        let mut result = BodyResult::new(RunnerStatus::Ok);
        let mut previous = SimpleType::bottom();

        for observation in &observations {
            result.record(&tree, expr, &MapState::new(), &observation.value());
            let current = result.point(expr).map(|point| point.abstract_value().clone());
            let current = current.unwrap_or_else(SimpleType::bottom);
            prop_assert_eq!(previous.join(&current), current.clone());
            previous = current;
        }
    }

    #[test]
    fn prop_possible_values_are_sound(values in prop::collection::vec(-20i64..20, 1..30), unknown in any::<bool>()) {
        let (tree, expr) = single_expr();
        let mut result = BodyResult::new(RunnerStatus::Ok);
        for value in &values {
            result.record(&tree, expr, &MapState::new(), &int(*value));
        }
        if unknown {
            result.record(&tree, expr, &MapState::new(), &DfaValue::Typed(SimpleType::Top));
        }

        let possible = result.possible_values(expr);
        if unknown {
            prop_assert!(possible.is_empty());
        } else {
            for value in &values {
                prop_assert!(possible.contains(&ConstValue::Int(*value)));
            }
            let distinct: std::collections::HashSet<_> = values.iter().collect();
            prop_assert_eq!(possible.len(), distinct.len());
        }
    }

    #[test]
    fn prop_contract_failure_is_sticky(observations in prop::collection::vec(observation(), 1..40)) {
        let (tree, expr) = single_expr();
        let mut result = BodyResult::new(RunnerStatus::Ok);
        let mut failed = false;

        for observation in &observations {
            result.record(&tree, expr, &MapState::new(), &observation.value());
            failed |= matches!(observation, Observation::ContractFail);
            prop_assert_eq!(result.cannot_fail_by_contract(expr), !failed);
        }
    }

    #[test]
    fn prop_disabled_observations_stay_out_of_primary(
        events in prop::collection::vec((prop::option::of(any::<bool>()), -20i64..20), 1..30)
    ) {
        let (tree, expr) = single_expr();
        let mut result = BodyResult::new(RunnerStatus::Ok);
        let mut expected = SimpleType::bottom();

        for (flag, value) in &events {
            result.record(&tree, expr, &assertions_state(*flag), &int(*value));
            if *flag != Some(true) {
                expected = expected.join(&SimpleType::int(*value));
            }
        }

        let primary = result.point(expr).map(|point| point.abstract_value().clone());
        prop_assert_eq!(primary.unwrap_or_else(SimpleType::bottom), expected);
    }
}
