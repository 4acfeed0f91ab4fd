//! Custom assertions for test verification
//!
//! This module provides domain-specific assertions over dataflow results.

use dataflow_facts::features::common_dataflow::infrastructure::SimpleType;
use dataflow_facts::{BodyResult, ConstValue, ExprId};
use std::sync::Arc;

/// Assert that `expression` may evaluate to exactly the given integers
pub fn assert_possible_ints(result: &BodyResult<SimpleType>, expression: ExprId, expected: &[i64]) {
    let actual = result.possible_values(expression);
    assert_eq!(
        actual.len(),
        expected.len(),
        "Expected possible values {expected:?} for {expression}, got {actual:?}"
    );
    for value in expected {
        assert!(
            actual.contains(&ConstValue::Int(*value)),
            "Missing possible value {value} for {expression}; got {actual:?}"
        );
    }
}

/// Assert that nothing is known about the values of `expression`
pub fn assert_no_possible_values(result: &BodyResult<SimpleType>, expression: ExprId) {
    let actual = result.possible_values(expression);
    assert!(
        actual.is_empty(),
        "Expected no possible values for {expression}, got {actual:?}"
    );
}

/// Assert that every caller received the same published result
pub fn assert_all_same<T>(results: &[Arc<T>]) {
    let Some(first) = results.first() else {
        panic!("Expected at least one result");
    };
    for (index, result) in results.iter().enumerate() {
        assert!(
            Arc::ptr_eq(first, result),
            "Result #{index} is a different allocation than result #0"
        );
    }
}
