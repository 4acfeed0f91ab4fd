/*
 * Dataflow Values
 *
 * What the interpreter pushes for an expression. The variant decides how the
 * fact point refines the abstract type before joining it.
 */

use crate::shared::models::VarId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Derived facet of a value, tracked by the interpreter as its own variable
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpecialField {
    ArrayLength,
    StringLength,
    CollectionSize,
    /// Primitive value inside a boxed object
    Unbox,
    /// Content of an optional-like container
    OptionalValue,
}

impl SpecialField {
    /// Whether the facet is an integral size (length/size) rather than a wrapped value
    pub fn is_size(&self) -> bool {
        matches!(
            self,
            SpecialField::ArrayLength | SpecialField::StringLength | SpecialField::CollectionSize
        )
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SpecialField::ArrayLength => "length",
            SpecialField::StringLength => "length()",
            SpecialField::CollectionSize => "size()",
            SpecialField::Unbox => "value",
            SpecialField::OptionalValue => "optionalValue",
        }
    }
}

impl fmt::Display for SpecialField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Value pushed by the interpreter
#[derive(Debug, Clone, PartialEq)]
pub enum DfaValue<T> {
    /// Value fully described by its abstract type (constants included)
    Typed(T),

    /// Value stored in an interpreter variable
    Variable(VarId),

    /// Freshly built container whose special field holds `inner`
    /// (e.g. `Optional.of(x)` wraps `x` as its optional value)
    Wrapped { field: SpecialField, inner: VarId },

    /// The call violated its declared contract on this path
    ContractFail,
}

impl<T> DfaValue<T> {
    pub fn variable(name: impl Into<String>) -> Self {
        DfaValue::Variable(VarId::new(name))
    }

    pub fn is_contract_fail(&self) -> bool {
        matches!(self, DfaValue::ContractFail)
    }

    pub fn as_variable(&self) -> Option<&VarId> {
        match self {
            DfaValue::Variable(var) => Some(var),
            _ => None,
        }
    }
}
