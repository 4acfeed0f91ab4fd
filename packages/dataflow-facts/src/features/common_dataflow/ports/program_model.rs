/*
 * Program Model Port
 *
 * Tree navigation and declaration queries the aggregator needs. Nodes are
 * identity keys only.
 */

use crate::shared::models::{ConstValue, ContainerId, ExprId, UnitId};
use serde::{Deserialize, Serialize};

/// Kind of analyzed unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitKind {
    Method,
    Initializer,
    Constructor,
    /// Whole class: field initializers plus per-constructor stitching
    Class,
}

/// Explicit first statement of a constructor body
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConstructorCall {
    /// `this(...)`: delegates to a sibling constructor
    This,
    /// `super(...)`
    Super,
    /// No explicit chaining call
    None,
}

/// Constructor declaration as seen by the aggregator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorInfo {
    /// Body unit; `None` for bodiless (e.g. compiled) constructors
    pub body: Option<UnitId>,

    pub call: ConstructorCall,

    /// Without an explicit call, whether the implicit `super()` may have side effects
    pub implicit_impure_super: bool,
}

impl ConstructorInfo {
    /// Whether this constructor can start from the captured initializer end-states
    pub fn reuses_initializer_states(&self) -> bool {
        match self.call {
            ConstructorCall::This => false,
            ConstructorCall::None => !self.implicit_impure_super,
            ConstructorCall::Super => true,
        }
    }
}

/// Program model queried during aggregation and lookup
pub trait ProgramModel: Send + Sync {
    /// Direct syntactic parent
    fn parent(&self, expression: ExprId) -> Option<ExprId>;

    fn is_parenthesized(&self, expression: ExprId) -> bool;

    /// Innermost non-parenthesized expression inside `expression`
    fn skip_parenthesized_down(&self, expression: ExprId) -> ExprId;

    fn is_conditional(&self, expression: ExprId) -> bool;

    /// Whether `expression` is the condition of `conditional` or lies inside it
    fn is_within_condition(&self, conditional: ExprId, expression: ExprId) -> bool;

    fn unit_kind(&self, unit: UnitId) -> Option<UnitKind>;

    /// Declared constructors of a class unit, in declaration order
    fn constructors(&self, class: UnitId) -> Vec<ConstructorInfo>;

    /// Unit whose dataflow run covers `expression`
    fn dataflow_context(&self, expression: ExprId) -> Option<UnitId>;

    fn container_of(&self, unit: UnitId) -> Option<ContainerId>;

    /// Modification counter; any change invalidates the container's results
    fn modification_count(&self, container: ContainerId) -> u64;

    /// Compile-time constant value of `expression`
    fn constant_value(&self, _expression: ExprId) -> Option<ConstValue> {
        None
    }

    /// First non-parenthesized ancestor
    fn skip_parenthesized_up(&self, expression: ExprId) -> Option<ExprId> {
        let mut parent = self.parent(expression);
        while let Some(candidate) = parent {
            if !self.is_parenthesized(candidate) {
                return Some(candidate);
            }
            parent = self.parent(candidate);
        }
        None
    }
}
