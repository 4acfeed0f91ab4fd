/*
 * Program Tree
 *
 * Arena-backed `ProgramModel`: expressions with parent links, parentheses and
 * conditionals, grouped into units and containers. Each container keeps a
 * modification counter that callers bump when its source changes.
 */

use crate::features::common_dataflow::ports::{
    ConstructorCall, ConstructorInfo, ProgramModel, UnitKind,
};
use crate::shared::models::{ConstValue, ContainerId, ExprId, UnitId};
use std::sync::atomic::{AtomicU64, Ordering};

/// Syntactic shape of an expression, as far as aggregation cares
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprShape {
    Plain,
    Parenthesized { inner: ExprId },
    Conditional { condition: ExprId },
}

#[derive(Debug, Clone)]
struct ExprNode {
    shape: ExprShape,
    parent: Option<ExprId>,
    unit: Option<UnitId>,
    constant: Option<ConstValue>,
}

#[derive(Debug, Clone)]
struct UnitNode {
    kind: UnitKind,
    container: ContainerId,
    /// Class whose dataflow run covers this unit (initializers, constructors)
    owner: Option<UnitId>,
    constructors: Vec<ConstructorInfo>,
}

/// In-memory program model
#[derive(Debug, Default)]
pub struct ProgramTree {
    exprs: Vec<ExprNode>,
    units: Vec<UnitNode>,
    containers: Vec<AtomicU64>,
}

impl ProgramTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_container(&mut self) -> ContainerId {
        self.containers.push(AtomicU64::new(0));
        ContainerId(self.containers.len() as u32 - 1)
    }

    /// Record a source change: every cached result of `container` goes stale
    pub fn touch(&self, container: ContainerId) {
        if let Some(counter) = self.containers.get(container.0 as usize) {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    pub fn add_unit(&mut self, container: ContainerId, kind: UnitKind) -> UnitId {
        self.push_unit(container, kind, None)
    }

    pub fn add_class(&mut self, container: ContainerId) -> UnitId {
        self.push_unit(container, UnitKind::Class, None)
    }

    /// Instance or static initializer of `class`
    pub fn add_initializer(&mut self, class: UnitId) -> UnitId {
        let container = self.unit(class).map_or(ContainerId(0), |node| node.container);
        self.push_unit(container, UnitKind::Initializer, Some(class))
    }

    /// Constructor of `class` with a body
    pub fn add_constructor(
        &mut self,
        class: UnitId,
        call: ConstructorCall,
        implicit_impure_super: bool,
    ) -> UnitId {
        let container = self.unit(class).map_or(ContainerId(0), |node| node.container);
        let body = self.push_unit(container, UnitKind::Constructor, Some(class));
        self.declare_constructor(
            class,
            ConstructorInfo {
                body: Some(body),
                call,
                implicit_impure_super,
            },
        );
        body
    }

    /// Constructor declared without a body
    pub fn add_bodiless_constructor(&mut self, class: UnitId) {
        self.declare_constructor(
            class,
            ConstructorInfo {
                body: None,
                call: ConstructorCall::None,
                implicit_impure_super: false,
            },
        );
    }

    pub fn add_expr(&mut self, unit: UnitId) -> ExprId {
        self.push_expr(ExprShape::Plain, Some(unit), None)
    }

    /// Literal (compile-time constant) expression
    pub fn add_constant(&mut self, unit: UnitId, value: ConstValue) -> ExprId {
        self.push_expr(ExprShape::Plain, Some(unit), Some(value))
    }

    /// `(inner)`
    pub fn add_parenthesized(&mut self, inner: ExprId) -> ExprId {
        let unit = self.node(inner).and_then(|node| node.unit);
        let constant = self.node(inner).and_then(|node| node.constant.clone());
        let id = self.push_expr(ExprShape::Parenthesized { inner }, unit, constant);
        self.set_parent(inner, id);
        id
    }

    /// `condition ? then_branch : else_branch`
    pub fn add_conditional(
        &mut self,
        condition: ExprId,
        then_branch: ExprId,
        else_branch: ExprId,
    ) -> ExprId {
        let unit = self.node(condition).and_then(|node| node.unit);
        let id = self.push_expr(ExprShape::Conditional { condition }, unit, None);
        for child in [condition, then_branch, else_branch] {
            self.set_parent(child, id);
        }
        id
    }

    pub fn set_parent(&mut self, child: ExprId, parent: ExprId) {
        if let Some(node) = self.exprs.get_mut(child.0 as usize) {
            node.parent = Some(parent);
        }
    }

    pub fn shape(&self, expression: ExprId) -> Option<ExprShape> {
        self.node(expression).map(|node| node.shape)
    }

    fn push_unit(&mut self, container: ContainerId, kind: UnitKind, owner: Option<UnitId>) -> UnitId {
        self.units.push(UnitNode {
            kind,
            container,
            owner,
            constructors: Vec::new(),
        });
        UnitId(self.units.len() as u32 - 1)
    }

    fn push_expr(
        &mut self,
        shape: ExprShape,
        unit: Option<UnitId>,
        constant: Option<ConstValue>,
    ) -> ExprId {
        self.exprs.push(ExprNode {
            shape,
            parent: None,
            unit,
            constant,
        });
        ExprId(self.exprs.len() as u32 - 1)
    }

    fn declare_constructor(&mut self, class: UnitId, info: ConstructorInfo) {
        if let Some(node) = self.units.get_mut(class.0 as usize) {
            node.constructors.push(info);
        }
    }

    fn node(&self, expression: ExprId) -> Option<&ExprNode> {
        self.exprs.get(expression.0 as usize)
    }

    fn unit(&self, unit: UnitId) -> Option<&UnitNode> {
        self.units.get(unit.0 as usize)
    }
}

impl ProgramModel for ProgramTree {
    fn parent(&self, expression: ExprId) -> Option<ExprId> {
        self.node(expression)?.parent
    }

    fn is_parenthesized(&self, expression: ExprId) -> bool {
        matches!(self.shape(expression), Some(ExprShape::Parenthesized { .. }))
    }

    fn skip_parenthesized_down(&self, expression: ExprId) -> ExprId {
        let mut current = expression;
        while let Some(ExprShape::Parenthesized { inner }) = self.shape(current) {
            current = inner;
        }
        current
    }

    fn is_conditional(&self, expression: ExprId) -> bool {
        matches!(self.shape(expression), Some(ExprShape::Conditional { .. }))
    }

    fn is_within_condition(&self, conditional: ExprId, expression: ExprId) -> bool {
        let Some(ExprShape::Conditional { condition }) = self.shape(conditional) else {
            return false;
        };
        let mut current = Some(expression);
        while let Some(candidate) = current {
            if candidate == condition {
                return true;
            }
            if candidate == conditional {
                return false;
            }
            current = self.parent(candidate);
        }
        false
    }

    fn unit_kind(&self, unit: UnitId) -> Option<UnitKind> {
        self.unit(unit).map(|node| node.kind)
    }

    fn constructors(&self, class: UnitId) -> Vec<ConstructorInfo> {
        self.unit(class)
            .map(|node| node.constructors.clone())
            .unwrap_or_default()
    }

    fn dataflow_context(&self, expression: ExprId) -> Option<UnitId> {
        let unit = self.node(expression)?.unit?;
        Some(self.unit(unit)?.owner.unwrap_or(unit))
    }

    fn container_of(&self, unit: UnitId) -> Option<ContainerId> {
        self.unit(unit).map(|node| node.container)
    }

    fn modification_count(&self, container: ContainerId) -> u64 {
        self.containers
            .get(container.0 as usize)
            .map_or(0, |counter| counter.load(Ordering::SeqCst))
    }

    fn constant_value(&self, expression: ExprId) -> Option<ConstValue> {
        self.node(expression)?.constant.clone()
    }
}
