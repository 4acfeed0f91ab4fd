//! Test fixture generators
//!
//! Each fixture is a small program tree plus the interpreter script a real
//! abstract interpreter would emit for it.

use super::builders::{empty_optional, int, present_optional, var};
use dataflow_facts::features::common_dataflow::infrastructure::{
    MapState, ProgramTree, SimpleType, TraceInterpreter, TraceScript,
};
use dataflow_facts::{
    ConstValue, ConstructorCall, ContainerId, DfaValue, ExprId, RunnerStatus, SpecialField, UnitId,
    UnitKind,
};

// ============================================================================
// `x ? 1 : 2`
// ============================================================================

pub struct TernaryFixture {
    pub tree: ProgramTree,
    pub interpreter: TraceInterpreter<MapState>,
    pub file: ContainerId,
    pub method: UnitId,
    pub condition: ExprId,
    pub then_branch: ExprId,
    pub else_branch: ExprId,
    pub conditional: ExprId,
}

/// `int m(boolean x) { return x ? 1 : (2); }` with `x` unknown
pub fn fixture_ternary() -> TernaryFixture {
    let mut tree = ProgramTree::new();
    let file = tree.add_container();
    let method = tree.add_unit(file, UnitKind::Method);
    let condition = tree.add_expr(method);
    let then_branch = tree.add_constant(method, ConstValue::Int(1));
    let else_branch = tree.add_constant(method, ConstValue::Int(2));
    let wrapped_else = tree.add_parenthesized(else_branch);
    let conditional = tree.add_conditional(condition, then_branch, wrapped_else);

    let script = TraceScript::new()
        .push(condition, var("x"), MapState::new())
        .push(
            then_branch,
            int(1),
            MapState::new().with_var("x", SimpleType::boolean(true)),
        )
        .push(
            else_branch,
            int(2),
            MapState::new().with_var("x", SimpleType::boolean(false)),
        );
    let interpreter = TraceInterpreter::new(MapState::new()).with_script(method, script);

    TernaryFixture {
        tree,
        interpreter,
        file,
        method,
        condition,
        then_branch,
        else_branch,
        conditional,
    }
}

/// `int m() { boolean x = <known>; return x ? 1 : (2); }`
///
/// Only the branch selected by `known` is ever pushed.
pub fn fixture_ternary_known(known: bool) -> TernaryFixture {
    let mut tree = ProgramTree::new();
    let file = tree.add_container();
    let method = tree.add_unit(file, UnitKind::Method);
    let condition = tree.add_expr(method);
    let then_branch = tree.add_constant(method, ConstValue::Int(1));
    let else_branch = tree.add_constant(method, ConstValue::Int(2));
    let wrapped_else = tree.add_parenthesized(else_branch);
    let conditional = tree.add_conditional(condition, then_branch, wrapped_else);

    let state = MapState::new().with_var("x", SimpleType::boolean(known));
    let (taken, value) = if known {
        (then_branch, int(1))
    } else {
        (else_branch, int(2))
    };
    let script = TraceScript::new()
        .push(condition, var("x"), state.clone())
        .push(taken, value, state);
    let interpreter = TraceInterpreter::new(MapState::new()).with_script(method, script);

    TernaryFixture {
        tree,
        interpreter,
        file,
        method,
        condition,
        then_branch,
        else_branch,
        conditional,
    }
}

// ============================================================================
// Optional contracts
// ============================================================================

pub struct OptionalFixture {
    pub tree: ProgramTree,
    pub interpreter: TraceInterpreter<MapState>,
    /// `opt` qualifier inside the guarded `opt.get()`
    pub guarded_qualifier: ExprId,
    /// `opt.get()` under `if (opt.isPresent())`
    pub guarded_get: ExprId,
    /// `opt.get()` without a guard
    pub unguarded_get: ExprId,
    /// `Optional.of(s)`
    pub wrap: ExprId,
}

/// ```text
/// void guarded(Optional<String> opt)   { if (opt.isPresent()) use(opt.get()); }
/// void unguarded(Optional<String> opt) { use(opt.get()); }
/// Optional<String> wrap(String s)      { return Optional.of(s); }
/// ```
pub fn fixture_optional() -> OptionalFixture {
    let mut tree = ProgramTree::new();
    let file = tree.add_container();

    let guarded = tree.add_unit(file, UnitKind::Method);
    let is_present = tree.add_expr(guarded);
    let guarded_qualifier = tree.add_expr(guarded);
    let guarded_get = tree.add_expr(guarded);

    let unguarded = tree.add_unit(file, UnitKind::Method);
    let unguarded_get = tree.add_expr(unguarded);

    let wrapper = tree.add_unit(file, UnitKind::Method);
    let wrap = tree.add_expr(wrapper);

    let guarded_script = TraceScript::new()
        .push(is_present, DfaValue::Typed(SimpleType::Top), MapState::new())
        .push(guarded_qualifier, var("opt"), present_optional("opt"))
        .push(guarded_get, DfaValue::Typed(SimpleType::not_null()), present_optional("opt"));

    let unguarded_script = TraceScript::new()
        .push(unguarded_get, DfaValue::Typed(SimpleType::not_null()), present_optional("opt"))
        .push(unguarded_get, DfaValue::ContractFail, empty_optional("opt"));

    let wrap_script = TraceScript::new().push(
        wrap,
        DfaValue::Wrapped {
            field: SpecialField::OptionalValue,
            inner: "s".into(),
        },
        MapState::new().with_var("s", SimpleType::str("value")),
    );

    let interpreter = TraceInterpreter::new(MapState::new())
        .with_script(guarded, guarded_script)
        .with_script(unguarded, unguarded_script)
        .with_script(wrapper, wrap_script);

    OptionalFixture {
        tree,
        interpreter,
        guarded_qualifier,
        guarded_get,
        unguarded_get,
        wrap,
    }
}

// ============================================================================
// Class with initializer and constructors
// ============================================================================

pub struct ClassFixture {
    pub tree: ProgramTree,
    pub interpreter: TraceInterpreter<MapState>,
    pub class: UnitId,
    /// `2` in `int f = 2;`
    pub field_initializer: ExprId,
    /// `f` read in `Foo() { use(f); }`
    pub plain_read: ExprId,
    /// `f` read in `Foo(int a) { this(); use(f); }`
    pub chaining_read: ExprId,
    /// `f` read after an implicit `super()` with side effects
    pub impure_super_read: ExprId,
    /// `f` read in a constructor the interpreter gives up on
    pub failing_read: ExprId,
    /// `f` read in `Foo(long a) { super(a); use(f); }`
    pub super_read: ExprId,
}

/// ```text
/// class Foo extends Base {
///     int f = 2;
///     Foo()              { use(f); }
///     Foo(int a)         { this(); use(f); }
///     Foo(String s)      { use(f); }         // Base() is impure
///     Foo(double d)      { use(f); ... }     // too complex
///     Foo(long a)        { super(a); use(f); }
/// }
/// ```
pub fn fixture_class() -> ClassFixture {
    let mut tree = ProgramTree::new();
    let file = tree.add_container();
    let class = tree.add_class(file);
    let initializer = tree.add_initializer(class);
    let field_initializer = tree.add_constant(initializer, ConstValue::Int(2));

    let plain = tree.add_constructor(class, ConstructorCall::None, false);
    let plain_read = tree.add_expr(plain);
    let chaining = tree.add_constructor(class, ConstructorCall::This, false);
    let chaining_read = tree.add_expr(chaining);
    let impure_super = tree.add_constructor(class, ConstructorCall::None, true);
    let impure_super_read = tree.add_expr(impure_super);
    let failing = tree.add_constructor(class, ConstructorCall::None, false);
    let failing_read = tree.add_expr(failing);
    let explicit_super = tree.add_constructor(class, ConstructorCall::Super, false);
    let super_read = tree.add_expr(explicit_super);
    tree.add_bodiless_constructor(class);

    let after_init = MapState::new().with_var("f", SimpleType::int(2));
    let class_script = TraceScript::new()
        .push(field_initializer, int(2), MapState::new())
        .initializer_end(true, MapState::new().with_var("f", SimpleType::int(99)))
        .initializer_end(false, after_init);

    let interpreter = TraceInterpreter::new(MapState::new())
        .with_script(class, class_script)
        .with_script(plain, TraceScript::new().push_from_seeds(plain_read, var("f")))
        .with_script(chaining, TraceScript::new().push_from_seeds(chaining_read, var("f")))
        .with_script(
            impure_super,
            TraceScript::new().push_from_seeds(impure_super_read, var("f")),
        )
        .with_script(
            failing,
            TraceScript::new()
                .push_from_seeds(failing_read, int(7))
                .stop(RunnerStatus::TooComplex),
        )
        .with_script(explicit_super, TraceScript::new().push_from_seeds(super_read, var("f")));

    ClassFixture {
        tree,
        interpreter,
        class,
        field_initializer,
        plain_read,
        chaining_read,
        impure_super_read,
        failing_read,
        super_read,
    }
}

pub struct ReassignedFieldFixture {
    pub tree: ProgramTree,
    pub interpreter: TraceInterpreter<MapState>,
    /// `1` in `int f = 1;`
    pub first_write: ExprId,
    /// `2` in `{ f = 2; }`
    pub second_write: ExprId,
    /// `f` read in `Bar() { use(f); }`
    pub plain_read: ExprId,
    /// `f` read in `Bar(int a) { this(); use(f); }`
    pub chaining_read: ExprId,
}

/// ```text
/// class Bar {
///     int f = 1;
///     { f = 2; }
///     Bar()      { use(f); }
///     Bar(int a) { this(); use(f); }
/// }
/// ```
pub fn fixture_reassigned_field() -> ReassignedFieldFixture {
    let mut tree = ProgramTree::new();
    let file = tree.add_container();
    let class = tree.add_class(file);
    let declaration = tree.add_initializer(class);
    let first_write = tree.add_constant(declaration, ConstValue::Int(1));
    let block = tree.add_initializer(class);
    let second_write = tree.add_constant(block, ConstValue::Int(2));

    let plain = tree.add_constructor(class, ConstructorCall::None, false);
    let plain_read = tree.add_expr(plain);
    let chaining = tree.add_constructor(class, ConstructorCall::This, false);
    let chaining_read = tree.add_expr(chaining);

    let class_script = TraceScript::new()
        .push(first_write, int(1), MapState::new())
        .push(
            second_write,
            int(2),
            MapState::new().with_var("f", SimpleType::int(1)),
        )
        .initializer_end(false, MapState::new().with_var("f", SimpleType::int(2)));

    let interpreter = TraceInterpreter::new(MapState::new())
        .with_script(class, class_script)
        .with_script(plain, TraceScript::new().push_from_seeds(plain_read, var("f")))
        .with_script(chaining, TraceScript::new().push_from_seeds(chaining_read, var("f")));

    ReassignedFieldFixture {
        tree,
        interpreter,
        first_write,
        second_write,
        plain_read,
        chaining_read,
    }
}

// ============================================================================
// Plain method
// ============================================================================

pub struct MethodFixture {
    pub tree: ProgramTree,
    pub interpreter: TraceInterpreter<MapState>,
    pub file: ContainerId,
    pub method: UnitId,
    pub expr: ExprId,
}

/// One method, one expression pushed with the given integers
pub fn fixture_method(values: &[i64]) -> MethodFixture {
    let mut tree = ProgramTree::new();
    let file = tree.add_container();
    let method = tree.add_unit(file, UnitKind::Method);
    let expr = tree.add_expr(method);
    let script = values
        .iter()
        .fold(TraceScript::new(), |script, value| {
            script.push(expr, int(*value), MapState::new())
        });
    let interpreter = TraceInterpreter::new(MapState::new()).with_script(method, script);

    MethodFixture {
        tree,
        interpreter,
        file,
        method,
        expr,
    }
}
