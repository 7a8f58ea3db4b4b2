//! Unit tests for the type checker.
//!
//! Covers synthesis and checking of expressions, declarations and their
//! scopes, forward references across the two passes, and error reporting.

use crate::{
    ast::expressions::LiteralValue,
    check_source,
    errors::errors::Diagnostics,
    parse_source,
};

use super::{
    bound_ast::BoundTree,
    environment::TypeEnv,
    type_checker::{Pass, TypeChecker},
    types::Type,
};

fn check(source: &str) -> Result<BoundTree, Diagnostics> {
    let mut env = TypeEnv::new();
    check_source(source, "test.liszt", &mut env)
}

fn types_of(source: &str) -> Vec<Type> {
    let tree = match check(source) {
        Ok(tree) => tree,
        Err(diagnostics) => panic!("unexpected errors: {:?}", diagnostics),
    };

    tree.root.children.iter().map(|stmt| stmt.ty.clone()).collect()
}

fn error_names(source: &str) -> Vec<String> {
    check(source)
        .unwrap_err()
        .iter()
        .map(|error| error.get_error_name().to_string())
        .collect()
}

fn first_error(source: &str) -> String {
    error_names(source)[0].clone()
}

#[test]
fn test_literal_types() {
    assert_eq!(
        types_of("1; 1.5; \"s\"; true; nil; 'ok;"),
        vec![
            Type::Integer,
            Type::Float,
            Type::String,
            Type::Boolean,
            Type::Nil,
            Type::Symbol
        ]
    );
}

#[test]
fn test_constants_keep_literal_values() {
    let one = Type::Singleton(LiteralValue::Integer(1));
    assert_eq!(types_of("const x = 1; x;"), vec![one.clone(), one]);
    assert_eq!(types_of("let y = 1; y;"), vec![Type::Integer, Type::Integer]);
}

#[test]
fn test_arithmetic_and_comparison() {
    assert_eq!(
        types_of("1 + 2; 1 + 2.0; 3 * 1.5; \"a\" + \"b\"; 1 < 2; 1 == \"a\";"),
        vec![
            Type::Integer,
            Type::Float,
            Type::Float,
            Type::String,
            Type::Boolean,
            Type::Boolean
        ]
    );
    assert_eq!(first_error("1 + \"a\";"), "InvalidOperands");
}

#[test]
fn test_unary_and_logical() {
    assert_eq!(
        types_of("-1; !1; true && false; 1 || \"s\";"),
        vec![
            Type::Integer,
            Type::Boolean,
            Type::Boolean,
            Type::union(vec![Type::Integer, Type::String])
        ]
    );
    assert_eq!(first_error("-\"s\";"), "InvalidOperand");
}

#[test]
fn test_builtins_are_callable() {
    assert_eq!(
        types_of("print(\"hi\"); len([1, 2]); str(1);"),
        vec![Type::Nil, Type::Integer, Type::String]
    );
}

#[test]
fn test_annotations_are_authoritative() {
    assert_eq!(types_of("let a: Number = 1; a;"), vec![Type::Number, Type::Number]);
    assert_eq!(first_error("let a: String = 1;"), "TypeMismatch");
}

#[test]
fn test_literal_checks_against_singletons() {
    let types = types_of("let status: 'ok | 'err = 'ok;");
    assert_eq!(
        types[0],
        Type::union(vec![
            Type::Singleton(LiteralValue::Symbol("ok".to_string())),
            Type::Singleton(LiteralValue::Symbol("err".to_string())),
        ])
    );
    assert_eq!(first_error("let status: 'ok | 'err = 'maybe;"), "TypeMismatch");
}

#[test]
fn test_record_width_subtyping() {
    assert!(check("let p: { a: Integer } = { a: 1, b: \"x\" };").is_ok());
    assert_eq!(
        first_error("let p: { a: Integer, b: String } = { a: 1 };"),
        "TypeMismatch"
    );
}

#[test]
fn test_property_access() {
    assert_eq!(
        types_of("let p = { a: 1, b: \"s\" }; p.b; p[\"a\"];")[1..],
        [Type::String, Type::Integer]
    );
    assert_eq!(first_error("let p = { a: 1 }; p.b;"), "PropertyNotFound");
    assert_eq!(first_error("{ a: 1, a: 2 };"), "DuplicateProperty");
}

#[test]
fn test_tuple_indexing() {
    assert_eq!(
        types_of("let t = (1, \"a\"); t.0; t.1;")[1..],
        [Type::Integer, Type::String]
    );
    assert_eq!(first_error("let t = (1, \"a\"); t.2;"), "IndexOutOfBounds");
}

#[test]
fn test_vector_indexing_and_slicing() {
    assert_eq!(
        types_of("let v = [1, 2]; v[0]; v[0:1]; v[:];")[1..],
        [
            Type::Integer,
            Type::vector(Type::Integer),
            Type::vector(Type::Integer)
        ]
    );
    assert_eq!(
        types_of("let t = (1, \"a\", true); t[1:];")[1],
        Type::Tuple(vec![Type::String, Type::Boolean])
    );
    assert_eq!(first_error("let v = [1]; v[\"a\"];"), "TypeMismatch");
    assert_eq!(first_error("let n = 1; n[0];"), "NotIndexable");
}

#[test]
fn test_tuple_destructuring() {
    assert_eq!(
        types_of("let (a, b) = (1, \"s\"); a; b;")[1..],
        [Type::Integer, Type::String]
    );
    assert_eq!(first_error("let (a, b) = (1, 2, 3);"), "PatternArityMismatch");
    assert_eq!(first_error("let (a, b) = 1;"), "TypeMismatch");
}

#[test]
fn test_for_loops() {
    assert_eq!(types_of("for x in [1, 2] { x + 1; }"), vec![Type::Nil]);
    assert!(check("for (k, v) in [(1, \"a\")] { k + 1; v + \"b\"; }").is_ok());
    assert_eq!(first_error("for x in 1 { x; }"), "NotIterable");
}

#[test]
fn test_reference_before_initialization() {
    assert_eq!(first_error("y;"), "ReferenceBeforeInitialization");
}

#[test]
fn test_duplicate_declarations() {
    assert_eq!(first_error("let a = 1; let a = 2;"), "AlreadyDeclared");
    assert_eq!(first_error("fn f(a, a) { a }"), "AlreadyDeclared");
    assert_eq!(first_error("type T = Integer; type T = String;"), "AlreadyDeclared");
}

#[test]
fn test_duplicates_only_fail_in_final_pass() {
    let tree = parse_source("let a = 1; let a = 2;", "test.liszt").unwrap();
    let mut env = TypeEnv::new();
    let mut checker = TypeChecker::new(&tree, &mut env);

    assert!(checker.run_pass(Pass::Preliminary).is_ok());

    let errors = checker.run_pass(Pass::Final).unwrap_err();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors.first().unwrap().get_error_name(), "AlreadyDeclared");
}

#[test]
fn test_constant_assignment() {
    assert_eq!(first_error("const a = 1; a = 2;"), "IllegalConstantAssignment");
    assert_eq!(first_error("print = 1;"), "IllegalConstantAssignment");
    assert_eq!(types_of("let a = 1; a = 2;")[1], Type::Integer);
    assert_eq!(first_error("let a = 1; a = \"s\";"), "TypeMismatch");
    assert_eq!(first_error("1 = 2;"), "InvalidAssignmentTarget");
}

#[test]
fn test_function_return_types() {
    assert_eq!(
        types_of("fn f() { 1 }")[0],
        Type::function(vec![], Type::Integer)
    );
    assert_eq!(
        types_of("fn f(flag: Boolean) { return 1; \"s\" }")[0],
        Type::function(
            vec![Type::Boolean],
            Type::union(vec![Type::Integer, Type::String])
        )
    );
    assert_eq!(
        types_of("fn f() { 1; }")[0],
        Type::function(vec![], Type::Nil)
    );
    assert_eq!(first_error("fn f() -> Integer { \"s\" }"), "TypeMismatch");
    assert_eq!(first_error("fn f() -> Integer { }"), "TypeMismatch");
    assert_eq!(first_error("return 1;"), "ReturnOutsideFunction");
}

#[test]
fn test_call_checks() {
    assert_eq!(
        types_of("fn f(a: Integer) { a } f(1);")[1],
        Type::Integer
    );
    assert_eq!(first_error("fn f(a: Integer) { a } f();"), "MissingArguments");
    assert_eq!(first_error("fn f(a: Integer) { a } f(1, 2);"), "UnexpectedArguments");
    assert_eq!(first_error("fn f(a: Integer) { a } f(\"s\");"), "TypeMismatch");
    assert_eq!(first_error("let a = 1; a();"), "NotCallable");
}

#[test]
fn test_generic_functions() {
    assert_eq!(
        types_of("fn id<T>(x: T) -> T { x } id(1); id(\"s\");")[1..],
        [Type::Integer, Type::String]
    );
    assert_eq!(
        types_of("fn first<T>(items: T[]) -> T { items[0] } first([1.5]);")[1],
        Type::Float
    );
}

#[test]
fn test_lambdas() {
    assert_eq!(
        types_of("let f: (Integer) -> Integer = fn (x) => x + 1;")[0],
        Type::function(vec![Type::Integer], Type::Integer)
    );
    assert_eq!(
        types_of("let f = fn (x: Integer) { return x; };")[0],
        Type::function(vec![Type::Integer], Type::Integer)
    );
    assert_eq!(
        types_of("let f = fn (x) => x;")[0],
        Type::function(vec![Type::Any], Type::Any)
    );
}

#[test]
fn test_type_aliases() {
    assert!(check("type Id = Integer; let a: Id = 1;").is_ok());
    assert!(check("let a: Later = 1; type Later = Integer;").is_ok());
    assert_eq!(first_error("let a: Missing = 1;"), "UnknownType");
    assert_eq!(types_of("let a = 1 as Any; a;")[1], Type::Any);
}

#[test]
fn test_forward_reference_inside_function() {
    assert_eq!(
        types_of("fn f() { g() } fn g() { 1 }"),
        vec![
            Type::function(vec![], Type::Integer),
            Type::function(vec![], Type::Integer)
        ]
    );
    assert_eq!(types_of("let x = g(); fn g() -> Integer { 1 }")[0], Type::Integer);
}

#[test]
fn test_placeholders_are_discarded() {
    let mut env = TypeEnv::new();
    check_source("fn f() { g() } fn g() { 1 }", "test.liszt", &mut env).unwrap();

    let module = env.latest_module().unwrap();
    let f = env.get_child_env(module, "f1").unwrap();

    assert!(!env.has(f, "g"));
    assert_eq!(env.get(f, "g"), Some(&Type::function(vec![], Type::Integer)));
}

#[test]
fn test_scope_names_follow_creation_order() {
    let mut env = TypeEnv::new();
    check_source(
        "fn f() { let g = fn (x) => x; g } for i in [1] { i; }",
        "test.liszt",
        &mut env,
    )
    .unwrap();

    let module = env.latest_module().unwrap();
    assert_eq!(env.scope(module).name, "module0");

    let f = env.get_child_env(module, "f1").unwrap();
    assert!(env.get_child_env(f, "lambda2").is_some());
    assert!(env.get_child_env(module, "for3").is_some());
}

#[test]
fn test_final_pass_requires_preliminary() {
    let tree = parse_source("1;", "test.liszt").unwrap();
    let mut env = TypeEnv::new();
    let errors = TypeChecker::new(&tree, &mut env)
        .run_pass(Pass::Final)
        .unwrap_err();

    assert_eq!(errors.first().unwrap().get_error_name(), "ScopeTopologyMismatch");
}

#[test]
fn test_final_pass_is_repeatable() {
    let tree = parse_source(
        "fn f(n: Integer) { g(n) } fn g(n: Integer) { n * 2 } let x = f(1);",
        "test.liszt",
    )
    .unwrap();
    let mut env = TypeEnv::new();
    let mut checker = TypeChecker::new(&tree, &mut env);

    checker.run_pass(Pass::Preliminary).unwrap();
    let first = checker.run_pass(Pass::Final).unwrap();
    let second = checker.run_pass(Pass::Final).unwrap();

    assert_eq!(first, second);
}

#[test]
fn test_errors_are_collected_per_statement() {
    assert_eq!(
        error_names("x; let a: String = 1; let ok = 1; y;"),
        vec![
            "ReferenceBeforeInitialization",
            "TypeMismatch",
            "ReferenceBeforeInitialization"
        ]
    );
}

#[test]
fn test_environment_is_shared_between_checks() {
    let mut env = TypeEnv::new();
    check_source("let a = 1;", "shell", &mut env).unwrap();

    let tree = check_source("a + 1;", "shell", &mut env).unwrap();
    assert_eq!(tree.root.children[0].ty, Type::Integer);
    assert_eq!(env.module_count(), 2);
}

#[test]
fn test_forward_reference_chains() {
    let function = Type::function(vec![], Type::Integer);
    assert_eq!(
        types_of("fn f() { g() } fn g() { h() } fn h() { 1 }"),
        vec![function.clone(), function.clone(), function]
    );

    assert_eq!(
        types_of("let a = b; let b = c; let c = 1;"),
        vec![Type::Integer, Type::Integer, Type::Integer]
    );

    assert_eq!(
        types_of("type A = B; type B = C; type C = Integer; let x: A = 1;"),
        vec![Type::Integer, Type::Integer, Type::Integer, Type::Integer]
    );
}

#[test]
fn test_preliminary_rounds_settle() {
    let tree = parse_source("let a = b; let b = c; let c = 1;", "test.liszt").unwrap();
    let mut env = TypeEnv::new();
    let mut checker = TypeChecker::new(&tree, &mut env);

    assert!(checker.settle().unwrap() > 1);

    let revision = checker.env().revision();
    checker.run_pass(Pass::Preliminary).unwrap();
    assert_eq!(checker.env().revision(), revision);
    assert_eq!(checker.env().module_count(), 1);
}

#[test]
fn test_circular_initializers_stay_unresolved() {
    assert_eq!(first_error("let a = b; let b = a;"), "UnresolvedType");
}

#[test]
fn test_unannotated_recursion() {
    assert_eq!(
        types_of("fn spin(n: Integer) { spin(n) }")[0],
        Type::function(vec![Type::Integer], Type::Never)
    );
    assert_eq!(
        types_of("fn count(n: Integer) { n + count(n - 1) }")[0],
        Type::function(vec![Type::Integer], Type::Integer)
    );
}

#[test]
fn test_any_is_the_dynamic_type() {
    assert_eq!(
        types_of("let a: Any = 1; let b: Integer = a;"),
        vec![Type::Any, Type::Integer]
    );
    assert!(check("fn f(x) { x } let n: Integer = f(1);").is_ok());
    assert_eq!(first_error("let u: Unknown = 1; let i: Integer = u;"), "TypeMismatch");
}

#[test]
fn test_failed_unit_is_not_a_parent() {
    let mut env = TypeEnv::new();

    assert!(check_source("let a = 1; missing;", "shell", &mut env).is_err());
    assert_eq!(env.latest_module(), None);

    let errors = check_source("a + 1;", "shell", &mut env).unwrap_err();
    assert_eq!(errors.first().unwrap().get_error_name(), "ReferenceBeforeInitialization");

    check_source("let b = 2;", "shell", &mut env).unwrap();
    let tree = check_source("b + 1;", "shell", &mut env).unwrap();
    assert_eq!(tree.root.children[0].ty, Type::Integer);
    assert_eq!(env.module_count(), 4);
}

#[test]
fn test_empty_pattern_is_an_invalid_target() {
    let tree = parse_source("1;", "test.liszt").unwrap();
    let mut env = TypeEnv::new();
    let mut checker = TypeChecker::new(&tree, &mut env);
    checker.settle().unwrap();

    let module = checker.module_scope().unwrap();
    let error = checker
        .bind_pattern(&[], false, &Type::Integer, module, false, &tree.root.span)
        .unwrap_err();

    assert_eq!(error.get_error_name(), "InvalidAssignmentTarget");
}
