//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs including:
//! - Variable declarations and tuple patterns
//! - Function declarations and lambdas
//! - Expressions and operator precedence
//! - Loops and type aliases
//! - Type annotations

use std::rc::Rc;

use crate::{
    ast::{
        ast::SyntaxTree,
        expressions::{ExprKind, LambdaBody, LiteralValue, MemberProperty},
        statements::StmtKind,
        types::{KeywordType, TypeAnnotationKind},
    },
    errors::errors::Error,
    lexer::{lexer::tokenize, tokens::TokenKind},
};

use super::parser::parse;

fn parse_source(source: &str) -> Result<SyntaxTree, Error> {
    let tokens = tokenize(source.to_string(), Some("test.liszt".to_string())).unwrap();
    parse(
        tokens,
        Rc::new(source.to_string()),
        Rc::new("test.liszt".to_string()),
    )
}

fn single_expression(source: &str) -> ExprKind {
    let tree = parse_source(source).unwrap();
    assert_eq!(tree.root.children.len(), 1);

    match &tree.root.children[0].kind {
        StmtKind::Expression(stmt) => stmt.expression.kind.clone(),
        other => panic!("expected expression statement, got {}", other.name()),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let tree = parse_source("let x = 42;").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::VarDecl(decl) => {
            assert!(!decl.constant);
            assert_eq!(decl.assignment.target.kind, ExprKind::Identifier("x".to_string()));
            assert_eq!(
                decl.assignment.value.kind,
                ExprKind::Literal(LiteralValue::Integer(42))
            );
            assert!(decl.assignment.annotation.is_none());
        }
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_const_declaration_with_annotation() {
    let tree = parse_source("const PI: Float = 3.14;").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::VarDecl(decl) => {
            assert!(decl.constant);
            let annotation = decl.assignment.annotation.as_ref().unwrap();
            assert_eq!(annotation.kind, TypeAnnotationKind::Keyword(KeywordType::Float));
        }
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_declaration_requires_value() {
    let error = parse_source("let x: Integer;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedTokenDetailed");
}

#[test]
fn test_parse_tuple_pattern_declaration() {
    let tree = parse_source("let (a, b) = (1, \"two\");").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::VarDecl(decl) => {
            match &decl.assignment.target.kind {
                ExprKind::TuplePattern(names) => {
                    let names: Vec<&str> = names.iter().map(|name| name.name.as_str()).collect();
                    assert_eq!(names, vec!["a", "b"]);
                }
                other => panic!("unexpected target {}", other.name()),
            }
            assert!(matches!(&decl.assignment.value.kind, ExprKind::Tuple(elements) if elements.len() == 2));
        }
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_function_declaration() {
    let tree = parse_source("fn add(a: Integer, b) -> Integer { return a + b; }").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::FnDecl(decl) => {
            assert_eq!(decl.name, "add");
            assert_eq!(decl.parameters.len(), 2);
            assert!(decl.parameters[0].annotation.is_some());
            assert!(decl.parameters[1].annotation.is_none());
            assert!(decl.return_annotation.is_some());
            assert_eq!(decl.body.body.len(), 1);
            assert!(matches!(decl.body.body[0].kind, StmtKind::Return(Some(_))));
        }
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_generic_function_declaration() {
    let tree = parse_source("fn id<T>(x: T) -> T { x }").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::FnDecl(decl) => {
            assert_eq!(decl.type_parameters, vec!["T".to_string()]);
            match &decl.body.body[0].kind {
                StmtKind::Expression(stmt) => assert!(!stmt.terminated),
                other => panic!("unexpected statement {}", other.name()),
            }
        }
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_lambda_statement() {
    match single_expression("fn (x: Integer) -> Integer => x * 2;") {
        ExprKind::Lambda(lambda) => {
            assert_eq!(lambda.parameters.len(), 1);
            assert!(lambda.return_annotation.is_some());
            assert!(matches!(lambda.body, LambdaBody::Expression(_)));
        }
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_lambda_with_block_body() {
    let tree = parse_source("let f = fn (x) { return x; };").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::VarDecl(decl) => match &decl.assignment.value.kind {
            ExprKind::Lambda(lambda) => {
                assert!(matches!(&lambda.body, LambdaBody::Block(block) if block.body.len() == 1))
            }
            other => panic!("unexpected expression {}", other.name()),
        },
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_binary_precedence() {
    match single_expression("1 + 2 * 3;") {
        ExprKind::Binary(binary) => {
            assert_eq!(binary.operator.kind, TokenKind::Plus);
            assert!(matches!(binary.right.kind, ExprKind::Binary(ref inner) if inner.operator.kind == TokenKind::Star));
        }
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_subtraction_is_left_associative() {
    match single_expression("a - b - c;") {
        ExprKind::Binary(binary) => {
            assert_eq!(binary.operator.kind, TokenKind::Dash);
            assert!(matches!(binary.left.kind, ExprKind::Binary(_)));
            assert_eq!(binary.right.kind, ExprKind::Identifier("c".to_string()));
        }
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_prefix_operators() {
    match single_expression("-x + 1;") {
        ExprKind::Binary(binary) => {
            assert!(matches!(binary.left.kind, ExprKind::Unary(ref unary) if unary.operator.kind == TokenKind::Dash));
        }
        other => panic!("unexpected expression {}", other.name()),
    }

    assert!(matches!(single_expression("!done;"), ExprKind::Unary(_)));
}

#[test]
fn test_parse_logical_expression() {
    match single_expression("a < b && c;") {
        ExprKind::Logical(logical) => {
            assert_eq!(logical.operator.kind, TokenKind::And);
            assert!(matches!(logical.left.kind, ExprKind::Binary(_)));
        }
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_assignment_is_right_associative() {
    match single_expression("a = b = 1;") {
        ExprKind::Assignment(assignment) => {
            assert_eq!(assignment.target.kind, ExprKind::Identifier("a".to_string()));
            assert!(matches!(assignment.value.kind, ExprKind::Assignment(_)));
        }
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_call_and_member() {
    match single_expression("point.move(1, 2);") {
        ExprKind::Call(call) => {
            assert_eq!(call.arguments.len(), 2);
            assert!(matches!(
                &call.callee.kind,
                ExprKind::Member(member) if member.property == MemberProperty::Named("move".to_string())
            ));
        }
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_tuple_index_member() {
    match single_expression("pair.0;") {
        ExprKind::Member(member) => match member.property {
            MemberProperty::Computed(index) => {
                assert_eq!(index.kind, ExprKind::Literal(LiteralValue::Integer(0)))
            }
            other => panic!("unexpected property {:?}", other),
        },
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_index_and_slice() {
    assert!(matches!(
        single_expression("items[1];"),
        ExprKind::Member(ref member) if matches!(member.property, MemberProperty::Computed(_))
    ));

    match single_expression("items[1:];") {
        ExprKind::Slice(slice) => {
            assert!(slice.start.is_some());
            assert!(slice.end.is_none());
        }
        other => panic!("unexpected expression {}", other.name()),
    }

    match single_expression("items[:2];") {
        ExprKind::Slice(slice) => {
            assert!(slice.start.is_none());
            assert!(slice.end.is_some());
        }
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_object_vector_and_tuple_literals() {
    match single_expression("{ a: 1, b: \"s\" };") {
        ExprKind::Object(properties) => {
            let names: Vec<&str> = properties.iter().map(|p| p.name.as_str()).collect();
            assert_eq!(names, vec!["a", "b"]);
        }
        other => panic!("unexpected expression {}", other.name()),
    }

    assert!(matches!(single_expression("[1, 2, 3];"), ExprKind::Vector(ref v) if v.len() == 3));
    assert!(matches!(single_expression("[];"), ExprKind::Vector(ref v) if v.is_empty()));
    assert!(matches!(single_expression("(1, 'a);"), ExprKind::Tuple(ref t) if t.len() == 2));
    assert!(matches!(single_expression("();"), ExprKind::Tuple(ref t) if t.is_empty()));
    assert!(matches!(single_expression("(1);"), ExprKind::Parenthesized(_)));
}

#[test]
fn test_parse_as_expression() {
    match single_expression("x as Number;") {
        ExprKind::As(as_expr) => {
            assert_eq!(
                as_expr.annotation.kind,
                TypeAnnotationKind::Keyword(KeywordType::Number)
            );
        }
        other => panic!("unexpected expression {}", other.name()),
    }
}

#[test]
fn test_parse_for_statement() {
    let tree = parse_source("for (k, v) in pairs { print(k); }").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::For(stmt) => {
            assert!(matches!(stmt.binding.kind, ExprKind::TuplePattern(ref names) if names.len() == 2));
            assert_eq!(stmt.iterable.kind, ExprKind::Identifier("pairs".to_string()));
            assert_eq!(stmt.body.body.len(), 1);
        }
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_type_alias_union_and_intersection() {
    let tree = parse_source("type Shape = { kind: 'circle } & { r: Float } | Nil;").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::TypeAlias(alias) => {
            assert_eq!(alias.name, "Shape");
            match &alias.annotation.kind {
                TypeAnnotationKind::Union(members) => {
                    assert_eq!(members.len(), 2);
                    assert!(matches!(members[0].kind, TypeAnnotationKind::Intersection(ref parts) if parts.len() == 2));
                    assert_eq!(members[1].kind, TypeAnnotationKind::Keyword(KeywordType::Nil));
                }
                other => panic!("unexpected annotation {:?}", other),
            }
        }
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_function_and_vector_types() {
    let tree = parse_source("let f: (Integer, String) -> Boolean[] = g;").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::VarDecl(decl) => match &decl.assignment.annotation.as_ref().unwrap().kind {
            TypeAnnotationKind::Function {
                parameters,
                return_type,
            } => {
                assert_eq!(parameters.len(), 2);
                assert!(matches!(return_type.kind, TypeAnnotationKind::Vector(_)));
            }
            other => panic!("unexpected annotation {:?}", other),
        },
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_singleton_and_tuple_types() {
    let tree = parse_source("type T = (1, \"a\", 'ok, true);").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::TypeAlias(alias) => match &alias.annotation.kind {
            TypeAnnotationKind::Tuple(elements) => {
                assert_eq!(elements.len(), 4);
                assert_eq!(
                    elements[2].kind,
                    TypeAnnotationKind::Singleton(LiteralValue::Symbol("ok".to_string()))
                );
            }
            other => panic!("unexpected annotation {:?}", other),
        },
        other => panic!("unexpected statement {}", other.name()),
    }
}

#[test]
fn test_parse_optional_semicolon_before_block_end() {
    let tree = parse_source("fn f() { 1; 2 }\n3").unwrap();

    match &tree.root.children[0].kind {
        StmtKind::FnDecl(decl) => {
            let terminated: Vec<bool> = decl
                .body
                .iter()
                .map(|stmt| match &stmt.kind {
                    StmtKind::Expression(expr) => expr.terminated,
                    _ => true,
                })
                .collect();
            assert_eq!(terminated, vec![true, false]);
        }
        other => panic!("unexpected statement {}", other.name()),
    }

    assert_eq!(tree.root.children.len(), 2);
}

#[test]
fn test_parse_missing_semicolon() {
    let error = parse_source("let x = 1 let y = 2;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_unclosed_block() {
    assert!(parse_source("fn f() { 1;").is_err());
}

#[test]
fn test_parse_spans_cover_statement() {
    let tree = parse_source("let x = 42;").unwrap();
    let span = &tree.root.children[0].span;

    assert_eq!(span.start.0, 0);
    assert_eq!(span.end.0, 11);
}
