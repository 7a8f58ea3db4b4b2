//! Attaching resolved types to nodes.
//!
//! Synthesis and checking compute a node's bound children and hand them
//! here together with the type they settled on. Node kinds whose type
//! follows from their children may leave the type out.

use crate::Span;

use super::{
    bound_ast::{BoundExpr, BoundExprKind, BoundLambdaBody, BoundStmt, BoundStmtKind},
    types::Type,
};

pub fn bind(kind: BoundExprKind, span: Span, ty: Option<Type>) -> BoundExpr {
    let ty = ty.unwrap_or_else(|| intrinsic_type(&kind));
    BoundExpr { kind, ty, span }
}

pub fn bind_stmt(kind: BoundStmtKind, span: Span, ty: Option<Type>) -> BoundStmt {
    let ty = ty.unwrap_or_else(|| intrinsic_stmt_type(&kind));
    BoundStmt { kind, ty, span }
}

fn intrinsic_type(kind: &BoundExprKind) -> Type {
    match kind {
        BoundExprKind::Literal(value) => Type::of_literal(value),
        BoundExprKind::Parenthesized(inner) => inner.ty.clone(),
        BoundExprKind::Object(properties) => Type::Record(
            properties
                .iter()
                .map(|property| (property.name.clone(), property.value.ty.clone()))
                .collect(),
        ),
        BoundExprKind::Tuple(elements) => {
            Type::Tuple(elements.iter().map(|element| element.ty.clone()).collect())
        }
        BoundExprKind::Vector(elements) => Type::vector(Type::union(
            elements.iter().map(|element| element.ty.clone()).collect(),
        )),
        BoundExprKind::Assignment { value, .. } => value.ty.clone(),
        BoundExprKind::Lambda { parameters, body } => {
            let return_type = match body {
                BoundLambdaBody::Expression(expression) => expression.ty.clone(),
                BoundLambdaBody::Block(block) => block.ty.clone(),
            };
            Type::function(
                parameters.iter().map(|parameter| parameter.ty.clone()).collect(),
                return_type,
            )
        }
        // Everything else is bound with the type synthesis computed
        _ => Type::Unknown,
    }
}

fn intrinsic_stmt_type(kind: &BoundStmtKind) -> Type {
    match kind {
        BoundStmtKind::Expression { expression, .. } => expression.ty.clone(),
        BoundStmtKind::VarDecl { value, .. } => value.ty.clone(),
        BoundStmtKind::Return(value) => value
            .as_ref()
            .map(|value| value.ty.clone())
            .unwrap_or(Type::Nil),
        BoundStmtKind::For { .. } => Type::Nil,
        BoundStmtKind::FnDecl {
            parameters, body, ..
        } => Type::function(
            parameters.iter().map(|parameter| parameter.ty.clone()).collect(),
            body.ty.clone(),
        ),
        BoundStmtKind::TypeAlias { .. } => Type::Unknown,
    }
}
