//! Bound (typed) tree definitions.
//!
//! This module contains the bound counterparts of the syntax nodes
//! produced by the type checker. Each bound node carries the resolved
//! type of the node it was built from.
//!
//! The bound tree mirrors the structure of the untyped tree but includes:
//! - Resolved types for all expressions and statements
//! - Parameter and pattern bindings with their types
//! - Function signatures after inference
//!
//! The bound tree is the artifact handed to the evaluator.

use std::rc::Rc;

use crate::{
    ast::expressions::LiteralValue,
    errors::errors::Diagnostics,
    lexer::tokens::Token,
    Span,
};

use super::types::Type;

#[derive(Debug, Clone, PartialEq)]
pub struct BoundExpr {
    pub kind: BoundExprKind,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundExprKind {
    Literal(LiteralValue),
    Identifier(String),
    Parenthesized(Box<BoundExpr>),
    Object(Vec<BoundProperty>),
    Vector(Vec<BoundExpr>),
    Tuple(Vec<BoundExpr>),
    Member {
        object: Box<BoundExpr>,
        property: BoundMember,
    },
    Slice {
        object: Box<BoundExpr>,
        start: Option<Box<BoundExpr>>,
        end: Option<Box<BoundExpr>>,
    },
    /// The asserted type is the node's type
    As(Box<BoundExpr>),
    Lambda {
        parameters: Vec<BoundBinding>,
        body: BoundLambdaBody,
    },
    Call {
        callee: Box<BoundExpr>,
        arguments: Vec<BoundExpr>,
    },
    Binary {
        left: Box<BoundExpr>,
        operator: Token,
        right: Box<BoundExpr>,
    },
    Logical {
        left: Box<BoundExpr>,
        operator: Token,
        right: Box<BoundExpr>,
    },
    Unary {
        operator: Token,
        operand: Box<BoundExpr>,
    },
    Assignment {
        target: Box<BoundExpr>,
        value: Box<BoundExpr>,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundProperty {
    pub name: String,
    pub value: BoundExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundMember {
    Named(String),
    Computed(Box<BoundExpr>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundLambdaBody {
    Expression(Box<BoundExpr>),
    Block(BoundBlock),
}

/// A name introduced by a declaration, parameter or loop, with its type.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundBinding {
    pub name: String,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundPattern {
    Name(BoundBinding),
    Tuple(Vec<BoundBinding>),
}

impl BoundPattern {
    pub fn bindings(&self) -> Vec<&BoundBinding> {
        match self {
            BoundPattern::Name(binding) => vec![binding],
            BoundPattern::Tuple(bindings) => bindings.iter().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundStmt {
    pub kind: BoundStmtKind,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BoundStmtKind {
    Expression {
        expression: BoundExpr,
        terminated: bool,
    },
    VarDecl {
        constant: bool,
        pattern: BoundPattern,
        value: BoundExpr,
    },
    FnDecl {
        name: String,
        type_parameters: Vec<String>,
        parameters: Vec<BoundBinding>,
        body: BoundBlock,
    },
    Return(Option<BoundExpr>),
    For {
        pattern: BoundPattern,
        iterable: BoundExpr,
        body: BoundBlock,
    },
    TypeAlias {
        name: String,
    },
}

/// Statement list of a function, lambda or loop body. Its type is the
/// type of the trailing unterminated expression, or `Nil`.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundBlock {
    pub body: Vec<BoundStmt>,
    pub ty: Type,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundProgram {
    pub children: Vec<BoundStmt>,
    pub span: Span,
}

impl BoundProgram {
    pub fn new(span: Span) -> Self {
        BoundProgram {
            children: vec![],
            span,
        }
    }

    pub fn append(&mut self, stmt: BoundStmt) {
        self.children.push(stmt);
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoundTree {
    pub root: BoundProgram,
    pub tokens: Vec<Token>,
    pub diagnostics: Diagnostics,
    pub source: Rc<String>,
    pub file: Rc<String>,
}

// Unresolved detection. Returns the span of the first node whose type
// still holds a forward-reference placeholder.

impl BoundExpr {
    pub fn find_unresolved(&self) -> Option<&Span> {
        if self.ty.contains_unresolved() {
            return Some(&self.span);
        }

        match &self.kind {
            BoundExprKind::Literal(_) | BoundExprKind::Identifier(_) => None,
            BoundExprKind::Parenthesized(inner) | BoundExprKind::As(inner) => inner.find_unresolved(),
            BoundExprKind::Object(properties) => properties
                .iter()
                .find_map(|property| property.value.find_unresolved()),
            BoundExprKind::Vector(elements) | BoundExprKind::Tuple(elements) => {
                elements.iter().find_map(BoundExpr::find_unresolved)
            }
            BoundExprKind::Member { object, property } => {
                object.find_unresolved().or(match property {
                    BoundMember::Named(_) => None,
                    BoundMember::Computed(index) => index.find_unresolved(),
                })
            }
            BoundExprKind::Slice { object, start, end } => object
                .find_unresolved()
                .or_else(|| start.as_ref().and_then(|start| start.find_unresolved()))
                .or_else(|| end.as_ref().and_then(|end| end.find_unresolved())),
            BoundExprKind::Lambda { parameters, body } => parameters
                .iter()
                .find(|parameter| parameter.ty.contains_unresolved())
                .map(|parameter| &parameter.span)
                .or_else(|| match body {
                    BoundLambdaBody::Expression(expression) => expression.find_unresolved(),
                    BoundLambdaBody::Block(block) => block.find_unresolved(),
                }),
            BoundExprKind::Call { callee, arguments } => callee
                .find_unresolved()
                .or_else(|| arguments.iter().find_map(BoundExpr::find_unresolved)),
            BoundExprKind::Binary { left, right, .. } | BoundExprKind::Logical { left, right, .. } => {
                left.find_unresolved().or_else(|| right.find_unresolved())
            }
            BoundExprKind::Unary { operand, .. } => operand.find_unresolved(),
            BoundExprKind::Assignment { target, value } => {
                target.find_unresolved().or_else(|| value.find_unresolved())
            }
        }
    }
}

impl BoundBlock {
    /// The trailing expression written without `;`, if any.
    pub fn terminal(&self) -> Option<&BoundExpr> {
        match self.body.last() {
            Some(BoundStmt {
                kind:
                    BoundStmtKind::Expression {
                        expression,
                        terminated: false,
                    },
                ..
            }) => Some(expression),
            _ => None,
        }
    }

    pub fn find_unresolved(&self) -> Option<&Span> {
        self.body.iter().find_map(BoundStmt::find_unresolved)
    }
}

impl BoundStmt {
    pub fn find_unresolved(&self) -> Option<&Span> {
        if self.ty.contains_unresolved() {
            return Some(&self.span);
        }

        match &self.kind {
            BoundStmtKind::Expression { expression, .. } => expression.find_unresolved(),
            BoundStmtKind::VarDecl { pattern, value, .. } => pattern
                .bindings()
                .into_iter()
                .find(|binding| binding.ty.contains_unresolved())
                .map(|binding| &binding.span)
                .or_else(|| value.find_unresolved()),
            BoundStmtKind::FnDecl {
                parameters, body, ..
            } => parameters
                .iter()
                .find(|parameter| parameter.ty.contains_unresolved())
                .map(|parameter| &parameter.span)
                .or_else(|| body.find_unresolved()),
            BoundStmtKind::Return(value) => value.as_ref().and_then(BoundExpr::find_unresolved),
            BoundStmtKind::For {
                pattern,
                iterable,
                body,
            } => pattern
                .bindings()
                .into_iter()
                .find(|binding| binding.ty.contains_unresolved())
                .map(|binding| &binding.span)
                .or_else(|| iterable.find_unresolved())
                .or_else(|| body.find_unresolved()),
            BoundStmtKind::TypeAlias { .. } => None,
        }
    }
}
