use std::fmt::Display;

use crate::{lexer::tokens::Token, Span};

use super::{statements::Block, types::TypeAnnotation};

/// A literal value as written in source. Shared by literal expressions
/// and singleton types.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    Integer(i64),
    Float(f64),
    String(String),
    Boolean(bool),
    Symbol(String),
    Nil,
}

impl Display for LiteralValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LiteralValue::Integer(value) => write!(f, "{}", value),
            LiteralValue::Float(value) => write!(f, "{:?}", value),
            LiteralValue::String(value) => write!(f, "{:?}", value),
            LiteralValue::Boolean(value) => write!(f, "{}", value),
            LiteralValue::Symbol(name) => write!(f, "'{}", name),
            LiteralValue::Nil => write!(f, "nil"),
        }
    }
}

/// Expression node.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(LiteralValue),
    Identifier(String),
    Parenthesized(Box<Expr>),
    Object(Vec<ObjectProperty>),
    Vector(Vec<Expr>),
    Tuple(Vec<Expr>),
    /// Only valid as the target of a declaration or a `for` binding
    TuplePattern(Vec<PatternName>),
    Member(MemberExpr),
    Slice(SliceExpr),
    As(AsExpr),
    Lambda(LambdaExpr),
    Call(CallExpr),
    Binary(BinaryExpr),
    Logical(BinaryExpr),
    Unary(UnaryExpr),
    Assignment(AssignmentExpr),
}

impl ExprKind {
    /// Node kind name, used in diagnostics and logs.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Literal(LiteralValue::Integer(_)) => "IntegerLiteral",
            ExprKind::Literal(LiteralValue::Float(_)) => "FloatLiteral",
            ExprKind::Literal(LiteralValue::String(_)) => "StringLiteral",
            ExprKind::Literal(LiteralValue::Boolean(_)) => "BooleanLiteral",
            ExprKind::Literal(LiteralValue::Symbol(_)) => "SymbolLiteral",
            ExprKind::Literal(LiteralValue::Nil) => "NilLiteral",
            ExprKind::Identifier(_) => "Identifier",
            ExprKind::Parenthesized(_) => "ParenthesizedExpression",
            ExprKind::Object(_) => "ObjectLiteral",
            ExprKind::Vector(_) => "VectorLiteral",
            ExprKind::Tuple(_) => "Tuple",
            ExprKind::TuplePattern(_) => "TuplePattern",
            ExprKind::Member(_) => "MemberExpression",
            ExprKind::Slice(_) => "SliceExpression",
            ExprKind::As(_) => "AsExpression",
            ExprKind::Lambda(_) => "LambdaExpression",
            ExprKind::Call(_) => "CallExpression",
            ExprKind::Binary(_) => "BinaryOperation",
            ExprKind::Logical(_) => "LogicalOperation",
            ExprKind::Unary(_) => "UnaryOperation",
            ExprKind::Assignment(_) => "AssignmentExpression",
        }
    }
}

/// A name bound by a pattern, with its own span.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternName {
    pub name: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObjectProperty {
    pub name: String,
    pub value: Expr,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MemberProperty {
    /// `object.name`
    Named(String),
    /// `object[expr]` and `tuple.0`
    Computed(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: MemberProperty,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SliceExpr {
    pub object: Box<Expr>,
    pub start: Option<Box<Expr>>,
    pub end: Option<Box<Expr>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AsExpr {
    pub expression: Box<Expr>,
    pub annotation: TypeAnnotation,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub annotation: Option<TypeAnnotation>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub enum LambdaBody {
    Expression(Box<Expr>),
    Block(Block),
}

#[derive(Debug, Clone, PartialEq)]
pub struct LambdaExpr {
    pub parameters: Vec<Parameter>,
    pub return_annotation: Option<TypeAnnotation>,
    pub body: LambdaBody,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryExpr {
    pub left: Box<Expr>,
    pub operator: Token,
    pub right: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UnaryExpr {
    pub operator: Token,
    pub operand: Box<Expr>,
}

/// Assignment Expression
///
/// Also the payload of a variable declaration, in which case `target` may
/// be a tuple pattern and `annotation` may be present.
#[derive(Debug, Clone, PartialEq)]
pub struct AssignmentExpr {
    pub target: Box<Expr>,
    pub value: Box<Expr>,
    pub annotation: Option<TypeAnnotation>,
    pub span: Span,
}
