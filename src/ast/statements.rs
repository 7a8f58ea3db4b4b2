use std::slice::Iter;

use crate::Span;

use super::{
    expressions::{AssignmentExpr, Expr, Parameter},
    types::TypeAnnotation,
};

/// Statement node.
#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expression(ExpressionStmt),
    VarDecl(VariableDeclaration),
    FnDecl(FunctionDeclaration),
    Return(Option<Expr>),
    For(ForStmt),
    TypeAlias(TypeAlias),
}

impl StmtKind {
    pub fn name(&self) -> &'static str {
        match self {
            StmtKind::Expression(_) => "ExpressionStatement",
            StmtKind::VarDecl(_) => "VariableDeclaration",
            StmtKind::FnDecl(_) => "FunctionDeclaration",
            StmtKind::Return(_) => "ReturnStatement",
            StmtKind::For(_) => "ForStatement",
            StmtKind::TypeAlias(_) => "TypeAlias",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ExpressionStmt {
    pub expression: Expr,
    /// An expression without a trailing `;` at the end of a block is the
    /// block's result.
    pub terminated: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableDeclaration {
    pub constant: bool,
    pub assignment: AssignmentExpr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDeclaration {
    pub name: String,
    pub type_parameters: Vec<String>,
    pub parameters: Vec<Parameter>,
    pub return_annotation: Option<TypeAnnotation>,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForStmt {
    /// Identifier or tuple pattern
    pub binding: Expr,
    pub iterable: Expr,
    pub body: Block,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeAlias {
    pub name: String,
    pub annotation: TypeAnnotation,
}

/// Braced statement list used for function, lambda and loop bodies.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub body: Vec<Stmt>,
    pub span: Span,
}

impl Block {
    pub fn iter(&self) -> Iter<'_, Stmt> {
        self.body.iter()
    }
}
