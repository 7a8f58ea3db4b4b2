use std::rc::Rc;

use crate::{errors::errors::Diagnostics, lexer::tokens::Token, Span};

use super::statements::Stmt;

/// Root of a parsed compilation unit.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgramNode {
    pub children: Vec<Stmt>,
    pub span: Span,
}

/// Everything the parser hands to the type checker.
#[derive(Debug, Clone)]
pub struct SyntaxTree {
    pub root: ProgramNode,
    pub tokens: Vec<Token>,
    pub diagnostics: Diagnostics,
    pub source: Rc<String>,
    pub file: Rc<String>,
}
