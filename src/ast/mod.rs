/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the untyped tree
///
/// Submodules:
/// - ast: Program root and the syntax tree handed to the type checker
/// - expressions: Expression node kinds
/// - statements: Statement node kinds and blocks
/// - types: Type annotation syntax
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;
