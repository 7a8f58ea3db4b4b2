//! Type checking and semantic analysis module.
//!
//! This module checks a parsed program and produces the bound tree, in
//! which every expression and statement carries its type. It:
//!
//! - Resolves names through a tree of scopes kept in [`environment::TypeEnv`]
//! - Synthesizes types bottom-up and checks them top-down against annotations
//! - Lets declarations refer to names defined later in the same module
//! - Reports every failing top-level statement, not just the first
//!
//! Checking runs in two passes over the same tree. The first builds the
//! scopes and records placeholders for forward references; the second
//! re-enters those scopes, replaces the placeholders and reports errors.

pub mod annotation;
pub mod bind;
pub mod bound_ast;
pub mod check;
pub mod environment;
pub mod synth;
pub mod type_checker;
pub mod types;

#[cfg(test)]
mod tests;
