//! Two-pass orchestration.
//!
//! The Preliminary pass walks the whole program creating every scope and
//! installing provisional bindings, so names used before their declaration
//! get an `Unresolved` placeholder instead of an error. It is repeated,
//! re-entering the scopes it created, until no binding changes, so chains
//! of forward references settle one hop per round. The Final pass
//! re-enters the same scopes by name, discards placeholders in favour of
//! the bindings that were declared later, and reports every statement that
//! fails to check.

use std::{collections::HashSet, rc::Rc};

use log::{debug, trace};

use crate::{
    ast::{
        ast::SyntaxTree,
        expressions::{ExprKind, LiteralValue, Parameter, PatternName},
        statements::{Block, ForStmt, FunctionDeclaration, Stmt, StmtKind, TypeAlias, VariableDeclaration},
    },
    errors::errors::{Diagnostics, Error, ErrorImpl},
    Position, Span,
};

use super::{
    bind::bind_stmt,
    bound_ast::{BoundBinding, BoundBlock, BoundPattern, BoundProgram, BoundStmt, BoundStmtKind, BoundTree},
    environment::{Binding, ScopeId, ScopeRole, TypeEnv},
    types::Type,
};

/// Upper bound on Preliminary rounds for programs whose bindings keep
/// changing, such as self-referential initializers.
const MAX_PRELIMINARY_ROUNDS: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pass {
    Preliminary,
    Final,
}

/// Per-checker pass state: which pass is running, the scope ordinal
/// counter and the names declared so far in this pass.
#[derive(Debug)]
pub struct PassContext {
    pub pass: Pass,
    next_scope: usize,
    /// Ordinal at the start of every top-level statement, recorded by the
    /// Preliminary pass
    checkpoints: Vec<usize>,
    declared: HashSet<(ScopeId, String)>,
    declared_types: HashSet<(ScopeId, String)>,
}

impl Default for PassContext {
    fn default() -> Self {
        PassContext::new()
    }
}

impl PassContext {
    pub fn new() -> Self {
        PassContext {
            pass: Pass::Preliminary,
            next_scope: 1,
            checkpoints: vec![],
            declared: HashSet::new(),
            declared_types: HashSet::new(),
        }
    }

    pub fn begin(&mut self, pass: Pass) {
        self.pass = pass;
        self.next_scope = 1;
        self.declared.clear();
        self.declared_types.clear();

        if pass == Pass::Preliminary {
            self.checkpoints.clear();
        }
    }

    pub fn next_ordinal(&mut self) -> usize {
        let ordinal = self.next_scope;
        self.next_scope += 1;
        ordinal
    }

    /// Records (Preliminary) or restores (Final) the ordinal at the start
    /// of top-level statement `index`.
    pub fn checkpoint(&mut self, index: usize) {
        match self.pass {
            Pass::Preliminary => {
                self.checkpoints.truncate(index);
                self.checkpoints.push(self.next_scope);
            }
            Pass::Final => {
                if let Some(ordinal) = self.checkpoints.get(index) {
                    self.next_scope = *ordinal;
                }
            }
        }
    }

    /// Returns false when `name` was already declared in `scope` during
    /// this pass.
    pub fn declare(&mut self, scope: ScopeId, name: &str) -> bool {
        self.declared.insert((scope, String::from(name)))
    }

    pub fn declare_type(&mut self, scope: ScopeId, name: &str) -> bool {
        self.declared_types.insert((scope, String::from(name)))
    }
}

/// Return types seen inside one function or lambda body.
#[derive(Debug)]
pub(super) struct ReturnFrame {
    pub declared: Option<Type>,
    pub collected: Vec<Type>,
    pub returns: usize,
}

pub struct TypeChecker<'a> {
    tree: &'a SyntaxTree,
    pub(super) env: &'a mut TypeEnv,
    pub(super) context: PassContext,
    pub(super) frames: Vec<ReturnFrame>,
    module: Option<ScopeId>,
}

impl<'a> TypeChecker<'a> {
    pub fn new(tree: &'a SyntaxTree, env: &'a mut TypeEnv) -> Self {
        TypeChecker {
            tree,
            env,
            context: PassContext::new(),
            frames: vec![],
            module: None,
        }
    }

    /// The module scope created by the Preliminary pass.
    pub fn module_scope(&self) -> Option<ScopeId> {
        self.module
    }

    pub fn env(&self) -> &TypeEnv {
        &*self.env
    }

    /// Settles the Preliminary pass (unless it already ran) and runs the
    /// Final pass, returning the Final pass's bound tree. The module is
    /// committed to the environment only when the Final pass succeeds.
    pub fn check(&mut self) -> Result<BoundTree, Diagnostics> {
        if self.module.is_none() {
            self.settle()?;
        }

        let root = self.run_pass(Pass::Final)?;

        if let Some(module) = self.module {
            self.env.commit_module(module);
        }

        Ok(BoundTree {
            root,
            tokens: self.tree.tokens.clone(),
            diagnostics: self.tree.diagnostics.clone(),
            source: Rc::clone(&self.tree.source),
            file: Rc::clone(&self.tree.file),
        })
    }

    /// Repeats the Preliminary pass until a round leaves the environment
    /// unchanged. Returns the number of rounds run.
    pub fn settle(&mut self) -> Result<usize, Diagnostics> {
        for round in 1..=MAX_PRELIMINARY_ROUNDS {
            let revision = self.env.revision();
            self.run_pass(Pass::Preliminary)?;

            if self.env.revision() == revision {
                debug!("{} settled after {} preliminary rounds", self.tree.file, round);
                return Ok(round);
            }
        }

        debug!(
            "{} did not settle in {} preliminary rounds",
            self.tree.file, MAX_PRELIMINARY_ROUNDS
        );
        Ok(MAX_PRELIMINARY_ROUNDS)
    }

    /// Walks the whole program once. The Preliminary pass never fails on
    /// statement errors; the Final pass collects them.
    pub fn run_pass(&mut self, pass: Pass) -> Result<BoundProgram, Diagnostics> {
        let tree = self.tree;
        debug!("{:?} pass over {} started", pass, tree.file);

        self.context.begin(pass);
        let module = self.enter_module(pass)?;

        let mut program = BoundProgram::new(tree.root.span.clone());
        let mut diagnostics = Diagnostics::new();

        for (index, stmt) in tree.root.children.iter().enumerate() {
            self.context.checkpoint(index);
            self.frames.clear();

            match self.check_stmt(stmt, module) {
                Ok(bound) => program.append(bound),
                Err(error) => match pass {
                    Pass::Preliminary => {
                        trace!("preliminary pass skipped {}: {}", stmt.kind.name(), error)
                    }
                    Pass::Final => {
                        debug!("{} failed: {}", stmt.kind.name(), error);
                        diagnostics.push(error);
                    }
                },
            }
        }

        if pass == Pass::Final {
            for stmt in &program.children {
                if let Some(span) = stmt.find_unresolved() {
                    diagnostics.push(Error::new(ErrorImpl::UnresolvedType, span.start.clone()));
                }
            }
        }

        debug!(
            "{:?} pass over {} finished with {} errors",
            pass,
            tree.file,
            diagnostics.len()
        );

        if diagnostics.has_errors() {
            Err(diagnostics)
        } else {
            Ok(program)
        }
    }

    fn enter_module(&mut self, pass: Pass) -> Result<ScopeId, Error> {
        let position = self.tree.root.span.start.clone();

        match pass {
            Pass::Preliminary => {
                if let Some(module) = self.module {
                    trace!("re-entered module for another preliminary round");
                    return Ok(module);
                }

                let parent = self.env.latest_module().unwrap_or(self.env.globals());
                let name = format!("module{}", self.env.module_count());
                let module = self.env.extend(parent, &name, ScopeRole::Module, &position)?;

                debug!("checking {} in {}", self.tree.file, name);
                self.module = Some(module);
                Ok(module)
            }
            Pass::Final => self.module.ok_or_else(|| {
                Error::new(
                    ErrorImpl::ScopeTopologyMismatch {
                        scope: String::from("module"),
                    },
                    position,
                )
            }),
        }
    }

    /// Creates the next child scope of `parent`, named `<tag><ordinal>`, or
    /// re-enters it when an earlier round already created it. The Final
    /// pass only ever re-enters.
    pub(super) fn enter_scope(
        &mut self,
        parent: ScopeId,
        role: ScopeRole,
        tag: &str,
        position: &Position,
    ) -> Result<ScopeId, Error> {
        let name = format!("{}{}", tag, self.context.next_ordinal());

        match self.context.pass {
            Pass::Preliminary => match self.env.get_child_env(parent, &name) {
                Some(scope) => Ok(scope),
                None => self.env.extend(parent, &name, role, position),
            },
            Pass::Final => {
                let scope = self.env.get_child_env(parent, &name).ok_or_else(|| {
                    Error::new(
                        ErrorImpl::ScopeTopologyMismatch {
                            scope: name.clone(),
                        },
                        position.clone(),
                    )
                })?;
                trace!("re-entered scope {}", name);
                Ok(scope)
            }
        }
    }

    pub(super) fn is_final(&self) -> bool {
        self.context.pass == Pass::Final
    }

    /// The Final pass reports `error`. The Preliminary pass only logs it and
    /// carries on with `fallback`, so every scope still gets created.
    pub(super) fn recover(&self, error: Error, fallback: Type) -> Result<Type, Error> {
        match self.context.pass {
            Pass::Preliminary => {
                trace!("preliminary pass ignored: {}", error);
                Ok(fallback)
            }
            Pass::Final => Err(error),
        }
    }

    /// Looks up a value binding.
    ///
    /// Both passes prefer a declared binding anywhere up the scope chain to
    /// a placeholder. In the Preliminary pass a name with neither gets an
    /// `Unresolved` placeholder in `scope`. In the Final pass the walk
    /// discards every placeholder it meets.
    pub(super) fn resolve_identifier(
        &mut self,
        name: &str,
        scope: ScopeId,
        position: &Position,
    ) -> Result<Binding, Error> {
        match self.context.pass {
            Pass::Preliminary => {
                let mut current = Some(scope);
                let mut placeholder = None;

                while let Some(id) = current {
                    if let Some(binding) = self.env.get_local(id, name) {
                        if !binding.placeholder {
                            return Ok(binding.clone());
                        }
                        placeholder.get_or_insert_with(|| binding.clone());
                    }
                    current = self.env.parent(id);
                }

                if let Some(binding) = placeholder {
                    return Ok(binding);
                }

                self.env.set_placeholder(scope, name, position);
                trace!("`{}` not declared yet, installed placeholder", name);

                Ok(Binding {
                    ty: Type::Unresolved(position.clone()),
                    constant: false,
                    placeholder: true,
                })
            }
            Pass::Final => {
                let mut current = Some(scope);

                while let Some(id) = current {
                    if let Some(binding) = self.env.get_local(id, name) {
                        if !binding.placeholder {
                            return Ok(binding.clone());
                        }

                        self.env.delete(id, name);
                        trace!(
                            "discarded placeholder for `{}` in {}",
                            name,
                            self.env.scope(id).name
                        );
                    }
                    current = self.env.parent(id);
                }

                Err(Error::new(
                    ErrorImpl::ReferenceBeforeInitialization {
                        name: String::from(name),
                    },
                    position.clone(),
                ))
            }
        }
    }

    /// Final pass duplicate check for a value name.
    fn declare(&mut self, scope: ScopeId, name: &str, position: &Position) -> Result<(), Error> {
        if self.is_final() && !self.context.declare(scope, name) {
            debug!("`{}` declared twice in {}", name, self.env.scope(scope).name);
            return Err(Error::new(
                ErrorImpl::AlreadyDeclared {
                    name: String::from(name),
                },
                position.clone(),
            ));
        }

        Ok(())
    }

    pub(super) fn check_stmt(&mut self, stmt: &Stmt, scope: ScopeId) -> Result<BoundStmt, Error> {
        let span = stmt.span.clone();

        match &stmt.kind {
            StmtKind::Expression(expression) => {
                let bound = self.synth(&expression.expression, scope, false)?;
                Ok(bind_stmt(
                    BoundStmtKind::Expression {
                        expression: bound,
                        terminated: expression.terminated,
                    },
                    span,
                    None,
                ))
            }
            StmtKind::VarDecl(decl) => self.check_var_decl(decl, span, scope),
            StmtKind::FnDecl(decl) => self.check_fn_decl(decl, span, scope),
            StmtKind::Return(value) => {
                let declared = match self.frames.last() {
                    Some(frame) => frame.declared.clone(),
                    None => {
                        return Err(Error::new(ErrorImpl::ReturnOutsideFunction, span.start))
                    }
                };

                let bound = match (value, &declared) {
                    (Some(value), Some(declared)) => Some(self.check_expr(value, declared, scope)?),
                    (Some(value), None) => Some(self.synth(value, scope, false)?),
                    (None, _) => None,
                };

                let ty = bound.as_ref().map(|value| value.ty.clone()).unwrap_or(Type::Nil);

                if let (None, Some(declared)) = (&bound, &declared) {
                    if !self.accepts(&Type::Nil, declared) {
                        self.recover(
                            Error::new(
                                ErrorImpl::TypeMismatch {
                                    expected: declared.to_string(),
                                    received: Type::Nil.to_string(),
                                },
                                span.start.clone(),
                            ),
                            Type::Any,
                        )?;
                    }
                }

                if let Some(frame) = self.frames.last_mut() {
                    frame.returns += 1;
                    if frame.declared.is_none() {
                        frame.collected.push(ty);
                    }
                }

                Ok(bind_stmt(BoundStmtKind::Return(bound), span, None))
            }
            StmtKind::For(for_stmt) => self.check_for(for_stmt, span, scope),
            StmtKind::TypeAlias(alias) => self.check_type_alias(alias, span, scope),
        }
    }

    /// Checks the statements of a body in `scope`. The block's type is its
    /// trailing unterminated expression, or `Nil`.
    pub(super) fn check_block(&mut self, block: &Block, scope: ScopeId) -> Result<BoundBlock, Error> {
        let mut body = vec![];

        for stmt in block.iter() {
            body.push(self.check_stmt(stmt, scope)?);
        }

        let mut bound = BoundBlock {
            body,
            ty: Type::Nil,
            span: block.span.clone(),
        };

        if let Some(terminal) = bound.terminal() {
            bound.ty = terminal.ty.clone();
        }

        Ok(bound)
    }

    /// Checks a function or lambda body and computes its return type: the
    /// declared one, or the union of every `return` and the trailing
    /// expression.
    pub(super) fn check_body(
        &mut self,
        block: &Block,
        scope: ScopeId,
        declared: Option<Type>,
    ) -> Result<(BoundBlock, Type), Error> {
        self.frames.push(ReturnFrame {
            declared: declared.clone(),
            collected: vec![],
            returns: 0,
        });

        let body = self.check_block(block, scope);
        let frame = self.frames.pop();
        let body = body?;

        let (collected, returns) = frame
            .map(|frame| (frame.collected, frame.returns))
            .unwrap_or_default();

        let return_type = match declared {
            Some(declared) => {
                let (received, position) = match body.terminal() {
                    Some(terminal) => (Some(terminal.ty.clone()), terminal.span.start.clone()),
                    None if returns == 0 => (Some(Type::Nil), block.span.end.clone()),
                    None => (None, block.span.end.clone()),
                };

                if let Some(received) = received {
                    if !self.accepts(&received, &declared) {
                        self.recover(
                            Error::new(
                                ErrorImpl::TypeMismatch {
                                    expected: declared.to_string(),
                                    received: received.to_string(),
                                },
                                position,
                            ),
                            Type::Any,
                        )?;
                    }
                }

                declared
            }
            None => {
                let mut types = collected;
                match body.terminal() {
                    Some(terminal) => types.push(terminal.ty.clone()),
                    None if types.is_empty() => types.push(Type::Nil),
                    None => {}
                }
                Type::union(types)
            }
        };

        Ok((body, return_type))
    }

    pub(super) fn bind_parameters(
        &mut self,
        parameters: &[Parameter],
        scope: ScopeId,
        expected: Option<&[Type]>,
    ) -> Result<Vec<BoundBinding>, Error> {
        let mut bound = vec![];

        for (index, parameter) in parameters.iter().enumerate() {
            let ty = match &parameter.annotation {
                Some(annotation) => self.resolve_annotation(annotation, scope)?,
                None => expected
                    .and_then(|expected| expected.get(index).cloned())
                    .unwrap_or(Type::Any),
            };

            self.declare(scope, &parameter.name, &parameter.span.start)?;
            self.env.set(scope, &parameter.name, ty.clone(), false);

            bound.push(BoundBinding {
                name: parameter.name.clone(),
                ty,
                span: parameter.span.clone(),
            });
        }

        Ok(bound)
    }

    fn check_var_decl(
        &mut self,
        decl: &VariableDeclaration,
        span: Span,
        scope: ScopeId,
    ) -> Result<BoundStmt, Error> {
        let assignment = &decl.assignment;
        let (names, destructure) = pattern_names(&assignment.target.kind, &assignment.target.span)?;

        for name in &names {
            self.declare(scope, &name.name, &name.span.start)?;
        }

        let (pattern, value, ty) = match &assignment.annotation {
            Some(annotation) => {
                let declared = self.resolve_annotation(annotation, scope)?;
                // The names exist before the initializer is checked
                let pattern = self.bind_pattern(
                    &names,
                    destructure,
                    &declared,
                    scope,
                    decl.constant,
                    &assignment.target.span,
                )?;
                let value = self.check_expr(&assignment.value, &declared, scope)?;
                (pattern, value, declared)
            }
            None => {
                let value = self.synth(&assignment.value, scope, decl.constant)?;
                let ty = value.ty.clone();
                let pattern = self.bind_pattern(
                    &names,
                    destructure,
                    &ty,
                    scope,
                    decl.constant,
                    &assignment.target.span,
                )?;
                (pattern, value, ty)
            }
        };

        Ok(bind_stmt(
            BoundStmtKind::VarDecl {
                constant: decl.constant,
                pattern,
                value,
            },
            span,
            Some(ty),
        ))
    }

    /// Binds the names of a declaration or loop pattern to `ty`, taking a
    /// tuple type apart for tuple patterns.
    pub(super) fn bind_pattern(
        &mut self,
        names: &[PatternName],
        destructure: bool,
        ty: &Type,
        scope: ScopeId,
        constant: bool,
        span: &Span,
    ) -> Result<BoundPattern, Error> {
        if !destructure {
            let name = names
                .first()
                .ok_or_else(|| Error::new(ErrorImpl::InvalidAssignmentTarget, span.start.clone()))?;
            self.env.set(scope, &name.name, ty.clone(), constant);

            return Ok(BoundPattern::Name(BoundBinding {
                name: name.name.clone(),
                ty: ty.clone(),
                span: name.span.clone(),
            }));
        }

        let element_types = match ty {
            Type::Tuple(elements) if elements.len() == names.len() => elements.clone(),
            Type::Tuple(elements) => {
                let error = Error::new(
                    ErrorImpl::PatternArityMismatch {
                        expected: names.len(),
                        received: elements.len(),
                    },
                    span.start.clone(),
                );
                vec![self.recover(error, Type::Any)?; names.len()]
            }
            Type::Vector(element) => vec![element.as_ref().clone(); names.len()],
            Type::Any | Type::Unresolved(_) => vec![ty.clone(); names.len()],
            other => {
                let error = Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: Type::Tuple(vec![Type::Unknown; names.len()]).to_string(),
                        received: other.to_string(),
                    },
                    span.start.clone(),
                );
                vec![self.recover(error, Type::Any)?; names.len()]
            }
        };

        let mut bindings = vec![];
        for (name, ty) in names.iter().zip(element_types) {
            self.env.set(scope, &name.name, ty.clone(), constant);
            bindings.push(BoundBinding {
                name: name.name.clone(),
                ty,
                span: name.span.clone(),
            });
        }

        Ok(BoundPattern::Tuple(bindings))
    }

    fn check_fn_decl(
        &mut self,
        decl: &FunctionDeclaration,
        span: Span,
        scope: ScopeId,
    ) -> Result<BoundStmt, Error> {
        self.declare(scope, &decl.name, &span.start)?;

        let fn_scope = self.enter_scope(scope, ScopeRole::Function, &decl.name, &span.start)?;

        for name in &decl.type_parameters {
            self.env.set_type(fn_scope, name, Type::Variable(name.clone()));
        }

        let parameters = self.bind_parameters(&decl.parameters, fn_scope, None)?;
        let parameter_types: Vec<Type> = parameters.iter().map(|parameter| parameter.ty.clone()).collect();

        let declared = match &decl.return_annotation {
            Some(annotation) => Some(self.resolve_annotation(annotation, fn_scope)?),
            None => None,
        };

        // The signature is visible to the body, for recursion. Without a
        // declared return type the first round assumes the function never
        // returns; later rounds reuse the type the previous one computed.
        match &declared {
            Some(declared) => {
                self.env.set(scope, &decl.name, Type::function(parameter_types.clone(), declared.clone()), false)
            }
            None => {
                let settled = self
                    .env
                    .get_local(scope, &decl.name)
                    .is_some_and(|binding| !binding.placeholder);

                if !settled {
                    self.env.set(scope, &decl.name, Type::function(parameter_types.clone(), Type::Never), false);
                }
            }
        }

        let (body, return_type) = self.check_body(&decl.body, fn_scope, declared)?;

        let ty = Type::function(parameter_types, return_type);
        self.env.set(scope, &decl.name, ty.clone(), false);
        trace!("fn {}: {}", decl.name, ty);

        Ok(bind_stmt(
            BoundStmtKind::FnDecl {
                name: decl.name.clone(),
                type_parameters: decl.type_parameters.clone(),
                parameters,
                body,
            },
            span,
            Some(ty),
        ))
    }

    fn check_for(&mut self, for_stmt: &ForStmt, span: Span, scope: ScopeId) -> Result<BoundStmt, Error> {
        let iterable = self.synth(&for_stmt.iterable, scope, false)?;
        let loop_scope = self.enter_scope(scope, ScopeRole::Loop, "for", &span.start)?;

        let element = match element_type(&iterable.ty) {
            Some(element) => element,
            None => self.recover(
                Error::new(
                    ErrorImpl::NotIterable {
                        type_: iterable.ty.to_string(),
                    },
                    iterable.span.start.clone(),
                ),
                Type::Any,
            )?,
        };

        let (names, destructure) = pattern_names(&for_stmt.binding.kind, &for_stmt.binding.span)?;
        for name in &names {
            self.declare(loop_scope, &name.name, &name.span.start)?;
        }

        let pattern = self.bind_pattern(&names, destructure, &element, loop_scope, false, &for_stmt.binding.span)?;
        let body = self.check_block(&for_stmt.body, loop_scope)?;

        Ok(bind_stmt(
            BoundStmtKind::For {
                pattern,
                iterable,
                body,
            },
            span,
            Some(Type::Nil),
        ))
    }

    fn check_type_alias(&mut self, alias: &TypeAlias, span: Span, scope: ScopeId) -> Result<BoundStmt, Error> {
        if self.is_final() && !self.context.declare_type(scope, &alias.name) {
            return Err(Error::new(
                ErrorImpl::AlreadyDeclared {
                    name: alias.name.clone(),
                },
                span.start,
            ));
        }

        let ty = self.resolve_annotation(&alias.annotation, scope)?;
        self.env.set_type(scope, &alias.name, ty.clone());

        Ok(bind_stmt(
            BoundStmtKind::TypeAlias {
                name: alias.name.clone(),
            },
            span,
            Some(ty),
        ))
    }
}

/// Names bound by a declaration target, and whether it is a tuple pattern.
fn pattern_names(target: &ExprKind, span: &Span) -> Result<(Vec<PatternName>, bool), Error> {
    match target {
        ExprKind::Identifier(name) => Ok((
            vec![PatternName {
                name: name.clone(),
                span: span.clone(),
            }],
            false,
        )),
        ExprKind::TuplePattern(names) => Ok((names.clone(), true)),
        _ => Err(Error::new(ErrorImpl::InvalidAssignmentTarget, span.start.clone())),
    }
}

/// Element type produced by iterating over a value of type `ty`.
fn element_type(ty: &Type) -> Option<Type> {
    match ty {
        Type::Vector(element) => Some(element.as_ref().clone()),
        Type::Tuple(elements) => Some(Type::union(elements.clone())),
        Type::String | Type::Singleton(LiteralValue::String(_)) => Some(Type::String),
        Type::Any | Type::Unresolved(_) => Some(ty.clone()),
        Type::Union(members) => members
            .iter()
            .map(element_type)
            .collect::<Option<Vec<Type>>>()
            .map(Type::union),
        _ => None,
    }
}

/// Checks `tree` against `env`, returning the bound tree or every error
/// the Final pass found.
pub fn type_check(tree: &SyntaxTree, env: &mut TypeEnv) -> Result<BoundTree, Diagnostics> {
    TypeChecker::new(tree, env).check()
}
