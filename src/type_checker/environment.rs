//! Scoped type environment.
//!
//! Scopes live in an arena owned by [`TypeEnv`] and refer to each other by
//! [`ScopeId`]. Scope 0 is the globals scope, pre-populated with the
//! built-in functions; every module scope descends from it.

use std::collections::HashMap;

use log::trace;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

use super::types::Type;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(pub usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeRole {
    Global,
    Module,
    Function,
    Lambda,
    Loop,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub ty: Type,
    pub constant: bool,
    /// Installed for a name used before any declaration was seen
    pub placeholder: bool,
}

#[derive(Debug, Clone)]
pub struct Scope {
    pub name: String,
    pub role: ScopeRole,
    pub parent: Option<ScopeId>,
    bindings: HashMap<String, Binding>,
    types: HashMap<String, Type>,
    children: HashMap<String, ScopeId>,
}

impl Scope {
    fn new(name: &str, role: ScopeRole, parent: Option<ScopeId>) -> Self {
        Scope {
            name: String::from(name),
            role,
            parent,
            bindings: HashMap::new(),
            types: HashMap::new(),
            children: HashMap::new(),
        }
    }

    pub fn bindings(&self) -> &HashMap<String, Binding> {
        &self.bindings
    }
}

#[derive(Debug, Clone)]
pub struct TypeEnv {
    scopes: Vec<Scope>,
    /// Module scopes in creation order
    modules: Vec<ScopeId>,
    /// Modules whose check succeeded, in commit order
    committed: Vec<ScopeId>,
    /// Bumped on every change to a scope, binding or alias
    revision: usize,
}

impl Default for TypeEnv {
    fn default() -> Self {
        TypeEnv::new()
    }
}

impl TypeEnv {
    /// Creates an environment holding only the globals scope.
    pub fn new() -> Self {
        let mut env = TypeEnv {
            scopes: vec![Scope::new("globals", ScopeRole::Global, None)],
            modules: vec![],
            committed: vec![],
            revision: 0,
        };

        let globals = env.globals();
        env.set(globals, "print", Type::function(vec![Type::Any], Type::Nil), true);
        env.set(globals, "str", Type::function(vec![Type::Any], Type::String), true);
        env.set(globals, "input", Type::function(vec![Type::String], Type::String), true);
        env.set(globals, "len", Type::function(vec![Type::Any], Type::Integer), true);

        env
    }

    pub fn globals(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn scope(&self, id: ScopeId) -> &Scope {
        &self.scopes[id.0]
    }

    pub fn parent(&self, id: ScopeId) -> Option<ScopeId> {
        self.scopes[id.0].parent
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// The most recently committed module scope, if any. Modules whose
    /// check failed are never committed, so later modules do not see them.
    pub fn latest_module(&self) -> Option<ScopeId> {
        self.committed.last().copied()
    }

    pub fn commit_module(&mut self, module: ScopeId) {
        if !self.committed.contains(&module) {
            self.committed.push(module);
        }
    }

    /// Changes whenever a scope is created or a binding or alias changes.
    pub fn revision(&self) -> usize {
        self.revision
    }

    /// Creates a child of `parent` named `name`.
    pub fn extend(
        &mut self,
        parent: ScopeId,
        name: &str,
        role: ScopeRole,
        position: &Position,
    ) -> Result<ScopeId, Error> {
        if self.scopes[parent.0].children.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::ScopeAlreadyExists {
                    scope: String::from(name),
                },
                position.clone(),
            ));
        }

        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope::new(name, role, Some(parent)));
        self.scopes[parent.0].children.insert(String::from(name), id);

        if role == ScopeRole::Module {
            self.modules.push(id);
        }

        self.revision += 1;
        trace!("created scope {} under {}", name, self.scopes[parent.0].name);
        Ok(id)
    }

    /// Re-enters a child previously created with [`TypeEnv::extend`].
    pub fn get_child_env(&self, parent: ScopeId, name: &str) -> Option<ScopeId> {
        self.scopes[parent.0].children.get(name).copied()
    }

    pub fn set(&mut self, scope: ScopeId, name: &str, ty: Type, constant: bool) {
        self.insert_binding(
            scope,
            name,
            Binding {
                ty,
                constant,
                placeholder: false,
            },
        );
    }

    /// Binds `name` to an `Unresolved` stand-in that a later declaration
    /// may replace.
    pub fn set_placeholder(&mut self, scope: ScopeId, name: &str, position: &Position) {
        self.insert_binding(
            scope,
            name,
            Binding {
                ty: Type::Unresolved(position.clone()),
                constant: false,
                placeholder: true,
            },
        );
    }

    fn insert_binding(&mut self, scope: ScopeId, name: &str, binding: Binding) {
        let bindings = &mut self.scopes[scope.0].bindings;
        if bindings.get(name) != Some(&binding) {
            bindings.insert(String::from(name), binding);
            self.revision += 1;
        }
    }

    /// Type of `name`, searching up the parent chain.
    pub fn get(&self, scope: ScopeId, name: &str) -> Option<&Type> {
        self.get_binding(scope, name).map(|binding| &binding.ty)
    }

    pub fn get_binding(&self, scope: ScopeId, name: &str) -> Option<&Binding> {
        self.resolve(scope, name)
            .and_then(|owner| self.scopes[owner.0].bindings.get(name))
    }

    /// Binding of `name` in `scope` itself.
    pub fn get_local(&self, scope: ScopeId, name: &str) -> Option<&Binding> {
        self.scopes[scope.0].bindings.get(name)
    }

    /// Scope-local membership test.
    pub fn has(&self, scope: ScopeId, name: &str) -> bool {
        self.scopes[scope.0].bindings.contains_key(name)
    }

    /// Membership test over the whole parent chain.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> bool {
        self.resolve(scope, name).is_some()
    }

    /// The nearest scope, starting at `scope`, that binds `name`.
    pub fn resolve(&self, scope: ScopeId, name: &str) -> Option<ScopeId> {
        let mut current = Some(scope);

        while let Some(id) = current {
            if self.has(id, name) {
                return Some(id);
            }
            current = self.parent(id);
        }

        None
    }

    pub fn delete(&mut self, scope: ScopeId, name: &str) -> Option<Binding> {
        self.scopes[scope.0].bindings.remove(name)
    }

    pub fn is_constant(&self, scope: ScopeId, name: &str) -> bool {
        self.get_binding(scope, name)
            .map(|binding| binding.constant)
            .unwrap_or(false)
    }

    pub fn set_type(&mut self, scope: ScopeId, name: &str, ty: Type) {
        let types = &mut self.scopes[scope.0].types;
        if types.get(name) != Some(&ty) {
            types.insert(String::from(name), ty);
            self.revision += 1;
        }
    }

    /// Type alias or type variable bound in `scope` itself.
    pub fn get_type(&self, scope: ScopeId, name: &str) -> Option<&Type> {
        self.scopes[scope.0].types.get(name)
    }

    /// Type alias or type variable, searching up the parent chain.
    pub fn lookup_type(&self, scope: ScopeId, name: &str) -> Option<&Type> {
        let mut current = Some(scope);

        while let Some(id) = current {
            if let Some(ty) = self.get_type(id, name) {
                return Some(ty);
            }
            current = self.parent(id);
        }

        None
    }
}
