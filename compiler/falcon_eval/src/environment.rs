//! Variable scoping for the interpreter.
//!
//! A scope stack over parent-linked scopes. Block bodies (`if`, `repeat`,
//! `try`) run in the scope they appear in; only function calls push a
//! fresh scope, parented to the global scope so locals never leak between
//! calls. Imported modules execute against the same global scope as the
//! importer, so later imports can shadow earlier bindings.

use rustc_hash::FxHashMap;
use std::cell::RefCell;
use std::fmt;
use std::ops::Deref;
use std::rc::Rc;

use falcon_diagnostic::Diagnostic;

use crate::errors::const_rebinding;
use crate::value::Value;

/// A single-threaded scope handle with interior mutability.
///
/// Wraps `Rc<RefCell<T>>` so all scope allocations go through one factory.
/// Not thread-safe; the interpreter runs single-threaded.
#[repr(transparent)]
pub struct LocalScope<T>(Rc<RefCell<T>>);

impl<T> LocalScope<T> {
    #[inline]
    pub fn new(value: T) -> Self {
        LocalScope(Rc::new(RefCell::new(value)))
    }
}

impl<T> Clone for LocalScope<T> {
    #[inline]
    fn clone(&self) -> Self {
        LocalScope(Rc::clone(&self.0))
    }
}

impl<T: fmt::Debug> fmt::Debug for LocalScope<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("LocalScope").field(&self.0).finish()
    }
}

impl<T> Deref for LocalScope<T> {
    type Target = RefCell<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// A variable binding: the value plus the constant and secured markings.
#[derive(Clone, Debug)]
struct Binding {
    value: Value,
    constant: bool,
    secured: bool,
}

/// A single scope containing variable bindings.
#[derive(Debug, Default)]
pub struct Scope {
    bindings: FxHashMap<String, Binding>,
    /// Parent scope for lexical lookup.
    parent: Option<LocalScope<Scope>>,
}

impl Scope {
    pub fn new() -> Self {
        Scope::default()
    }

    pub fn with_parent(parent: LocalScope<Scope>) -> Self {
        Scope {
            bindings: FxHashMap::default(),
            parent: Some(parent),
        }
    }

    /// Define a binding in this scope. Redeclaring a name this scope
    /// already holds as a constant is a `ConstError`; shadowing a
    /// constant from an outer scope is not.
    fn define(
        &mut self,
        name: &str,
        value: Value,
        constant: bool,
        secured: bool,
    ) -> Result<(), Diagnostic> {
        if let Some(existing) = self.bindings.get(name) {
            if existing.constant {
                return Err(const_rebinding(name));
            }
        }
        self.bindings.insert(
            name.to_string(),
            Binding {
                value,
                constant,
                secured,
            },
        );
        Ok(())
    }

    fn lookup(&self, name: &str) -> Option<Value> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.value.clone());
        }
        if let Some(parent) = &self.parent {
            return parent.borrow().lookup(name);
        }
        None
    }

    fn is_secured(&self, name: &str) -> Option<bool> {
        if let Some(binding) = self.bindings.get(name) {
            return Some(binding.secured);
        }
        self.parent.as_ref().and_then(|p| p.borrow().is_secured(name))
    }
}

/// The symbol store: a stack of scopes with the global scope at the
/// bottom. Pushing and popping is how function calls enter and leave
/// their local scope.
pub struct Environment {
    scopes: Vec<LocalScope<Scope>>,
    global: LocalScope<Scope>,
}

impl Environment {
    pub fn new() -> Self {
        let global = LocalScope::new(Scope::new());
        Environment {
            scopes: vec![global.clone()],
            global,
        }
    }

    /// Current scope depth (1 when only the global scope is live).
    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    /// Push the local scope for a function call. The parent is the
    /// global scope, not the caller's scope: a callee sees its own
    /// locals and globals, never the caller's locals.
    #[inline]
    pub fn push_call_scope(&mut self) {
        self.scopes
            .push(LocalScope::new(Scope::with_parent(self.global.clone())));
    }

    /// Pop the current scope. The global scope is never popped.
    #[inline]
    pub fn pop_scope(&mut self) {
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    /// Define a variable in the current scope.
    #[inline]
    pub fn define(
        &mut self,
        name: &str,
        value: Value,
        constant: bool,
        secured: bool,
    ) -> Result<(), Diagnostic> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow_mut()
            .define(name, value, constant, secured)
    }

    /// Look up a variable, walking the parent chain.
    #[inline]
    pub fn lookup(&self, name: &str) -> Option<Value> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow()
            .lookup(name)
    }

    /// Whether a visible binding carries the secured marking.
    pub fn is_secured(&self, name: &str) -> Option<bool> {
        self.scopes
            .last()
            .unwrap_or(&self.global)
            .borrow()
            .is_secured(name)
    }
}

impl Default for Environment {
    fn default() -> Self {
        Self::new()
    }
}
