use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use thiserror::Error;

use crate::parse::literal;
use crate::types::{FunctionError, Value};

use super::{builtin, Function};

static GLOBAL: LazyLock<Registry> = LazyLock::new(Registry::with_builtins);

type Functions = HashMap<String, Function>;

/// The capability the evaluator needs: resolve a head symbol to a callable.
pub trait FunctionLookup {
    fn lookup(&self, name: &str) -> Option<&Function>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("'{name}' cannot be used as a function name")]
    InvalidName { name: String },
}

/// A thread-safe table of named functions.
///
/// The table is kept behind an `Arc` and replaced on write. An evaluation
/// takes one [`snapshot`](Self::snapshot) up front and resolves every call
/// against it without touching the lock again, so a registration racing
/// with an evaluation is not seen by it. Finish registering before
/// evaluating concurrently if the outcome matters.
#[derive(Default)]
pub struct Registry {
    functions: RwLock<Arc<Functions>>,
}

/// A point-in-time view of a [`Registry`].
///
/// Cheap to clone and unaffected by later registrations.
#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: Arc<Functions>,
}

impl FunctionTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.functions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }
}

impl FunctionLookup for FunctionTable {
    fn lookup(&self, name: &str) -> Option<&Function> {
        self.functions.get(name)
    }
}

impl FunctionLookup for HashMap<String, Function> {
    fn lookup(&self, name: &str) -> Option<&Function> {
        self.get(name)
    }
}

impl Registry {
    /// An empty registry, without the built-ins.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh registry holding the built-in functions.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for function in builtin::all() {
            registry.insert(function);
        }
        registry
    }

    /// The process-wide registry used by [`Expression::eval`](crate::Expression::eval)
    /// and the crate-level helpers. Starts out holding the built-ins.
    #[must_use]
    pub fn global() -> &'static Registry {
        &GLOBAL
    }

    /// Register `f` under `name`. A later registration of the same name
    /// replaces the earlier one.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::InvalidName`] if `name` could never appear as
    /// the head of a list: empty, containing whitespace or parentheses,
    /// starting with a quote, or reading as a number.
    pub fn register<F>(&self, name: &str, f: F) -> Result<(), RegistryError>
    where
        F: Fn(&[&Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        self.register_function(Function::new(name, f))
    }

    /// Register an already built [`Function`] under its own name.
    ///
    /// # Errors
    ///
    /// See [`register`](Self::register).
    pub fn register_function(&self, function: Function) -> Result<(), RegistryError> {
        if !is_valid_name(function.name()) {
            return Err(RegistryError::InvalidName {
                name: function.name().to_owned(),
            });
        }
        self.insert(function);
        Ok(())
    }

    fn insert(&self, function: Function) {
        let name = function.name().to_owned();
        let mut functions = self.write();
        // Copies the table only while snapshots of it are still alive.
        if Arc::make_mut(&mut *functions)
            .insert(name.clone(), function)
            .is_some()
        {
            tracing::debug!(function = %name, "replaced registered function");
        } else {
            tracing::debug!(function = %name, "registered function");
        }
    }

    /// The functions registered right now.
    #[must_use]
    pub fn snapshot(&self) -> FunctionTable {
        FunctionTable {
            functions: Arc::clone(&self.read()),
        }
    }

    /// Look up a function by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Function> {
        self.read().get(name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.read().contains_key(name)
    }

    /// Registered names, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.read().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    // A panic while holding the lock cannot leave the map half-updated, so a
    // poisoned lock is still safe to use.
    fn read(&self) -> RwLockReadGuard<'_, Arc<Functions>> {
        self.functions.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Arc<Functions>> {
        self.functions.write().unwrap_or_else(PoisonError::into_inner)
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("functions", &self.names())
            .finish()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && !name.starts_with(['"', '\''])
        && !name.contains(|c: char| c.is_whitespace() || c == '(' || c == ')')
        && literal::number(name).is_none()
}
