//! Callables invoked from expression heads, and the registry that names them.

mod builtin;
mod registry;

use std::fmt;
use std::sync::Arc;

use crate::types::{FunctionError, Value};

pub use registry::{FunctionLookup, FunctionTable, Registry, RegistryError};

type NativeFn = dyn Fn(&[&Value]) -> Result<Value, FunctionError> + Send + Sync;

/// A named callable taking the evaluated argument list.
///
/// Arguments arrive borrowed: a parameter or literal passed straight
/// through is never copied to make the call.
///
/// Cloning is cheap: the closure is shared.
#[derive(Clone)]
pub struct Function {
    name: Arc<str>,
    call: Arc<NativeFn>,
}

impl Function {
    pub fn new<F>(name: &str, f: F) -> Self
    where
        F: Fn(&[&Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
    {
        Self {
            name: Arc::from(name),
            call: Arc::new(f),
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the function.
    ///
    /// # Errors
    ///
    /// Whatever the function itself reports.
    pub fn call(&self, args: &[&Value]) -> Result<Value, FunctionError> {
        (self.call)(args)
    }
}

impl PartialEq for Function {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.call, &other.call)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function").field("name", &self.name).finish()
    }
}
