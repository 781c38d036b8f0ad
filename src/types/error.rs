use thiserror::Error;

/// Errors raised by a function while computing its result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FunctionError {
    #[error("expected {expected} arguments, got {found}")]
    Arity { expected: String, found: usize },

    #[error("expected {expected}, got {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid {kind} literal '{text}'")]
    InvalidLiteral { kind: &'static str, text: String },

    #[error("division by zero")]
    DivisionByZero,

    /// Free-form failure reported by an externally registered function.
    #[error("{0}")]
    Custom(String),
}

impl FunctionError {
    pub(crate) fn arity(expected: impl Into<String>, found: usize) -> Self {
        FunctionError::Arity {
            expected: expected.into(),
            found,
        }
    }

    pub fn custom(message: impl Into<String>) -> Self {
        FunctionError::Custom(message.into())
    }
}

/// Errors produced while evaluating an expression.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EvalError {
    #[error("unknown function '{name}'")]
    UnknownFunction { name: String },

    #[error("unresolved variable '{name}'")]
    UnresolvedVariable { name: String },

    #[error("function '{name}' failed: {source}")]
    Function {
        name: String,
        #[source]
        source: FunctionError,
    },

    #[error("expected a bool result, got {found}")]
    NotBoolean { found: &'static str },

    #[error("expression has no content to evaluate")]
    Empty,
}
