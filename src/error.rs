use thiserror::Error;

use crate::function::RegistryError;
use crate::parse::ParseError;
use crate::types::EvalError;

/// Unified error type covering parsing, evaluation, and registration.
///
/// Returned by the one-shot helpers [`eval`](crate::eval) and
/// [`eval_bool`](crate::eval_bool).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Eval(#[from] EvalError),

    #[error(transparent)]
    Registry(#[from] RegistryError),
}
