//! A small S-expression predicate language.
//!
//! Expressions are parsed once into an immutable [`Expression`] and then
//! evaluated any number of times, from any number of threads, against
//! per-call [`Params`].
//!
//! ```
//! use rulexp::{MapParams, Value};
//!
//! let expr = rulexp::parse(
//!     r#"(and (eq os "android") (ge app_version (t_version "5.6.3")))"#,
//! )
//! .unwrap();
//!
//! let params = MapParams::new()
//!     .set("os", "android")
//!     .set("app_version", "6.0.0".parse::<rulexp::Version>().unwrap());
//!
//! assert_eq!(expr.eval(&params).unwrap(), Value::Bool(true));
//! assert_eq!(expr.properties(), ["os", "app_version"]);
//! ```

mod error;
mod evaluate;
mod function;
mod optimize;
mod parse;
mod properties;
mod types;

pub use error::Error;
pub use function::{Function, FunctionLookup, FunctionTable, Registry, RegistryError};
pub use parse::{scan_quoted, ParseError};
pub use types::{
    Atom, CompareOp, EvalError, Expression, FunctionError, InvalidTimestamp, InvalidVersion,
    MapParams, Node, Params, Timestamp, Value, Version,
};

/// Parse expression text into a reusable [`Expression`].
///
/// # Errors
///
/// Returns [`ParseError`] if the text is not a single well-formed
/// S-expression.
pub fn parse(text: &str) -> Result<Expression, ParseError> {
    Expression::parse(text)
}

/// Parse and evaluate in one go, for expressions that will not be reused.
///
/// # Errors
///
/// Returns [`Error`] on parse or evaluation failure.
pub fn eval(text: &str, params: &dyn Params) -> Result<Value, Error> {
    Ok(Expression::parse(text)?.eval(params)?)
}

/// Parse and evaluate to a boolean in one go.
///
/// # Errors
///
/// Returns [`Error`] on parse or evaluation failure, including a result
/// that is not a boolean.
pub fn eval_bool(text: &str, params: &dyn Params) -> Result<bool, Error> {
    Ok(Expression::parse(text)?.eval_bool(params)?)
}

/// Register a function in the process-wide [`Registry`].
///
/// Register everything before starting concurrent evaluation: an evaluation
/// already in flight may not see a registration that completes after it
/// began.
///
/// # Errors
///
/// Returns [`RegistryError::InvalidName`] if `name` cannot appear as the head
/// of a list.
pub fn register_function<F>(name: &str, f: F) -> Result<(), RegistryError>
where
    F: Fn(&[&Value]) -> Result<Value, FunctionError> + Send + Sync + 'static,
{
    Registry::global().register(name, f)
}
