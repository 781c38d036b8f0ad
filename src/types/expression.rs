use std::borrow::Cow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::function::{FunctionLookup, Registry};
use crate::parse::{parse_tree, ParseError};

use super::error::EvalError;
use super::node::Node;
use super::params::Params;
use super::value::Value;

/// A parsed, normalized expression. Immutable, thread-safe, and cheap to
/// clone, so it can be parsed once and shared behind `Arc` or cloned into
/// every worker.
///
/// # Example
///
/// ```
/// use rulexp::{Expression, MapParams};
///
/// let expr = Expression::parse(r#"(in gender ("female" "male"))"#).unwrap();
/// let params = MapParams::new().set("gender", "female");
/// assert!(expr.eval_bool(&params).unwrap());
/// assert_eq!(expr.properties(), ["gender"]);
/// ```
#[derive(Debug, Clone)]
pub struct Expression {
    root: Option<Arc<Node>>,
    properties: Arc<[String]>,
}

impl Expression {
    /// Parse and normalize expression text.
    ///
    /// Input made only of whitespace is accepted and produces an expression
    /// with no root; evaluating it fails with [`EvalError::Empty`].
    ///
    /// # Errors
    ///
    /// Returns [`ParseError`] if the text is not a single well-formed
    /// S-expression.
    pub fn parse(text: &str) -> Result<Self, ParseError> {
        let root = parse_tree(text)?.map(crate::optimize::optimize);
        let properties: Arc<[String]> = root
            .as_ref()
            .map(crate::properties::collect)
            .unwrap_or_default()
            .into();
        tracing::trace!(properties = properties.len(), "parsed expression");
        Ok(Self {
            root: root.map(Arc::new),
            properties,
        })
    }

    /// Evaluate against `params`, resolving functions in the global registry.
    ///
    /// The registry is read once, up front; see [`Registry::snapshot`].
    ///
    /// # Errors
    ///
    /// Returns [`EvalError`] describing the first failure met, depth-first and
    /// left to right.
    pub fn eval(&self, params: &dyn Params) -> Result<Value, EvalError> {
        self.eval_with(params, &Registry::global().snapshot())
    }

    /// Evaluate against `params`, resolving functions in `functions`.
    ///
    /// # Errors
    ///
    /// See [`eval`](Self::eval).
    pub fn eval_with(
        &self,
        params: &dyn Params,
        functions: &dyn FunctionLookup,
    ) -> Result<Value, EvalError> {
        let root = self.root.as_deref().ok_or(EvalError::Empty)?;
        crate::evaluate::evaluate(root, params, functions).map(Cow::into_owned)
    }

    /// Evaluate and require a boolean result.
    ///
    /// # Errors
    ///
    /// Everything [`eval`](Self::eval) reports, plus
    /// [`EvalError::NotBoolean`] when the result is of another kind.
    pub fn eval_bool(&self, params: &dyn Params) -> Result<bool, EvalError> {
        self.eval_bool_with(params, &Registry::global().snapshot())
    }

    /// Boolean evaluation against an explicit function table.
    ///
    /// # Errors
    ///
    /// See [`eval_bool`](Self::eval_bool).
    pub fn eval_bool_with(
        &self,
        params: &dyn Params,
        functions: &dyn FunctionLookup,
    ) -> Result<bool, EvalError> {
        let root = self.root.as_deref().ok_or(EvalError::Empty)?;
        let value = crate::evaluate::evaluate(root, params, functions)?;
        value
            .as_bool()
            .ok_or(EvalError::NotBoolean { found: value.kind() })
    }

    /// The free variables, in source order and with duplicates.
    ///
    /// Computed once at parse time; useful to find out which parameters a
    /// rule needs without evaluating it.
    #[must_use]
    pub fn properties(&self) -> &[String] {
        &self.properties
    }

    /// The normalized tree, or `None` for a whitespace-only expression.
    #[must_use]
    pub fn root(&self) -> Option<&Node> {
        self.root.as_deref()
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.root {
            Some(root) => write!(f, "{root}"),
            None => Ok(()),
        }
    }
}
