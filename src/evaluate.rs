use std::borrow::Cow;

use crate::function::FunctionLookup;
use crate::types::{Atom, EvalError, Node, Params, Value};

/// Evaluate a canonical tree against `params`.
///
/// Children are evaluated depth-first, left to right; the first error ends
/// the walk. Nothing is cached and the tree is only read. Literals and
/// stored parameters come back borrowed; only computed values are owned.
pub(crate) fn evaluate<'a>(
    node: &'a Node,
    params: &'a dyn Params,
    functions: &dyn FunctionLookup,
) -> Result<Cow<'a, Value>, EvalError> {
    match node {
        Node::Atom(atom) => eval_atom(atom, params, functions),
        Node::List(children) => eval_list(children, params, functions),
    }
}

fn eval_atom<'a>(
    atom: &'a Atom,
    params: &'a dyn Params,
    functions: &dyn FunctionLookup,
) -> Result<Cow<'a, Value>, EvalError> {
    if let Some(literal) = atom.literal() {
        return Ok(Cow::Borrowed(literal));
    }
    if let Some(value) = params.get(atom.text()) {
        return Ok(value);
    }
    // A function name outside head position is passed as a value.
    functions
        .lookup(atom.text())
        .map(|function| Cow::Owned(Value::Function(function.clone())))
        .ok_or_else(|| EvalError::UnresolvedVariable {
            name: atom.text().to_owned(),
        })
}

fn eval_list<'a>(
    children: &'a [Node],
    params: &'a dyn Params,
    functions: &dyn FunctionLookup,
) -> Result<Cow<'a, Value>, EvalError> {
    match children.split_first() {
        Some((Node::Atom(head), args)) if head.is_symbol() => {
            let name = head.text();
            let function = functions
                .lookup(name)
                .ok_or_else(|| EvalError::UnknownFunction {
                    name: name.to_owned(),
                })?;
            let args = eval_all(args, params, functions)?;
            let args: Vec<&Value> = args.iter().map(|arg| &**arg).collect();
            function
                .call(&args)
                .map(Cow::Owned)
                .map_err(|source| EvalError::Function {
                    name: name.to_owned(),
                    source,
                })
        }
        _ => {
            let items = eval_all(children, params, functions)?;
            Ok(Cow::Owned(Value::List(
                items.into_iter().map(Cow::into_owned).collect(),
            )))
        }
    }
}

fn eval_all<'a>(
    nodes: &'a [Node],
    params: &'a dyn Params,
    functions: &dyn FunctionLookup,
) -> Result<Vec<Cow<'a, Value>>, EvalError> {
    nodes
        .iter()
        .map(|node| evaluate(node, params, functions))
        .collect()
}
