use winnow::combinator::{alt, cut_err, delimited, opt, preceded, repeat};
use winnow::prelude::*;

use crate::types::{Atom, Node};

use super::scanner::{bare, check_trailing, quoted, ws};
use super::ParseError;

/// Parse expression text into a raw (not yet normalized) tree.
///
/// Returns `Ok(None)` for input made only of whitespace.
pub(crate) fn parse_tree(input: &str) -> Result<Option<Node>, ParseError> {
    if input.is_empty() {
        return Err(ParseError::NilInput);
    }

    let mut rest = input;
    // Past an opening quote or parenthesis every failure is running out of
    // input; before one, `node` backtracks and `check_trailing` reports it.
    let root = opt(node)
        .parse_next(&mut rest)
        .map_err(|_| ParseError::UnexpectedEnd)?;
    check_trailing(rest)?;

    match root {
        Some(Node::List(children)) if children.is_empty() => Err(ParseError::NilInput),
        root => Ok(root),
    }
}

fn node(input: &mut &str) -> ModalResult<Node> {
    preceded(
        ws,
        alt((
            list,
            quoted.map(|text| Node::Atom(Atom::quoted(text))),
            bare.map(|text| Node::Atom(Atom::bare(text))),
        )),
    )
    .parse_next(input)
}

fn list(input: &mut &str) -> ModalResult<Node> {
    delimited('(', repeat(0.., node), (ws, cut_err(')')))
        .map(Node::List)
        .parse_next(input)
}
