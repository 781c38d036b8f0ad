use thiserror::Error;

/// Syntax errors produced while scanning or parsing expression text.
///
/// Parse errors are permanent: the same text always fails the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input is empty, or its only construct is an empty list `()`.
    #[error("nil input")]
    NilInput,

    /// A quoted string or a list was opened but never closed.
    #[error("unexpected end of input")]
    UnexpectedEnd,

    /// A complete expression was parsed but more text follows it.
    #[error("leftover text after expression")]
    LeftOverText,

    /// A `)` appeared without a matching `(`.
    #[error("unmatched parenthesis")]
    UnmatchedParenthesis,
}
