use winnow::combinator::{alt, cut_err, peek, preceded};
use winnow::prelude::*;
use winnow::stream::Offset;
use winnow::token::{any, one_of, take_till, take_while};

use super::ParseError;

// -- Whitespace -------------------------------------------------------------

pub(super) fn ws(input: &mut &str) -> ModalResult<()> {
    take_while(0.., char::is_whitespace)
        .void()
        .parse_next(input)
}

fn ends_bare(c: char) -> bool {
    c.is_whitespace() || c == '(' || c == ')'
}

// -- Atoms ------------------------------------------------------------------

/// A delimited run. The first character is the delimiter, whatever it is.
fn delimited_text(input: &mut &str) -> ModalResult<String> {
    let delimiter = any.parse_next(input)?;
    let mut text = String::new();
    loop {
        match any.parse_next(input)? {
            '\\' => {
                let escaped = any.parse_next(input)?;
                if escaped != delimiter {
                    text.push('\\');
                }
                text.push(escaped);
            }
            c if c == delimiter => return Ok(text),
            c => text.push(c),
        }
    }
}

/// A `"` or `'` quoted atom. Once the opening quote is seen there is no
/// going back.
pub(super) fn quoted(input: &mut &str) -> ModalResult<String> {
    preceded(peek(one_of(['"', '\''])), cut_err(delimited_text)).parse_next(input)
}

/// A bare atom: everything up to whitespace or a parenthesis.
pub(super) fn bare<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_till(1.., ends_bare).parse_next(input)
}

/// Scan a delimited token from the start of `span`.
///
/// The first character of `span` is the delimiter, whatever it is. The token
/// ends at the next unescaped occurrence of that character. A backslash
/// followed by the delimiter yields the delimiter alone; a backslash followed
/// by anything else is copied through together with that character.
///
/// Returns the number of bytes consumed (both delimiters included) and the
/// text between the delimiters. An empty span consumes nothing and yields an
/// empty token.
///
/// # Errors
///
/// Returns [`ParseError::UnexpectedEnd`] if the span ends before the closing
/// delimiter.
pub fn scan_quoted(span: &str) -> Result<(usize, String), ParseError> {
    if span.is_empty() {
        return Ok((0, String::new()));
    }
    let mut input = span;
    let text = delimited_text
        .parse_next(&mut input)
        .map_err(|_| ParseError::UnexpectedEnd)?;
    Ok((input.offset_from(&span), text))
}

// -- Trailing input ---------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token {
    Open,
    Close,
    Atom,
}

fn token(input: &mut &str) -> ModalResult<Token> {
    alt((
        '('.value(Token::Open),
        ')'.value(Token::Close),
        quoted.value(Token::Atom),
        bare.value(Token::Atom),
    ))
    .parse_next(input)
}

/// Classify what follows a complete root expression.
///
/// A stray `)` or an unterminated quote anywhere in `rest` is reported before
/// the mere presence of leftover text.
pub(super) fn check_trailing(rest: &str) -> Result<(), ParseError> {
    let mut input = rest;
    let mut depth = 0_usize;
    let mut tokens = 0_usize;
    loop {
        ws.parse_next(&mut input)
            .map_err(|_| ParseError::UnexpectedEnd)?;
        if input.is_empty() {
            break;
        }
        match token
            .parse_next(&mut input)
            .map_err(|_| ParseError::UnexpectedEnd)?
        {
            Token::Open => depth += 1,
            Token::Close => {
                depth = depth
                    .checked_sub(1)
                    .ok_or(ParseError::UnmatchedParenthesis)?;
            }
            Token::Atom => {}
        }
        tokens += 1;
    }

    if tokens == 0 {
        Ok(())
    } else {
        Err(ParseError::LeftOverText)
    }
}
