//! Grammars for the typed literals: numbers, versions and timestamps.

use winnow::combinator::{alt, opt, separated};
use winnow::error::{ContextError, ErrMode, ModalResult};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::types::{Timestamp, Value, Version};

fn digits<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    take_while(1.., |c: char| c.is_ascii_digit()).parse_next(input)
}

fn fixed_digits<'i>(count: usize) -> impl Parser<&'i str, u32, ErrMode<ContextError>> {
    take_while(count, |c: char| c.is_ascii_digit()).try_map(|s: &str| s.parse::<u32>())
}

// -- Numbers ----------------------------------------------------------------

fn number_text<'i>(input: &mut &'i str) -> ModalResult<&'i str> {
    (
        opt(one_of(['+', '-'])),
        alt((
            (digits, opt(('.', opt(digits)))).void(),
            ('.', digits).void(),
        )),
        opt((one_of(['e', 'E']), opt(one_of(['+', '-'])), digits)),
    )
        .take()
        .parse_next(input)
}

/// Read `text` as a numeric literal.
///
/// Integers that fit in an `i64` stay integers; everything else numeric
/// becomes a float. Words such as `inf` or `nan` are not numbers here.
pub(crate) fn number(text: &str) -> Option<Value> {
    let text = number_text.parse(text).ok()?;
    if let Ok(i) = text.parse::<i64>() {
        return Some(Value::Int(i));
    }
    text.parse::<f64>().ok().map(Value::Float)
}

// -- Versions ---------------------------------------------------------------

fn version_components(input: &mut &str) -> ModalResult<Vec<u64>> {
    separated(1.., digits.try_map(|s: &str| s.parse::<u64>()), '.').parse_next(input)
}

/// Read a dotted version such as `2.7.1` or `2.7.1.9999`.
pub(crate) fn version(text: &str) -> Option<Version> {
    version_components.parse(text).ok().map(Version::new)
}

// -- Timestamps -------------------------------------------------------------

fn timestamp_fields(input: &mut &str) -> ModalResult<Option<Timestamp>> {
    (
        fixed_digits(4),
        '-',
        fixed_digits(2),
        '-',
        fixed_digits(2),
        ' ',
        fixed_digits(2),
        ':',
        fixed_digits(2),
        ':',
        fixed_digits(2),
    )
        .map(|(year, _, month, _, day, _, hour, _, minute, _, second)| {
            Timestamp::from_fields(year, month, day, hour, minute, second)
        })
        .parse_next(input)
}

/// Read a `YYYY-MM-DD HH:MM:SS` timestamp. Out-of-range fields are rejected.
pub(crate) fn timestamp(text: &str) -> Option<Timestamp> {
    timestamp_fields.parse(text).ok().flatten()
}
