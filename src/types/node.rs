use std::fmt;

use crate::parse::literal;

use super::Value;

/// A leaf of the expression tree.
///
/// Whether a bare atom reads as a number is settled once, when the atom is
/// built; everything else about it is decided at evaluation time.
#[derive(Debug, Clone)]
pub struct Atom {
    text: String,
    quoted: bool,
    literal: Option<Value>,
}

impl Atom {
    pub(crate) fn bare(text: impl Into<String>) -> Self {
        let text = text.into();
        let literal = literal::number(&text);
        Self {
            text,
            quoted: false,
            literal,
        }
    }

    pub(crate) fn quoted(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            literal: Some(Value::String(text.clone())),
            text,
            quoted: true,
        }
    }

    /// The raw text, with quotes stripped and escapes processed.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Whether the atom was quote-delimited in the source.
    #[must_use]
    pub fn is_quoted(&self) -> bool {
        self.quoted
    }

    /// The value the atom stands for on its own: a string for a quoted atom,
    /// a number for a numeric bare atom.
    #[must_use]
    pub fn literal(&self) -> Option<&Value> {
        self.literal.as_ref()
    }

    /// The numeric value of a bare atom that reads as a number.
    #[must_use]
    pub fn number(&self) -> Option<&Value> {
        if self.quoted {
            None
        } else {
            self.literal.as_ref()
        }
    }

    /// A bare, non-numeric atom: a function name or a variable reference.
    #[must_use]
    pub fn is_symbol(&self) -> bool {
        self.literal.is_none()
    }
}

// The cached literal is derived from the text, so it takes no part.
impl PartialEq for Atom {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text && self.quoted == other.quoted
    }
}

impl Eq for Atom {}

/// A node of the expression tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Atom(Atom),
    List(Vec<Node>),
}

impl Node {
    /// The head symbol of a list node, if this node is a call.
    #[must_use]
    pub fn head_symbol(&self) -> Option<&str> {
        match self {
            Node::List(children) => match children.first() {
                Some(Node::Atom(atom)) if atom.is_symbol() => Some(atom.text()),
                _ => None,
            },
            Node::Atom(_) => None,
        }
    }
}

/// Whether `text` can be written between `delimiter`s and read back as is.
///
/// Escapes only ever apply to the delimiter, so a backslash directly before
/// the delimiter, or at the very end, has no spelling.
fn fits(text: &str, delimiter: char) -> bool {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            match chars.next() {
                Some(next) if next != delimiter => {}
                _ => return false,
            }
        }
    }
    true
}

fn write_quoted(f: &mut fmt::Formatter<'_>, text: &str, delimiter: char) -> fmt::Result {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(delimiter);
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            out.push(c);
            if let Some(next) = chars.next() {
                out.push(next);
            }
        } else {
            if c == delimiter {
                out.push('\\');
            }
            out.push(c);
        }
    }
    out.push(delimiter);
    f.write_str(&out)
}

impl fmt::Display for Atom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.quoted {
            return f.write_str(&self.text);
        }
        // Text read between one kind of quote always fits that kind again.
        let delimiter = if fits(&self.text, '"') { '"' } else { '\'' };
        write_quoted(f, &self.text, delimiter)
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Atom(atom) => write!(f, "{atom}"),
            Node::List(children) => {
                f.write_str("(")?;
                for (i, child) in children.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{child}")?;
                }
                f.write_str(")")
            }
        }
    }
}
