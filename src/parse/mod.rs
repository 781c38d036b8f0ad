//! Text to tree: the scanner and the recursive S-expression parser.

mod error;
pub(crate) mod literal;
mod parser;
mod scanner;

pub use error::ParseError;
pub use scanner::scan_quoted;

pub(crate) use parser::parse_tree;
