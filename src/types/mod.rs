mod error;
mod expression;
mod node;
mod params;
mod timestamp;
mod value;
mod version;

pub use error::{EvalError, FunctionError};
pub use expression::Expression;
pub use node::{Atom, Node};
pub use params::{MapParams, Params};
pub use timestamp::{InvalidTimestamp, Timestamp};
pub use value::{CompareOp, Value};
pub use version::{InvalidVersion, Version};
