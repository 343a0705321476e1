use derive_more::{Display, Error};

mod node;
mod parser;
mod tree;

pub use node::*;
pub use tree::*;

/// The reason why parsing a [`Tree`] failed.
#[derive(Debug, Display, Clone, Eq, PartialEq, Error)]
pub enum ParseSgfError {
    #[display(fmt = "the collection contains no game")]
    Empty,
    #[display(fmt = "unexpected end of input")]
    UnexpectedEof,
    #[display(fmt = "unexpected `{}` at byte {}", found, at)]
    Unexpected { found: char, at: usize },
}
