mod common;
mod errors;
mod grammar;
mod operators;

pub use common::MAX_DEPTH;
pub use errors::{CompileError, GrammarError};
pub use grammar::{parse, GRAMMAR, GRAMMAR_VERSION};
