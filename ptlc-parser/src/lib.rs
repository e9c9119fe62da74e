//! Parse past-time temporal predicates from strings into `ptlc` [`Predicate`]s.
//!
//! # Testing
//!
//! Run the parser tests from the workspace root:
//!
//! ```bash
//! cargo test -p ptlc-parser
//! ```
//!
//! # Parsing strings into predicates
//!
//! - **Syntax only**: [`parse`] produces a [`ParseNode`](syntax::ParseNode) tree and reports
//!   malformed input as a [`GrammarError`].
//! - **Predicates**: [`parse_predicate`] additionally rewrites the tree with [`Semantics`] and
//!   constructs a [`Predicate`], drawing auxiliary names from a
//!   [`NameGenerator`](ptlc_core::NameGenerator).
//!
//! Predicates may nest at most [`MAX_DEPTH`] operators or brackets deep. Deeper input is
//! rejected with [`GrammarError::TooDeep`] rather than exhausting the stack.
//!
//! The accepted language is described by [`GRAMMAR`]. Boolean connectives and temporal operators
//! are recognized, everything between them is kept verbatim as opaque terms:
//!
//! ```text
//! since(owner == msg.sender, previously(balance[owner] > 0)) -> !paused
//! ```

mod parser;
mod semantics;
pub mod syntax;

pub use ptlc_core::Predicate;

pub use parser::{parse, CompileError, GrammarError, GRAMMAR, GRAMMAR_VERSION, MAX_DEPTH};
pub use semantics::{parse_predicate, Semantics};
pub use syntax::{BinaryOp, ParseNode, Token, UnaryOp};
