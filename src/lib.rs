#![deny(clippy::all)]

//! Compile past-time temporal predicates into stateless boolean expressions.
//!
//! Runtime checks of program behavior are often phrased in terms of the past: _the owner has
//! approved the transfer at some point since the contract was unpaused_, or _the balance was
//! positive in the previous state_. A boolean expression evaluated in the current state cannot
//! answer such questions on its own. `ptlc` rewrites each past-time operator into a read of an
//! auxiliary variable, so that the predicate becomes a plain boolean expression over the program
//! variables and a handful of auxiliaries that are maintained alongside the program.
//!
//! | operator      | generated expression | auxiliaries                   |
//! |---------------|----------------------|-------------------------------|
//! | `previously(p)` | `P`                | `P`: value of `p` in the previous state |
//! | `since(p, q)` | `(Q&&S)`             | `Q`: `q` held at some point, `S`: `p` held at every point after it |
//! | `once(p)`     | as `since(true, p)`  |                               |
//! | `always(p)`   | as `!since(true, !p)` |                              |
//!
//! Everything that is not a boolean connective or temporal operator is an opaque term, which is
//! copied into the output with its whitespace removed.
//!
//! # Examples
//!
//! ```rust
//! use ptlc::{Compiler, SequentialNames};
//!
//! let mut compiler = Compiler::with_names(SequentialNames::new("AUX"));
//! let compilation = compiler.compile("previously(x > 0) -> y").unwrap();
//!
//! assert_eq!(compilation.expression(), "(!(AUX_previously_0))||(y)");
//! assert_eq!(compilation.auxiliaries().len(), 1);
//!
//! let vars: Vec<&str> = compilation.variables().iter().map(String::as_str).collect();
//! assert_eq!(vars, ["x", "y"]);
//! ```
//!
//! Auxiliary names are randomized by default, which keeps the names of independent compilations
//! apart:
//!
//! ```rust
//! let compilation = ptlc::compile("once(paused)").unwrap();
//!
//! assert!(compilation.expression().starts_with("(PTLC_q_"));
//! ```

extern crate ptlc_core as core;

#[cfg(feature = "parser")]
mod compiler;

#[doc(inline)]
pub use core::{names, operator, predicate, variables};

#[doc(inline)]
pub use core::{
    Auxiliary, AuxiliaryKind, ConstructionError, NameGenerator, NamingConfig, Operator, Predicate, RandomNames,
    SequentialNames, Term, Value, Variables,
};

#[cfg(feature = "parser")]
#[doc(inline)]
pub use ptlc_parser::{
    parse, parse_predicate, CompileError, GrammarError, GRAMMAR, GRAMMAR_VERSION, MAX_DEPTH,
};

#[cfg(feature = "parser")]
pub use crate::compiler::{compile, Compilation, Compiler};
