//! Free variable extraction for opaque expression fragments.
//!
//! A [`Term`](crate::Term) holds target-language text that the compiler never interprets. The
//! variables it references are recovered by scanning the text for identifier-shaped substrings:
//! a maximal run of letters, digits, underscores, and dots that contains at least one letter.
//! The boolean literals `true` and `false` are never reported.
//!
//! The scan is approximate. Numeric literals that contain a letter (`1e18`, `0xff`, `10ether`)
//! are reported as variables, and member accesses such as `msg.sender` are reported as a single
//! dotted name. Downstream consumers rely on this exact behavior, so it is kept as is.
//!
//! ```rust
//! use ptlc_core::variables::free_variables;
//!
//! let vars = free_variables("balance[msg.sender]>=amount&&true");
//! let names: Vec<&str> = vars.iter().map(String::as_str).collect();
//!
//! assert_eq!(names, ["amount", "balance", "msg.sender"]);
//! ```

use std::collections::BTreeSet;

use once_cell::sync::Lazy;
use regex::Regex;

/// Deduplicated set of variable names referenced by a predicate.
pub type Variables = BTreeSet<String>;

pub const TRUE_LITERAL: &str = "true";
pub const FALSE_LITERAL: &str = "false";

static IDENTIFIER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z0-9_.]*?[a-zA-Z][a-zA-Z0-9_.]*").expect("identifier pattern is valid"));

/// Returns `true` if the text is one of the boolean literals.
pub fn is_boolean_literal(text: &str) -> bool {
    text == TRUE_LITERAL || text == FALSE_LITERAL
}

/// Iterate over the identifier-shaped substrings of `text`, boolean literals excluded.
///
/// Matches are produced left to right and may repeat.
pub fn identifiers(text: &str) -> impl Iterator<Item = &str> {
    IDENTIFIER
        .find_iter(text)
        .map(|m| m.as_str())
        .filter(|name| !is_boolean_literal(name))
}

/// Collect the set of free variables referenced by `text`.
pub fn free_variables(text: &str) -> Variables {
    identifiers(text).map(str::to_string).collect()
}
