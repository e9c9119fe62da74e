//! The canonical operators a [`Predicate`](crate::Predicate) node can carry.
//!
//! The surface language also contains the derived operators `->`, `once`, and `always`. These
//! never reach a predicate node, because the rewriter expresses them in terms of the operators
//! below before any node is constructed:
//!
//! | derived       | canonical                  |
//! | ------------- | -------------------------- |
//! | `p -> q`      | `!p \|\| q`                |
//! | `once(p)`     | `since(true, p)`           |
//! | `always(p)`   | `!since(true, !p)`         |

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use thiserror::Error;

/// Operator of an internal predicate node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    Not,
    And,
    Or,
    Equal,
    NotEqual,
    Previously,
    Since,
}

impl Operator {
    /// All canonical operators, in no particular order.
    pub const ALL: [Operator; 7] = [
        Operator::Not,
        Operator::And,
        Operator::Or,
        Operator::Equal,
        Operator::NotEqual,
        Operator::Previously,
        Operator::Since,
    ];

    /// The textual form of the operator, which is also the token emitted by code generation for
    /// the propositional operators.
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Not => "!",
            Operator::And => "&&",
            Operator::Or => "||",
            Operator::Equal => "==",
            Operator::NotEqual => "!=",
            Operator::Previously => "previously",
            Operator::Since => "since",
        }
    }

    /// Number of operands a node with this operator must have.
    pub fn arity(&self) -> usize {
        match self {
            Operator::Not | Operator::Previously => 1,
            Operator::And | Operator::Or | Operator::Equal | Operator::NotEqual | Operator::Since => 2,
        }
    }

    /// Returns `true` if evaluating the operator depends on earlier steps, and so requires
    /// auxiliary state.
    pub fn is_temporal(&self) -> bool {
        matches!(self, Operator::Previously | Operator::Since)
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Error produced when looking up an operator that is not part of the canonical set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown operator \"{0}\"")]
pub struct UnknownOperatorError(String);

impl UnknownOperatorError {
    /// The operator text that could not be resolved.
    pub fn operator(&self) -> &str {
        &self.0
    }
}

impl FromStr for Operator {
    type Err = UnknownOperatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operator::ALL
            .into_iter()
            .find(|op| op.symbol() == s)
            .ok_or_else(|| UnknownOperatorError(s.to_string()))
    }
}
