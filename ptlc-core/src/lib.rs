//! Core types of the `ptlc` past-time temporal predicate compiler.
//!
//! A [`Predicate`] tree is constructed bottom-up from canonical [`Operator`]s and opaque
//! expression fragments ([`Term`]s). While it is being constructed, every node computes its free
//! [`Variables`](variables::Variables), its generated target expression, and the [`Auxiliary`]
//! variables required to evaluate past-time operators as stateless boolean expressions.
//! Auxiliary names are requested from a [`NameGenerator`](names::NameGenerator) supplied by the
//! caller.

pub mod names;
pub mod operator;
pub mod predicate;
pub mod variables;

pub use crate::names::{NameGenerator, NamingConfig, RandomNames, SequentialNames};
pub use crate::operator::{Operator, UnknownOperatorError};
pub use crate::predicate::{
    Auxiliary, AuxiliaryKind, ConstructionError, InvalidTermError, Node, Predicate, Term, Value,
};
pub use crate::variables::{Variables, FALSE_LITERAL, TRUE_LITERAL};
