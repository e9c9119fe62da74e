//! Predicate trees and the code they generate.
//!
//! A [`Predicate`] is either a [`Term`], which wraps an opaque fragment of target-language text,
//! or a [`Node`], which applies one of the canonical [`Operator`]s to its operands. Predicates are
//! built bottom-up, and each node computes three things at construction time:
//!
//!   1. The set of free variables it references, which is the union of the sets of its operands.
//!   2. The generated target expression, a stateless boolean expression evaluable at every step.
//!   3. The [`Auxiliary`] variables the expression reads, which are only required by the temporal
//!      operators.
//!
//! The generated expressions follow these rules:
//!
//! | operator         | expression          | auxiliaries              |
//! | ---------------- | ------------------- | ------------------------ |
//! | `!p`             | `!(p)`              | none                     |
//! | `p && q`         | `(p)&&(q)`          | none                     |
//! | `p \|\| q`       | `(p)\|\|(q)`        | none                     |
//! | `p == q`         | `(p)==(q)`          | none                     |
//! | `p != q`         | `(p)!=(q)`          | none                     |
//! | `previously(p)`  | `V`                 | `V`                      |
//! | `since(p, q)`    | `(Q&&P)`            | `Q`, `P`                 |
//!
//! The compiler only names the auxiliary variables. Keeping them up to date is the job of the
//! instrumentation that embeds the expression, following the contract documented on
//! [`AuxiliaryKind`].
//!
//! # Examples
//!
//! ```rust
//! use ptlc_core::{Operator, Predicate, Value};
//! use ptlc_core::names::SequentialNames;
//!
//! let mut names = SequentialNames::new("AUX");
//!
//! let inner = Predicate::new(Operator::Equal, ["a", "b"], &mut names).unwrap();
//! assert_eq!(inner.expression(), "(a)==(b)");
//!
//! let p = Predicate::new(Operator::Since, [Value::from("true"), Value::from(inner)], &mut names).unwrap();
//! assert_eq!(p.expression(), "(AUX_q_0&&AUX_p_since_q_1)");
//! assert_eq!(p.collect_auxiliaries().len(), 2);
//! ```

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use nonempty::NonEmpty;
use thiserror::Error;

use crate::names::NameGenerator;
use crate::operator::{Operator, UnknownOperatorError};
use crate::variables::{free_variables, Variables};

/// Raw operand handed to [`Predicate::new`] before normalization.
///
/// Parsers produce operands in several shapes: plain literals, sequences of token fragments,
/// parenthesized groups, and already constructed predicates. Every shape is normalized into a
/// [`Predicate`] by [`Value::normalize`].
#[derive(Debug, PartialEq)]
pub enum Value {
    Literal(String),
    Sequence(Vec<Value>),
    Grouped(Box<Value>),
    Predicate(Predicate),
}

impl Value {
    pub fn grouped(inner: impl Into<Value>) -> Self {
        Value::Grouped(Box::new(inner.into()))
    }

    /// Convert the value into a predicate.
    ///
    /// A parenthesized predicate is replaced by the predicate itself, so redundant parentheses
    /// never change the generated code. Parentheses around a fragment are kept as part of the
    /// term text. Any other value that is not already a predicate becomes a [`Term`].
    pub fn normalize(self) -> Result<Predicate, InvalidTermError> {
        match self {
            Value::Predicate(predicate) => Ok(predicate),
            Value::Grouped(inner) => match *inner {
                Value::Predicate(predicate) => Ok(predicate),
                other => match other.normalize()? {
                    Predicate::Term(term) => Ok(Predicate::Term(term.parenthesized())),
                    node => Ok(node),
                },
            },
            other => Term::from_value(other).map(Predicate::Term),
        }
    }

    fn flatten(self, text: &mut String) -> Result<(), InvalidTermError> {
        match self {
            Value::Literal(literal) => text.push_str(&literal),
            Value::Sequence(values) => {
                for value in values {
                    value.flatten(text)?;
                }
            }
            Value::Grouped(inner) => {
                text.push('(');
                inner.flatten(text)?;
                text.push(')');
            }
            Value::Predicate(Predicate::Term(term)) => text.push_str(&term.expression),
            Value::Predicate(node) => return Err(InvalidTermError::Composite(node.to_string())),
        }

        Ok(())
    }
}

impl From<&str> for Value {
    fn from(literal: &str) -> Self {
        Value::Literal(literal.to_string())
    }
}

impl From<String> for Value {
    fn from(literal: String) -> Self {
        Value::Literal(literal)
    }
}

impl From<Vec<Value>> for Value {
    fn from(values: Vec<Value>) -> Self {
        Value::Sequence(values)
    }
}

impl From<Predicate> for Value {
    fn from(predicate: Predicate) -> Self {
        Value::Predicate(predicate)
    }
}

impl From<Term> for Value {
    fn from(term: Term) -> Self {
        Value::Predicate(Predicate::Term(term))
    }
}

/// Error produced when a value cannot be turned into a [`Term`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidTermError {
    #[error("Cannot create a term from an empty fragment")]
    Empty,

    #[error("Cannot flatten composite predicate \"{0}\" into a term")]
    Composite(String),
}

/// Error produced while constructing a [`Predicate`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstructionError {
    #[error(transparent)]
    UnknownOperator(#[from] UnknownOperatorError),

    #[error(transparent)]
    InvalidTerm(#[from] InvalidTermError),

    #[error("Operator \"{operator}\" expects {expected} operand(s), found {found}")]
    Arity {
        operator: Operator,
        expected: usize,
        found: usize,
    },
}

impl ConstructionError {
    fn arity(operator: Operator, found: usize) -> Self {
        Self::Arity {
            operator,
            expected: operator.arity(),
            found,
        }
    }
}

/// The role an auxiliary variable plays for the operator that required it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuxiliaryKind {
    /// Holds the value of the `previously` operand at the preceding step.
    ///
    /// Before the predicate is evaluated at step `t`, the variable must be set to the value the
    /// operand had at step `t - 1`.
    Previously,

    /// First variable of a `since(p, q)` node. Together with [`AuxiliaryKind::SinceTrail`] it
    /// must make `(hold && trail)` true at step `t` exactly when `q` held at some step `s <= t`
    /// and `p` held at every step in `(s, t]`.
    SinceHold,

    /// Second variable of a `since(p, q)` node, see [`AuxiliaryKind::SinceHold`].
    SinceTrail,
}

impl AuxiliaryKind {
    /// Tag embedded in the generated name.
    pub fn tag(&self) -> &'static str {
        match self {
            AuxiliaryKind::Previously => "previously",
            AuxiliaryKind::SinceHold => "q",
            AuxiliaryKind::SinceTrail => "p_since_q",
        }
    }

    /// The operator that introduces this kind of variable.
    pub fn operator(&self) -> Operator {
        match self {
            AuxiliaryKind::Previously => Operator::Previously,
            AuxiliaryKind::SinceHold | AuxiliaryKind::SinceTrail => Operator::Since,
        }
    }
}

/// Auxiliary boolean variable that must be declared and maintained by the instrumentation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Auxiliary {
    name: String,
    kind: AuxiliaryKind,
}

impl Auxiliary {
    fn fresh<N>(kind: AuxiliaryKind, names: &mut N) -> Self
    where
        N: NameGenerator + ?Sized,
    {
        Self {
            name: names.fresh(kind.tag()),
            kind,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> AuxiliaryKind {
        self.kind
    }
}

impl Display for Auxiliary {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Leaf predicate holding an opaque target-language expression.
///
/// The expression text never contains whitespace, and its free variables are computed once when
/// the term is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Term {
    expression: String,
    variables: Variables,
}

impl Term {
    /// Create a term from expression text. All whitespace is removed from the text.
    ///
    /// ```rust
    /// use ptlc_core::Term;
    ///
    /// let term = Term::new("balance >= amount").unwrap();
    /// assert_eq!(term.expression(), "balance>=amount");
    /// ```
    pub fn new(text: impl AsRef<str>) -> Result<Self, InvalidTermError> {
        let expression: String = text.as_ref().chars().filter(|c| !c.is_whitespace()).collect();

        if expression.is_empty() {
            return Err(InvalidTermError::Empty);
        }

        let variables = free_variables(&expression);

        Ok(Self { expression, variables })
    }

    /// Create a term by flattening a (possibly nested) value into a single expression.
    pub fn from_value(value: impl Into<Value>) -> Result<Self, InvalidTermError> {
        let mut text = String::new();
        value.into().flatten(&mut text)?;

        Self::new(text)
    }

    fn parenthesized(self) -> Self {
        Self {
            expression: format!("({})", self.expression),
            variables: self.variables,
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }
}

/// Internal predicate node applying an [`Operator`] to its operands.
#[derive(Debug, PartialEq)]
pub struct Node {
    operator: Operator,
    operands: Box<NonEmpty<Predicate>>,
    variables: Variables,
    expression: String,
    auxiliaries: Vec<Auxiliary>,
}

impl Node {
    pub fn operator(&self) -> Operator {
        self.operator
    }

    pub fn operands(&self) -> &NonEmpty<Predicate> {
        &self.operands
    }

    pub fn operand(&self, index: usize) -> Option<&Predicate> {
        self.operands.get(index)
    }
}

fn generate<N>(operator: Operator, operands: &[Predicate], names: &mut N) -> Result<(String, Vec<Auxiliary>), ConstructionError>
where
    N: NameGenerator + ?Sized,
{
    let generated = match (operator, operands) {
        (Operator::Not, [operand]) => (format!("!({})", operand.expression()), Vec::new()),
        (Operator::And | Operator::Or | Operator::Equal | Operator::NotEqual, [left, right]) => {
            let expression = format!("({}){}({})", left.expression(), operator.symbol(), right.expression());
            (expression, Vec::new())
        }
        (Operator::Previously, [_]) => {
            let previous = Auxiliary::fresh(AuxiliaryKind::Previously, names);
            (previous.name.clone(), vec![previous])
        }
        (Operator::Since, [_, _]) => {
            let hold = Auxiliary::fresh(AuxiliaryKind::SinceHold, names);
            let trail = Auxiliary::fresh(AuxiliaryKind::SinceTrail, names);
            (format!("({}&&{})", hold.name, trail.name), vec![hold, trail])
        }
        (operator, operands) => return Err(ConstructionError::arity(operator, operands.len())),
    };

    Ok(generated)
}

/// Boolean-valued formula, either a leaf [`Term`] or an internal [`Node`].
///
/// See the [`predicate`](self) module for the code generation rules.
#[derive(Debug, PartialEq)]
pub enum Predicate {
    Term(Term),
    Node(Node),
}

impl Predicate {
    /// Construct a node applying `operator` to `values`.
    ///
    /// Each value is normalized into a predicate first (see [`Value::normalize`]). Fresh names are
    /// requested from `names` after all operands have been constructed, so the names of a subtree
    /// are always issued before the names of its parent.
    pub fn new<I, N>(operator: Operator, values: I, names: &mut N) -> Result<Self, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
        N: NameGenerator + ?Sized,
    {
        let values: Vec<Value> = values.into_iter().map(Into::into).collect();

        if values.len() != operator.arity() {
            return Err(ConstructionError::arity(operator, values.len()));
        }

        let operands = values
            .into_iter()
            .map(Value::normalize)
            .collect::<Result<Vec<_>, _>>()?;

        let variables = operands
            .iter()
            .flat_map(|operand| operand.variables().iter().cloned())
            .collect();

        let (expression, auxiliaries) = generate(operator, &operands, names)?;
        let found = operands.len();
        let operands = NonEmpty::from_vec(operands)
            .map(Box::new)
            .ok_or_else(|| ConstructionError::arity(operator, found))?;

        Ok(Predicate::Node(Node {
            operator,
            operands,
            variables,
            expression,
            auxiliaries,
        }))
    }

    /// Construct a node from the textual form of its operator.
    ///
    /// ```rust
    /// use ptlc_core::Predicate;
    /// use ptlc_core::names::SequentialNames;
    ///
    /// let mut names = SequentialNames::new("AUX");
    ///
    /// assert!(Predicate::from_symbol("&&", ["a", "b"], &mut names).is_ok());
    /// assert!(Predicate::from_symbol("->", ["a", "b"], &mut names).is_err());
    /// ```
    pub fn from_symbol<I, N>(symbol: &str, values: I, names: &mut N) -> Result<Self, ConstructionError>
    where
        I: IntoIterator,
        I::Item: Into<Value>,
        N: NameGenerator + ?Sized,
    {
        let operator = Operator::from_str(symbol)?;
        Self::new(operator, values, names)
    }

    /// Construct a leaf predicate from expression text.
    pub fn term(text: impl AsRef<str>) -> Result<Self, InvalidTermError> {
        Term::new(text).map(Predicate::Term)
    }

    pub fn is_term(&self) -> bool {
        matches!(self, Predicate::Term(_))
    }

    pub fn as_term(&self) -> Option<&Term> {
        match self {
            Predicate::Term(term) => Some(term),
            Predicate::Node(_) => None,
        }
    }

    pub fn as_node(&self) -> Option<&Node> {
        match self {
            Predicate::Term(_) => None,
            Predicate::Node(node) => Some(node),
        }
    }

    /// The operator of the predicate, or [`None`] for a term.
    pub fn operator(&self) -> Option<Operator> {
        self.as_node().map(Node::operator)
    }

    /// Iterate over the operands of the predicate in order. Terms have no operands.
    pub fn operands(&self) -> impl Iterator<Item = &Predicate> {
        self.as_node().into_iter().flat_map(|node| node.operands.iter())
    }

    /// The free variables referenced anywhere in the predicate.
    pub fn variables(&self) -> &Variables {
        match self {
            Predicate::Term(term) => &term.variables,
            Predicate::Node(node) => &node.variables,
        }
    }

    /// The generated target expression.
    pub fn expression(&self) -> &str {
        match self {
            Predicate::Term(term) => &term.expression,
            Predicate::Node(node) => &node.expression,
        }
    }

    /// The auxiliary variables introduced by this predicate itself, excluding its operands.
    pub fn auxiliaries(&self) -> &[Auxiliary] {
        match self {
            Predicate::Term(_) => &[],
            Predicate::Node(node) => &node.auxiliaries,
        }
    }

    /// All auxiliary variables of the predicate tree, operands before the nodes that contain them.
    pub fn collect_auxiliaries(&self) -> Vec<&Auxiliary> {
        let mut collected = Vec::new();
        self.collect_into(&mut collected);
        collected
    }

    fn collect_into<'a>(&'a self, collected: &mut Vec<&'a Auxiliary>) {
        for operand in self.operands() {
            operand.collect_into(collected);
        }

        collected.extend(self.auxiliaries());
    }
}

impl Display for Predicate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let node = match self {
            Predicate::Term(term) => return f.write_str(&term.expression),
            Predicate::Node(node) => node,
        };

        match (node.operator, node.operands.first(), node.operands.get(1)) {
            (Operator::Not, operand, _) => write!(f, "!({})", operand),
            (Operator::Previously, operand, _) => write!(f, "previously({})", operand),
            (Operator::Since, left, Some(right)) => write!(f, "since({}, {})", left, right),
            (operator, left, Some(right)) => write!(f, "({}) {} ({})", left, operator, right),
            (operator, operand, None) => write!(f, "{}({})", operator, operand),
        }
    }
}
