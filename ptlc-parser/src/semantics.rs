//! Rewriting of parse trees into [`Predicate`]s.
//!
//! Derived operators are expanded into the canonical ones while the tree is rewritten:
//!
//! | source           | predicate                          |
//! |------------------|------------------------------------|
//! | `p -> q`         | `Or(Not(p), q)`                    |
//! | `once(p)`        | `Since(true, p)`                   |
//! | `always(p)`      | `Not(Since(true, Not(p)))`         |
//!
//! Operands are rewritten left to right before their parent, so auxiliary names are issued in
//! post-order.

use ptlc_core::variables::identifiers;
use ptlc_core::{ConstructionError, NameGenerator, Operator, Predicate, Value, TRUE_LITERAL};

use crate::parser::{parse, CompileError};
use crate::syntax::{BinaryOp, ParseNode, Token, UnaryOp};

/// Bottom-up rewriter from [`ParseNode`]s to predicate [`Value`]s.
pub struct Semantics<'n, N: ?Sized> {
    names: &'n mut N,
}

impl<'n, N> Semantics<'n, N>
where
    N: NameGenerator + ?Sized,
{
    pub fn new(names: &'n mut N) -> Self {
        Self { names }
    }

    /// Rewrite a parse tree.
    ///
    /// Terminals and parenthesized terminals are returned as unnormalized fragments, every
    /// operator becomes a [`Value::Predicate`].
    pub fn rewrite(&mut self, node: ParseNode<'_>) -> Result<Value, ConstructionError> {
        match node {
            ParseNode::Terminal(tokens) => Ok(Value::Sequence(tokens.into_iter().map(fragment).collect())),
            ParseNode::Grouped(inner) => Ok(Value::grouped(self.rewrite(*inner)?)),
            ParseNode::Unary { op, operand } => {
                let operand = self.rewrite(*operand)?;
                self.unary(op, operand).map(Value::Predicate)
            }
            ParseNode::Binary { left, op, right } => {
                let left = self.rewrite(*left)?;
                let right = self.rewrite(*right)?;
                self.binary(op, left, right).map(Value::Predicate)
            }
        }
    }

    fn node<const K: usize>(&mut self, operator: Operator, values: [Value; K]) -> Result<Predicate, ConstructionError> {
        Predicate::new(operator, values, &mut *self.names)
    }

    fn unary(&mut self, op: UnaryOp, operand: Value) -> Result<Predicate, ConstructionError> {
        match op {
            UnaryOp::Not => self.node(Operator::Not, [operand]),
            UnaryOp::Previously => self.node(Operator::Previously, [operand]),
            UnaryOp::Once => self.node(Operator::Since, [Value::from(TRUE_LITERAL), operand]),
            UnaryOp::Always => {
                let never = self.node(Operator::Not, [operand])?;
                let since = self.node(Operator::Since, [Value::from(TRUE_LITERAL), Value::from(never)])?;
                self.node(Operator::Not, [Value::from(since)])
            }
        }
    }

    fn binary(&mut self, op: BinaryOp, left: Value, right: Value) -> Result<Predicate, ConstructionError> {
        match op {
            BinaryOp::And => self.node(Operator::And, [left, right]),
            BinaryOp::Or => self.node(Operator::Or, [left, right]),
            BinaryOp::Equal => self.node(Operator::Equal, [left, right]),
            BinaryOp::NotEqual => self.node(Operator::NotEqual, [left, right]),
            BinaryOp::Since => self.node(Operator::Since, [left, right]),
            BinaryOp::Implies => {
                let antecedent = self.node(Operator::Not, [left])?;
                self.node(Operator::Or, [Value::from(antecedent), right])
            }
        }
    }
}

fn fragment(token: Token<'_>) -> Value {
    match token {
        Token::Word(text) | Token::Symbol(text) => Value::from(text),
        Token::Group(delimiter, tokens) => {
            let mut values = Vec::with_capacity(tokens.len() + 2);
            values.push(Value::from(delimiter.open()));
            values.extend(tokens.into_iter().map(fragment));
            values.push(Value::from(delimiter.close()));

            Value::Sequence(values)
        }
    }
}

/// Parse `text` and construct the corresponding [`Predicate`].
///
/// Auxiliary names are drawn from `names`. Every identifier appearing in `text` is reserved with
/// `names` before the first auxiliary is issued, so an auxiliary never shadows a source variable.
/// A predicate without any operator is returned as a [`Predicate::Term`].
///
/// ```rust
/// use ptlc_core::names::SequentialNames;
/// use ptlc_parser::parse_predicate;
///
/// let mut names = SequentialNames::new("AUX");
/// let p = parse_predicate("once(x > 0)", &mut names).unwrap();
///
/// assert_eq!(p.expression(), "(AUX_q_0&&AUX_p_since_q_1)");
/// ```
pub fn parse_predicate<N>(text: &str, names: &mut N) -> Result<Predicate, CompileError>
where
    N: NameGenerator + ?Sized,
{
    let tree = parse(text)?;

    for identifier in identifiers(text) {
        names.reserve(identifier);
    }

    let value = Semantics::new(names).rewrite(tree)?;
    let predicate = value.normalize()?;

    log::debug!("parsed \"{}\" as {}", text, predicate);

    Ok(predicate)
}
