//! Parse tree produced by the predicate grammar.

use std::fmt::{Display, Formatter};

/// Bracket pair enclosing an opaque group inside a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delimiter {
    Paren,
    Bracket,
}

impl Delimiter {
    pub fn open(&self) -> &'static str {
        match self {
            Self::Paren => "(",
            Self::Bracket => "[",
        }
    }

    pub fn close(&self) -> &'static str {
        match self {
            Self::Paren => ")",
            Self::Bracket => "]",
        }
    }
}

/// Piece of an opaque terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token<'a> {
    Word(&'a str),
    Symbol(&'a str),
    Group(Delimiter, Vec<Token<'a>>),
}

impl<'a> Display for Token<'a> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Word(text) | Self::Symbol(text) => write!(f, "{}", text),
            Self::Group(delimiter, tokens) => {
                write!(f, "{}", delimiter.open())?;

                for token in tokens {
                    write!(f, "{}", token)?;
                }

                write!(f, "{}", delimiter.close())
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Implies,
    Or,
    And,
    Equal,
    NotEqual,
    Since,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    Previously,
    Once,
    Always,
}

/// Node of the parse tree.
///
/// `Grouped` records a parenthesized predicate, which is kept so that the rewriter can tell a
/// parenthesized term `(x > 0)` apart from the bare term `x > 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseNode<'a> {
    Binary {
        left: Box<ParseNode<'a>>,
        op: BinaryOp,
        right: Box<ParseNode<'a>>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<ParseNode<'a>>,
    },
    Terminal(Vec<Token<'a>>),
    Grouped(Box<ParseNode<'a>>),
}

impl<'a> ParseNode<'a> {
    pub fn binary(left: ParseNode<'a>, op: BinaryOp, right: ParseNode<'a>) -> Self {
        Self::Binary {
            left: Box::new(left),
            op,
            right: Box::new(right),
        }
    }

    pub fn unary(op: UnaryOp, operand: ParseNode<'a>) -> Self {
        Self::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn grouped(inner: ParseNode<'a>) -> Self {
        Self::Grouped(Box::new(inner))
    }

    /// Source text of a terminal with all whitespace removed.
    pub fn terminal_text(&self) -> Option<String> {
        match self {
            Self::Terminal(tokens) => Some(tokens.iter().map(Token::to_string).collect()),
            _ => None,
        }
    }
}
