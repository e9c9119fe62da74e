use nom::character::complete::char;
use nom::combinator::recognize;
use nom::sequence::{preceded, terminated, tuple};
use nom::{IResult, Parser};

use super::common::{keyword, op0, ws};
use crate::syntax::{BinaryOp, ParseNode, UnaryOp};

/// Prefix operator followed directly by its operand, like `!p`.
fn prefixop<'a, O, S, T, F, U>(mut op: O, mut subparser: S, func: F) -> impl FnMut(&'a str) -> IResult<&'a str, U>
where
    O: Parser<&'a str, &'a str, nom::error::Error<&'a str>>,
    S: Parser<&'a str, T, nom::error::Error<&'a str>>,
    F: Fn(T) -> U,
{
    move |input: &'a str| {
        let (next, _) = op.parse(input)?;
        let (rest, subformula) = subparser.parse(next)?;

        Ok((rest, func(subformula)))
    }
}

/// Keyword applied to a single parenthesized operand, like `previously(p)`.
fn unaryop<'a, S, T, F, U>(name: &'a str, mut subparser: S, func: F) -> impl FnMut(&'a str) -> IResult<&'a str, U>
where
    S: Parser<&'a str, T, nom::error::Error<&'a str>>,
    F: Fn(T) -> U,
{
    let mut open = tuple((ws(keyword(name)), op0("(")));
    let mut close = op0(")");

    move |input: &'a str| {
        let (next, _) = open.parse(input)?;
        let (next, subformula) = subparser.parse(next)?;
        let (rest, _) = close.parse(next)?;

        Ok((rest, func(subformula)))
    }
}

/// Keyword applied to two parenthesized operands separated by a comma, like `since(p, q)`.
fn binop<'a, P1, L, P2, R, F, T>(
    name: &'a str,
    mut left_parser: P1,
    mut right_parser: P2,
    func: F,
) -> impl FnMut(&'a str) -> IResult<&'a str, T>
where
    P1: Parser<&'a str, L, nom::error::Error<&'a str>>,
    P2: Parser<&'a str, R, nom::error::Error<&'a str>>,
    F: Fn(L, R) -> T,
{
    let mut open = tuple((ws(keyword(name)), op0("(")));
    let mut comma = op0(",");
    let mut close = op0(")");

    move |input: &'a str| {
        let (next, _) = open.parse(input)?;
        let (next, left) = left_parser.parse(next)?;
        let (next, _) = comma.parse(next)?;
        let (next, right) = right_parser.parse(next)?;
        let (rest, _) = close.parse(next)?;

        Ok((rest, func(left, right)))
    }
}

/// Left-associative chain of infix operators, like `a && b && c`.
pub fn chain<'a, O, P>(mut operator: O, mut operand: P) -> impl FnMut(&'a str) -> IResult<&'a str, ParseNode<'a>>
where
    O: Parser<&'a str, BinaryOp, nom::error::Error<&'a str>>,
    P: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
{
    move |input: &'a str| {
        let (mut rest, mut left) = operand.parse(input)?;

        loop {
            match operator.parse(rest) {
                Ok((next, op)) => {
                    let (next, right) = operand.parse(next)?;
                    left = ParseNode::binary(left, op, right);
                    rest = next;
                }
                Err(nom::Err::Error(_)) => return Ok((rest, left)),
                Err(err) => return Err(err),
            }
        }
    }
}

pub fn not<'a, S>(subparser: S) -> impl FnMut(&'a str) -> IResult<&'a str, ParseNode<'a>>
where
    S: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
{
    // `!` is not negation when it starts `!=`
    let bang = recognize(ws(terminated(char('!'), nom::combinator::not(char('=')))));

    prefixop(bang, subparser, |operand: ParseNode<'a>| ParseNode::unary(UnaryOp::Not, operand))
}

pub fn previously<'a, S>(subparser: S) -> impl FnMut(&'a str) -> IResult<&'a str, ParseNode<'a>>
where
    S: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
{
    unaryop("previously", subparser, |operand: ParseNode<'a>| ParseNode::unary(UnaryOp::Previously, operand))
}

pub fn once<'a, S>(subparser: S) -> impl FnMut(&'a str) -> IResult<&'a str, ParseNode<'a>>
where
    S: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
{
    unaryop("once", subparser, |operand: ParseNode<'a>| ParseNode::unary(UnaryOp::Once, operand))
}

pub fn always<'a, S>(subparser: S) -> impl FnMut(&'a str) -> IResult<&'a str, ParseNode<'a>>
where
    S: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
{
    unaryop("always", subparser, |operand: ParseNode<'a>| ParseNode::unary(UnaryOp::Always, operand))
}

pub fn since<'a, P1, P2>(left_parser: P1, right_parser: P2) -> impl FnMut(&'a str) -> IResult<&'a str, ParseNode<'a>>
where
    P1: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
    P2: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
{
    binop("since", left_parser, right_parser, |left: ParseNode<'a>, right: ParseNode<'a>| {
        ParseNode::binary(left, BinaryOp::Since, right)
    })
}

/// Right-associative implication, `a -> b -> c` reads as `a -> (b -> c)`.
pub fn implies<'a, P1, P2>(mut left_parser: P1, right_parser: P2) -> impl FnMut(&'a str) -> IResult<&'a str, ParseNode<'a>>
where
    P1: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
    P2: Parser<&'a str, ParseNode<'a>, nom::error::Error<&'a str>>,
{
    let mut right_parser = preceded(op0("->"), right_parser);

    move |input: &'a str| {
        let (next, left) = left_parser.parse(input)?;

        match right_parser.parse(next) {
            Ok((rest, right)) => Ok((rest, ParseNode::binary(left, BinaryOp::Implies, right))),
            Err(nom::Err::Error(_)) => Ok((next, left)),
            Err(err) => Err(err),
        }
    }
}

