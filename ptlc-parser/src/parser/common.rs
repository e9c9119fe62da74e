use nom::branch::alt;
use nom::bytes::complete::{tag, take_while1};
use nom::character::complete::{char, multispace0, satisfy};
use nom::combinator::{map, not, verify};
use nom::error::ErrorKind;
use nom::multi::many0;
use nom::sequence::{delimited, preceded, terminated};
use nom::{IResult, Parser};

use crate::syntax::{Delimiter, Token};

/// Words that introduce a temporal operator and can never appear inside a terminal.
pub const KEYWORDS: [&str; 4] = ["previously", "once", "always", "since"];

/// Deepest nesting of operators, parentheses and brackets accepted by the grammar.
///
/// Every prefix operator, temporal operator, implication, and bracket pair opens one level.
pub const MAX_DEPTH: usize = 100;

/// Fail without backtracking once `depth` exceeds [`MAX_DEPTH`].
pub fn nested(input: &str, depth: usize) -> Result<(), nom::Err<nom::error::Error<&str>>> {
    if depth > MAX_DEPTH {
        return Err(nom::Err::Failure(nom::error::Error::new(input, ErrorKind::TooLarge)));
    }

    Ok(())
}

pub fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '.'
}

pub fn ws<'a, P, O>(parser: P) -> impl FnMut(&'a str) -> IResult<&'a str, O>
where
    P: Parser<&'a str, O, nom::error::Error<&'a str>>,
{
    delimited(multispace0, parser, multispace0)
}

pub fn op0<'a>(op: &'a str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| -> IResult<&'a str, &'a str> {
        let mut parser = delimited(multispace0, tag(op), multispace0);
        parser(input)
    }
}

/// Match `kw` only when it is not the prefix of a longer word.
pub fn keyword<'a>(kw: &'a str) -> impl FnMut(&'a str) -> IResult<&'a str, &'a str> {
    move |input: &'a str| -> IResult<&'a str, &'a str> {
        let mut parser = terminated(tag(kw), not(satisfy(is_word_char)));
        parser(input)
    }
}

pub fn word(input: &str) -> IResult<&str, &str> {
    let mut parser = verify(take_while1(is_word_char), |w: &str| !KEYWORDS.contains(&w));
    parser(input)
}

/// Operator symbols allowed between the words of a terminal.
///
/// `-`, `&` and `|` are rejected when they begin one of the connectives `->`, `&&` and `||`.
pub fn symbol(input: &str) -> IResult<&str, &str> {
    let mut parser = alt((
        tag("<<"),
        tag(">>"),
        tag("<="),
        tag(">="),
        tag("**"),
        tag("<"),
        tag(">"),
        tag("+"),
        terminated(tag("-"), not(char('>'))),
        tag("*"),
        tag("/"),
        tag("%"),
        tag("^"),
        terminated(tag("&"), not(char('&'))),
        terminated(tag("|"), not(char('|'))),
        tag("~"),
    ));

    parser(input)
}

/// Symbols allowed inside a bracketed group, where connectives lose their meaning.
fn group_symbol(input: &str) -> IResult<&str, &str> {
    let mut parser = alt((
        tag("&&"),
        tag("||"),
        tag("=="),
        tag("!="),
        tag("->"),
        symbol,
        tag("!"),
        tag(","),
        tag("?"),
        tag(":"),
        tag("="),
    ));

    parser(input)
}

fn group_token(input: &str, depth: usize) -> IResult<&str, Token<'_>> {
    let mut parser = alt((
        |i| group(i, depth),
        map(word, Token::Word),
        map(group_symbol, Token::Symbol),
    ));

    parser(input)
}

fn delimited_group<'a>(delimiter: Delimiter, depth: usize) -> impl FnMut(&'a str) -> IResult<&'a str, Token<'a>> {
    move |input: &'a str| {
        let (open, close) = match delimiter {
            Delimiter::Paren => ('(', ')'),
            Delimiter::Bracket => ('[', ']'),
        };

        if !input.starts_with(open) {
            return Err(nom::Err::Error(nom::error::Error::new(input, ErrorKind::Char)));
        }

        nested(input, depth)?;

        let tokens = many0(ws(|i| group_token(i, depth + 1)));
        let mut parser = delimited(char(open), tokens, preceded(multispace0, char(close)));
        let (rest, tokens) = parser(input)?;

        Ok((rest, Token::Group(delimiter, tokens)))
    }
}

/// Bracketed run of tokens that is copied into a terminal without interpretation.
pub fn group(input: &str, depth: usize) -> IResult<&str, Token<'_>> {
    let mut parser = alt((
        delimited_group(Delimiter::Paren, depth),
        delimited_group(Delimiter::Bracket, depth),
    ));

    parser(input)
}

pub fn piece(input: &str, depth: usize) -> IResult<&str, Token<'_>> {
    let mut parser = alt((
        |i| group(i, depth),
        map(word, Token::Word),
        map(symbol, Token::Symbol),
    ));

    parser(input)
}
