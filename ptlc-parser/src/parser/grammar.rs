use nom::branch::alt;
use nom::combinator::{map, not, value};
use nom::error::ErrorKind;
use nom::multi::many1;
use nom::sequence::{delimited, terminated};
use nom::IResult;

use super::common::{nested, op0, piece, ws};
use super::errors::GrammarError;
use super::operators;
use crate::syntax::{BinaryOp, ParseNode};

/// Human-readable description of the accepted grammar.
pub const GRAMMAR: &str = include_str!("../grammar.ebnf");

/// Version of [`GRAMMAR`]. Changes whenever the accepted language changes.
pub const GRAMMAR_VERSION: &str = "1.0";

fn terminal(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    let mut parser = map(many1(ws(|i| piece(i, depth))), ParseNode::Terminal);
    parser(input)
}

fn grouped(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    // A parenthesis followed by more term pieces opens a term like `(a + b) * c` instead
    let inner = delimited(op0("("), |i| predicate(i, depth), op0(")"));
    let mut parser = map(terminated(inner, not(|i| piece(i, depth))), ParseNode::grouped);

    parser(input)
}

fn primary(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    let mut parser = alt((|i| grouped(i, depth), |i| terminal(i, depth)));
    parser(input)
}

fn temporal(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    let operand = |i| predicate(i, depth);
    let mut parser = alt((
        operators::previously(operand),
        operators::once(operand),
        operators::always(operand),
        operators::since(operand, operand),
    ));

    parser(input)
}

fn unary(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    nested(input, depth)?;

    let mut parser = alt((
        operators::not(|i| unary(i, depth + 1)),
        |i| temporal(i, depth + 1),
        |i| primary(i, depth + 1),
    ));

    parser(input)
}

fn equality(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    let ops = alt((
        value(BinaryOp::Equal, op0("==")),
        value(BinaryOp::NotEqual, op0("!=")),
    ));
    let mut parser = operators::chain(ops, |i| unary(i, depth));

    parser(input)
}

fn conjunction(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    let mut parser = operators::chain(value(BinaryOp::And, op0("&&")), |i| equality(i, depth));
    parser(input)
}

fn disjunction(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    let mut parser = operators::chain(value(BinaryOp::Or, op0("||")), |i| conjunction(i, depth));
    parser(input)
}

/// Parse a predicate whose operators sit `depth` levels below the root.
pub fn predicate(input: &str, depth: usize) -> IResult<&str, ParseNode<'_>> {
    let mut parser = operators::implies(|i| disjunction(i, depth), |i| predicate(i, depth + 1));
    parser(input)
}

/// Parse `text` into a [`ParseNode`] tree, requiring the entire input to be consumed.
///
/// Input nested more than [`MAX_DEPTH`](crate::MAX_DEPTH) levels deep is rejected with
/// [`GrammarError::TooDeep`].
pub fn parse(text: &str) -> Result<ParseNode<'_>, GrammarError> {
    let mut parser = ws(|i| predicate(i, 0));
    let result = match parser(text) {
        Ok((rest, node)) if rest.is_empty() => Ok(node),
        Ok((rest, _)) => Err(GrammarError::incomplete(text, rest)),
        Err(nom::Err::Failure(err)) if err.code == ErrorKind::TooLarge => {
            Err(GrammarError::too_deep(text, err.input))
        }
        Err(nom::Err::Error(err) | nom::Err::Failure(err)) => Err(GrammarError::mismatch(text, err.input)),
        Err(nom::Err::Incomplete(_)) => Err(GrammarError::mismatch(text, "")),
    };

    if let Err(err) = &result {
        log::debug!("rejected predicate \"{}\": {}", text, err);
    }

    result
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::{parse, predicate, terminal, unary};
    use crate::parser::{GrammarError, MAX_DEPTH};
    use crate::syntax::{BinaryOp, Delimiter, ParseNode, Token, UnaryOp};

    fn term(text: &'static str) -> ParseNode<'static> {
        ParseNode::Terminal(vec![Token::Word(text)])
    }

    #[test]
    fn parse_terminal() -> Result<(), Box<dyn Error>> {
        let (rest, value) = terminal("balance[msg.sender] >= amount && x", 0)?;
        let expected = ParseNode::Terminal(vec![
            Token::Word("balance"),
            Token::Group(Delimiter::Bracket, vec![Token::Word("msg.sender")]),
            Token::Symbol(">="),
            Token::Word("amount"),
        ]);

        assert_eq!(rest, "&& x");
        assert_eq!(value, expected);
        assert_eq!(value.terminal_text().as_deref(), Some("balance[msg.sender]>=amount"));

        Ok(())
    }

    #[test]
    fn parse_not() -> Result<(), Box<dyn Error>> {
        let (rest, value) = unary("!x", 0)?;

        assert_eq!(rest, "");
        assert_eq!(value, ParseNode::unary(UnaryOp::Not, term("x")));

        let (rest, value) = unary("! !x", 0)?;

        assert_eq!(rest, "");
        assert_eq!(value, ParseNode::unary(UnaryOp::Not, ParseNode::unary(UnaryOp::Not, term("x"))));

        Ok(())
    }

    #[test]
    fn parse_and() -> Result<(), Box<dyn Error>> {
        let (rest, value) = predicate("a && b && c", 0)?;
        let expected = ParseNode::binary(
            ParseNode::binary(term("a"), BinaryOp::And, term("b")),
            BinaryOp::And,
            term("c"),
        );

        assert_eq!(rest, "");
        assert_eq!(value, expected);

        Ok(())
    }

    #[test]
    fn parse_implies() -> Result<(), Box<dyn Error>> {
        let (rest, value) = predicate("a -> b -> c", 0)?;
        let expected = ParseNode::binary(
            term("a"),
            BinaryOp::Implies,
            ParseNode::binary(term("b"), BinaryOp::Implies, term("c")),
        );

        assert_eq!(rest, "");
        assert_eq!(value, expected);

        Ok(())
    }

    #[test]
    fn parse_precedence() -> Result<(), Box<dyn Error>> {
        let (rest, value) = predicate("a || b && c == d -> e", 0)?;
        let expected = ParseNode::binary(
            ParseNode::binary(
                term("a"),
                BinaryOp::Or,
                ParseNode::binary(
                    term("b"),
                    BinaryOp::And,
                    ParseNode::binary(term("c"), BinaryOp::Equal, term("d")),
                ),
            ),
            BinaryOp::Implies,
            term("e"),
        );

        assert_eq!(rest, "");
        assert_eq!(value, expected);

        Ok(())
    }

    #[test]
    fn parse_equality() -> Result<(), Box<dyn Error>> {
        let (rest, value) = predicate("a != b == c", 0)?;
        let expected = ParseNode::binary(
            ParseNode::binary(term("a"), BinaryOp::NotEqual, term("b")),
            BinaryOp::Equal,
            term("c"),
        );

        assert_eq!(rest, "");
        assert_eq!(value, expected);

        Ok(())
    }

    #[test]
    fn parse_temporal() -> Result<(), Box<dyn Error>> {
        let (rest, value) = unary("previously(x)", 0)?;

        assert_eq!(rest, "");
        assert_eq!(value, ParseNode::unary(UnaryOp::Previously, term("x")));

        let (rest, value) = unary("once ( x )", 0)?;

        assert_eq!(rest, "");
        assert_eq!(value, ParseNode::unary(UnaryOp::Once, term("x")));

        let (rest, value) = unary("always(x)", 0)?;

        assert_eq!(rest, "");
        assert_eq!(value, ParseNode::unary(UnaryOp::Always, term("x")));

        let (rest, value) = unary("since(a && b, c)", 0)?;
        let expected = ParseNode::binary(
            ParseNode::binary(term("a"), BinaryOp::And, term("b")),
            BinaryOp::Since,
            term("c"),
        );

        assert_eq!(rest, "");
        assert_eq!(value, expected);

        Ok(())
    }

    #[test]
    fn parse_grouped() -> Result<(), Box<dyn Error>> {
        let (rest, value) = predicate("(a || b) && c", 0)?;
        let expected = ParseNode::binary(
            ParseNode::grouped(ParseNode::binary(term("a"), BinaryOp::Or, term("b"))),
            BinaryOp::And,
            term("c"),
        );

        assert_eq!(rest, "");
        assert_eq!(value, expected);

        // followed by another piece, the parentheses belong to the term
        let (rest, value) = predicate("(a + b) * c", 0)?;

        assert_eq!(rest, "");
        assert_eq!(value.terminal_text().as_deref(), Some("(a+b)*c"));

        Ok(())
    }

    #[test]
    fn parse_whole_input() -> Result<(), Box<dyn Error>> {
        let node = parse("  previously(x > 0) -> owner == msg.sender  ")?;

        assert!(matches!(node, ParseNode::Binary { op: BinaryOp::Implies, .. }));

        Ok(())
    }

    #[test]
    fn parse_errors() {
        assert!(matches!(parse(""), Err(GrammarError::Mismatch { offset: 0, .. })));
        assert!(matches!(parse("a &&"), Err(GrammarError::Mismatch { .. })));
        assert!(matches!(parse("since(a)"), Err(_)));
        assert!(matches!(parse("x + once(y)"), Err(_)));

        let err = parse("a b) c").unwrap_err();

        assert_eq!(err, GrammarError::Incomplete { offset: 3, fragment: ") c".into() });
        assert_eq!(err.offset(), 3);
        assert_eq!(err.fragment(), ") c");
    }

    #[test]
    fn parse_depth_limit() -> Result<(), Box<dyn Error>> {
        let text = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));

        assert!(matches!(parse(&text)?, ParseNode::Grouped(_)));

        let text = format!("{}x", "!".repeat(MAX_DEPTH));

        assert!(parse(&text).is_ok());

        for text in [
            format!("{}x{}", "(".repeat(500), ")".repeat(500)),
            format!("{}x", "!".repeat(20_000)),
            format!("{}x{}", "previously(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1)),
            format!("a{}", " -> a".repeat(MAX_DEPTH + 1)),
            format!("f{}x{}", "[".repeat(5_000), "]".repeat(5_000)),
        ] {
            assert!(matches!(parse(&text), Err(GrammarError::TooDeep { .. })), "{}", &text[..20]);
        }

        Ok(())
    }
}
