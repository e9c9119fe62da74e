use std::collections::HashSet;
use std::error::Error;

use rand::rngs::StdRng;
use rand::SeedableRng;

use ptlc::{
    AuxiliaryKind, CompileError, Compiler, GrammarError, NamingConfig, Operator, RandomNames, SequentialNames,
};

fn sequential() -> Compiler<SequentialNames> {
    Compiler::with_names(SequentialNames::new("AUX"))
}

fn expression(text: &str) -> Result<String, Box<dyn Error>> {
    let compilation = sequential().compile(text)?;
    Ok(compilation.expression().to_string())
}

fn variables(text: &str) -> Result<Vec<String>, Box<dyn Error>> {
    let compilation = sequential().compile(text)?;
    Ok(compilation.variables().iter().cloned().collect())
}

#[test]
fn equality() -> Result<(), Box<dyn Error>> {
    let compilation = sequential().compile("a == b")?;

    assert_eq!(compilation.expression(), "(a)==(b)");
    assert_eq!(compilation.predicate().operator(), Some(Operator::Equal));
    assert!(compilation.auxiliaries().is_empty());
    assert_eq!(variables("a == b")?, ["a", "b"]);

    Ok(())
}

#[test]
fn negation() -> Result<(), Box<dyn Error>> {
    assert_eq!(expression("!x")?, "!(x)");
    assert_eq!(expression("a != b")?, "(a)!=(b)");
    assert_eq!(variables("!x")?, ["x"]);

    Ok(())
}

#[test]
fn previously() -> Result<(), Box<dyn Error>> {
    let compilation = Compiler::new().compile("previously(x > 0)")?;
    let auxiliaries = compilation.auxiliaries();

    assert_eq!(auxiliaries.len(), 1);
    assert_eq!(auxiliaries[0].kind(), AuxiliaryKind::Previously);
    assert_eq!(compilation.expression(), auxiliaries[0].name());
    assert_eq!(variables("previously(x > 0)")?, ["x"]);

    Ok(())
}

#[test]
fn once_is_since_true() -> Result<(), Box<dyn Error>> {
    let once = sequential().compile("once(x)")?;
    let since = sequential().compile("since(true, x)")?;

    assert_eq!(once.expression(), "(AUX_q_0&&AUX_p_since_q_1)");
    assert_eq!(once.expression(), since.expression());
    assert_eq!(once.variables(), since.variables());

    Ok(())
}

#[test]
fn implication_is_disjunction() -> Result<(), Box<dyn Error>> {
    assert_eq!(expression("x -> y")?, "(!(x))||(y)");
    assert_eq!(expression("x -> y")?, expression("!x || y")?);

    Ok(())
}

#[test]
fn always_is_negated_since() -> Result<(), Box<dyn Error>> {
    assert_eq!(expression("always(x)")?, "!((AUX_q_0&&AUX_p_since_q_1))");
    assert_eq!(expression("always(x)")?, expression("!since(true, !x)")?);
    assert_eq!(variables("always(x)")?, ["x"]);

    Ok(())
}

#[test]
fn redundant_parentheses() -> Result<(), Box<dyn Error>> {
    for (plain, parenthesized) in [
        ("a && b", "(a && b)"),
        ("a && b", "((a && b))"),
        ("previously(a) || b && c", "(previously(a)) || (b && c)"),
        ("since(a == b, c)", "since(((a == b)), c)"),
    ] {
        assert_eq!(expression(plain)?, expression(parenthesized)?, "{}", parenthesized);
        assert_eq!(variables(plain)?, variables(parenthesized)?, "{}", parenthesized);
    }

    Ok(())
}

#[test]
fn variables_are_union_of_operands() -> Result<(), Box<dyn Error>> {
    let vars = variables("since(owner == msg.sender, previously(balance[owner] > limit)) || true")?;

    assert_eq!(vars, ["balance", "limit", "msg.sender", "owner"]);
    assert!(variables("true && !false")?.is_empty());

    Ok(())
}

#[test]
fn auxiliary_counts() -> Result<(), Box<dyn Error>> {
    let compilation = sequential().compile("since(previously(a), once(b)) && always(c)")?;
    let kinds: Vec<AuxiliaryKind> = compilation.auxiliaries().iter().map(|aux| aux.kind()).collect();

    assert_eq!(
        kinds,
        [
            AuxiliaryKind::Previously,
            AuxiliaryKind::SinceHold,
            AuxiliaryKind::SinceTrail,
            AuxiliaryKind::SinceHold,
            AuxiliaryKind::SinceTrail,
            AuxiliaryKind::SinceHold,
            AuxiliaryKind::SinceTrail,
        ]
    );

    Ok(())
}

#[test]
fn names_are_unique_across_compilations() -> Result<(), Box<dyn Error>> {
    let mut compiler = Compiler::new();
    let mut seen = HashSet::new();

    for _ in 0..300 {
        let compilation = compiler.compile("always(previously(x) -> once(y))")?;

        for aux in compilation.auxiliaries() {
            assert!(seen.insert(aux.name().to_string()), "duplicate name {}", aux.name());
        }
    }

    assert_eq!(seen.len(), 300 * 5);

    Ok(())
}

#[test]
fn configured_names() -> Result<(), Box<dyn Error>> {
    let config = NamingConfig {
        prefix: "monitor".into(),
        suffix_length: 4,
    };
    let compilation = Compiler::from_config(&config).compile("previously(x)")?;
    let suffix = compilation
        .expression()
        .strip_prefix("monitor_previously_")
        .ok_or("missing prefix")?;

    assert_eq!(suffix.len(), 4);

    Ok(())
}

#[test]
fn seeded_compilers_agree() -> Result<(), Box<dyn Error>> {
    let mut c1 = Compiler::with_names(RandomNames::seeded(NamingConfig::default(), 11));
    let mut c2 = Compiler::with_names(RandomNames::seeded(NamingConfig::default(), 11));
    let mut c3 = Compiler::with_names(RandomNames::with_rng(NamingConfig::default(), StdRng::seed_from_u64(11)));

    let text = "always(x) || since(y, z)";
    let expected = c1.compile(text)?;

    assert_eq!(expected, c2.compile(text)?);
    assert!(c3.compile(text)?.expression().starts_with("(!((PTLC_q_"));

    Ok(())
}

#[test]
fn grammar_errors() {
    assert!(ptlc::compile("").is_err());
    assert!(ptlc::compile("previously()").is_err());
    assert!(ptlc::compile("since(a b)").is_err());
    assert!(ptlc::compile("a && || b").is_err());
    assert!(ptlc::compile("x + always(y)").is_err());
}

#[test]
fn deep_nesting_is_an_error() -> Result<(), Box<dyn Error>> {
    let limit = ptlc::MAX_DEPTH;
    let nested = format!("{}previously(x){}", "(".repeat(limit - 1), ")".repeat(limit - 1));

    assert_eq!(ptlc::compile(&nested)?.auxiliaries().len(), 1);

    let parens = format!("{}x{}", "(".repeat(500), ")".repeat(500));
    let negations = format!("{}x", "!".repeat(20_000));

    for text in [parens, negations] {
        match ptlc::compile(&text) {
            Err(CompileError::Grammar(GrammarError::TooDeep { .. })) => {}
            other => panic!("expected a nesting error, got {:?}", other.map(|c| c.expression().len())),
        }
    }

    Ok(())
}
