use std::fmt::{Display, Formatter};

use ptlc_parser::{parse_predicate, CompileError};

use crate::core::{Auxiliary, NameGenerator, NamingConfig, Predicate, RandomNames, Variables};

/// Result of compiling a single predicate.
#[derive(Debug, PartialEq)]
pub struct Compilation {
    source: String,
    predicate: Predicate,
    auxiliaries: Vec<Auxiliary>,
}

impl Compilation {
    /// Predicate text as it was given to the compiler.
    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn predicate(&self) -> &Predicate {
        &self.predicate
    }

    /// Generated boolean expression.
    pub fn expression(&self) -> &str {
        self.predicate.expression()
    }

    /// Free variables of the source predicate. Auxiliaries are not included.
    pub fn variables(&self) -> &Variables {
        self.predicate.variables()
    }

    /// Every auxiliary variable the expression depends on, innermost operators first.
    pub fn auxiliaries(&self) -> &[Auxiliary] {
        &self.auxiliaries
    }

    pub fn into_predicate(self) -> Predicate {
        self.predicate
    }
}

impl Display for Compilation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} => {}", self.source, self.expression())
    }
}

/// Compiles predicate text, drawing auxiliary names from a single [`NameGenerator`].
///
/// All predicates compiled by the same compiler receive distinct auxiliary names. Identifiers
/// appearing in the source text stay reserved for the lifetime of the compiler, so an auxiliary
/// can never shadow a program variable of any predicate compiled before it.
#[derive(Debug)]
pub struct Compiler<N = RandomNames> {
    names: N,
}

impl Compiler<RandomNames> {
    pub fn new() -> Self {
        Self::with_names(RandomNames::new())
    }

    pub fn from_config(config: &NamingConfig) -> Self {
        Self::with_names(RandomNames::from_config(config.clone()))
    }
}

impl Default for Compiler<RandomNames> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N> Compiler<N>
where
    N: NameGenerator,
{
    pub fn with_names(names: N) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &N {
        &self.names
    }

    pub fn into_names(self) -> N {
        self.names
    }

    pub fn compile(&mut self, text: &str) -> Result<Compilation, CompileError> {
        let predicate = parse_predicate(text, &mut self.names)?;
        let auxiliaries: Vec<Auxiliary> = predicate.collect_auxiliaries().into_iter().cloned().collect();

        log::debug!(
            "compiled \"{}\" into \"{}\" with {} auxiliaries",
            text,
            predicate.expression(),
            auxiliaries.len()
        );

        Ok(Compilation {
            source: text.to_string(),
            predicate,
            auxiliaries,
        })
    }

    /// Compile a batch of predicates, stopping at the first failure.
    pub fn compile_all<I, S>(&mut self, texts: I) -> Result<Vec<Compilation>, CompileError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        texts.into_iter().map(|text| self.compile(text.as_ref())).collect()
    }
}

/// Compile `text` with a fresh randomized [`Compiler`].
pub fn compile(text: &str) -> Result<Compilation, CompileError> {
    Compiler::new().compile(text)
}
