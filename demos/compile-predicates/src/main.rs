use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use log::info;
use serde::Deserialize;

use ptlc::{Compilation, Compiler, NamingConfig, RandomNames, SequentialNames, GRAMMAR_VERSION};

#[derive(Parser, Debug)]
#[command(version, about = "Compile past-time temporal predicates into boolean expressions", long_about = None)]
struct Args {
    /// TOML file listing the predicates to compile
    config: PathBuf,

    /// Seed for reproducible auxiliary names
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number auxiliary names instead of using random suffixes
    #[arg(long, conflicts_with = "seed")]
    sequential: bool,
}

#[derive(Debug, Deserialize)]
struct Config {
    predicates: Vec<String>,

    #[serde(default)]
    naming: NamingConfig,
}

fn print(compilation: &Compilation) {
    let variables: Vec<&str> = compilation.variables().iter().map(String::as_str).collect();

    println!("{}", compilation.source());
    println!("  expression: {}", compilation.expression());
    println!("  variables:  {}", variables.join(", "));

    for aux in compilation.auxiliaries() {
        println!("  auxiliary:  {} ({:?})", aux, aux.kind());
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let text = fs::read_to_string(&args.config)
        .with_context(|| format!("Failed to read {}", args.config.display()))?;
    let config: Config = toml::from_str(&text).context("Failed to parse the configuration")?;

    info!(
        "compiling {} predicates with grammar version {}",
        config.predicates.len(),
        GRAMMAR_VERSION
    );

    let compilations = if args.sequential {
        Compiler::with_names(SequentialNames::new(config.naming.prefix.clone())).compile_all(&config.predicates)
    } else if let Some(seed) = args.seed {
        Compiler::with_names(RandomNames::seeded(config.naming.clone(), seed)).compile_all(&config.predicates)
    } else {
        Compiler::from_config(&config.naming).compile_all(&config.predicates)
    }
    .context("Failed compiling the predicates")?;

    for compilation in &compilations {
        print(compilation);
    }

    Ok(())
}
