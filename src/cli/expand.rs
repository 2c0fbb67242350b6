//! Expand command implementation.
//!
//! Runs grammar expansion without rendering and prints the resulting symbol
//! string to stdout.

use clap::Args;

use crate::error::Result;
use crate::output::{plural, Printer};
use crate::session::PlantSession;

use super::grow::resolve_definition;

/// Expand a plant's grammar and print the symbol string
#[derive(Args, Debug)]
pub struct ExpandArgs {
    /// Builtin plant name or definition file
    pub plant: String,

    /// Random seed (any text)
    #[arg(long, default_value = "bytebloom")]
    pub seed: String,

    /// Override the definition's iteration count
    #[arg(long)]
    pub iterations: Option<u32>,
}

pub fn run(args: ExpandArgs) -> Result<()> {
    let printer = Printer::new();

    let mut definition = resolve_definition(&args.plant)?;
    if let Some(iterations) = args.iterations {
        definition.iterations = iterations;
    }

    let session = PlantSession::new(definition, &args.seed)?;

    printer.status(
        "Expanding",
        &format!(
            "{} ({}, seed \"{}\")",
            session.definition().name,
            plural(session.definition().iterations as usize, "iteration", "iterations"),
            args.seed,
        ),
    );
    printer.info(
        "Sentence",
        &plural(session.sentence().len(), "symbol", "symbols"),
    );

    println!("{}", session.sentence());

    Ok(())
}
