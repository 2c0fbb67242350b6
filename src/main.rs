use clap::Parser;
use miette::Result;
use sprout::cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Grow(args) => sprout::cli::grow::run(args)?,
        Commands::Expand(args) => sprout::cli::expand::run(args)?,
        Commands::List(args) => sprout::cli::list::run(args)?,
        Commands::Validate(args) => sprout::cli::validate::run(args)?,
        Commands::Completions(args) => sprout::cli::completions::run(args)?,
    }

    Ok(())
}
