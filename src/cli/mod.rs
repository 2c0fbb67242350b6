pub mod completions;
pub mod expand;
pub mod grow;
pub mod list;
pub mod validate;

use clap::{Parser, Subcommand};

/// sprout - L-system plant generator
#[derive(Parser, Debug)]
#[command(name = "sprout")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Grow a plant and render it to a PNG
    Grow(grow::GrowArgs),

    /// Expand a plant's grammar and print the symbol string
    Expand(expand::ExpandArgs),

    /// List builtin plants and discovered definition files
    List(list::ListArgs),

    /// Validate definition and rule files without rendering
    Validate(validate::ValidateArgs),

    /// Generate shell completions
    Completions(completions::CompletionsArgs),
}
