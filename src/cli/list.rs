//! List command implementation.
//!
//! Prints the builtin catalog and any plant definition files discovered
//! under the given directories.

use std::path::PathBuf;

use clap::Args;
use walkdir::WalkDir;

use crate::catalog;
use crate::error::Result;
use crate::output::{plural, Printer};
use crate::parser::{is_definition_file, load_definitions};

/// List builtin plants and discovered definition files
#[derive(Args, Debug)]
pub struct ListArgs {
    /// Directories to scan for *.plant.yaml / *.plant.json (default: current directory)
    pub dirs: Vec<PathBuf>,
}

pub fn run(args: ListArgs) -> Result<()> {
    let printer = Printer::new();

    let builtins = catalog::names();
    printer.info("Builtin", &builtins.join(", "));

    let dirs = if args.dirs.is_empty() {
        vec![PathBuf::from(".")]
    } else {
        args.dirs
    };

    let mut found = 0usize;
    for dir in &dirs {
        for entry in WalkDir::new(dir)
            .follow_links(false)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() || !is_definition_file(entry.path()) {
                continue;
            }

            match load_definitions(entry.path()) {
                Ok(defs) => {
                    let names: Vec<&str> = defs.iter().map(|d| d.name.as_str()).collect();
                    printer.info(
                        "File",
                        &format!("{} ({})", entry.path().display(), names.join(", ")),
                    );
                    found += defs.len();
                }
                Err(e) => {
                    printer.warning("Skipping", &format!("{}: {}", entry.path().display(), e));
                }
            }
        }
    }

    printer.status(
        "Listed",
        &format!(
            "{} builtin, {} from files",
            builtins.len(),
            plural(found, "definition", "definitions")
        ),
    );

    Ok(())
}
