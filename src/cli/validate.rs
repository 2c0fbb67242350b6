//! Validate command implementation.
//!
//! Checks definition files and free-text rule files without rendering.
//! Rule files (`*.rules`) use the line notation; everything else is loaded
//! as a plant definition. Exits non-zero if any file fails.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Args;

use crate::error::{Result, SproutError};
use crate::output::{plural, Printer};
use crate::parser::{load_definitions, parse_rules};
use crate::rng::SeededRandom;

/// Validate definition and rule files without rendering
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Files to validate (*.plant.yaml, *.plant.json, *.rules)
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let printer = Printer::new();
    let mut failures = 0usize;

    for file in &args.files {
        match validate_file(file) {
            Ok(summary) => printer.status("Valid", &format!("{} ({})", file.display(), summary)),
            Err(e) => {
                printer.error("Invalid", &format!("{}: {}", file.display(), e));
                failures += 1;
            }
        }
    }

    if failures > 0 {
        return Err(SproutError::Validation {
            message: format!("{} failed validation", plural(failures, "file", "files")),
            help: None,
        });
    }

    printer.status("Validated", &plural(args.files.len(), "file", "files"));
    Ok(())
}

/// Validate one file, returning a one-line summary.
fn validate_file(path: &Path) -> Result<String> {
    let is_rules = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("rules"));

    if is_rules {
        let source = fs::read_to_string(path).map_err(|e| SproutError::Io {
            path: path.to_path_buf(),
            message: format!("Failed to read rules file: {}", e),
        })?;
        let rules = parse_rules(&source)?;
        return Ok(plural(rules.len(), "rule", "rules"));
    }

    let defs = load_definitions(path)?;
    for def in &defs {
        // Authored definitions get the strict odds check, and their ranged
        // values must resolve cleanly.
        def.rule_set().validate_odds().map_err(|e| match e {
            SproutError::Validation { message, help } => SproutError::Validation {
                message: format!("{}: {}", def.name, message),
                help,
            },
            other => other,
        })?;

        let mut rng = SeededRandom::from_text("validate");
        def.resolve(&mut rng)?;
    }

    Ok(plural(defs.len(), "definition", "definitions"))
}
