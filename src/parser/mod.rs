//! Parsers for the two authoring surfaces.
//!
//! Plant definitions arrive as serde documents (`definition`), and rule sets
//! can also be authored in the compact one-rule-per-line text notation
//! (`rules`) used by the interactive editor boundary.

pub mod definition;
pub mod rules;

pub use definition::{is_definition_file, load_definitions, parse_json, parse_yaml};
pub use rules::{format_rules, parse_rules};
