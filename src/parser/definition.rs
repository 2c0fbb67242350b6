//! Loading plant definition files.
//!
//! Definitions are serde documents: `*.plant.yaml` / `*.plant.json` (bare
//! `.yaml`/`.yml`/`.json` are accepted too). A file holds either a single
//! definition or a list of them.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Result, SproutError};
use crate::types::PlantDefinition;

/// One-or-many wrapper so files can hold a single plant or a collection.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum DefinitionFile {
    One(PlantDefinition),
    Many(Vec<PlantDefinition>),
}

impl DefinitionFile {
    fn into_vec(self) -> Vec<PlantDefinition> {
        match self {
            DefinitionFile::One(def) => vec![def],
            DefinitionFile::Many(defs) => defs,
        }
    }
}

/// Load all plant definitions from a file, dispatching on extension.
pub fn load_definitions(path: &Path) -> Result<Vec<PlantDefinition>> {
    let source = fs::read_to_string(path).map_err(|e| SproutError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read definition file: {}", e),
    })?;

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let defs = match ext.as_str() {
        "yaml" | "yml" => parse_yaml(&source)?,
        "json" => parse_json(&source)?,
        other => {
            return Err(SproutError::Parse {
                message: format!("Unsupported definition format: .{}", other),
                help: Some("Use a .plant.yaml or .plant.json file".to_string()),
            })
        }
    };

    if defs.is_empty() {
        return Err(SproutError::Parse {
            message: format!("No plant definitions found in {}", path.display()),
            help: None,
        });
    }

    Ok(defs)
}

/// Parse YAML definition source.
pub fn parse_yaml(source: &str) -> Result<Vec<PlantDefinition>> {
    let file: DefinitionFile = serde_yaml::from_str(source).map_err(|e| SproutError::Parse {
        message: format!("Invalid plant definition: {}", e),
        help: Some("Expected name, axiom, rules, iterations plus optional branches/leaves".to_string()),
    })?;
    Ok(file.into_vec())
}

/// Parse JSON definition source.
pub fn parse_json(source: &str) -> Result<Vec<PlantDefinition>> {
    let file: DefinitionFile = serde_json::from_str(source).map_err(|e| SproutError::Parse {
        message: format!("Invalid plant definition: {}", e),
        help: Some("Expected name, axiom, rules, iterations plus optional branches/leaves".to_string()),
    })?;
    Ok(file.into_vec())
}

/// Whether a path looks like a plant definition file.
pub fn is_definition_file(path: &Path) -> bool {
    let name = match path.file_name().and_then(|n| n.to_str()) {
        Some(name) => name.to_ascii_lowercase(),
        None => return false,
    };
    name.ends_with(".plant.yaml") || name.ends_with(".plant.yml") || name.ends_with(".plant.json")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const MINIMAL: &str = r#"
name: minimal
axiom: F
rules:
  - symbol: F
    replacement: FF
iterations: 3
"#;

    #[test]
    fn test_parse_yaml_single() {
        let defs = parse_yaml(MINIMAL).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].name, "minimal");
        assert_eq!(defs[0].iterations, 3);
    }

    #[test]
    fn test_parse_yaml_list() {
        let source = format!("- {}\n", MINIMAL.trim().replace('\n', "\n  "));
        let defs = parse_yaml(&source).unwrap();
        assert_eq!(defs.len(), 1);
    }

    #[test]
    fn test_parse_json() {
        let source = r#"{
            "name": "j",
            "axiom": "X",
            "rules": [{"symbol": "X", "replacement": "F[+X]"}],
            "iterations": 2
        }"#;
        let defs = parse_json(source).unwrap();
        assert_eq!(defs[0].axiom, "X");
        assert_eq!(defs[0].rules[0].odds, 1.0);
    }

    #[test]
    fn test_parse_yaml_rejects_garbage() {
        assert!(parse_yaml("nope: [").is_err());
        assert!(parse_yaml("just-a-string").is_err());
    }

    #[test]
    fn test_load_definitions_by_extension() {
        let mut file = NamedTempFile::with_suffix(".plant.yaml").unwrap();
        file.write_all(MINIMAL.as_bytes()).unwrap();

        let defs = load_definitions(file.path()).unwrap();
        assert_eq!(defs[0].name, "minimal");
    }

    #[test]
    fn test_load_definitions_unsupported_extension() {
        let mut file = NamedTempFile::with_suffix(".toml").unwrap();
        file.write_all(b"x = 1").unwrap();
        assert!(load_definitions(file.path()).is_err());
    }

    #[test]
    fn test_is_definition_file() {
        use std::path::PathBuf;
        assert!(is_definition_file(&PathBuf::from("fern.plant.yaml")));
        assert!(is_definition_file(&PathBuf::from("dir/weed.plant.json")));
        assert!(!is_definition_file(&PathBuf::from("notes.yaml")));
        assert!(!is_definition_file(&PathBuf::from("fern.plant.toml")));
    }
}
