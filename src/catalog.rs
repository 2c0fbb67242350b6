//! Builtin plant catalog.
//!
//! A handful of authored templates that work out of the box, selectable by
//! name from the CLI. User definitions loaded from files take the same shape.

use crate::types::{
    BranchConfig, ColourSpec, Hsl, LeafConfig, LengthSpec, PlantDefinition, RuleSpec,
};

/// Look up a builtin plant by (case-insensitive) name.
pub fn find(name: &str) -> Option<PlantDefinition> {
    builtin()
        .into_iter()
        .find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Names of all builtin plants, in catalog order.
pub fn names() -> Vec<String> {
    builtin().into_iter().map(|p| p.name).collect()
}

/// The full builtin catalog.
pub fn builtin() -> Vec<PlantDefinition> {
    vec![
        PlantDefinition {
            name: "triple-adaptive-shrub".to_string(),
            axiom: "L".to_string(),
            rules: vec![
                rule('L', 0.33, "F[+L]F[-L]+L"),
                rule('L', 0.33, "F[-L]F[-L]+L"),
                rule('L', 0.34, "F[-L]F+L"),
                rule('F', 0.8, "FF"),
                rule('F', 0.1, "F"),
                rule('F', 0.1, ""),
            ],
            iterations: 8,
            variability: 0.7,
            branches: BranchConfig {
                length: LengthSpec::Range { min: 1.2, max: 2.5 },
                angle: 22.5,
                colour: ColourSpec::HslRange {
                    min: Hsl { h: 50.0, s: 34.0, l: 5.0 },
                    max: Hsl { h: 60.0, s: 40.0, l: 10.0 },
                },
                ..BranchConfig::default()
            },
            leaves: LeafConfig {
                kind: 3,
                repeat: 1,
                colour: ColourSpec::HslRange {
                    min: Hsl { h: 80.0, s: 100.0, l: 0.0 },
                    max: Hsl { h: 90.0, s: 100.0, l: 50.0 },
                },
                ..LeafConfig::default()
            },
        },
        PlantDefinition {
            name: "twiggy-weed".to_string(),
            axiom: "X".to_string(),
            rules: vec![rule('F', 1.0, "FF"), rule('X', 1.0, "F[-XL]F[-X]+X")],
            iterations: 8,
            variability: 0.4,
            branches: BranchConfig {
                length: LengthSpec::Range { min: 1.2, max: 1.6 },
                angle: 22.5,
                colour: ColourSpec::Hex("#780707".to_string()),
                ..BranchConfig::default()
            },
            leaves: LeafConfig {
                kind: 3,
                repeat: 1,
                colour: ColourSpec::HslRange {
                    min: Hsl { h: 270.0, s: 13.0, l: 56.0 },
                    max: Hsl { h: 290.0, s: 17.0, l: 62.0 },
                },
                ..LeafConfig::default()
            },
        },
        PlantDefinition {
            name: "branching-fern".to_string(),
            axiom: "F".to_string(),
            rules: vec![rule('F', 1.0, "F[+X]F[-X]X"), rule('X', 1.0, "F[+L]F[-L]L")],
            iterations: 4,
            variability: 0.4,
            branches: BranchConfig {
                length: LengthSpec::Range { min: 10.0, max: 12.0 },
                angle: 22.5,
                width: 30.0,
                colour: ColourSpec::Hex("#000000".to_string()),
                ..BranchConfig::default()
            },
            leaves: LeafConfig {
                kind: 0,
                repeat: 3,
                colour: ColourSpec::Hex("#C71f40".to_string()),
                ..LeafConfig::default()
            },
        },
        PlantDefinition {
            name: "fuzzy-weed".to_string(),
            axiom: "X".to_string(),
            rules: vec![
                rule('F', 1.0, "FF"),
                rule('X', 0.5, "F-[[X]+XL]+F[+FX]-X"),
                rule('X', 0.5, "F-[[X]+X]+F[+F++X]-X"),
            ],
            iterations: 7,
            variability: 0.4,
            branches: BranchConfig {
                length: LengthSpec::Range { min: 2.0, max: 2.3 },
                angle: 22.5,
                colour: ColourSpec::Hex("#000000".to_string()),
                ..BranchConfig::default()
            },
            leaves: LeafConfig {
                kind: 3,
                repeat: 1,
                colour: ColourSpec::Hex("#B38C00".to_string()),
                ..LeafConfig::default()
            },
        },
        PlantDefinition {
            name: "binary-tree".to_string(),
            axiom: "X".to_string(),
            rules: vec![rule('X', 1.0, "F[-FXL][+FXL]"), rule('L', 1.0, "")],
            iterations: 7,
            variability: 0.0,
            branches: BranchConfig {
                length: LengthSpec::Fixed(50.0),
                width: 7.0,
                width_falloff: 0.5,
                angle: 15.0,
                colour: ColourSpec::Hex("#000000".to_string()),
            },
            leaves: LeafConfig {
                kind: 1,
                width: 3.0,
                length: 3.0,
                repeat: 1,
                colour: ColourSpec::Hex("#000088".to_string()),
                ..LeafConfig::default()
            },
        },
        PlantDefinition {
            name: "sierpinski".to_string(),
            axiom: "-F".to_string(),
            rules: vec![rule('F', 1.0, "++X--F--X++"), rule('X', 1.0, "--F++X++F--L")],
            iterations: 7,
            variability: 0.0,
            branches: BranchConfig {
                length: LengthSpec::Fixed(14.0),
                width: 7.0,
                width_falloff: 0.0,
                angle: 30.0,
                colour: ColourSpec::Hex("#000000".to_string()),
            },
            leaves: LeafConfig {
                kind: 1,
                width: 4.0,
                length: 3.0,
                repeat: 1,
                colour: ColourSpec::Hex("#0890D4".to_string()),
                ..LeafConfig::default()
            },
        },
        PlantDefinition {
            name: "snowflake".to_string(),
            axiom: "[F--F--F]+[F--F--F]".to_string(),
            rules: vec![rule('F', 1.0, "F+F--F+F")],
            iterations: 6,
            variability: 0.0,
            branches: BranchConfig {
                length: LengthSpec::Fixed(5.0),
                width: 15.0,
                width_falloff: 0.0,
                angle: 60.0,
                colour: ColourSpec::Hex("#000080".to_string()),
            },
            leaves: LeafConfig {
                kind: 0,
                width: 4.0,
                length: 3.0,
                repeat: 1,
                colour: ColourSpec::Hex("#B38C00".to_string()),
                ..LeafConfig::default()
            },
        },
    ]
}

fn rule(symbol: char, odds: f64, replacement: &str) -> RuleSpec {
    RuleSpec {
        symbol,
        odds,
        replacement: replacement.to_string(),
    }
}
