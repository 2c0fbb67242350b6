//! Plant definition records.
//!
//! A `PlantDefinition` is the immutable authored template a session grows
//! from: axiom, weighted rules, iteration count, and the branch/leaf
//! configuration. Definitions come from the builtin catalog or from
//! `*.plant.yaml` / `*.plant.json` files.

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::rng::SeededRandom;

use super::colour::Colour;
use super::rule::{Rule, RuleSet};

/// A fixed value or a `{min, max}` range resolved once per selection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LengthSpec {
    Fixed(f64),
    Range { min: f64, max: f64 },
}

impl LengthSpec {
    /// Resolve to a concrete value.
    ///
    /// Ranges draw a centre-weighted value; `min == max` and fixed specs are
    /// returned as-is without consuming the generator.
    pub fn resolve(&self, rng: &mut SeededRandom) -> f64 {
        match *self {
            LengthSpec::Fixed(v) => v,
            LengthSpec::Range { min, max } if min < max => rng.gaussian_in_range(min, max),
            LengthSpec::Range { min, .. } => min,
        }
    }
}

impl Default for LengthSpec {
    fn default() -> Self {
        LengthSpec::Fixed(7.0)
    }
}

/// An HSL triple: hue in degrees, saturation/lightness in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// A colour spec: either a literal hex string or an HSL range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColourSpec {
    Hex(String),
    HslRange { min: Hsl, max: Hsl },
}

impl ColourSpec {
    /// Resolve to a concrete colour.
    ///
    /// Hex specs resolve to exactly the authored value. Ranged specs draw
    /// each channel independently (centre-weighted, inside its bounds) and
    /// convert the result to RGB. Resolution happens once at selection time,
    /// not per frame.
    pub fn resolve(&self, rng: &mut SeededRandom) -> Result<Colour> {
        match self {
            ColourSpec::Hex(hex) => Colour::from_hex(hex),
            ColourSpec::HslRange { min, max } => {
                let h = rng.gaussian_in_range(min.h, max.h);
                let s = rng.gaussian_in_range(min.s, max.s);
                let l = rng.gaussian_in_range(min.l, max.l);
                Ok(Colour::from_hsl(h, s, l))
            }
        }
    }
}

impl Default for ColourSpec {
    fn default() -> Self {
        ColourSpec::Hex("#497a00".to_string())
    }
}

/// Branch segment configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BranchConfig {
    pub length: LengthSpec,
    /// Base turn angle in degrees.
    pub angle: f64,
    /// Base width of the trunk envelope.
    pub width: f64,
    /// Taper falloff in `[0, 1]`; 1 keeps width, 0 tapers hard.
    pub width_falloff: f64,
    pub colour: ColourSpec,
}

impl Default for BranchConfig {
    fn default() -> Self {
        Self {
            length: LengthSpec::default(),
            angle: 22.5,
            width: 10.0,
            width_falloff: 0.5,
            colour: ColourSpec::Hex("#000000".to_string()),
        }
    }
}

/// Leaf glyph configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeafConfig {
    /// Glyph shape index, 0-3.
    pub kind: u8,
    pub width: f64,
    pub length: f64,
    /// Extra fanned copies drawn either side of each leaf.
    pub repeat: u32,
    pub colour: ColourSpec,
    /// Global alpha applied while drawing leaves.
    pub alpha: f64,
}

impl Default for LeafConfig {
    fn default() -> Self {
        Self {
            kind: 0,
            width: 2.0,
            length: 5.0,
            repeat: 1,
            colour: ColourSpec::default(),
            alpha: 1.0,
        }
    }
}

/// An immutable authored plant template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantDefinition {
    pub name: String,
    pub axiom: String,
    pub rules: Vec<RuleSpec>,
    pub iterations: u32,
    /// Spread of per-occurrence random perturbation, `[0, 1]`.
    #[serde(default)]
    pub variability: f64,
    #[serde(default)]
    pub branches: BranchConfig,
    #[serde(default)]
    pub leaves: LeafConfig,
}

/// Serde-facing rule record (`symbol`, `odds`, `replacement`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSpec {
    pub symbol: char,
    #[serde(default = "default_odds")]
    pub odds: f64,
    pub replacement: String,
}

fn default_odds() -> f64 {
    1.0
}

impl PlantDefinition {
    /// Build the runtime rule set from the authored rule records.
    pub fn rule_set(&self) -> RuleSet {
        RuleSet::new(
            self.rules
                .iter()
                .map(|r| Rule::new(r.symbol, &r.replacement, r.odds))
                .collect(),
        )
    }

    /// Resolve ranged values against a generator, producing the concrete
    /// traits one grown plant uses.
    pub fn resolve(&self, rng: &mut SeededRandom) -> Result<PlantTraits> {
        Ok(PlantTraits {
            branch_length: self.branches.length.resolve(rng),
            branch_angle: self.branches.angle,
            branch_width: self.branches.width,
            width_falloff: self.branches.width_falloff,
            branch_colour: self.branches.colour.resolve(rng)?,
            leaf_kind: self.leaves.kind.min(3),
            leaf_width: self.leaves.width,
            leaf_length: self.leaves.length,
            leaf_repeat: self.leaves.repeat,
            leaf_colour: self.leaves.colour.resolve(rng)?,
            leaf_alpha: self.leaves.alpha,
            variability: self.variability,
        })
    }
}

/// Season selector; modifies leaf drawing only.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    #[default]
    Spring,
    Summer,
    Autumn,
    Winter,
}

/// Concrete per-plant values after resolving a definition.
///
/// Ranged lengths and colours have been drawn; these are the base values the
/// annotator perturbs per symbol occurrence.
#[derive(Debug, Clone, PartialEq)]
pub struct PlantTraits {
    pub branch_length: f64,
    pub branch_angle: f64,
    pub branch_width: f64,
    pub width_falloff: f64,
    pub branch_colour: Colour,
    pub leaf_kind: u8,
    pub leaf_width: f64,
    pub leaf_length: f64,
    pub leaf_repeat: u32,
    pub leaf_colour: Colour,
    pub leaf_alpha: f64,
    pub variability: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_length_spec_fixed() {
        let mut rng = SeededRandom::new(1.0);
        assert_eq!(LengthSpec::Fixed(5.0).resolve(&mut rng), 5.0);
        // Fixed specs must not consume draws.
        let mut fresh = SeededRandom::new(1.0);
        assert_eq!(rng.next(), fresh.next());
    }

    #[test]
    fn test_length_spec_range_in_bounds() {
        let mut rng = SeededRandom::new(9.0);
        let spec = LengthSpec::Range { min: 1.2, max: 2.5 };
        for _ in 0..200 {
            let v = spec.resolve(&mut rng);
            assert!((1.2..=2.5).contains(&v));
        }
    }

    #[test]
    fn test_length_spec_degenerate_range() {
        let mut rng = SeededRandom::new(9.0);
        let spec = LengthSpec::Range { min: 3.0, max: 3.0 };
        assert_eq!(spec.resolve(&mut rng), 3.0);
    }

    #[test]
    fn test_colour_spec_hex_literal() {
        let mut rng = SeededRandom::new(4.0);
        let spec = ColourSpec::Hex("#780707".to_string());
        for _ in 0..5 {
            assert_eq!(spec.resolve(&mut rng).unwrap(), Colour::rgb(0x78, 0x07, 0x07));
        }
    }

    #[test]
    fn test_colour_spec_range_channels_in_bounds() {
        let spec = ColourSpec::HslRange {
            min: Hsl { h: 80.0, s: 100.0, l: 0.0 },
            max: Hsl { h: 90.0, s: 100.0, l: 50.0 },
        };
        // Resolving repeatedly from an advancing cursor stays inside the
        // declared channel bounds; spot-check via the HSL draws themselves.
        let mut rng = SeededRandom::new(31.0);
        for _ in 0..50 {
            let h = rng.gaussian_in_range(80.0, 90.0);
            let s = rng.gaussian_in_range(100.0, 100.0);
            let l = rng.gaussian_in_range(0.0, 50.0);
            assert!((80.0..=90.0).contains(&h));
            assert_eq!(s, 100.0);
            assert!((0.0..=50.0).contains(&l));
        }
        let mut rng = SeededRandom::new(31.0);
        spec.resolve(&mut rng).unwrap();
    }

    #[test]
    fn test_definition_yaml_round_trip() {
        let yaml = r##"
name: test-weed
axiom: X
rules:
  - symbol: F
    replacement: FF
  - symbol: X
    odds: 0.5
    replacement: "F[-X]+X"
  - symbol: X
    odds: 0.5
    replacement: "F[+X]-X"
iterations: 4
variability: 0.4
branches:
  length: { min: 1.2, max: 1.6 }
  angle: 22.5
  colour: "#780707"
leaves:
  kind: 3
  repeat: 1
  colour:
    min: { h: 270, s: 13, l: 56 }
    max: { h: 290, s: 17, l: 62 }
"##;
        let def: PlantDefinition = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(def.name, "test-weed");
        assert_eq!(def.rules.len(), 3);
        assert_eq!(def.rules[0].odds, 1.0);
        assert_eq!(
            def.branches.length,
            LengthSpec::Range { min: 1.2, max: 1.6 }
        );
        assert!(matches!(def.leaves.colour, ColourSpec::HslRange { .. }));

        // Defaults fill unspecified branch fields.
        assert_eq!(def.branches.width, 10.0);
        assert_eq!(def.branches.width_falloff, 0.5);
    }

    #[test]
    fn test_resolve_is_deterministic() {
        let def = PlantDefinition {
            name: "t".into(),
            axiom: "F".into(),
            rules: vec![RuleSpec {
                symbol: 'F',
                odds: 1.0,
                replacement: "FF".into(),
            }],
            iterations: 2,
            variability: 0.2,
            branches: BranchConfig {
                length: LengthSpec::Range { min: 2.0, max: 4.0 },
                ..BranchConfig::default()
            },
            leaves: LeafConfig::default(),
        };

        let mut a = SeededRandom::new(11.0);
        let mut b = SeededRandom::new(11.0);
        assert_eq!(def.resolve(&mut a).unwrap(), def.resolve(&mut b).unwrap());
    }
}
