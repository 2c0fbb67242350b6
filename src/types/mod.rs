//! Core data types for the sprout pipeline.

pub mod colour;
pub mod plant;
pub mod rule;
pub mod symbol;

pub use colour::Colour;
pub use plant::{
    BranchConfig, ColourSpec, Hsl, LeafConfig, LengthSpec, PlantDefinition, PlantTraits,
    RuleSpec, Season,
};
pub use rule::{Rule, RuleSet};
pub use symbol::{symbols_from_str, ParameterizedSymbol, Symbol, SymbolParams};
