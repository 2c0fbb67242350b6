//! sprout - L-system plant generator
//!
//! A library for growing stochastic string-rewriting grammars into animated,
//! prunable plant renderings.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod grammar;
pub mod output;
pub mod parser;
pub mod prune;
pub mod render;
pub mod rng;
pub mod session;
pub mod types;

pub use error::{Result, SproutError};
pub use grammar::{expand, Sentence};
pub use parser::{format_rules, load_definitions, parse_rules};
pub use prune::{Branch, BranchIndex};
pub use render::{
    age_factor, write_png, Canvas, PixelRenderer, Planter, RecordingSurface, RenderStrategy,
    Surface, Transform, TurtleRenderer,
};
pub use rng::SeededRandom;
pub use session::{AnimationClock, FrameToken, PlantSession};
pub use types::{
    BranchConfig, Colour, ColourSpec, LeafConfig, LengthSpec, ParameterizedSymbol,
    PlantDefinition, PlantTraits, Rule, RuleSet, Season, Symbol, SymbolParams,
};
