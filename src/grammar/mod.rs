//! Grammar expansion and per-symbol parameter annotation.
//!
//! The engine rewrites an axiom through N generations of weighted production
//! rules. Parameters (segment length, turn angle, leaf size) are sampled at
//! the moment each symbol is created and never recomputed, so the geometry
//! of surviving symbols is stable across renders and prunes.

pub mod sentence;

pub use sentence::Sentence;

use crate::rng::SeededRandom;
use crate::types::{
    ParameterizedSymbol, PlantTraits, RuleSet, Symbol, SymbolParams,
};

/// Expand `axiom` through `iterations` generations of `rules`.
///
/// Every generation rewrites each symbol independently, in order. Symbols
/// with no matching rule pass through unchanged, keeping the parameters they
/// were created with. Output length can grow exponentially with iteration
/// count; callers bound `iterations`.
pub fn expand(
    axiom: &str,
    rules: &RuleSet,
    iterations: u32,
    traits: &PlantTraits,
    rng: &mut SeededRandom,
) -> Sentence {
    let mut current: Vec<ParameterizedSymbol> = axiom
        .chars()
        .map(|c| annotate(Symbol::from_char(c), 0.0, traits, rng))
        .collect();

    for _ in 0..iterations {
        current = rewrite(&current, rules, traits, rng);
    }

    Sentence::new(current)
}

/// Apply one generation of rewrites.
fn rewrite(
    sentence: &[ParameterizedSymbol],
    rules: &RuleSet,
    traits: &PlantTraits,
    rng: &mut SeededRandom,
) -> Vec<ParameterizedSymbol> {
    let mut next = Vec::with_capacity(sentence.len());

    for s in sentence {
        match rules.select(s.symbol, rng) {
            Some(rule) => {
                for (child, &symbol) in rule.replacement.iter().enumerate() {
                    // The first child keeps the parent's age; later children
                    // start one step younger, staggering visual growth.
                    let age = if child == 0 { s.age } else { s.age - 1.0 };
                    next.push(annotate(symbol, age, traits, rng));
                }
            }
            None => next.push(*s),
        }
    }

    next
}

/// Attach sampled physical parameters to a freshly created symbol.
///
/// Sampling order is left-to-right over the produced sequence; with a shared
/// cursor this makes annotation reproducible for a given seed.
fn annotate(
    symbol: Symbol,
    age: f64,
    traits: &PlantTraits,
    rng: &mut SeededRandom,
) -> ParameterizedSymbol {
    let spread = traits.variability;

    let params = match symbol {
        Symbol::Branch => SymbolParams::BranchSegment {
            length: rng.range(
                traits.branch_length * (1.0 - spread),
                traits.branch_length * (1.0 + spread),
            ),
        },
        Symbol::TurnRight | Symbol::TurnLeft => SymbolParams::Turn {
            angle: traits.branch_angle * rng.range(1.0 - spread, 1.0 + spread),
        },
        Symbol::Leaf | Symbol::Berry => SymbolParams::Leaf {
            width: rng.range(
                traits.leaf_width * (1.0 - spread),
                traits.leaf_width * (1.0 + spread),
            ),
            length: rng.range(
                traits.leaf_length * (1.0 - spread),
                traits.leaf_length * (1.0 + spread),
            ),
        },
        Symbol::ScopeOpen | Symbol::ScopeClose | Symbol::Other(_) => SymbolParams::None,
    };

    ParameterizedSymbol::new(symbol, age, params)
}
