//! Per-plant session state.
//!
//! One session owns everything a growing plant needs: the resolved traits,
//! the RNG cursor, the expanded sentence, the branch registry from the last
//! render, and the animation clock. Sessions are plain values - two sessions
//! never share state, so independent plants and deterministic tests fall out
//! naturally.

use crate::error::Result;
use crate::grammar::{expand, Sentence};
use crate::prune::BranchIndex;
use crate::render::{RenderStrategy, Surface};
use crate::rng::SeededRandom;
use crate::types::{PlantDefinition, PlantTraits, Season};

/// Ticket for one scheduled render frame.
///
/// A frame drawn after the plant re-expanded (seed change, chop, rule edit)
/// would show stale geometry; tokens let late frames notice and abort.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameToken {
    generation: u64,
}

/// The growth animation clock.
///
/// `elapsed` runs from zero to `total`; the whole-plant width envelope is a
/// function of it. Symbol ages advance by `age_speed` times the tick delta.
#[derive(Debug, Clone)]
pub struct AnimationClock {
    total: f64,
    elapsed: f64,
    age_speed: f64,
    generation: u64,
}

impl AnimationClock {
    /// Total duration scales with iteration count; faster animation
    /// settings shorten it.
    pub fn new(iterations: u32, animation_speed: f64, age_speed: f64) -> Self {
        Self {
            total: iterations as f64 * 20.0 / animation_speed.max(f64::MIN_POSITIVE),
            elapsed: 0.0,
            age_speed,
            generation: 0,
        }
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn age_speed(&self) -> f64 {
        self.age_speed
    }

    /// Advance the clock, returning the age delta to apply to the sentence.
    pub fn tick(&mut self, delta: f64) -> f64 {
        self.elapsed += delta;
        delta * self.age_speed
    }

    /// Jump straight to the end of the growth animation.
    pub fn finish(&mut self) -> f64 {
        let remaining = (self.total - self.elapsed).max(0.0);
        self.tick(remaining)
    }

    /// Start a new render generation, invalidating earlier frame tokens.
    pub fn begin_render(&mut self) -> FrameToken {
        self.generation += 1;
        FrameToken {
            generation: self.generation,
        }
    }

    /// Whether a frame token is still current.
    pub fn is_current(&self, token: FrameToken) -> bool {
        token.generation == self.generation
    }
}

/// A single plant being grown, rendered, and pruned.
pub struct PlantSession {
    definition: PlantDefinition,
    seed: String,
    season: Season,
    rng: SeededRandom,
    traits: PlantTraits,
    sentence: Sentence,
    branches: BranchIndex,
    clock: AnimationClock,
    animation_speed: f64,
    age_speed: f64,
}

impl PlantSession {
    /// Create a session and run the initial expansion.
    pub fn new(definition: PlantDefinition, seed: &str) -> Result<Self> {
        Self::with_speeds(definition, seed, 1.0, 1.0)
    }

    /// Create a session with explicit animation and aging speeds.
    pub fn with_speeds(
        definition: PlantDefinition,
        seed: &str,
        animation_speed: f64,
        age_speed: f64,
    ) -> Result<Self> {
        let mut rng = SeededRandom::from_text(seed);
        let traits = definition.resolve(&mut rng)?;
        let sentence = expand(
            &definition.axiom,
            &definition.rule_set(),
            definition.iterations,
            &traits,
            &mut rng,
        );
        let clock = AnimationClock::new(definition.iterations, animation_speed, age_speed);

        Ok(Self {
            seed: seed.to_string(),
            season: Season::default(),
            rng,
            traits,
            sentence,
            branches: BranchIndex::new(),
            clock,
            animation_speed,
            age_speed,
            definition,
        })
    }

    pub fn definition(&self) -> &PlantDefinition {
        &self.definition
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn season(&self) -> Season {
        self.season
    }

    pub fn set_season(&mut self, season: Season) {
        self.season = season;
    }

    pub fn traits(&self) -> &PlantTraits {
        &self.traits
    }

    pub fn sentence(&self) -> &Sentence {
        &self.sentence
    }

    pub fn branches(&self) -> &BranchIndex {
        &self.branches
    }

    pub fn clock(&self) -> &AnimationClock {
        &self.clock
    }

    /// Re-seed and regrow from scratch.
    pub fn set_seed(&mut self, seed: &str) -> Result<()> {
        self.seed = seed.to_string();
        self.rng = SeededRandom::from_text(seed);
        self.regenerate()
    }

    /// Reset the RNG cursor, re-resolve colours, and re-expand the sentence.
    ///
    /// Everything derived from the old sentence (ages, branch registry,
    /// pending frames) is invalidated.
    pub fn regenerate(&mut self) -> Result<()> {
        self.rng.reset();
        self.traits = self.definition.resolve(&mut self.rng)?;
        self.sentence = expand(
            &self.definition.axiom,
            &self.definition.rule_set(),
            self.definition.iterations,
            &self.traits,
            &mut self.rng,
        );
        self.branches = BranchIndex::new();
        let generation = self.clock.generation;
        self.clock = AnimationClock::new(
            self.definition.iterations,
            self.animation_speed,
            self.age_speed,
        );
        self.clock.generation = generation + 1;
        Ok(())
    }

    /// Advance the animation clock and age the plant.
    pub fn tick(&mut self, delta: f64) {
        let age_delta = self.clock.tick(delta);
        self.sentence.age_all(age_delta);
    }

    /// Age the plant to the end of its growth animation.
    pub fn mature(&mut self) {
        let age_delta = self.clock.finish();
        self.sentence.age_all(age_delta);
    }

    /// Issue a frame token for the current generation.
    pub fn begin_render(&mut self) -> FrameToken {
        self.clock.begin_render()
    }

    /// Render the plant, replacing the branch registry.
    pub fn render(&mut self, strategy: &dyn RenderStrategy, surface: &mut dyn Surface) {
        self.branches = strategy.render(
            &self.sentence,
            &self.traits,
            self.clock.elapsed(),
            &mut self.rng,
            surface,
        );
    }

    /// Render one scheduled frame; a stale token aborts without drawing.
    ///
    /// Returns whether the frame was drawn.
    pub fn render_frame(
        &mut self,
        token: FrameToken,
        delta: f64,
        strategy: &dyn RenderStrategy,
        surface: &mut dyn Surface,
    ) -> bool {
        if !self.clock.is_current(token) {
            return false;
        }
        self.tick(delta);
        self.render(strategy, surface);
        true
    }

    /// Prune at a surface-space point: hit-test the last render's branches
    /// and truncate the sentence at the first hit.
    ///
    /// Returns the pruned sentence index, if any. The sentence is never
    /// re-expanded after a prune; the next render shows the cut plant.
    pub fn chop_at(&mut self, x: f64, y: f64) -> Option<usize> {
        let index = self.branches.hit_test(x, y)?.sentence_index;
        self.chop_index(index);
        Some(index)
    }

    /// Prune at a known sentence index.
    pub fn chop_index(&mut self, index: usize) {
        self.sentence.chop(index);
        self.clock.begin_render();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog;
    use crate::render::{RecordingSurface, TurtleRenderer};

    fn session(name: &str, seed: &str) -> PlantSession {
        PlantSession::new(catalog::find(name).unwrap(), seed).unwrap()
    }

    #[test]
    fn test_same_seed_same_sentence() {
        let a = session("twiggy-weed", "alpha");
        let b = session("twiggy-weed", "alpha");
        assert_eq!(a.sentence(), b.sentence());
        assert_eq!(a.traits(), b.traits());
    }

    #[test]
    fn test_different_seed_different_sentence() {
        let a = session("fuzzy-weed", "alpha");
        let b = session("fuzzy-weed", "beta");
        // Stochastic rules virtually guarantee divergence.
        assert_ne!(a.sentence().to_string(), b.sentence().to_string());
    }

    #[test]
    fn test_set_seed_regrows() {
        let mut s = session("twiggy-weed", "alpha");
        let before = s.sentence().to_string();
        s.set_seed("beta").unwrap();
        s.set_seed("alpha").unwrap();
        assert_eq!(s.sentence().to_string(), before);
    }

    #[test]
    fn test_tick_ages_symbols() {
        let mut s = session("twiggy-weed", "alpha");
        let age_before = s.sentence().symbols()[0].age;
        s.tick(2.0);
        s.tick(3.0);
        let age_after = s.sentence().symbols()[0].age;
        assert_eq!(age_after, age_before + 5.0);
        assert_eq!(s.clock().elapsed(), 5.0);
    }

    #[test]
    fn test_mature_reaches_total() {
        let mut s = session("branching-fern", "alpha");
        s.mature();
        assert_eq!(s.clock().elapsed(), s.clock().total());
        // Maturing twice changes nothing further.
        let age = s.sentence().symbols()[0].age;
        s.mature();
        assert_eq!(s.sentence().symbols()[0].age, age);
    }

    #[test]
    fn test_frame_token_staleness() {
        let mut s = session("branching-fern", "alpha");
        s.mature();

        let stale = s.begin_render();
        let fresh = s.begin_render();

        let renderer = TurtleRenderer::default();
        let mut surface = RecordingSurface::new(512.0, 512.0);

        assert!(!s.render_frame(stale, 0.1, &renderer, &mut surface));
        assert_eq!(surface.fills(), 0);

        assert!(s.render_frame(fresh, 0.1, &renderer, &mut surface));
        assert!(surface.fills() > 0);
    }

    #[test]
    fn test_chop_invalidates_frames() {
        let mut s = session("branching-fern", "alpha");
        s.mature();
        let token = s.begin_render();
        s.chop_index(0);

        let renderer = TurtleRenderer::default();
        let mut surface = RecordingSurface::new(512.0, 512.0);
        assert!(!s.render_frame(token, 0.1, &renderer, &mut surface));
    }

    #[test]
    fn test_render_populates_branches() {
        let mut s = session("branching-fern", "alpha");
        s.mature();

        let renderer = TurtleRenderer::default();
        let mut surface = RecordingSurface::new(1024.0, 1024.0);
        s.render(&renderer, &mut surface);

        assert!(!s.branches().is_empty());
    }

    #[test]
    fn test_chop_at_hit_and_miss() {
        let mut s = session("branching-fern", "alpha");
        s.mature();

        let renderer = TurtleRenderer::default();
        let mut surface = RecordingSurface::new(1024.0, 1024.0);
        s.render(&renderer, &mut surface);

        let len_before = s.sentence().len();

        // A point far off the plant misses.
        assert_eq!(s.chop_at(-1000.0, -1000.0), None);
        assert_eq!(s.sentence().len(), len_before);

        // The first branch tip is a guaranteed hit.
        let tip = s.branches().iter().next().unwrap().tip;
        let index = s.chop_at(tip.0, tip.1).unwrap();
        assert_eq!(
            s.branches().iter().next().unwrap().sentence_index,
            index
        );
        assert!(s.sentence().len() <= len_before);
    }

    #[test]
    fn test_chop_then_rerender_shrinks_registry() {
        let mut s = session("branching-fern", "alpha");
        s.mature();

        let renderer = TurtleRenderer::default();
        let mut surface = RecordingSurface::new(1024.0, 1024.0);
        s.render(&renderer, &mut surface);
        let before = s.branches().len();

        s.chop_index(0);

        let mut surface = RecordingSurface::new(1024.0, 1024.0);
        s.render(&renderer, &mut surface);
        assert!(s.branches().len() < before);
    }
}
