//! Rendering: surfaces, strategies, and PNG output.
//!
//! Both rendering styles consume the same expanded sentence through the
//! `RenderStrategy` seam: the animated vector `TurtleRenderer` and the
//! chunky `PixelRenderer`. Surfaces implement the canvas-style `Surface`
//! contract; the crate ships a raster `Canvas` plus a recording test double.

pub mod canvas;
pub mod pixel;
pub mod png;
pub mod surface;
pub mod turtle;

pub use canvas::Canvas;
pub use pixel::PixelRenderer;
pub use png::write_png;
pub use surface::{DrawOp, RecordingSurface, Surface, Transform};
pub use turtle::{age_factor, Planter, TurtleRenderer};

use crate::grammar::Sentence;
use crate::prune::BranchIndex;
use crate::rng::SeededRandom;
use crate::types::PlantTraits;

/// A swappable rendering style.
///
/// Implementations interpret one annotated sentence against a surface and
/// return the branch registry for hit-testing (empty for styles without an
/// interactive surface).
pub trait RenderStrategy {
    fn render(
        &self,
        sentence: &Sentence,
        traits: &PlantTraits,
        animation_time: f64,
        rng: &mut SeededRandom,
        surface: &mut dyn Surface,
    ) -> BranchIndex;
}
