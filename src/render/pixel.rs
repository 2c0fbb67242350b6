//! Pixel-blocked renderer.
//!
//! The non-interactive rendering style: branch segments become runs of
//! chunky square pixels on an 8-bit palette, with depth-indexed colours.
//! It shares the expansion pipeline with the vector renderer but keeps its
//! own simpler interpretation - no ages, no seasons, no branch registry.

use crate::grammar::Sentence;
use crate::prune::BranchIndex;
use crate::rng::SeededRandom;
use crate::types::{Colour, PlantTraits, Symbol};

use super::surface::{Surface, Transform};
use super::RenderStrategy;

/// Saved turtle state for `[` / `]`.
#[derive(Debug, Clone, Copy)]
struct PixelState {
    x: f64,
    y: f64,
    angle: f64,
    length: f64,
    colour_index: usize,
}

/// The chunky 8-bit rendering strategy.
#[derive(Debug, Clone)]
pub struct PixelRenderer {
    /// Size of one drawn pixel block.
    pub pixel_size: f64,
    /// Depth palette; index 1 is the trunk, the last index the brightest.
    pub palette: Vec<Colour>,
    /// Length multiplier applied on every scope push.
    pub length_reduction: f64,
}

impl PixelRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the trunk and highlight entries with a plant's resolved
    /// colours, keeping the mid-depth greens.
    pub fn with_plant_colours(mut self, branch: Colour, leaf: Colour) -> Self {
        self.palette[1] = branch;
        let last = self.palette.len() - 1;
        self.palette[last] = leaf;
        self
    }

    fn colour(&self, index: usize) -> Colour {
        if index > 0 && index < self.palette.len() {
            self.palette[index]
        } else {
            self.palette[1]
        }
    }

    /// Stamp one palette-aligned pixel block.
    fn draw_pixel(&self, x: f64, y: f64, colour_index: usize, surface: &mut dyn Surface) {
        let ps = self.pixel_size;
        surface.set_fill_colour(self.colour(colour_index));
        surface.fill_rect((x / ps).floor() * ps, (y / ps).floor() * ps, ps, ps);
    }
}

impl Default for PixelRenderer {
    fn default() -> Self {
        Self {
            pixel_size: 4.0,
            palette: vec![
                Colour::rgb(0x07, 0x18, 0x21), // background blue
                Colour::rgb(0x0b, 0x4c, 0x2e), // dark green
                Colour::rgb(0x0f, 0x85, 0x12), // medium green
                Colour::rgb(0x21, 0xb3, 0x25), // light green
                Colour::rgb(0x5b, 0xfa, 0x3f), // bright green
            ],
            length_reduction: 0.85,
        }
    }
}

impl RenderStrategy for PixelRenderer {
    /// Walk the sentence with a plain positional turtle.
    ///
    /// Branch lengths jitter by the plant's variability; turns jitter by a
    /// few degrees. Returns an empty registry - this style has no
    /// hit-testing surface.
    fn render(
        &self,
        sentence: &Sentence,
        traits: &PlantTraits,
        _animation_time: f64,
        rng: &mut SeededRandom,
        surface: &mut dyn Surface,
    ) -> BranchIndex {
        let mut stack: Vec<PixelState> = Vec::new();

        let mut x = surface.width() / 2.0;
        let mut y = surface.height() - 20.0;
        // Heading up.
        let mut angle = -90.0f64;
        let mut length = traits.branch_length;
        let mut colour_index = 1usize;

        surface.set_transform(Transform::IDENTITY);

        for s in sentence.symbols() {
            match s.symbol {
                Symbol::Branch => {
                    let radians = angle.to_radians();
                    let jitter = 1.0 + (rng.next() * 2.0 - 1.0) * traits.variability;
                    let nx = x + radians.cos() * length * jitter;
                    let ny = y + radians.sin() * length * jitter;

                    let steps =
                        ((nx - x).abs().max((ny - y).abs()) / (self.pixel_size / 2.0)).ceil();
                    let steps = steps.max(1.0) as usize;
                    for i in 0..=steps {
                        let t = i as f64 / steps as f64;
                        self.draw_pixel(
                            x + (nx - x) * t,
                            y + (ny - y) * t,
                            colour_index,
                            surface,
                        );
                    }

                    x = nx;
                    y = ny;
                }
                Symbol::TurnRight => {
                    angle += traits.branch_angle + (rng.next() * 10.0 - 5.0);
                }
                Symbol::TurnLeft => {
                    angle -= traits.branch_angle + (rng.next() * 10.0 - 5.0);
                }
                Symbol::ScopeOpen => {
                    stack.push(PixelState {
                        x,
                        y,
                        angle,
                        length,
                        colour_index,
                    });
                    length *= self.length_reduction;
                    colour_index = (colour_index + 1).min(self.palette.len() - 1);
                }
                Symbol::ScopeClose => {
                    if let Some(state) = stack.pop() {
                        x = state.x;
                        y = state.y;
                        angle = state.angle;
                        length = state.length;
                        colour_index = state.colour_index;
                    }
                }
                // Leaves and non-terminals are invisible in this style.
                _ => {}
            }
        }

        BranchIndex::new()
    }
}
