//! Vector turtle renderer.
//!
//! Interprets an annotated sentence left to right against a surface, drawing
//! tapered branch trapezoids and leaf glyphs. Growth is driven by each
//! symbol's age through a logistic age factor; a whole-plant width envelope
//! follows the animation clock. Seasonal policy modifies leaf drawing only.

use crate::grammar::Sentence;
use crate::prune::{Branch, BranchIndex};
use crate::rng::SeededRandom;
use crate::types::{Colour, PlantTraits, Season, Symbol, SymbolParams};

use super::surface::{Surface, Transform};
use super::RenderStrategy;

/// Extent of the container the plant grows from.
///
/// Only the footprint participates in rendering: autumn leaf-fall needs to
/// know where the rim and the soil line are. The decorative pot itself is
/// not drawn here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Planter {
    pub radius: f64,
    pub height: f64,
    pub depth: f64,
}

impl Default for Planter {
    fn default() -> Self {
        Self {
            radius: 65.0,
            height: 85.0,
            depth: 15.0,
        }
    }
}

/// Logistic age factor in `[0, 1)`: how grown an element is at `age`.
pub fn age_factor(age: f64) -> f64 {
    (2.0 / (1.0 + (-age).exp()) - 1.0).max(0.0)
}

/// The animated, seasonal vector renderer.
#[derive(Debug, Clone)]
pub struct TurtleRenderer {
    pub season: Season,
    /// Height of the ground strip at the bottom of the surface.
    pub floor_height: f64,
    pub planter: Planter,
}

impl Default for TurtleRenderer {
    fn default() -> Self {
        Self {
            season: Season::default(),
            floor_height: 50.0,
            planter: Planter::default(),
        }
    }
}

impl TurtleRenderer {
    pub fn new(season: Season) -> Self {
        Self {
            season,
            ..Self::default()
        }
    }

    /// Draw the sentence and return the branch registry for hit-testing.
    ///
    /// `animation_time` is the elapsed animation clock value; it drives the
    /// whole-plant width envelope. The plant origin is bottom-centre, above
    /// the planter, heading up.
    pub fn render(
        &self,
        sentence: &Sentence,
        traits: &PlantTraits,
        animation_time: f64,
        rng: &mut SeededRandom,
        surface: &mut dyn Surface,
    ) -> BranchIndex {
        let width_envelope = (2.0 / (1.0 + (-animation_time / 10.0).exp()) - 1.0).max(0.0);
        let width_by_age = traits.branch_width * width_envelope.max(0.25);

        let mut branches = BranchIndex::new();
        let mut width_stack: Vec<f64> = Vec::new();
        let mut width = width_by_age;

        let origin_x = surface.width() / 2.0;
        let origin_y = surface.height() - self.floor_height - self.planter.height;
        surface.save();
        surface.translate(origin_x, origin_y);

        for (i, s) in sentence.symbols().iter().enumerate() {
            let grown = age_factor(s.age);

            match s.symbol {
                Symbol::Branch => {
                    surface.set_fill_colour(traits.branch_colour);
                    surface.set_stroke_colour(traits.branch_colour);

                    let w1 = width;
                    // The taper register narrows on every segment, even ones
                    // too young to draw, so siblings stay consistent.
                    width *= 1.0 - (1.0 - traits.width_falloff).powi(3);
                    width = width.max(width_by_age * 0.25);
                    let w2 = width;

                    let length = match s.params {
                        SymbolParams::BranchSegment { length } => length,
                        _ => 0.0,
                    };
                    let l = length * grown;

                    if grown > 0.0 {
                        surface.begin_path();
                        surface.move_to(-w2 / 2.0, -l);
                        surface.line_to(-w1 / 2.0, 1.0);
                        surface.line_to(w1 / 2.0, 1.0);
                        surface.line_to(w2 / 2.0, -l);
                        surface.line_to(-w2 / 2.0, -l);
                        surface.close_path();
                        surface.fill();

                        // Faint edge lines give the segment definition.
                        surface.set_global_alpha(0.2);
                        surface.begin_path();
                        surface.move_to(-w2 / 2.0, -l);
                        surface.line_to(-w1 / 2.0, 0.0);
                        surface.stroke();

                        surface.begin_path();
                        surface.move_to(w1 / 2.0, 0.0);
                        surface.line_to(w2 / 2.0, -l);
                        surface.stroke();

                        let tip = surface.transform().apply(0.0, -l);
                        branches.push(Branch {
                            sentence_index: i,
                            tip,
                            width: w2,
                            height: l,
                        });

                        surface.translate(0.0, -l);
                        surface.set_global_alpha(1.0);
                    }
                }
                Symbol::Leaf | Symbol::Berry => {
                    if grown > 0.0 {
                        self.draw_leaves(s.symbol, s.params, grown, traits, rng, surface);
                    }
                }
                Symbol::TurnRight => {
                    if let SymbolParams::Turn { angle } = s.params {
                        surface.rotate(angle.to_radians());
                    }
                }
                Symbol::TurnLeft => {
                    if let SymbolParams::Turn { angle } = s.params {
                        surface.rotate(-angle.to_radians());
                    }
                }
                Symbol::ScopeOpen => {
                    surface.save();
                    width_stack.push(width);
                }
                Symbol::ScopeClose => {
                    // Tolerate unmatched closers.
                    if let Some(w) = width_stack.pop() {
                        surface.restore();
                        width = w;
                    }
                }
                Symbol::Other(_) => {}
            }
        }

        surface.restore();
        branches
    }

    /// Draw a leaf (plus its repeats) at the current turtle position.
    fn draw_leaves(
        &self,
        symbol: Symbol,
        params: SymbolParams,
        grown: f64,
        traits: &PlantTraits,
        rng: &mut SeededRandom,
        surface: &mut dyn Surface,
    ) {
        let (leaf_w, leaf_l) = match params {
            SymbolParams::Leaf { width, length } => (width, length),
            _ => (traits.leaf_width, traits.leaf_length),
        };

        // The brightness draw happens for berries too, keeping the RNG
        // cursor in step regardless of symbol kind.
        let jitter = rng.range(0.8, 1.2);
        let colour = if symbol == Symbol::Berry {
            Colour::BERRY
        } else {
            traits.leaf_colour.adjust(jitter)
        };

        surface.set_global_alpha(traits.leaf_alpha);

        self.draw_leaf(colour, leaf_w, leaf_l, grown, traits, rng, surface);

        if traits.leaf_repeat > 1 {
            surface.save();
            for r in 0..traits.leaf_repeat {
                surface.rotate(((r + 1) as f64 * 5.0).to_radians());
                self.draw_leaf(colour, leaf_w, leaf_l, grown, traits, rng, surface);
            }
            surface.restore();

            surface.save();
            for r in 0..traits.leaf_repeat {
                surface.rotate((-((r + 1) as f64) * 5.0).to_radians());
                self.draw_leaf(colour, leaf_w, leaf_l, grown, traits, rng, surface);
            }
            surface.restore();
        }

        surface.set_global_alpha(1.0);
    }

    /// Draw one leaf glyph, applying the seasonal policy.
    fn draw_leaf(
        &self,
        colour: Colour,
        leaf_w: f64,
        leaf_l: f64,
        grown: f64,
        traits: &PlantTraits,
        rng: &mut SeededRandom,
        surface: &mut dyn Surface,
    ) {
        surface.save();

        // Winter: almost all leaves are gone.
        if self.season == Season::Winter && rng.next() > 0.05 {
            surface.restore();
            return;
        }

        surface.set_fill_colour(colour);
        surface.set_stroke_colour(colour);

        // Autumn: a tenth of the leaves have fallen to the ground. The
        // nested rolls around the planter rim thin them out further where
        // the pot would occlude them.
        if self.season == Season::Autumn && rng.next() > 0.9 {
            let (abs_x, _) = surface.transform().apply(0.0, 0.0);
            let ground_y = surface.height() - self.floor_height;
            surface.set_transform(Transform::translation(abs_x, ground_y));

            let centre = surface.width() / 2.0;
            let rim = self.planter.radius;

            if abs_x > centre - rim - 10.0 && abs_x < centre + rim + 10.0 {
                if rng.next() > 0.5 {
                    if rng.next() > 0.5 {
                        surface.restore();
                        return;
                    }
                    surface.translate(0.0, -self.planter.height - self.planter.depth / 2.0);
                    if abs_x < centre - rim + 30.0 || abs_x > centre + rim - 30.0 {
                        surface.restore();
                        return;
                    }
                } else {
                    surface.translate(0.0, 30.0);
                }
            } else {
                surface.translate(0.0, rng.next() * 50.0 - 25.0);
            }

            surface.rotate(rng.next() * std::f64::consts::TAU);
        }

        surface.scale(leaf_w * grown, leaf_l * grown);
        draw_glyph(traits.leaf_kind, surface);

        surface.restore();
    }
}

impl RenderStrategy for TurtleRenderer {
    fn render(
        &self,
        sentence: &Sentence,
        traits: &PlantTraits,
        animation_time: f64,
        rng: &mut SeededRandom,
        surface: &mut dyn Surface,
    ) -> BranchIndex {
        TurtleRenderer::render(self, sentence, traits, animation_time, rng, surface)
    }
}

/// The four fixed leaf glyph shapes, in unit leaf space.
fn draw_glyph(kind: u8, surface: &mut dyn Surface) {
    match kind {
        0 => {
            surface.begin_path();
            surface.move_to(0.0, 0.0);
            surface.line_to(1.0, -1.0);
            surface.line_to(0.0, -4.0);
            surface.line_to(-1.0, -1.0);
            surface.line_to(0.0, 0.0);
            surface.close_path();
            surface.fill();
            surface.stroke();
        }
        2 => {
            surface.begin_path();
            surface.move_to(0.0, 0.0);
            surface.line_to(1.0, -1.0);
            surface.line_to(1.0, -4.0);
            surface.line_to(0.0, -5.0);
            surface.line_to(-1.0, -4.0);
            surface.line_to(-1.0, -1.0);
            surface.line_to(0.0, 0.0);
            surface.close_path();
            surface.fill();
            surface.stroke();
            // Midrib.
            surface.fill_rect(0.0, 0.0, 0.25, -5.0);
        }
        // 1 and 3 are round berries/buds.
        _ => {
            surface.begin_path();
            surface.arc(0.0, -2.0, 2.0, 0.0, std::f64::consts::TAU);
            surface.close_path();
            surface.fill();
            surface.stroke();
        }
    }
}
