//! The 2D drawing surface contract.
//!
//! Renderers talk to a minimal canvas-style interface: path construction,
//! fill/stroke, an affine transform stack, and a global alpha. The crate
//! ships a raster implementation (`Canvas`) and a call-recording test double
//! (`RecordingSurface`); anything else that can satisfy this trait can host
//! a plant.

use crate::types::Colour;

/// A 2D affine transform in canvas layout:
/// `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// A pure translation.
    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            e: dx,
            f: dy,
            ..Self::IDENTITY
        }
    }

    /// Apply this transform to a point.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.a + y * self.c + self.e,
            x * self.b + y * self.d + self.f,
        )
    }

    /// Compose with another transform (`other` applied first).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    pub fn translated(&self, dx: f64, dy: f64) -> Self {
        self.then(&Self::translation(dx, dy))
    }

    pub fn rotated(&self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        self.then(&Self {
            a: cos,
            b: sin,
            c: -sin,
            d: cos,
            e: 0.0,
            f: 0.0,
        })
    }

    pub fn scaled(&self, sx: f64, sy: f64) -> Self {
        self.then(&Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: sy,
            e: 0.0,
            f: 0.0,
        })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Minimal 2D drawing surface consumed by the renderers.
///
/// Path coordinates are in local space; implementations apply the current
/// transform as vertices are appended, the way a canvas context does.
pub trait Surface {
    fn width(&self) -> f64;
    fn height(&self) -> f64;

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f64, y: f64);
    fn line_to(&mut self, x: f64, y: f64);
    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64);
    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64);
    fn close_path(&mut self);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64);

    /// Push the current transform (and paint state) onto the stack.
    fn save(&mut self);
    /// Pop the stack; popping an empty stack is a no-op.
    fn restore(&mut self);

    fn translate(&mut self, dx: f64, dy: f64);
    fn rotate(&mut self, radians: f64);
    fn scale(&mut self, sx: f64, sy: f64);
    fn set_transform(&mut self, transform: Transform);
    fn transform(&self) -> Transform;

    fn set_fill_colour(&mut self, colour: Colour);
    fn set_stroke_colour(&mut self, colour: Colour);
    fn set_global_alpha(&mut self, alpha: f64);
}

/// A recorded drawing operation, in local coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    BeginPath,
    MoveTo(f64, f64),
    LineTo(f64, f64),
    QuadraticCurveTo(f64, f64, f64, f64),
    Arc(f64, f64, f64, f64, f64),
    ClosePath,
    Fill(Colour, f64),
    Stroke(Colour, f64),
    FillRect(f64, f64, f64, f64),
}

/// Surface that records operations instead of rasterizing.
///
/// Keeps a real transform stack so renderers that query `transform()` (for
/// branch tip positions, leaf relocation) behave exactly as they do against
/// the raster backend.
#[derive(Debug)]
pub struct RecordingSurface {
    width: f64,
    height: f64,
    pub ops: Vec<DrawOp>,
    transform: Transform,
    stack: Vec<Transform>,
    fill_colour: Colour,
    stroke_colour: Colour,
    alpha: f64,
}

impl RecordingSurface {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            ops: Vec::new(),
            transform: Transform::IDENTITY,
            stack: Vec::new(),
            fill_colour: Colour::BLACK,
            stroke_colour: Colour::BLACK,
            alpha: 1.0,
        }
    }

    /// Count of fill operations recorded.
    pub fn fills(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::Fill(..)))
            .count()
    }

    /// Count of fill-rect operations recorded.
    pub fn fill_rects(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, DrawOp::FillRect(..)))
            .count()
    }
}

impl Surface for RecordingSurface {
    fn width(&self) -> f64 {
        self.width
    }

    fn height(&self) -> f64 {
        self.height
    }

    fn begin_path(&mut self) {
        self.ops.push(DrawOp::BeginPath);
    }

    fn move_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f64, y: f64) {
        self.ops.push(DrawOp::LineTo(x, y));
    }

    fn quadratic_curve_to(&mut self, cx: f64, cy: f64, x: f64, y: f64) {
        self.ops.push(DrawOp::QuadraticCurveTo(cx, cy, x, y));
    }

    fn arc(&mut self, x: f64, y: f64, radius: f64, start_angle: f64, end_angle: f64) {
        self.ops.push(DrawOp::Arc(x, y, radius, start_angle, end_angle));
    }

    fn close_path(&mut self) {
        self.ops.push(DrawOp::ClosePath);
    }

    fn fill(&mut self) {
        self.ops.push(DrawOp::Fill(self.fill_colour, self.alpha));
    }

    fn stroke(&mut self) {
        self.ops.push(DrawOp::Stroke(self.stroke_colour, self.alpha));
    }

    fn fill_rect(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.ops.push(DrawOp::FillRect(x, y, w, h));
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.transform = self.transform.translated(dx, dy);
    }

    fn rotate(&mut self, radians: f64) {
        self.transform = self.transform.rotated(radians);
    }

    fn scale(&mut self, sx: f64, sy: f64) {
        self.transform = self.transform.scaled(sx, sy);
    }

    fn set_transform(&mut self, transform: Transform) {
        self.transform = transform;
    }

    fn transform(&self) -> Transform {
        self.transform
    }

    fn set_fill_colour(&mut self, colour: Colour) {
        self.fill_colour = colour;
    }

    fn set_stroke_colour(&mut self, colour: Colour) {
        self.stroke_colour = colour;
    }

    fn set_global_alpha(&mut self, alpha: f64) {
        self.alpha = alpha;
    }
}
