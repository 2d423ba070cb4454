//! Geometric primitives

use flatkit_core::Rgb;

/// An axis-aligned box given by its corners, `(x0, y0)` to `(x1, y1)`
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Bounds {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl Bounds {
    pub const fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> f32 {
        self.y1 - self.y0
    }

    /// Shrink by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            x0: self.x0 + amount,
            y0: self.y0 + amount,
            x1: self.x1 - amount,
            y1: self.y1 - amount,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width() <= 0.0 || self.height() <= 0.0
    }
}

/// How consecutive line segments are joined
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Joint {
    #[default]
    Miter,
    /// Rounded joints, for check marks and chevrons
    Curve,
}

/// Fill and outline of a closed shape
///
/// The outline is drawn inside the shape's bounds, `width` pixels thick.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ShapeStyle {
    pub fill: Option<Rgb>,
    pub outline: Option<Rgb>,
    pub width: f32,
}

impl ShapeStyle {
    pub const fn filled(fill: Rgb) -> Self {
        Self {
            fill: Some(fill),
            outline: None,
            width: 0.0,
        }
    }

    pub const fn outlined(outline: Rgb, width: f32) -> Self {
        Self {
            fill: None,
            outline: Some(outline),
            width,
        }
    }

    pub const fn with_outline(mut self, outline: Rgb, width: f32) -> Self {
        self.outline = Some(outline);
        self.width = width;
        self
    }

    pub const fn with_fill(mut self, fill: Rgb) -> Self {
        self.fill = Some(fill);
        self
    }
}
