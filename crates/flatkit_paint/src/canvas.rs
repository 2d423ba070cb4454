//! Supersampling canvas
//!
//! Shapes are filled without anti-aliasing, the way a plain raster drawing
//! surface behaves. Drawing at several times the final size and downsampling
//! with [`Canvas::downsample`] gives the smooth result.

use crate::error::Result;
use crate::primitives::{Bounds, Joint, ShapeStyle};
use crate::raster::{check_size, ImageHandle};
use flatkit_core::Rgb;
use image::{Rgba, RgbaImage};
use tiny_skia::{
    FillRule, LineCap, LineJoin, Paint, Path, PathBuilder, Pixmap, Rect, Stroke, Transform,
};

/// Bezier handle length for quarter circle arcs
const KAPPA: f32 = 0.552_284_8;

/// A transparent RGBA drawing surface
pub struct Canvas {
    pixmap: Pixmap,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Result<Self> {
        check_size(width, height)?;
        let pixmap = Pixmap::new(width, height).ok_or(crate::PaintError::InvalidSize {
            width,
            height,
        })?;
        Ok(Self { pixmap })
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Draw a rounded rectangle inside `bounds`
    pub fn rounded_rectangle(&mut self, bounds: Bounds, radius: f32, style: &ShapeStyle) {
        self.draw_shape(bounds, style, |b, inset| {
            rounded_rect_path(b, (radius - inset).max(0.0))
        });
    }

    /// Draw an ellipse inscribed in `bounds`
    pub fn ellipse(&mut self, bounds: Bounds, style: &ShapeStyle) {
        self.draw_shape(bounds, style, |b, _| {
            let rect = Rect::from_ltrb(b.x0, b.y0, b.x1, b.y1)?;
            PathBuilder::from_oval(rect)
        });
    }

    /// Draw a polyline through `points`
    pub fn line(&mut self, points: &[(f32, f32)], width: f32, color: Rgb, joint: Joint) {
        let mut builder = PathBuilder::new();
        let mut iter = points.iter();
        let Some(&(x, y)) = iter.next() else {
            return;
        };
        builder.move_to(x, y);
        for &(x, y) in iter {
            builder.line_to(x, y);
        }
        let Some(path) = builder.finish() else {
            tracing::trace!(points = points.len(), "skipping degenerate line");
            return;
        };

        let stroke = Stroke {
            width,
            line_cap: LineCap::Butt,
            line_join: match joint {
                Joint::Miter => LineJoin::Miter,
                Joint::Curve => LineJoin::Round,
            },
            ..Stroke::default()
        };
        self.pixmap
            .stroke_path(&path, &paint(color), &stroke, Transform::identity(), None);
    }

    /// Downsample the canvas to its final size
    pub fn downsample(&self, width: u32, height: u32) -> Result<ImageHandle> {
        self.to_image().resized(width, height)
    }

    /// Convert the canvas to an image without resampling
    pub fn to_image(&self) -> ImageHandle {
        let mut pixels = RgbaImage::new(self.width(), self.height());
        for (dst, src) in pixels.pixels_mut().zip(self.pixmap.pixels()) {
            let color = src.demultiply();
            *dst = Rgba([color.red(), color.green(), color.blue(), color.alpha()]);
        }
        ImageHandle::new(pixels)
    }

    fn draw_shape<F>(&mut self, bounds: Bounds, style: &ShapeStyle, shape: F)
    where
        F: Fn(Bounds, f32) -> Option<Path>,
    {
        if bounds.is_empty() {
            return;
        }

        let width = match style.outline {
            Some(_) => style.width.max(0.0),
            None => 0.0,
        };
        let inner = bounds.inset(width);

        if let Some(fill) = style.fill {
            if let Some(path) = shape(inner, width) {
                self.fill(&path, fill, FillRule::Winding);
            }
        }

        let Some(outline) = style.outline else {
            return;
        };
        if width <= 0.0 {
            return;
        }

        // outer contour plus inner contour, filled even-odd, leaves the ring
        let mut builder = PathBuilder::new();
        if let Some(outer) = shape(bounds, 0.0) {
            builder.push_path(&outer);
        }
        if !inner.is_empty() {
            if let Some(hole) = shape(inner, width) {
                builder.push_path(&hole);
            }
        }
        if let Some(ring) = builder.finish() {
            self.fill(&ring, outline, FillRule::EvenOdd);
        }
    }

    fn fill(&mut self, path: &Path, color: Rgb, rule: FillRule) {
        self.pixmap
            .fill_path(path, &paint(color), rule, Transform::identity(), None);
    }
}

fn paint(color: Rgb) -> Paint<'static> {
    let mut paint = Paint::default();
    paint.set_color_rgba8(color.r, color.g, color.b, 255);
    paint.anti_alias = false;
    paint
}

fn rounded_rect_path(b: Bounds, radius: f32) -> Option<Path> {
    let r = radius.min(b.width() / 2.0).min(b.height() / 2.0).max(0.0);
    if r == 0.0 {
        let rect = Rect::from_ltrb(b.x0, b.y0, b.x1, b.y1)?;
        return Some(PathBuilder::from_rect(rect));
    }

    let k = r * KAPPA;
    let mut pb = PathBuilder::new();
    pb.move_to(b.x0 + r, b.y0);
    pb.line_to(b.x1 - r, b.y0);
    pb.cubic_to(b.x1 - r + k, b.y0, b.x1, b.y0 + r - k, b.x1, b.y0 + r);
    pb.line_to(b.x1, b.y1 - r);
    pb.cubic_to(b.x1, b.y1 - r + k, b.x1 - r + k, b.y1, b.x1 - r, b.y1);
    pb.line_to(b.x0 + r, b.y1);
    pb.cubic_to(b.x0 + r - k, b.y1, b.x0, b.y1 - r + k, b.x0, b.y1 - r);
    pb.line_to(b.x0, b.y0 + r);
    pb.cubic_to(b.x0, b.y0 + r - k, b.x0 + r - k, b.y0, b.x0 + r, b.y0);
    pb.close();
    pb.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb = Rgb::new(255, 0, 0);
    const BLUE: Rgb = Rgb::new(0, 0, 255);

    fn pixel(image: &ImageHandle, x: u32, y: u32) -> [u8; 4] {
        image.pixels().get_pixel(x, y).0
    }

    #[test]
    fn test_filled_rounded_rectangle() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.rounded_rectangle(
            Bounds::new(0.0, 0.0, 100.0, 100.0),
            30.0,
            &ShapeStyle::filled(RED),
        );
        let image = canvas.to_image();
        assert_eq!(pixel(&image, 50, 50), [255, 0, 0, 255]);
        // the corner is cut off by the radius
        assert_eq!(pixel(&image, 1, 1)[3], 0);
    }

    #[test]
    fn test_outline_is_drawn_inside_bounds() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.rounded_rectangle(
            Bounds::new(0.0, 0.0, 100.0, 100.0),
            0.0,
            &ShapeStyle::filled(RED).with_outline(BLUE, 10.0),
        );
        let image = canvas.to_image();
        assert_eq!(pixel(&image, 5, 50), [0, 0, 255, 255]);
        assert_eq!(pixel(&image, 50, 50), [255, 0, 0, 255]);
    }

    #[test]
    fn test_outline_only_leaves_center_transparent() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.ellipse(
            Bounds::new(0.0, 0.0, 100.0, 100.0),
            &ShapeStyle::outlined(BLUE, 10.0),
        );
        let image = canvas.to_image();
        assert_eq!(pixel(&image, 50, 50)[3], 0);
        assert_eq!(pixel(&image, 50, 4), [0, 0, 255, 255]);
    }

    #[test]
    fn test_line_is_stroked() {
        let mut canvas = Canvas::new(100, 100).unwrap();
        canvas.line(&[(0.0, 50.0), (100.0, 50.0)], 10.0, RED, Joint::Curve);
        let image = canvas.to_image();
        assert_eq!(pixel(&image, 50, 50), [255, 0, 0, 255]);
        assert_eq!(pixel(&image, 50, 20)[3], 0);
    }

    #[test]
    fn test_downsample_smooths_edges() {
        let mut canvas = Canvas::new(400, 400).unwrap();
        canvas.ellipse(
            Bounds::new(0.0, 0.0, 400.0, 400.0),
            &ShapeStyle::filled(RED),
        );
        let small = canvas.downsample(20, 20).unwrap();
        assert_eq!((small.width(), small.height()), (20, 20));

        let alphas: Vec<u8> = small.pixels().pixels().map(|p| p.0[3]).collect();
        assert!(alphas.iter().any(|a| *a > 0 && *a < 255), "edge pixels blend");
        assert_eq!(pixel(&small, 10, 10)[3], 255);
    }

    #[test]
    fn test_degenerate_shapes_are_ignored() {
        let mut canvas = Canvas::new(10, 10).unwrap();
        canvas.ellipse(Bounds::new(5.0, 5.0, 5.0, 9.0), &ShapeStyle::filled(RED));
        canvas.line(&[(1.0, 1.0)], 2.0, RED, Joint::Miter);
        canvas.line(&[], 2.0, RED, Joint::Miter);
        assert!(canvas.to_image().pixels().pixels().all(|p| p.0[3] == 0));
    }
}
