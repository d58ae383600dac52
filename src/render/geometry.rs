use kurbo::{Point, Vec2};

use crate::foundation::core::Canvas;
use crate::foundation::error::{LedviewError, LedviewResult};

/// Derived mapping from layout space onto the canvas.
///
/// A viewport is recomputed whenever the layout is replaced and is read-only
/// between recomputations.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    /// Uniform scale from layout units to pixels. Always > 0.
    pub scale: f64,
    /// Translation applied to layout points before scaling.
    pub offset: Vec2,
    /// Fitted canvas dimensions, sprite footprint included.
    pub canvas: Canvas,
}

impl Viewport {
    /// Map a layout point to the top-left pixel position of its sprite.
    ///
    /// Layout Y grows up while canvas Y grows down, so the Y axis is flipped.
    /// Subtracting the sprite height anchors the sprite by its top-left corner
    /// at the flipped position.
    pub fn project(&self, p: Point, sprite_height: u32) -> (i64, i64) {
        let x = (p.x + self.offset.x) * self.scale;
        let y = f64::from(self.canvas.height) - (p.y + self.offset.y) * self.scale
            - f64::from(sprite_height);
        (x.round() as i64, y.round() as i64)
    }
}

/// Fit a point cloud plus sprite footprint into a bounded canvas.
///
/// The longer layout axis exactly fills `max_dim` minus the sprite footprint;
/// the shorter axis is sized proportionally, preserving aspect ratio. The
/// sprite's own dimensions are reserved at the far edge so no sprite is
/// clipped.
///
/// A zero-span layout (single point, or all points coincident) falls back to
/// `scale = 1.0` instead of dividing by zero.
pub fn fit_viewport(points: &[Point], sprite: Canvas, max_dim: u32) -> LedviewResult<Viewport> {
    if points.is_empty() {
        return Err(LedviewError::validation(
            "viewport fit requires at least one layout point",
        ));
    }
    if max_dim <= sprite.width || max_dim <= sprite.height {
        return Err(LedviewError::validation(
            "max canvas dimension must exceed the sprite dimensions",
        ));
    }

    let mut x_min = f64::INFINITY;
    let mut x_max = f64::NEG_INFINITY;
    let mut y_min = f64::INFINITY;
    let mut y_max = f64::NEG_INFINITY;
    for p in points {
        if !p.x.is_finite() || !p.y.is_finite() {
            return Err(LedviewError::validation(
                "layout points must be finite coordinates",
            ));
        }
        x_min = x_min.min(p.x);
        x_max = x_max.max(p.x);
        y_min = y_min.min(p.y);
        y_max = y_max.max(p.y);
    }

    let span_x = x_max - x_min;
    let span_y = y_max - y_min;
    let avail_w = f64::from(max_dim - sprite.width);
    let avail_h = f64::from(max_dim - sprite.height);

    let (scale, width, height) = if span_x == 0.0 && span_y == 0.0 {
        // Degenerate geometry: every point coincides. Render at unit scale.
        (1.0, sprite.width, sprite.height)
    } else if span_x > span_y {
        let scale = avail_w / span_x;
        let height = (span_y * scale).round() as u32 + sprite.height;
        (scale, max_dim, height)
    } else {
        let scale = avail_h / span_y;
        let width = (span_x * scale).round() as u32 + sprite.width;
        (scale, width, max_dim)
    };

    Ok(Viewport {
        scale,
        offset: Vec2::new(-x_min, -y_min),
        canvas: Canvas::new(width, height)?,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/render/geometry.rs"]
mod tests;
