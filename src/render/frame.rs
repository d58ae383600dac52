use kurbo::Point;

use crate::foundation::core::{DEFAULT_MAX_CANVAS_DIM, Rgb8};
use crate::foundation::error::{LedviewError, LedviewResult};
use crate::foundation::math::{lighten, mul_div255_u8};
use crate::render::geometry::{Viewport, fit_viewport};
use crate::render::sprite::SpriteTinter;

/// A rendered frame as RGBA8 pixels.
///
/// Ledview frames are opaque (alpha 255 everywhere): lights are composited
/// additively over an opaque black background.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameRGBA {
    /// Frame width in pixels.
    pub width: u32,
    /// Frame height in pixels.
    pub height: u32,
    /// RGBA8 bytes, tightly packed, row-major.
    pub data: Vec<u8>,
}

impl FrameRGBA {
    /// Allocate an opaque black frame.
    pub fn black(width: u32, height: u32) -> Self {
        let mut data = vec![0u8; (width as usize) * (height as usize) * 4];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Self {
            width,
            height,
            data,
        }
    }
}

/// Synchronous per-frame observer.
///
/// Observers are invoked in registration order after each tick, receiving the
/// finished canvas by reference. The canvas is overwritten in place on the
/// next tick, so an observer that wants to retain a frame must deep-copy it.
/// Observers travel with the renderer onto the render thread, hence `Send`.
pub trait FrameObserver: Send {
    fn on_frame(&mut self, frame: &FrameRGBA, now_ms: u64);
}

/// Renderer tunables.
#[derive(Clone, Copy, Debug)]
pub struct RenderOpts {
    /// Longest canvas dimension the fitted viewport may occupy.
    pub max_canvas_dim: u32,
}

impl Default for RenderOpts {
    fn default() -> Self {
        Self {
            max_canvas_dim: DEFAULT_MAX_CANVAS_DIM,
        }
    }
}

/// Orchestrates one full-frame draw per tick.
///
/// Owns the layout, the transient color frame, the fitted viewport, and the
/// canvas pixel buffer. The buffer is written every tick; observers must copy,
/// never retain.
pub struct FrameRenderer {
    opts: RenderOpts,
    tinter: SpriteTinter,
    layout: Option<Vec<Point>>,
    colors: Option<Vec<Rgb8>>,
    viewport: Option<Viewport>,
    canvas: Option<FrameRGBA>,
    observers: Vec<Box<dyn FrameObserver>>,
}

impl FrameRenderer {
    pub fn new(tinter: SpriteTinter, opts: RenderOpts) -> Self {
        Self {
            opts,
            tinter,
            layout: None,
            colors: None,
            viewport: None,
            canvas: None,
            observers: Vec::new(),
        }
    }

    /// Replace the light layout wholesale and refit the viewport.
    ///
    /// An empty layout clears all derived state and disables rendering until
    /// a non-empty layout arrives.
    pub fn set_layout(&mut self, points: Vec<Point>) -> LedviewResult<()> {
        if points.is_empty() {
            self.layout = None;
            self.viewport = None;
            self.canvas = None;
            return Ok(());
        }
        let viewport = fit_viewport(&points, self.tinter.footprint(), self.opts.max_canvas_dim)?;
        self.canvas = Some(FrameRGBA::black(
            viewport.canvas.width,
            viewport.canvas.height,
        ));
        self.viewport = Some(viewport);
        self.layout = Some(points);
        Ok(())
    }

    /// Replace the per-light color frame wholesale.
    pub fn set_colors(&mut self, colors: Vec<Rgb8>) {
        self.colors = Some(colors);
    }

    /// Register a frame observer. Observers run in registration order.
    pub fn add_observer(&mut self, observer: Box<dyn FrameObserver>) {
        self.observers.push(observer);
    }

    pub fn viewport(&self) -> Option<&Viewport> {
        self.viewport.as_ref()
    }

    /// Draw one frame and fan it out to the observers.
    ///
    /// No-op while layout or color data is absent. The light count is clamped
    /// to the shorter of the two sequences, so a color frame that is shorter
    /// or longer than the layout never indexes out of bounds.
    pub fn render_tick(&mut self, now_ms: u64) -> LedviewResult<()> {
        let (Some(layout), Some(colors), Some(viewport)) =
            (self.layout.as_ref(), self.colors.as_ref(), self.viewport)
        else {
            return Ok(());
        };
        let canvas = self
            .canvas
            .as_mut()
            .ok_or_else(|| LedviewError::render("canvas buffer missing for fitted viewport"))?;

        for px in canvas.data.chunks_exact_mut(4) {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            px[3] = 255;
        }

        let sprite_h = self.tinter.height();
        let sprite_w = self.tinter.width();
        let count = layout.len().min(colors.len());
        for i in 0..count {
            let (x, y) = viewport.project(layout[i], sprite_h);
            let tinted = self.tinter.tint(colors[i]);
            blit_lighten(canvas, tinted, sprite_w, sprite_h, x, y);
        }

        let frame = &*canvas;
        for obs in self.observers.iter_mut() {
            obs.on_frame(frame, now_ms);
        }
        Ok(())
    }
}

/// Composite an RGBA8 sprite onto the canvas with additive lighten blending.
///
/// The source is weighted by its own alpha, then each channel takes the
/// per-pixel maximum, so overlapping sprites combine instead of occluding.
/// Out-of-bounds rows and columns are clipped.
fn blit_lighten(dst: &mut FrameRGBA, src: &[u8], src_w: u32, src_h: u32, x: i64, y: i64) {
    let dst_w = i64::from(dst.width);
    let dst_h = i64::from(dst.height);
    for sy in 0..i64::from(src_h) {
        let dy = y + sy;
        if dy < 0 || dy >= dst_h {
            continue;
        }
        for sx in 0..i64::from(src_w) {
            let dx = x + sx;
            if dx < 0 || dx >= dst_w {
                continue;
            }
            let si = ((sy * i64::from(src_w) + sx) * 4) as usize;
            let di = ((dy * dst_w + dx) * 4) as usize;
            let a = u16::from(src[si + 3]);
            if a == 0 {
                continue;
            }
            for c in 0..3 {
                let weighted = mul_div255_u8(u16::from(src[si + c]), a);
                dst.data[di + c] = lighten(dst.data[di + c], weighted);
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/frame.rs"]
mod tests;
