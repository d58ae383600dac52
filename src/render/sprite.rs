use anyhow::Context;

use crate::foundation::core::{Canvas, Rgb8};
use crate::foundation::error::LedviewResult;
use crate::foundation::math::remap_channel;

/// Renders tinted copies of a base sprite for per-light colors.
///
/// Only the sprite's alpha silhouette is retained; a tint fills that
/// silhouette with one solid remapped color ("source-in" recolor), preserving
/// anti-aliased edges and transparency while discarding the sprite's original
/// color channels.
pub struct SpriteTinter {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
    floor: u8,
    scratch: Vec<u8>,
}

impl SpriteTinter {
    /// Build a tinter from encoded image bytes (PNG etc.).
    ///
    /// `floor` is the minimum rendered brightness for an all-zero color.
    pub fn from_image_bytes(bytes: &[u8], floor: u8) -> LedviewResult<Self> {
        let dyn_img = image::load_from_memory(bytes).context("decode sprite image")?;
        let rgba = dyn_img.to_rgba8();
        let (width, height) = rgba.dimensions();
        let alpha = rgba.pixels().map(|p| p.0[3]).collect::<Vec<u8>>();
        Ok(Self::from_alpha(width, height, alpha, floor))
    }

    /// Build a soft radial disc sprite, used when no sprite asset is supplied.
    ///
    /// Alpha falls off quadratically from the center to fully transparent at
    /// the edge, giving a glow-like silhouette.
    pub fn radial(size: u32, floor: u8) -> Self {
        let size = size.max(1);
        let center = (f64::from(size) - 1.0) / 2.0;
        let radius = f64::from(size) / 2.0;
        let mut alpha = Vec::with_capacity((size as usize) * (size as usize));
        for y in 0..size {
            for x in 0..size {
                let dx = f64::from(x) - center;
                let dy = f64::from(y) - center;
                let d = (dx * dx + dy * dy).sqrt();
                let t = (1.0 - d / radius).clamp(0.0, 1.0);
                alpha.push((t * t * 255.0).round() as u8);
            }
        }
        Self::from_alpha(size, size, alpha, floor)
    }

    fn from_alpha(width: u32, height: u32, alpha: Vec<u8>, floor: u8) -> Self {
        let scratch = vec![0u8; alpha.len() * 4];
        Self {
            width,
            height,
            alpha,
            floor,
            scratch,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Sprite dimensions as a [`Canvas`].
    pub fn footprint(&self) -> Canvas {
        Canvas {
            width: self.width,
            height: self.height,
        }
    }

    /// Tint the sprite with `color`, remapped through the brightness floor.
    ///
    /// Returns RGBA8 bytes aliasing an internal scratch buffer; the slice is
    /// valid only until the next `tint` call. Callers that need the pixels
    /// past that point must copy them.
    pub fn tint(&mut self, color: Rgb8) -> &[u8] {
        let r = remap_channel(color.r, self.floor);
        let g = remap_channel(color.g, self.floor);
        let b = remap_channel(color.b, self.floor);
        for (px, &a) in self.scratch.chunks_exact_mut(4).zip(self.alpha.iter()) {
            px[0] = r;
            px[1] = g;
            px[2] = b;
            px[3] = a;
        }
        &self.scratch
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/sprite.rs"]
mod tests;
