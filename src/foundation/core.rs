use crate::foundation::error::{LedviewError, LedviewResult};

use crate::render::frame::FrameRGBA;

/// Longest canvas dimension the fitted viewport may occupy, in pixels.
pub const DEFAULT_MAX_CANVAS_DIM: u32 = 1000;

/// Minimum rendered brightness for a fully "off" (0,0,0) light.
///
/// An off light still renders at this dim floor so it stays distinguishable
/// from the black background.
pub const DEFAULT_BRIGHTNESS_FLOOR: u8 = 30;

/// Default GIF encoder worker-pool size.
pub const DEFAULT_ENCODE_WORKERS: usize = 4;

/// Delay assigned to a single-frame export, in milliseconds.
///
/// With only one captured frame there is no next timestamp to difference
/// against.
pub const DEFAULT_SINGLE_FRAME_DELAY_MS: u32 = 1000;

/// One streamed light color, straight RGB with each channel in 0..=255.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub fn black() -> Self {
        Self { r: 0, g: 0, b: 0 }
    }
}

impl From<(u8, u8, u8)> for Rgb8 {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Self { r, g, b }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> LedviewResult<Self> {
        if width == 0 || height == 0 {
            return Err(LedviewError::validation("Canvas dimensions must be > 0"));
        }
        Ok(Self { width, height })
    }

    pub fn pixel_count(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// One timestamped snapshot of the rendered canvas.
///
/// The image is an owned deep copy, independent of later canvas mutations.
#[derive(Clone, Debug)]
pub struct CapturedFrame {
    /// Wall-clock capture time in milliseconds.
    pub timestamp_ms: u64,
    pub image: FrameRGBA,
}

/// Current wall-clock time in milliseconds since the Unix epoch.
pub fn now_ms() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
