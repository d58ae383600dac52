//! Ledview renders a live visualization of an addressable LED strip.
//!
//! A strip is a sparse, irregularly placed set of point lights. Each light is
//! driven by a streamed RGB value and drawn as a tinted copy of a shared
//! sprite, positioned according to a 2D layout map. Rendered frames can be
//! captured with wall-clock timestamps and exported as an animated GIF whose
//! frame delays reproduce the observed pacing.
//!
//! # Pipeline overview
//!
//! 1. **Fit**: `&[Point] -> Viewport` (uniform scale + offset into a bounded canvas)
//! 2. **Tint**: `Rgb8 -> tinted sprite` (source-in recolor of the sprite silhouette)
//! 3. **Render**: one tick composites every light additively into a [`FrameRGBA`]
//! 4. **Capture** (optional): armed observers deep-copy each frame with a timestamp
//! 5. **Encode** (optional): captured frames -> animated GIF on a worker pool
//!
//! Key design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Single-writer canvas**: the renderer owns its pixel buffer; observers
//!   receive it by reference and must copy to retain it.
//! - **Wholesale state replacement**: layout and color data are replaced, never
//!   mutated in place, and the viewport is recomputed only on layout change.
#![forbid(unsafe_code)]

mod capture;
mod encode;
mod foundation;
mod render;
mod source;
mod status;

pub use capture::recorder::{FrameCapture, SharedCapture};
pub use capture::session::{CaptureController, CaptureState, ExportEvent};
pub use encode::gif::{EncodeConfig, encode_animation, frame_delays};
pub use foundation::core::{
    Canvas, CapturedFrame, DEFAULT_BRIGHTNESS_FLOOR, DEFAULT_ENCODE_WORKERS,
    DEFAULT_MAX_CANVAS_DIM, DEFAULT_SINGLE_FRAME_DELAY_MS, Rgb8, now_ms,
};
pub use foundation::error::{LedviewError, LedviewResult};
pub use kurbo::{Point, Vec2};
pub use render::driver::RenderLoop;
pub use render::frame::{FrameObserver, FrameRGBA, FrameRenderer, RenderOpts};
pub use render::geometry::{Viewport, fit_viewport};
pub use render::sprite::SpriteTinter;
pub use source::layout_file::{layout_from_json, layout_from_path};
pub use source::provider::{
    ColorUpdate, DataSource, LayoutUpdate, PollDriver, StreamObserver, StreamUpdate,
};
pub use status::{export_status, recording_status, stream_status};
