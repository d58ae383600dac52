use std::sync::{Arc, Mutex, MutexGuard};

use crate::foundation::core::CapturedFrame;
use crate::render::frame::{FrameObserver, FrameRGBA};

/// Records rendered frames with wall-clock timestamps while armed.
///
/// Each recorded frame is a deep copy of the canvas, so later canvas
/// mutations never affect the stored sequence. The sequence is unbounded
/// while armed; it is owned exclusively by the recorder until handed off via
/// [`FrameCapture::take_frames`] or discarded via [`FrameCapture::clear`].
#[derive(Debug, Default)]
pub struct FrameCapture {
    armed: bool,
    frames: Vec<CapturedFrame>,
}

impl FrameCapture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start recording. Idempotent: arming an armed recorder does not create
    /// a second capture stream.
    pub fn arm(&mut self) {
        self.armed = true;
    }

    /// Stop recording. Idempotent; already-captured frames are kept.
    pub fn disarm(&mut self) {
        self.armed = false;
    }

    pub fn is_armed(&self) -> bool {
        self.armed
    }

    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Record one frame if armed, no-op otherwise.
    pub fn record(&mut self, frame: &FrameRGBA, timestamp_ms: u64) {
        if !self.armed {
            return;
        }
        self.frames.push(CapturedFrame {
            timestamp_ms,
            image: frame.clone(),
        });
    }

    /// Hand the captured sequence off wholesale, leaving the recorder empty.
    pub fn take_frames(&mut self) -> Vec<CapturedFrame> {
        std::mem::take(&mut self.frames)
    }

    /// Discard all captured frames.
    pub fn clear(&mut self) {
        self.frames.clear();
    }
}

impl FrameObserver for FrameCapture {
    fn on_frame(&mut self, frame: &FrameRGBA, now_ms: u64) {
        self.record(frame, now_ms);
    }
}

/// Shared handle to a [`FrameCapture`].
///
/// One clone registers as a frame observer on the renderer while another is
/// held by the capture controller for arm/disarm/export commands.
#[derive(Clone, Debug, Default)]
pub struct SharedCapture(Arc<Mutex<FrameCapture>>);

impl SharedCapture {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, FrameCapture> {
        self.0.lock().expect("capture mutex poisoned")
    }

    pub fn arm(&self) {
        self.lock().arm();
    }

    pub fn disarm(&self) {
        self.lock().disarm();
    }

    pub fn is_armed(&self) -> bool {
        self.lock().is_armed()
    }

    pub fn frame_count(&self) -> usize {
        self.lock().frame_count()
    }

    pub fn take_frames(&self) -> Vec<CapturedFrame> {
        self.lock().take_frames()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }
}

impl FrameObserver for SharedCapture {
    fn on_frame(&mut self, frame: &FrameRGBA, now_ms: u64) {
        self.lock().record(frame, now_ms);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/recorder.rs"]
mod tests;
