use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use crate::foundation::core::now_ms;
use crate::foundation::error::LedviewResult;
use crate::render::frame::FrameRenderer;

/// Drives a [`FrameRenderer`] at a fixed refresh cadence.
///
/// Ticks are cooperative and never overlap: each iteration renders one full
/// frame (including observer fan-out), then sleeps out the remainder of the
/// period. Every captured frame is therefore internally consistent.
#[derive(Clone, Copy, Debug)]
pub struct RenderLoop {
    period: Duration,
}

impl RenderLoop {
    /// Create a loop targeting `refresh_hz` ticks per second (clamped to >= 1).
    pub fn new(refresh_hz: u32) -> Self {
        let hz = refresh_hz.max(1);
        Self {
            period: Duration::from_secs_f64(1.0 / f64::from(hz)),
        }
    }

    /// Run one tick with the given wall-clock timestamp.
    pub fn step(&self, renderer: &mut FrameRenderer, now: u64) -> LedviewResult<()> {
        renderer.render_tick(now)
    }

    /// Run continuously until `stop` is set.
    ///
    /// A render error terminates the loop; it indicates configuration that
    /// must be resolved before rendering begins.
    pub fn run(&self, renderer: &mut FrameRenderer, stop: &AtomicBool) -> LedviewResult<()> {
        while !stop.load(Ordering::Relaxed) {
            let started = Instant::now();
            self.step(renderer, now_ms())?;
            let elapsed = started.elapsed();
            if elapsed < self.period {
                std::thread::sleep(self.period - elapsed);
            }
        }
        Ok(())
    }
}
