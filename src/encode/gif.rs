use rayon::prelude::*;

use crate::foundation::core::{
    CapturedFrame, DEFAULT_ENCODE_WORKERS, DEFAULT_SINGLE_FRAME_DELAY_MS,
};
use crate::foundation::error::{LedviewError, LedviewResult};

/// GIF encoder tunables.
#[derive(Clone, Copy, Debug)]
pub struct EncodeConfig {
    /// Worker-pool size for per-frame palette quantization.
    pub workers: usize,
    /// Quantization speed in `1..=30`; lower is slower and higher fidelity.
    pub speed: i32,
    /// Delay assigned when only one frame was captured, in milliseconds.
    pub default_frame_delay_ms: u32,
}

impl Default for EncodeConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_ENCODE_WORKERS,
            speed: 10,
            default_frame_delay_ms: DEFAULT_SINGLE_FRAME_DELAY_MS,
        }
    }
}

/// Derive per-frame delays from capture timestamps, in milliseconds.
///
/// `delay[i] = ts[i+1] - ts[i]`, preserving the observed pacing even under a
/// variable capture rate. The final frame has no next timestamp to difference
/// against, so it repeats the penultimate delay; a single frame gets
/// `default_ms`.
pub fn frame_delays(timestamps: &[u64], default_ms: u32) -> Vec<u32> {
    match timestamps.len() {
        0 => Vec::new(),
        1 => vec![default_ms],
        n => {
            let mut delays = Vec::with_capacity(n);
            for pair in timestamps.windows(2) {
                delays.push(pair[1].saturating_sub(pair[0]) as u32);
            }
            let last = *delays.last().unwrap_or(&default_ms);
            delays.push(last);
            delays
        }
    }
}

/// Encode captured frames into an animated GIF byte blob.
///
/// Palette quantization of each frame runs in parallel on a worker pool of
/// `cfg.workers` threads; the quantized frames are then written sequentially
/// in capture order. `progress` is invoked with a monotonically increasing
/// fraction in `(0, 1]` as frames are written.
#[tracing::instrument(skip(frames, progress), fields(frame_count = frames.len()))]
pub fn encode_animation(
    frames: Vec<CapturedFrame>,
    cfg: &EncodeConfig,
    progress: &mut dyn FnMut(f32),
) -> LedviewResult<Vec<u8>> {
    if frames.is_empty() {
        return Err(LedviewError::validation(
            "animation encode requires at least one captured frame",
        ));
    }
    if !(1..=30).contains(&cfg.speed) {
        return Err(LedviewError::validation(
            "encode speed must be in 1..=30",
        ));
    }

    let width = frames[0].image.width;
    let height = frames[0].image.height;
    if width == 0 || height == 0 || width > u32::from(u16::MAX) || height > u32::from(u16::MAX) {
        return Err(LedviewError::validation(
            "frame dimensions must fit the GIF canvas (1..=65535)",
        ));
    }
    if frames
        .iter()
        .any(|f| f.image.width != width || f.image.height != height)
    {
        return Err(LedviewError::validation(
            "all captured frames must share the same dimensions",
        ));
    }

    let timestamps = frames.iter().map(|f| f.timestamp_ms).collect::<Vec<_>>();
    let delays = frame_delays(&timestamps, cfg.default_frame_delay_ms);

    let pool = build_worker_pool(cfg.workers)?;
    let speed = cfg.speed;
    let quantized: Vec<gif::Frame<'static>> = pool.install(|| {
        frames
            .into_par_iter()
            .zip(delays)
            .map(|(cap, delay_ms)| {
                let mut pixels = cap.image.data;
                let mut frame =
                    gif::Frame::from_rgba_speed(width as u16, height as u16, &mut pixels, speed);
                // GIF delays are stored in 10 ms units.
                frame.delay = delay_ms.div_ceil(10).min(u32::from(u16::MAX)) as u16;
                frame
            })
            .collect()
    });

    let total = quantized.len();
    let mut out = Vec::new();
    {
        let mut encoder = gif::Encoder::new(&mut out, width as u16, height as u16, &[])
            .map_err(|e| LedviewError::encode(format!("gif header: {e}")))?;
        encoder
            .set_repeat(gif::Repeat::Infinite)
            .map_err(|e| LedviewError::encode(format!("gif repeat: {e}")))?;
        for (i, frame) in quantized.iter().enumerate() {
            encoder
                .write_frame(frame)
                .map_err(|e| LedviewError::encode(format!("gif frame {i}: {e}")))?;
            progress((i + 1) as f32 / total as f32);
        }
    }
    Ok(out)
}

fn build_worker_pool(workers: usize) -> LedviewResult<rayon::ThreadPool> {
    if workers == 0 {
        return Err(LedviewError::validation(
            "encode 'workers' must be >= 1",
        ));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(workers)
        .build()
        .map_err(|e| LedviewError::encode(format!("failed to build encode worker pool: {e}")))
}

#[cfg(test)]
#[path = "../../tests/unit/encode/gif.rs"]
mod tests;
