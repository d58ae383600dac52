use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use kurbo::Point;

use crate::foundation::core::Rgb8;
use crate::foundation::error::LedviewResult;

/// A replacement light layout: ordered `(x, y)` pairs, index identifies the
/// light.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LayoutUpdate {
    pub points: Vec<(f64, f64)>,
}

impl LayoutUpdate {
    pub fn to_points(&self) -> Vec<Point> {
        self.points.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }
}

/// One color-stream message: per-light colors plus the ancillary counters the
/// status display formats.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ColorUpdate {
    pub pixels: Vec<Rgb8>,
    /// Address of the most recent data client, if known.
    pub last_client: Option<String>,
    /// Total updates received by the acquisition collaborator.
    pub data_updates: u64,
}

/// A decoded inbound message.
#[derive(Clone, Debug, PartialEq)]
pub enum StreamUpdate {
    Layout(LayoutUpdate),
    Colors(ColorUpdate),
}

/// Source of inbound data, polled on a fixed interval.
///
/// `Ok(None)` means no new message; `Err` means the pending message failed to
/// parse or decode. The driver logs the error, skips the update, and keeps
/// polling.
pub trait DataSource: Send {
    fn poll(&mut self) -> LedviewResult<Option<StreamUpdate>>;
}

/// Observer of decoded stream updates, invoked synchronously in registration
/// order. The driver runs on its own thread, hence `Send`.
pub trait StreamObserver: Send {
    fn on_layout(&mut self, points: &[Point]);
    fn on_colors(&mut self, update: &ColorUpdate);
}

/// Fixed-interval polling task for data acquisition.
///
/// Runs independently of the render loop; the two coordinate only through
/// whatever shared state the registered observers write.
pub struct PollDriver {
    source: Box<dyn DataSource>,
    observers: Vec<Box<dyn StreamObserver>>,
    interval: Duration,
}

impl PollDriver {
    pub fn new(source: Box<dyn DataSource>, interval: Duration) -> Self {
        Self {
            source,
            observers: Vec::new(),
            interval,
        }
    }

    pub fn add_observer(&mut self, observer: Box<dyn StreamObserver>) {
        self.observers.push(observer);
    }

    /// Pull at most one update from the source and fan it out.
    ///
    /// A malformed update is logged and skipped; previous state stays in
    /// effect and polling continues.
    pub fn poll_once(&mut self) {
        match self.source.poll() {
            Ok(Some(StreamUpdate::Layout(layout))) => {
                let points = layout.to_points();
                for obs in self.observers.iter_mut() {
                    obs.on_layout(&points);
                }
            }
            Ok(Some(StreamUpdate::Colors(update))) => {
                for obs in self.observers.iter_mut() {
                    obs.on_colors(&update);
                }
            }
            Ok(None) => {}
            Err(err) => {
                tracing::warn!(error = %err, "skipping malformed data update");
            }
        }
    }

    /// Poll on the configured interval until `stop` is set.
    pub fn run(&mut self, stop: &AtomicBool) {
        while !stop.load(Ordering::Relaxed) {
            self.poll_once();
            std::thread::sleep(self.interval);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/source/provider.rs"]
mod tests;
