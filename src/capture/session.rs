use crate::capture::recorder::SharedCapture;
use crate::encode::gif::{EncodeConfig, encode_animation};
use crate::foundation::error::{LedviewError, LedviewResult};

/// Capture lifecycle state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureState {
    /// No recording in progress.
    Idle,
    /// Every rendered frame is being recorded.
    Armed,
    /// Accumulated frames are being encoded.
    Encoding,
}

/// Export lifecycle events, emitted in order:
/// `Started`, zero or more `Progress`, then exactly one of `Finished` /
/// `Aborted` — or a single `Empty` when there was nothing to export.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ExportEvent {
    Started,
    /// Encoding progress fraction in `(0, 1]`.
    Progress(f32),
    Finished,
    Aborted,
    /// Stop was requested with no captured frames.
    Empty,
}

/// Drives the Idle -> Armed -> Encoding -> Idle capture state machine.
///
/// Owns a handle to the recorder registered on the renderer and the encoder
/// configuration. An export failure is surfaced as an [`ExportEvent::Aborted`]
/// event, never as a process-fatal error: the render loop and data polling
/// continue regardless.
pub struct CaptureController {
    capture: SharedCapture,
    config: EncodeConfig,
    state: CaptureState,
}

impl CaptureController {
    pub fn new(capture: SharedCapture, config: EncodeConfig) -> Self {
        Self {
            capture,
            config,
            state: CaptureState::Idle,
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Pin the controller into a given state, bypassing the transitions.
    ///
    /// `stop_and_export` encodes synchronously, so the `Encoding` window is
    /// not otherwise observable from a single-threaded test.
    #[cfg(test)]
    pub(crate) fn force_state(&mut self, state: CaptureState) {
        self.state = state;
    }

    /// Arm the recorder. Idempotent while already armed; rejected while a
    /// previous export is still encoding, so two capture sequences can never
    /// interleave.
    pub fn start(&mut self) -> LedviewResult<()> {
        match self.state {
            CaptureState::Encoding => Err(LedviewError::validation(
                "cannot start recording while an export is encoding",
            )),
            CaptureState::Armed => Ok(()),
            CaptureState::Idle => {
                self.capture.arm();
                self.state = CaptureState::Armed;
                Ok(())
            }
        }
    }

    /// Disarm, encode the accumulated frames, and return the GIF bytes.
    ///
    /// Returns `Ok(None)` for the two non-fatal outcomes: an empty capture
    /// sequence (`Empty` event) and an encoder abort (`Aborted` event). The
    /// frame sequence is cleared and the state returns to `Idle` on every
    /// path.
    pub fn stop_and_export(
        &mut self,
        events: &mut dyn FnMut(ExportEvent),
    ) -> LedviewResult<Option<Vec<u8>>> {
        if self.state != CaptureState::Armed {
            return Err(LedviewError::validation("no recording in progress"));
        }
        self.capture.disarm();
        self.state = CaptureState::Encoding;

        let frames = self.capture.take_frames();
        if frames.is_empty() {
            events(ExportEvent::Empty);
            self.state = CaptureState::Idle;
            return Ok(None);
        }

        events(ExportEvent::Started);
        let result = encode_animation(frames, &self.config, &mut |fraction| {
            events(ExportEvent::Progress(fraction));
        });
        self.state = CaptureState::Idle;

        match result {
            Ok(bytes) => {
                events(ExportEvent::Finished);
                Ok(Some(bytes))
            }
            Err(err) => {
                tracing::warn!(error = %err, "animation export aborted");
                events(ExportEvent::Aborted);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/capture/session.rs"]
mod tests;
