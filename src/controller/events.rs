//! Surface lifecycle events and the hosting page contract.

use crate::session::CaptureResult;

/// Events delivered by the platform for the preview surface.
///
/// The platform's surface-texture listener callbacks are modeled as
/// named events so the controller can be driven (and tested) without a
/// real display. Events affecting the same session must be handled in
/// delivery order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceEvent {
    /// The surface is ready to receive preview frames.
    Available {
        /// Surface width in pixels.
        width: u32,
        /// Surface height in pixels.
        height: u32,
    },
    /// The surface is gone; the camera must be released.
    Destroyed,
    /// The surface was resized. The reference behavior does not
    /// re-negotiate the preview size, so this is a no-op.
    SizeChanged {
        /// New surface width in pixels.
        width: u32,
        /// New surface height in pixels.
        height: u32,
    },
}

/// Callback contract with the hosting page.
///
/// The page owns navigation and photo consumption; the capture screen
/// only hands results and cancellation across this seam.
pub trait PageSink {
    /// Delivers the outcome of a capture, successful or not.
    fn photo_result(&mut self, result: CaptureResult);

    /// Signals that the user backed out without taking a photo.
    fn cancelled(&mut self);
}

/// A [`PageSink`] that records everything it receives.
///
/// Intended for tests and the demo binary.
#[derive(Debug, Default)]
pub struct RecordingSink {
    /// Capture results in delivery order.
    pub results: Vec<CaptureResult>,
    /// How many cancellation signals arrived.
    pub cancellations: u32,
}

impl PageSink for RecordingSink {
    fn photo_result(&mut self, result: CaptureResult) {
        self.results.push(result);
    }

    fn cancelled(&mut self) {
        self.cancellations += 1;
    }
}
