//! Surface lifecycle controller.
//!
//! Binds the capture session to the platform's surface events and the
//! user's capture/cancel gestures, and forwards completed captures to
//! the hosting page. The controller assumes a single UI-bound event
//! loop: events are handled synchronously in delivery order, and only
//! the JPEG encode step of a capture may leave that path (see
//! [`CameraScreen::capture_tap_offloaded`]).

mod events;

pub use events::{PageSink, RecordingSink, SurfaceEvent};

use crate::config::{CaptureTuning, LayoutConfig};
use crate::geometry::Rect;
use crate::session::{CameraDevice, CaptureSession, SessionError, Surface};

/// The camera capture screen core.
///
/// Owns the capture session and the page callback seam. Page
/// navigation, view construction, and event plumbing stay outside; the
/// host feeds events in and receives results through its
/// [`PageSink`].
pub struct CameraScreen<D: CameraDevice, S: PageSink> {
    session: CaptureSession<D>,
    sink: S,
    layout: LayoutConfig,
    device_rotation: u16,
}

impl<D: CameraDevice, S: PageSink> CameraScreen<D, S> {
    /// Creates the screen around a camera device and a page sink.
    pub fn new(device: D, sink: S, layout: LayoutConfig, tuning: CaptureTuning) -> Self {
        Self {
            session: CaptureSession::new(device, tuning),
            sink,
            layout,
            device_rotation: 0,
        }
    }

    /// Borrows the capture session, mainly for state inspection.
    pub fn session(&self) -> &CaptureSession<D> {
        &self.session
    }

    /// Borrows the page sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Handles a surface lifecycle event.
    ///
    /// A failed open is logged and leaves the screen with no preview
    /// rather than crashing it; the user sees an empty view and the
    /// device is not leaked.
    pub fn handle_surface_event(&mut self, event: SurfaceEvent) {
        match event {
            SurfaceEvent::Available { width, height } => {
                if let Err(e) = self
                    .session
                    .open(Surface::new(width, height), self.device_rotation)
                {
                    tracing::warn!(error = %e, "could not start preview");
                }
            }
            SurfaceEvent::Destroyed => {
                self.session.close();
            }
            SurfaceEvent::SizeChanged { width, height } => {
                // Preview size is not re-negotiated on resize.
                tracing::trace!(width, height, "surface resized, preview unchanged");
            }
        }
    }

    /// Handles a layout pass.
    ///
    /// Reapplies the display orientation if a session is open (the
    /// device rotation can change at runtime) and returns the shutter
    /// button frame for the new view size.
    pub fn layout_pass(&mut self, view_width: f32, view_height: f32, device_rotation: u16) -> Rect {
        self.device_rotation = device_rotation;
        if let Err(e) = self.session.apply_display_orientation(device_rotation) {
            tracing::warn!(error = %e, "failed to reapply display orientation");
        }
        self.layout.shutter_frame(view_width, view_height)
    }

    /// Handles a tap on the shutter button: captures, encodes, resumes
    /// the preview, and forwards the result to the page.
    ///
    /// Returns the rejection when the session is busy with another
    /// capture or has no running preview; nothing reaches the page in
    /// that case and camera parameters are untouched.
    pub fn capture_tap(&mut self) -> Result<(), SessionError> {
        let pending = self.session.begin_capture()?;
        let result = pending.encode();
        self.session.finish_capture();

        tracing::info!(
            success = result.success,
            width = result.width,
            height = result.height,
            "capture delivered to page"
        );
        self.sink.photo_result(result);
        Ok(())
    }

    /// Handles a back/cancel gesture: notifies the page without
    /// touching camera state.
    pub fn cancel(&mut self) {
        tracing::info!("capture cancelled by user");
        self.sink.cancelled();
    }
}

#[cfg(feature = "async")]
impl<D: CameraDevice, S: PageSink> CameraScreen<D, S> {
    /// Like [`CameraScreen::capture_tap`], but runs the JPEG encode on
    /// the blocking thread pool so the UI-bound task stays responsive
    /// during compression.
    ///
    /// The session stays `Capturing` across the await; concurrent taps
    /// are rejected as busy. Requires a tokio runtime.
    pub async fn capture_tap_offloaded(&mut self) -> Result<(), SessionError> {
        let pending = self.session.begin_capture()?;
        let result = match tokio::task::spawn_blocking(move || pending.encode()).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(error = %e, "encode task failed");
                crate::session::CaptureResult {
                    success: false,
                    image_bytes: Vec::new(),
                    width: 0,
                    height: 0,
                }
            }
        };
        self.session.finish_capture();
        self.sink.photo_result(result);
        Ok(())
    }
}
