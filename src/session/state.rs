//! Capture session state machine.
//!
//! Owns the camera device handle and funnels every mutation through
//! explicit transitions:
//!
//! ```text
//! Closed → Opening → PreviewRunning ⇄ Capturing
//!                         ↓
//!                      Closing → Closed
//! ```
//!
//! Capture is split into three phases (begin, encode, finish) so the
//! JPEG compression can run off the UI-bound path while the session
//! stays in `Capturing`. A capture always ends back in `PreviewRunning`
//! whether or not the encode succeeds; surface destruction is allowed
//! from any state and releases the device exactly once.

use super::device::{CameraDevice, DeviceError, Surface};
use super::frame::Frame;
use crate::config::CaptureTuning;
use crate::preview::{display_orientation, select_preview_size, PreviewSize, SelectionError};
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;
use thiserror::Error;

/// Errors from session transitions.
#[derive(Debug, Error)]
pub enum SessionError {
    /// The camera is held exclusively by another owner; the preview
    /// cannot be shown.
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),
    /// A capture was requested while another is in flight. The request
    /// is rejected without touching camera parameters.
    #[error("a capture is already in flight")]
    Busy,
    /// A capture was requested while the preview is not running.
    #[error("preview is not running")]
    NotRunning,
    /// A session open was requested while the session is not closed.
    #[error("session is already open")]
    AlreadyOpen,
    /// Preview size selection failed.
    #[error(transparent)]
    Selection(#[from] SelectionError),
    /// The device rejected an operation.
    #[error(transparent)]
    Device(#[from] DeviceError),
}

/// The lifecycle state of a [`CaptureSession`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No device held.
    Closed,
    /// Device open in progress.
    Opening,
    /// Live preview streaming to the surface.
    PreviewRunning,
    /// Preview paused, a still capture in flight.
    Capturing,
    /// Device release in progress.
    Closing,
}

/// Outcome of a still capture, handed to the hosting page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureResult {
    /// Whether encoding produced a usable image.
    pub success: bool,
    /// JPEG bytes, empty on failure.
    pub image_bytes: Vec<u8>,
    /// Width of the encoded image in pixels.
    pub width: u32,
    /// Height of the encoded image in pixels.
    pub height: u32,
}

impl CaptureResult {
    fn failed(width: u32, height: u32) -> Self {
        Self {
            success: false,
            image_bytes: Vec::new(),
            width,
            height,
        }
    }
}

/// A frame captured but not yet encoded.
///
/// Owns the cropped pixel data, so the encode step can run on any
/// thread while the session stays in `Capturing`.
#[derive(Debug)]
pub struct PendingCapture {
    image: Option<Frame>,
    quality: u8,
}

impl PendingCapture {
    /// Compresses the captured frame to JPEG.
    ///
    /// CPU-bound and infallible from the caller's perspective: encoder
    /// failures come back as `success: false` so the capture loop can
    /// resume the preview regardless.
    pub fn encode(self) -> CaptureResult {
        let Some(image) = self.image else {
            return CaptureResult::failed(0, 0);
        };
        let (width, height) = (image.width(), image.height());

        let mut bytes = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut bytes, self.quality);
        match encoder.encode(image.pixels(), width, height, ExtendedColorType::Rgb8) {
            Ok(()) => {
                tracing::debug!(width, height, jpeg_bytes = bytes.len(), "capture encoded");
                CaptureResult {
                    success: true,
                    image_bytes: bytes,
                    width,
                    height,
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "JPEG encode failed");
                CaptureResult::failed(width, height)
            }
        }
    }
}

/// The capture session: exclusive owner of the camera device handle.
///
/// At most one session should exist per device; callers serialize
/// surface lifecycle signals and capture requests against the same
/// instance.
pub struct CaptureSession<D: CameraDevice> {
    device: D,
    tuning: CaptureTuning,
    state: SessionState,
    surface: Option<Surface>,
    resolution: Option<PreviewSize>,
}

impl<D: CameraDevice> CaptureSession<D> {
    /// Creates a closed session wrapping the given device.
    pub fn new(device: D, tuning: CaptureTuning) -> Self {
        Self {
            device,
            tuning,
            state: SessionState::Closed,
            surface: None,
            resolution: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// True while the device handle is held.
    pub fn is_open(&self) -> bool {
        !matches!(self.state, SessionState::Closed | SessionState::Closing)
    }

    /// The preview resolution chosen at open, if any.
    pub fn resolution(&self) -> Option<PreviewSize> {
        self.resolution
    }

    /// Borrows the underlying device.
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Opens the device and starts the preview bound to `surface`.
    ///
    /// Selects the preview resolution closest to the surface's aspect,
    /// applies focus/flash from the tuning, and compensates for the
    /// device rotation. On any failure the device is released and the
    /// session returns to `Closed` with nothing leaked.
    pub fn open(&mut self, surface: Surface, device_rotation: u16) -> Result<(), SessionError> {
        if self.state != SessionState::Closed {
            return Err(SessionError::AlreadyOpen);
        }
        self.state = SessionState::Opening;
        tracing::info!(width = surface.width, height = surface.height, "opening camera session");

        if let Err(e) = self.device.open() {
            self.state = SessionState::Closed;
            return Err(match e {
                DeviceError::Unavailable(msg) => SessionError::DeviceUnavailable(msg),
                other => SessionError::Device(other),
            });
        }

        match self.configure_and_start(surface, device_rotation) {
            Ok(()) => {
                self.surface = Some(surface);
                self.state = SessionState::PreviewRunning;
                tracing::info!(resolution = ?self.resolution, "preview running");
                Ok(())
            }
            Err(e) => {
                // Roll back so the device is not left held without a preview.
                self.device.release();
                self.state = SessionState::Closed;
                self.resolution = None;
                Err(e)
            }
        }
    }

    fn configure_and_start(
        &mut self,
        surface: Surface,
        device_rotation: u16,
    ) -> Result<(), SessionError> {
        let candidates = self.device.supported_preview_sizes()?;
        let size = select_preview_size(&candidates, surface.aspect())?;
        self.device.set_preview_size(size)?;
        self.resolution = Some(size);

        self.device.set_focus_mode(self.tuning.focus)?;
        self.device.set_flash_mode(self.tuning.flash)?;
        self.device
            .set_display_orientation(display_orientation(device_rotation))?;
        self.device.bind_surface(surface)?;
        self.device.start_preview()?;
        Ok(())
    }

    /// Recomputes and reapplies the display orientation.
    ///
    /// Called on every layout pass while the session is open; the
    /// mapping is cheap and idempotent, so refreshing it without a
    /// change check is intentional.
    pub fn apply_display_orientation(&mut self, device_rotation: u16) -> Result<(), SessionError> {
        if !self.is_open() {
            return Ok(());
        }
        self.device
            .set_display_orientation(display_orientation(device_rotation))?;
        Ok(())
    }

    /// Begins a capture: pauses the preview and snapshots the current
    /// frame, cropped to the surface's height-over-width ratio.
    ///
    /// Rejects with [`SessionError::Busy`] while another capture is in
    /// flight (camera parameters untouched) and with
    /// [`SessionError::NotRunning`] outside `PreviewRunning`.
    pub fn begin_capture(&mut self) -> Result<PendingCapture, SessionError> {
        match self.state {
            SessionState::Capturing => return Err(SessionError::Busy),
            SessionState::PreviewRunning => {}
            _ => return Err(SessionError::NotRunning),
        }
        let surface = self.surface.ok_or(DeviceError::NoSurface)?;

        self.device.stop_preview();
        self.state = SessionState::Capturing;

        let image = match self.device.snapshot() {
            Ok(frame) => Some(frame.cropped_to_ratio(surface.aspect())),
            Err(e) => {
                // The capture still completes; it just reports failure
                // once encoded.
                tracing::warn!(error = %e, "snapshot failed, capture will report failure");
                None
            }
        };

        Ok(PendingCapture {
            image,
            quality: self.tuning.jpeg_quality,
        })
    }

    /// Finishes a capture: resumes the preview stream.
    ///
    /// Always returns the session to `PreviewRunning` when it was
    /// capturing; a no-op if the surface was destroyed mid-capture.
    pub fn finish_capture(&mut self) {
        if self.state != SessionState::Capturing {
            return;
        }
        if let Err(e) = self.device.start_preview() {
            tracing::warn!(error = %e, "failed to resume preview after capture");
        }
        self.state = SessionState::PreviewRunning;
    }

    /// Captures, encodes, and resumes the preview in one synchronous
    /// call.
    pub fn take_photo(&mut self) -> Result<CaptureResult, SessionError> {
        let pending = self.begin_capture()?;
        let result = pending.encode();
        self.finish_capture();
        Ok(result)
    }

    /// Stops the preview and releases the device.
    ///
    /// Valid from any state, including mid-capture (the in-flight photo
    /// is abandoned). Idempotent: the device is released exactly once
    /// per open.
    pub fn close(&mut self) {
        if self.state == SessionState::Closed {
            return;
        }
        self.state = SessionState::Closing;
        self.device.stop_preview();
        self.device.release();
        self.surface = None;
        self.resolution = None;
        self.state = SessionState::Closed;
        tracing::info!("camera session closed, device released");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::device::{FakeCamera, FlashMode, FocusMode};

    fn open_session() -> CaptureSession<FakeCamera> {
        let mut session = CaptureSession::new(FakeCamera::new(), CaptureTuning::default());
        session.open(Surface::new(1080, 1920), 0).unwrap();
        session
    }

    #[test]
    fn test_open_starts_preview_with_best_size() {
        let session = open_session();

        assert_eq!(session.state(), SessionState::PreviewRunning);
        assert!(session.device().is_previewing());
        // Surface aspect 1920/1080 matches the 16:9 candidates; the
        // first one in driver order wins the tie.
        assert_eq!(session.resolution(), Some(PreviewSize::new(1280, 720)));
        assert_eq!(session.device().focus_mode(), Some(FocusMode::ContinuousPicture));
        assert_eq!(session.device().flash_mode(), Some(FlashMode::Auto));
        // Natural orientation maps to 90 degrees of compensation.
        assert_eq!(session.device().orientation(), 90);
    }

    #[test]
    fn test_open_unavailable_device() {
        let mut session =
            CaptureSession::new(FakeCamera::held_elsewhere(), CaptureTuning::default());
        let err = session.open(Surface::new(1080, 1920), 0).unwrap_err();

        assert!(matches!(err, SessionError::DeviceUnavailable(_)));
        assert_eq!(session.state(), SessionState::Closed);
    }

    #[test]
    fn test_double_open_rejected() {
        let mut session = open_session();
        let err = session.open(Surface::new(1080, 1920), 0).unwrap_err();
        assert!(matches!(err, SessionError::AlreadyOpen));
    }

    #[test]
    fn test_capture_returns_to_preview_running() {
        let mut session = open_session();
        let result = session.take_photo().unwrap();

        assert!(result.success);
        assert!(!result.image_bytes.is_empty());
        assert_eq!(session.state(), SessionState::PreviewRunning);
        assert!(session.device().is_previewing());
    }

    #[test]
    fn test_capture_cropped_to_surface_ratio() {
        let mut session = open_session();
        let result = session.take_photo().unwrap();

        // Surface is 1080x1920 so the crop keeps the full width and the
        // output ratio equals the surface's.
        assert_eq!(result.width, 1080);
        assert_eq!(result.height, 1920);
    }

    #[test]
    fn test_wide_surface_crop_ratio() {
        let mut session = CaptureSession::new(FakeCamera::new(), CaptureTuning::default());
        session.open(Surface::new(1920, 1080), 0).unwrap();
        let result = session.take_photo().unwrap();

        assert_eq!(result.width, 1920);
        assert_eq!(result.height, 1080);
    }

    #[test]
    fn test_concurrent_capture_rejected_as_busy() {
        let mut session = open_session();
        let _pending = session.begin_capture().unwrap();
        let orientation_before = session.device().orientation();

        let err = session.begin_capture().unwrap_err();
        assert!(matches!(err, SessionError::Busy));
        // Camera parameters untouched by the rejection.
        assert_eq!(session.device().orientation(), orientation_before);
        assert_eq!(session.state(), SessionState::Capturing);
    }

    #[test]
    fn test_capture_while_closed_rejected() {
        let mut session = CaptureSession::new(FakeCamera::new(), CaptureTuning::default());
        assert!(matches!(
            session.begin_capture(),
            Err(SessionError::NotRunning)
        ));
    }

    #[test]
    fn test_snapshot_failure_recovers_with_failed_result() {
        let mut session = open_session();
        session.device.fail_next_snapshots();

        let result = session.take_photo().unwrap();
        assert!(!result.success);
        assert!(result.image_bytes.is_empty());
        assert_eq!(session.state(), SessionState::PreviewRunning);
    }

    #[test]
    fn test_close_mid_capture_releases_once() {
        let mut session = open_session();
        let pending = session.begin_capture().unwrap();

        session.close();
        assert_eq!(session.state(), SessionState::Closed);
        assert_eq!(session.device().release_count(), 1);

        // Finishing the abandoned capture must not restart anything.
        let _ = pending.encode();
        session.finish_capture();
        assert_eq!(session.state(), SessionState::Closed);
        assert!(!session.device().is_previewing());

        // Close again: still released exactly once.
        session.close();
        assert_eq!(session.device().release_count(), 1);
    }

    #[test]
    fn test_reopen_after_close() {
        let mut session = open_session();
        session.close();

        session.open(Surface::new(1080, 1920), 90).unwrap();
        assert_eq!(session.state(), SessionState::PreviewRunning);
        assert_eq!(session.device().orientation(), 0);
    }

    #[test]
    fn test_orientation_refresh_while_open() {
        let mut session = open_session();
        session.apply_display_orientation(180).unwrap();
        assert_eq!(session.device().orientation(), 270);
    }

    #[test]
    fn test_orientation_refresh_while_closed_is_noop() {
        let mut session = CaptureSession::new(FakeCamera::new(), CaptureTuning::default());
        session.apply_display_orientation(180).unwrap();
        assert_eq!(session.device().orientation(), 0);
    }

    #[test]
    fn test_encoded_bytes_are_jpeg() {
        let mut session = open_session();
        let result = session.take_photo().unwrap();

        // JPEG SOI marker.
        assert_eq!(&result.image_bytes[..2], &[0xFF, 0xD8]);
    }
}
