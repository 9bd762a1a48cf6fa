//! Platform camera boundary.
//!
//! The capture session talks to the camera through a small capability
//! trait (open, enumerate sizes, configure, bind, start/stop preview,
//! snapshot, release) so a richer platform backend can be substituted
//! without touching the state machine. A deterministic fake device is
//! provided for tests and the demo binary.

use super::Frame;
use crate::preview::PreviewSize;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur at the camera device boundary.
#[derive(Debug, Error)]
pub enum DeviceError {
    /// The camera is held exclusively by another owner.
    #[error("camera device unavailable: {0}")]
    Unavailable(String),
    /// An operation requiring an open device was called while closed.
    #[error("camera device not open")]
    NotOpen,
    /// The device could not be configured.
    #[error("failed to configure camera: {0}")]
    ConfigFailed(String),
    /// The current preview frame could not be read back.
    #[error("failed to snapshot preview frame: {0}")]
    SnapshotFailed(String),
    /// No preview surface has been bound.
    #[error("no surface bound to the device")]
    NoSurface,
}

/// Focus behavior requested from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FocusMode {
    /// Continuously refocus, optimized for stills.
    ContinuousPicture,
    /// Single autofocus pass on demand.
    Auto,
    /// Fixed focus.
    Fixed,
}

/// Flash behavior requested from the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FlashMode {
    /// Fire automatically in low light.
    Auto,
    /// Always fire.
    On,
    /// Never fire.
    Off,
}

/// The drawable target that receives preview frames.
///
/// The platform object itself stays opaque; the session only needs its
/// dimensions for aspect selection and cropping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Surface {
    /// Surface width in pixels.
    pub width: u32,
    /// Surface height in pixels.
    pub height: u32,
}

impl Surface {
    /// Creates a surface descriptor.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Height-over-width ratio of the surface.
    #[inline]
    pub fn aspect(&self) -> f64 {
        f64::from(self.height) / f64::from(self.width)
    }
}

/// Trait for platform camera implementations.
///
/// Methods other than [`CameraDevice::open`] require an open device and
/// return [`DeviceError::NotOpen`] otherwise. Opening is exclusive
/// system-wide; a second owner gets [`DeviceError::Unavailable`].
pub trait CameraDevice {
    /// Opens the device exclusively.
    fn open(&mut self) -> Result<(), DeviceError>;

    /// Enumerates the preview sizes the device supports, in the order
    /// the driver reports them.
    fn supported_preview_sizes(&self) -> Result<Vec<PreviewSize>, DeviceError>;

    /// Applies the preview resolution.
    fn set_preview_size(&mut self, size: PreviewSize) -> Result<(), DeviceError>;

    /// Applies the focus mode.
    fn set_focus_mode(&mut self, mode: FocusMode) -> Result<(), DeviceError>;

    /// Applies the flash mode.
    fn set_flash_mode(&mut self, mode: FlashMode) -> Result<(), DeviceError>;

    /// Rotates the display output by the given compensation angle.
    fn set_display_orientation(&mut self, degrees: u16) -> Result<(), DeviceError>;

    /// Binds preview output to the given surface.
    fn bind_surface(&mut self, surface: Surface) -> Result<(), DeviceError>;

    /// Starts the live preview stream.
    fn start_preview(&mut self) -> Result<(), DeviceError>;

    /// Stops the live preview stream. No-op when not running.
    fn stop_preview(&mut self);

    /// Reads back the currently rendered preview frame at surface size.
    fn snapshot(&mut self) -> Result<Frame, DeviceError>;

    /// Checks if the device is currently open.
    fn is_open(&self) -> bool;

    /// Releases the device so other owners can open it.
    fn release(&mut self);
}

/// Fake camera device producing deterministic gradient frames.
///
/// Used by tests and the demo binary in place of platform hardware.
#[derive(Debug)]
pub struct FakeCamera {
    sizes: Vec<PreviewSize>,
    held_elsewhere: bool,
    open: bool,
    previewing: bool,
    surface: Option<Surface>,
    preview_size: Option<PreviewSize>,
    focus: Option<FocusMode>,
    flash: Option<FlashMode>,
    orientation: u16,
    sequence: u64,
    release_count: u32,
    fail_snapshot: bool,
}

impl FakeCamera {
    /// Creates a fake device reporting a typical set of preview sizes.
    pub fn new() -> Self {
        Self::with_sizes(vec![
            PreviewSize::new(640, 480),
            PreviewSize::new(1280, 720),
            PreviewSize::new(1920, 1080),
        ])
    }

    /// Creates a fake device reporting the given preview sizes.
    pub fn with_sizes(sizes: Vec<PreviewSize>) -> Self {
        Self {
            sizes,
            held_elsewhere: false,
            open: false,
            previewing: false,
            surface: None,
            preview_size: None,
            focus: None,
            flash: None,
            orientation: 0,
            sequence: 0,
            release_count: 0,
            fail_snapshot: false,
        }
    }

    /// Creates a fake device already held by another owner, so every
    /// open attempt fails.
    pub fn held_elsewhere() -> Self {
        Self {
            held_elsewhere: true,
            ..Self::new()
        }
    }

    /// Makes subsequent snapshots fail, for exercising recovery paths.
    pub fn fail_next_snapshots(&mut self) {
        self.fail_snapshot = true;
    }

    /// Whether the preview stream is currently running.
    pub fn is_previewing(&self) -> bool {
        self.previewing
    }

    /// The display orientation last applied.
    pub fn orientation(&self) -> u16 {
        self.orientation
    }

    /// The preview size last applied.
    pub fn preview_size(&self) -> Option<PreviewSize> {
        self.preview_size
    }

    /// The focus mode last applied.
    pub fn focus_mode(&self) -> Option<FocusMode> {
        self.focus
    }

    /// The flash mode last applied.
    pub fn flash_mode(&self) -> Option<FlashMode> {
        self.flash
    }

    /// How many times the device has been released.
    pub fn release_count(&self) -> u32 {
        self.release_count
    }

    fn require_open(&self) -> Result<(), DeviceError> {
        if self.open {
            Ok(())
        } else {
            Err(DeviceError::NotOpen)
        }
    }
}

impl Default for FakeCamera {
    fn default() -> Self {
        Self::new()
    }
}

impl CameraDevice for FakeCamera {
    fn open(&mut self) -> Result<(), DeviceError> {
        if self.held_elsewhere {
            return Err(DeviceError::Unavailable(
                "device held by another process".into(),
            ));
        }
        if self.open {
            return Err(DeviceError::Unavailable("device already open".into()));
        }
        self.open = true;
        tracing::info!("FakeCamera opened");
        Ok(())
    }

    fn supported_preview_sizes(&self) -> Result<Vec<PreviewSize>, DeviceError> {
        self.require_open()?;
        Ok(self.sizes.clone())
    }

    fn set_preview_size(&mut self, size: PreviewSize) -> Result<(), DeviceError> {
        self.require_open()?;
        self.preview_size = Some(size);
        Ok(())
    }

    fn set_focus_mode(&mut self, mode: FocusMode) -> Result<(), DeviceError> {
        self.require_open()?;
        self.focus = Some(mode);
        Ok(())
    }

    fn set_flash_mode(&mut self, mode: FlashMode) -> Result<(), DeviceError> {
        self.require_open()?;
        self.flash = Some(mode);
        Ok(())
    }

    fn set_display_orientation(&mut self, degrees: u16) -> Result<(), DeviceError> {
        self.require_open()?;
        self.orientation = degrees;
        Ok(())
    }

    fn bind_surface(&mut self, surface: Surface) -> Result<(), DeviceError> {
        self.require_open()?;
        self.surface = Some(surface);
        Ok(())
    }

    fn start_preview(&mut self) -> Result<(), DeviceError> {
        self.require_open()?;
        if self.surface.is_none() {
            return Err(DeviceError::NoSurface);
        }
        self.previewing = true;
        Ok(())
    }

    fn stop_preview(&mut self) {
        self.previewing = false;
    }

    fn snapshot(&mut self) -> Result<Frame, DeviceError> {
        self.require_open()?;
        if self.fail_snapshot {
            return Err(DeviceError::SnapshotFailed("injected failure".into()));
        }
        let surface = self.surface.ok_or(DeviceError::NoSurface)?;

        // Deterministic gradient pattern at surface size.
        let (w, h) = (surface.width as usize, surface.height as usize);
        let mut pixels = Vec::with_capacity(w * h * 3);
        for y in 0..h {
            for x in 0..w {
                pixels.push((x % 256) as u8);
                pixels.push((y % 256) as u8);
                pixels.push(((x + y + self.sequence as usize) % 256) as u8);
            }
        }
        self.sequence += 1;
        Ok(Frame::new(pixels, surface.width, surface.height, self.sequence))
    }

    fn is_open(&self) -> bool {
        self.open
    }

    fn release(&mut self) {
        self.open = false;
        self.previewing = false;
        self.surface = None;
        self.release_count += 1;
        tracing::info!("FakeCamera released");
    }
}
