//! Viewfinder: camera capture screen core.
//!
//! The algorithmic core of a full-screen camera page: preview
//! resolution selection, sensor orientation compensation, the capture
//! session state machine, and the vector geometry of the shutter
//! button. Page navigation and view plumbing stay with the host, which
//! feeds in surface/layout events and receives encoded photos through
//! a callback seam.
//!
//! # Architecture
//!
//! ```text
//! surface events ──► controller ──► session ──► camera device
//!                        │             │
//!                   page sink ◄── capture result (JPEG)
//!
//! geometry: shutter glyph, rebuilt per redraw
//! ```
//!
//! # Design Principles
//!
//! - **One owner**: the camera handle lives inside the session state
//!   machine; nothing mutates it from outside a transition
//! - **Captures always land**: a capture ends back in the running
//!   preview whether encoding succeeds or not
//! - **Fail soft**: device and encode failures surface as an empty
//!   preview or a failed result, never a crash or a leaked handle
//!
//! # Example
//!
//! ```
//! use viewfinder::{
//!     CameraScreen, CaptureTuning, FakeCamera, LayoutConfig, RecordingSink, SurfaceEvent,
//! };
//!
//! let mut screen = CameraScreen::new(
//!     FakeCamera::new(),
//!     RecordingSink::default(),
//!     LayoutConfig::default(),
//!     CaptureTuning::default(),
//! );
//!
//! // The platform reports the preview surface.
//! screen.handle_surface_event(SurfaceEvent::Available {
//!     width: 1080,
//!     height: 1920,
//! });
//! let shutter = screen.layout_pass(1080.0, 1920.0, 0);
//! assert_eq!(shutter.width, 120.0);
//!
//! // The user taps the shutter.
//! screen.capture_tap().unwrap();
//! let photo = &screen.sink().results[0];
//! assert!(photo.success);
//!
//! // Leaving the page tears the camera down.
//! screen.handle_surface_event(SurfaceEvent::Destroyed);
//! ```

#![warn(missing_docs)]
#![warn(rust_2018_idioms)]
#![deny(unsafe_code)]

pub mod config;
pub mod controller;
pub mod geometry;
pub mod preview;
pub mod session;

// Re-export commonly used types at crate root
pub use config::{CaptureTuning, ConfigError, FileConfig, LayoutConfig};
pub use controller::{CameraScreen, PageSink, RecordingSink, SurfaceEvent};
pub use geometry::{Color, PathCommand, Point, Rect, ShutterGlyph, VectorPath};
pub use preview::{display_orientation, select_preview_size, PreviewSize, SelectionError};
pub use session::{
    CameraDevice, CaptureResult, CaptureSession, DeviceError, FakeCamera, FlashMode, FocusMode,
    Frame, PendingCapture, SessionError, SessionState, Surface,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
