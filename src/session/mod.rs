//! Camera session ownership and the capture pipeline.
//!
//! This module holds the capture session state machine, the platform
//! camera boundary it drives, and the frame type flowing between them.
//! The device handle is owned exclusively by the session; all mutation
//! funnels through state-machine transitions.

mod device;
mod frame;
mod state;

pub use device::{CameraDevice, DeviceError, FakeCamera, FlashMode, FocusMode, Surface};
pub use frame::Frame;
pub use state::{CaptureResult, CaptureSession, PendingCapture, SessionError, SessionState};
