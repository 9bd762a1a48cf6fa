//! Display orientation compensation.
//!
//! The sensor on the reference hardware class is mounted 90 degrees
//! from the device's natural orientation, so the preview has to be
//! rotated by a fixed amount per device rotation quadrant. The mapping
//! is a total function; anything outside the four quadrants falls back
//! to no compensation.

/// Maps a device rotation (degrees from natural orientation) to the
/// compensation angle applied to the camera's display output.
///
/// Device rotation can change at runtime, so callers recompute this on
/// every layout pass and whenever the preview surface becomes
/// available, rather than caching the result.
pub fn display_orientation(device_rotation_degrees: u16) -> u16 {
    match device_rotation_degrees {
        0 => 90,
        90 => 0,
        180 => 270,
        270 => 180,
        _ => 0,
    }
}
