//! Preview sizing and orientation.
//!
//! Pure helpers the capture session uses while bringing up the live
//! preview: choosing the camera resolution best matching the surface
//! and compensating for the sensor mount orientation.

mod orientation;
mod size;

pub use orientation::display_orientation;
pub use size::{select_preview_size, PreviewSize, SelectionError};
