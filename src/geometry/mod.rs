//! Shutter glyph rendering.
//!
//! This module builds the capture button artwork as resolution-independent
//! vector paths. Rendering is a pure function of the bounding rectangle,
//! so the glyph can be rebuilt on every frame redraw without caching.

mod glyph;
mod path;

pub use glyph::{Color, ShutterGlyph};
pub use path::{PathCommand, Point, Rect, VectorPath};
