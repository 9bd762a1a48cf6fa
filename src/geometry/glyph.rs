//! Shutter button glyph construction.
//!
//! Builds the circular capture-button artwork as pure vector data: an
//! outer ring traced by two mirrored cubic-Bezier subpaths plus an
//! inner filled disc. The control points are fixed fractions of the
//! bounding rectangle, so the glyph scales with the button and two
//! calls with the same rect yield identical geometry.

use super::path::{Rect, VectorPath};

/// An RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel, 255 is opaque.
    pub a: u8,
}

impl Color {
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);

    /// Creates an opaque color from RGB channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }
}

/// The shutter button artwork, ready for a canvas to fill and stroke.
///
/// Both paths are filled with [`ShutterGlyph::fill`] first and then
/// stroked with [`ShutterGlyph::stroke`] at [`ShutterGlyph::stroke_width`].
#[derive(Debug, Clone, PartialEq)]
pub struct ShutterGlyph {
    /// Outer ring: two mirrored closed Bezier subpaths.
    pub outer: VectorPath,
    /// Inner disc: ellipse inset from the rect edges.
    pub inner: VectorPath,
    /// Fill color for both paths.
    pub fill: Color,
    /// Stroke color for both paths.
    pub stroke: Color,
    /// Stroke width in surface units.
    pub stroke_width: f32,
}

impl ShutterGlyph {
    /// Builds the glyph for the given bounding rectangle.
    ///
    /// Deterministic: no state is read besides `rect`, and the only
    /// allocation is the returned path storage, so this is safe to call
    /// on every redraw.
    pub fn render(rect: Rect) -> Self {
        Self {
            outer: outer_ring(rect),
            inner: inner_disc(rect),
            fill: Color::WHITE,
            stroke: Color::BLACK,
            stroke_width: 1.0,
        }
    }
}

/// Traces the outer ring of the glyph.
///
/// First subpath is the inner rim of the ring (inset 8.333% from the
/// rect), second is the outer rim on the rect boundary. The fractions
/// are reproduced from the original artwork and must not be "cleaned
/// up" to rounder values.
fn outer_ring(rect: Rect) -> VectorPath {
    let mut path = VectorPath::new();

    path.move_to(rect.at(0.5, 0.08333));
    path.cubic_to(
        rect.at(0.41628, 0.08333),
        rect.at(0.33832, 0.10803),
        rect.at(0.27302, 0.15053),
    );
    path.cubic_to(
        rect.at(0.15883, 0.22484),
        rect.at(0.08333, 0.3536),
        rect.at(0.08333, 0.5),
    );
    path.cubic_to(
        rect.at(0.08333, 0.73012),
        rect.at(0.26988, 0.91667),
        rect.at(0.5, 0.91667),
    );
    path.cubic_to(
        rect.at(0.73012, 0.91667),
        rect.at(0.91667, 0.73012),
        rect.at(0.91667, 0.5),
    );
    path.cubic_to(
        rect.at(0.91667, 0.26988),
        rect.at(0.73012, 0.08333),
        rect.at(0.5, 0.08333),
    );
    path.close();

    path.move_to(rect.at(1.0, 0.5));
    path.cubic_to(rect.at(1.0, 0.77614), rect.at(0.77614, 1.0), rect.at(0.5, 1.0));
    path.cubic_to(rect.at(0.22386, 1.0), rect.at(0.0, 0.77614), rect.at(0.0, 0.5));
    path.cubic_to(
        rect.at(0.0, 0.33689),
        rect.at(0.0781, 0.19203),
        rect.at(0.19894, 0.10076),
    );
    path.cubic_to(
        rect.at(0.28269, 0.03751),
        rect.at(0.38696, 0.0),
        rect.at(0.5, 0.0),
    );
    path.cubic_to(rect.at(0.77614, 0.0), rect.at(1.0, 0.22386), rect.at(1.0, 0.5));
    path.close();

    path
}

/// Builds the inner disc as an ellipse inset from the rect edges.
///
/// The edge offsets are floored to whole units and nudged by half a
/// unit, matching the original artwork's pixel alignment.
fn inner_disc(rect: Rect) -> VectorPath {
    let left = rect.left + (rect.width * 0.12917).floor() + 0.5;
    let top = rect.top + (rect.height * 0.12083).floor() + 0.5;
    let right = rect.left + (rect.width * 0.87917).floor() + 0.5;
    let bottom = rect.top + (rect.height * 0.87083).floor() + 0.5;

    VectorPath::ellipse(Rect::new(left, top, right - left, bottom - top))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::path::{PathCommand, Point};
    use proptest::prelude::*;

    #[test]
    fn test_glyph_is_deterministic() {
        let rect = Rect::new(0.0, 0.0, 120.0, 120.0);
        assert_eq!(ShutterGlyph::render(rect), ShutterGlyph::render(rect));
    }

    #[test]
    fn test_glyph_styling() {
        let glyph = ShutterGlyph::render(Rect::new(0.0, 0.0, 120.0, 120.0));
        assert_eq!(glyph.fill, Color::WHITE);
        assert_eq!(glyph.stroke, Color::BLACK);
        assert_eq!(glyph.stroke_width, 1.0);
    }

    #[test]
    fn test_outer_ring_has_two_closed_subpaths() {
        let glyph = ShutterGlyph::render(Rect::new(0.0, 0.0, 120.0, 120.0));
        let closes = glyph
            .outer
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::Close))
            .count();
        let moves = glyph
            .outer
            .commands()
            .iter()
            .filter(|c| matches!(c, PathCommand::MoveTo(_)))
            .count();
        assert_eq!(closes, 2);
        assert_eq!(moves, 2);
    }

    #[test]
    fn test_outer_ring_starts_at_top_center() {
        let glyph = ShutterGlyph::render(Rect::new(0.0, 0.0, 120.0, 120.0));
        assert_eq!(
            glyph.outer.commands()[0],
            PathCommand::MoveTo(Point::new(60.0, 120.0 * 0.08333))
        );
    }

    #[test]
    fn test_inner_disc_inset() {
        // width 120: floor(120 * 0.12917) = 15, floor(120 * 0.87917) = 105.
        let glyph = ShutterGlyph::render(Rect::new(0.0, 0.0, 120.0, 120.0));
        let points: Vec<Point> = glyph.inner.points().collect();
        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        assert_eq!(min_x, 15.5);
        assert_eq!(max_x, 105.5);
    }

    proptest! {
        // Scaling an origin rect by k scales every outer-ring coordinate
        // by k. Restricted to the outer ring because the inner disc is
        // pixel-aligned with floor() on purpose.
        #[test]
        fn prop_outer_ring_scales_affinely(size in 1.0f32..512.0, k in 1u32..8) {
            let base = outer_ring(Rect::new(0.0, 0.0, size, size));
            let scaled = outer_ring(Rect::new(0.0, 0.0, size * k as f32, size * k as f32));

            for (a, b) in base.points().zip(scaled.points()) {
                prop_assert!((a.x * k as f32 - b.x).abs() < 1e-2);
                prop_assert!((a.y * k as f32 - b.y).abs() < 1e-2);
            }
        }
    }
}
