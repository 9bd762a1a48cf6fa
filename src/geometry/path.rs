//! Vector path primitives.
//!
//! Minimal path model for glyph rendering: absolute move-to, cubic
//! Bezier segments, and subpath close. Paths are plain data so any
//! platform canvas can replay them without depending on this crate's
//! rendering assumptions.

use serde::{Deserialize, Serialize};

/// Magic number for approximating a quarter circle with one cubic
/// Bezier segment (4/3 * (sqrt(2) - 1)).
const KAPPA: f32 = 0.552_284_77;

/// A point in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a point from coordinates.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// An axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width, expected non-negative.
    pub width: f32,
    /// Height, expected non-negative.
    pub height: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub const fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Returns the point at the given fractional offsets of this rect.
    ///
    /// `(0.0, 0.0)` is the top-left corner, `(1.0, 1.0)` the bottom-right.
    #[inline]
    pub fn at(&self, fx: f32, fy: f32) -> Point {
        Point::new(self.left + self.width * fx, self.top + self.height * fy)
    }
}

/// A single path drawing command with absolute coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PathCommand {
    /// Begins a new subpath at the given point.
    MoveTo(Point),
    /// Cubic Bezier segment from the current point.
    CubicTo {
        /// First control point.
        ctrl1: Point,
        /// Second control point.
        ctrl2: Point,
        /// Segment end point.
        to: Point,
    },
    /// Closes the current subpath back to its starting point.
    Close,
}

/// An immutable sequence of path commands describing closed curves.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct VectorPath {
    commands: Vec<PathCommand>,
}

impl VectorPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the path commands in drawing order.
    #[inline]
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns true if the path has no commands.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Begins a new subpath.
    pub fn move_to(&mut self, p: Point) {
        self.commands.push(PathCommand::MoveTo(p));
    }

    /// Appends a cubic Bezier segment.
    pub fn cubic_to(&mut self, ctrl1: Point, ctrl2: Point, to: Point) {
        self.commands.push(PathCommand::CubicTo { ctrl1, ctrl2, to });
    }

    /// Closes the current subpath.
    pub fn close(&mut self) {
        self.commands.push(PathCommand::Close);
    }

    /// Builds a closed ellipse inscribed in `rect`, approximated by four
    /// symmetric cubic segments drawn clockwise from the twelve o'clock
    /// position.
    pub fn ellipse(rect: Rect) -> Self {
        let cx = rect.left + rect.width * 0.5;
        let cy = rect.top + rect.height * 0.5;
        let rx = rect.width * 0.5;
        let ry = rect.height * 0.5;
        let kx = rx * KAPPA;
        let ky = ry * KAPPA;

        let mut path = Self::new();
        path.move_to(Point::new(cx, cy - ry));
        path.cubic_to(
            Point::new(cx + kx, cy - ry),
            Point::new(cx + rx, cy - ky),
            Point::new(cx + rx, cy),
        );
        path.cubic_to(
            Point::new(cx + rx, cy + ky),
            Point::new(cx + kx, cy + ry),
            Point::new(cx, cy + ry),
        );
        path.cubic_to(
            Point::new(cx - kx, cy + ry),
            Point::new(cx - rx, cy + ky),
            Point::new(cx - rx, cy),
        );
        path.cubic_to(
            Point::new(cx - rx, cy - ky),
            Point::new(cx - kx, cy - ry),
            Point::new(cx, cy - ry),
        );
        path.close();
        path
    }

    /// Returns every coordinate pair the path touches, in command order.
    ///
    /// Control points are included; useful for bounds checks and for
    /// comparing geometry in tests.
    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.commands.iter().flat_map(|cmd| match cmd {
            PathCommand::MoveTo(p) => vec![*p],
            PathCommand::CubicTo { ctrl1, ctrl2, to } => vec![*ctrl1, *ctrl2, *to],
            PathCommand::Close => vec![],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_fractional_offsets() {
        let rect = Rect::new(10.0, 20.0, 100.0, 200.0);
        assert_eq!(rect.at(0.0, 0.0), Point::new(10.0, 20.0));
        assert_eq!(rect.at(1.0, 1.0), Point::new(110.0, 220.0));
        assert_eq!(rect.at(0.5, 0.5), Point::new(60.0, 120.0));
    }

    #[test]
    fn test_ellipse_touches_extremes() {
        let path = VectorPath::ellipse(Rect::new(0.0, 0.0, 100.0, 50.0));
        let points: Vec<Point> = path.points().collect();

        // Cardinal points of the ellipse must be on the rect edges.
        assert!(points.contains(&Point::new(50.0, 0.0)));
        assert!(points.contains(&Point::new(100.0, 25.0)));
        assert!(points.contains(&Point::new(50.0, 50.0)));
        assert!(points.contains(&Point::new(0.0, 25.0)));
    }

    #[test]
    fn test_ellipse_is_closed() {
        let path = VectorPath::ellipse(Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
    }
}
