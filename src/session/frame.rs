//! Frame type representing a rendered preview frame.

use std::time::Instant;

/// A single frame read back from the preview surface.
///
/// Pixels are tightly packed RGB8, row-major from the top-left corner.
#[derive(Clone)]
pub struct Frame {
    /// Raw RGB8 pixel data.
    pixels: Vec<u8>,
    /// Frame width in pixels.
    width: u32,
    /// Frame height in pixels.
    height: u32,
    /// Snapshot timestamp for diagnostics.
    timestamp: Instant,
    /// Monotonic sequence number assigned by the device.
    sequence: u64,
}

/// Bytes per RGB8 pixel.
const BYTES_PER_PIXEL: usize = 3;

impl Frame {
    /// Creates a new frame with the given parameters.
    pub fn new(pixels: Vec<u8>, width: u32, height: u32, sequence: u64) -> Self {
        Self {
            pixels,
            width,
            height,
            timestamp: Instant::now(),
            sequence,
        }
    }

    /// Returns a reference to the raw pixel data.
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Consumes the frame and returns the raw pixel buffer.
    #[inline]
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    /// Returns the frame width.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the frame height.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the snapshot timestamp.
    #[inline]
    pub fn timestamp(&self) -> Instant {
        self.timestamp
    }

    /// Returns the sequence number.
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Validates that the pixel buffer size matches dimensions.
    pub fn is_valid(&self) -> bool {
        self.pixels.len() == (self.width as usize) * (self.height as usize) * BYTES_PER_PIXEL
    }

    /// Returns a copy of this frame cropped to the given height-over-width
    /// ratio.
    ///
    /// The crop keeps the full width and takes rows from the top, the way
    /// the capture screen trims the rendered preview to the view's shape.
    /// A ratio taller than the frame itself leaves the frame unchanged.
    pub fn cropped_to_ratio(&self, height_over_width: f64) -> Frame {
        let target_height = (f64::from(self.width) * height_over_width).round() as u32;
        let crop_height = target_height.min(self.height);
        let row_bytes = self.width as usize * BYTES_PER_PIXEL;

        Frame {
            pixels: self.pixels[..crop_height as usize * row_bytes].to_vec(),
            width: self.width,
            height: crop_height,
            timestamp: self.timestamp,
            sequence: self.sequence,
        }
    }
}

impl std::fmt::Debug for Frame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Frame")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("sequence", &self.sequence)
            .field("pixel_bytes", &self.pixels.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_creation() {
        let pixels = vec![0u8; 640 * 480 * 3];
        let frame = Frame::new(pixels, 640, 480, 1);

        assert_eq!(frame.width(), 640);
        assert_eq!(frame.height(), 480);
        assert_eq!(frame.sequence(), 1);
        assert!(frame.is_valid());
    }

    #[test]
    fn test_frame_invalid_size() {
        let pixels = vec![0u8; 100]; // Wrong size
        let frame = Frame::new(pixels, 640, 480, 1);

        assert!(!frame.is_valid());
    }

    #[test]
    fn test_crop_keeps_width_changes_height() {
        let frame = Frame::new(vec![7u8; 100 * 100 * 3], 100, 100, 1);
        let cropped = frame.cropped_to_ratio(0.5);

        assert_eq!(cropped.width(), 100);
        assert_eq!(cropped.height(), 50);
        assert!(cropped.is_valid());
    }

    #[test]
    fn test_crop_taller_than_frame_is_identity() {
        let frame = Frame::new(vec![7u8; 100 * 50 * 3], 100, 50, 1);
        let cropped = frame.cropped_to_ratio(2.0);

        assert_eq!(cropped.width(), 100);
        assert_eq!(cropped.height(), 50);
    }

    #[test]
    fn test_crop_takes_top_rows() {
        // Two-row frame: top row 1s, bottom row 2s.
        let mut pixels = vec![1u8; 2 * 3];
        pixels.extend(vec![2u8; 2 * 3]);
        let frame = Frame::new(pixels, 2, 2, 1);

        let cropped = frame.cropped_to_ratio(0.5);
        assert_eq!(cropped.height(), 1);
        assert!(cropped.pixels().iter().all(|&b| b == 1));
    }
}
