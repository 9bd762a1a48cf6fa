//! Preview resolution selection.
//!
//! Picks the camera-reported preview size whose aspect ratio is closest
//! to the displaying surface, so the live feed fills the view without
//! letterboxing artifacts.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A camera-reported preview resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreviewSize {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl PreviewSize {
    /// Creates a preview size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width-over-height aspect ratio of this size.
    #[inline]
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl std::fmt::Display for PreviewSize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors from preview size selection.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    /// The candidate list was empty. Platform camera drivers always
    /// report at least one supported size, so this is defensive.
    #[error("no candidate preview sizes supplied")]
    NoCandidates,
}

/// Selects the candidate whose `width/height` ratio is closest to
/// `target_aspect`.
///
/// `target_aspect` is the surface's height-over-width ratio: the sensor
/// is mounted 90 degrees from the natural device orientation on the
/// reference hardware, so the surface ratio is compared against the
/// candidates' transposed ratio.
///
/// Ties resolve to the earliest candidate in input order; the list is
/// never re-sorted. Returns an element of `candidates`, never a
/// synthesized size.
pub fn select_preview_size(
    candidates: &[PreviewSize],
    target_aspect: f64,
) -> Result<PreviewSize, SelectionError> {
    let best = candidates
        .iter()
        .copied()
        .min_by(|a, b| {
            let da = (a.aspect() - target_aspect).abs();
            let db = (b.aspect() - target_aspect).abs();
            // min_by keeps the first element on Equal, which gives the
            // stable tie-break.
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        })
        .ok_or(SelectionError::NoCandidates)?;

    tracing::debug!(
        candidates = candidates.len(),
        target_aspect,
        selected = %best,
        "selected preview size"
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_empty_candidates_rejected() {
        assert_eq!(
            select_preview_size(&[], 1.0),
            Err(SelectionError::NoCandidates)
        );
    }

    #[test]
    fn test_selects_closest_aspect() {
        // Portrait surface 1080x1920: target = 1920/1080. The landscape
        // 16:9 candidate matches it exactly through the transposition.
        let candidates = [
            PreviewSize::new(4, 3),
            PreviewSize::new(16, 9),
            PreviewSize::new(1, 1),
        ];
        let selected = select_preview_size(&candidates, 1920.0 / 1080.0).unwrap();
        assert_eq!(selected, PreviewSize::new(16, 9));
    }

    #[test]
    fn test_square_target_picks_square() {
        let candidates = [
            PreviewSize::new(4, 3),
            PreviewSize::new(16, 9),
            PreviewSize::new(1, 1),
        ];
        let selected = select_preview_size(&candidates, 1.0).unwrap();
        assert_eq!(selected, PreviewSize::new(1, 1));
    }

    #[test]
    fn test_tie_breaks_to_first() {
        // Both candidates are the same ratio at different resolutions.
        let candidates = [
            PreviewSize::new(1280, 720),
            PreviewSize::new(1920, 1080),
        ];
        let selected = select_preview_size(&candidates, 16.0 / 9.0).unwrap();
        assert_eq!(selected, PreviewSize::new(1280, 720));
    }

    proptest! {
        #[test]
        fn prop_returns_input_element(
            dims in prop::collection::vec((1u32..4096, 1u32..4096), 1..32),
            target in 0.1f64..10.0,
        ) {
            let candidates: Vec<PreviewSize> =
                dims.iter().map(|&(w, h)| PreviewSize::new(w, h)).collect();
            let selected = select_preview_size(&candidates, target).unwrap();

            prop_assert!(candidates.contains(&selected));

            // No other candidate is strictly closer.
            let d = (selected.aspect() - target).abs();
            for c in &candidates {
                prop_assert!((c.aspect() - target).abs() >= d - f64::EPSILON);
            }
        }
    }
}
