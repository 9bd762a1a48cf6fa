//! Capture screen configuration.
//!
//! Names the values the reference layout hardcoded (button edge 120,
//! bottom offset 200) and the capture tuning (JPEG quality, focus and
//! flash modes) so they resolve at layout time instead of being
//! scattered literals.

use crate::geometry::{Point, Rect};
use crate::session::{FlashMode, FocusMode};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Placement and sizing of the shutter button within the view.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Edge length of the square shutter button, in surface units.
    pub shutter_edge: f32,
    /// Distance from the bottom of the view to the button's top edge.
    pub shutter_bottom_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            shutter_edge: 120.0,
            shutter_bottom_offset: 200.0,
        }
    }
}

impl LayoutConfig {
    /// Top-left corner of the shutter button for a view of the given
    /// size: horizontally centered, fixed offset from the bottom.
    pub fn shutter_origin(&self, view_width: f32, view_height: f32) -> Point {
        Point::new(
            view_width * 0.5 - self.shutter_edge * 0.5,
            view_height - self.shutter_bottom_offset,
        )
    }

    /// Bounding rectangle of the shutter button for a view of the given
    /// size.
    pub fn shutter_frame(&self, view_width: f32, view_height: f32) -> Rect {
        let origin = self.shutter_origin(view_width, view_height);
        Rect::new(origin.x, origin.y, self.shutter_edge, self.shutter_edge)
    }

    /// Validates the layout values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shutter_edge <= 0.0 {
            return Err(ConfigError::InvalidButtonSize);
        }
        if self.shutter_bottom_offset < 0.0 {
            return Err(ConfigError::InvalidButtonSize);
        }
        Ok(())
    }
}

/// Camera tuning applied when the session opens.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct CaptureTuning {
    /// JPEG compression quality, 1-100.
    pub jpeg_quality: u8,
    /// Focus mode requested from the camera.
    pub focus: FocusMode,
    /// Flash mode requested from the camera.
    pub flash: FlashMode,
}

impl Default for CaptureTuning {
    fn default() -> Self {
        Self {
            jpeg_quality: 80,
            focus: FocusMode::ContinuousPicture,
            flash: FlashMode::Auto,
        }
    }
}

impl CaptureTuning {
    /// Validates the tuning values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.jpeg_quality == 0 || self.jpeg_quality > 100 {
            return Err(ConfigError::InvalidQuality);
        }
        Ok(())
    }
}

/// Configuration validation and loading errors.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    /// The shutter button dimensions are unusable.
    #[error("invalid shutter button dimensions")]
    InvalidButtonSize,
    /// The JPEG quality is outside 1-100.
    #[error("invalid JPEG quality (must be 1-100)")]
    InvalidQuality,
    /// The config file could not be read.
    #[error("failed to read config file: {0}")]
    FileReadError(String),
    /// The config file could not be parsed.
    #[error("failed to parse config file: {0}")]
    ParseError(String),
}

/// Full configuration file format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default)]
pub struct FileConfig {
    /// Shutter button layout.
    #[serde(default)]
    pub layout: LayoutConfig,
    /// Capture tuning.
    #[serde(default)]
    pub capture: CaptureTuning,
}

impl FileConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::FileReadError(e.to_string()))?;
        let config: FileConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.layout.validate()?;
        config.capture.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = FileConfig::default();
        assert!(config.layout.validate().is_ok());
        assert!(config.capture.validate().is_ok());
    }

    #[test]
    fn test_zero_quality_invalid() {
        let tuning = CaptureTuning {
            jpeg_quality: 0,
            ..Default::default()
        };
        assert!(matches!(tuning.validate(), Err(ConfigError::InvalidQuality)));
    }

    #[test]
    fn test_zero_edge_invalid() {
        let layout = LayoutConfig {
            shutter_edge: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            layout.validate(),
            Err(ConfigError::InvalidButtonSize)
        ));
    }

    #[test]
    fn test_shutter_origin_matches_reference_layout() {
        // 1080-wide view: x = 1080/2 - 60; y = height - 200.
        let layout = LayoutConfig::default();
        let origin = layout.shutter_origin(1080.0, 1920.0);
        assert_eq!(origin, Point::new(480.0, 1720.0));
    }

    #[test]
    fn test_shutter_frame_is_square() {
        let frame = LayoutConfig::default().shutter_frame(1080.0, 1920.0);
        assert_eq!(frame.width, 120.0);
        assert_eq!(frame.height, 120.0);
    }

    #[test]
    fn test_parse_partial_file() {
        let config: FileConfig = toml::from_str("[capture]\njpeg_quality = 90\n").unwrap();
        assert_eq!(config.capture.jpeg_quality, 90);
        assert_eq!(config.layout.shutter_edge, 120.0);
    }
}
