//! Editor configuration.

use crate::snap::{GRID_SIZE, SNAP_THRESHOLD, SnapMode};
use kurbo::Size;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Minimum element width and height during resize.
pub const MIN_ELEMENT_SIZE: f64 = 20.0;

/// Page height for new projects.
pub const DEFAULT_PAGE_HEIGHT: f64 = 640.0;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunables for the interaction engine and session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Grid cell size in pixels.
    pub grid_size: f64,
    /// Distance within which magnetic alignment kicks in.
    pub snap_threshold: f64,
    /// Which snapping passes run during drag and resize.
    pub snap_mode: SnapMode,
    /// Smallest width/height a resize may produce.
    pub min_element_size: f64,
    /// Size assumed for elements without pixel dimensions.
    pub fallback_element_size: Size,
    pub default_page_height: f64,
    pub min_page_height: f64,
    pub max_page_height: f64,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_threshold: SNAP_THRESHOLD,
            snap_mode: SnapMode::All,
            min_element_size: MIN_ELEMENT_SIZE,
            fallback_element_size: Size::new(160.0, 60.0),
            default_page_height: DEFAULT_PAGE_HEIGHT,
            min_page_height: 400.0,
            max_page_height: 4000.0,
        }
    }
}

impl EditorConfig {
    /// Load from JSON; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Clamp a page height into the configured bounds.
    pub fn clamp_page_height(&self, height: f64) -> f64 {
        if height.is_nan() {
            return self.min_page_height;
        }
        height.clamp(self.min_page_height, self.max_page_height)
    }
}
