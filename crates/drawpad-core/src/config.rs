//! Editor configuration.

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Tunables for the board editor.
///
/// Every field has a default, so a partial JSON document is enough.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width/height an item can be resized to.
    pub min_item_size: f64,
    /// Longest side of a newly added image.
    pub max_image_dimension: f64,
    /// Where new items go while the canvas size is still unknown.
    pub fallback_center: Point,
    /// Size of new rectangles and circles.
    pub shape_size: Size,
    /// Size of new text items.
    pub text_size: Size,
    /// Content of new text items.
    pub default_text: String,
    /// Distance the pointer must travel before an item drag starts.
    pub drag_threshold: f64,
    /// Distance the pointer must travel before a handle drag starts.
    pub handle_drag_threshold: f64,
    /// Hit radius around resize handles.
    pub handle_hit_tolerance: f64,
    /// Maximum delay between the taps of a double tap.
    pub double_tap_interval_ms: u64,
    /// Maximum distance between the taps of a double tap.
    pub double_tap_distance: f64,
    /// Maximum number of undo states (None = unbounded).
    pub history_limit: Option<usize>,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_item_size: 20.0,
            max_image_dimension: 300.0,
            fallback_center: Point::new(200.0, 200.0),
            shape_size: Size::new(100.0, 100.0),
            text_size: Size::new(150.0, 50.0),
            default_text: "New Text".to_string(),
            drag_threshold: 5.0,
            handle_drag_threshold: 0.0,
            handle_hit_tolerance: 12.0,
            double_tap_interval_ms: 500,
            double_tap_distance: 5.0,
            history_limit: None,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the config to JSON.
    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check that all values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_item_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_item_size must be positive, got {}",
                self.min_item_size
            )));
        }
        if self.max_image_dimension < self.min_item_size {
            return Err(ConfigError::Invalid(format!(
                "max_image_dimension ({}) is below min_item_size ({})",
                self.max_image_dimension, self.min_item_size
            )));
        }
        for (name, size) in [("shape_size", self.shape_size), ("text_size", self.text_size)] {
            if size.width < self.min_item_size || size.height < self.min_item_size {
                return Err(ConfigError::Invalid(format!(
                    "{name} {}x{} is below min_item_size",
                    size.width, size.height
                )));
            }
        }
        if self.drag_threshold < 0.0 || self.handle_drag_threshold < 0.0 {
            return Err(ConfigError::Invalid("drag thresholds must not be negative".into()));
        }
        if self.history_limit == Some(0) {
            return Err(ConfigError::Invalid("history_limit must be at least 1".into()));
        }
        Ok(())
    }
}
