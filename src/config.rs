//! Engine configuration.
//!
//! Handles loading, validating, and merging a `tagcrop.toml` file. Stock
//! defaults are the base layer; a user file only needs the keys it wants to
//! change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! [crop]
//! min_size = 150.0          # Minimum crop width and height (screen units)
//! min_aspect_ratio = 0.5    # Narrowest allowed width/height (1:2)
//! max_aspect_ratio = 2.0    # Widest allowed width/height (2:1)
//! initial_fill = 0.8        # Initial square, as a fraction of the shorter image side
//! handle_tolerance = 10.0   # Hit radius around handles
//!
//! [tags]
//! dot_size = 20.0           # Taps closer than this to the image edge are ignored
//! dot_color = "rgb(158, 72, 190)"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::geometry::Constraints;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Default config file name looked up by the CLI.
pub const CONFIG_FILE_NAME: &str = "tagcrop.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Full engine configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Crop box limits and initial placement.
    pub crop: CropConfig,
    /// Tag dot placement and appearance.
    pub tags: TagConfig,
}

impl EngineConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let crop = &self.crop;
        if !(crop.min_size > 0.0) {
            return Err(ConfigError::Validation(
                "crop.min_size must be positive".into(),
            ));
        }
        if !(crop.min_aspect_ratio > 0.0) {
            return Err(ConfigError::Validation(
                "crop.min_aspect_ratio must be positive".into(),
            ));
        }
        // The initial region is square, so 1.0 has to be a legal ratio.
        if !(crop.min_aspect_ratio <= 1.0 && 1.0 <= crop.max_aspect_ratio) {
            return Err(ConfigError::Validation(
                "crop aspect ratio range must include 1.0 (min_aspect_ratio <= 1 <= max_aspect_ratio)"
                    .into(),
            ));
        }
        if !(crop.initial_fill > 0.0 && crop.initial_fill <= 1.0) {
            return Err(ConfigError::Validation(
                "crop.initial_fill must be in (0, 1]".into(),
            ));
        }
        if !(crop.handle_tolerance >= 0.0) {
            return Err(ConfigError::Validation(
                "crop.handle_tolerance must not be negative".into(),
            ));
        }
        if !(self.tags.dot_size >= 0.0) {
            return Err(ConfigError::Validation(
                "tags.dot_size must not be negative".into(),
            ));
        }
        if self.tags.dot_color.trim().is_empty() {
            return Err(ConfigError::Validation(
                "tags.dot_color must not be empty".into(),
            ));
        }
        Ok(())
    }
}

/// Crop box settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CropConfig {
    /// Minimum width and height of the region, in screen units.
    pub min_size: f64,
    /// Smallest allowed width / height.
    pub min_aspect_ratio: f64,
    /// Largest allowed width / height.
    pub max_aspect_ratio: f64,
    /// Side of the initial square region as a fraction of the shorter image side.
    pub initial_fill: f64,
    /// Distance within which a pointer grabs a corner or edge handle.
    pub handle_tolerance: f64,
}

impl CropConfig {
    pub fn constraints(&self) -> Constraints {
        Constraints {
            min_size: self.min_size,
            min_aspect_ratio: self.min_aspect_ratio,
            max_aspect_ratio: self.max_aspect_ratio,
        }
    }
}

impl Default for CropConfig {
    fn default() -> Self {
        let constraints = Constraints::default();
        Self {
            min_size: constraints.min_size,
            min_aspect_ratio: constraints.min_aspect_ratio,
            max_aspect_ratio: constraints.max_aspect_ratio,
            initial_fill: 0.8,
            handle_tolerance: 10.0,
        }
    }
}

/// Tag dot settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TagConfig {
    /// Rendered dot size. Taps must land at least this far inside the image.
    pub dot_size: f64,
    /// Color given to newly created dots.
    pub dot_color: String,
}

impl Default for TagConfig {
    fn default() -> Self {
        Self {
            dot_size: 20.0,
            dot_color: "rgb(158, 72, 190)".to_string(),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(EngineConfig::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a config file as a raw TOML value.
///
/// Returns `Ok(None)` if the file does not exist.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<EngineConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: EngineConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `path`, falling back to stock defaults if it is missing.
pub fn load_config(path: &Path) -> Result<EngineConfig, ConfigError> {
    let base = stock_defaults_value();
    let overlay = load_raw_config(path)?;
    resolve_config(base, overlay)
}

/// Returns a fully-commented stock `tagcrop.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# tagcrop configuration
# =====================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# ---------------------------------------------------------------------------
# Crop box
# ---------------------------------------------------------------------------
[crop]
# Minimum crop width and height, in screen units.
min_size = 150.0

# Allowed width/height range. Must include 1.0 (the initial region is square).
min_aspect_ratio = 0.5
max_aspect_ratio = 2.0

# Initial square side as a fraction of the shorter side of the fitted image.
initial_fill = 0.8

# How close a pointer must be to a corner or edge to grab it.
handle_tolerance = 10.0

# ---------------------------------------------------------------------------
# Product tags
# ---------------------------------------------------------------------------
[tags]
# Dot size. Taps closer than this to any image edge are ignored.
dot_size = 20.0

# Color for new dots.
dot_color = "rgb(158, 72, 190)"
"##
}
