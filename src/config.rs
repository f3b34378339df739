//! Chart configuration
//!
//! Settings are read from an optional JSON file and then overridden by
//! command-line flags. Every field has a default, so `{}` is a valid file.

use crate::charts::SeriesColor;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("bar_width must be positive and finite, got {0}")]
    InvalidBarWidth(f64),
    #[error("invalid image size: width={width}, height={height}")]
    InvalidSize { width: u32, height: u32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    /// Chart title
    pub title: String,

    /// Y-axis label
    pub y_label: String,

    /// Width of a single bar in category units (one category slot = 1.0)
    pub bar_width: f64,

    /// Exported image width in pixels
    pub width: u32,

    /// Exported image height in pixels
    pub height: u32,

    /// Draw the truncated value above every bar
    pub show_value_labels: bool,

    /// Colors for series that don't name their own, by series index
    pub palette: Vec<SeriesColor>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            title: "Benchmark results Insertion".to_string(),
            y_label: "Time (ms)".to_string(),
            bar_width: 0.35,
            width: 1024,
            height: 768,
            show_value_labels: true,
            palette: Vec::new(),
        }
    }
}

impl ChartConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.bar_width.is_finite() && self.bar_width > 0.0) {
            return Err(ConfigError::InvalidBarWidth(self.bar_width));
        }
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    /// Color for the series at `index`: configured palette first, then the built-in one.
    pub fn series_color(&self, index: usize) -> SeriesColor {
        if self.palette.is_empty() {
            SeriesColor::from_palette(index)
        } else {
            self.palette[index % self.palette.len()]
        }
    }
}
