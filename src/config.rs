//! Render configuration

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Canvas size must be non-zero, got {0}x{1}")]
    EmptyCanvas(u32, u32),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(default = "default_canvas")]
    pub width: u32,
    #[serde(default = "default_canvas")]
    pub height: u32,
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,
    #[serde(default = "default_title")]
    pub title: String,
}

fn default_canvas() -> u32 { 1000 }
fn default_stroke_width() -> u32 { 3 }
fn default_title() -> String { "Shape Album".to_string() }

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: default_canvas(),
            height: default_canvas(),
            stroke_width: default_stroke_width(),
            title: default_title(),
        }
    }
}

impl RenderConfig {
    /// Load a JSON config; absent fields take their defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let display = path.display().to_string();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: display,
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas(self.width, self.height));
        }
        Ok(())
    }
}
