//! Optional TOML configuration file.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::error::CliError;
use vajeh_core::{PipelineConfig, RenderConfig};

/// CLI configuration structure
///
/// Every table is optional; missing values fall back to the built-in
/// defaults, and command-line flags win over file values.
#[derive(Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct CliConfig {
    /// Render configuration
    pub render: RenderConfig,

    /// OCR invocation configuration
    pub ocr: OcrConfig,

    /// Pipeline behavior configuration
    pub pipeline: PipelineConfig,
}

/// OCR invocation settings
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Tesseract language hint
    pub lang: String,

    /// Page segmentation mode
    pub psm: u8,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            lang: "eng+fas".to_string(),
            psm: 3,
        }
    }
}

impl CliConfig {
    /// Load from `path`, or return defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        toml::from_str(&content)
            .map_err(|err| CliError::ConfigError(format!("{}: {err}", path.display())).into())
    }
}
