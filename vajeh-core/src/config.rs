//! Pipeline and render configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::segmenter::TailPolicy;

/// Default configuration constants.
pub mod defaults {
    /// Default canvas width in pixels.
    pub const WIDTH: u32 = 600;

    /// Default canvas height in pixels.
    pub const HEIGHT: u32 = 400;

    /// Default upper bound on the rendered font size.
    pub const MAX_FONT_SIZE: u32 = 250;

    /// Number of entries in the most-common-words report.
    pub const REPORT_WORDS: usize = 100;

    /// Default location of the rendering font.
    pub const FONT_PATH: &str = "data/fonts/Vazirmatn-Regular.ttf";
}

/// What to do when recognition fails for a single image.
///
/// Failures are independent per image, so skipping cannot corrupt the text
/// contributed by other images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrFailurePolicy {
    /// Log a warning and continue with the remaining images.
    #[default]
    Skip,
    /// Propagate the failure and abort the run.
    Abort,
}

/// Behavior knobs for one pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// End-of-input handling for the segmenter.
    pub tail_policy: TailPolicy,

    /// Per-image OCR failure handling.
    pub ocr_failure: OcrFailurePolicy,

    /// Run per-image OCR on the rayon pool. Result order is preserved
    /// either way.
    pub parallel_ocr: bool,

    /// Size of the most-common-words report.
    pub report_words: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            tail_policy: TailPolicy::default(),
            ocr_failure: OcrFailurePolicy::default(),
            parallel_ocr: false,
            report_words: defaults::REPORT_WORDS,
        }
    }
}

/// Render configuration.
///
/// Carried opaquely by the pipeline and interpreted only by the renderer
/// adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,

    /// Canvas height in pixels.
    pub height: u32,

    /// Upper bound on the rendered font size in pixels.
    pub max_font_size: u32,

    /// Background color, "white" or "black".
    pub background: String,

    /// TTF font used for glyph layout.
    pub font_path: PathBuf,

    /// Optional mask image bounding word placement (white = excluded).
    pub mask_path: Option<PathBuf>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: defaults::WIDTH,
            height: defaults::HEIGHT,
            max_font_size: defaults::MAX_FONT_SIZE,
            background: "white".to_string(),
            font_path: PathBuf::from(defaults::FONT_PATH),
            mask_path: None,
        }
    }
}

impl RenderConfig {
    /// Validate the numeric parameters.
    pub fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            return Err(PipelineError::Config(
                "render dimensions must be non-zero".into(),
            ));
        }
        if self.max_font_size == 0 {
            return Err(PipelineError::Config(
                "max_font_size must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}
