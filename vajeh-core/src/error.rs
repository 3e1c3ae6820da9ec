//! Error taxonomy for the pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Pipeline-level errors.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Missing or unreadable image source
    #[error("input error: {0}")]
    Input(String),

    /// Recognition failed for a single image
    #[error("OCR failed for {image}: {reason}")]
    Ocr {
        /// The image that failed recognition
        image: PathBuf,
        /// What the OCR engine reported
        reason: String,
    },

    /// Invalid configuration or missing resource (font, stopwords, mask)
    #[error("configuration error: {0}")]
    Config(String),

    /// Text could not be represented for rendering
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The renderer failed to produce the image artifact
    #[error("render error: {0}")]
    Render(String),
}

impl From<std::io::Error> for PipelineError {
    fn from(err: std::io::Error) -> Self {
        PipelineError::Input(err.to_string())
    }
}

/// Result type for pipeline operations
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ocr_error_names_the_image() {
        let err = PipelineError::Ocr {
            image: PathBuf::from("scans/page-3.png"),
            reason: "engine exited with status 1".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("scans/page-3.png"));
        assert!(msg.contains("status 1"));
    }

    #[test]
    fn io_error_maps_to_input() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PipelineError = io.into();
        assert!(matches!(err, PipelineError::Input(_)));
    }
}
