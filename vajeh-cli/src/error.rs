//! Error handling for the CLI application

use std::fmt;

/// Custom error type for CLI-specific failures
#[derive(Debug)]
pub enum CliError {
    /// A required resource (font, stopwords, mask) is missing
    MissingResource(String),
    /// The tesseract binary cannot be run
    OcrUnavailable(String),
    /// Configuration file problem
    ConfigError(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::MissingResource(what) => write!(f, "Missing resource: {what}"),
            CliError::OcrUnavailable(msg) => write!(f, "OCR engine unavailable: {msg}"),
            CliError::ConfigError(msg) => write!(f, "Configuration error: {msg}"),
        }
    }
}

impl std::error::Error for CliError {}

/// Result type alias for CLI operations
pub type CliResult<T> = Result<T, anyhow::Error>;
