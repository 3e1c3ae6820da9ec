//! Tesseract OCR adapter.
//!
//! Shells out to the `tesseract` binary per image:
//! `tesseract <image> stdout --psm <n> -l <langs>`. Recognition mode and
//! language hints are pass-through configuration.

use std::path::Path;
use std::process::Command;

use vajeh_core::ports::OcrEngine;
use vajeh_core::{PipelineError, Result};

/// Subprocess-based Tesseract engine.
#[derive(Debug, Clone)]
pub struct TesseractOcr {
    lang: String,
    psm: u8,
}

impl TesseractOcr {
    pub fn new(lang: impl Into<String>, psm: u8) -> Self {
        Self {
            lang: lang.into(),
            psm,
        }
    }

    /// Check that the tesseract binary is runnable.
    ///
    /// Run before any recognition so a missing install fails fast instead
    /// of after the first image. The error is the bare reason; callers
    /// wrap it into their own error type.
    pub fn probe(&self) -> std::result::Result<(), String> {
        match Command::new("tesseract").arg("--version").output() {
            Ok(output) if output.status.success() => Ok(()),
            Ok(output) => Err(format!("tesseract --version exited with {}", output.status)),
            Err(err) => Err(format!("tesseract binary not available: {err}")),
        }
    }
}

impl Default for TesseractOcr {
    fn default() -> Self {
        Self::new("eng+fas", 3)
    }
}

impl OcrEngine for TesseractOcr {
    fn recognize(&self, image: &Path) -> Result<String> {
        let output = Command::new("tesseract")
            .arg(image)
            .arg("stdout")
            .arg("--psm")
            .arg(self.psm.to_string())
            .arg("-l")
            .arg(&self.lang)
            .output()
            .map_err(|err| PipelineError::Ocr {
                image: image.to_path_buf(),
                reason: format!("failed to spawn tesseract: {err}"),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(PipelineError::Ocr {
                image: image.to_path_buf(),
                reason: format!(
                    "tesseract exited with {}: {}",
                    output.status,
                    stderr.trim()
                ),
            });
        }

        String::from_utf8(output.stdout).map_err(|err| PipelineError::Ocr {
            image: image.to_path_buf(),
            reason: format!("non-UTF-8 tesseract output: {err}"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_the_stock_invocation() {
        let ocr = TesseractOcr::default();
        assert_eq!(ocr.lang, "eng+fas");
        assert_eq!(ocr.psm, 3);
    }
}
