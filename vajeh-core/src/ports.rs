//! Collaborator ports.
//!
//! The core never talks to an OCR engine, a linguistic library, or a
//! renderer directly; it goes through these traits so tests can inject
//! deterministic fakes and the binary can bind real adapters.

use std::path::Path;

use crate::config::RenderConfig;
use crate::error::Result;

/// Optical character recognition over a single image file.
pub trait OcrEngine: Send + Sync {
    /// Recognize `image` into raw text.
    ///
    /// The returned text may contain mixed scripts, stray control
    /// characters, and recognition noise; cleaning it is the pipeline's
    /// job, not the engine's.
    fn recognize(&self, image: &Path) -> Result<String>;
}

/// Locale-aware script normalization.
pub trait Normalizer: Send + Sync {
    fn normalize(&self, text: &str) -> String;
}

/// Splits normalized text into an ordered token sequence.
pub trait Tokenizer: Send + Sync {
    fn tokenize(&self, text: &str) -> Vec<String>;
}

/// Replaces every emoji grapheme span in `text` with `replacement`.
pub trait EmojiDetector: Send + Sync {
    fn replace(&self, text: &str, replacement: &str) -> String;
}

/// Contextual shaping plus visual-order (bidi) transform.
///
/// Required before rendering because the downstream renderer assumes
/// left-to-right glyph layout and cannot natively shape or reorder
/// right-to-left scripts.
pub trait Reshaper: Send + Sync {
    fn shape_and_reorder(&self, text: &str) -> String;
}

/// Produces the word-frequency image from the final text.
pub trait Renderer: Send + Sync {
    /// Render `text` under `config` into encoded PNG bytes.
    fn render(&self, text: &str, config: &RenderConfig) -> Result<Vec<u8>>;
}

/// Progress notifications for the per-image OCR stage.
pub trait ProgressObserver: Send + Sync {
    /// Called after each image finishes recognition (or fails).
    fn image_done(&self, image: &Path) {
        let _ = image;
    }
}

/// Observer that reports nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {}
