//! Reconstructs noisy, line-oriented OCR output into coherent text items
//! and drives the cleaned text through to a word-frequency rendering.
//!
//! # Architecture
//!
//! The crate follows a ports-and-adapters layout:
//! - **Core transforms**: [`alphabet`] (the script-membership oracle),
//!   [`segmenter`] (the item state machine), [`noise`] (invisible-mark and
//!   emoji stripping).
//! - **Orchestration**: [`pipeline`] walks the stages of one run in order.
//! - **Ports**: [`ports`] declares the collaborator traits (OCR engine,
//!   normalizer, tokenizer, emoji detector, reshaper, renderer). Binaries
//!   bind real adapters; tests bind deterministic fakes.
//!
//! # Example
//!
//! ```rust
//! use vajeh_core::{Alphabet, TailPolicy};
//! use vajeh_core::segmenter::segment;
//!
//! let alphabet = Alphabet::persian();
//! let items = segment("سلام\nnoise\nچطوری\n", &alphabet, TailPolicy::Discard);
//! assert_eq!(items.len(), 2);
//! assert_eq!(items[0].as_str(), "سلام");
//! ```

pub mod alphabet;
pub mod config;
pub mod error;
pub mod noise;
pub mod pipeline;
pub mod ports;
pub mod segmenter;
pub mod source;
pub mod stopwords;

pub use alphabet::Alphabet;
pub use config::{OcrFailurePolicy, PipelineConfig, RenderConfig};
pub use error::{PipelineError, Result};
pub use pipeline::{Artifacts, Ports, RunStats, TextPipeline, WordCount};
pub use segmenter::{Item, ItemSegmenter, TailPolicy};
pub use source::ImageSource;
pub use stopwords::StopwordSet;
