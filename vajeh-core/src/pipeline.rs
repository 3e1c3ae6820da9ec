//! Pipeline orchestration.
//!
//! One run walks the stages strictly in order: acquire raw text per image,
//! segment lines into items, strip noise, normalize and tokenize, filter
//! stopwords, reshape for a left-to-right renderer, render. Every stage is
//! a pure transform over the previous stage's output; no stage re-reads
//! upstream state.

use std::collections::HashMap;
use std::path::PathBuf;

use log::{info, warn};

use crate::alphabet::Alphabet;
use crate::config::{OcrFailurePolicy, PipelineConfig, RenderConfig};
use crate::error::{PipelineError, Result};
use crate::noise::NoiseStripper;
use crate::ports::{
    EmojiDetector, NoProgress, Normalizer, OcrEngine, ProgressObserver, Renderer, Reshaper,
    Tokenizer,
};
use crate::segmenter;
use crate::source::ImageSource;
use crate::stopwords::StopwordSet;

/// The collaborator bundle a pipeline runs against.
pub struct Ports {
    pub ocr: Box<dyn OcrEngine>,
    pub normalizer: Box<dyn Normalizer>,
    pub tokenizer: Box<dyn Tokenizer>,
    pub emoji: Box<dyn EmojiDetector>,
    pub reshaper: Box<dyn Reshaper>,
    pub renderer: Box<dyn Renderer>,
}

/// One `(token, count)` entry of the most-common report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordCount {
    pub word: String,
    pub count: usize,
}

/// Counters describing one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    pub images_processed: usize,
    pub images_failed: usize,
    pub items: usize,
    pub tokens_total: usize,
    pub tokens_kept: usize,
}

/// Everything one run produces. Persisting files is the caller's job.
pub struct Artifacts {
    /// Reconstructed, de-noised text, items separated by blank lines.
    pub text: String,
    /// Kept-token frequencies, most common first.
    pub word_counts: Vec<WordCount>,
    /// Encoded PNG produced by the renderer.
    pub image_png: Vec<u8>,
    /// Run counters.
    pub stats: RunStats,
}

impl Artifacts {
    /// The `"<token>: <count>"` report body, one entry per line.
    pub fn report(&self) -> String {
        self.word_counts
            .iter()
            .map(|wc| format!("{}: {}", wc.word, wc.count))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Orchestrates one run over the collaborator ports.
///
/// The alphabet and stopword set are loaded once at construction and stay
/// immutable for the pipeline's lifetime.
pub struct TextPipeline {
    alphabet: Alphabet,
    stopwords: StopwordSet,
    config: PipelineConfig,
    render: RenderConfig,
    ports: Ports,
}

impl TextPipeline {
    pub fn new(
        alphabet: Alphabet,
        stopwords: StopwordSet,
        config: PipelineConfig,
        render: RenderConfig,
        ports: Ports,
    ) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(PipelineError::Config("alphabet is empty".into()));
        }
        render.validate()?;
        Ok(Self {
            alphabet,
            stopwords,
            config,
            render,
            ports,
        })
    }

    /// Run the whole pipeline over `source` without progress reporting.
    pub fn run(&self, source: &ImageSource) -> Result<Artifacts> {
        self.run_with_progress(source, &NoProgress)
    }

    /// Run the whole pipeline over `source`, notifying `progress` after
    /// each image.
    pub fn run_with_progress(
        &self,
        source: &ImageSource,
        progress: &dyn ProgressObserver,
    ) -> Result<Artifacts> {
        let images = source.resolve()?;
        let mut stats = RunStats::default();

        let raw = self.recognize_all(&images, progress, &mut stats)?;

        info!("Reconstructing items from OCR output");
        let items = segmenter::segment(&raw, &self.alphabet, self.config.tail_policy);
        stats.items = items.len();
        let combined = items
            .iter()
            .map(|item| item.as_str())
            .collect::<Vec<_>>()
            .join("\n\n");

        info!("Removing invisible marks and emoji");
        let cleaned = NoiseStripper::new(self.ports.emoji.as_ref()).strip(&combined);

        info!("Removing stop-words");
        let normalized = self.ports.normalizer.normalize(&cleaned);
        let tokens = self.ports.tokenizer.tokenize(&normalized);
        stats.tokens_total = tokens.len();
        let kept: Vec<String> = tokens
            .into_iter()
            .filter(|token| !self.stopwords.contains(token))
            .collect();
        stats.tokens_kept = kept.len();
        let word_counts = count_words(&kept, self.config.report_words);
        let filtered = kept.join(" ");

        let shaped = self.ports.reshaper.shape_and_reorder(&filtered);

        info!("Rendering word cloud");
        let image_png = self.ports.renderer.render(&shaped, &self.render)?;

        Ok(Artifacts {
            text: cleaned,
            word_counts,
            image_png,
            stats,
        })
    }

    /// OCR every image and concatenate the blobs in image order.
    ///
    /// There is no separator between blobs, so a file boundary produces no
    /// guaranteed separator line; items may bleed across images unless the
    /// adjacent lines differ in script membership.
    fn recognize_all(
        &self,
        images: &[PathBuf],
        progress: &dyn ProgressObserver,
        stats: &mut RunStats,
    ) -> Result<String> {
        info!("Recognizing {} image(s)", images.len());
        let results = self.recognize_batch(images, progress);

        let mut text = String::new();
        for (image, result) in images.iter().zip(results) {
            match result {
                Ok(blob) => {
                    stats.images_processed += 1;
                    text.push_str(&blob);
                }
                Err(err) => match self.config.ocr_failure {
                    OcrFailurePolicy::Abort => return Err(err),
                    OcrFailurePolicy::Skip => {
                        stats.images_failed += 1;
                        warn!("skipping {}: {err}", image.display());
                    }
                },
            }
        }
        Ok(text)
    }

    #[cfg(feature = "parallel")]
    fn recognize_batch(
        &self,
        images: &[PathBuf],
        progress: &dyn ProgressObserver,
    ) -> Vec<Result<String>> {
        use rayon::prelude::*;

        if self.config.parallel_ocr {
            images
                .par_iter()
                .map(|image| {
                    let result = self.ports.ocr.recognize(image);
                    progress.image_done(image);
                    result
                })
                .collect()
        } else {
            self.recognize_sequential(images, progress)
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn recognize_batch(
        &self,
        images: &[PathBuf],
        progress: &dyn ProgressObserver,
    ) -> Vec<Result<String>> {
        self.recognize_sequential(images, progress)
    }

    fn recognize_sequential(
        &self,
        images: &[PathBuf],
        progress: &dyn ProgressObserver,
    ) -> Vec<Result<String>> {
        images
            .iter()
            .map(|image| {
                let result = self.ports.ocr.recognize(image);
                progress.image_done(image);
                result
            })
            .collect()
    }
}

/// Frequencies of `tokens`, most common first, at most `limit` entries.
/// Ties keep first-seen order.
fn count_words(tokens: &[String], limit: usize) -> Vec<WordCount> {
    let mut counts: HashMap<&str, (usize, usize)> = HashMap::new();
    for (index, token) in tokens.iter().enumerate() {
        let entry = counts.entry(token.as_str()).or_insert((index, 0));
        entry.1 += 1;
    }

    let mut ranked: Vec<(&str, usize, usize)> = counts
        .into_iter()
        .map(|(word, (first_seen, count))| (word, first_seen, count))
        .collect();
    ranked.sort_by(|a, b| b.2.cmp(&a.2).then(a.1.cmp(&b.1)));
    ranked.truncate(limit);

    ranked
        .into_iter()
        .map(|(word, _, count)| WordCount {
            word: word.to_string(),
            count,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn count_words_ranks_by_frequency() {
        let tokens = words(&["دل", "جان", "دل", "دل", "جان", "یار"]);
        let counts = count_words(&tokens, 10);
        assert_eq!(counts[0], WordCount { word: "دل".into(), count: 3 });
        assert_eq!(counts[1], WordCount { word: "جان".into(), count: 2 });
        assert_eq!(counts[2], WordCount { word: "یار".into(), count: 1 });
    }

    #[test]
    fn count_words_breaks_ties_by_first_seen() {
        let tokens = words(&["اول", "دوم", "اول", "دوم", "سوم"]);
        let counts = count_words(&tokens, 10);
        assert_eq!(counts[0].word, "اول");
        assert_eq!(counts[1].word, "دوم");
        assert_eq!(counts[2].word, "سوم");
    }

    #[test]
    fn count_words_honors_the_limit() {
        let tokens = words(&["a", "b", "c", "d"]);
        assert_eq!(count_words(&tokens, 2).len(), 2);
    }

    #[test]
    fn report_formats_token_colon_count_lines() {
        let artifacts = Artifacts {
            text: String::new(),
            word_counts: vec![
                WordCount { word: "دل".into(), count: 3 },
                WordCount { word: "یار".into(), count: 1 },
            ],
            image_png: Vec::new(),
            stats: RunStats::default(),
        };
        assert_eq!(artifacts.report(), "دل: 3\nیار: 1");
    }
}
