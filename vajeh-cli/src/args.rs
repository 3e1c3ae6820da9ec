//! Command-line surface and run wiring.

use std::path::PathBuf;

use clap::Parser;

use vajeh_core::{
    Alphabet, ImageSource, OcrFailurePolicy, Ports, StopwordSet, TailPolicy, TextPipeline,
};

use crate::config::{CliConfig, OcrConfig};
use crate::error::{CliError, CliResult};
use crate::ocr::TesseractOcr;
use crate::progress::ProgressReporter;
use crate::render::GlyphCloudRenderer;
use crate::report;
use crate::reshape::ArabicReshapeReorder;
use crate::text::{GraphemeEmojiDetector, PersianNormalizer, UnicodeTokenizer};

/// Stopword list bundled with the binary; `--stopwords` overrides it.
const DEFAULT_STOPWORDS: &str = include_str!("../data/stopwords.txt");

/// Turn a folder of chat screenshots into a Persian word cloud.
#[derive(Debug, Parser)]
#[command(name = "vajeh", version, about)]
pub struct CloudArgs {
    /// Directory of images, or a single image file
    #[arg(value_name = "IMAGES", default_value = "data/images")]
    pub images: PathBuf,

    /// Directory the artifacts are written to
    #[arg(short, long, value_name = "DIR", default_value = "out")]
    pub output: PathBuf,

    /// Mask image bounding word placement (white = excluded)
    #[arg(short, long, value_name = "FILE")]
    pub mask: Option<PathBuf>,

    /// TTF font used for rendering
    #[arg(long, value_name = "FILE")]
    pub font: Option<PathBuf>,

    /// Stopword list, one word per line (default: bundled Persian list)
    #[arg(long, value_name = "FILE")]
    pub stopwords: Option<PathBuf>,

    /// Configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Emit the trailing item instead of dropping it at end of input
    #[arg(long)]
    pub flush_trailing: bool,

    /// Abort the whole run when one image fails recognition
    #[arg(long)]
    pub strict_ocr: bool,

    /// Recognize images in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Also write the reconstructed text as cleaned_text.txt
    #[arg(long)]
    pub dump_text: bool,

    /// Also write most_common_words.txt
    #[arg(long)]
    pub report: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl CloudArgs {
    /// Execute one run end to end.
    pub fn execute(&self) -> CliResult<()> {
        self.init_logging();

        let file_config = CliConfig::load(self.config.as_deref())?;
        let (pipeline_config, render_config, ocr_config) = self.merge(file_config);

        // Resource and engine checks run before any OCR work starts.
        if !render_config.font_path.is_file() {
            return Err(CliError::MissingResource(format!(
                "font {}",
                render_config.font_path.display()
            ))
            .into());
        }
        if let Some(mask) = &render_config.mask_path {
            if !mask.is_file() {
                return Err(
                    CliError::MissingResource(format!("mask image {}", mask.display())).into(),
                );
            }
        }

        let normalizer = PersianNormalizer;
        let stopwords = match &self.stopwords {
            Some(path) => StopwordSet::from_file(path, &normalizer)?,
            None => StopwordSet::from_lines(DEFAULT_STOPWORDS.lines(), &normalizer),
        };
        log::debug!("Loaded {} stopwords", stopwords.len());

        let source = ImageSource::from_path(&self.images)?;
        let images = source.resolve()?;

        let ocr = TesseractOcr::new(ocr_config.lang, ocr_config.psm);
        ocr.probe().map_err(CliError::OcrUnavailable)?;

        let ports = Ports {
            ocr: Box::new(ocr),
            normalizer: Box::new(normalizer),
            tokenizer: Box::new(UnicodeTokenizer),
            emoji: Box::new(GraphemeEmojiDetector),
            reshaper: Box::new(ArabicReshapeReorder::default()),
            renderer: Box::new(GlyphCloudRenderer),
        };
        let pipeline = TextPipeline::new(
            Alphabet::persian(),
            stopwords,
            pipeline_config,
            render_config,
            ports,
        )?;

        let progress = ProgressReporter::new(self.quiet, images.len() as u64);
        let artifacts = pipeline.run_with_progress(&source, &progress)?;
        progress.finish();

        report::write_artifacts(&self.output, &artifacts, self.dump_text, self.report)?;
        log::info!(
            "Done: {} image(s), {} item(s), kept {} of {} tokens",
            artifacts.stats.images_processed,
            artifacts.stats.items,
            artifacts.stats.tokens_kept,
            artifacts.stats.tokens_total,
        );
        Ok(())
    }

    /// Fold command-line flags over the config-file values; flags win.
    fn merge(
        &self,
        file: CliConfig,
    ) -> (vajeh_core::PipelineConfig, vajeh_core::RenderConfig, OcrConfig) {
        let mut pipeline = file.pipeline;
        if self.flush_trailing {
            pipeline.tail_policy = TailPolicy::Flush;
        }
        if self.strict_ocr {
            pipeline.ocr_failure = OcrFailurePolicy::Abort;
        }
        if self.parallel {
            pipeline.parallel_ocr = true;
        }

        let mut render = file.render;
        if let Some(font) = &self.font {
            render.font_path = font.clone();
        }
        if let Some(mask) = &self.mask {
            render.mask_path = Some(mask.clone());
        }

        (pipeline, render, file.ocr)
    }

    /// Initialize logging based on verbosity level.
    fn init_logging(&self) {
        let log_level = match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        };

        if !self.quiet {
            let _ = env_logger::Builder::from_env(
                env_logger::Env::default().default_filter_or(log_level),
            )
            .try_init();
        }
    }
}
