//! Progress reporting for the OCR stage.

use std::path::Path;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use vajeh_core::ports::ProgressObserver;

/// Indicatif-backed progress bar for per-image recognition.
pub struct ProgressReporter {
    bar: Option<ProgressBar>,
}

impl ProgressReporter {
    /// Create a reporter for `total_images`; `quiet` disables all output.
    pub fn new(quiet: bool, total_images: u64) -> Self {
        if quiet {
            return Self { bar: None };
        }

        let bar = ProgressBar::new(total_images);
        bar.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} images {msg}")
                .unwrap()
                .progress_chars("##-"),
        );
        bar.enable_steady_tick(Duration::from_millis(100));

        Self { bar: Some(bar) }
    }

    /// Finish progress reporting.
    pub fn finish(&self) {
        if let Some(bar) = &self.bar {
            bar.finish_with_message("Complete");
        }
    }
}

impl ProgressObserver for ProgressReporter {
    fn image_done(&self, image: &Path) {
        if let Some(bar) = &self.bar {
            let name = image
                .file_name()
                .and_then(|name| name.to_str())
                .unwrap_or("?");
            bar.set_message(format!("Processed: {name}"));
            bar.inc(1);
        }
    }
}
