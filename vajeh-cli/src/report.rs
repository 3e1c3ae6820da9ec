//! Artifact writers.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use vajeh_core::Artifacts;

/// File name of the rendered image.
pub const CLOUD_FILE: &str = "word_cloud.png";

/// File name of the optional reconstructed-text dump.
pub const TEXT_FILE: &str = "cleaned_text.txt";

/// File name of the optional most-common-words report.
pub const REPORT_FILE: &str = "most_common_words.txt";

/// Write the run's artifacts into `output_dir`, creating it if needed.
pub fn write_artifacts(
    output_dir: &Path,
    artifacts: &Artifacts,
    dump_text: bool,
    report: bool,
) -> Result<()> {
    fs::create_dir_all(output_dir).with_context(|| {
        format!(
            "Failed to create output directory: {}",
            output_dir.display()
        )
    })?;

    let cloud = output_dir.join(CLOUD_FILE);
    fs::write(&cloud, &artifacts.image_png)
        .with_context(|| format!("Failed to write {}", cloud.display()))?;
    log::info!("Saved word cloud to {}", cloud.display());

    if dump_text {
        let path = output_dir.join(TEXT_FILE);
        fs::write(&path, &artifacts.text)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved reconstructed text to {}", path.display());
    }

    if report {
        let path = output_dir.join(REPORT_FILE);
        fs::write(&path, artifacts.report())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        log::info!("Saved most-common-words report to {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use vajeh_core::{RunStats, WordCount};

    fn artifacts() -> Artifacts {
        Artifacts {
            text: "سلام دنیا".to_string(),
            word_counts: vec![
                WordCount {
                    word: "سلام".to_string(),
                    count: 2,
                },
                WordCount {
                    word: "دنیا".to_string(),
                    count: 1,
                },
            ],
            image_png: vec![0x89, b'P', b'N', b'G'],
            stats: RunStats::default(),
        }
    }

    #[test]
    fn writes_the_cloud_and_nothing_else_by_default() {
        let dir = TempDir::new().unwrap();
        write_artifacts(dir.path(), &artifacts(), false, false).unwrap();

        assert!(dir.path().join(CLOUD_FILE).is_file());
        assert!(!dir.path().join(TEXT_FILE).exists());
        assert!(!dir.path().join(REPORT_FILE).exists());
    }

    #[test]
    fn optional_artifacts_are_written_on_request() {
        let dir = TempDir::new().unwrap();
        write_artifacts(dir.path(), &artifacts(), true, true).unwrap();

        let text = fs::read_to_string(dir.path().join(TEXT_FILE)).unwrap();
        assert_eq!(text, "سلام دنیا");

        let report = fs::read_to_string(dir.path().join(REPORT_FILE)).unwrap();
        assert_eq!(report, "سلام: 2\nدنیا: 1");
    }

    #[test]
    fn creates_nested_output_directories() {
        let dir = TempDir::new().unwrap();
        let nested = dir.path().join("a").join("b");
        write_artifacts(&nested, &artifacts(), false, false).unwrap();
        assert!(nested.join(CLOUD_FILE).is_file());
    }
}
