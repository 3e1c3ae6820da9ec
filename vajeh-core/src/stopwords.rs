//! Stopword exclusion set.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use crate::error::{PipelineError, Result};
use crate::ports::Normalizer;

/// Set of normalized tokens excluded from the final text.
///
/// Construction runs every word through the same [`Normalizer`] the
/// pipeline applies to its text, so membership tests compare like with
/// like. Loaded once per run and read-only afterwards.
#[derive(Debug, Clone, Default)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    /// Empty set; nothing is filtered.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build from raw word lines (one word per line, blanks ignored).
    pub fn from_lines<'a, I>(lines: I, normalizer: &dyn Normalizer) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let words = lines
            .into_iter()
            .map(str::trim)
            .filter(|word| !word.is_empty())
            .map(|word| normalizer.normalize(word))
            .collect();
        Self { words }
    }

    /// Load from a stopword file.
    pub fn from_file(path: &Path, normalizer: &dyn Normalizer) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|err| {
            PipelineError::Config(format!(
                "cannot read stopwords {}: {err}",
                path.display()
            ))
        })?;
        Ok(Self::from_lines(content.lines(), normalizer))
    }

    /// Membership test against the normalized form.
    pub fn contains(&self, token: &str) -> bool {
        self.words.contains(token)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Lowercase;

    impl Normalizer for Lowercase {
        fn normalize(&self, text: &str) -> String {
            text.to_lowercase()
        }
    }

    #[test]
    fn words_are_normalized_on_load() {
        let set = StopwordSet::from_lines(["The", "AND"], &Lowercase);
        assert!(set.contains("the"));
        assert!(set.contains("and"));
        assert!(!set.contains("The"));
    }

    #[test]
    fn blank_lines_are_ignored() {
        let set = StopwordSet::from_lines(["", "  ", "از"], &Lowercase);
        assert_eq!(set.len(), 1);
        assert!(set.contains("از"));
    }

    #[test]
    fn missing_file_is_a_config_error() {
        let result = StopwordSet::from_file(Path::new("/nonexistent/stopwords.txt"), &Lowercase);
        assert!(matches!(result, Err(PipelineError::Config(_))));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("stopwords.txt");
        fs::write(&path, "از\nبه\nدر\n").unwrap();

        let set = StopwordSet::from_file(&path, &Lowercase).unwrap();
        assert_eq!(set.len(), 3);
        assert!(set.contains("به"));
    }
}
