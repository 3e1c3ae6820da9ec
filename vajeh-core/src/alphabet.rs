//! Target-script membership.
//!
//! A line "belongs" to the wanted language when at least one of its
//! characters is in the configured [`Alphabet`]. The set is precomputed
//! once per run, so the per-line check is O(length) with constant-time
//! character lookup.

use std::collections::HashSet;

/// Persian letters, plus the hamza carriers OCR output mixes in.
const PERSIAN_LETTERS: &str = "آابپتثجچحخدذرزژسشصضطظعغفقکگلمنوهیءأؤئ";

/// Immutable set of characters defining target-script membership.
#[derive(Debug, Clone)]
pub struct Alphabet {
    chars: HashSet<char>,
}

impl Alphabet {
    /// Build an alphabet from arbitrary characters.
    ///
    /// Whitespace is excluded at construction, so whitespace-only lines
    /// never count as matching.
    pub fn new<I>(chars: I) -> Self
    where
        I: IntoIterator<Item = char>,
    {
        Self {
            chars: chars.into_iter().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    /// The Persian alphabet used by the stock pipeline.
    pub fn persian() -> Self {
        Self::new(PERSIAN_LETTERS.chars())
    }

    /// Membership test for a single character.
    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    /// True when the alphabet holds no characters at all.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// True iff `line` contains at least one alphabet character.
    ///
    /// An empty line trivially returns false.
    pub fn matches_line(&self, line: &str) -> bool {
        line.chars().any(|c| self.chars.contains(&c))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_line_does_not_match() {
        assert!(!Alphabet::persian().matches_line(""));
    }

    #[test]
    fn whitespace_only_line_does_not_match() {
        assert!(!Alphabet::persian().matches_line(" \t  "));
    }

    #[test]
    fn whitespace_is_excluded_from_the_set() {
        let alphabet = Alphabet::new(" \tآب".chars());
        assert!(!alphabet.contains(' '));
        assert!(!alphabet.contains('\t'));
        assert!(alphabet.contains('آ'));
    }

    #[test]
    fn latin_line_does_not_match_persian() {
        assert!(!Alphabet::persian().matches_line("hello world 123"));
    }

    #[test]
    fn single_persian_char_is_enough() {
        assert!(Alphabet::persian().matches_line("abc م xyz"));
    }

    #[test]
    fn pure_persian_line_matches() {
        assert!(Alphabet::persian().matches_line("سلام چطوری"));
    }

    #[test]
    fn custom_alphabet() {
        let greek = Alphabet::new("αβγδ".chars());
        assert!(greek.matches_line("αλφα"));
        assert!(!greek.matches_line("سلام"));
    }
}
