//! Contextual shaping and visual reordering.
//!
//! The glyph renderer lays text out strictly left to right, so
//! logically-ordered Persian text must first be shaped into contextual
//! letter forms and then reordered into visual order per UAX#9.

use ar_reshaper::ArabicReshaper;
use unicode_bidi::BidiInfo;

use vajeh_core::ports::Reshaper;

/// Arabic-script shaping followed by per-line bidi reordering.
pub struct ArabicReshapeReorder {
    reshaper: ArabicReshaper,
}

impl Default for ArabicReshapeReorder {
    fn default() -> Self {
        Self {
            reshaper: ArabicReshaper::default(),
        }
    }
}

impl Reshaper for ArabicReshapeReorder {
    fn shape_and_reorder(&self, text: &str) -> String {
        let shaped = self.reshaper.reshape(text);
        reorder_per_line(&shaped)
    }
}

/// Reorder bidirectional text per line (split on `\n`), keeping the
/// newline structure stable.
pub fn reorder_per_line(text: &str) -> String {
    text.split('\n')
        .map(reorder_line)
        .collect::<Vec<_>>()
        .join("\n")
}

fn reorder_line(line: &str) -> String {
    if line.is_empty() {
        return String::new();
    }
    let info = BidiInfo::new(line, None);
    let mut out = String::with_capacity(line.len());
    for para in &info.paragraphs {
        out.push_str(&info.reorder_line(para, para.range.clone()));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_stays_empty() {
        assert_eq!(reorder_per_line(""), "");
    }

    #[test]
    fn ltr_text_is_unchanged() {
        assert_eq!(reorder_per_line("abc 123"), "abc 123");
    }

    #[test]
    fn rtl_line_is_reversed_into_visual_order() {
        // Logical "اب" renders visually as "با" for an LTR renderer.
        assert_eq!(reorder_per_line("اب"), "با");
    }

    #[test]
    fn newline_structure_is_preserved() {
        let out = reorder_per_line("ab\ncd");
        assert_eq!(out, "ab\ncd");
    }

    #[test]
    fn ascii_passes_through_shaping_untouched() {
        let reshaper = ArabicReshapeReorder::default();
        assert_eq!(reshaper.shape_and_reorder("hello world"), "hello world");
    }
}
