//! Unicode text adapters: normalization, tokenization, emoji replacement.

use unicode_normalization::UnicodeNormalization;
use unicode_segmentation::UnicodeSegmentation;

use vajeh_core::ports::{EmojiDetector, Normalizer, Tokenizer};

/// Persian-aware normalizer.
///
/// NFKC first, then character folding: Arabic letters OCR mixes in are
/// mapped to their Persian forms, tatweel and harakat are dropped, and
/// Arabic-Indic digits fold to the Extended Arabic-Indic (Persian) forms.
#[derive(Debug, Default, Clone, Copy)]
pub struct PersianNormalizer;

impl Normalizer for PersianNormalizer {
    fn normalize(&self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for c in text.nfkc() {
            match c {
                'ي' => out.push('ی'),
                'ك' => out.push('ک'),
                'ة' => out.push('ه'),
                // Tatweel carries no lexical content.
                '\u{0640}' => {}
                // Harakat and the superscript alef.
                '\u{064B}'..='\u{065F}' | '\u{0670}' => {}
                '٠'..='٩' => {
                    let offset = c as u32 - '٠' as u32;
                    match char::from_u32('۰' as u32 + offset) {
                        Some(digit) => out.push(digit),
                        None => out.push(c),
                    }
                }
                _ => out.push(c),
            }
        }
        out
    }
}

/// UAX#29 word tokenizer.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnicodeTokenizer;

impl Tokenizer for UnicodeTokenizer {
    fn tokenize(&self, text: &str) -> Vec<String> {
        text.unicode_words().map(str::to_string).collect()
    }
}

/// Replaces emoji grapheme clusters using the `emojis` registry.
///
/// Walking grapheme clusters keeps multi-codepoint emoji (ZWJ sequences,
/// skin tones) together so one span becomes exactly one replacement.
#[derive(Debug, Default, Clone, Copy)]
pub struct GraphemeEmojiDetector;

impl EmojiDetector for GraphemeEmojiDetector {
    fn replace(&self, text: &str, replacement: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for grapheme in text.graphemes(true) {
            if emojis::get(grapheme).is_some() {
                out.push_str(replacement);
            } else {
                out.push_str(grapheme);
            }
        }
        out
    }
}
