// ============================================================
// Layer 4 — Sentence Segmenter
// ============================================================
// Splits a review into sentences using the Unicode sentence
// boundary rules (UAX #29) from the unicode-segmentation crate.
//
// Example:
//   "The battery is great. The screen is terrible."
//   → ["The battery is great.", "The screen is terrible."]
//
// Each sentence is trimmed; whitespace-only pieces are dropped.
// The returned slices borrow from the input, so no text is copied.
//
// Reference: Unicode Standard Annex #29 (Text Segmentation)
//            Rust Book §8 (Strings), §13 (Iterators)

use unicode_segmentation::UnicodeSegmentation;

use crate::domain::traits::SentenceSegmenter;

#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSegmenter;

impl UnicodeSentenceSegmenter {
    pub fn new() -> Self {
        Self
    }
}

impl SentenceSegmenter for UnicodeSentenceSegmenter {
    fn split<'t>(&self, text: &'t str) -> Vec<&'t str> {
        text.unicode_sentences()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect()
    }
}
