// ============================================================
// Layer 3 — Core Traits (Abstractions)
// ============================================================
// The three seams of the system. Everything above this layer
// talks to these traits, never to a concrete implementation:
//
//   SentimentClassifier — text → label + class probabilities
//   SentenceSegmenter   — text block → ordered sentences
//   ReviewSource        — somewhere reviews can be loaded from
//
// Classifier and segmenter are built once at start-up and passed
// down explicitly as `&dyn` references. Nothing holds them in
// global state.

use crate::domain::review::Review;
use crate::domain::sentiment::SentimentResult;
use crate::error::Result;

// ─── SentimentClassifier ──────────────────────────────────────────────────────
/// Anything that can assign a two-class sentiment to a piece of text.
///
/// Implementations must be deterministic for a fixed model and free
/// of side effects: the aspect extractor relies on calling it many
/// times per review.
///
/// Implementations:
///   - NaiveBayesClassifier → TF-IDF + multinomial naive Bayes artifact
pub trait SentimentClassifier {
    /// Classify `text`. Probabilities are aligned to [Negative, Positive].
    fn classify(&self, text: &str) -> Result<SentimentResult>;
}

// ─── SentenceSegmenter ────────────────────────────────────────────────────────
/// Splits a block of text into sentences, preserving their order.
///
/// Implementations:
///   - UnicodeSentenceSegmenter → UAX #29 sentence boundaries
pub trait SentenceSegmenter {
    fn split<'t>(&self, text: &'t str) -> Vec<&'t str>;
}

// ─── ReviewSource ─────────────────────────────────────────────────────────────
/// Any component that can produce the full list of review rows.
///
/// Implementations:
///   - CsvReviewLoader → a CSV file with a validated header
pub trait ReviewSource {
    /// Load every review. Fails before yielding anything if the
    /// input does not have the required columns.
    fn load_all(&self) -> Result<Vec<Review>>;
}
