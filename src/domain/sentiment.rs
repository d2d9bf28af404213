// ============================================================
// Layer 3 — Sentiment Domain Types
// ============================================================
// The classifier speaks in exactly two classes, always in the
// same order: index 0 = Negative, index 1 = Positive.
// Probability vectors everywhere in the crate follow that order.
//
// The confidence margin |P(Negative) - P(Positive)| is how the
// aspect extractor decides whether a prediction is clear enough
// to keep. With two classes summing to 1.0 it always lies in [0, 1].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A discrete sentiment label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SentimentLabel {
    Negative,
    Positive,
}

impl SentimentLabel {
    /// Every label in class-index order
    pub const ALL: [SentimentLabel; 2] = [SentimentLabel::Negative, SentimentLabel::Positive];

    /// Map a class index to its label. Anything other than 0 or 1 is None.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            SentimentLabel::Negative => 0,
            SentimentLabel::Positive => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SentimentLabel::Negative => "Negative",
            SentimentLabel::Positive => "Positive",
        }
    }
}

impl fmt::Display for SentimentLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The output of one classifier call.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    /// The predicted label
    pub label: SentimentLabel,

    /// Class probabilities aligned to [Negative, Positive]
    pub probabilities: [f64; 2],
}

impl SentimentResult {
    pub fn new(label: SentimentLabel, probabilities: [f64; 2]) -> Self {
        Self { label, probabilities }
    }

    /// Build a result from probabilities alone, picking the arg-max.
    /// An exact tie resolves to Negative (the lower class index).
    pub fn from_probabilities(probabilities: [f64; 2]) -> Self {
        let label = if probabilities[1] > probabilities[0] {
            SentimentLabel::Positive
        } else {
            SentimentLabel::Negative
        };
        Self { label, probabilities }
    }

    /// Absolute difference between the two class probabilities
    pub fn margin(&self) -> f64 {
        (self.probabilities[0] - self.probabilities[1]).abs()
    }

    pub fn probability_of(&self, label: SentimentLabel) -> f64 {
        self.probabilities[label.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_index_round_trip() {
        for label in SentimentLabel::ALL {
            assert_eq!(SentimentLabel::from_index(label.index()), Some(label));
        }
        assert_eq!(SentimentLabel::from_index(2), None);
    }

    #[test]
    fn test_margin_is_absolute_difference() {
        let r = SentimentResult::from_probabilities([0.2, 0.8]);
        assert!((r.margin() - 0.6).abs() < 1e-12);
        assert_eq!(r.label, SentimentLabel::Positive);
    }

    #[test]
    fn test_tie_resolves_to_negative() {
        let r = SentimentResult::from_probabilities([0.5, 0.5]);
        assert_eq!(r.label, SentimentLabel::Negative);
        assert_eq!(r.margin(), 0.0);
    }

    #[test]
    fn test_display_matches_class_names() {
        assert_eq!(SentimentLabel::Negative.to_string(), "Negative");
        assert_eq!(SentimentLabel::Positive.to_string(), "Positive");
    }
}
