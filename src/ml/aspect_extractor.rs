// ============================================================
// Layer 5 — Aspect Extractor
// ============================================================
// Finds the sentiment a review expresses about each aspect keyword.
//
// For every keyword (in the order given) and every sentence (in
// order):
//   1. Skip the sentence unless it mentions the keyword
//   2. Remove every occurrence of the keyword from the sentence
//   3. Classify what is left
//   4. margin = |P(Negative) - P(Positive)|
//   5. Keep the result if margin >= min_margin (0.10 by default)
//      and it beats the margin stored for the keyword so far
//
// Step 5 uses a strict ">" so the earliest sentence wins a tie.
// Keywords that never produce a qualifying sentence are left out
// of the result entirely.
//
// Example (aspects = ["battery", "screen"]):
//   "The battery is great. The screen is terrible."
//     battery → classify("The  is great.")    → Positive, margin 0.9
//     screen  → classify("The  is terrible.") → Negative, margin 0.9
//   result: {battery: Positive, screen: Negative}
//
// Matching is a plain case-sensitive substring test by default,
// so "price" also matches inside "priceless". MatchMode::Word
// restricts matches to whole words.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::domain::aspect::{AspectScore, AspectSentiments};
use crate::domain::traits::{SentenceSegmenter, SentimentClassifier};
use crate::error::Result;

/// Smallest confidence margin a sentence needs to count
pub const DEFAULT_MIN_MARGIN: f64 = 0.10;

/// How an aspect keyword is located inside a sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
    /// Literal substring, anywhere
    #[default]
    Substring,
    /// Only where the keyword is not glued to other word characters
    Word,
}

impl FromStr for MatchMode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "substring" => Ok(MatchMode::Substring),
            "word" => Ok(MatchMode::Word),
            other => Err(format!("unknown match mode '{other}' (expected substring or word)")),
        }
    }
}

impl fmt::Display for MatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchMode::Substring => f.write_str("substring"),
            MatchMode::Word => f.write_str("word"),
        }
    }
}

// ─── KeywordMatcher ───────────────────────────────────────────────────────────
/// Finds and removes one keyword.
enum KeywordMatcher<'k> {
    Substring(&'k str),
    Word(Regex),
}

impl<'k> KeywordMatcher<'k> {
    fn new(keyword: &'k str, mode: MatchMode) -> Result<Self> {
        Ok(match mode {
            MatchMode::Substring => KeywordMatcher::Substring(keyword),
            MatchMode::Word => {
                let is_word = |c: Option<char>| c.is_some_and(|c| c.is_alphanumeric() || c == '_');
                let lead  = if is_word(keyword.chars().next()) { r"\b" } else { "" };
                let trail = if is_word(keyword.chars().last()) { r"\b" } else { "" };
                KeywordMatcher::Word(Regex::new(&format!(
                    "{lead}{}{trail}",
                    regex::escape(keyword)
                ))?)
            }
        })
    }

    /// The sentence with the keyword removed, or None if it is absent.
    fn strip(&self, sentence: &str) -> Option<String> {
        match self {
            KeywordMatcher::Substring(k) => {
                let k = *k;
                sentence.contains(k).then(|| sentence.replace(k, ""))
            }
            KeywordMatcher::Word(re) => {
                re.is_match(sentence).then(|| re.replace_all(sentence, "").into_owned())
            }
        }
    }
}

// ─── AspectExtractor ──────────────────────────────────────────────────────────
pub struct AspectExtractor<'a> {
    classifier: &'a dyn SentimentClassifier,
    segmenter:  &'a dyn SentenceSegmenter,
    min_margin: f64,
    match_mode: MatchMode,
}

impl<'a> AspectExtractor<'a> {
    pub fn new(
        classifier: &'a dyn SentimentClassifier,
        segmenter:  &'a dyn SentenceSegmenter,
    ) -> Self {
        Self {
            classifier,
            segmenter,
            min_margin: DEFAULT_MIN_MARGIN,
            match_mode: MatchMode::default(),
        }
    }

    pub fn with_min_margin(mut self, min_margin: f64) -> Self {
        self.min_margin = min_margin;
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    /// Aspect → label for every aspect with a qualifying sentence.
    pub fn extract<S: AsRef<str>>(&self, text: &str, aspects: &[S]) -> Result<AspectSentiments> {
        Ok(self
            .extract_scores(text, aspects)?
            .into_iter()
            .map(|(aspect, score)| (aspect, score.label))
            .collect())
    }

    /// Like `extract`, but keeps the winning margin for each aspect.
    pub fn extract_scores<S: AsRef<str>>(
        &self,
        text:    &str,
        aspects: &[S],
    ) -> Result<Vec<(String, AspectScore)>> {
        let sentences = self.segmenter.split(text);
        let mut scores: Vec<(String, AspectScore)> = Vec::new();

        // An empty keyword matches every sentence and strips nothing, so it
        // takes the label of the clearest sentence in the review
        for aspect in aspects.iter().map(AsRef::as_ref) {
            let matcher = KeywordMatcher::new(aspect, self.match_mode)?;

            for sentence in &sentences {
                let Some(stripped) = matcher.strip(sentence) else {
                    continue;
                };

                let result = self.classifier.classify(&stripped)?;
                let margin = result.margin();
                if margin < self.min_margin {
                    continue;
                }

                let candidate = AspectScore { label: result.label, confidence_margin: margin };
                match scores.iter_mut().find(|(a, _)| a == aspect) {
                    Some((_, best)) => {
                        if margin > best.confidence_margin {
                            *best = candidate;
                        }
                    }
                    None => scores.push((aspect.to_string(), candidate)),
                }
            }
        }

        Ok(scores)
    }
}
