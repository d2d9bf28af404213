// ============================================================
// Layer 2 — Analyze Use Case
// ============================================================
// Ad-hoc analysis of a single piece of text, without a CSV:
//   classify  — overall label and both class probabilities
//   aspects   — per-aspect label and confidence margin, using the
//               same extractor the report pipeline uses
//
// Handy for checking how the model reacts to a sentence before
// running it over a whole review export.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::data::segmenter::UnicodeSentenceSegmenter;
use crate::domain::aspect::AspectScore;
use crate::domain::sentiment::SentimentResult;
use crate::domain::traits::SentimentClassifier;
use crate::infra::model_store::{ModelStore, DEFAULT_MODEL_PATH};
use crate::ml::aspect_extractor::{AspectExtractor, MatchMode, DEFAULT_MIN_MARGIN};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzeConfig {
    pub model:      String,
    pub match_mode: MatchMode,
    pub min_margin: f64,
}

impl Default for AnalyzeConfig {
    fn default() -> Self {
        Self {
            model:      DEFAULT_MODEL_PATH.to_string(),
            match_mode: MatchMode::default(),
            min_margin: DEFAULT_MIN_MARGIN,
        }
    }
}

pub struct AnalyzeUseCase {
    classifier: Box<dyn SentimentClassifier>,
    segmenter:  UnicodeSentenceSegmenter,
    config:     AnalyzeConfig,
}

impl AnalyzeUseCase {
    /// Load the model named in the config.
    pub fn new(config: AnalyzeConfig) -> Result<Self> {
        let classifier = ModelStore::new(&config.model).load()?;
        Self::with_classifier(Box::new(classifier), config)
    }

    /// Use an already-built classifier.
    pub fn with_classifier(
        classifier: Box<dyn SentimentClassifier>,
        config:     AnalyzeConfig,
    ) -> Result<Self> {
        ensure!(
            (0.0..=1.0).contains(&config.min_margin),
            "min_margin must be between 0 and 1, got {}",
            config.min_margin
        );
        Ok(Self { classifier, segmenter: UnicodeSentenceSegmenter::new(), config })
    }

    pub fn classify(&self, text: &str) -> Result<SentimentResult> {
        Ok(self.classifier.classify(text)?)
    }

    /// Aspects that found a qualifying sentence, in keyword order.
    pub fn aspects(&self, text: &str, aspects: &[String]) -> Result<Vec<(String, AspectScore)>> {
        let extractor = AspectExtractor::new(self.classifier.as_ref(), &self.segmenter)
            .with_min_margin(self.config.min_margin)
            .with_match_mode(self.config.match_mode);
        Ok(extractor.extract_scores(text, aspects)?)
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::SentimentLabel;
    use crate::ml::fixtures::ScriptedClassifier;

    fn use_case(config: AnalyzeConfig) -> AnalyzeUseCase {
        let clf = ScriptedClassifier::new(&[("great", 0.1), ("terrible", 0.95)]);
        AnalyzeUseCase::with_classifier(Box::new(clf), config).unwrap()
    }

    #[test]
    fn test_classify_passes_through() {
        let uc = use_case(AnalyzeConfig::default());
        let r  = uc.classify("a great day").unwrap();
        assert_eq!(r.label, SentimentLabel::Positive);
        assert!((r.probabilities[0] - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_aspects_report_margins() {
        let uc = use_case(AnalyzeConfig::default());
        let scores = uc
            .aspects(
                "The battery is great. The screen is terrible.",
                &["battery".to_string(), "screen".to_string(), "price".to_string()],
            )
            .unwrap();

        assert_eq!(scores.len(), 2);
        assert_eq!(scores[0].0, "battery");
        assert_eq!(scores[0].1.label, SentimentLabel::Positive);
        assert!((scores[0].1.confidence_margin - 0.8).abs() < 1e-9);
        assert_eq!(scores[1].0, "screen");
        assert_eq!(scores[1].1.label, SentimentLabel::Negative);
    }

    #[test]
    fn test_higher_threshold_drops_weak_aspects() {
        let uc = use_case(AnalyzeConfig { min_margin: 0.85, ..AnalyzeConfig::default() });
        let scores = uc
            .aspects(
                "The battery is great. The screen is terrible.",
                &["battery".to_string(), "screen".to_string()],
            )
            .unwrap();
        assert_eq!(scores.len(), 1);
        assert_eq!(scores[0].0, "screen");
    }

    #[test]
    fn test_negative_margin_rejected() {
        let clf = ScriptedClassifier::new(&[]);
        let cfg = AnalyzeConfig { min_margin: -0.1, ..AnalyzeConfig::default() };
        assert!(AnalyzeUseCase::with_classifier(Box::new(clf), cfg).is_err());
    }
}
