// ============================================================
// Layer 5 — Naive Bayes Sentiment Classifier
// ============================================================
// Glues the TF-IDF vectorizer and the naive Bayes model into one
// SentimentClassifier. Built once from a ModelArtifact (the JSON
// model file) and shared by reference everywhere it is needed.
//
// The artifact names its classes explicitly. They must be exactly
// ["Negative", "Positive"] in that order, since every probability
// vector in the crate is aligned to that order.

use serde::{Deserialize, Serialize};

use crate::domain::sentiment::{SentimentLabel, SentimentResult};
use crate::domain::traits::SentimentClassifier;
use crate::error::{Result, ReviewError};
use crate::ml::naive_bayes::{MultinomialNb, NaiveBayesSpec};
use crate::ml::vectorizer::{TfidfVectorizer, VectorizerSpec};

/// On-disk form of a trained sentiment model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub classes:    Vec<String>,
    pub vectorizer: VectorizerSpec,
    pub model:      NaiveBayesSpec,
}

impl ModelArtifact {
    /// Parse an artifact from its JSON text. Shapes are checked later,
    /// by `NaiveBayesClassifier::from_artifact`.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub struct NaiveBayesClassifier {
    vectorizer: TfidfVectorizer,
    model:      MultinomialNb,
}

impl NaiveBayesClassifier {
    /// Validate an artifact and build the classifier from it.
    pub fn from_artifact(artifact: ModelArtifact) -> Result<Self> {
        let expected: Vec<&str> = SentimentLabel::ALL.iter().map(|l| l.as_str()).collect();
        if artifact.classes != expected {
            return Err(ReviewError::Model(format!(
                "classes must be {:?}, found {:?}",
                expected, artifact.classes
            )));
        }

        let vectorizer = TfidfVectorizer::from_spec(artifact.vectorizer)?;
        let model      = MultinomialNb::from_spec(artifact.model, vectorizer.n_features())?;

        tracing::debug!("Classifier ready ({} features)", vectorizer.n_features());
        Ok(Self { vectorizer, model })
    }

    pub fn n_features(&self) -> usize {
        self.vectorizer.n_features()
    }
}

impl SentimentClassifier for NaiveBayesClassifier {
    fn classify(&self, text: &str) -> Result<SentimentResult> {
        let features = self.vectorizer.transform(text);
        Ok(SentimentResult::from_probabilities(
            self.model.predict_proba(&features),
        ))
    }
}
