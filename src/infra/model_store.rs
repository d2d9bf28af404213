// ============================================================
// Layer 6 — Model Store
// ============================================================
// Loads the sentiment model artifact from disk.
//
// The artifact is a single JSON document holding:
//   1. classes     — must be ["Negative", "Positive"]
//   2. vectorizer  — vocabulary, idf weights, tokeniser options
//   3. model       — class log priors and feature log probabilities
//
// It is read once at start-up. The resulting classifier is then
// handed by reference to every component that needs it.
//
// File layout:
//   models/
//     sentiment_model.json   ← default location
//
// Reference: serde_json documentation
//            Rust Book §9 (Error Handling)

use anyhow::{Context, Result};
use std::{fs, path::PathBuf};

use crate::ml::classifier::{ModelArtifact, NaiveBayesClassifier};

pub const DEFAULT_MODEL_PATH: &str = "models/sentiment_model.json";

/// Reads model artifacts from a JSON file.
pub struct ModelStore {
    path: PathBuf,
}

impl ModelStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Deserialise the raw artifact without validating it.
    pub fn load_artifact(&self) -> Result<ModelArtifact> {
        let json = fs::read_to_string(&self.path).with_context(|| {
            format!(
                "Cannot read model from '{}'. Pass --model with the path to a model JSON file.",
                self.path.display()
            )
        })?;

        ModelArtifact::from_json(&json)
            .with_context(|| format!("Malformed model file '{}'", self.path.display()))
    }

    /// Load, validate, and build the classifier.
    pub fn load(&self) -> Result<NaiveBayesClassifier> {
        let artifact   = self.load_artifact()?;
        let classifier = NaiveBayesClassifier::from_artifact(artifact)
            .with_context(|| format!("Model file '{}' is inconsistent", self.path.display()))?;

        tracing::info!(
            "Loaded sentiment model from '{}' ({} features)",
            self.path.display(),
            classifier.n_features()
        );
        Ok(classifier)
    }
}
