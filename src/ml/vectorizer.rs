// ============================================================
// Layer 5 — TF-IDF Vectorizer
// ============================================================
// Converts a piece of text into a sparse TF-IDF feature vector
// using a fixed vocabulary and IDF weights from the model file.
//
// Steps for one text:
//   1. Lowercase (if the model was fitted that way)
//   2. Tokenise: runs of two or more word characters (\b\w\w+\b)
//   3. Count occurrences of in-vocabulary terms
//   4. tf × idf per term (tf = 1 + ln(count) with sublinear_tf)
//   5. L2-normalise the vector (unless norm = "none")
//
// Output is sorted by feature index so downstream sums always
// happen in the same order and results are bit-for-bit repeatable.
//
// Reference: Salton & Buckley (1988), term weighting
//            regex crate documentation

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

use crate::error::{Result, ReviewError};

const TOKEN_PATTERN: &str = r"\b\w\w+\b";

/// Post-weighting normalisation of the feature vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    #[default]
    L2,
    None,
}

fn default_true() -> bool {
    true
}

/// Vectorizer parameters as stored in the model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorizerSpec {
    /// term → feature index
    pub vocabulary: HashMap<String, usize>,

    /// Inverse document frequency per feature index
    pub idf: Vec<f64>,

    #[serde(default = "default_true")]
    pub lowercase: bool,

    #[serde(default)]
    pub sublinear_tf: bool,

    #[serde(default)]
    pub norm: Norm,
}

/// A ready-to-use vectorizer with a compiled token pattern.
#[derive(Debug, Clone)]
pub struct TfidfVectorizer {
    spec:  VectorizerSpec,
    token: Regex,
}

impl TfidfVectorizer {
    /// Validate a spec and compile the tokeniser.
    pub fn from_spec(spec: VectorizerSpec) -> Result<Self> {
        let n_features = spec.idf.len();
        if spec.vocabulary.len() != n_features {
            return Err(ReviewError::Model(format!(
                "vocabulary has {} terms but idf has {} weights",
                spec.vocabulary.len(),
                n_features
            )));
        }
        if let Some((term, &idx)) = spec.vocabulary.iter().find(|(_, &i)| i >= n_features) {
            return Err(ReviewError::Model(format!(
                "term '{term}' maps to feature {idx}, outside 0..{n_features}"
            )));
        }

        Ok(Self { spec, token: Regex::new(TOKEN_PATTERN)? })
    }

    /// Number of features (vocabulary size)
    pub fn n_features(&self) -> usize {
        self.spec.idf.len()
    }

    /// Split text into the tokens the vocabulary is keyed on.
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.spec.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        self.token
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Sparse TF-IDF vector as (feature index, weight), sorted by index.
    /// Out-of-vocabulary text yields an empty vector.
    pub fn transform(&self, text: &str) -> Vec<(usize, f64)> {
        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for token in self.tokenize(text) {
            if let Some(&idx) = self.spec.vocabulary.get(&token) {
                *counts.entry(idx).or_insert(0.0) += 1.0;
            }
        }

        let mut features: Vec<(usize, f64)> = counts
            .into_iter()
            .map(|(idx, tf)| {
                let tf = if self.spec.sublinear_tf { 1.0 + tf.ln() } else { tf };
                (idx, tf * self.spec.idf[idx])
            })
            .collect();

        if self.spec.norm == Norm::L2 {
            let norm = features.iter().map(|(_, w)| w * w).sum::<f64>().sqrt();
            if norm > 0.0 {
                for (_, w) in &mut features {
                    *w /= norm;
                }
            }
        }

        features
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn spec(terms: &[&str], idf: &[f64]) -> VectorizerSpec {
        VectorizerSpec {
            vocabulary:   terms.iter().enumerate().map(|(i, t)| (t.to_string(), i)).collect(),
            idf:          idf.to_vec(),
            lowercase:    true,
            sublinear_tf: false,
            norm:         Norm::L2,
        }
    }

    #[test]
    fn test_tokenizer_drops_single_characters() {
        let v = TfidfVectorizer::from_spec(spec(&["great"], &[1.0])).unwrap();
        assert_eq!(v.tokenize("A great, GREAT phone!"), vec!["great", "great", "phone"]);
    }

    #[test]
    fn test_transform_is_l2_normalised() {
        let v = TfidfVectorizer::from_spec(spec(&["good", "bad"], &[1.0, 2.0])).unwrap();
        let x = v.transform("good bad");
        let norm: f64 = x.iter().map(|(_, w)| w * w).sum();
        assert!((norm - 1.0).abs() < 1e-12);
        // idf 2.0 on "bad" makes it twice the weight of "good"
        assert!((x[1].1 / x[0].1 - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_sublinear_tf() {
        let mut s = spec(&["good"], &[1.0]);
        s.sublinear_tf = true;
        s.norm = Norm::None;
        let v = TfidfVectorizer::from_spec(s).unwrap();
        let x = v.transform("good good good");
        assert!((x[0].1 - (1.0 + 3f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_unknown_words_give_empty_vector() {
        let v = TfidfVectorizer::from_spec(spec(&["good"], &[1.0])).unwrap();
        assert!(v.transform("nothing relevant here").is_empty());
        assert!(v.transform("").is_empty());
    }

    #[test]
    fn test_rejects_mismatched_idf() {
        assert!(TfidfVectorizer::from_spec(spec(&["a1", "b2"], &[1.0])).is_err());
    }

    #[test]
    fn test_rejects_out_of_range_index() {
        let mut s = spec(&["good"], &[1.0]);
        s.vocabulary.insert("good".into(), 5);
        assert!(TfidfVectorizer::from_spec(s).is_err());
    }
}
