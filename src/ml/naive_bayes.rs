// ============================================================
// Layer 5 — Multinomial Naive Bayes
// ============================================================
// Scores a TF-IDF feature vector against two classes.
//
// For each class c:
//   jll[c] = log P(c) + Σ_j x_j · log P(feature_j | c)
//
// The joint log-likelihoods are turned into probabilities with
// the log-sum-exp trick (subtract the max before exponentiating)
// so very negative scores never underflow to 0/0.
//
// Reference: Manning, Raghavan & Schütze (2008) §13.2

use serde::{Deserialize, Serialize};

use crate::error::{Result, ReviewError};

/// Model parameters as stored in the model file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NaiveBayesSpec {
    /// log prior per class, [Negative, Positive]
    pub class_log_prior: Vec<f64>,

    /// log P(feature | class), one row per class
    pub feature_log_prob: Vec<Vec<f64>>,
}

#[derive(Debug, Clone)]
pub struct MultinomialNb {
    class_log_prior:  [f64; 2],
    feature_log_prob: [Vec<f64>; 2],
}

impl MultinomialNb {
    /// Validate a spec against the expected number of features.
    pub fn from_spec(spec: NaiveBayesSpec, n_features: usize) -> Result<Self> {
        let prior: [f64; 2] = spec.class_log_prior.as_slice().try_into().map_err(|_| {
            ReviewError::Model(format!(
                "expected 2 class log priors, found {}",
                spec.class_log_prior.len()
            ))
        })?;

        let rows = spec.feature_log_prob.len();
        let [neg, pos]: [Vec<f64>; 2] = spec.feature_log_prob.try_into().map_err(|_| {
            ReviewError::Model(format!("expected 2 feature_log_prob rows, found {rows}"))
        })?;
        for (name, row) in [("Negative", &neg), ("Positive", &pos)] {
            if row.len() != n_features {
                return Err(ReviewError::Model(format!(
                    "{name} feature_log_prob has {} entries, vocabulary has {n_features}",
                    row.len()
                )));
            }
        }

        Ok(Self { class_log_prior: prior, feature_log_prob: [neg, pos] })
    }

    /// Joint log-likelihood per class for a sparse feature vector.
    pub fn joint_log_likelihood(&self, features: &[(usize, f64)]) -> [f64; 2] {
        let mut jll = self.class_log_prior;
        for (c, row) in self.feature_log_prob.iter().enumerate() {
            jll[c] += features.iter().map(|&(j, x)| x * row[j]).sum::<f64>();
        }
        jll
    }

    /// Class probabilities [P(Negative), P(Positive)].
    pub fn predict_proba(&self, features: &[(usize, f64)]) -> [f64; 2] {
        let jll = self.joint_log_likelihood(features);
        let max = jll[0].max(jll[1]);
        let exp = [(jll[0] - max).exp(), (jll[1] - max).exp()];
        let sum = exp[0] + exp[1];
        [exp[0] / sum, exp[1] / sum]
    }
}
