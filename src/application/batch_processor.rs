// ============================================================
// Layer 2 — Batch Processor
// ============================================================
// One pass over all review rows, in file order:
//
//   1. Classify the full review text   → overall sentiment
//   2. Extract aspect sentiments       → aspect → label mapping
//   3. Record the mapping under the row's product
//
// Step 3 follows the ProductAspectTable rule: a product's first
// mapping is always kept (so every product appears), later ones
// only when they found at least one aspect.
//
// Overall sentiment and aspect extraction are independent: a
// review can be Positive overall and still carry a Negative aspect.

use serde::Serialize;

use crate::domain::aspect::ProductAspectTable;
use crate::domain::review::{LabeledReview, Review};
use crate::domain::traits::SentimentClassifier;
use crate::error::Result;
use crate::ml::aspect_extractor::AspectExtractor;

/// Everything the batch pass produces.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchOutput {
    /// Every input row with its overall sentiment, input order kept
    pub rows:            Vec<LabeledReview>,
    /// Per-product aspect mappings
    pub product_aspects: ProductAspectTable,
}

pub struct BatchProcessor<'a> {
    classifier: &'a dyn SentimentClassifier,
    extractor:  AspectExtractor<'a>,
}

impl<'a> BatchProcessor<'a> {
    pub fn new(classifier: &'a dyn SentimentClassifier, extractor: AspectExtractor<'a>) -> Self {
        Self { classifier, extractor }
    }

    /// Process every review. Any classifier error aborts the batch.
    pub fn process(&self, reviews: Vec<Review>) -> Result<BatchOutput> {
        let mut out = BatchOutput {
            rows:            Vec::with_capacity(reviews.len()),
            product_aspects: ProductAspectTable::new(),
        };

        for review in reviews {
            let sentiment = self.classifier.classify(&review.text)?;
            let aspects   = self.extractor.extract(&review.text, &review.aspect_list)?;

            tracing::debug!(
                "Line {}: {} overall, {} aspect(s)",
                review.line,
                sentiment.label,
                aspects.len()
            );

            out.product_aspects.record(&review.product, aspects);
            out.rows.push(LabeledReview { review, sentiment });
        }

        tracing::info!(
            "Processed {} reviews across {} products",
            out.rows.len(),
            out.product_aspects.len()
        );
        Ok(out)
    }
}
