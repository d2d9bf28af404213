// ============================================================
// Layer 5 — ML / Model Layer
// ============================================================
// All classifier math lives here and nowhere else.
//
//   vectorizer.rs       — TF-IDF feature extraction with a fixed
//                         vocabulary and IDF weights
//
//   naive_bayes.rs      — Multinomial naive Bayes scoring,
//                         log-sum-exp to class probabilities
//
//   classifier.rs       — ModelArtifact (the JSON model file) and
//                         NaiveBayesClassifier, which implements
//                         the SentimentClassifier trait
//
//   aspect_extractor.rs — Per-aspect sentiment: strip the keyword,
//                         re-classify, keep the clearest sentence
//
// Other layers only see the SentimentClassifier trait and the
// AspectExtractor, so swapping the model for a different one is
// a matter of implementing one trait.
//
// Reference: Rust Book §10 (Traits), §17 (Trait Objects)

/// TF-IDF feature extraction
pub mod vectorizer;

/// Two-class multinomial naive Bayes
pub mod naive_bayes;

/// Model artifact + SentimentClassifier implementation
pub mod classifier;

/// Aspect-based sentiment extraction
pub mod aspect_extractor;

#[cfg(test)]
pub mod fixtures;
