// ============================================================
// Layer 6 — Infrastructure Layer
// ============================================================
// File I/O that does not belong to any one business layer:
//
//   model_store.rs — Model artifact loading
//                    Reads the JSON model file, validates it and
//                    builds the NaiveBayesClassifier used by every
//                    other layer.
//
//   exporter.rs    — Report export
//                    Writes the report tables as CSV files (one
//                    per table) and/or a single JSON document with
//                    the per-review labels attached.
//
// Keeping these here means the use cases never touch paths or
// file formats directly, and swapping the storage (a different
// model format, a database sink) stays a change in one place.
//
// Reference: Rust Book §7 (Modules)
//            Rust Book §9 (Error Handling with anyhow)

/// Sentiment model loading
pub mod model_store;

/// CSV / JSON report export
pub mod exporter;
