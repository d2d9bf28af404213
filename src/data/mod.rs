// ============================================================
// Layer 4 — Data Pipeline
// ============================================================
// Everything between the raw CSV file and the finished report
// tables that does not involve the classifier itself.
//
//   reviews.csv
//       │
//       ▼
//   CsvReviewLoader           → validates header, builds typed Reviews
//       │
//       ▼
//   (Layer 2 batch pass)      → overall sentiment + aspect mappings
//       │
//       ▼
//   UnicodeSentenceSegmenter  → used by the aspect extractor per review
//       │
//       ▼
//   timestamp                 → raw Timestamp cell → datetime
//       │
//       ▼
//   Report                    → the five aggregate tables
//
// Reference: Rust Book §8 (Collections), §13 (Iterators)

/// Loads review rows from CSV with header validation
pub mod loader;

/// Splits review text into sentences
pub mod segmenter;

/// Parses the Timestamp column into datetimes
pub mod timestamp;

/// Aggregates processed rows into report tables
pub mod report;
