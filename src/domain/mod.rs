// ============================================================
// Layer 3 — Domain Layer
// ============================================================
// Plain Rust structs, enums, and traits describing what the
// system talks about: reviews, sentiment labels, aspect scores,
// and the per-product aspect table.
//
// Rules for this layer:
//   - NO file I/O
//   - NO classifier math
//   - Only data types and the traits other layers implement
//
// Reference: Rust Book §5 (Structs), §10 (Traits)

// Review rows and their overall sentiment
pub mod review;

// Sentiment labels and classifier output
pub mod sentiment;

// Aspect scores, per-review mappings, and the product table
pub mod aspect;

// Core abstractions (traits) that other layers implement
pub mod traits;
