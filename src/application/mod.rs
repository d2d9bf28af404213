// ============================================================
// Layer 2 — Application / Use Cases
// ============================================================
// This layer orchestrates all the other layers to accomplish
// a specific goal (a full report, or analysing one text).
//
// Rules for this layer:
//   - No ML math or model code here
//   - No UI or printing here (that's Layer 1)
//   - No direct file access (that's Layer 4 and 6)
//   - Only workflow coordination
//
// Reference: Clean Architecture pattern
//            Rust Book §7 (Module System)

// The per-row classify + extract pass
pub mod batch_processor;

// The CSV → report workflow
pub mod report_use_case;

// Single-text classification and aspect analysis
pub mod analyze_use_case;
