// ============================================================
// Error Types
// ============================================================
// One error enum for everything below the CLI layer.
// The CLI and application layers wrap these in anyhow so they
// can attach file paths and other context as they bubble up.
//
// Taxonomy:
//   Schema — required CSV column(s) absent, raised before any row is read
//   Parse  — a cell could not be converted (e.g. a malformed timestamp)
//   Model  — the classifier artifact is missing pieces or inconsistent
//   Csv / Io / Json / Regex — pass-through from dependencies

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReviewError {
    #[error("Missing required column(s): {}", .missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("Line {line}: cannot parse {column} value '{value}': {reason}")]
    Parse {
        line:   u64,
        column: String,
        value:  String,
        reason: String,
    },

    #[error("Invalid classifier model: {0}")]
    Model(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Regex(#[from] regex::Error),
}

pub type Result<T> = std::result::Result<T, ReviewError>;
