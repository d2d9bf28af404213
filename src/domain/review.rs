// ============================================================
// Layer 3 — Review Domain Type
// ============================================================
// Represents a single row of the uploaded review spreadsheet.
// By the time a Review exists the CSV header has been validated,
// so every field is guaranteed to be present (possibly empty).
//
// The timestamp is kept as the raw cell text. It is only turned
// into a datetime when the time-series table needs it, which is
// where a malformed value is reported.

use serde::{Deserialize, Serialize};

use crate::domain::sentiment::SentimentResult;

/// One review row, immutable once loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    /// 1-based line in the source file, kept for error messages
    pub line: u64,

    /// The free-text review body
    pub text: String,

    /// Product the review is about
    pub product: String,

    /// Where the review came from (store, forum, survey, ...)
    pub source: String,

    /// Raw timestamp text as it appeared in the file
    pub timestamp: String,

    /// Aspect keywords, in the order they were listed
    pub aspect_list: Vec<String>,
}

impl Review {
    /// Create a Review. `aspect_list` is the raw comma-separated cell.
    ///
    /// Example:
    ///   let r = Review::new(2, "Great battery.", "Phone X", "store",
    ///                       "2024-01-05", "battery,screen");
    pub fn new(
        line:        u64,
        text:        impl Into<String>,
        product:     impl Into<String>,
        source:      impl Into<String>,
        timestamp:   impl Into<String>,
        aspect_list: &str,
    ) -> Self {
        Self {
            line,
            text:        text.into(),
            product:     product.into(),
            source:      source.into(),
            timestamp:   timestamp.into(),
            aspect_list: split_aspect_list(aspect_list),
        }
    }
}

/// Split an `aspect_list` cell on commas.
/// Keywords are kept verbatim; no trimming or case folding, so
/// "battery, screen" yields "battery" and " screen".
pub fn split_aspect_list(cell: &str) -> Vec<String> {
    cell.split(',').map(str::to_string).collect()
}

/// A review together with its overall sentiment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabeledReview {
    pub review:    Review,
    pub sentiment: SentimentResult,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_keeps_keywords_verbatim() {
        assert_eq!(
            split_aspect_list("battery, screen,Price"),
            vec!["battery", " screen", "Price"]
        );
    }

    #[test]
    fn test_split_empty_cell_gives_one_empty_keyword() {
        assert_eq!(split_aspect_list(""), vec![""]);
    }

    #[test]
    fn test_new_splits_aspects() {
        let r = Review::new(3, "text", "P", "web", "2024-01-01", "a,b");
        assert_eq!(r.aspect_list, vec!["a", "b"]);
        assert_eq!(r.line, 3);
    }
}
