// ============================================================
// Layer 3 — Aspect Domain Types
// ============================================================
// AspectScore        — the (label, margin) kept for one aspect
//                      while scanning a review's sentences
// AspectSentiments   — the final aspect → label mapping for one
//                      review, in first-qualification order
// ProductAspectTable — product → list of per-review mappings,
//                      products in first-seen order
//
// Order matters for the report (products are listed in the order
// they first appeared in the file), so both maps are backed by
// Vecs rather than HashMaps.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::sentiment::SentimentLabel;

/// The retained score for one aspect within one review.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AspectScore {
    pub label:             SentimentLabel,
    /// |P(Negative) - P(Positive)| of the winning sentence
    pub confidence_margin: f64,
}

/// Ordered mapping aspect → sentiment label for a single review.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AspectSentiments {
    entries: Vec<(String, SentimentLabel)>,
}

impl AspectSentiments {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite an aspect's label.
    /// Overwriting keeps the aspect's original position.
    pub fn insert(&mut self, aspect: impl Into<String>, label: SentimentLabel) {
        let aspect = aspect.into();
        match self.entries.iter_mut().find(|(a, _)| *a == aspect) {
            Some(entry) => entry.1 = label,
            None => self.entries.push((aspect, label)),
        }
    }

    pub fn get(&self, aspect: &str) -> Option<SentimentLabel> {
        self.entries
            .iter()
            .find(|(a, _)| a == aspect)
            .map(|(_, label)| *label)
    }

    pub fn contains(&self, aspect: &str) -> bool {
        self.get(aspect).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, SentimentLabel)> {
        self.entries.iter().map(|(a, l)| (a.as_str(), *l))
    }
}

impl FromIterator<(String, SentimentLabel)> for AspectSentiments {
    fn from_iter<I: IntoIterator<Item = (String, SentimentLabel)>>(iter: I) -> Self {
        let mut out = Self::new();
        for (aspect, label) in iter {
            out.insert(aspect, label);
        }
        out
    }
}

/// Per-product list of per-review aspect mappings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductAspectTable {
    products: Vec<ProductAspects>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

/// All aspect mappings recorded for one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductAspects {
    pub product: String,
    pub reviews: Vec<AspectSentiments>,
}

impl ProductAspectTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one review's aspect mapping for `product`.
    ///
    /// The first mapping for a product is always stored, even when
    /// empty, so every product shows up in the table. Later mappings
    /// are stored only when they hold at least one aspect.
    ///
    /// Returns true if the mapping was stored.
    pub fn record(&mut self, product: &str, aspects: AspectSentiments) -> bool {
        match self.index.get(product) {
            None => {
                self.index.insert(product.to_string(), self.products.len());
                self.products.push(ProductAspects {
                    product: product.to_string(),
                    reviews: vec![aspects],
                });
                true
            }
            Some(_) if aspects.is_empty() => false,
            Some(&i) => {
                self.products[i].reviews.push(aspects);
                true
            }
        }
    }

    pub fn get(&self, product: &str) -> Option<&[AspectSentiments]> {
        self.index
            .get(product)
            .map(|&i| self.products[i].reviews.as_slice())
    }

    /// Products in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &ProductAspects> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use SentimentLabel::*;

    fn mapping(pairs: &[(&str, SentimentLabel)]) -> AspectSentiments {
        pairs.iter().map(|(a, l)| (a.to_string(), *l)).collect()
    }

    #[test]
    fn test_insert_overwrites_in_place() {
        let mut m = mapping(&[("battery", Positive), ("screen", Negative)]);
        m.insert("battery", Negative);
        let order: Vec<_> = m.iter().collect();
        assert_eq!(order, vec![("battery", Negative), ("screen", Negative)]);
    }

    #[test]
    fn test_first_row_recorded_even_when_empty() {
        let mut t = ProductAspectTable::new();
        assert!(t.record("Phone", AspectSentiments::new()));
        assert_eq!(t.get("Phone").map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_later_empty_rows_are_dropped() {
        let mut t = ProductAspectTable::new();
        t.record("Phone", mapping(&[("battery", Positive)]));
        assert!(!t.record("Phone", AspectSentiments::new()));
        assert!(t.record("Phone", mapping(&[("screen", Negative)])));
        assert_eq!(t.get("Phone").map(|r| r.len()), Some(2));
    }

    #[test]
    fn test_products_keep_first_seen_order() {
        let mut t = ProductAspectTable::new();
        t.record("Zeta", AspectSentiments::new());
        t.record("Alpha", AspectSentiments::new());
        t.record("Zeta", mapping(&[("price", Positive)]));
        let names: Vec<_> = t.iter().map(|p| p.product.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha"]);
    }
}
