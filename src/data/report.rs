// ============================================================
// Layer 4 — Report Aggregation
// ============================================================
// Turns the processed rows and the product-aspect table into the
// five tables the report shows:
//
//   sentiment_counts   — how many reviews per label
//   time_series        — Negative/Positive counts per timestamp
//   source_counts      — how many reviews per source
//   product_sentiment  — count per (product, label)
//   product_aspects    — per product, count per (aspect, label)
//
// Ordering rules:
//   - "distribution" tables (sentiment, source) sort by count,
//     largest first, ties broken by label / name
//   - grouped tables (product_sentiment, aspects) sort by key
//   - time series ascends by timestamp, both labels zero-filled
//   - products in product_aspects keep first-seen order
//
// An optional product filter restricts every table to the chosen
// products. Timestamps are converted here for every row, selected
// or not; the first malformed one aborts the whole report.

use chrono::NaiveDateTime;
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

use crate::data::timestamp::review_datetime;
use crate::domain::aspect::ProductAspectTable;
use crate::domain::review::LabeledReview;
use crate::domain::sentiment::SentimentLabel;
use crate::error::Result;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LabelCount {
    pub label: SentimentLabel,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeSeriesPoint {
    pub timestamp: NaiveDateTime,
    pub negative:  usize,
    pub positive:  usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceCount {
    pub source: String,
    pub count:  usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductSentimentCount {
    pub product: String,
    pub label:   SentimentLabel,
    pub count:   usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AspectCount {
    pub aspect: String,
    pub label:  SentimentLabel,
    pub count:  usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductAspectCounts {
    pub product: String,
    pub aspects: Vec<AspectCount>,
}

/// Which products a report covers. An empty selection means all.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    selected: Vec<String>,
}

impl ProductFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn only(products: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self { selected: products.into_iter().map(Into::into).collect() }
    }

    pub fn includes(&self, product: &str) -> bool {
        self.selected.is_empty() || self.selected.iter().any(|p| p == product)
    }
}

/// Every table of a sentiment report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Report {
    pub total_reviews:     usize,
    pub sentiment_counts:  Vec<LabelCount>,
    pub time_series:       Vec<TimeSeriesPoint>,
    pub source_counts:     Vec<SourceCount>,
    pub product_sentiment: Vec<ProductSentimentCount>,
    pub product_aspects:   Vec<ProductAspectCounts>,
}

impl Report {
    /// Aggregate processed rows into report tables.
    pub fn build(
        rows:   &[LabeledReview],
        table:  &ProductAspectTable,
        filter: &ProductFilter,
    ) -> Result<Self> {
        // The whole Timestamp column is converted before filtering
        let stamped: Vec<(NaiveDateTime, &LabeledReview)> = rows
            .iter()
            .map(|r| Ok((review_datetime(&r.review)?, r)))
            .collect::<Result<Vec<_>>>()?
            .into_iter()
            .filter(|(_, r)| filter.includes(&r.review.product))
            .collect();
        let rows: Vec<&LabeledReview> = stamped.iter().map(|&(_, r)| r).collect();

        Ok(Self {
            total_reviews:     rows.len(),
            sentiment_counts:  sentiment_counts(&rows),
            time_series:       time_series(&stamped),
            source_counts:     source_counts(&rows),
            product_sentiment: product_sentiment(&rows),
            product_aspects:   product_aspects(table, filter),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.total_reviews == 0
    }
}

fn sentiment_counts(rows: &[&LabeledReview]) -> Vec<LabelCount> {
    let mut counts = [0usize; 2];
    for r in rows {
        counts[r.sentiment.label.index()] += 1;
    }

    let mut out: Vec<LabelCount> = SentimentLabel::ALL
        .iter()
        .filter(|l| counts[l.index()] > 0)
        .map(|&label| LabelCount { label, count: counts[label.index()] })
        .collect();
    // Stable sort keeps label order for equal counts
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

fn time_series(rows: &[(NaiveDateTime, &LabeledReview)]) -> Vec<TimeSeriesPoint> {
    let mut buckets: BTreeMap<NaiveDateTime, [usize; 2]> = BTreeMap::new();
    for &(ts, r) in rows {
        buckets.entry(ts).or_default()[r.sentiment.label.index()] += 1;
    }

    buckets
        .into_iter()
        .map(|(timestamp, [negative, positive])| TimeSeriesPoint {
            timestamp,
            negative,
            positive,
        })
        .collect()
}

fn source_counts(rows: &[&LabeledReview]) -> Vec<SourceCount> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for r in rows {
        *counts.entry(r.review.source.as_str()).or_insert(0) += 1;
    }

    let mut out: Vec<SourceCount> = counts
        .into_iter()
        .map(|(source, count)| SourceCount { source: source.to_string(), count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.source.cmp(&b.source)));
    out
}

fn product_sentiment(rows: &[&LabeledReview]) -> Vec<ProductSentimentCount> {
    let mut counts: BTreeMap<(&str, SentimentLabel), usize> = BTreeMap::new();
    for r in rows {
        *counts
            .entry((r.review.product.as_str(), r.sentiment.label))
            .or_insert(0) += 1;
    }

    counts
        .into_iter()
        .map(|((product, label), count)| ProductSentimentCount {
            product: product.to_string(),
            label,
            count,
        })
        .collect()
}

fn product_aspects(table: &ProductAspectTable, filter: &ProductFilter) -> Vec<ProductAspectCounts> {
    table
        .iter()
        .filter(|p| filter.includes(&p.product))
        .map(|p| {
            let mut counts: BTreeMap<(&str, SentimentLabel), usize> = BTreeMap::new();
            for (aspect, label) in p.reviews.iter().flat_map(|m| m.iter()) {
                *counts.entry((aspect, label)).or_insert(0) += 1;
            }
            ProductAspectCounts {
                product: p.product.clone(),
                aspects: counts
                    .into_iter()
                    .map(|((aspect, label), count)| AspectCount {
                        aspect: aspect.to_string(),
                        label,
                        count,
                    })
                    .collect(),
            }
        })
        .collect()
}
