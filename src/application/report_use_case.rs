// ============================================================
// Layer 2 — ReportUseCase
// ============================================================
// Orchestrates the full report pipeline in order:
//
//   Step 1: Load the sentiment model      (Layer 6 - infra)
//   Step 2: Load + validate review rows   (Layer 4 - data)
//   Step 3: Classify + extract aspects    (Layer 2 - batch processor)
//   Step 4: Aggregate the report tables   (Layer 4 - data)
//   Step 5: Export CSV / JSON if asked    (Layer 6 - infra)
//
// Printing the tables is left to Layer 1.
//
// Reference: Rust Book §13 (Iterators and Closures)

use anyhow::{ensure, Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::application::batch_processor::{BatchOutput, BatchProcessor};
use crate::data::{
    loader::{load_reviews, Encoding},
    report::{ProductFilter, Report},
    segmenter::UnicodeSentenceSegmenter,
};
use crate::infra::{
    exporter::ReportExporter,
    model_store::{ModelStore, DEFAULT_MODEL_PATH},
};
use crate::ml::aspect_extractor::{AspectExtractor, MatchMode, DEFAULT_MIN_MARGIN};

// ─── Report Configuration ────────────────────────────────────────────────────
// Everything one report run needs.
// Serialisable so a run can be described in a JSON file and replayed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub input:      String,
    pub model:      String,
    pub encoding:   Encoding,
    pub match_mode: MatchMode,
    pub min_margin: f64,
    pub export_dir: Option<String>,
    pub json:       Option<String>,
    /// Restrict every table to these products (empty = all)
    pub products:   Vec<String>,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input:      "reviews.csv".to_string(),
            model:      DEFAULT_MODEL_PATH.to_string(),
            encoding:   Encoding::default(),
            match_mode: MatchMode::default(),
            min_margin: DEFAULT_MIN_MARGIN,
            export_dir: None,
            json:       None,
            products:   Vec::new(),
        }
    }
}

/// What a report run produced.
#[derive(Debug)]
pub struct ReportOutcome {
    pub report:   Report,
    pub batch:    BatchOutput,
    /// Every file written by the export step
    pub exported: Vec<PathBuf>,
}

// ─── ReportUseCase ───────────────────────────────────────────────────────────
pub struct ReportUseCase {
    config: ReportConfig,
}

impl ReportUseCase {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self) -> Result<ReportOutcome> {
        let cfg = &self.config;
        ensure!(
            (0.0..=1.0).contains(&cfg.min_margin),
            "min_margin must be between 0 and 1, got {}",
            cfg.min_margin
        );

        // ── Step 1: Model ────────────────────────────────────────────────────
        let classifier = ModelStore::new(&cfg.model).load()?;

        // ── Step 2: Reviews ──────────────────────────────────────────────────
        let reviews = load_reviews(&cfg.input, cfg.encoding)?;
        if reviews.is_empty() {
            tracing::warn!("'{}' contains no review rows", cfg.input);
        }

        // ── Step 3: Batch pass ───────────────────────────────────────────────
        let segmenter = UnicodeSentenceSegmenter::new();
        let extractor = AspectExtractor::new(&classifier, &segmenter)
            .with_min_margin(cfg.min_margin)
            .with_match_mode(cfg.match_mode);
        let batch = BatchProcessor::new(&classifier, extractor)
            .process(reviews)
            .context("Sentiment analysis failed")?;

        // ── Step 4: Aggregate ────────────────────────────────────────────────
        let filter = ProductFilter::only(cfg.products.iter().cloned());
        for product in &cfg.products {
            if batch.product_aspects.get(product).is_none() {
                tracing::warn!("Product '{}' does not occur in the input", product);
            }
        }
        let report = Report::build(&batch.rows, &batch.product_aspects, &filter)
            .context("Cannot build report")?;

        // ── Step 5: Export ───────────────────────────────────────────────────
        let mut exported = Vec::new();
        if let Some(dir) = &cfg.export_dir {
            exported.extend(ReportExporter::write_csv(&report, dir)?);
        }
        if let Some(path) = &cfg.json {
            let rows: Vec<_> = batch
                .rows
                .iter()
                .filter(|r| filter.includes(&r.review.product))
                .cloned()
                .collect();
            ReportExporter::write_json(&report, &rows, path)?;
            exported.push(PathBuf::from(path));
        }

        Ok(ReportOutcome { report, batch, exported })
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sentiment::SentimentLabel;
    use std::fs;

    const MODEL_JSON: &str = r#"{
        "classes": ["Negative", "Positive"],
        "vectorizer": {
            "vocabulary": {"great": 0, "terrible": 1},
            "idf": [1.0, 1.0]
        },
        "model": {
            "class_log_prior": [-0.6931, -0.6931],
            "feature_log_prob": [[-5.0, -0.1], [-0.1, -5.0]]
        }
    }"#;

    const REVIEWS_CSV: &str = "\
Review,Product,Source,Timestamp,aspect_list,Topic
The battery is great. The screen is terrible.,Phone,web,2024-01-01,\"battery,screen\",x
Terrible battery.,Phone,store,2024-01-02,battery,y
Great fit.,Shirt,web,2024-01-01,fit,z
";

    fn setup(csv: &str) -> (tempfile::TempDir, ReportConfig) {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("model.json"), MODEL_JSON).unwrap();
        fs::write(dir.path().join("reviews.csv"), csv).unwrap();
        let config = ReportConfig {
            input: dir.path().join("reviews.csv").display().to_string(),
            model: dir.path().join("model.json").display().to_string(),
            ..ReportConfig::default()
        };
        (dir, config)
    }

    #[test]
    fn test_full_pipeline() {
        let (_dir, config) = setup(REVIEWS_CSV);
        let outcome = ReportUseCase::new(config).execute().unwrap();

        assert_eq!(outcome.report.total_reviews, 3);
        assert_eq!(outcome.batch.rows.len(), 3);

        let phone = outcome.batch.product_aspects.get("Phone").unwrap();
        assert_eq!(phone[0].get("battery"), Some(SentimentLabel::Positive));
        assert_eq!(phone[0].get("screen"), Some(SentimentLabel::Negative));
        assert_eq!(phone[1].get("battery"), Some(SentimentLabel::Negative));

        assert_eq!(outcome.report.time_series.len(), 2);
        assert!(outcome.exported.is_empty());
    }

    #[test]
    fn test_product_filter_and_exports() {
        let (dir, mut config) = setup(REVIEWS_CSV);
        config.products   = vec!["Shirt".to_string()];
        config.export_dir = Some(dir.path().join("out").display().to_string());
        config.json       = Some(dir.path().join("report.json").display().to_string());

        let outcome = ReportUseCase::new(config).execute().unwrap();
        assert_eq!(outcome.report.total_reviews, 1);
        assert_eq!(outcome.exported.len(), 6);
        assert!(outcome.exported.iter().all(|p| p.exists()));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("report.json")).unwrap())
                .unwrap();
        assert_eq!(json["reviews"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_missing_columns_abort() {
        let (_dir, config) = setup("Review,Product\nGreat.,Phone\n");
        let err = ReportUseCase::new(config).execute().err().unwrap();
        let msg = format!("{err:#}");
        assert!(msg.contains("Source"));
        assert!(msg.contains("aspect_list"));
    }

    #[test]
    fn test_bad_timestamp_aborts_report() {
        let (_dir, config) = setup(
            "Review,Product,Source,Timestamp,aspect_list\nGreat.,Phone,web,yesterday,battery\n",
        );
        let err = ReportUseCase::new(config).execute().err().unwrap();
        assert!(format!("{err:#}").contains("yesterday"));
    }

    #[test]
    fn test_empty_input_gives_empty_report() {
        let (_dir, config) = setup("Review,Product,Source,Timestamp,aspect_list\n");
        let outcome = ReportUseCase::new(config).execute().unwrap();
        assert!(outcome.report.is_empty());
        assert!(outcome.report.time_series.is_empty());
    }

    #[test]
    fn test_out_of_range_margin_rejected() {
        let (_dir, mut config) = setup(REVIEWS_CSV);
        config.min_margin = 1.5;
        assert!(ReportUseCase::new(config).execute().is_err());
    }

    #[test]
    fn test_config_deserialises_with_defaults() {
        let cfg: ReportConfig =
            serde_json::from_str(r#"{"input": "r.csv", "match_mode": "word"}"#).unwrap();
        assert_eq!(cfg.input, "r.csv");
        assert_eq!(cfg.match_mode, MatchMode::Word);
        assert_eq!(cfg.min_margin, DEFAULT_MIN_MARGIN);
        assert_eq!(cfg.model, DEFAULT_MODEL_PATH);
    }
}
