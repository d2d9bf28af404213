// ============================================================
// Layer 6 — Report Exporter
// ============================================================
// Writes a finished report to disk so it can be charted in a
// spreadsheet or picked up by another tool.
//
// CSV export (one file per table, into a directory):
//   sentiment_counts.csv    label,count
//   time_series.csv         timestamp,Negative,Positive
//   source_counts.csv       source,count
//   product_sentiment.csv   product,label,count
//   product_aspects.csv     product,aspect,label,count
//
// JSON export (one file):
//   { "report": { ...all tables... }, "reviews": [ per-row labels ] }
//
// Example time_series.csv:
//   timestamp,Negative,Positive
//   2024-01-01 00:00:00,1,0
//   2024-01-02 00:00:00,0,3
//
// Reference: csv crate documentation
//            Rust Book §12 (I/O and File Handling)

use anyhow::{Context, Result};
use serde::Serialize;
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::data::report::Report;
use crate::domain::review::LabeledReview;
use crate::domain::sentiment::SentimentLabel;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// One reviewed row in the JSON export.
#[derive(Debug, Serialize)]
struct ReviewRecord<'a> {
    line:      u64,
    product:   &'a str,
    source:    &'a str,
    timestamp: &'a str,
    sentiment: SentimentLabel,
    p_negative: f64,
    p_positive: f64,
}

#[derive(Debug, Serialize)]
struct JsonExport<'a> {
    report:  &'a Report,
    reviews: Vec<ReviewRecord<'a>>,
}

/// Writes report tables as CSV files and/or a JSON document.
pub struct ReportExporter;

impl ReportExporter {
    /// Write every table as its own CSV file inside `dir`.
    /// Returns the paths written, in table order.
    pub fn write_csv(report: &Report, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)
            .with_context(|| format!("Cannot create export directory '{}'", dir.display()))?;

        let mut written = Vec::new();

        written.push(write_table(
            dir.join("sentiment_counts.csv"),
            &["label", "count"],
            report
                .sentiment_counts
                .iter()
                .map(|c| vec![c.label.to_string(), c.count.to_string()]),
        )?);

        written.push(write_table(
            dir.join("time_series.csv"),
            &["timestamp", "Negative", "Positive"],
            report.time_series.iter().map(|p| {
                vec![
                    p.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    p.negative.to_string(),
                    p.positive.to_string(),
                ]
            }),
        )?);

        written.push(write_table(
            dir.join("source_counts.csv"),
            &["source", "count"],
            report
                .source_counts
                .iter()
                .map(|s| vec![s.source.clone(), s.count.to_string()]),
        )?);

        written.push(write_table(
            dir.join("product_sentiment.csv"),
            &["product", "label", "count"],
            report.product_sentiment.iter().map(|p| {
                vec![p.product.clone(), p.label.to_string(), p.count.to_string()]
            }),
        )?);

        written.push(write_table(
            dir.join("product_aspects.csv"),
            &["product", "aspect", "label", "count"],
            report.product_aspects.iter().flat_map(|p| {
                p.aspects.iter().map(move |a| {
                    vec![
                        p.product.clone(),
                        a.aspect.clone(),
                        a.label.to_string(),
                        a.count.to_string(),
                    ]
                })
            }),
        )?);

        tracing::info!("Exported {} CSV tables to '{}'", written.len(), dir.display());
        Ok(written)
    }

    /// Write the report plus per-review labels as pretty JSON.
    pub fn write_json(
        report: &Report,
        rows:   &[LabeledReview],
        path:   impl AsRef<Path>,
    ) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).with_context(|| {
                format!("Cannot create export directory '{}'", parent.display())
            })?;
        }

        let export = JsonExport {
            report,
            reviews: rows
                .iter()
                .map(|r| ReviewRecord {
                    line:       r.review.line,
                    product:    &r.review.product,
                    source:     &r.review.source,
                    timestamp:  &r.review.timestamp,
                    sentiment:  r.sentiment.label,
                    p_negative: r.sentiment.probabilities[0],
                    p_positive: r.sentiment.probabilities[1],
                })
                .collect(),
        };

        fs::write(path, serde_json::to_string_pretty(&export)?)
            .with_context(|| format!("Cannot write JSON report to '{}'", path.display()))?;

        tracing::info!("Wrote JSON report to '{}'", path.display());
        Ok(())
    }
}

/// Write one header + rows CSV file.
fn write_table<I>(path: PathBuf, header: &[&str], rows: I) -> Result<PathBuf>
where
    I: IntoIterator<Item = Vec<String>>,
{
    let mut wtr = csv::Writer::from_path(&path)
        .with_context(|| format!("Cannot create '{}'", path.display()))?;
    wtr.write_record(header)?;
    for row in rows {
        wtr.write_record(&row)?;
    }
    wtr.flush()?;
    tracing::debug!("Wrote '{}'", path.display());
    Ok(path)
}
