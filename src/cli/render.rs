// ============================================================
// Layer 1 — Terminal Rendering
// ============================================================
// Turns report tables into aligned plain-text tables for stdout.
// An empty table prints a single "(no data)" line under its title
// so the reader can tell "nothing to show" from "not computed".
//
// Example:
//   Sentiment distribution
//   label     count
//   --------  -----
//   Positive  12
//   Negative  5

use std::fmt::Write;

use crate::data::report::Report;
use crate::domain::aspect::AspectScore;
use crate::domain::sentiment::{SentimentLabel, SentimentResult};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format one table: title, header, separator, rows.
fn table(title: &str, header: &[&str], rows: &[Vec<String>]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{title}");
    if rows.is_empty() {
        let _ = writeln!(out, "  (no data)");
        return out;
    }

    let widths: Vec<usize> = header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .map(|r| r.get(i).map_or(0, |c| c.chars().count()))
                .max()
                .unwrap_or(0)
                .max(h.chars().count())
        })
        .collect();

    let _ = writeln!(out, "{}", format_line(header.iter().copied(), &widths));
    let sep: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    let _ = writeln!(out, "{}", format_line(sep.iter().map(String::as_str), &widths));
    for row in rows {
        let _ = writeln!(out, "{}", format_line(row.iter().map(String::as_str), &widths));
    }
    out
}

fn format_line<'s>(cells: impl Iterator<Item = &'s str>, widths: &[usize]) -> String {
    cells
        .zip(widths)
        .map(|(c, &w)| format!("{c:<w$}"))
        .collect::<Vec<_>>()
        .join("  ")
        .trim_end()
        .to_string()
}

/// Every report table, separated by blank lines.
pub fn render_report(report: &Report) -> String {
    let mut sections = Vec::new();

    sections.push(format!("Reviews analysed: {}\n", report.total_reviews));

    sections.push(table(
        "Sentiment distribution",
        &["label", "count"],
        &report
            .sentiment_counts
            .iter()
            .map(|c| vec![c.label.to_string(), c.count.to_string()])
            .collect::<Vec<_>>(),
    ));

    sections.push(table(
        "Sentiment over time",
        &["timestamp", "Negative", "Positive"],
        &report
            .time_series
            .iter()
            .map(|p| {
                vec![
                    p.timestamp.format(TIMESTAMP_FORMAT).to_string(),
                    p.negative.to_string(),
                    p.positive.to_string(),
                ]
            })
            .collect::<Vec<_>>(),
    ));

    sections.push(table(
        "Reviews by source",
        &["source", "count"],
        &report
            .source_counts
            .iter()
            .map(|s| vec![s.source.clone(), s.count.to_string()])
            .collect::<Vec<_>>(),
    ));

    sections.push(table(
        "Sentiment by product",
        &["product", "label", "count"],
        &report
            .product_sentiment
            .iter()
            .map(|p| vec![p.product.clone(), p.label.to_string(), p.count.to_string()])
            .collect::<Vec<_>>(),
    ));

    sections.push(table(
        "Aspect sentiment by product",
        &["product", "aspect", "label", "count"],
        &report
            .product_aspects
            .iter()
            .flat_map(|p| {
                p.aspects.iter().map(move |a| {
                    vec![
                        p.product.clone(),
                        a.aspect.clone(),
                        a.label.to_string(),
                        a.count.to_string(),
                    ]
                })
            })
            .collect::<Vec<_>>(),
    ));

    sections.join("\n")
}

/// Label plus both class probabilities.
pub fn render_classification(result: &SentimentResult) -> String {
    table(
        &format!("Sentiment: {}", result.label),
        &["label", "probability"],
        &SentimentLabel::ALL
            .iter()
            .map(|&l| vec![l.to_string(), format!("{:.4}", result.probability_of(l))])
            .collect::<Vec<_>>(),
    )
}

/// One row per aspect that found a qualifying sentence.
pub fn render_aspects(scores: &[(String, AspectScore)]) -> String {
    table(
        "Aspect sentiment",
        &["aspect", "label", "margin"],
        &scores
            .iter()
            .map(|(a, s)| vec![a.clone(), s.label.to_string(), format!("{:.4}", s.confidence_margin)])
            .collect::<Vec<_>>(),
    )
}
