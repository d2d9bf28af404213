// ============================================================
// Layer 1 — CLI Commands and Arguments
// ============================================================
// Defines the three subcommands: `report`, `classify` and
// `aspects`, and all their configurable flags.
//
// clap's derive macros automatically generate:
//   - help text (--help)
//   - error messages for missing args
//   - type conversion (string → f64, Encoding, MatchMode, ...)
//
// Reference: Rust Book §12 (Building a CLI Program)

use clap::{Args, Subcommand};

use crate::application::analyze_use_case::AnalyzeConfig;
use crate::application::report_use_case::ReportConfig;
use crate::data::loader::Encoding;
use crate::infra::model_store::DEFAULT_MODEL_PATH;
use crate::ml::aspect_extractor::{MatchMode, DEFAULT_MIN_MARGIN};

/// The top-level subcommands available to the user
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Analyse a review CSV and print the dashboard tables
    Report(ReportArgs),

    /// Classify a single piece of text
    Classify(ClassifyArgs),

    /// Extract aspect sentiments from a single piece of text
    Aspects(AspectsArgs),
}

/// All arguments for the `report` command.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Review CSV with Review, Product, Source, Timestamp and aspect_list columns
    #[arg(long)]
    pub input: String,

    /// Sentiment model JSON file
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model: String,

    /// Text encoding of the CSV file (utf8 or latin1)
    #[arg(long, default_value_t = Encoding::Utf8)]
    pub encoding: Encoding,

    /// How aspect keywords are matched (substring or word)
    #[arg(long, default_value_t = MatchMode::Substring)]
    pub match_mode: MatchMode,

    /// Smallest |P(Negative) - P(Positive)| a sentence needs
    /// to decide an aspect's label
    #[arg(long, default_value_t = DEFAULT_MIN_MARGIN, value_parser = parse_min_margin)]
    pub min_margin: f64,

    /// Also write every table as CSV into this directory
    #[arg(long)]
    pub export_dir: Option<String>,

    /// Also write the report and per-review labels to this JSON file
    #[arg(long)]
    pub json: Option<String>,

    /// Only include this product (repeat for several)
    #[arg(long = "product")]
    pub products: Vec<String>,
}

/// Convert CLI ReportArgs into the application-layer ReportConfig.
/// The application layer never sees clap types.
impl From<ReportArgs> for ReportConfig {
    fn from(a: ReportArgs) -> Self {
        ReportConfig {
            input:      a.input,
            model:      a.model,
            encoding:   a.encoding,
            match_mode: a.match_mode,
            min_margin: a.min_margin,
            export_dir: a.export_dir,
            json:       a.json,
            products:   a.products,
        }
    }
}

/// All arguments for the `classify` command
#[derive(Args, Debug)]
pub struct ClassifyArgs {
    /// Text to classify
    #[arg(long)]
    pub text: String,

    /// Sentiment model JSON file
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model: String,
}

impl From<&ClassifyArgs> for AnalyzeConfig {
    fn from(a: &ClassifyArgs) -> Self {
        AnalyzeConfig { model: a.model.clone(), ..AnalyzeConfig::default() }
    }
}

/// All arguments for the `aspects` command
#[derive(Args, Debug)]
pub struct AspectsArgs {
    /// Review text to analyse
    #[arg(long)]
    pub text: String,

    /// Comma-separated aspect keywords, used verbatim (e.g. "battery,screen")
    #[arg(long)]
    pub aspects: String,

    /// Sentiment model JSON file
    #[arg(long, default_value = DEFAULT_MODEL_PATH)]
    pub model: String,

    /// How aspect keywords are matched (substring or word)
    #[arg(long, default_value_t = MatchMode::Substring)]
    pub match_mode: MatchMode,

    /// Smallest |P(Negative) - P(Positive)| a sentence needs
    #[arg(long, default_value_t = DEFAULT_MIN_MARGIN, value_parser = parse_min_margin)]
    pub min_margin: f64,
}

impl From<&AspectsArgs> for AnalyzeConfig {
    fn from(a: &AspectsArgs) -> Self {
        AnalyzeConfig {
            model:      a.model.clone(),
            match_mode: a.match_mode,
            min_margin: a.min_margin,
        }
    }
}

/// Margins are probability differences, so only [0, 1] makes sense.
fn parse_min_margin(s: &str) -> Result<f64, String> {
    let value: f64 = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if (0.0..=1.0).contains(&value) {
        Ok(value)
    } else {
        Err(format!("{value} is outside [0, 1]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Cli;
    use clap::Parser;

    #[test]
    fn test_report_defaults() {
        let cli = Cli::try_parse_from(["review-sentiment", "report", "--input", "r.csv"]).unwrap();
        let Commands::Report(args) = cli.command else {
            panic!("expected report");
        };
        let cfg: ReportConfig = args.into();
        assert_eq!(cfg.input, "r.csv");
        assert_eq!(cfg.model, DEFAULT_MODEL_PATH);
        assert_eq!(cfg.encoding, Encoding::Utf8);
        assert_eq!(cfg.match_mode, MatchMode::Substring);
        assert_eq!(cfg.min_margin, DEFAULT_MIN_MARGIN);
        assert!(cfg.products.is_empty());
    }

    #[test]
    fn test_report_all_flags() {
        let cli = Cli::try_parse_from([
            "review-sentiment", "report",
            "--input", "r.csv",
            "--encoding", "latin1",
            "--match-mode", "word",
            "--min-margin", "0.25",
            "--product", "Phone",
            "--product", "Watch",
            "--export-dir", "out",
        ])
        .unwrap();
        let Commands::Report(args) = cli.command else {
            panic!("expected report");
        };
        let cfg: ReportConfig = args.into();
        assert_eq!(cfg.encoding, Encoding::Latin1);
        assert_eq!(cfg.match_mode, MatchMode::Word);
        assert_eq!(cfg.min_margin, 0.25);
        assert_eq!(cfg.products, vec!["Phone", "Watch"]);
        assert_eq!(cfg.export_dir.as_deref(), Some("out"));
    }

    #[test]
    fn test_min_margin_bounds() {
        assert!(parse_min_margin("0").is_ok());
        assert!(parse_min_margin("1").is_ok());
        assert!(parse_min_margin("1.01").is_err());
        assert!(parse_min_margin("-0.1").is_err());
        assert!(parse_min_margin("abc").is_err());
        assert!(Cli::try_parse_from([
            "review-sentiment", "aspects", "--text", "t", "--aspects", "a", "--min-margin", "2",
        ])
        .is_err());
    }

    #[test]
    fn test_report_requires_input() {
        assert!(Cli::try_parse_from(["review-sentiment", "report"]).is_err());
    }
}
