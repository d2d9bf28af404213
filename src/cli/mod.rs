// ============================================================
// Layer 1 — CLI / Presentation Layer
// ============================================================
// This is the entry point for all user interaction.
// It uses the `clap` crate to parse command line arguments.
// All business logic is delegated to Layer 2 (application).
//
// Three commands are supported:
//   1. `report`   — analyses a review CSV and prints the tables
//   2. `classify` — overall sentiment of one text
//   3. `aspects`  — per-aspect sentiment of one text
//
// Tables go to stdout; logs go to stderr (see main.rs).
//
// Reference: Rust Book §7 (Modules), §12 (CLI programs)

pub mod commands;
pub mod render;

use anyhow::Result;
use clap::Parser;
use commands::{AspectsArgs, ClassifyArgs, Commands, ReportArgs};

use crate::domain::review::split_aspect_list;

/// The main CLI struct — clap reads the fields and generates
/// argument parsing code automatically via the Parser derive macro.
#[derive(Parser, Debug)]
#[command(
    name = "review-sentiment",
    version,
    about = "Sentiment and aspect-based sentiment dashboard for product reviews."
)]
pub struct Cli {
    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Match on the subcommand and dispatch to the correct use case.
    pub fn run(self) -> Result<()> {
        match self.command {
            Commands::Report(args)   => run_report(args),
            Commands::Classify(args) => run_classify(args),
            Commands::Aspects(args)  => run_aspects(args),
        }
    }
}

/// Handles the `report` subcommand.
fn run_report(args: ReportArgs) -> Result<()> {
    use crate::application::report_use_case::ReportUseCase;

    tracing::info!("Building report for: {}", args.input);

    let outcome = ReportUseCase::new(args.into()).execute()?;
    println!("{}", render::render_report(&outcome.report));

    for path in &outcome.exported {
        println!("Wrote {}", path.display());
    }
    Ok(())
}

/// Handles the `classify` subcommand.
fn run_classify(args: ClassifyArgs) -> Result<()> {
    use crate::application::analyze_use_case::AnalyzeUseCase;

    let use_case = AnalyzeUseCase::new((&args).into())?;
    let result   = use_case.classify(&args.text)?;
    print!("{}", render::render_classification(&result));
    Ok(())
}

/// Handles the `aspects` subcommand.
fn run_aspects(args: AspectsArgs) -> Result<()> {
    use crate::application::analyze_use_case::AnalyzeUseCase;

    let use_case = AnalyzeUseCase::new((&args).into())?;
    let aspects  = split_aspect_list(&args.aspects);
    let scores   = use_case.aspects(&args.text, &aspects)?;
    print!("{}", render::render_aspects(&scores));
    Ok(())
}
