//! `lf-label`: run the EEG labeling heuristics over a report corpus.
//!
//! ```text
//! lf-label label corpus.jsonl --format table
//! lf-label list
//! lf-label check layered-lf-specs/fixtures
//! ```
//!
//! Logging goes to stderr and honors `RUST_LOG`.

mod config;
mod output;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use layered_eeg::{eeg_heuristics, EegPatterns};
use layered_lf_specs::{load_all_fixtures, run_harness, ExpectedFailures, EXPECTED_FAILURES_FILE};
use layered_reports::{load_corpus, HeuristicSet};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{InputFormat, LabelerConfig, OutputFormat};

#[derive(Parser)]
#[command(name = "lf-label")]
#[command(about = "Weak-supervision labels for clinical reports")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Label every document in a corpus file
    Label {
        /// Corpus file (.json, .jsonl or .ron)
        input: PathBuf,
        /// Labeler config (TOML)
        #[arg(long)]
        config: Option<PathBuf>,
        /// Output format, overrides the config
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// Corpus format, overrides the config and the file extension
        #[arg(long, value_enum)]
        input_format: Option<InputFormat>,
        /// Only run these heuristics (comma-separated), overrides the config
        #[arg(long, value_delimiter = ',')]
        heuristics: Vec<String>,
    },
    /// List the registered heuristics, in output column order
    List,
    /// Run a fixture directory and report regressions
    Check {
        /// Directory of *.toml fixtures
        fixtures: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("layered=info".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let patterns = EegPatterns::shared();

    match cli.command {
        Commands::Label {
            input,
            config,
            format,
            input_format,
            heuristics,
        } => {
            let mut config = LabelerConfig::load(config.as_deref())?;
            if let Some(format) = format {
                config.output = format;
            }
            if input_format.is_some() {
                config.input = input_format;
            }
            if !heuristics.is_empty() {
                config.heuristics = heuristics;
            }
            label(&input, &config, eeg_heuristics(patterns)?)?;
        }
        Commands::List => {
            for name in eeg_heuristics(patterns)?.names() {
                println!("{}", name);
            }
        }
        Commands::Check { fixtures } => {
            let code = check(&fixtures, &eeg_heuristics(patterns)?)?;
            if code != 0 {
                std::process::exit(code);
            }
        }
    }

    Ok(())
}

fn label(input: &Path, config: &LabelerConfig, mut set: HeuristicSet) -> anyhow::Result<()> {
    let registered = set.names();
    let unknown: Vec<&str> = config
        .heuristics
        .iter()
        .map(String::as_str)
        .filter(|name| !registered.contains(name))
        .collect();
    if !unknown.is_empty() {
        bail!("unknown heuristics: {}", unknown.join(", "));
    }
    set.retain_named(&config.heuristics);

    let format = config.document_format(input);
    let documents = load_corpus(input, format)
        .with_context(|| format!("failed to load corpus {}", input.display()))?;
    tracing::info!(
        documents = documents.len(),
        format = ?format,
        "loaded corpus"
    );

    let rows = set.label_corpus(&documents);
    print!("{}", output::render(&rows, &set.names(), config.output)?);
    Ok(())
}

fn check(dir: &Path, set: &HeuristicSet) -> anyhow::Result<i32> {
    let fixtures = load_all_fixtures(dir)?;
    let expected = ExpectedFailures::load(&dir.join(EXPECTED_FAILURES_FILE))?;
    let (result, report) = run_harness(&fixtures, set, &expected);

    print!("{}", report);
    println!(
        "\n{} fixtures: {} passed, {} expected failures, {} regressions",
        fixtures.len(),
        result.passed,
        result.expected_failures,
        result.regressions
    );
    if result.fixed > 0 {
        println!(
            "{} expected failures now pass; remove them from {}",
            result.fixed, EXPECTED_FAILURES_FILE
        );
    }
    Ok(result.exit_code())
}
