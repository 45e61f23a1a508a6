#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Fixture-driven regression tests for labeling heuristics.
//!
//! Each fixture is a small TOML report (text plus section tree) together with
//! the label every listed heuristic is expected to produce. The harness runs
//! the fixtures through a [`HeuristicSet`](layered_reports::HeuristicSet) and
//! separates regressions from failures already recorded in
//! `expected-failures.toml`.
//!
//! ## Modules
//!
//! - [`fixture`] - fixture format and parsing
//! - [`loader`] - loading fixture directories
//! - [`runner`] - checking fixtures against a heuristic set
//! - [`formatter`] - failure and summary output
//! - [`failures`] - expected failures tracking via TOML
//! - [`errors`] - error types

pub mod errors;
pub mod failures;
pub mod fixture;
pub mod formatter;
pub mod loader;
pub mod runner;

pub use errors::{SpecError, SpecResult};
pub use failures::{ExpectedFailures, FailureEntry, FailureState, HarnessResult};
pub use fixture::{parse_fixture, LabelFixture};
pub use formatter::{format_failure, format_summary};
pub use loader::{load_all_fixtures, load_fixture, EXPECTED_FAILURES_FILE};
pub use runner::{run_fixture, run_harness, CheckOutcome, ExpectationCheck, FixtureReport};

#[cfg(test)]
mod tests;
