//! Failure and summary formatting for the fixture harness.

use std::fmt::Write;

use layered_reports::Polarity;

use crate::failures::FailureState;
use crate::fixture::LabelFixture;
use crate::runner::{CheckOutcome, ExpectationCheck};

/// Longest excerpt of the report text shown with a failure.
const EXCERPT_CHARS: usize = 72;

/// Format a failed expectation with the report it was checked against.
pub fn format_failure(
    fixture_name: &str,
    fixture: &LabelFixture,
    check: &ExpectationCheck,
    state: FailureState,
) -> String {
    let mut output = String::new();

    let tag = match state {
        FailureState::Known => " (known)",
        FailureState::Pending => " (pending)",
        FailureState::Regression => "",
    };
    let _ = writeln!(output, "\nFAIL: {} [{}]{}", fixture_name, check.heuristic, tag);
    if let Some(title) = &fixture.title {
        let _ = writeln!(output, "  {}", title);
    }
    let _ = writeln!(output);

    if !fixture.text.trim().is_empty() {
        let _ = writeln!(output, "  text: {}", excerpt(&fixture.text));
    }
    if !fixture.sections.is_empty() {
        let names: Vec<&str> = fixture.sections.keys().map(String::as_str).collect();
        let _ = writeln!(output, "  sections: {}", names.join(", "));
    }

    match &check.outcome {
        CheckOutcome::Mismatch { actual } => {
            let _ = writeln!(output, "  expected {}, found {}", check.expected, actual);
        }
        CheckOutcome::Errored { message } => {
            let _ = writeln!(output, "  expected {}, heuristic failed: {}", check.expected, message);
        }
        CheckOutcome::UnknownHeuristic => {
            let _ = writeln!(output, "  no heuristic named `{}` is registered", check.heuristic);
        }
        CheckOutcome::Passed => {
            let _ = writeln!(output, "  (passed)");
        }
    }

    if let Some(hint) = generate_hint(check) {
        let _ = writeln!(output);
        let _ = writeln!(output, "  hint: {}", hint);
    }

    output
}

/// Format a summary of one fixture's results.
pub fn format_summary(
    fixture_name: &str,
    passed: usize,
    failed: usize,
    expected_failures: usize,
    regressions: usize,
) -> String {
    let status = if regressions > 0 { "FAIL" } else { "PASS" };
    format!(
        "\n{}: {}\n  {} passed, {} failed ({} expected, {} regressions)\n",
        status, fixture_name, passed, failed, expected_failures, regressions
    )
}

fn excerpt(text: &str) -> String {
    let flat = text.split_whitespace().collect::<Vec<_>>().join(" ");
    match flat.char_indices().nth(EXCERPT_CHARS) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}

fn generate_hint(check: &ExpectationCheck) -> Option<&'static str> {
    match (&check.outcome, check.expected) {
        (CheckOutcome::Mismatch { actual: Polarity::Abstain }, _) => {
            Some("nothing resolved; check the section names under [sections]")
        }
        (CheckOutcome::Mismatch { .. }, Polarity::Abstain) => {
            Some("the heuristic found text to label; abstain only happens when its sections are absent or empty")
        }
        _ => None,
    }
}
