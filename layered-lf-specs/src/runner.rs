//! Runs fixtures through a heuristic set and checks their expectations.

use layered_reports::{HeuristicSet, Polarity};

use crate::failures::{ExpectedFailures, FailureState, HarnessResult};
use crate::fixture::LabelFixture;
use crate::formatter::{format_failure, format_summary};

/// How one expectation fared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CheckOutcome {
    Passed,
    /// The heuristic produced a different label.
    Mismatch { actual: Polarity },
    /// The heuristic failed on this document.
    Errored { message: String },
    /// No heuristic with this name is registered.
    UnknownHeuristic,
}

impl CheckOutcome {
    pub fn passed(&self) -> bool {
        *self == CheckOutcome::Passed
    }
}

/// One `[expect]` entry and its outcome.
#[derive(Debug, Clone)]
pub struct ExpectationCheck {
    pub heuristic: String,
    pub expected: Polarity,
    pub outcome: CheckOutcome,
}

/// Every expectation of one fixture, in `[expect]` order.
#[derive(Debug, Clone)]
pub struct FixtureReport {
    pub fixture: String,
    pub checks: Vec<ExpectationCheck>,
}

impl FixtureReport {
    pub fn failures(&self) -> impl Iterator<Item = &ExpectationCheck> {
        self.checks.iter().filter(|c| !c.outcome.passed())
    }
}

/// Label a fixture's document and compare against its expectations.
pub fn run_fixture(name: &str, fixture: &LabelFixture, set: &HeuristicSet) -> FixtureReport {
    let row = set.label_document(&fixture.document(name));

    let checks = fixture
        .expect
        .iter()
        .map(|(heuristic, &expected)| {
            let outcome = match row.get(heuristic).map(|o| &o.result) {
                None => CheckOutcome::UnknownHeuristic,
                Some(Ok(actual)) if *actual == expected => CheckOutcome::Passed,
                Some(Ok(actual)) => CheckOutcome::Mismatch { actual: *actual },
                Some(Err(e)) => CheckOutcome::Errored {
                    message: e.to_string(),
                },
            };
            ExpectationCheck {
                heuristic: heuristic.clone(),
                expected,
                outcome,
            }
        })
        .collect();

    FixtureReport {
        fixture: name.to_string(),
        checks,
    }
}

/// Run every fixture, classifying failures against the expected-failures list.
///
/// Returns the tallies and the formatted report (failures and per-fixture
/// summaries).
pub fn run_harness(
    fixtures: &[(String, LabelFixture)],
    set: &HeuristicSet,
    expected: &ExpectedFailures,
) -> (HarnessResult, String) {
    let mut result = HarnessResult::new();
    let mut output = String::new();

    for (name, fixture) in fixtures {
        let report = run_fixture(name, fixture, set);
        let mut fixture_tally = HarnessResult::new();

        for check in &report.checks {
            let state = expected.is_expected(name, &check.heuristic);
            if check.outcome.passed() {
                if state != FailureState::Regression {
                    tracing::info!(
                        fixture = name.as_str(),
                        heuristic = check.heuristic.as_str(),
                        "expected failure now passes"
                    );
                }
                fixture_tally.record_pass(state);
            } else {
                fixture_tally.record_failure(state);
                output.push_str(&format_failure(name, fixture, check, state));
            }
        }

        output.push_str(&format_summary(
            name,
            fixture_tally.passed,
            fixture_tally.total - fixture_tally.passed,
            fixture_tally.expected_failures,
            fixture_tally.regressions,
        ));

        result.total += fixture_tally.total;
        result.passed += fixture_tally.passed;
        result.expected_failures += fixture_tally.expected_failures;
        result.regressions += fixture_tally.regressions;
        result.fixed += fixture_tally.fixed;
    }

    (result, output)
}
