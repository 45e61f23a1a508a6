use crate::{
    load_all_fixtures, load_fixture, run_fixture, run_harness, CheckOutcome, ExpectedFailures,
    LabelFixture, EXPECTED_FAILURES_FILE,
};
use layered_eeg::{eeg_heuristics, EegPatterns};
use layered_reports::{HeuristicSet, Polarity};
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures")
}

fn fixture(name: &str) -> LabelFixture {
    load_fixture(&fixtures_dir().join(name)).unwrap()
}

fn heuristics() -> HeuristicSet {
    eeg_heuristics(EegPatterns::shared()).unwrap()
}

#[test]
fn test_normal_for_age_fixture() {
    let fixture = fixture("normal-for-age.toml");
    assert_eq!(fixture.title.as_deref(), Some("Normal study for age"));
    assert_eq!(
        fixture.expected("normal_interp_not_seizure"),
        Some(Polarity::Negative)
    );

    let report = run_fixture("normal-for-age.toml", &fixture, &heuristics());
    assert_eq!(report.failures().count(), 0, "{:?}", report);
}

#[test]
fn test_every_fixture_names_registered_heuristics() {
    let set = heuristics();
    let names = set.names();
    for (name, fixture) in load_all_fixtures(&fixtures_dir()).unwrap() {
        for heuristic in fixture.expect.keys() {
            assert!(
                names.contains(&heuristic.as_str()),
                "{} expects unknown heuristic {}",
                name,
                heuristic
            );
        }
    }
}

#[test]
fn test_exception_clause_is_a_known_failure() {
    let fixture = fixture("exception-clause.toml");
    let report = run_fixture("exception-clause.toml", &fixture, &heuristics());

    let failures: Vec<_> = report.failures().collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].heuristic, "findall_interp_negex_seizure");
    assert_eq!(
        failures[0].outcome,
        CheckOutcome::Mismatch {
            actual: Polarity::Negative
        }
    );
}

#[test]
fn test_fixture_suite_has_no_regressions() {
    let dir = fixtures_dir();
    let fixtures = load_all_fixtures(&dir).unwrap();
    let expected = ExpectedFailures::load(&dir.join(EXPECTED_FAILURES_FILE)).unwrap();

    let (result, output) = run_harness(&fixtures, &heuristics(), &expected);
    assert!(result.success(), "{}", output);
    assert_eq!(result.expected_failures, expected.count());
    assert_eq!(result.fixed, 0);
    assert!(result.passed > 40);
}
