//! Section-name families for EEG reports.
//!
//! Each family is versioned: when a new source institution needs another
//! synonym, add a new family rather than editing an existing one, so labels
//! computed under an older family stay reproducible.

use layered_reports::{CandidateSections, FallbackChain};

/// Sections holding the reader's interpretation of the study.
pub const EEG_INTERPRETATION_V1: &[&str] = &[
    "interpretation",
    "summary",
    "impression",
    "conclusion",
    "conclusions",
];

/// Sections holding the impression, used by the impression keyword heuristics.
pub const EEG_IMPRESSION_V1: &[&str] = &["impression", "interpretation", "comments"];

/// The canonical interpretation section name.
pub const INTERPRETATION: &str = "interpretation";

pub fn interpretation_candidates() -> CandidateSections {
    CandidateSections::new(EEG_INTERPRETATION_V1)
}

pub fn impression_candidates() -> CandidateSections {
    CandidateSections::new(EEG_IMPRESSION_V1)
}

/// Where report formats keep the interpretive summary, shallowest first.
///
/// A report with a `findings` section keeps its summary there or nowhere:
/// `narrative` is only probed when `findings` is absent.
pub fn interpretation_fallback_v1() -> FallbackChain {
    FallbackChain::new()
        .then(&[INTERPRETATION])
        .then(&["summary"])
        .then_within("findings", &["summary", "impression"])
        .then_within("narrative", &["summary", "impression"])
}
