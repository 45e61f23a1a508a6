//! Keyword heuristics over the impression section.
//!
//! Each one fires a fixed label when any of its terms appears anywhere in the
//! concatenated impression text, and abstains otherwise.

use layered_reports::{KeywordHeuristic, KeywordScope, Polarity, ReportResult, ResolveMode};

use crate::sections::impression_candidates;

/// Terms an impression uses for a study without seizures.
pub const NORMAL_IMPRESSION_TERMS: &[&str] = &[
    "no epileptiform",
    "absence of epileptiform",
    "not epileptiform",
    "normal EEG",
    "normal aEEG",
    "benign",
    "non-specific",
    "nonepileptic",
    "idiopathic",
    "no seizures",
    "EEG is normal",
    "normal study",
];

/// Terms an impression uses for seizure activity.
pub const SEIZURE_IMPRESSION_TERMS: &[&str] = &[
    "status epilepticus",
    "spasms",
    "abnormal continuous",
    "tonic",
    "subclinical",
    "spike-wave",
    "markedly abnormal",
];

pub const SPIKE_TERMS: &[&str] = &["spike"];

pub const EXTREME_TERMS: &[&str] = &["excessive", "frequent"];

fn impression_scope() -> KeywordScope {
    KeywordScope::Sections {
        candidates: impression_candidates(),
        mode: ResolveMode::ConcatAll,
    }
}

pub fn impression_negative() -> ReportResult<KeywordHeuristic> {
    KeywordHeuristic::new(
        "impression_negative",
        impression_scope(),
        NORMAL_IMPRESSION_TERMS,
        Polarity::Negative,
    )
}

pub fn impression_positive() -> ReportResult<KeywordHeuristic> {
    KeywordHeuristic::new(
        "impression_positive",
        impression_scope(),
        SEIZURE_IMPRESSION_TERMS,
        Polarity::Positive,
    )
}

pub fn spikes_in_impression() -> ReportResult<KeywordHeuristic> {
    KeywordHeuristic::new(
        "spikes_in_impression",
        impression_scope(),
        SPIKE_TERMS,
        Polarity::Positive,
    )
}

pub fn extreme_words_in_impression() -> ReportResult<KeywordHeuristic> {
    KeywordHeuristic::new(
        "extreme_words_in_impression",
        impression_scope(),
        EXTREME_TERMS,
        Polarity::Positive,
    )
}
