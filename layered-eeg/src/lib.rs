#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! EEG seizure labeling plugin for layered-reports.
//!
//! ## Components
//!
//! - [`EegPatterns`] - the precompiled pattern library (seizure synonyms,
//!   negation cues, normal-study phrases, no-seizure idioms)
//! - [`NegationScanner`] - sentence-scoped negation with the un-negated
//!   mention override
//! - [`SectionClassifier`] - section selection + decision pairs
//! - [`SeizureSectionHeuristic`], [`EquivocationHeuristic`] and the
//!   [`impression`] keyword heuristics
//!
//! [`eeg_heuristics`] registers all of them, in a stable order.
//!
//! ## Example
//!
//! ```
//! use layered_eeg::{eeg_heuristics, EegPatterns};
//! use layered_reports::{Document, SectionTree};
//!
//! let set = eeg_heuristics(EegPatterns::shared()).unwrap();
//! let doc = Document::new("").with_section(
//!     "interpretation",
//!     SectionTree::map([("text", SectionTree::text("Abnormal EEG with a seizure."))]),
//! );
//! let row = set.label_document(&doc);
//! assert_eq!(
//!     row.get("abnormal_interp_negex_seizure").and_then(|o| o.polarity()),
//!     Some(layered_reports::Polarity::Positive),
//! );
//! ```

mod classifiers;
pub mod impression;
mod negation;
mod patterns;
pub mod sections;

use std::sync::Arc;

use layered_reports::{HeuristicSet, ReportResult};

pub use classifiers::{
    Decision, EquivocationHeuristic, SectionClassifier, SectionSelection, SeizureSectionHeuristic,
};
pub use negation::{NegationScan, NegationScanner, NegationState, ScanGate, SentenceScan};
pub use patterns::{
    EegPatterns, EQUIVOCATION_TERMS, NEGATION_CUES, NO_SEIZURE_IDIOMS, SEIZURE_SYNONYMS,
    STUDY_NOUNS,
};

/// Every EEG heuristic, in registration order.
pub fn eeg_heuristics(patterns: Arc<EegPatterns>) -> ReportResult<HeuristicSet> {
    let mut set = HeuristicSet::new();
    set.push(SectionClassifier::normal_interp_not_seizure(patterns.clone()));
    set.push(SectionClassifier::abnormal_interp_with_seizure(patterns.clone()));
    set.push(SectionClassifier::findall_interp_with_seizure(patterns.clone()));
    set.push(SectionClassifier::findall_abnormal_interp_without_seizure(
        patterns.clone(),
    ));
    set.push(SectionClassifier::abnormal_interp_negex_seizure(patterns.clone()));
    set.push(SectionClassifier::findall_interp_negex_seizure(patterns.clone()));
    set.push(SeizureSectionHeuristic::new());
    set.push(impression::impression_negative()?);
    set.push(impression::impression_positive()?);
    set.push(impression::spikes_in_impression()?);
    set.push(impression::extreme_words_in_impression()?);
    set.push(EquivocationHeuristic::new(patterns));
    Ok(set)
}
