#![doc(
    html_logo_url = "https://raw.githubusercontent.com/storyscript/layered-nlp/main/assets/layered-nlp.svg",
    issue_tracker_base_url = "https://github.com/storyscript/layered-nlp/issues/"
)]

//! Section-aware polarity labeling for clinical narrative reports.
//!
//! This crate holds the report-independent machinery that labeling
//! heuristics are built from:
//!
//! - [`Document`] / [`SectionTree`] - a report's text and its irregular section tree
//! - [`resolve`] - multi-candidate, multi-location section lookup
//! - [`SentenceScoper`] - memoized sentence segmentation behind [`SentenceSegmenter`]
//! - [`Heuristic`] / [`HeuristicSet`] - the heuristic interface and label runner
//! - [`Polarity`] - the three-way label every heuristic returns
//! - [`SentenceDisplay`] - text rendering of per-sentence results for snapshot tests
//!
//! Domain plugins (such as `layered-eeg`) supply patterns and heuristics.
//!
//! ## Example
//!
//! ```
//! use layered_reports::{resolve, CandidateSections, Document, ResolveMode, SectionTree};
//!
//! let doc = Document::new("...").with_section(
//!     "findings",
//!     SectionTree::map([("impression", SectionTree::text("Normal EEG."))]),
//! );
//! let candidates = CandidateSections::new(["interpretation", "impression"]);
//! assert_eq!(resolve(&doc, &candidates, ResolveMode::FirstMatch), "Normal EEG.");
//! ```

mod display;
mod document;
mod errors;
mod heuristic;
mod polarity;
pub mod resolver;
mod sentences;

pub use display::SentenceDisplay;
pub use document::{load_corpus, parse_corpus, Document, DocumentFormat, SectionMap, SectionTree};
pub use errors::{ReportError, ReportResult};
pub use heuristic::{
    Heuristic, HeuristicOutcome, HeuristicSet, KeywordHeuristic, KeywordScope, LabelRow,
    LabelRowSummary,
};
pub use polarity::Polarity;
pub use resolver::{resolve, CandidateSections, FallbackChain, ResolveMode, SectionFragment};
pub use sentences::{SentenceScoper, SentenceSegmenter, UnicodeSentenceSegmenter};

#[cfg(test)]
mod tests {
    mod resolution;
}
