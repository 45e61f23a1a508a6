//! Section-aware seizure classifiers.
//!
//! Every classifier is a [`SectionSelection`] (which text to read) paired with
//! a [`Decision`] (how to turn that text into a label). Variants differ only
//! in those two choices. A selection that finds nothing, or finds only
//! whitespace, abstains.

use std::borrow::Cow;
use std::sync::Arc;

use layered_reports::{
    resolve, CandidateSections, Document, FallbackChain, Heuristic, Polarity, ReportResult,
    ResolveMode, SentenceScoper,
};

use crate::sections::{interpretation_candidates, interpretation_fallback_v1, INTERPRETATION};
use crate::{EegPatterns, NegationScanner};

/// Which text a classifier reads.
#[derive(Debug, Clone)]
pub enum SectionSelection {
    /// The first candidate present as a top-level section, even if empty.
    FirstPresent(CandidateSections),
    /// The first path of the chain that holds text.
    Fallback(FallbackChain),
    /// The canonical top-level section if present, else everything the
    /// candidates resolve to.
    CanonicalOrResolved {
        canonical: String,
        candidates: CandidateSections,
        mode: ResolveMode,
    },
    /// Everything the candidates resolve to.
    Resolved {
        candidates: CandidateSections,
        mode: ResolveMode,
    },
}

impl SectionSelection {
    /// Selected text, or `None` when the document has no such section.
    pub fn select<'d>(&self, document: &'d Document) -> Option<Cow<'d, str>> {
        match self {
            SectionSelection::FirstPresent(candidates) => candidates
                .iter()
                .find_map(|name| document.section(name))
                .map(|section| Cow::Borrowed(section.as_text().unwrap_or(""))),
            SectionSelection::Fallback(chain) => {
                chain.first_present(document).map(|(_, text)| Cow::Borrowed(text))
            }
            SectionSelection::CanonicalOrResolved {
                canonical,
                candidates,
                mode,
            } => match document.section(canonical) {
                Some(section) => Some(Cow::Borrowed(section.as_text().unwrap_or(""))),
                None => resolved(document, candidates, *mode),
            },
            SectionSelection::Resolved { candidates, mode } => {
                resolved(document, candidates, *mode)
            }
        }
    }
}

fn resolved<'d>(
    document: &Document,
    candidates: &CandidateSections,
    mode: ResolveMode,
) -> Option<Cow<'d, str>> {
    let text = resolve(document, candidates, mode);
    if text.is_empty() {
        None
    } else {
        Some(Cow::Owned(text))
    }
}

/// How a classifier labels its selected text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// "normal" plus a normal-study phrase is negative; otherwise abstain.
    NormalStudy,
    /// Abnormal and a seizure mention is positive; anything else negative.
    AbnormalWithConcept,
    /// Abnormal and a no-seizure idiom is negative; otherwise abstain.
    AbnormalWithNoConceptIdiom,
    /// Sentence-scoped negation scan.
    Negex,
}

/// A named selection/decision pair.
#[derive(Debug, Clone)]
pub struct SectionClassifier {
    name: &'static str,
    selection: SectionSelection,
    decision: Decision,
    patterns: Arc<EegPatterns>,
}

impl SectionClassifier {
    pub fn new(
        name: &'static str,
        selection: SectionSelection,
        decision: Decision,
        patterns: Arc<EegPatterns>,
    ) -> Self {
        Self {
            name,
            selection,
            decision,
            patterns,
        }
    }

    /// Interpretation says the study was normal.
    pub fn normal_interp_not_seizure(patterns: Arc<EegPatterns>) -> Self {
        Self::new(
            "normal_interp_not_seizure",
            SectionSelection::FirstPresent(interpretation_candidates()),
            Decision::NormalStudy,
            patterns,
        )
    }

    /// Abnormal interpretation that names a seizure, read from wherever the
    /// report format keeps its summary.
    pub fn abnormal_interp_with_seizure(patterns: Arc<EegPatterns>) -> Self {
        Self::new(
            "abnormal_interp_with_seizure",
            SectionSelection::Fallback(interpretation_fallback_v1()),
            Decision::AbnormalWithConcept,
            patterns,
        )
    }

    pub fn findall_interp_with_seizure(patterns: Arc<EegPatterns>) -> Self {
        Self::new(
            "findall_interp_with_seizure",
            canonical_or_all_interpretations(),
            Decision::AbnormalWithConcept,
            patterns,
        )
    }

    pub fn findall_abnormal_interp_without_seizure(patterns: Arc<EegPatterns>) -> Self {
        Self::new(
            "findall_abnormal_interp_without_seizure",
            canonical_or_all_interpretations(),
            Decision::AbnormalWithNoConceptIdiom,
            patterns,
        )
    }

    /// Negation scan of the first top-level interpretation section.
    pub fn abnormal_interp_negex_seizure(patterns: Arc<EegPatterns>) -> Self {
        Self::new(
            "abnormal_interp_negex_seizure",
            SectionSelection::FirstPresent(interpretation_candidates()),
            Decision::Negex,
            patterns,
        )
    }

    /// Negation scan of every interpretation fragment, top level and nested.
    pub fn findall_interp_negex_seizure(patterns: Arc<EegPatterns>) -> Self {
        Self::new(
            "findall_interp_negex_seizure",
            SectionSelection::Resolved {
                candidates: interpretation_candidates(),
                mode: ResolveMode::ConcatAll,
            },
            Decision::Negex,
            patterns,
        )
    }

    pub fn selection(&self) -> &SectionSelection {
        &self.selection
    }

    pub fn decision(&self) -> Decision {
        self.decision
    }

    /// Apply the decision to already selected text.
    pub fn decide(&self, text: &str, scoper: &SentenceScoper<'_>) -> ReportResult<Polarity> {
        let patterns = self.patterns.as_ref();
        let polarity = match self.decision {
            Decision::NormalStudy => {
                if patterns.is_normal_study(text) {
                    Polarity::Negative
                } else {
                    Polarity::Abstain
                }
            }
            Decision::AbnormalWithConcept => {
                if patterns.is_abnormal(text) && patterns.mentions_concept(text) {
                    Polarity::Positive
                } else {
                    Polarity::Negative
                }
            }
            Decision::AbnormalWithNoConceptIdiom => {
                if patterns.is_abnormal(text) && patterns.has_no_concept_idiom(text) {
                    Polarity::Negative
                } else {
                    Polarity::Abstain
                }
            }
            Decision::Negex => NegationScanner::new(patterns).classify_with_negation(text, scoper)?,
        };
        Ok(polarity)
    }
}

fn canonical_or_all_interpretations() -> SectionSelection {
    SectionSelection::CanonicalOrResolved {
        canonical: INTERPRETATION.to_string(),
        candidates: interpretation_candidates(),
        mode: ResolveMode::ConcatAll,
    }
}

impl Heuristic for SectionClassifier {
    fn name(&self) -> &str {
        self.name
    }

    fn label(&self, document: &Document, scoper: &SentenceScoper<'_>) -> ReportResult<Polarity> {
        let text = match self.selection.select(document) {
            Some(text) if !text.trim().is_empty() => text,
            _ => return Ok(Polarity::Abstain),
        };
        self.decide(&text, scoper)
    }
}

/// Reads the `findings` sub-sections whose name contains "seizure".
///
/// The first such sub-section decides: "None" is negative, "Many" is
/// positive, a long free-text description is positive, anything else
/// negative.
#[derive(Debug, Clone)]
pub struct SeizureSectionHeuristic {
    /// Descriptions longer than this many words count as positive.
    pub long_description_words: usize,
}

impl SeizureSectionHeuristic {
    pub const NAME: &'static str = "seizure_section";

    pub fn new() -> Self {
        Self {
            long_description_words: 30,
        }
    }
}

impl Default for SeizureSectionHeuristic {
    fn default() -> Self {
        Self::new()
    }
}

impl Heuristic for SeizureSectionHeuristic {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn label(&self, document: &Document, _scoper: &SentenceScoper<'_>) -> ReportResult<Polarity> {
        let findings = match document.section("findings") {
            Some(findings) => findings,
            None => return Ok(Polarity::Abstain),
        };

        let seizure_text = findings
            .children()
            .find(|(name, _)| name.to_lowercase().contains("seizure"))
            .map(|(_, section)| section.as_text().unwrap_or(""));

        let polarity = match seizure_text {
            None => Polarity::Abstain,
            Some(text) if text.contains("None") => Polarity::Negative,
            Some(text) if text.contains("Many") => Polarity::Positive,
            Some(text) if text.split_whitespace().count() > self.long_description_words => {
                Polarity::Positive
            }
            Some(_) => Polarity::Negative,
        };
        Ok(polarity)
    }
}

/// Hedged language anywhere in the report text.
#[derive(Debug, Clone)]
pub struct EquivocationHeuristic {
    patterns: Arc<EegPatterns>,
}

impl EquivocationHeuristic {
    pub const NAME: &'static str = "equivocation";

    pub fn new(patterns: Arc<EegPatterns>) -> Self {
        Self { patterns }
    }
}

impl Heuristic for EquivocationHeuristic {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn label(&self, document: &Document, _scoper: &SentenceScoper<'_>) -> ReportResult<Polarity> {
        if self.patterns.equivocation().is_match(document.text()) {
            Ok(Polarity::Positive)
        } else {
            Ok(Polarity::Abstain)
        }
    }
}

