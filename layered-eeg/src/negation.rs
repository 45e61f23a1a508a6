//! Sentence-scoped negation scanning.
//!
//! A section is scanned sentence by sentence. A negation cue before a seizure
//! mention ("no further seizures") or after one ("seizures were not seen")
//! negates that sentence. A sentence that mentions a seizure without either
//! pattern is an un-negated mention.
//!
//! One un-negated mention anywhere in the section outweighs any number of
//! negated ones: "The patient had a seizure. No further seizures were noted."
//! is positive. Without an un-negated mention the section is negative.
//! Negation covers the whole sentence, so an exception inside a negated
//! sentence ("no seizures except one brief event") stays negated.
//!
//! Sections that never say "abnormal" are negative without being scanned.

use std::fmt;

use layered_reports::{Polarity, ReportResult, SentenceDisplay, SentenceScoper};
use serde::{Deserialize, Serialize};

use crate::EegPatterns;

/// Negation found in one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NegationState {
    /// A cue precedes a concept mention.
    NegatedForward,
    /// A concept mention precedes a cue.
    NegatedReverse,
    None,
}

impl NegationState {
    pub fn is_negated(self) -> bool {
        !matches!(self, NegationState::None)
    }
}

/// Outcome of the "abnormal" fast gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScanGate {
    /// No abnormal indicator; sentences were not examined.
    NotAbnormal,
    /// Abnormal indicator present; every sentence was examined.
    Abnormal,
}

/// Result for one sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceScan {
    pub negation: NegationState,
    /// Concept mentioned in a sentence with no negation.
    pub unnegated_mention: bool,
}

/// Full trace of one negation-aware classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NegationScan {
    pub gate: ScanGate,
    pub sentences: Vec<String>,
    /// Parallel to `sentences`.
    pub scans: Vec<SentenceScan>,
    pub polarity: Polarity,
}

impl NegationScan {
    /// Whether any sentence matched a negation pattern.
    pub fn negation_found(&self) -> bool {
        self.scans.iter().any(|s| s.negation.is_negated())
    }

    /// Whether any sentence raised the un-negated mention flag.
    pub fn unnegated_mention(&self) -> bool {
        self.scans.iter().any(|s| s.unnegated_mention)
    }
}

#[derive(Debug)]
struct ConceptMention;

impl fmt::Display for NegationScan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.gate == ScanGate::NotAbnormal {
            return write!(f, "(no abnormal indicator)\n=> {:?}", self.polarity);
        }

        let mut display = SentenceDisplay::new(&self.sentences);
        for (idx, scan) in self.scans.iter().enumerate() {
            if scan.negation.is_negated() {
                display.label(idx, scan.negation);
            } else if scan.unnegated_mention {
                display.label(idx, ConceptMention);
            }
        }
        write!(f, "{}\n=> {:?}", display, self.polarity)
    }
}

/// Negation-aware seizure classification over resolved section text.
#[derive(Debug, Clone, Copy)]
pub struct NegationScanner<'p> {
    patterns: &'p EegPatterns,
}

impl<'p> NegationScanner<'p> {
    pub fn new(patterns: &'p EegPatterns) -> Self {
        Self { patterns }
    }

    /// Negation state of a single sentence. Forward negation wins when both
    /// directions match.
    pub fn sentence_state(&self, sentence: &str) -> NegationState {
        if self.patterns.forward_negation().is_match(sentence) {
            NegationState::NegatedForward
        } else if self.patterns.reverse_negation().is_match(sentence) {
            NegationState::NegatedReverse
        } else {
            NegationState::None
        }
    }

    /// Scan `text` and keep the per-sentence trace.
    pub fn scan(&self, text: &str, scoper: &SentenceScoper<'_>) -> ReportResult<NegationScan> {
        if !self.patterns.is_abnormal(text) {
            tracing::debug!("no abnormal indicator; skipping negation scan");
            return Ok(NegationScan {
                gate: ScanGate::NotAbnormal,
                sentences: Vec::new(),
                scans: Vec::new(),
                polarity: Polarity::Negative,
            });
        }

        let sentences = scoper.sentences(text)?;
        let scans: Vec<SentenceScan> = sentences
            .iter()
            .map(|sentence| {
                let negation = self.sentence_state(sentence);
                let unnegated_mention =
                    !negation.is_negated() && self.patterns.mentions_concept(sentence);
                tracing::trace!(?negation, unnegated_mention, sentence = %sentence, "scanned sentence");
                SentenceScan {
                    negation,
                    unnegated_mention,
                }
            })
            .collect();

        let polarity = if scans.iter().any(|s| s.unnegated_mention) {
            Polarity::Positive
        } else {
            Polarity::Negative
        };

        let scan = NegationScan {
            gate: ScanGate::Abnormal,
            sentences: sentences.to_vec(),
            scans,
            polarity,
        };
        tracing::debug!(
            sentences = scan.sentences.len(),
            negation_found = scan.negation_found(),
            unnegated_mention = scan.unnegated_mention(),
            polarity = %scan.polarity,
            "negation scan"
        );
        Ok(scan)
    }

    /// Positive if some sentence mentions a seizure without negation,
    /// otherwise negative.
    pub fn classify_with_negation(
        &self,
        text: &str,
        scoper: &SentenceScoper<'_>,
    ) -> ReportResult<Polarity> {
        Ok(self.scan(text, scoper)?.polarity)
    }
}
