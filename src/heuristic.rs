//! Heuristic interface and the label runner.
//!
//! A heuristic maps one document to a [`Polarity`]. Heuristics share no state;
//! the runner applies each of them to each document and records every outcome.
//! Combining the votes into a final label happens downstream.

use regex::{RegexSet, RegexSetBuilder};
use serde::Serialize;

use crate::resolver::{resolve, CandidateSections, ResolveMode};
use crate::{
    Document, Polarity, ReportError, ReportResult, SentenceScoper, SentenceSegmenter,
    UnicodeSentenceSegmenter,
};

/// A labeling heuristic over one document.
pub trait Heuristic: Send + Sync {
    /// Stable identifier, used in label rows, fixtures and configuration.
    fn name(&self) -> &str;

    fn label(&self, document: &Document, scoper: &SentenceScoper<'_>) -> ReportResult<Polarity>;
}

/// Where a [`KeywordHeuristic`] looks for its terms.
#[derive(Debug, Clone)]
pub enum KeywordScope {
    /// The whole report text.
    ReportText,
    /// Text resolved from candidate sections. Nothing resolved means abstain.
    Sections {
        candidates: CandidateSections,
        mode: ResolveMode,
    },
}

/// Fires a fixed polarity when any of its terms occurs in scope.
///
/// Terms are case-insensitive regular expressions.
#[derive(Debug, Clone)]
pub struct KeywordHeuristic {
    name: String,
    scope: KeywordScope,
    terms: RegexSet,
    on_match: Polarity,
}

impl KeywordHeuristic {
    pub fn new<I, S>(
        name: impl Into<String>,
        scope: KeywordScope,
        terms: I,
        on_match: Polarity,
    ) -> ReportResult<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let name = name.into();
        let terms = RegexSetBuilder::new(terms)
            .case_insensitive(true)
            .build()
            .map_err(|e| ReportError::pattern(name.clone(), e))?;
        Ok(Self {
            name,
            scope,
            terms,
            on_match,
        })
    }

    pub fn scope(&self) -> &KeywordScope {
        &self.scope
    }
}

impl Heuristic for KeywordHeuristic {
    fn name(&self) -> &str {
        &self.name
    }

    fn label(&self, document: &Document, _scoper: &SentenceScoper<'_>) -> ReportResult<Polarity> {
        let resolved;
        let text = match &self.scope {
            KeywordScope::ReportText => document.text(),
            KeywordScope::Sections { candidates, mode } => {
                resolved = resolve(document, candidates, *mode);
                resolved.as_str()
            }
        };

        if !text.is_empty() && self.terms.is_match(text) {
            Ok(self.on_match)
        } else {
            Ok(Polarity::Abstain)
        }
    }
}

/// One heuristic's outcome on one document.
#[derive(Debug)]
pub struct HeuristicOutcome {
    pub heuristic: String,
    pub result: ReportResult<Polarity>,
}

impl HeuristicOutcome {
    /// The label, or `None` if this heuristic failed on the document.
    pub fn polarity(&self) -> Option<Polarity> {
        self.result.as_ref().ok().copied()
    }
}

/// All heuristic outcomes for one document, in registration order.
#[derive(Debug)]
pub struct LabelRow {
    pub document_id: Option<String>,
    pub outcomes: Vec<HeuristicOutcome>,
}

impl LabelRow {
    /// Numeric labels (1 / -1 / 0); failed heuristics are `None`.
    pub fn label_values(&self) -> Vec<Option<i8>> {
        self.outcomes
            .iter()
            .map(|outcome| outcome.polarity().map(Polarity::label_value))
            .collect()
    }

    pub fn get(&self, heuristic: &str) -> Option<&HeuristicOutcome> {
        self.outcomes.iter().find(|o| o.heuristic == heuristic)
    }

    pub fn failures(&self) -> impl Iterator<Item = &HeuristicOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    /// Serializable view, with failures rendered as their error message.
    pub fn summary(&self) -> LabelRowSummary {
        LabelRowSummary {
            document_id: self.document_id.clone(),
            labels: self
                .outcomes
                .iter()
                .map(|o| (o.heuristic.clone(), o.polarity().map(Polarity::label_value)))
                .collect(),
            errors: self
                .failures()
                .map(|o| match &o.result {
                    Err(e) => (o.heuristic.clone(), e.to_string()),
                    Ok(_) => (o.heuristic.clone(), String::new()),
                })
                .collect(),
        }
    }
}

/// Serializable form of a [`LabelRow`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LabelRowSummary {
    pub document_id: Option<String>,
    pub labels: Vec<(String, Option<i8>)>,
    pub errors: Vec<(String, String)>,
}

/// An ordered collection of heuristics sharing one sentence segmenter.
pub struct HeuristicSet {
    segmenter: Box<dyn SentenceSegmenter>,
    heuristics: Vec<Box<dyn Heuristic>>,
}

impl HeuristicSet {
    pub fn new() -> Self {
        Self::with_segmenter(UnicodeSentenceSegmenter)
    }

    pub fn with_segmenter(segmenter: impl SentenceSegmenter + 'static) -> Self {
        Self {
            segmenter: Box::new(segmenter),
            heuristics: Vec::new(),
        }
    }

    pub fn push(&mut self, heuristic: impl Heuristic + 'static) {
        self.heuristics.push(Box::new(heuristic));
    }

    pub fn with(mut self, heuristic: impl Heuristic + 'static) -> Self {
        self.push(heuristic);
        self
    }

    pub fn extend(&mut self, heuristics: impl IntoIterator<Item = Box<dyn Heuristic>>) {
        self.heuristics.extend(heuristics);
    }

    /// Keep only the named heuristics. An empty list keeps everything.
    pub fn retain_named(&mut self, names: &[String]) {
        if names.is_empty() {
            return;
        }
        self.heuristics
            .retain(|h| names.iter().any(|name| name == h.name()));
    }

    pub fn names(&self) -> Vec<&str> {
        self.heuristics.iter().map(|h| h.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.heuristics.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heuristics.is_empty()
    }

    /// Run every heuristic on one document.
    ///
    /// Sentence segmentation is shared across heuristics for this document.
    pub fn label_document(&self, document: &Document) -> LabelRow {
        let scoper = SentenceScoper::new(self.segmenter.as_ref());
        let outcomes = self
            .heuristics
            .iter()
            .map(|heuristic| {
                let result = heuristic.label(document, &scoper);
                if let Err(e) = &result {
                    tracing::warn!(
                        document = document.id().unwrap_or("<unnamed>"),
                        heuristic = heuristic.name(),
                        error = %e,
                        "heuristic failed; continuing with remaining heuristics"
                    );
                }
                HeuristicOutcome {
                    heuristic: heuristic.name().to_string(),
                    result,
                }
            })
            .collect();

        LabelRow {
            document_id: document.id().map(str::to_string),
            outcomes,
        }
    }

    /// Label a corpus. A failure on one document never affects another.
    pub fn label_corpus(&self, documents: &[Document]) -> Vec<LabelRow> {
        let rows: Vec<LabelRow> = documents.iter().map(|d| self.label_document(d)).collect();
        tracing::info!(
            documents = rows.len(),
            heuristics = self.len(),
            failed_documents = rows.iter().filter(|r| r.failures().next().is_some()).count(),
            "labeled corpus"
        );
        rows
    }
}

impl Default for HeuristicSet {
    fn default() -> Self {
        Self::new()
    }
}
