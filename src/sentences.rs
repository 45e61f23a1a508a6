//! Sentence scoping over resolved section text.
//!
//! Segmentation itself sits behind [`SentenceSegmenter`] so that a
//! model-backed segmenter can replace the default UAX #29 rules.
//! [`SentenceScoper`] memoizes segmentation per resolved text, so several
//! heuristics reading the same section of one document segment it once.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use unicode_segmentation::UnicodeSegmentation;

use crate::ReportResult;

/// Splits text into ordered, non-overlapping sentences.
///
/// Implementations must be deterministic. Errors fail the current document
/// only; see [`HeuristicSet::label_corpus`](crate::HeuristicSet::label_corpus).
pub trait SentenceSegmenter: Send + Sync {
    fn segment(&self, text: &str) -> ReportResult<Vec<String>>;
}

/// Unicode sentence boundaries (UAX #29), with surrounding whitespace trimmed.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnicodeSentenceSegmenter;

impl SentenceSegmenter for UnicodeSentenceSegmenter {
    fn segment(&self, text: &str) -> ReportResult<Vec<String>> {
        Ok(text
            .split_sentence_bounds()
            .map(str::trim)
            .filter(|sentence| !sentence.is_empty())
            .map(str::to_string)
            .collect())
    }
}

/// Per-document sentence access with memoized segmentation.
///
/// A scoper is created for one document and dropped with it; it is not shared
/// across threads.
pub struct SentenceScoper<'s> {
    segmenter: &'s dyn SentenceSegmenter,
    cache: RefCell<HashMap<String, Rc<[String]>>>,
}

impl<'s> SentenceScoper<'s> {
    pub fn new(segmenter: &'s dyn SentenceSegmenter) -> Self {
        Self {
            segmenter,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Sentences of `text`, segmenting it on first request.
    pub fn sentences(&self, text: &str) -> ReportResult<Rc<[String]>> {
        if text.trim().is_empty() {
            return Ok(Rc::from(Vec::new()));
        }
        if let Some(cached) = self.cache.borrow().get(text) {
            return Ok(Rc::clone(cached));
        }

        let sentences: Rc<[String]> = Rc::from(self.segmenter.segment(text)?);
        self.cache
            .borrow_mut()
            .insert(text.to_string(), Rc::clone(&sentences));
        Ok(sentences)
    }

    /// Whether any sentence of `text` satisfies `predicate`.
    pub fn any_sentence<P>(&self, text: &str, mut predicate: P) -> ReportResult<bool>
    where
        P: FnMut(&str) -> bool,
    {
        Ok(self.sentences(text)?.iter().any(|s| predicate(s)))
    }

    /// Number of distinct texts segmented so far.
    pub fn segmented_texts(&self) -> usize {
        self.cache.borrow().len()
    }
}
