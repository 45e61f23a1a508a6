//! The EEG pattern library.
//!
//! Every pattern is compiled case-insensitively, once, into an immutable
//! [`EegPatterns`]. A pattern that fails to compile is a programming error:
//! [`EegPatterns::new`] reports it with the pattern's name and
//! [`EegPatterns::shared`] panics on first use.

use std::sync::Arc;

use layered_reports::{ReportError, ReportResult};
use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};

/// Nouns that name the study itself.
pub const STUDY_NOUNS: &str =
    r"(?:EEG|study|record|electroencephalogram|ambulatory\s+EEG|video.EEG\s+study)";

/// Surface forms of the seizure concept.
pub const SEIZURE_SYNONYMS: &str = r"(?:seizure|seizures|spasm|spasms|status\s+epilepticus|epilepsia\s+partialis\s+continua|drop\s+attack)";

/// Negation determiners.
pub const NEGATION_CUES: &str =
    r"(?:\bno\b|\bnot\b|\bwithout\s+further\b|\bno\s+further\b|without|neither)";

/// Fixed idioms that directly assert no seizure.
pub const NO_SEIZURE_IDIOMS: &[&str] = &[
    r"\bno\s+seizures\b",
    r"\bno\s+epileptiform\s+activity\s+or\s+seizures\b",
    r"\bno\s+findings\s+to\s+indicate\s+seizures\b",
    r"no\s+findings\s+to\s+indicate",
    r"no\s+new\s+seizures",
    r"with\s+no\s+seizures",
    r"no\s+evidence\s+to\s+support\s+seizures",
    r"nonepileptic",
    r"non-epileptic",
];

/// Hedging terms used by the report-level keyword heuristics.
pub const EQUIVOCATION_TERMS: &[&str] = &[
    "unlikely",
    "likely",
    "suggests",
    "questionable",
    "concerning",
    "possibly",
    "potentially",
    "could represent",
    "may represent",
    "may relate",
    "cannot exclude",
    "can't exclude",
    "may be",
];

/// Collocations of "normal" with a study noun.
fn normal_study_phrases() -> String {
    let s = STUDY_NOUNS;
    [
        format!(r"\bnormal\s+(?:awake\s+and\s+asleep\s+|awake\s+and\s+drowsy\s+|awake\s+|asleep\s+)?{}", s),
        format!(r"\b{}\s+(?:is|was)\s+normal", s),
        r"\brange\s+of\s+normal".to_string(),
        r"\b(?:is|was)\s+normal\s+for\s+age".to_string(),
        format!(r"\b{}\s+(?:is|was)\s+within\s+normal", s),
        format!(r"\b{}\s+(?:is|was)\s+borderline\s+normal", s),
        format!(r"\b{}\s+(?:is|was)\s+at\s+the\s+borderline\s+of\s+being\s+normal", s),
        format!(r"\b{}\s+capturing\s+wakefulness(?:\s+and\s+sleep)?\s+(?:is|was)\s+normal", s),
    ]
    .join("|")
}

/// Precompiled patterns shared by every EEG heuristic.
#[derive(Debug, Clone)]
pub struct EegPatterns {
    concept: Regex,
    negation_cue: Regex,
    forward_negation: Regex,
    reverse_negation: Regex,
    no_concept_idiom: Regex,
    simple_normal: Regex,
    normal_study: Regex,
    abnormal: Regex,
    equivocation: Regex,
}

static SHARED: Lazy<Arc<EegPatterns>> = Lazy::new(|| match EegPatterns::new() {
    Ok(patterns) => Arc::new(patterns),
    Err(e) => panic!("built-in EEG pattern library is invalid: {}", e),
});

impl EegPatterns {
    /// Compile the full library.
    pub fn new() -> ReportResult<Self> {
        Ok(Self {
            concept: compile("concept", SEIZURE_SYNONYMS)?,
            negation_cue: compile("negation_cue", NEGATION_CUES)?,
            // `.` spans line breaks: a sentence is the negation scope
            forward_negation: compile(
                "forward_negation",
                &format!(r"(?s){}.*{}", NEGATION_CUES, SEIZURE_SYNONYMS),
            )?,
            reverse_negation: compile(
                "reverse_negation",
                &format!(r"(?s){}.*{}", SEIZURE_SYNONYMS, NEGATION_CUES),
            )?,
            no_concept_idiom: compile("no_concept_idiom", &NO_SEIZURE_IDIOMS.join("|"))?,
            simple_normal: compile("simple_normal", r"\bnormal\b")?,
            normal_study: compile("normal_study", &normal_study_phrases())?,
            abnormal: compile("abnormal", "abnormal")?,
            equivocation: compile("equivocation", &EQUIVOCATION_TERMS.join("|"))?,
        })
    }

    /// The process-wide library, compiled on first use.
    pub fn shared() -> Arc<EegPatterns> {
        Arc::clone(&SHARED)
    }

    pub fn concept(&self) -> &Regex {
        &self.concept
    }

    pub fn negation_cue(&self) -> &Regex {
        &self.negation_cue
    }

    /// Negation cue anywhere before a concept mention.
    pub fn forward_negation(&self) -> &Regex {
        &self.forward_negation
    }

    /// Concept mention anywhere before a negation cue.
    pub fn reverse_negation(&self) -> &Regex {
        &self.reverse_negation
    }

    pub fn no_concept_idiom(&self) -> &Regex {
        &self.no_concept_idiom
    }

    pub fn normal_study(&self) -> &Regex {
        &self.normal_study
    }

    pub fn equivocation(&self) -> &Regex {
        &self.equivocation
    }

    pub fn is_abnormal(&self, text: &str) -> bool {
        self.abnormal.is_match(text)
    }

    pub fn mentions_concept(&self, text: &str) -> bool {
        self.concept.is_match(text)
    }

    /// Some "normal" word and a normal-study collocation.
    pub fn is_normal_study(&self, text: &str) -> bool {
        self.simple_normal.is_match(text) && self.normal_study.is_match(text)
    }

    pub fn has_no_concept_idiom(&self, text: &str) -> bool {
        self.no_concept_idiom.is_match(text)
    }
}

fn compile(name: &str, source: &str) -> ReportResult<Regex> {
    RegexBuilder::new(source)
        .case_insensitive(true)
        .build()
        .map_err(|source| ReportError::Pattern {
            name: name.to_string(),
            source,
        })
}
