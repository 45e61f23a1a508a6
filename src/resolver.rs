//! Section resolution across inconsistent document shapes.
//!
//! Different sources file the same clinical summary under different names and
//! at different depths. Resolution probes an ordered list of candidate names
//! at the top level and under the known nesting sections, and never fails:
//! a miss is simply an empty result.

use crate::{Document, SectionTree};

/// Nested sections probed after the top level, in order.
pub const NESTED_LOCATIONS: [&str; 2] = ["narrative", "findings"];

/// How [`resolve`] combines the fragments it finds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveMode {
    /// Return the first non-empty fragment.
    FirstMatch,
    /// Join every fragment found, with whitespace collapsed.
    ConcatAll,
}

/// Ordered, lowercase, deduplicated section-name synonyms.
///
/// Order is probing order only. It says nothing about which name is more
/// likely to hold the right text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSections {
    names: Vec<String>,
}

impl CandidateSections {
    /// Build from any names. Names are lowercased; later duplicates are dropped.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut deduped: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim().to_lowercase();
            if !name.is_empty() && !deduped.contains(&name) {
                deduped.push(name);
            }
        }
        Self { names: deduped }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl From<&[&str]> for CandidateSections {
    fn from(names: &[&str]) -> Self {
        Self::new(names)
    }
}

/// A located piece of section text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionFragment<'d> {
    /// Candidate name that matched.
    pub name: &'d str,
    /// Nesting section it was found under, `None` for the top level.
    pub location: Option<&'static str>,
    pub text: &'d str,
}

/// Every fragment reachable from `candidates`, in probing order.
///
/// For each candidate the top level is probed first, then each of
/// [`NESTED_LOCATIONS`]. Missing keys and non-text nodes are skipped.
pub fn fragments<'d>(
    document: &'d Document,
    candidates: &'d CandidateSections,
) -> impl Iterator<Item = SectionFragment<'d>> + 'd {
    candidates.iter().flat_map(move |name| {
        let top = document
            .section(name)
            .and_then(SectionTree::as_text)
            .map(|text| SectionFragment {
                name,
                location: None,
                text,
            });
        let nested = NESTED_LOCATIONS.iter().filter_map(move |location| {
            document
                .section(location)
                .and_then(|parent| parent.child(name))
                .and_then(SectionTree::as_text)
                .map(|text| SectionFragment {
                    name,
                    location: Some(*location),
                    text,
                })
        });
        top.into_iter().chain(nested)
    })
}

/// Resolve candidate section text from a document.
///
/// An empty string means nothing was resolved; callers abstain on it.
pub fn resolve(document: &Document, candidates: &CandidateSections, mode: ResolveMode) -> String {
    let resolved = match mode {
        ResolveMode::FirstMatch => fragments(document, candidates)
            .find(|fragment| !fragment.text.trim().is_empty())
            .map(|fragment| fragment.text.to_string())
            .unwrap_or_default(),
        ResolveMode::ConcatAll => {
            let mut joined = String::new();
            for fragment in fragments(document, candidates) {
                for word in fragment.text.split_whitespace() {
                    if !joined.is_empty() {
                        joined.push(' ');
                    }
                    joined.push_str(word);
                }
            }
            joined
        }
    };

    if !resolved.is_empty() {
        tracing::debug!(
            mode = ?mode,
            candidates = ?candidates.names(),
            chars = resolved.len(),
            "resolved section text"
        );
    }
    resolved
}

/// An ordered list of section paths; the first present path wins.
///
/// Used where a classifier wants one canonical section and knows where other
/// report formats keep the same summary. A stage added with
/// [`then_within`](Self::then_within) claims its section: when the section is
/// present and none of its children hold text, the chain ends there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackChain {
    steps: Vec<FallbackStep>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum FallbackStep {
    Path(Vec<String>),
    /// Stop probing if this top-level section exists.
    Fence(String),
}

impl FallbackChain {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Append a path such as `["findings", "summary"]`.
    pub fn then(mut self, path: &[&str]) -> Self {
        self.steps.push(FallbackStep::Path(
            path.iter().map(|step| step.to_lowercase()).collect(),
        ));
        self
    }

    /// Append `section.child` for each child, in order. If `section` is
    /// present but none of them hold text, later steps are not probed.
    pub fn then_within(mut self, section: &str, children: &[&str]) -> Self {
        for child in children {
            self = self.then(&[section, child]);
        }
        self.steps.push(FallbackStep::Fence(section.to_lowercase()));
        self
    }

    /// Every path, in probing order.
    pub fn paths(&self) -> impl Iterator<Item = Vec<&str>> {
        self.steps.iter().filter_map(|step| match step {
            FallbackStep::Path(path) => Some(path.iter().map(String::as_str).collect()),
            FallbackStep::Fence(_) => None,
        })
    }

    /// Text at the first path that holds text, with the path that matched.
    pub fn first_present<'d>(&self, document: &'d Document) -> Option<(Vec<&str>, &'d str)> {
        for step in &self.steps {
            match step {
                FallbackStep::Path(path) => {
                    let path: Vec<&str> = path.iter().map(String::as_str).collect();
                    if let Some(text) = document.text_at(&path) {
                        return Some((path, text));
                    }
                }
                FallbackStep::Fence(section) if document.has_section(section) => return None,
                FallbackStep::Fence(_) => {}
            }
        }
        None
    }
}

impl Default for FallbackChain {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nested_impression_report() -> Document {
        Document::new("").with_section(
            "findings",
            SectionTree::map([
                ("impression", SectionTree::text("Abnormal EEG  due to\nspikes.")),
                ("background", SectionTree::text("Normal.")),
            ]),
        )
    }

    #[test]
    fn candidates_are_lowercased_and_deduplicated() {
        let candidates =
            CandidateSections::new(["INTERPRETATION", "Interpretation", "Summary", " ", "summary"]);
        assert_eq!(candidates.names(), &["interpretation", "summary"]);
    }

    #[test]
    fn first_match_finds_nested_findings() {
        let doc = nested_impression_report();
        let candidates = CandidateSections::new(["impression", "interpretation"]);
        assert_eq!(
            resolve(&doc, &candidates, ResolveMode::FirstMatch),
            "Abnormal EEG  due to\nspikes."
        );
    }

    #[test]
    fn first_match_skips_empty_fragments() {
        let doc = Document::new("")
            .with_section("impression", SectionTree::map([("text", SectionTree::text("  "))]))
            .with_section(
                "narrative",
                SectionTree::map([("impression", SectionTree::text("Normal study."))]),
            );
        let candidates = CandidateSections::new(["impression"]);
        assert_eq!(resolve(&doc, &candidates, ResolveMode::FirstMatch), "Normal study.");
    }

    #[test]
    fn concat_all_joins_every_location() {
        let doc = nested_impression_report()
            .with_section(
                "Impression",
                SectionTree::map([("text", SectionTree::text("Top level."))]),
            )
            .with_section(
                "summary",
                SectionTree::map([("text", SectionTree::text("  Summary\ttext. "))]),
            );
        let candidates = CandidateSections::new(["impression", "summary"]);
        assert_eq!(
            resolve(&doc, &candidates, ResolveMode::ConcatAll),
            "Top level. Abnormal EEG due to spikes. Summary text."
        );
    }

    #[test]
    fn concat_all_is_idempotent() {
        let doc = nested_impression_report();
        let candidates = CandidateSections::new(["impression", "background"]);
        let first = resolve(&doc, &candidates, ResolveMode::ConcatAll);
        let second = resolve(&doc, &candidates, ResolveMode::ConcatAll);
        assert_eq!(first, second);
    }

    #[test]
    fn nothing_resolved_is_empty() {
        let doc = Document::new("free text");
        let candidates = CandidateSections::new(["impression"]);
        assert_eq!(resolve(&doc, &candidates, ResolveMode::FirstMatch), "");
        assert_eq!(resolve(&doc, &candidates, ResolveMode::ConcatAll), "");
    }

    #[test]
    fn wrong_shapes_are_skipped() {
        // "narrative" is a leaf here, so nothing can be nested under it
        let doc = Document::new("")
            .with_section("narrative", SectionTree::text("impression: normal"))
            .with_section(
                "impression",
                SectionTree::map([("detail", SectionTree::text("no text key"))]),
            );
        let candidates = CandidateSections::new(["impression"]);
        assert_eq!(fragments(&doc, &candidates).count(), 0);
    }

    #[test]
    fn fallback_chain_takes_first_present_path() {
        let doc = nested_impression_report();
        let chain = FallbackChain::new()
            .then(&["interpretation"])
            .then(&["findings", "summary"])
            .then(&["findings", "impression"]);
        let (path, text) = chain.first_present(&doc).unwrap();
        assert_eq!(path, vec!["findings", "impression"]);
        assert!(text.starts_with("Abnormal"));

        let empty = FallbackChain::new().then(&["summary"]);
        assert_eq!(empty.first_present(&doc), None);
    }

    #[test]
    fn present_section_ends_the_chain() {
        let chain = FallbackChain::new()
            .then_within("findings", &["summary"])
            .then_within("narrative", &["summary", "impression"]);
        assert_eq!(
            chain.paths().collect::<Vec<_>>(),
            vec![
                vec!["findings", "summary"],
                vec!["narrative", "summary"],
                vec!["narrative", "impression"],
            ]
        );

        let doc = nested_impression_report().with_section(
            "narrative",
            SectionTree::map([("summary", SectionTree::text("Abnormal EEG."))]),
        );
        assert_eq!(chain.first_present(&doc), None);

        let doc = Document::new("").with_section(
            "narrative",
            SectionTree::map([("summary", SectionTree::text("Abnormal EEG."))]),
        );
        let (path, text) = chain.first_present(&doc).unwrap();
        assert_eq!(path, vec!["narrative", "summary"]);
        assert_eq!(text, "Abnormal EEG.");
    }
}
