use std::sync::Arc;

use layered_reports::{
    Document, Heuristic, Polarity, SectionTree, SentenceScoper, UnicodeSentenceSegmenter,
};

use crate::{impression, EegPatterns, EquivocationHeuristic, SectionClassifier, SeizureSectionHeuristic};

fn label(heuristic: &dyn Heuristic, doc: &Document) -> Polarity {
    let scoper = SentenceScoper::new(&UnicodeSentenceSegmenter);
    heuristic.label(doc, &scoper).unwrap()
}

/// A report whose top-level `interpretation` holds `text`, wrapped the way
/// sources wrap top-level sections.
fn interpretation(text: &str) -> Document {
    Document::new(text).with_section(
        "interpretation",
        SectionTree::map([("text", SectionTree::text(text))]),
    )
}

fn section_classifiers(patterns: Arc<EegPatterns>) -> Vec<SectionClassifier> {
    vec![
        SectionClassifier::normal_interp_not_seizure(patterns.clone()),
        SectionClassifier::abnormal_interp_with_seizure(patterns.clone()),
        SectionClassifier::findall_interp_with_seizure(patterns.clone()),
        SectionClassifier::findall_abnormal_interp_without_seizure(patterns.clone()),
        SectionClassifier::abnormal_interp_negex_seizure(patterns.clone()),
        SectionClassifier::findall_interp_negex_seizure(patterns),
    ]
}

#[test]
fn normal_for_age_is_negative() {
    let normal = SectionClassifier::normal_interp_not_seizure(EegPatterns::shared());
    assert_eq!(label(&normal, &interpretation("EEG is normal for age.")), Polarity::Negative);
    assert_eq!(label(&normal, &interpretation("Abnormal EEG.")), Polarity::Abstain);
}

#[test]
fn first_present_section_wins_even_when_empty() {
    let normal = SectionClassifier::normal_interp_not_seizure(EegPatterns::shared());
    let doc = Document::new("")
        .with_section("interpretation", SectionTree::map([("text", SectionTree::text("  "))]))
        .with_section("summary", SectionTree::text("EEG is normal for age."));
    assert_eq!(label(&normal, &doc), Polarity::Abstain);

    let doc = Document::new("").with_section("Summary", SectionTree::text("EEG is normal for age."));
    assert_eq!(label(&normal, &doc), Polarity::Negative);
}

#[test]
fn every_section_classifier_abstains_without_sections() {
    let doc = Document::new("Abnormal EEG. Two seizures were recorded.");
    for classifier in section_classifiers(EegPatterns::shared()) {
        assert_eq!(label(&classifier, &doc), Polarity::Abstain, "{}", classifier.name());
    }
}

#[test]
fn every_section_classifier_abstains_on_blank_sections() {
    let doc = Document::new("")
        .with_section("interpretation", SectionTree::text(""))
        .with_section("summary", SectionTree::text(" \n "))
        .with_section(
            "findings",
            SectionTree::map([("impression", SectionTree::text(""))]),
        );
    for classifier in section_classifiers(EegPatterns::shared()) {
        assert_eq!(label(&classifier, &doc), Polarity::Abstain, "{}", classifier.name());
    }
}

#[test]
fn nested_impression_is_found() {
    let patterns = EegPatterns::shared();
    let doc = Document::new("").with_section(
        "findings",
        SectionTree::map([
            ("background", SectionTree::text("Diffuse slowing.")),
            ("impression", SectionTree::text("Abnormal EEG. Two seizures were recorded.")),
        ]),
    );

    let findall = SectionClassifier::findall_interp_negex_seizure(patterns.clone());
    assert_eq!(label(&findall, &doc), Polarity::Positive);

    // only probes the top level
    let first = SectionClassifier::abnormal_interp_negex_seizure(patterns);
    assert_eq!(label(&first, &doc), Polarity::Abstain);
}

#[test]
fn negex_classifier_applies_the_override() {
    let negex = SectionClassifier::abnormal_interp_negex_seizure(EegPatterns::shared());
    let doc = interpretation("Abnormal EEG. The patient had a seizure. No further seizures were noted.");
    assert_eq!(label(&negex, &doc), Polarity::Positive);

    let doc = interpretation("No seizures were seen.");
    assert_eq!(label(&negex, &doc), Polarity::Negative);
}

#[test]
fn fallback_chain_reaches_nested_summaries() {
    let with_seizure = SectionClassifier::abnormal_interp_with_seizure(EegPatterns::shared());

    let doc = Document::new("").with_section(
        "findings",
        SectionTree::map([("summary", SectionTree::text("Abnormal EEG with seizures."))]),
    );
    assert_eq!(label(&with_seizure, &doc), Polarity::Positive);

    let doc = interpretation("Normal EEG.");
    assert_eq!(label(&with_seizure, &doc), Polarity::Negative);
}

#[test]
fn fallback_chain_prefers_findings_over_narrative() {
    let with_seizure = SectionClassifier::abnormal_interp_with_seizure(EegPatterns::shared());

    let doc = Document::new("")
        .with_section(
            "findings",
            SectionTree::map([("impression", SectionTree::text("Abnormal EEG due to slowing."))]),
        )
        .with_section(
            "narrative",
            SectionTree::map([("impression", SectionTree::text("Abnormal EEG with seizures."))]),
        );
    assert_eq!(label(&with_seizure, &doc), Polarity::Negative);
    assert_eq!(
        with_seizure.selection().select(&doc).as_deref(),
        Some("Abnormal EEG due to slowing.")
    );

    // narrative is only read when findings is absent
    let doc = Document::new("").with_section(
        "narrative",
        SectionTree::map([("summary", SectionTree::text("Abnormal EEG with seizures."))]),
    );
    assert_eq!(label(&with_seizure, &doc), Polarity::Positive);
}

#[test]
fn findings_without_a_summary_abstains() {
    let with_seizure = SectionClassifier::abnormal_interp_with_seizure(EegPatterns::shared());
    let doc = Document::new("")
        .with_section(
            "findings",
            SectionTree::map([("background", SectionTree::text("Abnormal background."))]),
        )
        .with_section(
            "narrative",
            SectionTree::map([("summary", SectionTree::text("Abnormal EEG with seizures."))]),
        );
    assert_eq!(with_seizure.selection().select(&doc), None);
    assert_eq!(label(&with_seizure, &doc), Polarity::Abstain);
}

#[test]
fn canonical_interpretation_shadows_other_candidates() {
    let findall = SectionClassifier::findall_interp_with_seizure(EegPatterns::shared());

    let doc = interpretation("Abnormal EEG due to slowing.")
        .with_section("impression", SectionTree::text("Seizures captured."));
    assert_eq!(label(&findall, &doc), Polarity::Negative);

    let doc = Document::new("")
        .with_section("summary", SectionTree::text("Abnormal EEG."))
        .with_section("impression", SectionTree::text("One   seizure\ncaptured."));
    assert_eq!(
        findall.selection().select(&doc).as_deref(),
        Some("Abnormal EEG. One seizure captured.")
    );
    assert_eq!(label(&findall, &doc), Polarity::Positive);
}

#[test]
fn no_seizure_idiom_needs_an_abnormal_study() {
    let without = SectionClassifier::findall_abnormal_interp_without_seizure(EegPatterns::shared());
    assert_eq!(
        label(&without, &interpretation("Abnormal EEG due to slowing; no seizures were captured.")),
        Polarity::Negative
    );
    assert_eq!(
        label(&without, &interpretation("Abnormal EEG. Events were non-epileptic.")),
        Polarity::Negative
    );
    assert_eq!(label(&without, &interpretation("Abnormal EEG.")), Polarity::Abstain);
    assert_eq!(label(&without, &interpretation("There were no seizures.")), Polarity::Abstain);
}

#[test]
fn classifiers_share_segmentation_of_the_same_text() {
    let patterns = EegPatterns::shared();
    let doc = interpretation("Abnormal EEG. One seizure was recorded.");
    let scoper = SentenceScoper::new(&UnicodeSentenceSegmenter);

    let first = SectionClassifier::abnormal_interp_negex_seizure(patterns.clone());
    let findall = SectionClassifier::findall_interp_negex_seizure(patterns);
    assert_eq!(first.label(&doc, &scoper).unwrap(), Polarity::Positive);
    assert_eq!(findall.label(&doc, &scoper).unwrap(), Polarity::Positive);
    assert_eq!(scoper.segmented_texts(), 1);
}

fn findings(children: Vec<(&str, &str)>) -> Document {
    Document::new("").with_section(
        "findings",
        SectionTree::map(
            children
                .into_iter()
                .map(|(name, text)| (name, SectionTree::text(text))),
        ),
    )
}

#[test]
fn seizure_section_reads_the_findings_entry() {
    let heuristic = SeizureSectionHeuristic::new();

    let doc = findings(vec![("seizures", "None.")]);
    assert_eq!(label(&heuristic, &doc), Polarity::Negative);

    let doc = findings(vec![("Seizure events", "Many, clustered overnight.")]);
    assert_eq!(label(&heuristic, &doc), Polarity::Positive);

    let doc = findings(vec![("seizures", "One brief event at 02:00.")]);
    assert_eq!(label(&heuristic, &doc), Polarity::Negative);

    let long = "evolving rhythmic activity ".repeat(11);
    let doc = findings(vec![("seizures", long.as_str())]);
    assert_eq!(label(&heuristic, &doc), Polarity::Positive);
}

#[test]
fn seizure_section_abstains_without_an_entry() {
    let heuristic = SeizureSectionHeuristic::new();
    let doc = findings(vec![("background", "Continuous and symmetric.")]);
    assert_eq!(label(&heuristic, &doc), Polarity::Abstain);
    assert_eq!(label(&heuristic, &Document::new("Seizures: None.")), Polarity::Abstain);
}

#[test]
fn impression_keywords() {
    let doc = Document::new("")
        .with_section("impression", SectionTree::text("Frequent spikes in the left temporal region."))
        .with_section("comments", SectionTree::text("Tonic seizures."));

    let positive = impression::impression_positive().unwrap();
    let negative = impression::impression_negative().unwrap();
    let spikes = impression::spikes_in_impression().unwrap();
    let extreme = impression::extreme_words_in_impression().unwrap();

    assert_eq!(label(&positive, &doc), Polarity::Positive);
    assert_eq!(label(&negative, &doc), Polarity::Abstain);
    assert_eq!(label(&spikes, &doc), Polarity::Positive);
    assert_eq!(label(&extreme, &doc), Polarity::Positive);

    let doc = Document::new("").with_section(
        "findings",
        SectionTree::map([("impression", SectionTree::text("Normal EEG."))]),
    );
    assert_eq!(label(&negative, &doc), Polarity::Negative);
    assert_eq!(label(&positive, &doc), Polarity::Abstain);

    let empty = Document::new("Normal EEG with frequent spikes.");
    for heuristic in [&positive, &negative, &spikes, &extreme] {
        assert_eq!(label(heuristic, &empty), Polarity::Abstain, "{}", heuristic.name());
    }
}

#[test]
fn equivocation_reads_the_whole_report() {
    let equivocation = EquivocationHeuristic::new(EegPatterns::shared());
    assert_eq!(
        label(&equivocation, &Document::new("Findings could represent seizures.")),
        Polarity::Positive
    );
    assert_eq!(label(&equivocation, &Document::new("Abnormal EEG.")), Polarity::Abstain);
}
