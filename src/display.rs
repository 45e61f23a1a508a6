use std::fmt::Write;
use unicode_width::UnicodeWidthStr;

/// Internal representation of an included label for display.
struct IncludedLabel {
    /// Inclusive range of sentence indexes the label spans.
    range: (usize, usize),
    value: String,
}

/// Renders a run of sentences with labels underlined beneath them.
///
/// ```text
/// Abnormal EEG.  The patient had a seizure.
///                ╰────────────────────────╯Concept
/// ```
pub struct SentenceDisplay<'a> {
    sentences: &'a [String],
    include_labels: Vec<IncludedLabel>,
}

impl<'a> std::fmt::Display for SentenceDisplay<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const SPACE_PADDING: usize = 2;
        let mut sentence_idx_to_start_display_char_idx = Vec::new();
        let mut sentence_idx_to_end_display_char_idx = Vec::new();
        // write opening display text
        let mut opening_line = String::new();
        {
            // for skipping padding at beginning
            let mut is_first = true;
            for sentence in self.sentences.iter() {
                if is_first {
                    is_first = false;
                } else {
                    opening_line.extend(std::iter::repeat(' ').take(SPACE_PADDING));
                }

                sentence_idx_to_start_display_char_idx
                    .push(UnicodeWidthStr::width(&*opening_line));
                // keep the opening line on one row
                let flattened: Vec<&str> = sentence.split_whitespace().collect();
                opening_line.push_str(&flattened.join(" "));
                sentence_idx_to_end_display_char_idx.push(UnicodeWidthStr::width(&*opening_line));
            }
        }

        f.write_str(&opening_line)?;

        for label in self.include_labels.iter() {
            let (Some(&start_char_idx), Some(&end_char_idx)) = (
                sentence_idx_to_start_display_char_idx.get(label.range.0),
                sentence_idx_to_end_display_char_idx.get(label.range.1),
            ) else {
                continue;
            };

            f.write_char('\n')?;
            for _ in 0..start_char_idx {
                f.write_char(' ')?;
            }

            f.write_char('╰')?;

            let char_len = end_char_idx - start_char_idx;
            for _ in (start_char_idx + 1)..end_char_idx.saturating_sub(1) {
                f.write_char('─')?;
            }

            if char_len > 1 {
                f.write_char('╯')?;
            }

            f.write_str(&label.value)?;
        }

        Ok(())
    }
}

impl<'a> SentenceDisplay<'a> {
    pub fn new(sentences: &'a [String]) -> Self {
        SentenceDisplay {
            sentences,
            include_labels: Vec::new(),
        }
    }

    /// Underline one sentence with a label.
    pub fn label(&mut self, sentence_idx: usize, value: impl std::fmt::Debug) {
        self.label_range(sentence_idx, sentence_idx, value);
    }

    /// Underline an inclusive run of sentences with a label.
    pub fn label_range(&mut self, first: usize, last: usize, value: impl std::fmt::Debug) {
        self.include_labels.push(IncludedLabel {
            range: (first, last.max(first)),
            value: format!("{:?}", value),
        });
    }

    /// Takes self
    pub fn with(mut self, sentence_idx: usize, value: impl std::fmt::Debug) -> Self {
        self.label(sentence_idx, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sentences(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn underlines_single_sentences() {
        let sentences = sentences(&["No spikes.", "Seizure seen."]);
        let display = SentenceDisplay::new(&sentences)
            .with(0, "Negated")
            .with(1, "Concept");

        insta::assert_snapshot!(display, @r###"
        No spikes.  Seizure seen.
        ╰────────╯"Negated"
                    ╰───────────╯"Concept"
        "###);
    }

    #[test]
    fn flattens_inner_whitespace() {
        let sentences = sentences(&["Focal\n slowing."]);
        let mut display = SentenceDisplay::new(&sentences);
        display.label_range(0, 0, 1);

        insta::assert_snapshot!(display, @r###"
        Focal slowing.
        ╰────────────╯1
        "###);
    }

    #[test]
    fn labels_outside_the_sentences_are_skipped() {
        let sentences = sentences(&["A."]);
        let display = SentenceDisplay::new(&sentences).with(3, "Missing");
        assert_eq!(display.to_string(), "A.");
    }
}
