//! Labeling fixtures: one report plus the label each heuristic should give it.
//!
//! Fixtures are TOML:
//!
//! ```toml
//! title = "Normal study for age"
//! text = "EEG is normal for age."
//!
//! [sections.interpretation]
//! text = "EEG is normal for age."
//!
//! [sections.findings]
//! impression = "Normal EEG."
//!
//! [expect]
//! normal_interp_not_seizure = "negative"
//! ```
//!
//! Tables under `[sections]` become nested section maps; strings become text
//! leaves. Heuristics not named in `[expect]` are not checked.

use std::collections::BTreeMap;

use layered_reports::{Document, Polarity, SectionMap};
use serde::{Deserialize, Serialize};

use crate::{SpecError, SpecResult};

/// A parsed fixture file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LabelFixture {
    #[serde(default)]
    pub title: Option<String>,
    /// Raw report text, read by report-level heuristics.
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub sections: SectionMap,
    /// Expected label per heuristic name.
    #[serde(default)]
    pub expect: BTreeMap<String, Polarity>,
}

impl LabelFixture {
    /// The report this fixture describes, identified by `name`.
    pub fn document(&self, name: &str) -> Document {
        self.sections.iter().fold(
            Document::new(self.text.as_str()).with_id(name),
            |doc, (section, tree)| doc.with_section(section.as_str(), tree.clone()),
        )
    }

    pub fn expected(&self, heuristic: &str) -> Option<Polarity> {
        self.expect.get(heuristic).copied()
    }
}

/// Parse a fixture from TOML.
pub fn parse_fixture(content: &str) -> SpecResult<LabelFixture> {
    let fixture: LabelFixture =
        toml::from_str(content).map_err(|e| SpecError::from_toml(content, e))?;
    if fixture.expect.is_empty() {
        return Err(SpecError::Assertion {
            message: "fixture has no [expect] entries".to_string(),
        });
    }
    Ok(fixture)
}
