//! Structured clinical report documents.
//!
//! Report ingestion (OCR, HL7 parsing, section splitting) happens upstream.
//! This module only holds what ingestion produced: the raw text and a tree of
//! named sections whose shape varies from one institution to the next.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::{ReportError, ReportResult};

/// Child sections keyed by name, as written by the source.
pub type SectionMap = BTreeMap<String, SectionTree>;

/// A node of a document's section tree.
///
/// Top-level sections are usually wrapped as `{ text = "..." }` while nested
/// sections under `"findings"` or `"narrative"` are bare strings. Both shapes
/// are accepted everywhere through [`SectionTree::as_text`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionTree {
    Text(String),
    Map(SectionMap),
}

impl SectionTree {
    pub fn text(text: impl Into<String>) -> Self {
        SectionTree::Text(text.into())
    }

    /// Build a map node from `(name, child)` pairs.
    pub fn map<I, S>(children: I) -> Self
    where
        I: IntoIterator<Item = (S, SectionTree)>,
        S: Into<String>,
    {
        SectionTree::Map(
            children
                .into_iter()
                .map(|(name, child)| (name.into(), child))
                .collect(),
        )
    }

    /// Text content of this node.
    ///
    /// A text leaf yields its text; a map yields its `"text"` child when that
    /// child is a leaf. Anything else has no text.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SectionTree::Text(text) => Some(text),
            SectionTree::Map(children) => match lookup(children, "text") {
                Some(SectionTree::Text(text)) => Some(text),
                _ => None,
            },
        }
    }

    /// Case-insensitive child lookup. Leaves have no children.
    pub fn child(&self, name: &str) -> Option<&SectionTree> {
        match self {
            SectionTree::Text(_) => None,
            SectionTree::Map(children) => lookup(children, name),
        }
    }

    /// Names of the direct children, in map order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        let children = match self {
            SectionTree::Map(children) => Some(children),
            SectionTree::Text(_) => None,
        };
        children
            .into_iter()
            .flat_map(|children| children.keys().map(String::as_str))
    }

    /// Iterate over `(name, child)` pairs. Leaves yield nothing.
    pub fn children(&self) -> impl Iterator<Item = (&str, &SectionTree)> {
        let children = match self {
            SectionTree::Map(children) => Some(children),
            SectionTree::Text(_) => None,
        };
        children
            .into_iter()
            .flat_map(|children| children.iter().map(|(k, v)| (k.as_str(), v)))
    }
}

/// Exact key first, then the first key equal ignoring case.
fn lookup<'a>(children: &'a SectionMap, name: &str) -> Option<&'a SectionTree> {
    children.get(name).or_else(|| {
        children
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, child)| child)
    })
}

/// One clinical report: raw text plus its section tree.
///
/// Documents are immutable once built; every heuristic reads the same value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    text: String,
    #[serde(default)]
    sections: SectionMap,
}

impl Document {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            id: None,
            text: text.into(),
            sections: SectionMap::new(),
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_section(mut self, name: impl Into<String>, section: SectionTree) -> Self {
        self.sections.insert(name.into(), section);
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The full report text as ingested.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sections(&self) -> &SectionMap {
        &self.sections
    }

    /// Case-insensitive top-level section lookup.
    pub fn section(&self, name: &str) -> Option<&SectionTree> {
        lookup(&self.sections, name)
    }

    pub fn has_section(&self, name: &str) -> bool {
        self.section(name).is_some()
    }

    /// Walk a path of section names from the top level.
    ///
    /// Returns `None` as soon as a step is missing or lands on a leaf.
    pub fn section_at(&self, path: &[&str]) -> Option<&SectionTree> {
        let (first, rest) = path.split_first()?;
        rest.iter()
            .try_fold(self.section(first)?, |node, name| node.child(name))
    }

    /// Text at a section path, see [`SectionTree::as_text`].
    pub fn text_at(&self, path: &[&str]) -> Option<&str> {
        self.section_at(path).and_then(SectionTree::as_text)
    }

    pub fn from_json_str(input: &str) -> ReportResult<Self> {
        serde_json::from_str(input).map_err(|e| ReportError::Parse {
            format: "json",
            message: e.to_string(),
        })
    }

    pub fn from_ron_str(input: &str) -> ReportResult<Self> {
        ron::from_str(input).map_err(|e| ReportError::Parse {
            format: "ron",
            message: e.to_string(),
        })
    }

    /// Load a single document, choosing the format from the file extension.
    pub fn load(path: &Path) -> ReportResult<Self> {
        let content = read(path)?;
        match DocumentFormat::from_path(path) {
            DocumentFormat::Ron => Self::from_ron_str(&content),
            DocumentFormat::Json | DocumentFormat::JsonLines => Self::from_json_str(&content),
        }
    }
}

/// Serialized corpus formats accepted by [`load_corpus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentFormat {
    /// A JSON array of documents.
    Json,
    /// One JSON document per line.
    JsonLines,
    /// A RON list of documents.
    Ron,
}

impl DocumentFormat {
    /// Guess from the extension; unknown extensions are read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("ron") => DocumentFormat::Ron,
            Some("jsonl") | Some("ndjson") => DocumentFormat::JsonLines,
            _ => DocumentFormat::Json,
        }
    }
}

/// Load every document in a corpus file.
pub fn load_corpus(path: &Path, format: DocumentFormat) -> ReportResult<Vec<Document>> {
    let content = read(path)?;
    parse_corpus(&content, format)
}

/// Parse a corpus already held in memory.
pub fn parse_corpus(content: &str, format: DocumentFormat) -> ReportResult<Vec<Document>> {
    match format {
        DocumentFormat::Json => serde_json::from_str(content).map_err(|e| ReportError::Parse {
            format: "json",
            message: e.to_string(),
        }),
        DocumentFormat::JsonLines => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(idx, line)| {
                serde_json::from_str(line).map_err(|e| ReportError::Parse {
                    format: "jsonl",
                    message: format!("line {}: {}", idx + 1, e),
                })
            })
            .collect(),
        DocumentFormat::Ron => ron::from_str(content).map_err(|e| ReportError::Parse {
            format: "ron",
            message: e.to_string(),
        }),
    }
}

fn read(path: &Path) -> ReportResult<String> {
    fs::read_to_string(path).map_err(|e| ReportError::Load {
        path: path.display().to_string(),
        message: e.to_string(),
    })
}
