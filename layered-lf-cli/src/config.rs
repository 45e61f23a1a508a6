//! Labeler configuration, read from TOML.
//!
//! ```toml
//! heuristics = ["abnormal_interp_negex_seizure", "seizure_section"]
//! output = "table"
//! input = "jsonl"
//! ```
//!
//! Every key is optional. An empty `heuristics` list runs everything.

use std::fs;
use std::path::Path;

use anyhow::Context;
use clap::ValueEnum;
use layered_reports::DocumentFormat;
use serde::{Deserialize, Serialize};

/// How label rows are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One JSON object per document, one per line.
    Json,
    /// Aligned columns of 1 / -1 / 0.
    Table,
}

impl Default for OutputFormat {
    fn default() -> Self {
        OutputFormat::Json
    }
}

/// Input corpus format, as accepted on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputFormat {
    Json,
    Jsonl,
    Ron,
}

impl From<InputFormat> for DocumentFormat {
    fn from(format: InputFormat) -> Self {
        match format {
            InputFormat::Json => DocumentFormat::Json,
            InputFormat::Jsonl => DocumentFormat::JsonLines,
            InputFormat::Ron => DocumentFormat::Ron,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelerConfig {
    /// Heuristics to run, by name. Empty runs all of them.
    pub heuristics: Vec<String>,
    pub output: OutputFormat,
    /// Corpus format; inferred from the file extension when unset.
    pub input: Option<InputFormat>,
}

impl LabelerConfig {
    /// Read a config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(path) => path,
            None => return Ok(Self::default()),
        };
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("invalid config {}", path.display()))
    }

    /// The corpus format for `input`, explicit setting first.
    pub fn document_format(&self, input: &Path) -> DocumentFormat {
        self.input
            .map(DocumentFormat::from)
            .unwrap_or_else(|| DocumentFormat::from_path(input))
    }
}
