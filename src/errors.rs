//! Error types for report labeling.
//!
//! Structural absence (a missing section, a nested key of the wrong shape, an
//! empty resolved text) is never an error here; it surfaces as
//! [`Polarity::Abstain`](crate::Polarity::Abstain) or an empty string.

use thiserror::Error;

/// Errors that can occur while loading or labeling reports.
#[derive(Debug, Error)]
pub enum ReportError {
    /// A named pattern failed to compile.
    #[error("invalid pattern `{name}`: {source}")]
    Pattern {
        name: String,
        #[source]
        source: regex::Error,
    },

    /// The sentence segmenter rejected the text of a document.
    #[error("sentence segmentation failed: {message}")]
    Segmentation { message: String },

    /// Error reading a document file.
    #[error("failed to load document: {path}: {message}")]
    Load { path: String, message: String },

    /// Error decoding a document from its serialized form.
    #[error("failed to parse {format} document: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },
}

impl ReportError {
    pub(crate) fn pattern(name: impl Into<String>, source: regex::Error) -> Self {
        ReportError::Pattern {
            name: name.into(),
            source,
        }
    }
}

/// Result type for report operations.
pub type ReportResult<T> = Result<T, ReportError>;
