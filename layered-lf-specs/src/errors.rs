//! Error types for the fixture harness.

use thiserror::Error;

/// Errors that can occur while loading or checking fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// Error parsing a fixture or expected-failures file.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// Error reading a fixture file or directory.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A fixture is well-formed but cannot be checked.
    #[error("assertion failed: {message}")]
    Assertion { message: String },
}

impl SpecError {
    /// Convert a TOML error, locating it by line in `source`.
    pub(crate) fn from_toml(source: &str, error: toml::de::Error) -> Self {
        let line = error
            .span()
            .and_then(|span| source.get(..span.start))
            .map(|before| before.matches('\n').count() + 1)
            .unwrap_or(0);
        SpecError::Parse {
            line,
            message: error.message().to_string(),
        }
    }
}

/// Result type for fixture operations.
pub type SpecResult<T> = Result<T, SpecError>;
