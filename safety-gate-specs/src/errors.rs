//! Error types for the fixture harness.

use thiserror::Error;

/// Errors that can occur while loading or checking fixtures.
#[derive(Debug, Error)]
pub enum SpecError {
    /// A fixture or expected-failures file is not valid TOML for its schema.
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    /// A fixture file or directory could not be read.
    #[error("failed to load fixture: {path}: {message}")]
    Load { path: String, message: String },

    /// A fixture is well-formed but describes an impossible expectation.
    #[error("invalid fixture: {message}")]
    Invalid { message: String },
}

impl SpecError {
    /// Convert a TOML error, locating it by line in `content`.
    pub(crate) fn from_toml(content: &str, error: toml::de::Error) -> Self {
        let line = error
            .span()
            .map(|span| content.get(..span.start).unwrap_or(content).matches('\n').count() + 1)
            .unwrap_or(0);
        SpecError::Parse {
            line,
            message: error.message().to_string(),
        }
    }
}

/// Result type for spec operations.
pub type SpecResult<T> = Result<T, SpecError>;
