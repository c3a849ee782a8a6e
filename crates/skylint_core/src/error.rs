//! Linter error types.

use thiserror::Error;

/// Errors that can occur while staging, running, or extracting.
#[derive(Debug, Error)]
pub enum LintError {
    /// A required input path is missing or malformed. Surfaced before any
    /// process is spawned.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The validator executable does not exist or could not be spawned.
    /// Configuration problem, never retried.
    #[error("Execution error: {message}")]
    Execution {
        /// What failed.
        message: String,
        /// The spawn failure, when one occurred.
        #[source]
        source: Option<std::io::Error>,
    },

    /// Staged filesystem creation, symlink, or removal failure.
    #[error("Staging error: {0}")]
    Staging(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LintError {
    /// Creates an invalid-input error.
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Creates an execution error without an underlying I/O cause.
    pub fn execution(message: impl Into<String>) -> Self {
        Self::Execution {
            message: message.into(),
            source: None,
        }
    }

    /// Creates an execution error wrapping a spawn failure.
    pub fn spawn(message: impl Into<String>, source: std::io::Error) -> Self {
        Self::Execution {
            message: message.into(),
            source: Some(source),
        }
    }

    /// Creates a staging error.
    pub fn staging(message: impl Into<String>) -> Self {
        Self::Staging(message.into())
    }
}
