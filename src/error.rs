//! Crate error taxonomy
//!
//! Validation and format errors are local to the failing operation; I/O and
//! apply errors carry enough context for a user-facing message.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A profile field failed validation on construction or mutation.
    #[error("invalid {field}: {reason}")]
    Validation {
        field: &'static str,
        reason: String,
    },

    /// A contract violation in a store or applier operation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// Malformed import/export payload.
    #[error("malformed profile data: {0}")]
    Format(#[from] serde_json::Error),

    /// File or preference-store I/O failure.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The host boundary rejected or failed during document submission.
    #[error("failed to apply proxy configuration: {0}")]
    Apply(#[source] anyhow::Error),
}

impl Error {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Error::Validation {
            field,
            reason: reason.into(),
        }
    }

    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Io {
            path: path.into(),
            source,
        }
    }
}
