//! Application-level errors (wraps domain errors)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::DomainError;

/// Application errors wrap domain errors and add filesystem context.
#[derive(Error, Debug)]
pub enum ApplicationError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("filesystem error: {context}: {source}")]
    Filesystem {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot create {expected} {path}: path exists as a different type")]
    PathConflict {
        path: PathBuf,
        expected: &'static str,
    },

    #[error("config error: {message}")]
    Config { message: String },
}

impl ApplicationError {
    /// Underlying I/O error kind, if this is a filesystem failure.
    pub fn io_kind(&self) -> Option<std::io::ErrorKind> {
        match self {
            ApplicationError::Filesystem { source, .. } => Some(source.kind()),
            _ => None,
        }
    }
}

/// Result type for application layer operations.
pub type ApplicationResult<T> = Result<T, ApplicationError>;
