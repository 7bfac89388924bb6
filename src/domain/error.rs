//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent violations of the tree grammar.
/// These are independent of filesystem concerns.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("malformed tree at line {line}: {reason}")]
    MalformedTree { line: usize, reason: String },

    #[error("duplicate entry at line {line}: '{name}' already exists in '{parent}'")]
    NameCollision {
        line: usize,
        name: String,
        parent: String,
    },
}

impl DomainError {
    pub fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            line,
            reason: reason.into(),
        }
    }

    /// 1-based input line the error points at.
    pub fn line(&self) -> usize {
        match self {
            DomainError::MalformedTree { line, .. } | DomainError::NameCollision { line, .. } => {
                *line
            }
        }
    }
}

/// Result type for parsing operations.
pub type DomainResult<T> = Result<T, DomainError>;
