//! CLI-level errors (wraps infrastructure errors)

use std::io::ErrorKind;

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::infrastructure::InfraError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Infra(#[from] InfraError),

    #[error("{0}")]
    Usage(String),
}

impl From<ApplicationError> for CliError {
    fn from(e: ApplicationError) -> Self {
        CliError::Infra(InfraError::Application(e))
    }
}

impl From<DomainError> for CliError {
    fn from(e: DomainError) -> Self {
        CliError::from(ApplicationError::Domain(e))
    }
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Usage(_) => crate::exitcode::USAGE,
            CliError::Infra(e) => match e {
                InfraError::InputNotFound(_) | InfraError::NotAFile(_) => {
                    crate::exitcode::NOINPUT
                }
                InfraError::Io { .. } => crate::exitcode::IOERR,
                InfraError::Application(app) => match app {
                    ApplicationError::Domain(_) => crate::exitcode::DATAERR,
                    ApplicationError::Config { .. } => crate::exitcode::CONFIG,
                    ApplicationError::PathConflict { .. } => crate::exitcode::CANTCREAT,
                    ApplicationError::Filesystem { source, .. } => match source.kind() {
                        ErrorKind::PermissionDenied => crate::exitcode::NOPERM,
                        _ => crate::exitcode::CANTCREAT,
                    },
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn given_domain_error_when_mapping_then_data_error_code() {
        let err = CliError::from(DomainError::malformed(2, "depth jump"));
        assert_eq!(err.exit_code(), crate::exitcode::DATAERR);
        assert_eq!(err.to_string(), "malformed tree at line 2: depth jump");
    }

    #[test]
    fn given_permission_denied_when_mapping_then_noperm_code() {
        let err = CliError::from(ApplicationError::Filesystem {
            context: "create directory: /root/x".into(),
            source: std::io::Error::from(ErrorKind::PermissionDenied),
        });
        assert_eq!(err.exit_code(), crate::exitcode::NOPERM);
    }

    #[test]
    fn given_missing_input_when_mapping_then_noinput_code() {
        let err = CliError::from(InfraError::InputNotFound(PathBuf::from("tree.txt")));
        assert_eq!(err.exit_code(), crate::exitcode::NOINPUT);
    }

    #[test]
    fn given_usage_error_when_mapping_then_usage_code() {
        assert_eq!(
            CliError::Usage("empty".into()).exit_code(),
            crate::exitcode::USAGE
        );
    }
}
