//! CLI-level errors (wraps domain and config errors)

use thiserror::Error;

use crate::config::SettingsError;
use crate::domain::DomainError;

/// CLI errors are the top-level error type.
/// These are what get displayed to the user.
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("config error: {0}")]
    Settings(#[from] SettingsError),

    #[error("I/O error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid arguments: {0}")]
    InvalidArgs(String),
}

/// Result type for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

impl CliError {
    /// Create an I/O error with context.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Get the appropriate exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArgs(_) => crate::exitcode::USAGE,
            CliError::Settings(_) => crate::exitcode::CONFIG,
            CliError::Io { .. } => crate::exitcode::IOERR,
            CliError::Domain(e) => match e {
                DomainError::NameNotFound(_) | DomainError::NotFound { .. } => {
                    crate::exitcode::NOTFOUND
                }
                DomainError::FileNotFound(_) => crate::exitcode::NOINPUT,
                DomainError::InvalidLayout { .. }
                | DomainError::UnresolvedReference { .. }
                | DomainError::LinkWithChildren(_)
                | DomainError::DuplicateAlias { .. } => crate::exitcode::DATAERR,
                DomainError::NilArgument { .. } => crate::exitcode::SOFTWARE,
            },
        }
    }
}
