//! Domain-level errors (no external dependencies)

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::domain::arena::NodeId;

/// Which argument of a resolver operation was absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Root,
    Target,
    File1,
    File2,
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Argument::Root => "root",
            Argument::Target => "target",
            Argument::File1 => "file1",
            Argument::File2 => "file2",
        };
        f.write_str(name)
    }
}

/// Domain errors represent violations of the namespace model.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("file cannot be nil: {argument}")]
    NilArgument { argument: Argument },

    #[error("file not found: {target:?} is not below the given root")]
    NotFound { target: NodeId },

    #[error("no node named '{0}' is reachable from the root")]
    NameNotFound(String),

    #[error("layout file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("invalid layout{}: {message}", .path.as_ref().map(|p| format!(" in {}", p.display())).unwrap_or_default())]
    InvalidLayout {
        path: Option<PathBuf>,
        message: String,
    },

    #[error("'{referenced_by}' refers to unknown node '{name}'")]
    UnresolvedReference { name: String, referenced_by: String },

    #[error("soft link '{0}' cannot hold children or aliases")]
    LinkWithChildren(String),

    #[error("alias '{alias}' already defined on '{owner}'")]
    DuplicateAlias { owner: String, alias: String },
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
