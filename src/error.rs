//! Error types for the project host.

use std::path::PathBuf;

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T, E = HostError> = std::result::Result<T, E>;

/// Boxed error raised by an analysis engine.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// What already occupies a path involved in a structural conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    File,
    Directory,
}

impl EntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::File => "file",
            Self::Directory => "directory",
        }
    }
}

impl std::fmt::Display for EntryKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced by every layer of the host.
#[derive(Debug, Error)]
pub enum HostError {
    /// No content producer or directory is registered at the path.
    #[error("'{path}' does not exist")]
    NotFound { path: String },

    /// A path was used both as a file and as a directory.
    #[error("cannot use '{name}' at '{path}': a {existing} already exists there")]
    StructuralConflict {
        name: String,
        path: String,
        existing: EntryKind,
    },

    /// The namespace root cannot be detached.
    #[error("cannot remove the namespace root")]
    RootRemoval,

    /// The configuration source unit could not be parsed.
    #[error("failed to parse configuration '{path}': {source}")]
    ConfigParse {
        path: String,
        #[source]
        source: ConfigError,
    },

    /// Reading an on-disk content source failed.
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An include or exclude pattern of a directory listing is not a valid glob.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern { pattern: String, message: String },

    /// Raised by the analysis engine; passed through untouched.
    #[error(transparent)]
    Engine(EngineError),
}

impl HostError {
    /// Create a not-found error.
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a structural conflict error.
    pub fn conflict(name: impl Into<String>, path: impl Into<String>, existing: EntryKind) -> Self {
        Self::StructuralConflict {
            name: name.into(),
            path: path.into(),
            existing,
        }
    }

    /// Wrap an engine error.
    pub fn engine(error: impl Into<EngineError>) -> Self {
        Self::Engine(error.into())
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    pub fn is_structural_conflict(&self) -> bool {
        matches!(self, Self::StructuralConflict { .. })
    }
}

/// Syntax error reported by a configuration parser.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} (line {line}, column {column})")]
pub struct ConfigError {
    pub message: String,
    pub line: usize,
    pub column: usize,
}

impl ConfigError {
    pub fn new(message: impl Into<String>, line: usize, column: usize) -> Self {
        Self {
            message: message.into(),
            line,
            column,
        }
    }
}
