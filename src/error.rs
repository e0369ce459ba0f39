//! Error types shared across the notebook
//!
//! Nothing here is fatal: callers report the error and keep the session usable.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors produced by session mutations and persistence.
#[derive(Error, Debug)]
pub enum NotebookError {
    /// A required form field was empty after trimming
    #[error("Please specify at least {field}")]
    Validation { field: &'static str },

    /// Every report identifier has been handed out
    #[error("No report identifiers left in this session")]
    IdsExhausted,

    /// File could not be read or written
    #[error("IO error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Persisted content was not a well-formed session
    #[error("Malformed session file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl NotebookError {
    /// Creates a validation error naming the missing field(s)
    pub fn validation(field: &'static str) -> Self {
        Self::Validation { field }
    }

    /// Creates an IO error for `path`
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Creates a parse error for `path`
    pub fn parse(path: impl AsRef<Path>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    pub fn is_ids_exhausted(&self) -> bool {
        matches!(self, Self::IdsExhausted)
    }

    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. })
    }

    pub fn is_parse(&self) -> bool {
        matches!(self, Self::Parse { .. })
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, NotebookError>;
