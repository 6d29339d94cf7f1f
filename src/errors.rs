//! Error taxonomy for the status engine and the repository lifecycle.
//!
//! Per-entry scan failures never surface as errors: the scanner records the
//! affected path and the comparator classifies it as
//! [`PathStatus::Missing`](crate::PathStatus::Missing). Everything else
//! propagates to the caller unmodified, with no automatic retry.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error for status requests and lifecycle operations.
#[derive(Debug, Error)]
pub enum VcsError {
    /// No backend with the requested id has been registered.
    #[error("no version control backend registered with id '{0}'")]
    UnknownBackend(String),

    /// The backend exists but its native tooling is not available.
    #[error("version control backend '{0}' is not installed")]
    BackendUnavailable(String),

    /// The backend factory failed; no cache entry was created.
    #[error(transparent)]
    RepositoryCreation(#[from] RepositoryCreationError),

    /// A malformed filter path, rejected before any scanning begins.
    #[error(transparent)]
    Filter(#[from] FilterError),

    /// The scan could not run at all (as opposed to a per-entry failure).
    #[error(transparent)]
    Scan(#[from] ScanError),

    /// The caller cancelled the computation; it stopped before processing
    /// the next candidate path.
    #[error("status computation interrupted")]
    Interrupted,
}

/// Failure of a backend's repository factory.
#[derive(Debug, Error)]
#[error("failed to create repository instance at {root}: {reason}")]
pub struct RepositoryCreationError {
    pub root: PathBuf,
    pub reason: String,
}

impl RepositoryCreationError {
    pub fn new(root: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            reason: reason.into(),
        }
    }
}

/// A filter path the status request refuses to work with.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("filter path is empty")]
    Empty,

    #[error("filter path must be relative to the repository root: {0}")]
    Absolute(String),

    #[error("filter path may not traverse outside the repository: {0}")]
    Traversal(String),
}

/// Working-tree scan failure.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The working-tree root itself is gone; there is nothing to scan.
    #[error("working tree root does not exist: {0}")]
    RootNotFound(PathBuf),

    /// An individual path could not be read.
    #[error("failed to read {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A backend-supplied ignore pattern did not compile.
    #[error("invalid ignore pattern: {0}")]
    Pattern(String),
}
