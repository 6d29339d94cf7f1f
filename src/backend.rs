//! Backend contract implemented by concrete version control systems.
//!
//! A backend is selected at registration time by its stable id; the core
//! never inspects a backend's on-disk object format. Backends hand the core
//! three things per repository: the metadata directories to skip while
//! scanning, the ignore rules in effect, and flattened snapshots of the
//! base-revision tree and the staging index.

use std::path::Path;

use crate::areas::repository::Repository;
use crate::artifacts::ignore::IgnoreRules;
use crate::artifacts::snapshot::{BaseTree, IndexSnapshot};
use crate::errors::{RepositoryCreationError, VcsError};

/// A pluggable version control backend.
pub trait VersionControlSystem: Send + Sync {
    /// Stable identifier of the backend.
    ///
    /// This identifier ends up in host configuration files and in repository
    /// cache keys, so it must not change between releases.
    fn id(&self) -> &str;

    /// Human-readable display name.
    fn name(&self) -> &str;

    /// Whether the backend's native tooling or libraries are available.
    ///
    /// A backend must opt in explicitly; requesting a repository from a
    /// backend that answers `false` fails with
    /// [`VcsError::BackendUnavailable`].
    fn is_installed(&self) -> bool {
        false
    }

    /// Build the backend-specific state for a repository rooted at `root`.
    ///
    /// Called by the registry on a cache miss. A failure propagates to the
    /// caller and leaves no cache entry behind.
    fn create_repository_instance(
        &self,
        root: &Path,
    ) -> Result<Box<dyn RepositoryState>, RepositoryCreationError>;

    /// Editor capability for configuring a repository. The editor surface
    /// itself belongs to the host application.
    fn create_repository_editor(&self, repository: &Repository) -> Box<dyn RepositoryEditor>;
}

/// Backend-specific diff state owned by a [`Repository`].
///
/// Snapshot methods are invoked once per status request; each returns the
/// state as of that moment and is never retained across requests.
pub trait RepositoryState: Send + Sync {
    /// Backend-private metadata directories the scanner must skip
    /// (for a Git-like backend, `.git`).
    fn metadata_dirs(&self) -> Vec<String> {
        Vec::new()
    }

    /// Ignore rules in effect for the working tree.
    fn ignore_rules(&self) -> Result<IgnoreRules, VcsError> {
        Ok(IgnoreRules::none())
    }

    /// Flattened tree of the base revision. An empty tree models a
    /// repository with no base revision yet.
    fn base_tree(&self) -> Result<BaseTree, VcsError>;

    /// Read-only snapshot of the staging index.
    fn index_snapshot(&self) -> Result<IndexSnapshot, VcsError>;

    /// Release backend resources. Called exactly once, when the last
    /// outstanding reference to the repository is released.
    fn dispose(&self) {}
}

/// Marker capability for repository configuration editors.
pub trait RepositoryEditor: Send {}
