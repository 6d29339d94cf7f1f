//! Repository handle shared across callers.

use std::collections::BTreeSet;
use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use crate::areas::workspace::Workspace;
use crate::artifacts::filter::PathFilter;
use crate::artifacts::status::comparator::Comparator;
use crate::artifacts::status::status_result::StatusResult;
use crate::backend::{RepositoryState, VersionControlSystem};
use crate::cancel::CancellationToken;
use crate::errors::VcsError;

/// Stable identity of a repository instance: working-copy root plus the
/// owning backend's id. Survives process restarts, so it doubles as the
/// lifecycle cache key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RepositoryIdentity {
    pub root: PathBuf,
    pub vcs_id: String,
}

impl RepositoryIdentity {
    pub fn new(root: impl Into<PathBuf>, vcs_id: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            vcs_id: vcs_id.into(),
        }
    }
}

/// A working copy bound to one backend.
///
/// Exactly one live instance exists per identity; obtain and release
/// instances through [`VcsRegistry`](crate::areas::registry::VcsRegistry).
/// Status requests build their comparator state on the stack, so two
/// concurrent requests on the same instance never share mutable state.
pub struct Repository {
    vcs: Arc<dyn VersionControlSystem>,
    identity: RepositoryIdentity,
    state: Box<dyn RepositoryState>,
}

impl Repository {
    pub(crate) fn new(
        vcs: Arc<dyn VersionControlSystem>,
        identity: RepositoryIdentity,
        state: Box<dyn RepositoryState>,
    ) -> Self {
        Self {
            vcs,
            identity,
            state,
        }
    }

    pub fn root(&self) -> &Path {
        &self.identity.root
    }

    pub fn identity(&self) -> &RepositoryIdentity {
        &self.identity
    }

    pub fn vcs(&self) -> &Arc<dyn VersionControlSystem> {
        &self.vcs
    }

    /// Compute the working-copy status relative to the base revision.
    ///
    /// `filter_paths` restricts the computation to exact paths or directory
    /// prefixes; an empty slice or `["."]` means the whole tree. The result
    /// is a point-in-time snapshot: it never refreshes itself.
    pub fn status<S: AsRef<str>>(&self, filter_paths: &[S]) -> Result<StatusResult, VcsError> {
        self.status_with(filter_paths, &CancellationToken::new())
    }

    /// As [`status`](Self::status), stopping before the next candidate path
    /// once `cancel` fires.
    pub fn status_with<S: AsRef<str>>(
        &self,
        filter_paths: &[S],
        cancel: &CancellationToken,
    ) -> Result<StatusResult, VcsError> {
        // malformed filters are rejected before any scanning happens
        let filter = PathFilter::new(filter_paths)?;

        let workspace = Workspace::new(
            self.root().to_path_buf(),
            self.state.metadata_dirs(),
            self.state.ignore_rules()?,
        );
        let scan = workspace.scan_with(cancel)?;
        let base = self.state.base_tree()?;
        let index = self.state.index_snapshot()?;

        Comparator::new(&workspace, &base, &index, &filter).compute(&scan, cancel)
    }

    /// Paths matched by an ignore rule with no index entry shadowing them.
    pub fn ignored_not_in_index(&self) -> Result<BTreeSet<PathBuf>, VcsError> {
        let result = self.status::<&str>(&[])?;
        Ok(result.ignored_not_in_index().clone())
    }

    /// Release backend resources. Called by the registry on the last
    /// reference release, exactly once.
    pub(crate) fn dispose(&self) {
        debug!(
            root = %self.root().display(),
            vcs = self.identity.vcs_id,
            "disposing repository instance"
        );
        self.state.dispose();
    }
}

impl fmt::Debug for Repository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Repository")
            .field("identity", &self.identity)
            .field("vcs", &self.vcs.id())
            .finish()
    }
}
