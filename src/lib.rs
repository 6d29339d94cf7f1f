//! Pluggable version control abstraction.
//!
//! A host application registers one [`VersionControlSystem`] backend per
//! supported tool, obtains a shared [`Repository`] handle for a working-copy
//! path through the [`VcsRegistry`], and asks it for the status of the
//! working tree relative to the base revision, optionally restricted to a
//! subset of paths.
//!
//! # Key Types
//!
//! - [`VcsRegistry`] -- backend registration and the refcounted repository
//!   instance cache
//! - [`VersionControlSystem`] / [`RepositoryState`] -- the contract a
//!   concrete backend implements
//! - [`Repository`] -- a working copy bound to one backend; entry point for
//!   status requests
//! - [`StatusResult`] / [`PathStatus`] -- the immutable per-path outcome of
//!   one status computation
//! - [`PathFilter`] -- segment-aligned restriction of a status request to a
//!   set of paths or directory prefixes
//! - [`CancellationToken`] -- cooperative, entry-granularity interruption of
//!   an in-flight computation
//!
//! The crate defines no on-disk object format of its own: reading trees,
//! index snapshots and ignore rules is delegated to the backend, while the
//! filesystem scan and the three-way comparison live here.

pub mod areas;
pub mod artifacts;
pub mod backend;
pub mod cancel;
pub mod errors;

pub use areas::registry::VcsRegistry;
pub use areas::repository::{Repository, RepositoryIdentity};
pub use areas::workspace::{Workspace, WorktreeScan};
pub use artifacts::filter::PathFilter;
pub use artifacts::ignore::IgnoreRules;
pub use artifacts::snapshot::{
    BaseTree, ContentId, EntryMode, IndexEntry, IndexSnapshot, TreeEntry, WorkingTreeEntry,
};
pub use artifacts::status::{PathStatus, StatusResult};
pub use backend::{RepositoryEditor, RepositoryState, VersionControlSystem};
pub use cancel::CancellationToken;
pub use errors::{FilterError, RepositoryCreationError, ScanError, VcsError};
