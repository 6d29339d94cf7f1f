//! Snapshot value types fed into a status computation.
//!
//! Three inputs meet in the comparator, all expressed with the types here:
//!
//! - the base-revision tree ([`BaseTree`] of [`TreeEntry`])
//! - the staging index ([`IndexSnapshot`] of [`IndexEntry`])
//! - the working-tree scan ([`WorkingTreeEntry`], produced by the scanner)
//!
//! All of them are transient per-request values; none is persisted by this
//! crate.

mod content_id;
mod entry_mode;
mod index;
mod tree;
mod worktree;

pub use content_id::ContentId;
pub use entry_mode::EntryMode;
pub use index::{IndexEntry, IndexSnapshot};
pub use tree::{BaseTree, TreeEntry};
pub use worktree::WorkingTreeEntry;
