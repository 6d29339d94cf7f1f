use derive_new::new;
use std::path::PathBuf;

use super::EntryMode;

/// A single entry produced by a working-tree scan.
///
/// Carries only metadata; content is fingerprinted lazily, and only when
/// size, mode and timestamps leave the comparison ambiguous. Transient:
/// valid for the status computation that requested the scan, nothing
/// beyond it.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct WorkingTreeEntry {
    /// Path relative to the working-tree root.
    pub path: PathBuf,
    pub mode: EntryMode,
    /// Size in bytes; for symlinks, the length of the target path.
    pub size: u64,
    /// Modification time (seconds since Unix epoch).
    pub mtime: i64,
    /// Modification time nanoseconds.
    pub mtime_nsec: i64,
}
