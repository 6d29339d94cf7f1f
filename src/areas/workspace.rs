//! Working-tree scanner.
//!
//! Walks the filesystem under a repository root in a deterministic
//! depth-first order, skipping backend metadata directories and recording
//! ignored and unreadable paths instead of dropping or failing on them.

use std::collections::BTreeSet;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};

use is_executable::IsExecutable;
use tracing::{debug, trace};
use walkdir::WalkDir;

use crate::artifacts::ignore::IgnoreRules;
use crate::artifacts::snapshot::{ContentId, EntryMode, WorkingTreeEntry};
use crate::cancel::CancellationToken;
use crate::errors::{ScanError, VcsError};

/// Filesystem view of one working tree.
///
/// Constructed fresh for every status computation; holds no mutable state,
/// so concurrent computations never interfere through it.
pub struct Workspace {
    root: PathBuf,
    metadata_dirs: Vec<String>,
    ignores: IgnoreRules,
}

/// Outcome of one scan pass.
#[derive(Debug, Default)]
pub struct WorktreeScan {
    /// Regular files and symlinks, in the order the walk produced them.
    pub entries: Vec<WorkingTreeEntry>,
    /// Paths matching an ignore rule: individual files, or whole pruned
    /// directories.
    pub ignored: BTreeSet<PathBuf>,
    /// Paths the scanner could not read. Recorded, never fatal.
    pub inaccessible: BTreeSet<PathBuf>,
}

impl Workspace {
    pub fn new(root: PathBuf, metadata_dirs: Vec<String>, ignores: IgnoreRules) -> Self {
        Self {
            root,
            metadata_dirs,
            ignores,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Walk the working tree. Restartable: every call rescans from the
    /// root and observes the filesystem as of that moment.
    pub fn scan(&self) -> Result<WorktreeScan, VcsError> {
        self.scan_with(&CancellationToken::new())
    }

    /// As [`scan`](Self::scan), stopping before the next entry once
    /// `cancel` fires.
    pub fn scan_with(&self, cancel: &CancellationToken) -> Result<WorktreeScan, VcsError> {
        if !self.root.exists() {
            return Err(ScanError::RootNotFound(self.root.clone()).into());
        }

        let mut scan = WorktreeScan::default();
        let mut walker = WalkDir::new(&self.root).sort_by_file_name().into_iter();

        while let Some(entry) = walker.next() {
            if cancel.is_cancelled() {
                return Err(VcsError::Interrupted);
            }

            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if let Some(path) = err.path() {
                        let rel = self.relative(path);
                        trace!(path = %rel.display(), "unreadable entry recorded");
                        scan.inaccessible.insert(rel);
                    }
                    continue;
                }
            };

            if entry.depth() == 0 {
                continue; // the root itself
            }
            let rel = self.relative(entry.path());

            if entry.file_type().is_dir() {
                if self.is_metadata_dir(&rel) {
                    walker.skip_current_dir();
                    continue;
                }
                if self.ignores.is_ignored(&rel, true) {
                    scan.ignored.insert(rel);
                    walker.skip_current_dir();
                }
                continue;
            }

            if self.ignores.is_ignored(&rel, false) {
                scan.ignored.insert(rel);
                continue;
            }

            match self.stat_entry_at(entry.path(), &rel) {
                Ok(stat) => scan.entries.push(stat),
                Err(_) => {
                    scan.inaccessible.insert(rel);
                }
            }
        }

        debug!(
            root = %self.root.display(),
            entries = scan.entries.len(),
            ignored = scan.ignored.len(),
            inaccessible = scan.inaccessible.len(),
            "working tree scan complete"
        );
        Ok(scan)
    }

    /// Stat one path on demand. Used for tracked files the walk never
    /// reached, e.g. inside a pruned ignored directory.
    pub fn stat_entry(&self, rel: &Path) -> Result<WorkingTreeEntry, ScanError> {
        self.stat_entry_at(&self.root.join(rel), rel)
    }

    /// Fingerprint the current content of `rel`. Symlinks hash the link
    /// target, not the dereferenced content.
    pub fn hash_entry(&self, rel: &Path, mode: EntryMode) -> Result<ContentId, ScanError> {
        let full = self.root.join(rel);
        if mode.is_symlink() {
            let target = std::fs::read_link(&full).map_err(|source| ScanError::Io {
                path: rel.to_path_buf(),
                source,
            })?;
            Ok(ContentId::of_bytes(target.as_os_str().as_bytes()))
        } else {
            let data = std::fs::read(&full).map_err(|source| ScanError::Io {
                path: rel.to_path_buf(),
                source,
            })?;
            Ok(ContentId::of_bytes(&data))
        }
    }

    fn stat_entry_at(&self, full: &Path, rel: &Path) -> Result<WorkingTreeEntry, ScanError> {
        let metadata = std::fs::symlink_metadata(full).map_err(|source| ScanError::Io {
            path: rel.to_path_buf(),
            source,
        })?;

        let mode = if metadata.file_type().is_symlink() {
            EntryMode::Symlink
        } else if full.is_executable() {
            EntryMode::Executable
        } else {
            EntryMode::Regular
        };

        Ok(WorkingTreeEntry::new(
            rel.to_path_buf(),
            mode,
            metadata.size(),
            metadata.mtime(),
            metadata.mtime_nsec(),
        ))
    }

    fn is_metadata_dir(&self, rel: &Path) -> bool {
        rel.file_name()
            .map(|name| self.metadata_dirs.iter().any(|dir| name == OsStr::new(dir)))
            .unwrap_or(false)
    }

    fn relative(&self, path: &Path) -> PathBuf {
        path.strip_prefix(&self.root)
            .map(Path::to_path_buf)
            .unwrap_or_else(|_| path.to_path_buf())
    }
}
