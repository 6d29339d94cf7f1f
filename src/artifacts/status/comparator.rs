//! Tree-state comparator: the status computation engine.
//!
//! Builds the candidate set as the union of working-tree scan, index
//! snapshot and base tree, narrowed by the path filter, and classifies each
//! candidate from two pairwise comparisons (base vs index, index vs
//! working tree). Stack-local per status request; holds only borrows.

use std::collections::BTreeSet;
use std::io::ErrorKind;
use std::path::Path;

use derive_new::new;
use tracing::{debug, trace};

use crate::areas::workspace::{Workspace, WorktreeScan};
use crate::artifacts::filter::PathFilter;
use crate::artifacts::snapshot::{BaseTree, IndexEntry, IndexSnapshot, WorkingTreeEntry};
use crate::artifacts::status::path_status::{ChangePair, IndexChange, PathStatus, WorktreeChange};
use crate::artifacts::status::status_result::{StatusBuilder, StatusResult};
use crate::cancel::CancellationToken;
use crate::errors::{ScanError, VcsError};

#[derive(new)]
pub(crate) struct Comparator<'a> {
    workspace: &'a Workspace,
    base: &'a BaseTree,
    index: &'a IndexSnapshot,
    filter: &'a PathFilter,
}

impl<'a> Comparator<'a> {
    pub(crate) fn compute(
        &self,
        scan: &WorktreeScan,
        cancel: &CancellationToken,
    ) -> Result<StatusResult, VcsError> {
        let mut builder = StatusBuilder::new();
        let scanned: BTreeSet<&Path> = scan.entries.iter().map(|e| e.path.as_path()).collect();

        // working-tree entries first, in scan order
        for stat in &scan.entries {
            if cancel.is_cancelled() {
                return Err(VcsError::Interrupted);
            }
            if !self.filter.includes(&stat.path) {
                continue;
            }
            match self.index.get(&stat.path) {
                Some(entry) => {
                    let pair = ChangePair::new(
                        self.check_index_against_base(entry),
                        self.check_index_against_worktree(entry, Some(stat)),
                    );
                    self.record(&mut builder, entry, pair);
                }
                // dropped from the index but still committed: staged delete
                None if self.base.contains(&stat.path) => {
                    let pair = ChangePair::new(IndexChange::Deleted, WorktreeChange::None);
                    builder.record(stat.path.clone(), pair.classify());
                }
                None => builder.record(stat.path.clone(), PathStatus::Untracked),
            }
        }

        // index entries the walk never reached: deleted from disk, shadowed
        // by an ignore rule, or unreadable
        for entry in self.index.iter() {
            if cancel.is_cancelled() {
                return Err(VcsError::Interrupted);
            }
            if scanned.contains(entry.path.as_path()) || !self.filter.includes(&entry.path) {
                continue;
            }
            if scan.inaccessible.contains(&entry.path) {
                builder.record(entry.path.clone(), PathStatus::Missing);
                continue;
            }
            let worktree_change = match self.workspace.stat_entry(&entry.path) {
                Ok(stat) => self.check_index_against_worktree(entry, Some(&stat)),
                Err(ScanError::Io { ref source, .. }) if source.kind() == ErrorKind::NotFound => {
                    WorktreeChange::Deleted
                }
                Err(_) => {
                    builder.record(entry.path.clone(), PathStatus::Missing);
                    continue;
                }
            };
            let pair = ChangePair::new(self.check_index_against_base(entry), worktree_change);
            self.record(&mut builder, entry, pair);
        }

        // base entries with no index entry and no on-disk file
        for (path, _) in self.base.iter() {
            if cancel.is_cancelled() {
                return Err(VcsError::Interrupted);
            }
            if self.index.contains(path)
                || scanned.contains(path.as_path())
                || !self.filter.includes(path)
            {
                continue;
            }
            let pair = ChangePair::new(IndexChange::Deleted, WorktreeChange::Deleted);
            builder.record(path.clone(), pair.classify());
        }

        // ignored paths without an index entry are reported out of band
        for path in &scan.ignored {
            if self.filter.includes(path) && !self.index.contains(path) {
                builder.record_ignored(path.clone());
            }
        }

        // unreadable paths nobody tracks still surface as missing
        for path in &scan.inaccessible {
            if self.filter.includes(path) && !self.index.contains(path) {
                builder.record(path.clone(), PathStatus::Missing);
            }
        }

        let result = builder.finish();
        debug!(
            entries = result.len(),
            ignored = result.ignored_not_in_index().len(),
            "status computation complete"
        );
        Ok(result)
    }

    fn record(&self, builder: &mut StatusBuilder, entry: &IndexEntry, pair: ChangePair) {
        let status = if entry.conflicted {
            PathStatus::Conflicted
        } else {
            pair.classify()
        };
        if status != PathStatus::Unmodified {
            trace!(path = %entry.path.display(), %status, "classified");
        }
        builder.record(entry.path.clone(), status);
    }

    /// Staged change: the index entry against the base revision tree.
    fn check_index_against_base(&self, entry: &IndexEntry) -> IndexChange {
        match self.base.get(&entry.path) {
            None => IndexChange::Added,
            Some(base) if base.mode != entry.mode || base.content_id != entry.content_id => {
                IndexChange::Modified
            }
            Some(_) => IndexChange::None,
        }
    }

    /// Unstaged change: the index entry against the on-disk state. Falls
    /// back to hashing only when metadata alone cannot prove equality.
    fn check_index_against_worktree(
        &self,
        entry: &IndexEntry,
        stat: Option<&WorkingTreeEntry>,
    ) -> WorktreeChange {
        let Some(stat) = stat else {
            return WorktreeChange::Deleted;
        };
        if !entry.stat_match(stat) {
            return WorktreeChange::Modified;
        }
        if entry.times_match(stat) {
            return WorktreeChange::None;
        }
        match self.workspace.hash_entry(&entry.path, stat.mode) {
            Ok(content_id) if content_id == entry.content_id => WorktreeChange::None,
            Ok(_) => WorktreeChange::Modified,
            // vanished between scan and hash
            Err(_) => WorktreeChange::Deleted,
        }
    }
}
