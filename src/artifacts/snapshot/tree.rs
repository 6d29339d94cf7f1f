use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{ContentId, EntryMode};

/// One path in the base-revision tree.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub content_id: ContentId,
    pub mode: EntryMode,
}

/// Flattened tree of the base revision, keyed by relative path.
///
/// [`BaseTree::empty`] models a repository with no base revision yet: in
/// that state every non-ignored working-tree file without an index entry is
/// untracked, and nothing can be modified or deleted relative to the base.
#[derive(Debug, Clone, Default)]
pub struct BaseTree {
    entries: BTreeMap<PathBuf, TreeEntry>,
}

impl BaseTree {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (PathBuf, TreeEntry)>) -> Self {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, path: &Path) -> Option<&TreeEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = (&PathBuf, &TreeEntry)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
