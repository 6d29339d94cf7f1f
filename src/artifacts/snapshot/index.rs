use derive_new::new;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use super::{ContentId, EntryMode, WorkingTreeEntry};

/// A staged entry: what the index claims the next commit will contain for
/// one path.
///
/// The cached stat fields let the comparator skip hashing when the on-disk
/// metadata still matches what was recorded at staging time.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IndexEntry {
    /// Path relative to the working-tree root.
    pub path: PathBuf,
    /// Fingerprint of the staged content.
    pub content_id: ContentId,
    pub mode: EntryMode,
    /// Size recorded at staging time; zero means "unknown, always verify".
    pub size: u64,
    pub mtime: i64,
    pub mtime_nsec: i64,
    /// Unresolved merge conflict recorded by the backend for this path.
    pub conflicted: bool,
}

impl IndexEntry {
    /// Cheap inequality proof: a size or mode mismatch means the on-disk
    /// content cannot equal the staged content.
    pub fn stat_match(&self, stat: &WorkingTreeEntry) -> bool {
        (self.size == 0 || self.size == stat.size) && self.mode == stat.mode
    }

    /// Unchanged timestamps mean the staged fingerprint is still valid for
    /// the on-disk file; no hashing required.
    pub fn times_match(&self, stat: &WorkingTreeEntry) -> bool {
        self.mtime == stat.mtime && self.mtime_nsec == stat.mtime_nsec
    }
}

/// Read-only snapshot of the staging index at the moment a status request
/// was issued.
#[derive(Debug, Clone, Default)]
pub struct IndexSnapshot {
    entries: BTreeMap<PathBuf, IndexEntry>,
}

impl IndexSnapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = IndexEntry>) -> Self {
        Self {
            entries: entries
                .into_iter()
                .map(|entry| (entry.path.clone(), entry))
                .collect(),
        }
    }

    pub fn get(&self, path: &Path) -> Option<&IndexEntry> {
        self.entries.get(path)
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.entries.contains_key(path)
    }

    /// Entries in path order.
    pub fn iter(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn entry(path: &str, content: &[u8], size: u64, mtime: i64) -> IndexEntry {
        IndexEntry::new(
            PathBuf::from(path),
            ContentId::of_bytes(content),
            EntryMode::Regular,
            size,
            mtime,
            0,
            false,
        )
    }

    fn stat(path: &str, size: u64, mtime: i64) -> WorkingTreeEntry {
        WorkingTreeEntry::new(PathBuf::from(path), EntryMode::Regular, size, mtime, 0)
    }

    #[test]
    fn stat_match_rejects_size_change() {
        let staged = entry("a.txt", b"abc", 3, 10);
        assert!(!staged.stat_match(&stat("a.txt", 4, 10)));
    }

    #[test]
    fn stat_match_rejects_mode_change() {
        let staged = entry("a.txt", b"abc", 3, 10);
        let mut on_disk = stat("a.txt", 3, 10);
        on_disk.mode = EntryMode::Executable;
        assert!(!staged.stat_match(&on_disk));
    }

    #[test]
    fn zero_size_entry_matches_any_size() {
        let staged = entry("a.txt", b"abc", 0, 10);
        assert!(staged.stat_match(&stat("a.txt", 999, 10)));
    }

    #[test]
    fn times_match_requires_nanosecond_equality() {
        let staged = entry("a.txt", b"abc", 3, 10);
        assert!(staged.times_match(&stat("a.txt", 3, 10)));
        assert!(!staged.times_match(&stat("a.txt", 3, 11)));

        let mut nsec_off = stat("a.txt", 3, 10);
        nsec_off.mtime_nsec = 1;
        assert!(!staged.times_match(&nsec_off));
    }

    #[test]
    fn snapshot_iterates_in_path_order() {
        let snapshot = IndexSnapshot::from_entries([
            entry("z.txt", b"z", 1, 0),
            entry("a.txt", b"a", 1, 0),
            entry("m/n.txt", b"n", 1, 0),
        ]);

        let paths: Vec<_> = snapshot.iter().map(|e| e.path.clone()).collect();
        assert_eq!(
            paths,
            vec![
                PathBuf::from("a.txt"),
                PathBuf::from("m/n.txt"),
                PathBuf::from("z.txt")
            ]
        );
    }
}
