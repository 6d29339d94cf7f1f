use std::collections::{BTreeSet, HashMap};
use std::path::{Path, PathBuf};

use super::path_status::PathStatus;

/// Immutable outcome of one status computation.
///
/// Entry order is scan order; a path appears at most once. Paths absent
/// from the result are unmodified (or excluded by the filter). The result
/// never refreshes itself -- after mutating the working tree, ask the
/// repository again.
#[derive(Debug, Clone, Default)]
pub struct StatusResult {
    entries: Vec<(PathBuf, PathStatus)>,
    by_path: HashMap<PathBuf, usize>,
    ignored_not_in_index: BTreeSet<PathBuf>,
}

impl StatusResult {
    /// Classified paths in scan order.
    pub fn iter(&self) -> impl Iterator<Item = (&Path, PathStatus)> {
        self.entries
            .iter()
            .map(|(path, status)| (path.as_path(), *status))
    }

    /// Classification for `path`. Unlisted paths are
    /// [`PathStatus::Unmodified`]; paths in the ignored set answer
    /// [`PathStatus::Ignored`].
    pub fn status_of(&self, path: &Path) -> PathStatus {
        if let Some(&position) = self.by_path.get(path) {
            return self.entries[position].1;
        }
        if self.ignored_not_in_index.contains(path) {
            return PathStatus::Ignored;
        }
        PathStatus::Unmodified
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.by_path.contains_key(path)
    }

    /// Paths matched by an ignore rule with no index entry shadowing the
    /// rule. Kept out of the main mapping.
    pub fn ignored_not_in_index(&self) -> &BTreeSet<PathBuf> {
        &self.ignored_not_in_index
    }

    /// Paths carrying the given classification, in scan order.
    pub fn paths_with(&self, status: PathStatus) -> impl Iterator<Item = &Path> {
        self.entries
            .iter()
            .filter(move |(_, s)| *s == status)
            .map(|(path, _)| path.as_path())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// No changed, untracked, missing or conflicted paths at all.
    pub fn is_clean(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Accumulates classifications during one comparator run.
#[derive(Debug, Default)]
pub(crate) struct StatusBuilder {
    entries: Vec<(PathBuf, PathStatus)>,
    by_path: HashMap<PathBuf, usize>,
    ignored_not_in_index: BTreeSet<PathBuf>,
}

impl StatusBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Record `status` for `path`. Unmodified paths are dropped. The first
    /// insertion fixes the position; re-recording overwrites in place, so a
    /// path never appears twice.
    pub(crate) fn record(&mut self, path: PathBuf, status: PathStatus) {
        if status == PathStatus::Unmodified {
            return;
        }
        match self.by_path.get(&path) {
            Some(&position) => self.entries[position].1 = status,
            None => {
                self.by_path.insert(path.clone(), self.entries.len());
                self.entries.push((path, status));
            }
        }
    }

    pub(crate) fn record_ignored(&mut self, path: PathBuf) {
        self.ignored_not_in_index.insert(path);
    }

    pub(crate) fn finish(self) -> StatusResult {
        StatusResult {
            entries: self.entries,
            by_path: self.by_path,
            ignored_not_in_index: self.ignored_not_in_index,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn entries_keep_insertion_order() {
        let mut builder = StatusBuilder::new();
        builder.record(PathBuf::from("z.txt"), PathStatus::Untracked);
        builder.record(PathBuf::from("a.txt"), PathStatus::Modified);
        builder.record(PathBuf::from("m.txt"), PathStatus::Deleted);

        let result = builder.finish();
        let paths: Vec<_> = result.iter().map(|(path, _)| path.to_path_buf()).collect();

        assert_eq!(
            paths,
            vec![
                PathBuf::from("z.txt"),
                PathBuf::from("a.txt"),
                PathBuf::from("m.txt")
            ]
        );
    }

    #[test]
    fn re_recording_overwrites_in_place() {
        let mut builder = StatusBuilder::new();
        builder.record(PathBuf::from("a.txt"), PathStatus::Deleted);
        builder.record(PathBuf::from("b.txt"), PathStatus::Untracked);
        builder.record(PathBuf::from("a.txt"), PathStatus::Missing);

        let result = builder.finish();

        assert_eq!(result.len(), 2);
        assert_eq!(result.status_of(Path::new("a.txt")), PathStatus::Missing);
        let first = result.iter().next().map(|(path, _)| path.to_path_buf());
        assert_eq!(first, Some(PathBuf::from("a.txt")));
    }

    #[test]
    fn unmodified_is_never_stored() {
        let mut builder = StatusBuilder::new();
        builder.record(PathBuf::from("a.txt"), PathStatus::Unmodified);

        let result = builder.finish();

        assert!(result.is_clean());
        assert_eq!(result.status_of(Path::new("a.txt")), PathStatus::Unmodified);
    }

    #[test]
    fn ignored_paths_answer_ignored_but_stay_out_of_the_mapping() {
        let mut builder = StatusBuilder::new();
        builder.record_ignored(PathBuf::from("d.log"));

        let result = builder.finish();

        assert!(result.is_empty());
        assert!(!result.contains(Path::new("d.log")));
        assert_eq!(result.status_of(Path::new("d.log")), PathStatus::Ignored);
        assert!(result.ignored_not_in_index().contains(Path::new("d.log")));
    }

    #[test]
    fn paths_with_filters_by_status() {
        let mut builder = StatusBuilder::new();
        builder.record(PathBuf::from("a.txt"), PathStatus::Modified);
        builder.record(PathBuf::from("b.txt"), PathStatus::Untracked);
        builder.record(PathBuf::from("c.txt"), PathStatus::Modified);

        let result = builder.finish();
        let modified: Vec<_> = result.paths_with(PathStatus::Modified).collect();

        assert_eq!(modified, vec![Path::new("a.txt"), Path::new("c.txt")]);
    }
}
