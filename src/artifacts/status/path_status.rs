use std::fmt;

/// Classification of one path relative to the base revision, the index and
/// the working tree. Exactly one classification per path per computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PathStatus {
    /// No difference across all three states. Never stored in a result;
    /// unmodified paths are simply absent.
    Unmodified,
    /// Staged in the index, absent from the base revision.
    Added,
    /// Content or mode differs, staged or unstaged.
    Modified,
    /// Present in index or base but gone from the working tree (or dropped
    /// from the index while still committed).
    Deleted,
    /// Staged as added but never materialized on disk, or unreadable
    /// during the scan.
    Missing,
    /// On disk, but unknown to both base and index and not ignored.
    Untracked,
    /// Covered by an ignore rule. Reported out of band, never in the main
    /// mapping.
    Ignored,
    /// Unresolved merge conflict, or divergent staged and unstaged changes
    /// on the same path.
    Conflicted,
}

impl PathStatus {
    /// Porcelain-style short code for compact rendering and logs.
    pub fn short_code(&self) -> &'static str {
        match self {
            PathStatus::Unmodified => "  ",
            PathStatus::Added => "A",
            PathStatus::Modified => "M",
            PathStatus::Deleted => "D",
            PathStatus::Missing => "!",
            PathStatus::Untracked => "??",
            PathStatus::Ignored => "!!",
            PathStatus::Conflicted => "U",
        }
    }
}

impl fmt::Display for PathStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PathStatus::Unmodified => "unmodified",
            PathStatus::Added => "added",
            PathStatus::Modified => "modified",
            PathStatus::Deleted => "deleted",
            PathStatus::Missing => "missing",
            PathStatus::Untracked => "untracked",
            PathStatus::Ignored => "ignored",
            PathStatus::Conflicted => "conflicted",
        };
        write!(f, "{name}")
    }
}

/// Staged change: the index entry relative to the base revision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum IndexChange {
    #[default]
    None,
    Added,
    Modified,
    Deleted,
}

/// Unstaged change: the working tree relative to the index entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum WorktreeChange {
    #[default]
    None,
    Modified,
    Deleted,
}

/// Pairwise comparison outcome for one candidate path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct ChangePair {
    pub index_change: IndexChange,
    pub worktree_change: WorktreeChange,
}

impl ChangePair {
    pub(crate) fn new(index_change: IndexChange, worktree_change: WorktreeChange) -> Self {
        Self {
            index_change,
            worktree_change,
        }
    }

    /// Collapse both comparisons into a single classification.
    ///
    /// Fixed precedence: conflicted > deleted > modified > unmodified, with
    /// one carve-out -- a staged add whose file never reached the disk (or
    /// left it again) reports `missing` rather than `deleted`.
    pub(crate) fn classify(&self) -> PathStatus {
        use IndexChange as I;
        use WorktreeChange as W;

        match (self.index_change, self.worktree_change) {
            (I::Added, W::Deleted) => PathStatus::Missing,
            (I::None, W::None) => PathStatus::Unmodified,
            (I::None, W::Modified) => PathStatus::Modified,
            (I::None, W::Deleted) => PathStatus::Deleted,
            (I::Added, W::None) => PathStatus::Added,
            (I::Modified, W::None) => PathStatus::Modified,
            (I::Deleted, _) => PathStatus::Deleted,
            // staged and unstaged changes diverge on the same path
            (I::Added | I::Modified, W::Modified) | (I::Modified, W::Deleted) => {
                PathStatus::Conflicted
            }
        }
    }
}
