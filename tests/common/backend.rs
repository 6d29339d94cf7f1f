use std::os::unix::fs::MetadataExt;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyvcs::backend::{RepositoryEditor, RepositoryState, VersionControlSystem};
use anyvcs::errors::{RepositoryCreationError, VcsError};
use anyvcs::{
    BaseTree, ContentId, EntryMode, IgnoreRules, IndexEntry, IndexSnapshot, Repository, TreeEntry,
};

/// In-memory test backend: base tree and index snapshot are configured up
/// front, the working tree is a real temp directory.
pub struct TestVcs {
    id: String,
    installed: bool,
    fail_factory: bool,
    base: Vec<(PathBuf, TreeEntry)>,
    index: Vec<IndexEntry>,
    ignore_patterns: Vec<String>,
    /// How many repository instances the factory produced.
    pub created: Arc<AtomicUsize>,
    /// How many instances were disposed by the registry.
    pub disposed: Arc<AtomicUsize>,
}

impl TestVcs {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            installed: true,
            fail_factory: false,
            base: Vec::new(),
            index: Vec::new(),
            ignore_patterns: Vec::new(),
            created: Arc::new(AtomicUsize::new(0)),
            disposed: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn uninstalled(id: &str) -> Self {
        Self {
            installed: false,
            ..Self::new(id)
        }
    }

    pub fn with_factory_failure(mut self) -> Self {
        self.fail_factory = true;
        self
    }

    /// Add a committed file to the base revision tree.
    pub fn with_base(mut self, rel: &str, content: &str) -> Self {
        self.base.push((
            PathBuf::from(rel),
            TreeEntry::new(ContentId::of_bytes(content.as_bytes()), EntryMode::Regular),
        ));
        self
    }

    /// Add a committed symlink to the base revision tree; the fingerprint
    /// covers the target path.
    pub fn with_base_symlink(mut self, rel: &str, target: &str) -> Self {
        self.base.push((
            PathBuf::from(rel),
            TreeEntry::new(ContentId::of_bytes(target.as_bytes()), EntryMode::Symlink),
        ));
        self
    }

    pub fn with_index_entry(mut self, entry: IndexEntry) -> Self {
        self.index.push(entry);
        self
    }

    pub fn with_ignore(mut self, pattern: &str) -> Self {
        self.ignore_patterns.push(pattern.to_string());
        self
    }
}

impl VersionControlSystem for TestVcs {
    fn id(&self) -> &str {
        &self.id
    }

    fn name(&self) -> &str {
        "Test VCS"
    }

    fn is_installed(&self) -> bool {
        self.installed
    }

    fn create_repository_instance(
        &self,
        root: &Path,
    ) -> Result<Box<dyn RepositoryState>, RepositoryCreationError> {
        if self.fail_factory {
            return Err(RepositoryCreationError::new(
                root,
                "factory failure requested by test",
            ));
        }
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(TestState {
            root: root.to_path_buf(),
            base: self.base.clone(),
            index: self.index.clone(),
            ignore_patterns: self.ignore_patterns.clone(),
            disposed: Arc::clone(&self.disposed),
        }))
    }

    fn create_repository_editor(&self, _repository: &Repository) -> Box<dyn RepositoryEditor> {
        Box::new(NoopEditor)
    }
}

struct NoopEditor;

impl RepositoryEditor for NoopEditor {}

struct TestState {
    root: PathBuf,
    base: Vec<(PathBuf, TreeEntry)>,
    index: Vec<IndexEntry>,
    ignore_patterns: Vec<String>,
    disposed: Arc<AtomicUsize>,
}

impl RepositoryState for TestState {
    fn metadata_dirs(&self) -> Vec<String> {
        vec![".testvcs".to_string()]
    }

    fn ignore_rules(&self) -> Result<IgnoreRules, VcsError> {
        Ok(IgnoreRules::from_patterns(
            &self.root,
            self.ignore_patterns.iter().map(String::as_str),
        )?)
    }

    fn base_tree(&self) -> Result<BaseTree, VcsError> {
        Ok(BaseTree::from_entries(self.base.clone()))
    }

    fn index_snapshot(&self) -> Result<IndexSnapshot, VcsError> {
        Ok(IndexSnapshot::from_entries(self.index.clone()))
    }

    fn dispose(&self) {
        self.disposed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Index entry whose fingerprint and stat cache match the file currently on
/// disk at `root.join(rel)` -- a cleanly staged file.
pub fn staged_entry(root: &Path, rel: &str, content: &str) -> IndexEntry {
    let metadata = std::fs::symlink_metadata(root.join(rel))
        .unwrap_or_else(|e| panic!("Failed to stat staged file {rel}: {e}"));
    IndexEntry::new(
        PathBuf::from(rel),
        ContentId::of_bytes(content.as_bytes()),
        EntryMode::Regular,
        metadata.size(),
        metadata.mtime(),
        metadata.mtime_nsec(),
        false,
    )
}

/// Index entry for a staged symlink whose stat cache matches the link on
/// disk; the fingerprint covers the target path.
pub fn staged_symlink_entry(root: &Path, rel: &str, target: &str) -> IndexEntry {
    let metadata = std::fs::symlink_metadata(root.join(rel))
        .unwrap_or_else(|e| panic!("Failed to stat staged symlink {rel}: {e}"));
    IndexEntry::new(
        PathBuf::from(rel),
        ContentId::of_bytes(target.as_bytes()),
        EntryMode::Symlink,
        metadata.size(),
        metadata.mtime(),
        metadata.mtime_nsec(),
        false,
    )
}

/// Index entry with no stat cache: always verified against the disk.
pub fn detached_entry(rel: &str, content: &str) -> IndexEntry {
    IndexEntry::new(
        PathBuf::from(rel),
        ContentId::of_bytes(content.as_bytes()),
        EntryMode::Regular,
        content.len() as u64,
        0,
        0,
        false,
    )
}

/// Index entry flagged as an unresolved merge conflict.
pub fn conflicted_entry(root: &Path, rel: &str, content: &str) -> IndexEntry {
    let mut entry = staged_entry(root, rel, content);
    entry.conflicted = true;
    entry
}
