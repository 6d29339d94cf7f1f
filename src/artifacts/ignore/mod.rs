//! Ignore rules applied during working-tree scans.

use ignore::gitignore::{Gitignore, GitignoreBuilder};
use std::path::Path;

use crate::errors::ScanError;

/// Gitignore-style match rules supplied by a backend.
///
/// Rules only shield paths that have no index entry: a tracked file that
/// happens to match a pattern is still compared normally. Directory
/// matches prune the scan below them.
#[derive(Debug, Clone)]
pub struct IgnoreRules {
    matcher: Option<Gitignore>,
}

impl IgnoreRules {
    /// Rules that ignore nothing.
    pub fn none() -> Self {
        Self { matcher: None }
    }

    /// Compile a rule set from gitignore-style pattern lines, anchored at
    /// the working-tree root.
    pub fn from_patterns<S: AsRef<str>>(
        root: &Path,
        patterns: impl IntoIterator<Item = S>,
    ) -> Result<Self, ScanError> {
        let mut builder = GitignoreBuilder::new(root);
        for pattern in patterns {
            builder
                .add_line(None, pattern.as_ref())
                .map_err(|err| ScanError::Pattern(err.to_string()))?;
        }
        Self::build(builder)
    }

    /// Compile rules from an on-disk ignore file (e.g. `.gitignore`).
    pub fn from_ignore_file(root: &Path, file: &Path) -> Result<Self, ScanError> {
        let mut builder = GitignoreBuilder::new(root);
        if let Some(err) = builder.add(file) {
            return Err(ScanError::Pattern(err.to_string()));
        }
        Self::build(builder)
    }

    fn build(builder: GitignoreBuilder) -> Result<Self, ScanError> {
        let matcher = builder
            .build()
            .map_err(|err| ScanError::Pattern(err.to_string()))?;
        Ok(Self {
            matcher: Some(matcher),
        })
    }

    /// Whether `path` (relative to the root) is covered by a rule, either
    /// directly or through an ignored ancestor directory.
    pub fn is_ignored(&self, path: &Path, is_dir: bool) -> bool {
        match &self.matcher {
            Some(matcher) => matcher.matched_path_or_any_parents(path, is_dir).is_ignore(),
            None => false,
        }
    }
}
