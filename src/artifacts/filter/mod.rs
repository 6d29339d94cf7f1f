//! Path filter restricting a status computation to a subset of paths.
//!
//! Matching is path-segment aligned over a component trie, so a filter
//! entry `foo` includes `foo` and `foo/bar.txt` but never `foo2`.

use std::collections::HashMap;
use std::path::Path;

use crate::errors::FilterError;

/// Caller-supplied restriction for one status request.
///
/// An empty filter set, or one containing only `"."`, places no
/// restriction. Otherwise a path is included iff it equals a filter entry
/// or a filter entry is one of its ancestor directories.
#[derive(Debug, Clone)]
pub struct PathFilter {
    trie: Trie,
}

impl PathFilter {
    /// A filter that includes every path.
    pub fn unrestricted() -> Self {
        Self {
            trie: Trie::with_matching(true),
        }
    }

    /// Build a filter from raw path strings.
    ///
    /// `"."` entries are dropped; if nothing remains the filter is
    /// unrestricted. Malformed entries (empty, absolute, or traversing
    /// upwards) are rejected before any scanning happens.
    pub fn new<S: AsRef<str>>(paths: &[S]) -> Result<Self, FilterError> {
        let mut trie = Trie::new();
        let mut restricted = false;

        for raw in paths {
            let raw = raw.as_ref();
            if raw == "." {
                continue;
            }
            let components = Self::split(raw)?;
            if components.is_empty() {
                // "./" and friends normalize away to the whole tree
                continue;
            }
            trie.insert(&components);
            restricted = true;
        }

        if !restricted {
            return Ok(Self::unrestricted());
        }
        Ok(Self { trie })
    }

    fn split(raw: &str) -> Result<Vec<String>, FilterError> {
        if raw.is_empty() {
            return Err(FilterError::Empty);
        }
        if raw.starts_with('/') || Path::new(raw).is_absolute() {
            return Err(FilterError::Absolute(raw.to_string()));
        }

        let mut components = Vec::new();
        for part in raw.split('/') {
            match part {
                "" | "." => continue,
                ".." => return Err(FilterError::Traversal(raw.to_string())),
                part => components.push(part.to_string()),
            }
        }
        Ok(components)
    }

    /// Whether `path` falls inside the filtered set.
    pub fn includes(&self, path: &Path) -> bool {
        let mut node = &self.trie;
        if node.is_matching {
            return true;
        }
        for component in path.components() {
            let part = component.as_os_str().to_string_lossy();
            match node.children.get(part.as_ref()) {
                Some(child) => node = child,
                None => return false,
            }
            if node.is_matching {
                return true;
            }
        }
        // every component consumed without reaching a filter entry: `path`
        // is a strict ancestor of one, not covered by it
        false
    }

    pub fn is_unrestricted(&self) -> bool {
        self.trie.is_matching
    }
}

#[derive(Debug, Clone, Default)]
struct Trie {
    is_matching: bool,
    children: HashMap<String, Trie>,
}

impl Trie {
    fn new() -> Self {
        Self::default()
    }

    fn with_matching(is_matching: bool) -> Self {
        Trie {
            is_matching,
            children: HashMap::new(),
        }
    }

    fn insert(&mut self, components: &[String]) {
        let mut node = self;
        for part in components {
            node = node.children.entry(part.clone()).or_default();
        }
        node.is_matching = true;
    }
}
