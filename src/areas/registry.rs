//! Backend registry and repository instance lifecycle.
//!
//! One logical repository instance exists per (root, backend id) while any
//! reference to it is outstanding. The cache mutex is held across the
//! backend factory call, so two concurrent first requests for one identity
//! serialize instead of racing into two live instances.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::areas::repository::{Repository, RepositoryIdentity};
use crate::backend::VersionControlSystem;
use crate::errors::VcsError;

struct CacheSlot {
    repository: Arc<Repository>,
    refcount: usize,
}

/// Registry of version control backends plus the shared repository
/// instance cache.
///
/// [`get_repository_reference`](Self::get_repository_reference) and
/// [`release_repository_reference`](Self::release_repository_reference)
/// form a balanced pair: the instance is disposed and evicted when the
/// last outstanding reference is released, never before.
#[derive(Default)]
pub struct VcsRegistry {
    backends: Mutex<Vec<Arc<dyn VersionControlSystem>>>,
    cache: Mutex<HashMap<RepositoryIdentity, CacheSlot>>,
}

impl VcsRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend under its stable id.
    pub fn register(&self, backend: Arc<dyn VersionControlSystem>) {
        debug!(
            id = backend.id(),
            name = backend.name(),
            "registering version control backend"
        );
        self.lock_backends().push(backend);
    }

    /// Look up a backend by its stable id.
    pub fn backend(&self, id: &str) -> Option<Arc<dyn VersionControlSystem>> {
        self.lock_backends()
            .iter()
            .find(|backend| backend.id() == id)
            .cloned()
    }

    /// Registered backends whose native tooling is present.
    pub fn installed_backends(&self) -> Vec<Arc<dyn VersionControlSystem>> {
        self.lock_backends()
            .iter()
            .filter(|backend| backend.is_installed())
            .cloned()
            .collect()
    }

    /// Obtain the shared repository instance for (path, id), creating it on
    /// first request.
    ///
    /// A factory failure propagates to the caller and leaves no cache entry
    /// behind.
    pub fn get_repository_reference(
        &self,
        path: &Path,
        id: &str,
    ) -> Result<Arc<Repository>, VcsError> {
        let backend = self
            .backend(id)
            .ok_or_else(|| VcsError::UnknownBackend(id.to_string()))?;
        if !backend.is_installed() {
            return Err(VcsError::BackendUnavailable(id.to_string()));
        }

        let identity = RepositoryIdentity::new(path, id);
        let mut cache = self.lock_cache();

        if let Some(slot) = cache.get_mut(&identity) {
            slot.refcount += 1;
            debug!(
                root = %path.display(),
                vcs = id,
                refcount = slot.refcount,
                "reusing cached repository instance"
            );
            return Ok(Arc::clone(&slot.repository));
        }

        let state = backend.create_repository_instance(path)?;
        let repository = Arc::new(Repository::new(backend, identity.clone(), state));
        cache.insert(
            identity,
            CacheSlot {
                repository: Arc::clone(&repository),
                refcount: 1,
            },
        );
        debug!(root = %path.display(), vcs = id, "created repository instance");
        Ok(repository)
    }

    /// Release one reference to a repository instance.
    ///
    /// On the last release the instance is disposed and evicted from the
    /// cache. Releasing an instance the registry does not hold is a no-op.
    pub fn release_repository_reference(&self, repository: &Arc<Repository>) {
        let identity = repository.identity().clone();
        let mut cache = self.lock_cache();

        let Some(slot) = cache.get_mut(&identity) else {
            return;
        };
        slot.refcount -= 1;
        if slot.refcount > 0 {
            debug!(
                root = %identity.root.display(),
                vcs = identity.vcs_id,
                refcount = slot.refcount,
                "released repository reference"
            );
            return;
        }

        let slot = cache.remove(&identity);
        drop(cache);
        if let Some(slot) = slot {
            slot.repository.dispose();
        }
    }

    /// Whether a live instance is cached for (path, id).
    pub fn is_cached(&self, path: &Path, id: &str) -> bool {
        self.lock_cache()
            .contains_key(&RepositoryIdentity::new(path, id))
    }

    fn lock_backends(&self) -> MutexGuard<'_, Vec<Arc<dyn VersionControlSystem>>> {
        self.backends
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn lock_cache(&self) -> MutexGuard<'_, HashMap<RepositoryIdentity, CacheSlot>> {
        self.cache
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
