use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard};

use gitter_crypto::ContentHasher;
use gitter_types::ObjectId;

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// Object store held entirely in memory, for tests and embedding.
/// Poisoned locks are recovered.
pub struct InMemoryObjectStore {
    objects: RwLock<HashMap<ObjectId, Vec<u8>>>,
}

impl InMemoryObjectStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(HashMap::new()),
        }
    }

    fn objects(&self) -> RwLockReadGuard<'_, HashMap<ObjectId, Vec<u8>>> {
        self.objects.read().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn len(&self) -> usize {
        self.objects().len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects().is_empty()
    }
}

impl Default for InMemoryObjectStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ObjectStore for InMemoryObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.objects().get(id).cloned())
    }

    fn write(&self, data: &[u8]) -> StoreResult<ObjectId> {
        let id = ContentHasher::hash(data);
        self.insert(&id, data)?;
        Ok(id)
    }

    fn insert(&self, id: &ObjectId, data: &[u8]) -> StoreResult<()> {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(*id)
            .or_insert_with(|| data.to_vec());
        Ok(())
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.objects().contains_key(id))
    }
}

impl std::fmt::Debug for InMemoryObjectStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryObjectStore")
            .field("object_count", &self.len())
            .finish()
    }
}
