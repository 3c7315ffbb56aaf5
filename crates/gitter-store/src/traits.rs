use gitter_types::ObjectId;

use crate::error::{StoreError, StoreResult};

/// Content-addressed object store.
///
/// All implementations must satisfy these invariants:
/// - Objects are immutable once written. The same data always produces the
///   same ID, so rewriting it is a no-op.
/// - The store never interprets object contents: it is a pure key-value store.
/// - All I/O errors are propagated, never silently ignored.
pub trait ObjectStore: Send + Sync {
    /// Read an object by its ID.
    ///
    /// Returns `Ok(None)` if the object does not exist.
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>>;

    /// Write bytes and return their content-addressed ID.
    ///
    /// If the object already exists, this is a no-op (idempotent).
    fn write(&self, data: &[u8]) -> StoreResult<ObjectId>;

    /// Store bytes under a caller-supplied ID.
    ///
    /// Used for records whose name is not the digest of their final bytes.
    /// An existing object with the same ID is left untouched.
    fn insert(&self, id: &ObjectId, data: &[u8]) -> StoreResult<()>;

    /// Check whether an object exists in the store.
    fn exists(&self, id: &ObjectId) -> StoreResult<bool>;

    /// Read an object, failing with [`StoreError::NotFound`] if it is absent.
    fn get(&self, id: &ObjectId) -> StoreResult<Vec<u8>> {
        self.read(id)?.ok_or(StoreError::NotFound(*id))
    }
}
