use serde::{Deserialize, Serialize};
use gitter_types::ObjectId;

use crate::error::{StoreError, StoreResult};
use crate::traits::ObjectStore;

// ---------------------------------------------------------------------------
// Blob
// ---------------------------------------------------------------------------

/// Raw content object (analogous to git blob).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Blob {
    pub data: Vec<u8>,
}

impl Blob {
    /// Create a new blob from raw bytes.
    pub fn new(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Store the blob and return its ID.
    pub fn store(&self, store: &dyn ObjectStore) -> StoreResult<ObjectId> {
        store.write(&self.data)
    }
}

// ---------------------------------------------------------------------------
// Tree
// ---------------------------------------------------------------------------

/// A single entry in a tree snapshot.
///
/// The field names match the index entry document so that a tree is, byte for
/// byte, the JSON of the staged index entries at commit time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeEntry {
    /// Repository-relative path, `/`-separated.
    pub file_path: String,
    /// ID of the blob holding the file's content.
    pub hash: ObjectId,
    /// Staged flag as it stood when the snapshot was taken (always `true`).
    pub modified: bool,
}

impl TreeEntry {
    /// Create a new tree entry.
    pub fn new(file_path: impl Into<String>, hash: ObjectId) -> Self {
        Self {
            file_path: file_path.into(),
            hash,
            modified: true,
        }
    }
}

/// Flat snapshot of the entries staged for one commit.
///
/// Unlike a git tree there is no nesting: every entry carries its full
/// relative path. Entries keep the order in which they appeared in the index.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tree {
    pub entries: Vec<TreeEntry>,
}

impl Tree {
    /// Create a tree from entries, preserving their order.
    pub fn new(entries: Vec<TreeEntry>) -> Self {
        Self { entries }
    }

    /// Create an empty tree.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Serialize to the on-disk JSON form.
    pub fn to_bytes(&self) -> StoreResult<Vec<u8>> {
        serde_json::to_vec(self).map_err(|e| StoreError::Serialization(e.to_string()))
    }

    /// Decode from stored bytes.
    pub fn from_bytes(id: &ObjectId, data: &[u8]) -> StoreResult<Self> {
        serde_json::from_slice(data).map_err(|e| StoreError::CorruptObject {
            id: *id,
            reason: format!("not a tree: {e}"),
        })
    }

    /// Serialize and store the tree, returning its ID.
    pub fn store(&self, store: &dyn ObjectStore) -> StoreResult<ObjectId> {
        store.write(&self.to_bytes()?)
    }

    /// Load and decode a tree by ID.
    pub fn load(store: &dyn ObjectStore, id: &ObjectId) -> StoreResult<Self> {
        let data = store.get(id)?;
        Self::from_bytes(id, &data)
    }

    /// Look up an entry by path.
    pub fn get(&self, path: &str) -> Option<&TreeEntry> {
        self.entries.iter().find(|e| e.file_path == path)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the tree has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::InMemoryObjectStore;
    use gitter_crypto::ContentHasher;

    #[test]
    fn blob_is_stored_under_its_digest() {
        let store = InMemoryObjectStore::new();
        let blob = Blob::new(b"hello world".to_vec());
        let id = blob.store(&store).unwrap();
        assert_eq!(id, ContentHasher::hash(b"hello world"));
        assert_eq!(store.get(&id).unwrap(), blob.data);
    }

    #[test]
    fn tree_wire_format() {
        let hash = ContentHasher::hash(b"Hello World");
        let tree = Tree::new(vec![TreeEntry::new("test.txt", hash)]);
        let json = String::from_utf8(tree.to_bytes().unwrap()).unwrap();
        assert_eq!(
            json,
            r#"[{"file_path":"test.txt","hash":"0a4d55a8d778e5022fab701977c5d840bbc486d0","modified":true}]"#
        );
    }

    #[test]
    fn tree_keeps_insertion_order() {
        let tree = Tree::new(vec![
            TreeEntry::new("zebra.txt", ContentHasher::hash(b"z")),
            TreeEntry::new("alpha.txt", ContentHasher::hash(b"a")),
        ]);
        assert_eq!(tree.entries[0].file_path, "zebra.txt");
        assert_eq!(tree.entries[1].file_path, "alpha.txt");
    }

    #[test]
    fn tree_store_and_load() {
        let store = InMemoryObjectStore::new();
        let tree = Tree::new(vec![
            TreeEntry::new("file.txt", ContentHasher::hash(b"content")),
            TreeEntry::new("src/lib.rs", ContentHasher::hash(b"fn main() {}")),
        ]);
        let id = tree.store(&store).unwrap();
        assert_eq!(id, ContentHasher::hash(&tree.to_bytes().unwrap()));
        assert_eq!(Tree::load(&store, &id).unwrap(), tree);
    }

    #[test]
    fn tree_get_entry() {
        let tree = Tree::new(vec![
            TreeEntry::new("a.txt", ContentHasher::hash(b"a")),
            TreeEntry::new("b.txt", ContentHasher::hash(b"b")),
        ]);
        assert!(tree.get("a.txt").is_some());
        assert!(tree.get("missing").is_none());
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn empty_tree() {
        let tree = Tree::empty();
        assert!(tree.is_empty());
        assert_eq!(tree.to_bytes().unwrap(), b"[]");
    }

    #[test]
    fn corrupt_tree_is_reported() {
        let store = InMemoryObjectStore::new();
        let id = store.write(b"not json").unwrap();
        let err = Tree::load(&store, &id).unwrap_err();
        assert!(matches!(err, StoreError::CorruptObject { .. }));
    }

    #[test]
    fn missing_tree_is_not_found() {
        let store = InMemoryObjectStore::new();
        let id = ContentHasher::hash(b"never stored");
        assert!(matches!(
            Tree::load(&store, &id),
            Err(StoreError::NotFound(_))
        ));
    }
}
