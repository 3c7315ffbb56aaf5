//! The core Index structure managing staged entries.
//!
//! The [`Index`] keeps its entries in a `Vec` so that the persisted document,
//! status output and tree snapshots all follow the order in which paths were
//! first added. Paths are unique; staging an existing path updates it in place.

use std::fs;
use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use gitter_store::{Blob, ObjectStore, Tree};
use gitter_types::ObjectId;
use tracing::debug;

use crate::entry::IndexEntry;
use crate::error::{IndexError, IndexResult};
use crate::status::WorkdirStatus;

/// File name of the index inside the metadata directory.
pub const INDEX_FILE: &str = "index";

/// The staging index: tracks which files are staged for the next commit.
///
/// The `store` receives blobs as files are staged and the tree snapshot when
/// a commit is prepared.
pub struct Index {
    entries: Vec<IndexEntry>,
    store: Arc<dyn ObjectStore>,
}

impl std::fmt::Debug for Index {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Index")
            .field("entries", &self.entries.len())
            .field("staged", &self.staged_entries().count())
            .finish()
    }
}

impl Index {
    /// Create a new empty index backed by the given store.
    pub fn new(store: Arc<dyn ObjectStore>) -> Self {
        Self::from_entries(Vec::new(), store)
    }

    /// Create an index from already-loaded entries.
    pub fn from_entries(entries: Vec<IndexEntry>, store: Arc<dyn ObjectStore>) -> Self {
        Self { entries, store }
    }

    // ---------------------------------------------------------------
    // Persistence
    // ---------------------------------------------------------------

    /// Load the index document at `path`.
    ///
    /// A document holding `[]` (or `null`) yields an empty index. A missing or
    /// undecodable file is an error.
    pub fn load(path: &Path, store: Arc<dyn ObjectStore>) -> IndexResult<Self> {
        let data = fs::read(path)?;
        let entries: Option<Vec<IndexEntry>> = serde_json::from_slice(&data)
            .map_err(|e| IndexError::Serialization(format!("{}: {e}", path.display())))?;
        Ok(Self::from_entries(entries.unwrap_or_default(), store))
    }

    /// Write the index document to `path`, replacing it atomically.
    pub fn save(&self, path: &Path) -> IndexResult<()> {
        let data = self.to_bytes()?;
        let dir = path
            .parent()
            .ok_or_else(|| IndexError::InvalidPath(path.display().to_string()))?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(&data)?;
        tmp.persist(path).map_err(|e| e.error)?;

        debug!(entries = self.entries.len(), path = %path.display(), "saved index");
        Ok(())
    }

    /// Serialize the entries as a compact JSON array.
    pub fn to_bytes(&self) -> IndexResult<Vec<u8>> {
        serde_json::to_vec(&self.entries).map_err(|e| IndexError::Serialization(e.to_string()))
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Number of entries in the index.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the index has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// All entries in index order.
    pub fn entries(&self) -> &[IndexEntry] {
        &self.entries
    }

    /// Get an entry by path.
    pub fn get(&self, path: &str) -> Option<&IndexEntry> {
        self.entries.iter().find(|e| e.file_path == path)
    }

    /// Returns `true` if the path is tracked.
    pub fn contains(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Entries queued for the next commit, in index order.
    pub fn staged_entries(&self) -> impl Iterator<Item = &IndexEntry> {
        self.entries.iter().filter(|e| e.staged)
    }

    /// Returns `true` if anything is queued for the next commit.
    pub fn has_staged(&self) -> bool {
        self.entries.iter().any(|e| e.staged)
    }

    // ---------------------------------------------------------------
    // Stage operations
    // ---------------------------------------------------------------

    /// Stage content for a path: store it as a blob and upsert a staged entry.
    pub fn stage_file(&mut self, path: &str, content: &[u8]) -> IndexResult<ObjectId> {
        validate_path(path)?;
        let hash = Blob::new(content.to_vec()).store(self.store.as_ref())?;
        self.upsert(path, hash);
        Ok(hash)
    }

    fn upsert(&mut self, path: &str, hash: ObjectId) {
        match self.entries.iter_mut().find(|e| e.file_path == path) {
            Some(entry) => {
                entry.hash = hash;
                entry.staged = true;
            }
            None => self.entries.push(IndexEntry::staged(path, hash)),
        }
        debug!(path, hash = %hash.short_hex(), "staged");
    }

    /// Unstage every entry. Called once a commit has recorded them.
    pub fn unstage_all(&mut self) {
        for entry in &mut self.entries {
            entry.staged = false;
        }
    }

    // ---------------------------------------------------------------
    // Tree building
    // ---------------------------------------------------------------

    /// Snapshot the staged entries, in index order.
    pub fn staged_tree(&self) -> Tree {
        Tree::new(self.staged_entries().map(IndexEntry::to_tree_entry).collect())
    }

    /// Store the staged snapshot and return its ID.
    pub fn write_tree(&self) -> IndexResult<ObjectId> {
        Ok(self.staged_tree().store(self.store.as_ref())?)
    }

    // ---------------------------------------------------------------
    // Status computation
    // ---------------------------------------------------------------

    /// Classify paths against the working tree.
    ///
    /// `working` lists every working-tree file with the digest of its current
    /// content, in traversal order. Staged entries always land in `staged`;
    /// unstaged entries whose hash differs land in `not_staged`; paths with
    /// no entry are `untracked`. Tracked files absent from `working` are not
    /// reported.
    pub fn status(&self, working: &[(String, ObjectId)]) -> WorkdirStatus {
        let mut result = WorkdirStatus::new();
        result.staged = self
            .staged_entries()
            .map(|e| e.file_path.clone())
            .collect();

        for (path, current) in working {
            match self.get(path) {
                Some(entry) if !entry.staged && entry.hash != *current => {
                    result.not_staged.push(path.clone());
                }
                Some(_) => {}
                None => result.untracked.push(path.clone()),
            }
        }

        result
    }
}

fn validate_path(path: &str) -> IndexResult<()> {
    if path.is_empty() {
        return Err(IndexError::InvalidPath("empty path".to_string()));
    }
    if path.starts_with('/') || path.contains('\\') {
        return Err(IndexError::InvalidPath(format!(
            "not a repository-relative path: {path}"
        )));
    }
    Ok(())
}
