//! Filesystem object store: one file per object, named by its hex digest.

use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;

use gitter_crypto::ContentHasher;
use gitter_types::ObjectId;
use tracing::debug;

use crate::error::StoreResult;
use crate::traits::ObjectStore;

/// Object store backed by a flat directory (`.gitter/objects/`).
///
/// Objects are stored uncompressed, with no header, at `<dir>/<40-hex-id>`.
#[derive(Clone, Debug)]
pub struct FsObjectStore {
    dir: PathBuf,
}

impl FsObjectStore {
    /// Open a store rooted at an existing objects directory.
    pub fn open(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Create the objects directory (and parents) if needed, then open it.
    pub fn create(dir: impl Into<PathBuf>) -> StoreResult<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Path at which an object with the given ID is stored.
    pub fn object_path(&self, id: &ObjectId) -> PathBuf {
        self.dir.join(id.to_hex())
    }
}

impl ObjectStore for FsObjectStore {
    fn read(&self, id: &ObjectId) -> StoreResult<Option<Vec<u8>>> {
        match fs::read(self.object_path(id)) {
            Ok(data) => Ok(Some(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn write(&self, data: &[u8]) -> StoreResult<ObjectId> {
        let id = ContentHasher::hash(data);
        self.insert(&id, data)?;
        Ok(id)
    }

    fn insert(&self, id: &ObjectId, data: &[u8]) -> StoreResult<()> {
        let path = self.object_path(id);
        if path.exists() {
            return Ok(());
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(data)?;
        tmp.persist(&path).map_err(|e| e.error)?;

        debug!(id = %id.short_hex(), len = data.len(), "stored object");
        Ok(())
    }

    fn exists(&self, id: &ObjectId) -> StoreResult<bool> {
        Ok(self.object_path(id).is_file())
    }
}
