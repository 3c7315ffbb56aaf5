//! Filesystem ref store rooted at the metadata directory.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use gitter_types::ObjectId;
use tracing::debug;

use crate::error::{RefError, RefResult};
use crate::traits::RefStore;
use crate::types::{validate_ref_name, Head, HEAD_FILE, LOG_FILE};

/// [`RefStore`] backed by plain files in `.gitter/`:
///
/// - `HEAD`: `ref: refs/heads/main\n`
/// - `refs/heads/<branch>`: `<hash>\n`
/// - `log`: one hash per line, oldest first
#[derive(Clone, Debug)]
pub struct FsRefStore {
    git_dir: PathBuf,
}

impl FsRefStore {
    /// Open the ref store of an existing metadata directory.
    pub fn open(git_dir: impl Into<PathBuf>) -> Self {
        Self {
            git_dir: git_dir.into(),
        }
    }

    /// Lay out a fresh ref store: `refs/heads/`, HEAD on `main` and an empty
    /// log. Existing files are overwritten.
    pub fn init(git_dir: impl Into<PathBuf>) -> RefResult<Self> {
        let store = Self::open(git_dir);
        fs::create_dir_all(store.git_dir.join("refs").join("heads"))?;
        store.set_head(&Head::main())?;
        fs::write(store.log_path(), b"")?;
        Ok(store)
    }

    /// The metadata directory this store lives in.
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    fn head_path(&self) -> PathBuf {
        self.git_dir.join(HEAD_FILE)
    }

    fn log_path(&self) -> PathBuf {
        self.git_dir.join(LOG_FILE)
    }

    fn ref_path(&self, name: &str) -> RefResult<PathBuf> {
        validate_ref_name(name)?;
        Ok(name
            .split('/')
            .fold(self.git_dir.clone(), |path, part| path.join(part)))
    }

    fn write_atomic(&self, path: &Path, contents: &str) -> RefResult<()> {
        let dir = path.parent().unwrap_or(self.git_dir.as_path());
        fs::create_dir_all(dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(contents.as_bytes())?;
        tmp.persist(path).map_err(|e| e.error)?;
        Ok(())
    }
}

fn parse_id(text: &str, location: &str) -> RefResult<ObjectId> {
    ObjectId::from_hex(text).map_err(|e| RefError::InvalidObjectId {
        location: location.to_string(),
        reason: e.to_string(),
    })
}

impl RefStore for FsRefStore {
    fn head(&self) -> RefResult<Head> {
        fs::read_to_string(self.head_path())?.parse()
    }

    fn set_head(&self, head: &Head) -> RefResult<()> {
        if let Head::Symbolic(name) = head {
            validate_ref_name(name)?;
        }
        self.write_atomic(&self.head_path(), &format!("{head}\n"))
    }

    fn read_ref(&self, name: &str) -> RefResult<Option<ObjectId>> {
        let path = self.ref_path(name)?;
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let content = content.trim();
        if content.is_empty() {
            return Ok(None);
        }
        parse_id(content, name).map(Some)
    }

    fn write_ref(&self, name: &str, id: &ObjectId) -> RefResult<()> {
        let path = self.ref_path(name)?;
        self.write_atomic(&path, &format!("{id}\n"))?;
        debug!(name, id = %id.short_hex(), "updated ref");
        Ok(())
    }

    fn append_log(&self, id: &ObjectId) -> RefResult<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(self.log_path())?;
        writeln!(file, "{id}")?;
        Ok(())
    }

    fn read_log(&self) -> RefResult<Vec<ObjectId>> {
        let content = match fs::read_to_string(self.log_path()) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };
        content
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|line| parse_id(line, LOG_FILE))
            .collect()
    }
}
