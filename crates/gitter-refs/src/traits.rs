//! The [`RefStore`] trait defining the reference storage interface.

use gitter_types::ObjectId;

use crate::error::RefResult;
use crate::types::Head;

/// Storage backend for HEAD, branch refs and the commit log.
///
/// Implementations must be thread-safe (`Send + Sync`). Ref names are
/// canonical (`refs/heads/main`).
pub trait RefStore: Send + Sync {
    /// Read the current HEAD state.
    fn head(&self) -> RefResult<Head>;

    /// Replace HEAD.
    fn set_head(&self, head: &Head) -> RefResult<()>;

    /// Read the commit a ref points at.
    ///
    /// Returns `Ok(None)` if the ref does not exist yet, which is the case for
    /// `main` until the first commit.
    fn read_ref(&self, name: &str) -> RefResult<Option<ObjectId>>;

    /// Create or overwrite a ref.
    fn write_ref(&self, name: &str, id: &ObjectId) -> RefResult<()>;

    /// Append a commit hash to the log.
    fn append_log(&self, id: &ObjectId) -> RefResult<()>;

    /// All logged commit hashes, oldest first.
    fn read_log(&self) -> RefResult<Vec<ObjectId>>;

    /// Resolve HEAD to a commit hash; `None` before the first commit.
    fn resolve_head(&self) -> RefResult<Option<ObjectId>> {
        match self.head()? {
            Head::Symbolic(name) => self.read_ref(&name),
            Head::Detached(id) => Ok(Some(id)),
        }
    }

    /// Move the current branch (or a detached HEAD) to `id`.
    fn advance_head(&self, id: &ObjectId) -> RefResult<()> {
        match self.head()? {
            Head::Symbolic(name) => self.write_ref(&name, id),
            Head::Detached(_) => self.set_head(&Head::Detached(*id)),
        }
    }
}
