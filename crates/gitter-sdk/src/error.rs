use std::path::PathBuf;

use gitter_types::ObjectId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("not a gitter repository (or any of the parent directories): {}", .0.display())]
    NotARepository(PathBuf),

    #[error("gitter repository already exists in {}", .0.display())]
    AlreadyInitialized(PathBuf),

    #[error("nothing to commit, working tree clean")]
    NothingToCommit,

    #[error("no commits yet")]
    NoCommitsYet,

    #[error("object not found: {0}")]
    ObjectNotFound(ObjectId),

    #[error("invalid path: {0}")]
    InvalidPath(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("store error: {0}")]
    Store(gitter_store::StoreError),

    #[error("index error: {0}")]
    Index(#[from] gitter_index::IndexError),

    #[error("ref error: {0}")]
    Ref(#[from] gitter_refs::RefError),

    #[error("ledger error: {0}")]
    Ledger(gitter_ledger::LedgerError),

    #[error("hash error: {0}")]
    Hash(#[from] gitter_crypto::HasherError),
}

impl From<gitter_store::StoreError> for SdkError {
    fn from(e: gitter_store::StoreError) -> Self {
        match e {
            gitter_store::StoreError::NotFound(id) => SdkError::ObjectNotFound(id),
            other => SdkError::Store(other),
        }
    }
}

impl From<gitter_ledger::LedgerError> for SdkError {
    fn from(e: gitter_ledger::LedgerError) -> Self {
        use gitter_ledger::LedgerError;
        match e {
            LedgerError::CommitNotFound(id) => SdkError::ObjectNotFound(id),
            LedgerError::Store(store) => store.into(),
            LedgerError::Refs(refs) => SdkError::Ref(refs),
            other => SdkError::Ledger(other),
        }
    }
}

pub type SdkResult<T> = Result<T, SdkError>;
