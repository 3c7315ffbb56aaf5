use gitter_types::ObjectId;

/// Errors produced by ledger operations.
#[derive(Debug, thiserror::Error)]
pub enum LedgerError {
    #[error("commit not found: {0}")]
    CommitNotFound(ObjectId),

    #[error("corrupt commit {id}: {reason}")]
    CorruptCommit { id: ObjectId, reason: String },

    #[error("commit has no hash; seal it before storing")]
    Unsealed,

    #[error("history loops back to commit {0}")]
    Cycle(ObjectId),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("store error: {0}")]
    Store(#[from] gitter_store::StoreError),

    #[error("ref error: {0}")]
    Refs(#[from] gitter_refs::RefError),
}

/// Result alias for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;
