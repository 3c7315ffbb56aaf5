use gitter_store::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    /// Index paths are relative, `/`-separated and non-empty.
    #[error("invalid index path: {0:?}")]
    InvalidPath(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("index file is malformed: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type IndexResult<T> = Result<T, IndexError>;
