use gitter_types::ObjectId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("object {0} is not in the store")]
    NotFound(ObjectId),

    /// A tree could not be encoded.
    #[error("cannot encode object: {0}")]
    Serialization(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Stored bytes do not decode as the kind of object the caller asked for.
    #[error("object {id} is corrupt: {reason}")]
    CorruptObject { id: ObjectId, reason: String },
}

pub type StoreResult<T> = Result<T, StoreError>;
