use lumina_codec::CodecError;
use lumina_store::StoreError;
use lumina_types::{CollectionId, TypeError};

/// Errors from domain state operations.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// The collection name could not produce a slug id.
    #[error(transparent)]
    InvalidName(#[from] TypeError),

    /// A collection with the same slug id already exists.
    #[error("collection {0} already exists")]
    DuplicateCollection(CollectionId),

    /// An item was added while no collection is active.
    #[error("no active collection to add the item to")]
    NoActiveCollection,

    /// The slot write failed; the in-memory change was applied anyway.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Image normalization failed; nothing was stored.
    #[error(transparent)]
    Codec(#[from] CodecError),
}

/// Result alias for domain state operations.
pub type AppResult<T> = Result<T, AppError>;
