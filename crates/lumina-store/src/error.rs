/// Errors from slot store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The write would exceed the backend's capacity.
    #[error("quota exceeded writing slot {key}: {needed} bytes needed, {available} available")]
    QuotaExceeded {
        key: String,
        needed: u64,
        available: u64,
    },

    /// The slot key cannot be stored safely by this backend.
    #[error("invalid slot key {key:?}: {reason}")]
    InvalidKey { key: String, reason: String },

    /// Serialization of a slot value failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// I/O error from the underlying storage backend.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
