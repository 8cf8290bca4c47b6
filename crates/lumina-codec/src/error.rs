/// Errors from codec operations.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// Text compression failed.
    #[error("compression failed: {0}")]
    CompressionFailed(String),

    /// Text decompression failed (not zstd data, or truncated).
    #[error("decompression failed: {0}")]
    DecompressionFailed(String),

    /// The input is not valid base64 or did not decompress to UTF-8.
    #[error("invalid encoding: {0}")]
    InvalidEncoding(String),

    /// No image bytes were provided.
    #[error("no image data provided")]
    EmptyImage,

    /// The bytes could not be decoded as a raster image.
    #[error("image decode failed: {0}")]
    ImageDecodeFailed(String),

    /// The downscaled image could not be re-encoded.
    #[error("image encode failed: {0}")]
    ImageEncodeFailed(String),

    /// The background normalization task was cancelled or panicked.
    #[error("image task failed: {0}")]
    ImageTaskFailed(String),
}

/// Result alias for codec operations.
pub type CodecResult<T> = Result<T, CodecError>;
