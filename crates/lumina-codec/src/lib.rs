//! Codec layer for the Lumina collection tracker.
//!
//! Two unrelated-but-adjacent concerns live here, both invoked by the slot
//! persistence layer and the item form:
//!
//! - **Text compression** ([`compress`] / [`decompress`]): zstd wrapped in
//!   base64, so slot values stay storage-safe strings. The inverse of
//!   `compress` always recovers the original text; anything that is not
//!   valid compressed output fails loudly so callers can fall back to
//!   treating the stored string as raw (pre-compression) data.
//! - **Image normalization** ([`normalize_image`]): decode an arbitrary
//!   raster image, downscale it proportionally to a maximum width, and
//!   re-encode as a quality-lossy JPEG data URI ready to embed in an item
//!   record. This is the one asynchronous operation in the system.
//!
//! Failures are explicit [`CodecError`] values in both directions — this
//! layer never swallows an error; deciding how to degrade belongs to the
//! caller.

pub mod error;
pub mod image;
pub mod text;

pub use error::{CodecError, CodecResult};
pub use image::{normalize_image, ImageOptions};
pub use text::{compress, decompress};
