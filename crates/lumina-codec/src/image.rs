//! One-way image normalization for item photos.
//!
//! Item photos are stored inline in the items slot, so they must be small:
//! an uploaded image is decoded, downscaled so its width does not exceed a
//! maximum (height scaled to preserve aspect ratio, never upscaled), and
//! re-encoded as a quality-lossy JPEG wrapped in a `data:` URI.
//!
//! Decoding and re-encoding are CPU-bound, so [`normalize_image`] runs them
//! on the blocking thread pool and is the one suspend point in the system.
//! There is no cancellation and no timeout; callers are expected to block
//! resubmission of the same form until the future resolves or rejects.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::imageops::FilterType;

use crate::error::{CodecError, CodecResult};

/// Normalization parameters.
#[derive(Clone, Copy, Debug)]
pub struct ImageOptions {
    /// Maximum output width in pixels.
    pub max_width: u32,
    /// JPEG quality factor in `0.0..=1.0`.
    pub quality: f32,
}

impl Default for ImageOptions {
    fn default() -> Self {
        Self {
            max_width: 300,
            quality: 0.7,
        }
    }
}

impl ImageOptions {
    /// Quality factor mapped to the JPEG encoder's 1–100 scale.
    fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }
}

/// Decode, downscale, and re-encode an image as a JPEG data URI.
///
/// Fails on empty input, undecodable bytes, or an encoder error. Images
/// already narrower than `max_width` keep their dimensions.
pub async fn normalize_image(bytes: Vec<u8>, opts: ImageOptions) -> CodecResult<String> {
    tokio::task::spawn_blocking(move || normalize_blocking(&bytes, opts))
        .await
        .map_err(|e| CodecError::ImageTaskFailed(e.to_string()))?
}

fn normalize_blocking(bytes: &[u8], opts: ImageOptions) -> CodecResult<String> {
    if bytes.is_empty() {
        return Err(CodecError::EmptyImage);
    }

    let img = image::load_from_memory(bytes)
        .map_err(|e| CodecError::ImageDecodeFailed(e.to_string()))?;

    let (width, height) = (img.width(), img.height());
    let img = if width > opts.max_width {
        let scaled_height = (f64::from(height) * f64::from(opts.max_width) / f64::from(width))
            .round()
            .max(1.0) as u32;
        img.resize_exact(opts.max_width, scaled_height, FilterType::Triangle)
    } else {
        img
    };

    // JPEG has no alpha channel.
    let rgb = img.to_rgb8();
    let mut jpeg = Vec::new();
    let encoder =
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut jpeg, opts.jpeg_quality());
    rgb.write_with_encoder(encoder)
        .map_err(|e| CodecError::ImageEncodeFailed(e.to_string()))?;

    Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(jpeg)))
}

#[cfg(test)]
mod tests {
    use image::ImageFormat;

    use super::*;

    /// In-memory PNG of the given dimensions.
    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbImage::from_pixel(width, height, image::Rgb([120, 80, 40]));
        let mut buf = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut buf, ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    /// Decode the JPEG out of a `data:image/jpeg;base64,…` URI.
    fn decode_data_uri(uri: &str) -> image::DynamicImage {
        let b64 = uri
            .strip_prefix("data:image/jpeg;base64,")
            .expect("data URI prefix");
        let jpeg = BASE64.decode(b64).unwrap();
        image::load_from_memory(&jpeg).unwrap()
    }

    #[tokio::test]
    async fn downscales_wide_image_preserving_ratio() {
        let uri = normalize_image(png_bytes(1200, 800), ImageOptions::default())
            .await
            .unwrap();
        let out = decode_data_uri(&uri);
        assert_eq!((out.width(), out.height()), (300, 200));
    }

    #[tokio::test]
    async fn never_upscales_small_image() {
        let uri = normalize_image(png_bytes(200, 100), ImageOptions::default())
            .await
            .unwrap();
        let out = decode_data_uri(&uri);
        assert_eq!((out.width(), out.height()), (200, 100));
    }

    #[tokio::test]
    async fn rounds_fractional_heights() {
        // 1000x333 at max width 300 → 99.9 → 100.
        let uri = normalize_image(png_bytes(1000, 333), ImageOptions::default())
            .await
            .unwrap();
        let out = decode_data_uri(&uri);
        assert_eq!((out.width(), out.height()), (300, 100));
    }

    #[tokio::test]
    async fn rejects_empty_input() {
        let err = normalize_image(Vec::new(), ImageOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CodecError::EmptyImage));
    }

    #[tokio::test]
    async fn rejects_undecodable_bytes() {
        let err = normalize_image(b"not an image".to_vec(), ImageOptions::default())
            .await
            .unwrap_err();
        assert!(matches!(err, CodecError::ImageDecodeFailed(_)));
    }

    #[test]
    fn quality_maps_to_jpeg_scale() {
        assert_eq!(ImageOptions::default().jpeg_quality(), 70);
        let lo = ImageOptions {
            max_width: 300,
            quality: 0.0,
        };
        assert_eq!(lo.jpeg_quality(), 1);
        let hi = ImageOptions {
            max_width: 300,
            quality: 1.0,
        };
        assert_eq!(hi.jpeg_quality(), 100);
    }
}
