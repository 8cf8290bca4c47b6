//! Storage-safe text compression.
//!
//! Slot values are strings, so compressed output must survive a string-keyed,
//! string-valued store: zstd bytes are wrapped in standard base64. Raw JSON
//! written before compression was introduced will fail [`decompress`] (it is
//! not valid base64/zstd), which is exactly the signal the persistence layer
//! uses to fall back to parsing the stored string directly.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::error::{CodecError, CodecResult};

/// zstd compression level for slot payloads.
const COMPRESSION_LEVEL: i32 = 3;

/// Compress a string into a storage-safe base64 blob.
pub fn compress(text: &str) -> CodecResult<String> {
    let compressed = zstd::encode_all(text.as_bytes(), COMPRESSION_LEVEL)
        .map_err(|e| CodecError::CompressionFailed(e.to_string()))?;
    Ok(BASE64.encode(compressed))
}

/// Recover the original string from a [`compress`] blob.
///
/// Fails when the input is not base64, not zstd data, or does not
/// decompress to valid UTF-8.
pub fn decompress(blob: &str) -> CodecResult<String> {
    let bytes = BASE64
        .decode(blob.trim())
        .map_err(|e| CodecError::InvalidEncoding(e.to_string()))?;
    let decompressed = zstd::decode_all(bytes.as_slice())
        .map_err(|e| CodecError::DecompressionFailed(e.to_string()))?;
    String::from_utf8(decompressed).map_err(|e| CodecError::InvalidEncoding(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn roundtrip_json_payload() {
        let json = r#"[{"id":"coins","name":"Coins"},{"id":"stamps","name":"Stamps"}]"#;
        let blob = compress(json).unwrap();
        assert_ne!(blob, json);
        assert_eq!(decompress(&blob).unwrap(), json);
    }

    #[test]
    fn roundtrip_empty_string() {
        let blob = compress("").unwrap();
        assert_eq!(decompress(&blob).unwrap(), "");
    }

    #[test]
    fn output_is_storage_safe() {
        let blob = compress("hello world").unwrap();
        assert!(blob.is_ascii());
        assert!(!blob.contains('\0'));
    }

    #[test]
    fn repetitive_payload_shrinks() {
        let json = format!("[{}]", r#"{"owned":true},"#.repeat(500));
        let blob = compress(&json).unwrap();
        assert!(blob.len() < json.len());
    }

    #[test]
    fn raw_json_is_rejected() {
        // A legacy slot holding uncompressed JSON must fail here so the
        // store binding falls back to parsing it directly.
        let err = decompress(r#"[{"id":"coins","name":"Coins"}]"#).unwrap_err();
        assert!(matches!(err, CodecError::InvalidEncoding(_)));
    }

    #[test]
    fn valid_base64_but_not_zstd_is_rejected() {
        let blob = BASE64.encode(b"definitely not zstd frames");
        let err = decompress(&blob).unwrap_err();
        assert!(matches!(err, CodecError::DecompressionFailed(_)));
    }

    proptest! {
        #[test]
        fn roundtrip_arbitrary_strings(s in ".*") {
            let blob = compress(&s).unwrap();
            prop_assert_eq!(decompress(&blob).unwrap(), s);
        }
    }
}
