//! Compression wrap: raw deflate (dipatok oleh SS1)

use std::io::{Read, Write};

use flate2::read::DeflateDecoder;
use flate2::write::DeflateEncoder;
use flate2::Compression;

use super::wire::MAX_PACKED_SIZE;
use crate::error::{CodecError, Result};

/// Deflate packed buffer
pub fn compress(buffer: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = DeflateEncoder::new(Vec::with_capacity(buffer.len()), Compression::best());
    encoder
        .write_all(buffer)
        .and_then(|_| encoder.finish())
        .map_err(|e| CodecError::Compress(e.to_string()))
}

/// Inflate payload, output dibatasi `MAX_PACKED_SIZE`
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut out = Vec::with_capacity(bytes.len() * 4);
    // +1 supaya output yang melebihi budget bisa terdeteksi
    DeflateDecoder::new(bytes)
        .take(MAX_PACKED_SIZE as u64 + 1)
        .read_to_end(&mut out)
        .map_err(|_| CodecError::CorruptPayload("deflate stream malformed"))?;

    if out.len() > MAX_PACKED_SIZE {
        return Err(CodecError::CorruptPayload("inflated payload exceeds budget"));
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compress_roundtrip() {
        let data = b"Penicillin, Penicillin, Penicillin, Sulfa".repeat(4);
        let compressed = compress(&data).unwrap();
        assert!(compressed.len() < data.len());
        assert_eq!(decompress(&compressed).unwrap(), data);
    }

    #[test]
    fn test_malformed_input() {
        // Block type 3 (reserved) selalu invalid
        let err = decompress(&[0xFF, 0xFF, 0xFF]).unwrap_err();
        assert!(matches!(err, CodecError::CorruptPayload(_)));
    }

    #[test]
    fn test_inflate_bomb_rejected() {
        let data = vec![0u8; MAX_PACKED_SIZE * 8];
        let compressed = compress(&data).unwrap();
        let err = decompress(&compressed).unwrap_err();
        assert!(matches!(err, CodecError::CorruptPayload(_)));
    }
}
