//! Zlib codec for stored payloads
//!
//! Images are persisted as zlib streams and decompressed on read. The
//! raw bytes in the table are always the compressed form.

use std::io::{Read, Write};

use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;

use crate::error::{Result, StoreError};

/// Compress raw image bytes into a zlib stream.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| StoreError::compression(e.to_string()))?;
    encoder
        .finish()
        .map_err(|e| StoreError::compression(e.to_string()))
}

/// Decompress a zlib stream back into raw image bytes.
///
/// Fails with [`StoreError::Compression`] when the stored bytes are not
/// a valid zlib stream.
pub fn decompress(data: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| StoreError::compression(e.to_string()))?;
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_png_header() {
        let payload = b"\x89PNG\r\n\x1a\n_not_really_a_png_but_close_enough";
        let stored = compress(payload).unwrap();
        assert_ne!(stored, payload.to_vec());
        assert_eq!(decompress(&stored).unwrap(), payload.to_vec());
    }

    #[test]
    fn rejects_garbage_stream() {
        let err = decompress(b"definitely not zlib").unwrap_err();
        assert!(matches!(err, StoreError::Compression { .. }));
    }

    #[test]
    fn empty_payload_is_valid() {
        let stored = compress(b"").unwrap();
        assert_eq!(decompress(&stored).unwrap(), Vec::<u8>::new());
    }
}
