//! Stored content decoding
//!
//! `best_content.content` holds a hex string. The first two characters are a
//! store-internal tag (not payload); the remaining hex is a zlib stream with a
//! gzip header, which must be inflated in gzip mode rather than bare zlib.

use std::io::Read;
use flate2::read::GzDecoder;
use crate::{Error, Result};

/// Length, in hex characters, of the store tag preceding the payload.
pub const STORE_TAG_LEN: usize = 2;

/// Decode a stored content value into the original UTF-8 text.
pub fn unpack(stored: &str) -> Result<String> {
    let payload = stored
        .get(STORE_TAG_LEN..)
        .ok_or_else(|| Error::Decode(format!("stored value shorter than {} characters", STORE_TAG_LEN)))?;

    let bytes = hex::decode(payload).map_err(|e| Error::Decode(format!("invalid hex payload: {}", e)))?;
    decompress(&bytes)
}

/// Inflate a gzip-wrapped stream and decode it as UTF-8.
pub fn decompress(bytes: &[u8]) -> Result<String> {
    let raw = decompress_bytes(bytes)?;
    String::from_utf8(raw).map_err(|e| Error::Decode(format!("decompressed content is not UTF-8: {}", e)))
}

/// Inflate a gzip-wrapped stream without text decoding.
pub fn decompress_bytes(bytes: &[u8]) -> Result<Vec<u8>> {
    let mut decoder = GzDecoder::new(bytes);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| Error::Decode(format!("invalid compressed stream: {}", e)))?;
    Ok(out)
}
