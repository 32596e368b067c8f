//! # Sealed Payloads
//!
//! Company records and land-parcel metadata are stored on chain as sealed
//! payloads: canonical-encoded, then zstd-compressed. Callers on both sides
//! of the boundary only ever see the typed record; the sealed form is an
//! implementation detail of the storage item.

use crate::codec::{decode_canonical, encode_canonical, CodecError};
use parity_scale_codec::{Decode, Encode};
use std::io::Read;
use thiserror::Error;

/// Compression level for sealed payloads.
const SEAL_LEVEL: i32 = 3;

/// Upper bound on the decompressed size of a payload. Records are small;
/// anything past this is treated as corrupt.
pub const MAX_OPEN_BYTES: usize = 64 * 1024;

/// Errors produced while sealing or opening a payload.
#[derive(Debug, Error)]
pub enum PayloadError {
    /// Compression failed.
    #[error("compression failed: {0}")]
    Compress(std::io::Error),

    /// Decompression failed (not a zstd frame, or truncated).
    #[error("decompression failed: {0}")]
    Decompress(std::io::Error),

    /// Decompressed bytes exceed [`MAX_OPEN_BYTES`].
    #[error("payload too large: more than {max} bytes after decompression")]
    TooLarge {
        /// The configured bound.
        max: usize,
    },

    /// Decompressed bytes did not decode into the expected record.
    #[error(transparent)]
    Decode(#[from] CodecError),
}

/// Seal a record for on-chain storage: canonical-encode, then compress.
pub fn seal_payload<T: Encode>(record: &T) -> Result<Vec<u8>, PayloadError> {
    let raw = encode_canonical(record);
    zstd::stream::encode_all(raw.as_slice(), SEAL_LEVEL).map_err(PayloadError::Compress)
}

/// Open a sealed payload back into its typed record: decompress (bounded),
/// then canonical-decode.
pub fn open_payload<T: Decode>(sealed: &[u8]) -> Result<T, PayloadError> {
    let decoder = zstd::stream::Decoder::new(sealed).map_err(PayloadError::Decompress)?;
    let mut raw = Vec::new();
    decoder
        .take(MAX_OPEN_BYTES as u64 + 1)
        .read_to_end(&mut raw)
        .map_err(PayloadError::Decompress)?;
    if raw.len() > MAX_OPEN_BYTES {
        return Err(PayloadError::TooLarge { max: MAX_OPEN_BYTES });
    }
    Ok(decode_canonical(&raw)?)
}
