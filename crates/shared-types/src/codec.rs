//! # Canonical Codec
//!
//! Deterministic binary encoding for everything that is hashed or stored on
//! chain. Thin wrappers around SCALE, centralized here so every subsystem
//! produces the exact same bytes for the same logical value. Call-hash
//! membership checks depend on this: a hash recomputed by the client must be
//! bit-identical to the one the chain computed for the same call.

use parity_scale_codec::{Decode, DecodeAll, Encode};
use thiserror::Error;

/// Errors produced when decoding canonical bytes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CodecError {
    /// The bytes did not decode into the expected type, or had trailing data.
    #[error("canonical decode failed: {0}")]
    Decode(String),
}

/// Encode a value into its canonical byte representation.
pub fn encode_canonical<T: Encode>(value: &T) -> Vec<u8> {
    value.encode()
}

/// Decode a value from its canonical byte representation.
///
/// Trailing bytes are an error: a canonical encoding is exact.
pub fn decode_canonical<T: Decode>(bytes: &[u8]) -> Result<T, CodecError> {
    T::decode_all(&mut &*bytes).map_err(|e| CodecError::Decode(e.to_string()))
}
