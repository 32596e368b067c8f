//! # Connection Errors

use thiserror::Error;

/// Errors establishing the chain connection.
///
/// `Clone` because the settled outcome of the single connect attempt is
/// cached and handed to every pending and future caller.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConnectionError {
    /// The endpoint could not be reached.
    #[error("chain endpoint unreachable: {0}")]
    Unreachable(String),

    /// The connect handshake failed after transport came up.
    #[error("connect handshake failed: {0}")]
    Handshake(String),

    /// The connect attempt exceeded the configured timeout.
    #[error("connect attempt timed out after {seconds}s")]
    Timeout {
        /// The configured timeout.
        seconds: u64,
    },
}

/// Errors on the typed RPC boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RpcError {
    /// Transport failed mid-call. Fatal for this connection; there is no
    /// reconnect.
    #[error("transport error: {0}")]
    Transport(String),

    /// The node returned bytes that did not decode into the expected type.
    #[error("storage decode error: {0}")]
    Decode(String),

    /// The node rejected the request.
    #[error("request rejected: {0}")]
    Rejected(String),
}
