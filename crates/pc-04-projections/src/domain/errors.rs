//! # Projection Errors

use pc_01_connection::RpcError;
use thiserror::Error;

/// Errors from the centralized metadata backend.
///
/// The backend is best-effort and non-authoritative: read paths degrade on
/// these instead of failing the view.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MetadataError {
    /// The request could not be made or transported.
    #[error("metadata request failed: {0}")]
    Http(String),

    /// The backend answered with a non-success status.
    #[error("metadata backend returned status {0}")]
    Status(u16),

    /// The response body did not decode.
    #[error("metadata response malformed: {0}")]
    Decode(String),
}

/// Errors from composite queries.
#[derive(Debug, Error)]
pub enum ProjectionError {
    /// The chain boundary failed; chain reads are authoritative, so this
    /// is not degradable.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// A write to the metadata backend failed. Reads degrade instead.
    #[error(transparent)]
    Metadata(#[from] MetadataError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_carries_code() {
        let err = MetadataError::Status(503);
        assert!(err.to_string().contains("503"));
    }
}
