//! # Submission Errors

use pc_01_connection::RpcError;
use shared_types::{ErrorDescriptor, SubmissionResult};
use thiserror::Error;

/// Errors from the wallet capability.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum WalletError {
    /// The wallet exposes no accounts.
    #[error("wallet has no accounts")]
    NoAccounts,

    /// The requested address is not held by the wallet.
    #[error("wallet does not hold account {0}")]
    UnknownAddress(String),

    /// The user rejected the signature request.
    #[error("signature request rejected")]
    Rejected,

    /// The wallet capability is unavailable.
    #[error("wallet unavailable: {0}")]
    Unavailable(String),
}

/// Errors from one submission attempt.
///
/// `Dispatch` carries the full inclusion record: the call landed in a
/// block and reverted there. Every other variant happened before
/// inclusion, so no block hash exists.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The wallet failed or refused to sign.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The chain boundary failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),

    /// The pool rejected the extrinsic before inclusion.
    #[error("extrinsic invalid: {0}")]
    Invalid(String),

    /// The pool dropped the extrinsic before inclusion.
    #[error("extrinsic dropped from the pool")]
    Dropped,

    /// The status stream ended without a terminal status.
    #[error("status stream closed before inclusion")]
    StreamClosed,

    /// Included in a block, but dispatch reverted.
    #[error("dispatch failed: {}", .0.error_data.details)]
    Dispatch(SubmissionResult),
}

impl SubmissionError {
    /// The `{is_error, details}` descriptor every caller-facing surface
    /// reports, whichever variant occurred.
    pub fn descriptor(&self) -> ErrorDescriptor {
        match self {
            SubmissionError::Dispatch(result) => result.error_data.clone(),
            other => ErrorDescriptor::failure(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pre_inclusion_descriptor_is_stringified() {
        let err = SubmissionError::Wallet(WalletError::Rejected);
        let descriptor = err.descriptor();
        assert!(descriptor.is_error);
        assert!(descriptor.details.contains("rejected"));
    }

    #[test]
    fn test_dispatch_descriptor_passes_through() {
        let result = SubmissionResult {
            block_hash: [1u8; 32],
            events: vec![],
            error_data: ErrorDescriptor::failure("Balances::InsufficientBalance"),
        };
        let err = SubmissionError::Dispatch(result);
        assert_eq!(err.descriptor().details, "Balances::InsufficientBalance");
    }
}
