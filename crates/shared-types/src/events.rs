//! # Submission Events & Outcomes
//!
//! Status updates emitted while an extrinsic moves toward inclusion, the
//! dispatch error taxonomy, and the result record every mutating operation
//! resolves with.

use crate::calls::Call;
use crate::primitives::{AccountId, Hash, Signature};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, Bytes};

/// Arithmetic failure classes a dispatch can report.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ArithmeticKind {
    /// Value overflowed its type.
    Overflow,
    /// Value underflowed its type.
    Underflow,
    /// Division by zero.
    DivisionByZero,
}

/// A chain-level dispatch failure, raw form.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DispatchError {
    /// A pallet-specific error, identified positionally. The error
    /// registry resolves the indices to names and docs.
    Module {
        /// Index of the failing pallet.
        pallet_index: u8,
        /// Index of the error within the pallet.
        error_index: u8,
    },
    /// The caller's origin was not allowed to make this call.
    BadOrigin,
    /// Arithmetic failed during dispatch.
    Arithmetic(ArithmeticKind),
    /// Anything the taxonomy does not cover.
    Other(String),
}

/// One event deposited while an extrinsic executed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainEvent {
    /// Emitting pallet.
    pub pallet: String,
    /// Event name.
    pub method: String,
}

/// Everything known once an extrinsic lands in a block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InBlockDetails {
    /// Hash of the including block.
    pub block_hash: Hash,
    /// Events deposited by the extrinsic.
    pub events: Vec<ChainEvent>,
    /// The dispatch failure, if the call reverted.
    pub dispatch_error: Option<DispatchError>,
}

/// Status updates for a submitted extrinsic, in emission order.
///
/// `InBlock` is terminal for the submission engine; finalization is not
/// tracked at this layer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TxStatus {
    /// Accepted into the transaction pool.
    Ready,
    /// Gossiped to peers.
    Broadcast,
    /// Included in a block, with the dispatch outcome.
    InBlock(InBlockDetails),
    /// Dropped from the pool before inclusion.
    Dropped,
    /// Rejected as invalid before inclusion.
    Invalid(String),
}

/// User-facing error descriptor attached to every mutation outcome.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDescriptor {
    /// Whether the operation failed.
    pub is_error: bool,
    /// Human-readable detail; empty when `is_error` is false.
    pub details: String,
}

impl ErrorDescriptor {
    /// The no-error descriptor.
    pub fn ok() -> Self {
        Self::default()
    }

    /// A failure descriptor with the given detail.
    pub fn failure(details: impl Into<String>) -> Self {
        Self {
            is_error: true,
            details: details.into(),
        }
    }
}

/// Produced exactly once per submitted extrinsic, after block inclusion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionResult {
    /// Hash of the including block.
    pub block_hash: Hash,
    /// Events deposited by the extrinsic.
    pub events: Vec<ChainEvent>,
    /// Dispatch outcome.
    pub error_data: ErrorDescriptor,
}

/// A signed, submittable extrinsic.
#[serde_as]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedExtrinsic {
    /// The call being dispatched.
    pub call: Call,
    /// The signing account.
    pub signer: AccountId,
    /// Account nonce the signature covers.
    pub nonce: u64,
    /// Signature over [`SignedExtrinsic::signing_payload`].
    #[serde_as(as = "Bytes")]
    pub signature: Signature,
}

impl SignedExtrinsic {
    /// The byte payload a wallet signs: the canonical call encoding plus
    /// the nonce, so a signature cannot be replayed for a different call or
    /// a different position in the account's history.
    pub fn signing_payload(call: &Call, nonce: u64) -> Vec<u8> {
        let mut payload = crate::codec::encode_canonical(call);
        payload.extend_from_slice(&nonce.to_le_bytes());
        payload
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calls::{BalancesCall, Call};
    use crate::primitives::AccountId;

    #[test]
    fn test_error_descriptor_defaults_to_ok() {
        let desc = ErrorDescriptor::ok();
        assert!(!desc.is_error);
        assert!(desc.details.is_empty());
    }

    #[test]
    fn test_failure_descriptor_carries_details() {
        let desc = ErrorDescriptor::failure("Balances::InsufficientBalance");
        assert!(desc.is_error);
        assert!(desc.details.contains("InsufficientBalance"));
    }

    #[test]
    fn test_signing_payload_binds_nonce() {
        let call = Call::Balances(BalancesCall::Transfer {
            dest: AccountId([1u8; 32]),
            value: 10,
        });
        let a = SignedExtrinsic::signing_payload(&call, 0);
        let b = SignedExtrinsic::signing_payload(&call, 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_signing_payload_binds_call() {
        let call_a = Call::Balances(BalancesCall::Transfer {
            dest: AccountId([1u8; 32]),
            value: 10,
        });
        let call_b = Call::Balances(BalancesCall::Transfer {
            dest: AccountId([1u8; 32]),
            value: 11,
        });
        assert_ne!(
            SignedExtrinsic::signing_payload(&call_a, 0),
            SignedExtrinsic::signing_payload(&call_b, 0)
        );
    }
}
