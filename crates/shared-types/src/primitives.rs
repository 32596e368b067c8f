//! # Chain Primitives
//!
//! Fixed-width primitive types shared by every subsystem crate.

use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

/// A 32-byte hash (SHA-256).
pub type Hash = [u8; 32];

/// A 64-byte Ed25519 signature.
pub type Signature = [u8; 64];

/// A token balance in grains, the chain's smallest indivisible unit.
pub type Balance = u128;

/// A block number.
pub type BlockNumber = u32;

/// A 20-byte Ethereum-side address (bridge counterparty).
pub type EthAddress = [u8; 20];

/// A 32-byte account identifier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Encode, Decode,
)]
pub struct AccountId(pub [u8; 32]);

impl AccountId {
    /// Raw byte view.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl std::fmt::Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Identifier of a bridge transfer receipt.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Encode, Decode,
)]
pub struct ReceiptId(pub [u8; 32]);

impl std::fmt::Display for ReceiptId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(self.0))
    }
}

/// Hash of a canonical-encoded chain call.
///
/// Used as the membership key for preimages, council motions, and
/// referendum proposals. Two logically identical calls always produce the
/// same `CallHash`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Encode, Decode,
)]
pub struct CallHash(pub Hash);

impl std::fmt::Display for CallHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}
