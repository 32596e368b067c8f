//! # Outbound Ports
//!
//! The wallet capability. In the browser this is the signing extension; the
//! engine receives it as an explicitly passed object, never an ambient
//! global. It never sees private key material, only addresses and a
//! signing capability.

use crate::domain::WalletError;
use async_trait::async_trait;
use ed25519_dalek::{Signer, SigningKey};
use shared_types::{AccountId, Signature};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A signing capability for one account. The wallet owns the key; holders
/// of this reference can only request signatures.
pub trait ExtrinsicSigner: Send + Sync {
    /// The account this capability signs for.
    fn address(&self) -> AccountId;

    /// Sign a payload. Each call is one user-visible signature request.
    fn sign(&self, payload: &[u8]) -> Result<Signature, WalletError>;
}

/// An external wallet exposing accounts and per-account signers.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Addresses the wallet holds.
    async fn accounts(&self) -> Result<Vec<AccountId>, WalletError>;

    /// A signing capability for one held address.
    async fn signer(&self, address: &AccountId) -> Result<Arc<dyn ExtrinsicSigner>, WalletError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock wallet holding deterministic ed25519 keys.
pub struct MockWallet {
    keys: Vec<SigningKey>,
    /// Simulate the user rejecting every signature request.
    pub reject_signing: bool,
    signatures: Arc<AtomicUsize>,
}

impl MockWallet {
    /// Wallet with `count` deterministic accounts.
    pub fn with_accounts(count: u8) -> Self {
        let keys = (1..=count)
            .map(|seed| SigningKey::from_bytes(&[seed; 32]))
            .collect();
        Self {
            keys,
            reject_signing: false,
            signatures: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Address of account `index`.
    pub fn address(&self, index: usize) -> AccountId {
        AccountId(self.keys[index].verifying_key().to_bytes())
    }

    /// Signature requests issued so far, across all signers.
    pub fn signatures_issued(&self) -> usize {
        self.signatures.load(Ordering::SeqCst)
    }
}

struct MockSigner {
    key: SigningKey,
    reject: bool,
    signatures: Arc<AtomicUsize>,
}

impl ExtrinsicSigner for MockSigner {
    fn address(&self) -> AccountId {
        AccountId(self.key.verifying_key().to_bytes())
    }

    fn sign(&self, payload: &[u8]) -> Result<Signature, WalletError> {
        self.signatures.fetch_add(1, Ordering::SeqCst);
        if self.reject {
            return Err(WalletError::Rejected);
        }
        Ok(self.key.sign(payload).to_bytes())
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn accounts(&self) -> Result<Vec<AccountId>, WalletError> {
        Ok(self
            .keys
            .iter()
            .map(|k| AccountId(k.verifying_key().to_bytes()))
            .collect())
    }

    async fn signer(&self, address: &AccountId) -> Result<Arc<dyn ExtrinsicSigner>, WalletError> {
        let key = self
            .keys
            .iter()
            .find(|k| AccountId(k.verifying_key().to_bytes()) == *address)
            .ok_or_else(|| WalletError::UnknownAddress(address.to_string()))?;
        Ok(Arc::new(MockSigner {
            key: key.clone(),
            reject: self.reject_signing,
            signatures: self.signatures.clone(),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signature as DalekSignature, Verifier};

    #[tokio::test]
    async fn test_wallet_lists_deterministic_accounts() {
        let wallet = MockWallet::with_accounts(2);
        let accounts = wallet.accounts().await.unwrap();
        assert_eq!(accounts.len(), 2);
        assert_eq!(accounts[0], wallet.address(0));
    }

    #[tokio::test]
    async fn test_signer_produces_verifiable_signatures() {
        let wallet = MockWallet::with_accounts(1);
        let address = wallet.address(0);
        let signer = wallet.signer(&address).await.unwrap();

        let payload = b"payload";
        let signature = signer.sign(payload).unwrap();

        let vk = ed25519_dalek::VerifyingKey::from_bytes(address.as_bytes()).unwrap();
        let sig = DalekSignature::from_bytes(&signature);
        assert!(vk.verify(payload, &sig).is_ok());
        assert_eq!(wallet.signatures_issued(), 1);
    }

    #[tokio::test]
    async fn test_unknown_address_refused() {
        let wallet = MockWallet::with_accounts(1);
        let result = wallet.signer(&AccountId([0xFF; 32])).await;
        assert!(matches!(result, Err(WalletError::UnknownAddress(_))));
    }

    #[tokio::test]
    async fn test_rejection_switch() {
        let mut wallet = MockWallet::with_accounts(1);
        wallet.reject_signing = true;
        let address = wallet.address(0);
        let signer = wallet.signer(&address).await.unwrap();
        assert_eq!(signer.sign(b"x"), Err(WalletError::Rejected));
    }
}
