//! # Outbound Ports
//!
//! The capability-typed chain boundary. `ChainRpc` is the only way any
//! subsystem reads chain state or submits extrinsics; `ChainConnector`
//! performs the one-time connect handshake. Both are injected explicitly so
//! callers can substitute test doubles.

use crate::domain::{ChainConnection, ConnectionError, RpcError};
use async_trait::async_trait;
use shared_types::{
    AccountId, AccountInfo, Balance, BlockNumber, BridgeReceipt, CallHash,
    IdentityRegistration, LegislationId, LegislationKey, Motion, PublicProposal, ReceiptId,
    ReferendumStatus, SessionKeys, SignedExtrinsic, StakingLedger, Tier, TxStatus,
    ValidatorPrefs,
};
use tokio::sync::mpsc;

/// Typed read/write interface against the chain node.
///
/// Multi-key variants batch one round trip; their result ordering matches
/// the input key ordering index-for-index.
#[async_trait]
pub trait ChainRpc: Send + Sync {
    // --- balances & staking ---

    /// Dollar account record.
    async fn account_info(&self, who: &AccountId) -> Result<AccountInfo, RpcError>;

    /// Batched dollar account records, one per input key, in input order.
    async fn account_info_multi(&self, who: &[AccountId]) -> Result<Vec<AccountInfo>, RpcError>;

    /// Free merit balance.
    async fn merits_balance(&self, who: &AccountId) -> Result<Balance, RpcError>;

    /// Validator-pool staking ledger; `None` if never bonded.
    async fn staking_ledger(&self, who: &AccountId) -> Result<Option<StakingLedger>, RpcError>;

    /// Merits locked in the civic pool.
    async fn civic_lock(&self, who: &AccountId) -> Result<Balance, RpcError>;

    /// Merits locked behind an election ballot.
    async fn election_lock(&self, who: &AccountId) -> Result<Balance, RpcError>;

    /// Registered validators and their preferences.
    async fn validators(&self) -> Result<Vec<(AccountId, ValidatorPrefs)>, RpcError>;

    /// Registered session keys; `None` if not set.
    async fn session_keys(&self, who: &AccountId) -> Result<Option<SessionKeys>, RpcError>;

    // --- governance ---

    /// Current election candidates.
    async fn candidates(&self) -> Result<Vec<AccountId>, RpcError>;

    /// Active referenda with their chain-assigned indices.
    async fn referenda(&self) -> Result<Vec<(u32, ReferendumStatus)>, RpcError>;

    /// Public proposals waiting to be tabled.
    async fn public_proposals(&self) -> Result<Vec<PublicProposal>, RpcError>;

    /// Whether a preimage is already noted for this hash.
    async fn preimage_exists(&self, hash: &CallHash) -> Result<bool, RpcError>;

    /// Open council motions.
    async fn council_motions(&self) -> Result<Vec<Motion>, RpcError>;

    /// All legislation sections in a tier, with their compound keys.
    async fn legislation(&self, tier: Tier) -> Result<Vec<(LegislationKey, String)>, RpcError>;

    /// Veto entries for one document: `(section, vetoing account)` pairs.
    async fn legislation_vetos(
        &self,
        tier: Tier,
        id: LegislationId,
    ) -> Result<Vec<(Option<u32>, AccountId)>, RpcError>;

    // --- identity ---

    /// Identity registration; `None` if never set.
    async fn identity_of(
        &self,
        who: &AccountId,
    ) -> Result<Option<IdentityRegistration>, RpcError>;

    /// Batched identity registrations, one per input key, in input order.
    async fn identity_of_multi(
        &self,
        who: &[AccountId],
    ) -> Result<Vec<Option<IdentityRegistration>>, RpcError>;

    // --- registry & land ---

    /// Sealed company record by entity id.
    async fn company_record(&self, entity: u32) -> Result<Option<Vec<u8>>, RpcError>;

    /// Sealed land-parcel metadata by collection and item.
    async fn land_metadata(&self, collection: u32, item: u32)
        -> Result<Option<Vec<u8>>, RpcError>;

    // --- bridge & chain ---

    /// Bridge receipt by identifier.
    async fn bridge_receipt(
        &self,
        receipt_id: &ReceiptId,
    ) -> Result<Option<BridgeReceipt>, RpcError>;

    /// Best (most recent) block number.
    async fn best_block_number(&self) -> Result<BlockNumber, RpcError>;

    /// Next nonce for an account.
    async fn account_nonce(&self, who: &AccountId) -> Result<u64, RpcError>;

    // --- submission ---

    /// Submit a signed extrinsic. Status updates arrive on the returned
    /// channel in emission order; the channel closes after a terminal
    /// status.
    async fn submit_extrinsic(
        &self,
        xt: SignedExtrinsic,
    ) -> Result<mpsc::Receiver<TxStatus>, RpcError>;
}

/// One-time connect handshake: bring up the transport and capture the
/// decoding registry and runtime constants.
#[async_trait]
pub trait ChainConnector: Send + Sync {
    /// Establish the connection. Called at most once per process by the
    /// `ConnectionManager`.
    async fn connect(&self) -> Result<ChainConnection, ConnectionError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock chain RPC for testing.
///
/// Returns empty/default values, or errors when `should_fail` is set. The
/// `submit_script` is replayed to submitters verbatim.
#[derive(Clone, Default)]
pub struct MockChainRpc {
    /// Should every call return a transport error?
    pub should_fail: bool,
    /// Statuses handed to each submitter, in order.
    pub submit_script: Vec<TxStatus>,
}

impl MockChainRpc {
    fn gate(&self) -> Result<(), RpcError> {
        if self.should_fail {
            return Err(RpcError::Transport("mock failure".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl ChainRpc for MockChainRpc {
    async fn account_info(&self, _who: &AccountId) -> Result<AccountInfo, RpcError> {
        self.gate()?;
        Ok(AccountInfo::default())
    }

    async fn account_info_multi(&self, who: &[AccountId]) -> Result<Vec<AccountInfo>, RpcError> {
        self.gate()?;
        Ok(vec![AccountInfo::default(); who.len()])
    }

    async fn merits_balance(&self, _who: &AccountId) -> Result<Balance, RpcError> {
        self.gate()?;
        Ok(0)
    }

    async fn staking_ledger(&self, _who: &AccountId) -> Result<Option<StakingLedger>, RpcError> {
        self.gate()?;
        Ok(None)
    }

    async fn civic_lock(&self, _who: &AccountId) -> Result<Balance, RpcError> {
        self.gate()?;
        Ok(0)
    }

    async fn election_lock(&self, _who: &AccountId) -> Result<Balance, RpcError> {
        self.gate()?;
        Ok(0)
    }

    async fn validators(&self) -> Result<Vec<(AccountId, ValidatorPrefs)>, RpcError> {
        self.gate()?;
        Ok(vec![])
    }

    async fn session_keys(&self, _who: &AccountId) -> Result<Option<SessionKeys>, RpcError> {
        self.gate()?;
        Ok(None)
    }

    async fn candidates(&self) -> Result<Vec<AccountId>, RpcError> {
        self.gate()?;
        Ok(vec![])
    }

    async fn referenda(&self) -> Result<Vec<(u32, ReferendumStatus)>, RpcError> {
        self.gate()?;
        Ok(vec![])
    }

    async fn public_proposals(&self) -> Result<Vec<PublicProposal>, RpcError> {
        self.gate()?;
        Ok(vec![])
    }

    async fn preimage_exists(&self, _hash: &CallHash) -> Result<bool, RpcError> {
        self.gate()?;
        Ok(false)
    }

    async fn council_motions(&self) -> Result<Vec<Motion>, RpcError> {
        self.gate()?;
        Ok(vec![])
    }

    async fn legislation(&self, _tier: Tier) -> Result<Vec<(LegislationKey, String)>, RpcError> {
        self.gate()?;
        Ok(vec![])
    }

    async fn legislation_vetos(
        &self,
        _tier: Tier,
        _id: LegislationId,
    ) -> Result<Vec<(Option<u32>, AccountId)>, RpcError> {
        self.gate()?;
        Ok(vec![])
    }

    async fn identity_of(
        &self,
        _who: &AccountId,
    ) -> Result<Option<IdentityRegistration>, RpcError> {
        self.gate()?;
        Ok(None)
    }

    async fn identity_of_multi(
        &self,
        who: &[AccountId],
    ) -> Result<Vec<Option<IdentityRegistration>>, RpcError> {
        self.gate()?;
        Ok(vec![None; who.len()])
    }

    async fn company_record(&self, _entity: u32) -> Result<Option<Vec<u8>>, RpcError> {
        self.gate()?;
        Ok(None)
    }

    async fn land_metadata(
        &self,
        _collection: u32,
        _item: u32,
    ) -> Result<Option<Vec<u8>>, RpcError> {
        self.gate()?;
        Ok(None)
    }

    async fn bridge_receipt(
        &self,
        _receipt_id: &ReceiptId,
    ) -> Result<Option<BridgeReceipt>, RpcError> {
        self.gate()?;
        Ok(None)
    }

    async fn best_block_number(&self) -> Result<BlockNumber, RpcError> {
        self.gate()?;
        Ok(0)
    }

    async fn account_nonce(&self, _who: &AccountId) -> Result<u64, RpcError> {
        self.gate()?;
        Ok(0)
    }

    async fn submit_extrinsic(
        &self,
        _xt: SignedExtrinsic,
    ) -> Result<mpsc::Receiver<TxStatus>, RpcError> {
        self.gate()?;
        let (tx, rx) = mpsc::channel(self.submit_script.len().max(1));
        for status in &self.submit_script {
            // Buffered sends; the receiver drains later.
            let _ = tx.try_send(status.clone());
        }
        Ok(rx)
    }
}

/// Mock connector for testing the manager's caching behavior.
#[derive(Clone, Default)]
pub struct MockConnector {
    /// Should the connect attempt fail?
    pub should_fail: bool,
}

#[async_trait]
impl ChainConnector for MockConnector {
    async fn connect(&self) -> Result<ChainConnection, ConnectionError> {
        if self.should_fail {
            return Err(ConnectionError::Unreachable("mock refusal".to_string()));
        }
        Ok(ChainConnection::new(
            std::sync::Arc::new(MockChainRpc::default()),
            shared_types::ErrorRegistry::polis_default(),
            shared_types::ChainConstants::default(),
        ))
    }
}
