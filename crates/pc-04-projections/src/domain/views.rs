//! # Composite Views
//!
//! The UI-ready records the projection layer assembles. Every chain-sourced
//! field is authoritative; centralized fields may be empty defaults.

use serde::{Deserialize, Serialize};
use shared_types::{
    AccountId, Balance, BlockNumber, BridgeAsset, BridgeReceipt, CallHash, CompanyRecord,
    IdentityRegistration, LandParcel, LegislationId, PublicProposal, ReceiptId, ReferendumStatus,
    Tier,
};
use std::collections::BTreeSet;

/// Balance composition for one account, each field sourced from its own
/// storage item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceView {
    /// Merits bonded into the civic pool.
    pub liberstake: Balance,
    /// Dollars bonded into the validator pool.
    pub polkastake: Balance,
    /// Merits free to move.
    pub liquid_merits: Balance,
    /// Total dollars including reserved.
    pub total_amount: Balance,
    /// Dollars free to transfer right now.
    pub liquid_amount: Balance,
    /// Total merits.
    pub merits_total_amount: Balance,
    /// Merits locked behind an election ballot.
    pub election_lock: Balance,
}

/// One legislation section with its veto set and repeal-action pointers.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegislationRecord {
    /// Document tier.
    pub tier: Tier,
    /// Document identifier.
    pub id: LegislationId,
    /// Section index; `None` for a single-section document.
    pub section: Option<u32>,
    /// Section text.
    pub content: String,
    /// Citizens who vetoed this section.
    pub vetos: BTreeSet<AccountId>,
    /// Hash of a live council motion that would repeal this section.
    pub repeal_motion: Option<CallHash>,
    /// Hash of an active referendum proposal that would repeal it.
    pub repeal_referendum: Option<CallHash>,
    /// Hash of a public proposal that would repeal it.
    pub repeal_proposal: Option<CallHash>,
}

/// Centralized-backend record describing a referendum's human context.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReferendumMeta {
    /// Chain-assigned referendum/proposal index the record refers to.
    pub index: u32,
    /// Discussion link.
    pub link: String,
    /// Display name.
    pub name: String,
    /// Longer description.
    pub description: String,
    /// Proposer as the backend recorded it.
    pub proposer_address: String,
}

/// An on-chain referendum joined with its centralized metadata.
///
/// The chain side is always present; the centralized fields default to
/// empty when the backend has no matching record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferendumProjection {
    /// Chain-assigned index.
    pub index: u32,
    /// The on-chain referendum.
    pub status: ReferendumStatus,
    /// Discussion link, possibly empty.
    pub link: String,
    /// Display name, possibly empty.
    pub name: String,
    /// Description, possibly empty.
    pub description: String,
    /// Proposer per the backend, possibly empty.
    pub proposer_address: String,
}

/// A public proposal joined with its centralized metadata.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProposalProjection {
    /// The on-chain proposal.
    pub proposal: PublicProposal,
    /// Discussion link, possibly empty.
    pub link: String,
    /// Display name, possibly empty.
    pub name: String,
    /// Description, possibly empty.
    pub description: String,
}

/// Identity projection with the citizenship precondition surfaced.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentityProjection {
    /// The account.
    pub address: AccountId,
    /// The registration, if any.
    pub registration: Option<IdentityRegistration>,
    /// Whether citizen-gated governance actions would pass for this
    /// account right now.
    pub is_citizen: bool,
}

/// A company registry entry after opening its sealed payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CompanyProjection {
    /// The payload opened into a record.
    Valid {
        /// Entity id.
        entity: u32,
        /// The decoded record.
        record: CompanyRecord,
    },
    /// The payload was corrupt; the entry is preserved as a placeholder so
    /// one bad record does not abort a batch view.
    Invalid {
        /// Entity id.
        entity: u32,
        /// Why it failed to open.
        reason: String,
    },
}

/// A land NFT's metadata after opening its sealed payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LandProjection {
    /// The payload opened into a parcel.
    Valid {
        /// Item id within the land collection.
        item: u32,
        /// The decoded parcel.
        parcel: LandParcel,
    },
    /// The payload was corrupt.
    Invalid {
        /// Item id within the land collection.
        item: u32,
        /// Why it failed to open.
        reason: String,
    },
}

/// Lifecycle of an incoming bridge transfer, derived from chain storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BridgeTransferStatus {
    /// No receipt under this identifier.
    Unknown,
    /// Receipt exists, relay voting not finished.
    Voting,
    /// Approved; the withdrawal delay is still running.
    Approved,
    /// Past the delay; claimable now.
    Ready,
    /// Already claimed.
    Processed,
}

impl BridgeTransferStatus {
    /// Derive the status from the receipt and the current best block.
    ///
    /// Monotonic in `best`: once `Ready`, later blocks never regress it.
    pub fn derive(
        receipt: Option<&BridgeReceipt>,
        best: BlockNumber,
        delay: BlockNumber,
    ) -> Self {
        match receipt {
            None => Self::Unknown,
            Some(r) if r.processed => Self::Processed,
            Some(r) => match r.approved_at {
                None => Self::Voting,
                Some(approved_at) if best >= approved_at.saturating_add(delay) => Self::Ready,
                Some(_) => Self::Approved,
            },
        }
    }
}

/// A bridge transfer as the dashboard shows it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeTransfer {
    /// Receipt identifier.
    pub receipt_id: ReceiptId,
    /// Asset being moved; unknown receipts carry none.
    pub asset: Option<BridgeAsset>,
    /// Derived lifecycle status.
    pub status: BridgeTransferStatus,
}

/// One validator with its registration state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatorProjection {
    /// Validator account.
    pub account: AccountId,
    /// Commission in parts per million.
    pub commission_permill: u32,
    /// Bonded stake backing it.
    pub total_stake: Balance,
    /// Whether session keys are registered.
    pub session_keys_set: bool,
}

/// Election timing derived from runtime constants and the current block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElectionSchedule {
    /// Blocks between elections.
    pub period: BlockNumber,
    /// Blocks the voting window stays open.
    pub voting_duration: BlockNumber,
    /// Block at which the next election starts.
    pub next_election_at: BlockNumber,
}
