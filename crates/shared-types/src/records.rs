//! # Storage Records
//!
//! Typed representations of the chain storage items the client reads. Each
//! record mirrors one storage entry; the generic decoder does not know these
//! shapes, so they are declared here once and decoded through the canonical
//! codec.

use crate::primitives::{AccountId, Balance, BlockNumber, CallHash, EthAddress};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};

// =============================================================================
// BALANCES & STAKING
// =============================================================================

/// The system account record: dollar balances for one account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct AccountInfo {
    /// Free balance, including locked-but-not-reserved funds.
    pub free: Balance,
    /// Reserved balance (deposits, bonds held by pallets).
    pub reserved: Balance,
    /// Portion of `free` frozen by locks.
    pub frozen: Balance,
}

impl AccountInfo {
    /// Balance that can actually be transferred right now.
    pub fn transferable(&self) -> Balance {
        self.free.saturating_sub(self.frozen)
    }
}

/// One chunk of stake scheduled to unlock.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct UnlockChunk {
    /// Amount scheduled to unlock.
    pub value: Balance,
    /// Era at which it becomes withdrawable.
    pub era: u32,
}

/// The staking ledger for a bonded account.
///
/// Absent entirely for accounts that never bonded; callers treat a missing
/// ledger as all-zero stake.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct StakingLedger {
    /// The stash account the stake belongs to.
    pub stash: AccountId,
    /// Total bonded, including unlocking chunks.
    pub total: Balance,
    /// Actively staked portion.
    pub active: Balance,
    /// Chunks on their way out of the pool.
    pub unlocking: Vec<UnlockChunk>,
}

/// Where staking rewards are paid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum RewardDestination {
    /// Compound into the active stake.
    #[default]
    Staked,
    /// Pay out to the stash as free balance.
    Stash,
}

/// Validator preferences as registered on chain.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct ValidatorPrefs {
    /// Commission in parts per million.
    pub commission_permill: u32,
}

/// Session keys a validator registers before activating.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct SessionKeys {
    /// Block authoring key.
    pub aura: [u8; 32],
    /// Finality voting key.
    pub grandpa: [u8; 32],
}

// =============================================================================
// IDENTITY
// =============================================================================

/// A registrar's verdict on an identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum Judgement {
    /// No judgement yet.
    Unknown,
    /// Judgement requested, fee locked.
    Requested,
    /// Identity looks plausible but unverified.
    Reasonable,
    /// Verified; the holder is a citizen in good standing.
    KnownGood,
    /// Was verified once, now stale.
    OutOfDate,
    /// Actively wrong or fraudulent.
    Erroneous,
}

/// The identity fields an account registers about itself.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct IdentityInfo {
    /// Display name.
    pub display: String,
    /// Legal name.
    pub legal: String,
    /// Web presence.
    pub web: String,
    /// Contact email.
    pub email: String,
    /// Whether the holder claims citizenship (subject to judgement).
    pub citizen: bool,
}

/// An on-chain identity registration: claimed info plus registrar verdicts.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct IdentityRegistration {
    /// Judgements by registrar index.
    pub judgements: Vec<(u32, Judgement)>,
    /// The claimed identity fields.
    pub info: IdentityInfo,
}

impl IdentityRegistration {
    /// Citizenship requires the claim plus at least one `KnownGood` verdict.
    pub fn is_citizen(&self) -> bool {
        self.info.citizen
            && self
                .judgements
                .iter()
                .any(|(_, j)| matches!(j, Judgement::KnownGood))
    }
}

// =============================================================================
// GOVERNANCE
// =============================================================================

/// Vote totals for one referendum.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Tally {
    /// Stake voting aye.
    pub ayes: Balance,
    /// Stake voting nay.
    pub nays: Balance,
    /// Total stake that voted.
    pub turnout: Balance,
}

/// An active referendum as stored on chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct ReferendumStatus {
    /// Block at which voting ends.
    pub end: BlockNumber,
    /// Hash of the proposed call.
    pub proposal: CallHash,
    /// Current vote totals.
    pub tally: Tally,
}

/// A public proposal waiting to be tabled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct PublicProposal {
    /// Chain-assigned proposal index.
    pub index: u32,
    /// Hash of the proposed call.
    pub proposal: CallHash,
    /// Who proposed it.
    pub proposer: AccountId,
    /// Deposit locked behind it.
    pub deposit: Balance,
}

/// A council motion: an internal governance-body proposal awaiting member
/// votes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct Motion {
    /// Chain-assigned motion index (referenced by vote/close calls).
    pub index: u32,
    /// Hash of `call` (the membership key).
    pub hash: CallHash,
    /// The call the motion would dispatch.
    pub call: crate::calls::Call,
    /// Member votes required to pass.
    pub threshold: u32,
    /// Members voting aye.
    pub ayes: Vec<AccountId>,
    /// Members voting nay.
    pub nays: Vec<AccountId>,
    /// Block at which the motion expires.
    pub end: BlockNumber,
}

// =============================================================================
// LEGISLATION
// =============================================================================

/// Classification level of a legislative document.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Encode, Decode,
)]
pub enum Tier {
    /// Constitutional text.
    Constitution,
    /// Ratified international treaty.
    InternationalTreaty,
    /// Ordinary law.
    Law,
    /// Executive regulation.
    Regulation,
    /// One-off decision.
    Decision,
}

/// Identifier of a legislative document within a tier.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Encode, Decode,
)]
pub struct LegislationId {
    /// Year of enactment.
    pub year: u32,
    /// Running index within the year.
    pub index: u32,
}

/// Full storage key of one legislation section.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord,
    Serialize, Deserialize, Encode, Decode,
)]
pub struct LegislationKey {
    /// Document tier.
    pub tier: Tier,
    /// Document identifier.
    pub id: LegislationId,
    /// Section within the document; `None` addresses the whole document.
    pub section: Option<u32>,
}

// =============================================================================
// REGISTRY & LAND
// =============================================================================

/// A registered company record (stored sealed on chain).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct CompanyRecord {
    /// Registered company name.
    pub name: String,
    /// Declared business purpose.
    pub purpose: String,
    /// Registered office address.
    pub registered_office: String,
    /// Owning accounts.
    pub owners: Vec<AccountId>,
}

/// One vertex of a land-parcel boundary, in microdegrees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct GeoCoordinate {
    /// Latitude in microdegrees.
    pub lat_micro: i64,
    /// Longitude in microdegrees.
    pub lon_micro: i64,
}

/// Metadata of a land NFT (stored sealed on chain).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct LandParcel {
    /// Boundary polygon vertices.
    pub coordinates: Vec<GeoCoordinate>,
    /// Administrative district label.
    pub district: String,
}

// =============================================================================
// BRIDGE
// =============================================================================

/// Which asset a bridge transfer moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum BridgeAsset {
    /// The liquid dollar token.
    Dollars,
    /// The merit governance token.
    Merits,
}

/// A bridge transfer receipt as stored on chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct BridgeReceipt {
    /// Asset being moved.
    pub asset: BridgeAsset,
    /// Amount in grains.
    pub amount: Balance,
    /// Ethereum-side counterparty.
    pub recipient: EthAddress,
    /// Block at which relay voting approved the transfer, if it has.
    pub approved_at: Option<BlockNumber>,
    /// Whether the funds were already claimed.
    pub processed: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transferable_subtracts_frozen() {
        let info = AccountInfo {
            free: 100,
            reserved: 10,
            frozen: 30,
        };
        assert_eq!(info.transferable(), 70);
    }

    #[test]
    fn test_transferable_saturates() {
        let info = AccountInfo {
            free: 10,
            reserved: 0,
            frozen: 30,
        };
        assert_eq!(info.transferable(), 0);
    }

    #[test]
    fn test_citizen_requires_known_good() {
        let mut reg = IdentityRegistration {
            judgements: vec![(0, Judgement::Reasonable)],
            info: IdentityInfo {
                citizen: true,
                ..Default::default()
            },
        };
        assert!(!reg.is_citizen());

        reg.judgements.push((1, Judgement::KnownGood));
        assert!(reg.is_citizen());
    }

    #[test]
    fn test_citizen_requires_claim() {
        let reg = IdentityRegistration {
            judgements: vec![(0, Judgement::KnownGood)],
            info: IdentityInfo::default(),
        };
        assert!(!reg.is_citizen());
    }

    #[test]
    fn test_legislation_key_ordering_by_tier_then_id() {
        let a = LegislationKey {
            tier: Tier::Constitution,
            id: LegislationId { year: 2024, index: 1 },
            section: None,
        };
        let b = LegislationKey {
            tier: Tier::Law,
            id: LegislationId { year: 2020, index: 1 },
            section: None,
        };
        assert!(a < b);
    }
}
