//! # Typed Call Tree
//!
//! The closed tagged union of every chain call the client can construct.
//! Pallet and call selection are enum variants rather than strings, so an
//! unknown call cannot be expressed, and [`Call::hash`] over the canonical
//! encoding is the single definition of call identity used by preimage,
//! motion, and proposal membership checks.

use crate::codec::encode_canonical;
use crate::primitives::{AccountId, Balance, CallHash, EthAddress, ReceiptId};
use crate::records::{
    IdentityInfo, Judgement, LegislationId, RewardDestination, SessionKeys, Tier,
};
use parity_scale_codec::{Decode, Encode};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Calls on the dollar balances pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum BalancesCall {
    /// Move dollars to another account.
    Transfer {
        /// Receiving account.
        dest: AccountId,
        /// Amount in grains.
        value: Balance,
    },
}

/// Calls on the merit token pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum MeritsCall {
    /// Move merits to another account.
    Transfer {
        /// Receiving account.
        dest: AccountId,
        /// Amount in grains.
        value: Balance,
    },
}

/// Calls on the staking pallet. The pallet runs two pools: the validator
/// pool (dollar stake securing the chain) and the civic pool (merit stake
/// backing governance weight).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum StakingCall {
    /// Bond dollars into the validator pool for the first time.
    Bond {
        /// Amount in grains.
        value: Balance,
        /// Where rewards go.
        payee: RewardDestination,
    },
    /// Add dollars to an existing validator-pool bond.
    BondExtra {
        /// Additional amount in grains.
        max_additional: Balance,
    },
    /// Bond merits into the civic pool for the first time.
    CivicBond {
        /// Amount in grains.
        value: Balance,
        /// Where rewards go.
        payee: RewardDestination,
    },
    /// Add merits to an existing civic-pool bond.
    CivicBondExtra {
        /// Additional amount in grains.
        max_additional: Balance,
    },
    /// Schedule stake to unlock.
    Unbond {
        /// Amount in grains.
        value: Balance,
    },
    /// Register intent to validate.
    Validate {
        /// Commission in parts per million.
        commission_permill: u32,
    },
    /// Register session keys ahead of validating.
    SetKeys {
        /// The keys to register.
        keys: SessionKeys,
    },
    /// Stop validating.
    Chill,
}

/// Calls on the elections pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum ElectionsCall {
    /// Stand as a candidate in the next congressional election.
    AddCandidate,
    /// Withdraw a pending candidacy.
    RenounceCandidacy,
    /// Submit a ranked ballot.
    Vote {
        /// Candidates in order of preference.
        ballot: Vec<AccountId>,
    },
}

/// A referendum vote with the stake behind it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub struct ReferendumVote {
    /// Approve or reject.
    pub aye: bool,
    /// Stake in grains backing the vote.
    pub balance: Balance,
}

/// Calls on the democracy pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum DemocracyCall {
    /// Propose a call by hash, locking a deposit.
    Propose {
        /// Hash of the proposed call; its preimage must be noted.
        proposal_hash: CallHash,
        /// Deposit in grains.
        deposit: Balance,
    },
    /// Back an existing public proposal.
    Second {
        /// Proposal index.
        proposal: u32,
    },
    /// Vote on an active referendum.
    Vote {
        /// Referendum index.
        ref_index: u32,
        /// The vote and its stake.
        vote: ReferendumVote,
    },
    /// Register the full encoded content of a proposed call.
    NotePreimage {
        /// Canonical encoding of the call.
        bytes: Vec<u8>,
    },
}

/// Calls on the council (congress) pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum CouncilCall {
    /// Open a motion to dispatch `call` if `threshold` members approve.
    Propose {
        /// Required aye votes.
        threshold: u32,
        /// The call to dispatch on success.
        call: Box<Call>,
    },
    /// Vote on an open motion.
    Vote {
        /// Hash of the motion's call.
        proposal: CallHash,
        /// Motion index.
        index: u32,
        /// Aye or nay.
        approve: bool,
    },
    /// Close a motion whose outcome is decided.
    Close {
        /// Hash of the motion's call.
        proposal: CallHash,
        /// Motion index.
        index: u32,
    },
}

/// Calls on the legislation pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum LegislationCall {
    /// Enact a legislation section (congress origin).
    Add {
        /// Document tier.
        tier: Tier,
        /// Document identifier.
        id: LegislationId,
        /// Section index; `None` for a single-section document.
        section: Option<u32>,
        /// Section text.
        content: String,
    },
    /// Repeal a legislation section (or a whole document).
    ///
    /// The hash of this exact call is what the projection layer recomputes
    /// when deciding whether a repeal is already in flight.
    Repeal {
        /// Document tier.
        tier: Tier,
        /// Document identifier.
        id: LegislationId,
        /// Section index; `None` repeals the whole document.
        section: Option<u32>,
    },
    /// Cast a citizen veto against a section.
    Veto {
        /// Document tier.
        tier: Tier,
        /// Document identifier.
        id: LegislationId,
        /// Section index; `None` vetoes the whole document.
        section: Option<u32>,
    },
    /// Withdraw a previously cast veto.
    RevertVeto {
        /// Document tier.
        tier: Tier,
        /// Document identifier.
        id: LegislationId,
        /// Section index; `None` addresses the whole document.
        section: Option<u32>,
    },
}

/// Calls on the identity pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum IdentityCall {
    /// Register or replace the caller's identity fields.
    SetIdentity(Box<IdentityInfo>),
    /// Ask a registrar to judge the caller's identity.
    RequestJudgement {
        /// Registrar index.
        registrar: u32,
    },
    /// Record a judgement (registrar origin).
    ProvideJudgement {
        /// Account being judged.
        target: AccountId,
        /// The verdict.
        judgement: Judgement,
    },
}

/// Calls on the company registry pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum RegistryCall {
    /// Register a company. `payload` is the sealed company record.
    RegisterCompany {
        /// Sealed (encoded + compressed) company record.
        payload: Vec<u8>,
    },
}

/// Calls on the NFT pallet (land parcels).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum NftsCall {
    /// Attach metadata to an item. `payload` is the sealed parcel record.
    SetMetadata {
        /// Collection identifier.
        collection: u32,
        /// Item identifier.
        item: u32,
        /// Sealed (encoded + compressed) parcel record.
        payload: Vec<u8>,
    },
}

/// Calls on the Ethereum bridge pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum BridgeCall {
    /// Lock funds on this chain for release on Ethereum.
    Deposit {
        /// Amount in grains.
        amount: Balance,
        /// Ethereum-side recipient.
        recipient: EthAddress,
    },
    /// Claim an approved incoming transfer.
    Withdraw {
        /// Receipt being claimed.
        receipt_id: ReceiptId,
    },
}

/// Calls on the utility pallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum UtilityCall {
    /// Dispatch all inner calls atomically: one failure reverts the batch.
    BatchAll(Vec<Call>),
}

/// An unsigned chain call. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, Encode, Decode)]
pub enum Call {
    /// Dollar balances pallet.
    Balances(BalancesCall),
    /// Merit token pallet.
    Merits(MeritsCall),
    /// Staking pallet.
    Staking(StakingCall),
    /// Elections pallet.
    Elections(ElectionsCall),
    /// Democracy pallet.
    Democracy(DemocracyCall),
    /// Council pallet.
    Council(CouncilCall),
    /// Legislation pallet.
    Legislation(LegislationCall),
    /// Identity pallet.
    Identity(IdentityCall),
    /// Company registry pallet.
    Registry(RegistryCall),
    /// NFT pallet.
    Nfts(NftsCall),
    /// Ethereum bridge pallet.
    Bridge(BridgeCall),
    /// Utility pallet.
    Utility(UtilityCall),
}

impl Call {
    /// Hash of the canonical encoding. Call identity everywhere: preimage
    /// registration, motion membership, proposal membership.
    pub fn hash(&self) -> CallHash {
        let mut hasher = Sha256::new();
        hasher.update(encode_canonical(self));
        let mut out = [0u8; 32];
        out.copy_from_slice(&hasher.finalize());
        CallHash(out)
    }

    /// Wrap calls into an atomic batch.
    pub fn batch_all(calls: Vec<Call>) -> Call {
        Call::Utility(UtilityCall::BatchAll(calls))
    }

    /// Whether this is an atomic batch.
    pub fn is_batch(&self) -> bool {
        matches!(self, Call::Utility(UtilityCall::BatchAll(_)))
    }

    /// Inner calls of a batch; a plain call yields itself.
    pub fn flatten(&self) -> Vec<&Call> {
        match self {
            Call::Utility(UtilityCall::BatchAll(inner)) => inner.iter().collect(),
            other => vec![other],
        }
    }
}
