//! # Chain Registries
//!
//! Chain-specific metadata captured once during the connect handshake: the
//! module-error registry the generic decoder does not know, and the runtime
//! constants the client needs for projections.

use crate::primitives::BlockNumber;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Well-known pallet indices on the Polis chain.
pub mod pallet {
    /// System pallet.
    pub const SYSTEM: u8 = 0;
    /// Dollar balances pallet.
    pub const BALANCES: u8 = 4;
    /// Merit token pallet.
    pub const MERITS: u8 = 5;
    /// Staking pallet.
    pub const STAKING: u8 = 6;
    /// Elections pallet.
    pub const ELECTIONS: u8 = 7;
    /// Democracy pallet.
    pub const DEMOCRACY: u8 = 8;
    /// Council pallet.
    pub const COUNCIL: u8 = 9;
    /// Legislation pallet.
    pub const LEGISLATION: u8 = 10;
    /// Identity pallet.
    pub const IDENTITY: u8 = 11;
    /// Company registry pallet.
    pub const REGISTRY: u8 = 12;
    /// NFT pallet.
    pub const NFTS: u8 = 13;
    /// Ethereum bridge pallet.
    pub const BRIDGE: u8 = 14;
    /// Utility pallet.
    pub const UTILITY: u8 = 15;
}

/// Name and documentation of one pallet error.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorMeta {
    /// Pallet name, e.g. `Balances`.
    pub pallet: String,
    /// Error name, e.g. `InsufficientBalance`.
    pub error: String,
    /// One-line documentation.
    pub docs: String,
}

/// Module-error metadata, keyed by `(pallet_index, error_index)`.
///
/// Captured from the chain at connect time; the error classifier resolves
/// raw dispatch errors through it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRegistry {
    entries: HashMap<(u8, u8), ErrorMeta>,
}

impl ErrorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register one error's metadata.
    pub fn insert(
        &mut self,
        pallet_index: u8,
        error_index: u8,
        pallet: &str,
        error: &str,
        docs: &str,
    ) {
        self.entries.insert(
            (pallet_index, error_index),
            ErrorMeta {
                pallet: pallet.to_string(),
                error: error.to_string(),
                docs: docs.to_string(),
            },
        );
    }

    /// Look up metadata for a module error.
    pub fn lookup(&self, pallet_index: u8, error_index: u8) -> Option<&ErrorMeta> {
        self.entries.get(&(pallet_index, error_index))
    }

    /// Number of registered errors.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The registry the Polis runtime ships. The sim node hands this out at
    /// connect time; a production transport would read it from the chain's
    /// metadata instead.
    pub fn polis_default() -> Self {
        let mut reg = Self::new();
        reg.insert(pallet::BALANCES, 0, "Balances", "VestingBalance", "Vesting balance too high to send value.");
        reg.insert(pallet::BALANCES, 1, "Balances", "LiquidityRestrictions", "Account liquidity restrictions prevent withdrawal.");
        reg.insert(pallet::BALANCES, 2, "Balances", "InsufficientBalance", "Balance too low to send value.");
        reg.insert(pallet::BALANCES, 3, "Balances", "ExistentialDeposit", "Value too low to create account.");
        reg.insert(pallet::MERITS, 0, "Merits", "InsufficientBalance", "Merit balance too low to send value.");
        reg.insert(pallet::STAKING, 0, "Staking", "AlreadyBonded", "Stash is already bonded.");
        reg.insert(pallet::STAKING, 1, "Staking", "NotStash", "Account is not a stash.");
        reg.insert(pallet::STAKING, 2, "Staking", "InsufficientBond", "Cannot bond less than the minimum.");
        reg.insert(pallet::STAKING, 3, "Staking", "NoSessionKeys", "Cannot validate without registered session keys.");
        reg.insert(pallet::ELECTIONS, 0, "Elections", "DuplicateCandidate", "Candidate already registered.");
        reg.insert(pallet::ELECTIONS, 1, "Elections", "NotCandidate", "Account is not a registered candidate.");
        reg.insert(pallet::ELECTIONS, 2, "Elections", "EmptyBallot", "Ballot contains no candidates.");
        reg.insert(pallet::DEMOCRACY, 0, "Democracy", "DuplicatePreimage", "Preimage already noted.");
        reg.insert(pallet::DEMOCRACY, 1, "Democracy", "PreimageMissing", "No preimage noted for the proposal hash.");
        reg.insert(pallet::DEMOCRACY, 2, "Democracy", "ReferendumInvalid", "Referendum index is unknown or closed.");
        reg.insert(pallet::DEMOCRACY, 3, "Democracy", "ValueLow", "Deposit below the minimum.");
        reg.insert(pallet::DEMOCRACY, 4, "Democracy", "ProposalMissing", "No public proposal under this index.");
        reg.insert(pallet::DEMOCRACY, 5, "Democracy", "NotCitizen", "Proposals require a citizen judgement.");
        reg.insert(pallet::COUNCIL, 0, "Council", "NotMember", "Caller is not a council member.");
        reg.insert(pallet::COUNCIL, 1, "Council", "DuplicateProposal", "A motion for this call already exists.");
        reg.insert(pallet::COUNCIL, 2, "Council", "ProposalMissing", "No such motion.");
        reg.insert(pallet::COUNCIL, 3, "Council", "TooEarly", "Motion cannot be closed yet.");
        reg.insert(pallet::LEGISLATION, 0, "Legislation", "AlreadyExists", "A section already exists under this key.");
        reg.insert(pallet::LEGISLATION, 1, "Legislation", "NotFound", "No legislation under this key.");
        reg.insert(pallet::LEGISLATION, 2, "Legislation", "NonCitizen", "Vetoes require a citizen judgement.");
        reg.insert(pallet::IDENTITY, 0, "Identity", "NotFound", "No identity registered.");
        reg.insert(pallet::IDENTITY, 1, "Identity", "NoRegistrar", "Registrar index out of range.");
        reg.insert(pallet::IDENTITY, 2, "Identity", "NotCitizen", "Caller lacks a citizen judgement.");
        reg.insert(pallet::REGISTRY, 0, "Registry", "MalformedPayload", "Company payload failed to open.");
        reg.insert(pallet::NFTS, 0, "Nfts", "UnknownItem", "No such collection item.");
        reg.insert(pallet::NFTS, 1, "Nfts", "NotOwner", "Caller does not own the item.");
        reg.insert(pallet::BRIDGE, 0, "Bridge", "UnknownReceipt", "No receipt under this identifier.");
        reg.insert(pallet::BRIDGE, 1, "Bridge", "NotApproved", "Transfer has not been approved by the relays.");
        reg.insert(pallet::BRIDGE, 2, "Bridge", "WithdrawalDelay", "Withdrawal delay has not elapsed.");
        reg.insert(pallet::BRIDGE, 3, "Bridge", "AlreadyProcessed", "Receipt was already claimed.");
        reg
    }
}

/// Runtime constants captured at connect time.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChainConstants {
    /// Decimals of the dollar token.
    pub dollar_decimals: u32,
    /// Decimals of the merit token.
    pub merit_decimals: u32,
    /// Blocks between bridge approval and claimability.
    pub bridge_withdraw_delay: BlockNumber,
    /// Blocks between congressional elections.
    pub election_period: BlockNumber,
    /// Blocks an election's voting window stays open.
    pub voting_duration: BlockNumber,
    /// NFT collection holding land parcels.
    pub land_collection: u32,
}

impl Default for ChainConstants {
    fn default() -> Self {
        Self {
            dollar_decimals: 12,
            merit_decimals: 12,
            bridge_withdraw_delay: 100,
            election_period: 100_800,
            voting_duration: 14_400,
            land_collection: 1,
        }
    }
}
