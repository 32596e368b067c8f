//! # Sim Node Adapter
//!
//! In-memory chain node implementing the `ChainRpc` port with real dispatch
//! semantics: balances move, deposits get reserved, batches roll back,
//! citizen gating rejects. Integration tests run whole submission and
//! projection flows against it; a production transport would implement the
//! same port against a remote node.

use crate::domain::{ChainConnection, ConnectionError, RpcError};
use crate::ports::{ChainConnector, ChainRpc};
use async_trait::async_trait;
use ed25519_dalek::{Signature as DalekSignature, VerifyingKey};
use parking_lot::RwLock;
use sha2::{Digest, Sha256};
use shared_types::{
    AccountId, AccountInfo, Balance, BalancesCall, BlockNumber, BridgeAsset, BridgeCall,
    BridgeReceipt, Call, CallHash, ChainConstants, ChainEvent, CouncilCall, DemocracyCall,
    DispatchError, ElectionsCall, ErrorRegistry, Hash, IdentityCall, IdentityRegistration,
    InBlockDetails, LegislationCall, LegislationId, LegislationKey, MeritsCall, Motion, NftsCall,
    PublicProposal, ReceiptId, ReferendumStatus, RegistryCall, SessionKeys, SignedExtrinsic,
    StakingCall, StakingLedger, Tier, TxStatus, UnlockChunk, UtilityCall, ValidatorPrefs,
    pallet, open_payload, CompanyRecord, GRAINS_PER_UNIT,
};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::debug;

/// Minimum validator-pool bond, in grains.
const MIN_BOND: Balance = GRAINS_PER_UNIT;

/// Minimum democracy proposal deposit, in grains.
const MIN_DEPOSIT: Balance = GRAINS_PER_UNIT;

/// Blocks a council motion stays open.
const MOTION_LIFETIME: BlockNumber = 200;

/// Dispatch origin.
#[derive(Clone, Copy, Debug)]
enum Origin {
    /// A signed extrinsic from this account.
    Signed(AccountId),
    /// Dispatched by an approved council motion.
    Governance,
}

fn require_signed(origin: Origin) -> Result<AccountId, DispatchError> {
    match origin {
        Origin::Signed(who) => Ok(who),
        Origin::Governance => Err(DispatchError::BadOrigin),
    }
}

fn module(pallet_index: u8, error_index: u8) -> DispatchError {
    DispatchError::Module {
        pallet_index,
        error_index,
    }
}

fn event(pallet: &str, method: &str) -> ChainEvent {
    ChainEvent {
        pallet: pallet.to_string(),
        method: method.to_string(),
    }
}

fn make_block_hash(number: BlockNumber) -> Hash {
    let mut hasher = Sha256::new();
    hasher.update(b"polis-sim-block");
    hasher.update(number.to_le_bytes());
    let mut out = [0u8; 32];
    out.copy_from_slice(&hasher.finalize());
    out
}

/// The sim chain's entire storage.
#[derive(Clone, Default)]
struct SimState {
    best_block: BlockNumber,
    accounts: HashMap<AccountId, AccountInfo>,
    merits: HashMap<AccountId, Balance>,
    nonces: HashMap<AccountId, u64>,
    ledgers: HashMap<AccountId, StakingLedger>,
    civic_locks: HashMap<AccountId, Balance>,
    election_locks: HashMap<AccountId, Balance>,
    session_keys: HashMap<AccountId, SessionKeys>,
    validators: HashMap<AccountId, ValidatorPrefs>,
    candidates: Vec<AccountId>,
    ballots: HashMap<AccountId, Vec<AccountId>>,
    referenda: BTreeMap<u32, ReferendumStatus>,
    next_referendum: u32,
    proposals: BTreeMap<u32, PublicProposal>,
    next_proposal: u32,
    preimages: HashMap<CallHash, Vec<u8>>,
    motions: Vec<Motion>,
    next_motion: u32,
    council: Vec<AccountId>,
    registrars: Vec<AccountId>,
    legislation: BTreeMap<LegislationKey, String>,
    vetos: BTreeMap<(Tier, LegislationId, Option<u32>), BTreeSet<AccountId>>,
    identities: HashMap<AccountId, IdentityRegistration>,
    companies: BTreeMap<u32, Vec<u8>>,
    next_entity: u32,
    land: HashMap<(u32, u32), (AccountId, Option<Vec<u8>>)>,
    receipts: HashMap<ReceiptId, BridgeReceipt>,
}

impl SimState {
    fn transferable(&self, who: &AccountId) -> Balance {
        self.accounts.get(who).map(|a| a.transferable()).unwrap_or(0)
    }

    fn merit_lock(&self, who: &AccountId) -> Balance {
        let civic = self.civic_locks.get(who).copied().unwrap_or(0);
        let election = self.election_locks.get(who).copied().unwrap_or(0);
        civic.max(election)
    }

    fn free_merits(&self, who: &AccountId) -> Balance {
        let total = self.merits.get(who).copied().unwrap_or(0);
        total.saturating_sub(self.merit_lock(who))
    }

    fn is_citizen(&self, who: &AccountId) -> bool {
        self.identities
            .get(who)
            .map(|r| r.is_citizen())
            .unwrap_or(false)
    }
}

/// In-memory Polis chain node.
pub struct SimNode {
    state: RwLock<SimState>,
    constants: ChainConstants,
}

impl SimNode {
    /// A fresh empty chain with default runtime constants.
    pub fn new() -> Self {
        Self::with_constants(ChainConstants::default())
    }

    /// A fresh empty chain with explicit runtime constants.
    pub fn with_constants(constants: ChainConstants) -> Self {
        Self {
            state: RwLock::new(SimState::default()),
            constants,
        }
    }

    /// The constants this node hands out at connect time.
    pub fn constants(&self) -> ChainConstants {
        self.constants
    }

    // =========================================================================
    // Test bench: seed storage directly, the way a genesis config would.
    // =========================================================================

    /// Credit free dollars.
    pub fn fund(&self, who: AccountId, free: Balance) {
        self.state.write().accounts.entry(who).or_default().free += free;
    }

    /// Credit merits.
    pub fn fund_merits(&self, who: AccountId, amount: Balance) {
        *self.state.write().merits.entry(who).or_default() += amount;
    }

    /// Install the council membership.
    pub fn set_council(&self, members: Vec<AccountId>) {
        self.state.write().council = members;
    }

    /// Install the registrar set.
    pub fn set_registrars(&self, registrars: Vec<AccountId>) {
        self.state.write().registrars = registrars;
    }

    /// Install an identity registration wholesale.
    pub fn seed_identity(&self, who: AccountId, registration: IdentityRegistration) {
        self.state.write().identities.insert(who, registration);
    }

    /// Install a legislation section.
    pub fn seed_legislation(&self, key: LegislationKey, content: &str) {
        self.state
            .write()
            .legislation
            .insert(key, content.to_string());
    }

    /// Record a veto without going through dispatch.
    pub fn seed_veto(&self, tier: Tier, id: LegislationId, section: Option<u32>, who: AccountId) {
        self.state
            .write()
            .vetos
            .entry((tier, id, section))
            .or_default()
            .insert(who);
    }

    /// Note a preimage without going through dispatch.
    pub fn seed_preimage(&self, bytes: Vec<u8>) {
        let mut hasher = Sha256::new();
        hasher.update(&bytes);
        let mut digest = [0u8; 32];
        digest.copy_from_slice(&hasher.finalize());
        self.state.write().preimages.insert(CallHash(digest), bytes);
    }

    /// Install an active referendum; returns its index.
    pub fn seed_referendum(&self, status: ReferendumStatus) -> u32 {
        let mut state = self.state.write();
        let index = state.next_referendum;
        state.next_referendum += 1;
        state.referenda.insert(index, status);
        index
    }

    /// Install a bridge receipt.
    pub fn seed_receipt(&self, id: ReceiptId, receipt: BridgeReceipt) {
        self.state.write().receipts.insert(id, receipt);
    }

    /// Mark a receipt as approved at the current best block.
    pub fn approve_receipt(&self, id: ReceiptId) {
        let mut state = self.state.write();
        let best = state.best_block;
        if let Some(receipt) = state.receipts.get_mut(&id) {
            receipt.approved_at = Some(best);
        }
    }

    /// Mint a land item in the land collection.
    pub fn mint_land(&self, item: u32, owner: AccountId) {
        let collection = self.constants.land_collection;
        self.state
            .write()
            .land
            .insert((collection, item), (owner, None));
    }

    /// Attach sealed metadata to a minted land item directly.
    pub fn seed_land_metadata(&self, collection: u32, item: u32, sealed: Vec<u8>) {
        if let Some((_, metadata)) = self.state.write().land.get_mut(&(collection, item)) {
            *metadata = Some(sealed);
        }
    }

    /// Install a sealed (or deliberately corrupt) company payload; returns
    /// the entity id.
    pub fn seed_company(&self, payload: Vec<u8>) -> u32 {
        let mut state = self.state.write();
        let entity = state.next_entity;
        state.next_entity += 1;
        state.companies.insert(entity, payload);
        entity
    }

    /// Produce `n` empty blocks.
    pub fn advance_blocks(&self, n: BlockNumber) {
        self.state.write().best_block += n;
    }

    /// Free dollar balance, for test assertions.
    pub fn account_free(&self, who: &AccountId) -> Balance {
        self.state
            .read()
            .accounts
            .get(who)
            .map(|a| a.free)
            .unwrap_or(0)
    }

    // =========================================================================
    // Dispatch
    // =========================================================================

    fn dispatch(
        &self,
        state: &mut SimState,
        origin: Origin,
        call: &Call,
    ) -> Result<Vec<ChainEvent>, DispatchError> {
        match call {
            Call::Balances(BalancesCall::Transfer { dest, value }) => {
                let who = require_signed(origin)?;
                if state.transferable(&who) < *value {
                    return Err(module(pallet::BALANCES, 2));
                }
                state.accounts.entry(who).or_default().free -= value;
                state.accounts.entry(*dest).or_default().free += value;
                Ok(vec![event("Balances", "Transfer")])
            }

            Call::Merits(MeritsCall::Transfer { dest, value }) => {
                let who = require_signed(origin)?;
                if state.free_merits(&who) < *value {
                    return Err(module(pallet::MERITS, 0));
                }
                *state.merits.entry(who).or_default() -= value;
                *state.merits.entry(*dest).or_default() += value;
                Ok(vec![event("Merits", "Transfer")])
            }

            Call::Staking(staking_call) => self.dispatch_staking(state, origin, staking_call),
            Call::Elections(elections_call) => {
                self.dispatch_elections(state, origin, elections_call)
            }
            Call::Democracy(democracy_call) => {
                self.dispatch_democracy(state, origin, democracy_call)
            }
            Call::Council(council_call) => self.dispatch_council(state, origin, council_call),
            Call::Legislation(legislation_call) => {
                self.dispatch_legislation(state, origin, legislation_call)
            }
            Call::Identity(identity_call) => {
                self.dispatch_identity(state, origin, identity_call)
            }

            Call::Registry(RegistryCall::RegisterCompany { payload }) => {
                require_signed(origin)?;
                if open_payload::<CompanyRecord>(payload).is_err() {
                    return Err(module(pallet::REGISTRY, 0));
                }
                let entity = state.next_entity;
                state.next_entity += 1;
                state.companies.insert(entity, payload.clone());
                Ok(vec![event("Registry", "CompanyRegistered")])
            }

            Call::Nfts(NftsCall::SetMetadata {
                collection,
                item,
                payload,
            }) => {
                let who = require_signed(origin)?;
                let (owner, metadata) = state
                    .land
                    .get_mut(&(*collection, *item))
                    .ok_or_else(|| module(pallet::NFTS, 0))?;
                if *owner != who {
                    return Err(module(pallet::NFTS, 1));
                }
                *metadata = Some(payload.clone());
                Ok(vec![event("Nfts", "MetadataSet")])
            }

            Call::Bridge(bridge_call) => self.dispatch_bridge(state, origin, bridge_call),

            Call::Utility(UtilityCall::BatchAll(inner)) => {
                // All-or-nothing: restore the snapshot on the first failure.
                let snapshot = state.clone();
                let mut events = Vec::new();
                for inner_call in inner {
                    match self.dispatch(state, origin, inner_call) {
                        Ok(inner_events) => events.extend(inner_events),
                        Err(e) => {
                            *state = snapshot;
                            return Err(e);
                        }
                    }
                }
                events.push(event("Utility", "BatchCompleted"));
                Ok(events)
            }
        }
    }

    fn dispatch_staking(
        &self,
        state: &mut SimState,
        origin: Origin,
        call: &StakingCall,
    ) -> Result<Vec<ChainEvent>, DispatchError> {
        let who = require_signed(origin)?;
        match call {
            StakingCall::Bond { value, .. } => {
                if state.ledgers.contains_key(&who) {
                    return Err(module(pallet::STAKING, 0));
                }
                if *value < MIN_BOND {
                    return Err(module(pallet::STAKING, 2));
                }
                if state.transferable(&who) < *value {
                    return Err(module(pallet::BALANCES, 2));
                }
                state.ledgers.insert(
                    who,
                    StakingLedger {
                        stash: who,
                        total: *value,
                        active: *value,
                        unlocking: vec![],
                    },
                );
                state.accounts.entry(who).or_default().frozen += value;
                Ok(vec![event("Staking", "Bonded")])
            }
            StakingCall::BondExtra { max_additional } => {
                if state.transferable(&who) < *max_additional {
                    return Err(module(pallet::BALANCES, 2));
                }
                let ledger = state
                    .ledgers
                    .get_mut(&who)
                    .ok_or_else(|| module(pallet::STAKING, 1))?;
                ledger.total += max_additional;
                ledger.active += max_additional;
                state.accounts.entry(who).or_default().frozen += max_additional;
                Ok(vec![event("Staking", "Bonded")])
            }
            StakingCall::CivicBond { value, .. } => {
                if state.civic_locks.get(&who).copied().unwrap_or(0) > 0 {
                    return Err(module(pallet::STAKING, 0));
                }
                let total = state.merits.get(&who).copied().unwrap_or(0);
                if total < *value {
                    return Err(module(pallet::MERITS, 0));
                }
                state.civic_locks.insert(who, *value);
                Ok(vec![event("Staking", "CivicBonded")])
            }
            StakingCall::CivicBondExtra { max_additional } => {
                let current = state.civic_locks.get(&who).copied().unwrap_or(0);
                if current == 0 {
                    return Err(module(pallet::STAKING, 1));
                }
                let total = state.merits.get(&who).copied().unwrap_or(0);
                if current + max_additional > total {
                    return Err(module(pallet::MERITS, 0));
                }
                state.civic_locks.insert(who, current + max_additional);
                Ok(vec![event("Staking", "CivicBonded")])
            }
            StakingCall::Unbond { value } => {
                let best = state.best_block;
                let ledger = state
                    .ledgers
                    .get_mut(&who)
                    .ok_or_else(|| module(pallet::STAKING, 1))?;
                let unbonded = (*value).min(ledger.active);
                ledger.active -= unbonded;
                ledger.unlocking.push(UnlockChunk {
                    value: unbonded,
                    era: best / 100 + 28,
                });
                Ok(vec![event("Staking", "Unbonded")])
            }
            StakingCall::Validate { commission_permill } => {
                if !state.ledgers.contains_key(&who) {
                    return Err(module(pallet::STAKING, 1));
                }
                if !state.session_keys.contains_key(&who) {
                    return Err(module(pallet::STAKING, 3));
                }
                state.validators.insert(
                    who,
                    ValidatorPrefs {
                        commission_permill: *commission_permill,
                    },
                );
                Ok(vec![event("Staking", "ValidatorPrefsSet")])
            }
            StakingCall::SetKeys { keys } => {
                state.session_keys.insert(who, *keys);
                Ok(vec![event("Staking", "SessionKeysSet")])
            }
            StakingCall::Chill => {
                state.validators.remove(&who);
                Ok(vec![event("Staking", "Chilled")])
            }
        }
    }

    fn dispatch_elections(
        &self,
        state: &mut SimState,
        origin: Origin,
        call: &ElectionsCall,
    ) -> Result<Vec<ChainEvent>, DispatchError> {
        let who = require_signed(origin)?;
        match call {
            ElectionsCall::AddCandidate => {
                if state.candidates.contains(&who) {
                    return Err(module(pallet::ELECTIONS, 0));
                }
                state.candidates.push(who);
                Ok(vec![event("Elections", "CandidacyAdded")])
            }
            ElectionsCall::RenounceCandidacy => {
                let pos = state
                    .candidates
                    .iter()
                    .position(|c| c == &who)
                    .ok_or_else(|| module(pallet::ELECTIONS, 1))?;
                state.candidates.remove(pos);
                Ok(vec![event("Elections", "CandidacyRenounced")])
            }
            ElectionsCall::Vote { ballot } => {
                if ballot.is_empty() {
                    return Err(module(pallet::ELECTIONS, 2));
                }
                let weight = state.merits.get(&who).copied().unwrap_or(0);
                state.ballots.insert(who, ballot.clone());
                state.election_locks.insert(who, weight);
                Ok(vec![event("Elections", "Voted")])
            }
        }
    }

    fn dispatch_democracy(
        &self,
        state: &mut SimState,
        origin: Origin,
        call: &DemocracyCall,
    ) -> Result<Vec<ChainEvent>, DispatchError> {
        let who = require_signed(origin)?;
        match call {
            DemocracyCall::Propose {
                proposal_hash,
                deposit,
            } => {
                if !state.is_citizen(&who) {
                    return Err(module(pallet::DEMOCRACY, 5));
                }
                if *deposit < MIN_DEPOSIT {
                    return Err(module(pallet::DEMOCRACY, 3));
                }
                if state.transferable(&who) < *deposit {
                    return Err(module(pallet::BALANCES, 2));
                }
                let account = state.accounts.entry(who).or_default();
                account.free -= deposit;
                account.reserved += deposit;
                let index = state.next_proposal;
                state.next_proposal += 1;
                state.proposals.insert(
                    index,
                    PublicProposal {
                        index,
                        proposal: *proposal_hash,
                        proposer: who,
                        deposit: *deposit,
                    },
                );
                Ok(vec![event("Democracy", "Proposed")])
            }
            DemocracyCall::Second { proposal } => {
                if !state.proposals.contains_key(proposal) {
                    return Err(module(pallet::DEMOCRACY, 4));
                }
                Ok(vec![event("Democracy", "Seconded")])
            }
            DemocracyCall::Vote { ref_index, vote } => {
                let total_merits = state.merits.get(&who).copied().unwrap_or(0);
                if total_merits < vote.balance {
                    return Err(module(pallet::MERITS, 0));
                }
                let status = state
                    .referenda
                    .get_mut(ref_index)
                    .ok_or_else(|| module(pallet::DEMOCRACY, 2))?;
                if vote.aye {
                    status.tally.ayes += vote.balance;
                } else {
                    status.tally.nays += vote.balance;
                }
                status.tally.turnout += vote.balance;
                Ok(vec![event("Democracy", "Voted")])
            }
            DemocracyCall::NotePreimage { bytes } => {
                let mut hasher = Sha256::new();
                hasher.update(bytes);
                let mut digest = [0u8; 32];
                digest.copy_from_slice(&hasher.finalize());
                let hash = CallHash(digest);
                if state.preimages.contains_key(&hash) {
                    return Err(module(pallet::DEMOCRACY, 0));
                }
                state.preimages.insert(hash, bytes.clone());
                Ok(vec![event("Democracy", "PreimageNoted")])
            }
        }
    }

    fn dispatch_council(
        &self,
        state: &mut SimState,
        origin: Origin,
        call: &CouncilCall,
    ) -> Result<Vec<ChainEvent>, DispatchError> {
        let who = require_signed(origin)?;
        if !state.council.contains(&who) {
            return Err(module(pallet::COUNCIL, 0));
        }
        match call {
            CouncilCall::Propose { threshold, call } => {
                let hash = call.hash();
                if state.motions.iter().any(|m| m.hash == hash) {
                    return Err(module(pallet::COUNCIL, 1));
                }
                let index = state.next_motion;
                state.next_motion += 1;
                let end = state.best_block + MOTION_LIFETIME;
                state.motions.push(Motion {
                    index,
                    hash,
                    call: (**call).clone(),
                    threshold: *threshold,
                    ayes: vec![who],
                    nays: vec![],
                    end,
                });
                Ok(vec![event("Council", "Proposed")])
            }
            CouncilCall::Vote {
                proposal,
                index,
                approve,
            } => {
                let motion = state
                    .motions
                    .iter_mut()
                    .find(|m| m.index == *index && m.hash == *proposal)
                    .ok_or_else(|| module(pallet::COUNCIL, 2))?;
                motion.ayes.retain(|a| a != &who);
                motion.nays.retain(|a| a != &who);
                if *approve {
                    motion.ayes.push(who);
                } else {
                    motion.nays.push(who);
                }
                Ok(vec![event("Council", "Voted")])
            }
            CouncilCall::Close { proposal, index } => {
                let pos = state
                    .motions
                    .iter()
                    .position(|m| m.index == *index && m.hash == *proposal)
                    .ok_or_else(|| module(pallet::COUNCIL, 2))?;
                let motion = state.motions[pos].clone();
                if motion.ayes.len() as u32 >= motion.threshold {
                    state.motions.remove(pos);
                    let mut events = vec![event("Council", "Closed"), event("Council", "Approved")];
                    match self.dispatch(state, Origin::Governance, &motion.call) {
                        Ok(inner_events) => {
                            events.extend(inner_events);
                            events.push(event("Council", "Executed"));
                        }
                        Err(_) => events.push(event("Council", "ExecutionFailed")),
                    }
                    Ok(events)
                } else if state.best_block >= motion.end {
                    state.motions.remove(pos);
                    Ok(vec![event("Council", "Closed"), event("Council", "Disapproved")])
                } else {
                    Err(module(pallet::COUNCIL, 3))
                }
            }
        }
    }

    fn dispatch_legislation(
        &self,
        state: &mut SimState,
        origin: Origin,
        call: &LegislationCall,
    ) -> Result<Vec<ChainEvent>, DispatchError> {
        match call {
            LegislationCall::Add {
                tier,
                id,
                section,
                content,
            } => {
                if matches!(origin, Origin::Signed(_)) {
                    return Err(DispatchError::BadOrigin);
                }
                let key = LegislationKey {
                    tier: *tier,
                    id: *id,
                    section: *section,
                };
                if state.legislation.contains_key(&key) {
                    return Err(module(pallet::LEGISLATION, 0));
                }
                state.legislation.insert(key, content.clone());
                Ok(vec![event("Legislation", "Added")])
            }
            LegislationCall::Repeal { tier, id, section } => {
                if matches!(origin, Origin::Signed(_)) {
                    return Err(DispatchError::BadOrigin);
                }
                let removed: Vec<LegislationKey> = state
                    .legislation
                    .keys()
                    .filter(|k| {
                        k.tier == *tier
                            && k.id == *id
                            && (section.is_none() || k.section == *section)
                    })
                    .copied()
                    .collect();
                if removed.is_empty() {
                    return Err(module(pallet::LEGISLATION, 1));
                }
                for key in &removed {
                    state.legislation.remove(key);
                    state.vetos.remove(&(key.tier, key.id, key.section));
                }
                Ok(vec![event("Legislation", "Repealed")])
            }
            LegislationCall::Veto { tier, id, section } => {
                let who = require_signed(origin)?;
                if !state.is_citizen(&who) {
                    return Err(module(pallet::LEGISLATION, 2));
                }
                let key = LegislationKey {
                    tier: *tier,
                    id: *id,
                    section: *section,
                };
                if !state.legislation.contains_key(&key) {
                    return Err(module(pallet::LEGISLATION, 1));
                }
                state
                    .vetos
                    .entry((*tier, *id, *section))
                    .or_default()
                    .insert(who);
                Ok(vec![event("Legislation", "VetoCast")])
            }
            LegislationCall::RevertVeto { tier, id, section } => {
                let who = require_signed(origin)?;
                if let Some(set) = state.vetos.get_mut(&(*tier, *id, *section)) {
                    set.remove(&who);
                }
                Ok(vec![event("Legislation", "VetoReverted")])
            }
        }
    }

    fn dispatch_identity(
        &self,
        state: &mut SimState,
        origin: Origin,
        call: &IdentityCall,
    ) -> Result<Vec<ChainEvent>, DispatchError> {
        let who = require_signed(origin)?;
        match call {
            IdentityCall::SetIdentity(info) => {
                // Re-registering resets judgements.
                state.identities.insert(
                    who,
                    IdentityRegistration {
                        judgements: vec![],
                        info: (**info).clone(),
                    },
                );
                Ok(vec![event("Identity", "IdentitySet")])
            }
            IdentityCall::RequestJudgement { registrar } => {
                if *registrar as usize >= state.registrars.len() {
                    return Err(module(pallet::IDENTITY, 1));
                }
                let registration = state
                    .identities
                    .get_mut(&who)
                    .ok_or_else(|| module(pallet::IDENTITY, 0))?;
                if !registration.judgements.iter().any(|(r, _)| r == registrar) {
                    registration
                        .judgements
                        .push((*registrar, shared_types::Judgement::Requested));
                }
                Ok(vec![event("Identity", "JudgementRequested")])
            }
            IdentityCall::ProvideJudgement { target, judgement } => {
                let registrar = state
                    .registrars
                    .iter()
                    .position(|r| r == &who)
                    .ok_or(DispatchError::BadOrigin)? as u32;
                let registration = state
                    .identities
                    .get_mut(target)
                    .ok_or_else(|| module(pallet::IDENTITY, 0))?;
                registration.judgements.retain(|(r, _)| *r != registrar);
                registration.judgements.push((registrar, *judgement));
                Ok(vec![event("Identity", "JudgementGiven")])
            }
        }
    }

    fn dispatch_bridge(
        &self,
        state: &mut SimState,
        origin: Origin,
        call: &BridgeCall,
    ) -> Result<Vec<ChainEvent>, DispatchError> {
        let who = require_signed(origin)?;
        match call {
            BridgeCall::Deposit { amount, .. } => {
                if state.transferable(&who) < *amount {
                    return Err(module(pallet::BALANCES, 2));
                }
                // Locked on this side until the relays release on Ethereum.
                state.accounts.entry(who).or_default().free -= amount;
                Ok(vec![event("Bridge", "DepositInitiated")])
            }
            BridgeCall::Withdraw { receipt_id } => {
                let best = state.best_block;
                let delay = self.constants.bridge_withdraw_delay;
                let receipt = state
                    .receipts
                    .get_mut(receipt_id)
                    .ok_or_else(|| module(pallet::BRIDGE, 0))?;
                let approved_at = receipt.approved_at.ok_or_else(|| module(pallet::BRIDGE, 1))?;
                if best < approved_at + delay {
                    return Err(module(pallet::BRIDGE, 2));
                }
                if receipt.processed {
                    return Err(module(pallet::BRIDGE, 3));
                }
                receipt.processed = true;
                let amount = receipt.amount;
                let asset = receipt.asset;
                match asset {
                    BridgeAsset::Dollars => {
                        state.accounts.entry(who).or_default().free += amount;
                    }
                    BridgeAsset::Merits => {
                        *state.merits.entry(who).or_default() += amount;
                    }
                }
                Ok(vec![event("Bridge", "Withdrawn")])
            }
        }
    }
}

impl Default for SimNode {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChainRpc for SimNode {
    async fn account_info(&self, who: &AccountId) -> Result<AccountInfo, RpcError> {
        Ok(self
            .state
            .read()
            .accounts
            .get(who)
            .copied()
            .unwrap_or_default())
    }

    async fn account_info_multi(&self, who: &[AccountId]) -> Result<Vec<AccountInfo>, RpcError> {
        let state = self.state.read();
        Ok(who
            .iter()
            .map(|k| state.accounts.get(k).copied().unwrap_or_default())
            .collect())
    }

    async fn merits_balance(&self, who: &AccountId) -> Result<Balance, RpcError> {
        Ok(self.state.read().merits.get(who).copied().unwrap_or(0))
    }

    async fn staking_ledger(&self, who: &AccountId) -> Result<Option<StakingLedger>, RpcError> {
        Ok(self.state.read().ledgers.get(who).cloned())
    }

    async fn civic_lock(&self, who: &AccountId) -> Result<Balance, RpcError> {
        Ok(self.state.read().civic_locks.get(who).copied().unwrap_or(0))
    }

    async fn election_lock(&self, who: &AccountId) -> Result<Balance, RpcError> {
        Ok(self
            .state
            .read()
            .election_locks
            .get(who)
            .copied()
            .unwrap_or(0))
    }

    async fn validators(&self) -> Result<Vec<(AccountId, ValidatorPrefs)>, RpcError> {
        let state = self.state.read();
        let mut entries: Vec<_> = state
            .validators
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect();
        entries.sort_by_key(|(k, _)| *k);
        Ok(entries)
    }

    async fn session_keys(&self, who: &AccountId) -> Result<Option<SessionKeys>, RpcError> {
        Ok(self.state.read().session_keys.get(who).copied())
    }

    async fn candidates(&self) -> Result<Vec<AccountId>, RpcError> {
        Ok(self.state.read().candidates.clone())
    }

    async fn referenda(&self) -> Result<Vec<(u32, ReferendumStatus)>, RpcError> {
        Ok(self
            .state
            .read()
            .referenda
            .iter()
            .map(|(k, v)| (*k, *v))
            .collect())
    }

    async fn public_proposals(&self) -> Result<Vec<PublicProposal>, RpcError> {
        Ok(self.state.read().proposals.values().copied().collect())
    }

    async fn preimage_exists(&self, hash: &CallHash) -> Result<bool, RpcError> {
        Ok(self.state.read().preimages.contains_key(hash))
    }

    async fn council_motions(&self) -> Result<Vec<Motion>, RpcError> {
        Ok(self.state.read().motions.clone())
    }

    async fn legislation(&self, tier: Tier) -> Result<Vec<(LegislationKey, String)>, RpcError> {
        Ok(self
            .state
            .read()
            .legislation
            .iter()
            .filter(|(k, _)| k.tier == tier)
            .map(|(k, v)| (*k, v.clone()))
            .collect())
    }

    async fn legislation_vetos(
        &self,
        tier: Tier,
        id: LegislationId,
    ) -> Result<Vec<(Option<u32>, AccountId)>, RpcError> {
        let state = self.state.read();
        let mut pairs = Vec::new();
        for ((t, i, section), accounts) in state.vetos.iter() {
            if *t == tier && *i == id {
                for account in accounts {
                    pairs.push((*section, *account));
                }
            }
        }
        Ok(pairs)
    }

    async fn identity_of(
        &self,
        who: &AccountId,
    ) -> Result<Option<IdentityRegistration>, RpcError> {
        Ok(self.state.read().identities.get(who).cloned())
    }

    async fn identity_of_multi(
        &self,
        who: &[AccountId],
    ) -> Result<Vec<Option<IdentityRegistration>>, RpcError> {
        let state = self.state.read();
        Ok(who
            .iter()
            .map(|k| state.identities.get(k).cloned())
            .collect())
    }

    async fn company_record(&self, entity: u32) -> Result<Option<Vec<u8>>, RpcError> {
        Ok(self.state.read().companies.get(&entity).cloned())
    }

    async fn land_metadata(
        &self,
        collection: u32,
        item: u32,
    ) -> Result<Option<Vec<u8>>, RpcError> {
        Ok(self
            .state
            .read()
            .land
            .get(&(collection, item))
            .and_then(|(_, m)| m.clone()))
    }

    async fn bridge_receipt(
        &self,
        receipt_id: &ReceiptId,
    ) -> Result<Option<BridgeReceipt>, RpcError> {
        Ok(self.state.read().receipts.get(receipt_id).copied())
    }

    async fn best_block_number(&self) -> Result<BlockNumber, RpcError> {
        Ok(self.state.read().best_block)
    }

    async fn account_nonce(&self, who: &AccountId) -> Result<u64, RpcError> {
        Ok(self.state.read().nonces.get(who).copied().unwrap_or(0))
    }

    async fn submit_extrinsic(
        &self,
        xt: SignedExtrinsic,
    ) -> Result<mpsc::Receiver<TxStatus>, RpcError> {
        let (tx, rx) = mpsc::channel(4);
        let mut state = self.state.write();

        // Pool-level checks reject before inclusion.
        let payload = SignedExtrinsic::signing_payload(&xt.call, xt.nonce);
        let signature_valid = VerifyingKey::from_bytes(xt.signer.as_bytes())
            .ok()
            .map(|vk| {
                let sig = DalekSignature::from_bytes(&xt.signature);
                vk.verify_strict(&payload, &sig).is_ok()
            })
            .unwrap_or(false);
        if !signature_valid {
            let _ = tx.try_send(TxStatus::Invalid("signature verification failed".to_string()));
            return Ok(rx);
        }
        let expected_nonce = state.nonces.get(&xt.signer).copied().unwrap_or(0);
        if xt.nonce != expected_nonce {
            let _ = tx.try_send(TxStatus::Invalid(format!(
                "nonce mismatch: expected {expected_nonce}, got {}",
                xt.nonce
            )));
            return Ok(rx);
        }

        let _ = tx.try_send(TxStatus::Ready);
        let _ = tx.try_send(TxStatus::Broadcast);

        // Inclusion consumes the nonce whether or not dispatch succeeds.
        state.nonces.insert(xt.signer, expected_nonce + 1);
        let outcome = self.dispatch(&mut state, Origin::Signed(xt.signer), &xt.call);
        state.best_block += 1;
        let block_hash = make_block_hash(state.best_block);

        let details = match outcome {
            Ok(mut events) => {
                events.push(event("System", "ExtrinsicSuccess"));
                InBlockDetails {
                    block_hash,
                    events,
                    dispatch_error: None,
                }
            }
            Err(dispatch_error) => {
                debug!("[pc-01] dispatch failed: {:?}", dispatch_error);
                InBlockDetails {
                    block_hash,
                    events: vec![event("System", "ExtrinsicFailed")],
                    dispatch_error: Some(dispatch_error),
                }
            }
        };
        let _ = tx.try_send(TxStatus::InBlock(details));
        Ok(rx)
    }
}

/// Connector handing out a connection to a shared [`SimNode`].
pub struct SimConnector {
    node: Arc<SimNode>,
}

impl SimConnector {
    /// Connector for the given node.
    pub fn new(node: Arc<SimNode>) -> Self {
        Self { node }
    }
}

#[async_trait]
impl ChainConnector for SimConnector {
    async fn connect(&self) -> Result<ChainConnection, ConnectionError> {
        debug!("[pc-01] sim connect handshake");
        Ok(ChainConnection::new(
            self.node.clone(),
            ErrorRegistry::polis_default(),
            self.node.constants(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};
    use shared_types::{IdentityInfo, Judgement};

    fn keypair(seed: u8) -> (SigningKey, AccountId) {
        let key = SigningKey::from_bytes(&[seed; 32]);
        let account = AccountId(key.verifying_key().to_bytes());
        (key, account)
    }

    fn sign(key: &SigningKey, call: Call, nonce: u64) -> SignedExtrinsic {
        let account = AccountId(key.verifying_key().to_bytes());
        let payload = SignedExtrinsic::signing_payload(&call, nonce);
        SignedExtrinsic {
            call,
            signer: account,
            nonce,
            signature: key.sign(&payload).to_bytes(),
        }
    }

    async fn include(node: &SimNode, xt: SignedExtrinsic) -> TxStatus {
        let mut rx = node.submit_extrinsic(xt).await.unwrap();
        let mut last = None;
        while let Some(status) = rx.recv().await {
            last = Some(status);
        }
        last.expect("at least one status")
    }

    fn citizen_registration() -> IdentityRegistration {
        IdentityRegistration {
            judgements: vec![(0, Judgement::KnownGood)],
            info: IdentityInfo {
                citizen: true,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_transfer_moves_funds() {
        let node = SimNode::new();
        let (key, alice) = keypair(1);
        let (_, bob) = keypair(2);
        node.fund(alice, 100 * GRAINS_PER_UNIT);

        let call = Call::Balances(BalancesCall::Transfer {
            dest: bob,
            value: 40 * GRAINS_PER_UNIT,
        });
        let status = include(&node, sign(&key, call, 0)).await;

        match status {
            TxStatus::InBlock(details) => assert!(details.dispatch_error.is_none()),
            other => panic!("expected InBlock, got {other:?}"),
        }
        assert_eq!(node.account_free(&alice), 60 * GRAINS_PER_UNIT);
        assert_eq!(node.account_free(&bob), 40 * GRAINS_PER_UNIT);
    }

    #[tokio::test]
    async fn test_insufficient_balance_is_dispatch_error() {
        let node = SimNode::new();
        let (key, alice) = keypair(1);
        let (_, bob) = keypair(2);
        node.fund(alice, GRAINS_PER_UNIT);

        let call = Call::Balances(BalancesCall::Transfer {
            dest: bob,
            value: 100 * GRAINS_PER_UNIT,
        });
        let status = include(&node, sign(&key, call, 0)).await;

        match status {
            TxStatus::InBlock(details) => {
                assert_eq!(
                    details.dispatch_error,
                    Some(DispatchError::Module {
                        pallet_index: pallet::BALANCES,
                        error_index: 2
                    })
                );
            }
            other => panic!("expected InBlock, got {other:?}"),
        }
        // Nothing moved.
        assert_eq!(node.account_free(&alice), GRAINS_PER_UNIT);
    }

    #[tokio::test]
    async fn test_bad_signature_rejected_before_inclusion() {
        let node = SimNode::new();
        let (key, alice) = keypair(1);
        node.fund(alice, GRAINS_PER_UNIT);

        let call = Call::Staking(StakingCall::Chill);
        let mut xt = sign(&key, call, 0);
        xt.signature[0] ^= 0xFF;

        let mut rx = node.submit_extrinsic(xt).await.unwrap();
        assert!(matches!(rx.recv().await, Some(TxStatus::Invalid(_))));
        assert_eq!(rx.recv().await, None);
    }

    #[tokio::test]
    async fn test_stale_nonce_rejected() {
        let node = SimNode::new();
        let (key, _alice) = keypair(1);

        let xt = sign(&key, Call::Staking(StakingCall::Chill), 5);
        let mut rx = node.submit_extrinsic(xt).await.unwrap();
        assert!(matches!(rx.recv().await, Some(TxStatus::Invalid(_))));
    }

    #[tokio::test]
    async fn test_batch_all_rolls_back_on_failure() {
        let node = SimNode::new();
        let (key, alice) = keypair(1);
        let (_, bob) = keypair(2);
        node.fund(alice, 10 * GRAINS_PER_UNIT);

        // Second inner call overdraws; the first must roll back.
        let batch = Call::batch_all(vec![
            Call::Balances(BalancesCall::Transfer {
                dest: bob,
                value: 5 * GRAINS_PER_UNIT,
            }),
            Call::Balances(BalancesCall::Transfer {
                dest: bob,
                value: 100 * GRAINS_PER_UNIT,
            }),
        ]);
        let status = include(&node, sign(&key, batch, 0)).await;

        match status {
            TxStatus::InBlock(details) => assert!(details.dispatch_error.is_some()),
            other => panic!("expected InBlock, got {other:?}"),
        }
        assert_eq!(node.account_free(&alice), 10 * GRAINS_PER_UNIT);
        assert_eq!(node.account_free(&bob), 0);
    }

    #[tokio::test]
    async fn test_validate_requires_session_keys() {
        let node = SimNode::new();
        let (key, alice) = keypair(1);
        node.fund(alice, 10 * GRAINS_PER_UNIT);

        let bond = Call::Staking(StakingCall::Bond {
            value: 2 * GRAINS_PER_UNIT,
            payee: shared_types::RewardDestination::Staked,
        });
        include(&node, sign(&key, bond, 0)).await;

        let validate = Call::Staking(StakingCall::Validate {
            commission_permill: 50_000,
        });
        let status = include(&node, sign(&key, validate, 1)).await;
        match status {
            TxStatus::InBlock(details) => {
                assert_eq!(
                    details.dispatch_error,
                    Some(DispatchError::Module {
                        pallet_index: pallet::STAKING,
                        error_index: 3
                    })
                );
            }
            other => panic!("expected InBlock, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_veto_requires_citizen_judgement() {
        let node = SimNode::new();
        let (key, alice) = keypair(1);
        let legislation_key = LegislationKey {
            tier: Tier::Law,
            id: LegislationId {
                year: 2024,
                index: 1,
            },
            section: Some(0),
        };
        node.seed_legislation(legislation_key, "No wheeled vehicles in the park.");

        let veto = Call::Legislation(LegislationCall::Veto {
            tier: Tier::Law,
            id: LegislationId {
                year: 2024,
                index: 1,
            },
            section: Some(0),
        });
        let status = include(&node, sign(&key, veto.clone(), 0)).await;
        match status {
            TxStatus::InBlock(details) => {
                assert_eq!(
                    details.dispatch_error,
                    Some(DispatchError::Module {
                        pallet_index: pallet::LEGISLATION,
                        error_index: 2
                    })
                );
            }
            other => panic!("expected InBlock, got {other:?}"),
        }

        node.seed_identity(alice, citizen_registration());
        let status = include(&node, sign(&key, veto, 1)).await;
        match status {
            TxStatus::InBlock(details) => assert!(details.dispatch_error.is_none()),
            other => panic!("expected InBlock, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_approved_motion_executes_repeal() {
        let node = SimNode::new();
        let (key_a, alice) = keypair(1);
        let (key_b, bob) = keypair(2);
        node.set_council(vec![alice, bob]);

        let legislation_key = LegislationKey {
            tier: Tier::Law,
            id: LegislationId {
                year: 2023,
                index: 7,
            },
            section: None,
        };
        node.seed_legislation(legislation_key, "Window tax.");

        let repeal = Call::Legislation(LegislationCall::Repeal {
            tier: Tier::Law,
            id: LegislationId {
                year: 2023,
                index: 7,
            },
            section: None,
        });
        let hash = repeal.hash();

        let propose = Call::Council(CouncilCall::Propose {
            threshold: 2,
            call: Box::new(repeal),
        });
        include(&node, sign(&key_a, propose, 0)).await;

        let vote = Call::Council(CouncilCall::Vote {
            proposal: hash,
            index: 0,
            approve: true,
        });
        include(&node, sign(&key_b, vote, 0)).await;

        let close = Call::Council(CouncilCall::Close {
            proposal: hash,
            index: 0,
        });
        let status = include(&node, sign(&key_b, close, 1)).await;
        match status {
            TxStatus::InBlock(details) => {
                assert!(details.dispatch_error.is_none());
                assert!(details
                    .events
                    .iter()
                    .any(|e| e.pallet == "Legislation" && e.method == "Repealed"));
            }
            other => panic!("expected InBlock, got {other:?}"),
        }
        assert!(node.legislation(Tier::Law).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bridge_withdraw_respects_delay() {
        let node = SimNode::new();
        let (key, alice) = keypair(1);
        let receipt_id = ReceiptId([9u8; 32]);
        node.seed_receipt(
            receipt_id,
            BridgeReceipt {
                asset: BridgeAsset::Dollars,
                amount: 3 * GRAINS_PER_UNIT,
                recipient: [0u8; 20],
                approved_at: None,
                processed: false,
            },
        );
        node.approve_receipt(receipt_id);

        let withdraw = Call::Bridge(BridgeCall::Withdraw { receipt_id });
        let status = include(&node, sign(&key, withdraw.clone(), 0)).await;
        match status {
            TxStatus::InBlock(details) => {
                assert_eq!(
                    details.dispatch_error,
                    Some(DispatchError::Module {
                        pallet_index: pallet::BRIDGE,
                        error_index: 2
                    })
                );
            }
            other => panic!("expected InBlock, got {other:?}"),
        }

        node.advance_blocks(node.constants().bridge_withdraw_delay);
        let status = include(&node, sign(&key, withdraw, 1)).await;
        match status {
            TxStatus::InBlock(details) => assert!(details.dispatch_error.is_none()),
            other => panic!("expected InBlock, got {other:?}"),
        }
        assert_eq!(node.account_free(&alice), 3 * GRAINS_PER_UNIT);
    }

    #[tokio::test]
    async fn test_multi_reads_preserve_input_order() {
        let node = SimNode::new();
        let (_, alice) = keypair(1);
        let (_, bob) = keypair(2);
        node.fund(alice, 1);
        node.fund(bob, 2);

        let infos = node.account_info_multi(&[bob, alice, bob]).await.unwrap();
        assert_eq!(infos.len(), 3);
        assert_eq!(infos[0].free, 2);
        assert_eq!(infos[1].free, 1);
        assert_eq!(infos[2].free, 2);
    }
}
