//! # Repeal Membership Index
//!
//! Whether a repeal is already in flight for a legislation section is not
//! stored anywhere: it is discovered by rebuilding the exact repeal call a
//! motion, referendum, or public proposal would dispatch, hashing it, and
//! checking membership in those three collections. The hash must be
//! bit-identical to what the chain computed for the real call, which holds
//! because both sides hash the canonical encoding of the same `Call` value.

use shared_types::{
    AccountId, Call, CallHash, LegislationCall, LegislationId, Motion, PublicProposal,
    ReferendumStatus, Tier,
};
use std::collections::{BTreeMap, BTreeSet, HashSet};

/// Hash pointers to in-flight repeal actions for one section.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RepealPointers {
    /// A live council motion carrying the repeal call.
    pub motion: Option<CallHash>,
    /// An active referendum on the repeal call.
    pub referendum: Option<CallHash>,
    /// A public proposal of the repeal call.
    pub proposal: Option<CallHash>,
}

/// Membership sets over the three collections a repeal can be pending in.
#[derive(Clone, Debug, Default)]
pub struct RepealIndex {
    motions: HashSet<CallHash>,
    referenda: HashSet<CallHash>,
    proposals: HashSet<CallHash>,
}

impl RepealIndex {
    /// Build the index from one snapshot of the three collections.
    pub fn new(
        motions: &[Motion],
        referenda: &[(u32, ReferendumStatus)],
        proposals: &[PublicProposal],
    ) -> Self {
        Self {
            motions: motions.iter().map(|m| m.hash).collect(),
            referenda: referenda.iter().map(|(_, r)| r.proposal).collect(),
            proposals: proposals.iter().map(|p| p.proposal).collect(),
        }
    }

    /// Recompute the would-be repeal call's hash for one section and check
    /// it against all three collections.
    pub fn lookup(&self, tier: Tier, id: LegislationId, section: Option<u32>) -> RepealPointers {
        let hash = Call::Legislation(LegislationCall::Repeal { tier, id, section }).hash();
        RepealPointers {
            motion: self.motions.contains(&hash).then_some(hash),
            referendum: self.referenda.contains(&hash).then_some(hash),
            proposal: self.proposals.contains(&hash).then_some(hash),
        }
    }
}

/// Group raw `(section, account)` veto pairs by section.
pub fn group_vetos(
    pairs: Vec<(Option<u32>, AccountId)>,
) -> BTreeMap<Option<u32>, BTreeSet<AccountId>> {
    let mut grouped: BTreeMap<Option<u32>, BTreeSet<AccountId>> = BTreeMap::new();
    for (section, account) in pairs {
        grouped.entry(section).or_default().insert(account);
    }
    grouped
}
