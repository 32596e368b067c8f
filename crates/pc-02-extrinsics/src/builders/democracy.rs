//! # Democracy Builders
//!
//! Plain referendum participation. Proposal submission with the preimage
//! protocol lives in the chain-aware composer.

use crate::errors::BuildError;
use shared_types::{
    encode_canonical, to_grains, Balance, Call, CallHash, DemocracyCall, ReferendumVote,
};

/// Vote on an active referendum with merit stake given as a decimal string.
pub fn vote(ref_index: u32, aye: bool, stake: &str) -> Result<Call, BuildError> {
    Ok(Call::Democracy(DemocracyCall::Vote {
        ref_index,
        vote: ReferendumVote {
            aye,
            balance: to_grains(stake)?,
        },
    }))
}

/// Back an existing public proposal.
pub fn second(proposal: u32) -> Call {
    Call::Democracy(DemocracyCall::Second { proposal })
}

/// Register the full content of a call as a preimage.
pub fn note_preimage(proposal: &Call) -> Call {
    Call::Democracy(DemocracyCall::NotePreimage {
        bytes: encode_canonical(proposal),
    })
}

/// Propose a call that already has its preimage noted.
pub fn propose_by_hash(proposal_hash: CallHash, deposit: Balance) -> Call {
    Call::Democracy(DemocracyCall::Propose {
        proposal_hash,
        deposit,
    })
}
