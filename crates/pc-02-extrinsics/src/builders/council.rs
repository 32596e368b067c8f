//! # Council Builders
//!
//! Congress motions, including the repeal helper whose inner call the
//! projection layer later re-hashes for membership checks.

use crate::errors::BuildError;
use shared_types::{Call, CallHash, CouncilCall, LegislationCall, LegislationId, Tier};

/// Open a motion to dispatch `inner` once `threshold` members approve.
pub fn propose(threshold: u32, inner: Call) -> Result<Call, BuildError> {
    if threshold == 0 {
        return Err(BuildError::ZeroThreshold);
    }
    Ok(Call::Council(CouncilCall::Propose {
        threshold,
        call: Box::new(inner),
    }))
}

/// Vote on an open motion.
pub fn vote(proposal: CallHash, index: u32, approve: bool) -> Call {
    Call::Council(CouncilCall::Vote {
        proposal,
        index,
        approve,
    })
}

/// Close a motion whose outcome is decided.
pub fn close(proposal: CallHash, index: u32) -> Call {
    Call::Council(CouncilCall::Close { proposal, index })
}

/// The exact repeal call a motion would dispatch. Anyone recomputing the
/// hash of a hypothetical repeal must build it through here so the bytes
/// match.
pub fn repeal_call(tier: Tier, id: LegislationId, section: Option<u32>) -> Call {
    Call::Legislation(LegislationCall::Repeal { tier, id, section })
}

/// A motion proposing the repeal of one legislation section.
pub fn propose_repeal(
    threshold: u32,
    tier: Tier,
    id: LegislationId,
    section: Option<u32>,
) -> Result<Call, BuildError> {
    propose(threshold, repeal_call(tier, id, section))
}
