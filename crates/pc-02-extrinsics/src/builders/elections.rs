//! # Election Builders

use crate::errors::BuildError;
use shared_types::{AccountId, Call, ElectionsCall};
use std::collections::HashSet;

/// Stand as a candidate in the next congressional election.
pub fn apply_candidacy() -> Call {
    Call::Elections(ElectionsCall::AddCandidate)
}

/// Withdraw a pending candidacy.
pub fn renounce_candidacy() -> Call {
    Call::Elections(ElectionsCall::RenounceCandidacy)
}

/// Submit a ranked ballot. Rejected here, before signing, if it is empty
/// or ranks the same candidate twice.
pub fn vote(ballot: Vec<AccountId>) -> Result<Call, BuildError> {
    if ballot.is_empty() {
        return Err(BuildError::EmptyBallot);
    }
    let mut seen = HashSet::new();
    if !ballot.iter().all(|c| seen.insert(*c)) {
        return Err(BuildError::DuplicateBallotEntry);
    }
    Ok(Call::Elections(ElectionsCall::Vote { ballot }))
}
