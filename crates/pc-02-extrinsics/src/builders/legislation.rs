//! # Legislation Builders
//!
//! Citizen vetoes and the congress-origin section write.

use crate::errors::BuildError;
use shared_types::{Call, LegislationCall, LegislationId, Tier};

/// Enact a legislation section. Dispatches only through an approved
/// council motion; a directly signed submission is rejected by the chain.
pub fn add(
    tier: Tier,
    id: LegislationId,
    section: Option<u32>,
    content: &str,
) -> Result<Call, BuildError> {
    if content.trim().is_empty() {
        return Err(BuildError::EmptyContent);
    }
    Ok(Call::Legislation(LegislationCall::Add {
        tier,
        id,
        section,
        content: content.to_string(),
    }))
}

/// Cast a citizen veto against a section.
pub fn veto(tier: Tier, id: LegislationId, section: Option<u32>) -> Call {
    Call::Legislation(LegislationCall::Veto { tier, id, section })
}

/// Withdraw a previously cast veto.
pub fn revert_veto(tier: Tier, id: LegislationId, section: Option<u32>) -> Call {
    Call::Legislation(LegislationCall::RevertVeto { tier, id, section })
}
