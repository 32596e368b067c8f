//! # Identity Builders

use crate::errors::BuildError;
use shared_types::{AccountId, Call, IdentityCall, IdentityInfo, Judgement};

/// Register or replace the caller's identity fields. Re-registering resets
/// existing judgements on chain.
pub fn set_identity(info: IdentityInfo) -> Result<Call, BuildError> {
    if info.display.trim().is_empty() {
        return Err(BuildError::EmptyDisplayName);
    }
    Ok(Call::Identity(IdentityCall::SetIdentity(Box::new(info))))
}

/// Ask a registrar to judge the caller's identity.
pub fn request_judgement(registrar: u32) -> Call {
    Call::Identity(IdentityCall::RequestJudgement { registrar })
}

/// Record a judgement (registrar origin).
pub fn provide_judgement(target: AccountId, judgement: Judgement) -> Call {
    Call::Identity(IdentityCall::ProvideJudgement { target, judgement })
}
