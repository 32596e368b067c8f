//! # Staking Builders
//!
//! Both stake pools (validator dollars, civic merits), plus the composite
//! validator onboarding batch.

use crate::errors::BuildError;
use shared_types::{to_grains, Call, RewardDestination, SessionKeys, StakingCall};

/// Bond dollars into the validator pool.
pub fn bond(amount: &str, payee: RewardDestination) -> Result<Call, BuildError> {
    Ok(Call::Staking(StakingCall::Bond {
        value: to_grains(amount)?,
        payee,
    }))
}

/// Add dollars to an existing validator-pool bond.
pub fn bond_extra(amount: &str) -> Result<Call, BuildError> {
    Ok(Call::Staking(StakingCall::BondExtra {
        max_additional: to_grains(amount)?,
    }))
}

/// First-time bond or top-up, depending on whether the account already has
/// a stake.
pub fn bond_or_extra(
    amount: &str,
    already_bonded: bool,
    payee: RewardDestination,
) -> Result<Call, BuildError> {
    if already_bonded {
        bond_extra(amount)
    } else {
        bond(amount, payee)
    }
}

/// Bond merits into the civic pool.
pub fn civic_bond(amount: &str, payee: RewardDestination) -> Result<Call, BuildError> {
    Ok(Call::Staking(StakingCall::CivicBond {
        value: to_grains(amount)?,
        payee,
    }))
}

/// Add merits to an existing civic-pool bond.
pub fn civic_bond_extra(amount: &str) -> Result<Call, BuildError> {
    Ok(Call::Staking(StakingCall::CivicBondExtra {
        max_additional: to_grains(amount)?,
    }))
}

/// First-time civic bond or top-up.
pub fn civic_bond_or_extra(
    amount: &str,
    already_bonded: bool,
    payee: RewardDestination,
) -> Result<Call, BuildError> {
    if already_bonded {
        civic_bond_extra(amount)
    } else {
        civic_bond(amount, payee)
    }
}

/// Schedule stake to unlock.
pub fn unbond(amount: &str) -> Result<Call, BuildError> {
    Ok(Call::Staking(StakingCall::Unbond {
        value: to_grains(amount)?,
    }))
}

/// Stop validating.
pub fn chill() -> Call {
    Call::Staking(StakingCall::Chill)
}

/// The whole validator onboarding as one atomic batch: bond stake, register
/// session keys, declare intent to validate. Either all three land or the
/// caller sees a single failed batch.
pub fn validator_onboarding(
    amount: &str,
    keys: SessionKeys,
    commission_permill: u32,
) -> Result<Call, BuildError> {
    Ok(Call::batch_all(vec![
        Call::Staking(StakingCall::Bond {
            value: to_grains(amount)?,
            payee: RewardDestination::Staked,
        }),
        Call::Staking(StakingCall::SetKeys { keys }),
        Call::Staking(StakingCall::Validate { commission_permill }),
    ]))
}
