//! # Balance Transfer Builders

use crate::errors::BuildError;
use shared_types::{to_grains, AccountId, Balance, BalancesCall, Call, MeritsCall};

/// Transfer dollars, amount given as a decimal string.
pub fn transfer(dest: AccountId, amount: &str) -> Result<Call, BuildError> {
    Ok(transfer_grains(dest, to_grains(amount)?))
}

/// Transfer dollars, amount already in grains.
pub fn transfer_grains(dest: AccountId, value: Balance) -> Call {
    Call::Balances(BalancesCall::Transfer { dest, value })
}

/// Transfer merits, amount given as a decimal string.
pub fn merits_transfer(dest: AccountId, amount: &str) -> Result<Call, BuildError> {
    Ok(merits_transfer_grains(dest, to_grains(amount)?))
}

/// Transfer merits, amount already in grains.
pub fn merits_transfer_grains(dest: AccountId, value: Balance) -> Call {
    Call::Merits(MeritsCall::Transfer { dest, value })
}
