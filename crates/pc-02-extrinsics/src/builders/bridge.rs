//! # Bridge Builders

use crate::errors::BuildError;
use shared_types::{to_grains, BridgeCall, Call, EthAddress, ReceiptId};

/// Lock dollars on this chain for release on Ethereum.
pub fn deposit(amount: &str, recipient: EthAddress) -> Result<Call, BuildError> {
    Ok(Call::Bridge(BridgeCall::Deposit {
        amount: to_grains(amount)?,
        recipient,
    }))
}

/// Claim an approved incoming transfer.
pub fn withdraw(receipt_id: ReceiptId) -> Call {
    Call::Bridge(BridgeCall::Withdraw { receipt_id })
}
