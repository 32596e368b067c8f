//! # Balance Projections
//!
//! `BalanceView` merges five storage items per account: the system account
//! record, the merit balance, the validator-pool ledger, the civic lock,
//! and the election lock. The reads go out together, one logical round
//! trip per view.

use crate::domain::{BalanceView, ProjectionError};
use pc_01_connection::ChainConnection;
use shared_types::{AccountId, AccountInfo, Balance, StakingLedger};
use std::sync::Arc;

/// Balance view fetcher.
pub struct BalancesService {
    connection: Arc<ChainConnection>,
}

impl BalancesService {
    /// Service over a connection.
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }

    /// The composite balance view for one account.
    pub async fn balances(&self, address: AccountId) -> Result<BalanceView, ProjectionError> {
        let rpc = self.connection.rpc();
        let (info, merits, ledger, civic, election) = tokio::join!(
            rpc.account_info(&address),
            rpc.merits_balance(&address),
            rpc.staking_ledger(&address),
            rpc.civic_lock(&address),
            rpc.election_lock(&address),
        );
        Ok(Self::compose(info?, merits?, ledger?, civic?, election?))
    }

    /// Balance views for many accounts. The dollar records go out as one
    /// batched read; output order matches `addresses` index-for-index.
    pub async fn balances_multi(
        &self,
        addresses: &[AccountId],
    ) -> Result<Vec<BalanceView>, ProjectionError> {
        let rpc = self.connection.rpc();
        let infos = rpc.account_info_multi(addresses).await?;

        let mut views = Vec::with_capacity(addresses.len());
        for (address, info) in addresses.iter().zip(infos) {
            let (merits, ledger, civic, election) = tokio::join!(
                rpc.merits_balance(address),
                rpc.staking_ledger(address),
                rpc.civic_lock(address),
                rpc.election_lock(address),
            );
            views.push(Self::compose(info, merits?, ledger?, civic?, election?));
        }
        Ok(views)
    }

    fn compose(
        info: AccountInfo,
        merits: Balance,
        ledger: Option<StakingLedger>,
        civic: Balance,
        election: Balance,
    ) -> BalanceView {
        BalanceView {
            liberstake: civic,
            // An account that never bonded has no ledger; its validator
            // stake is zero, not an error.
            polkastake: ledger.map(|l| l.total).unwrap_or(0),
            liquid_merits: merits.saturating_sub(civic.max(election)),
            total_amount: info.free + info.reserved,
            liquid_amount: info.transferable(),
            merits_total_amount: merits,
            election_lock: election,
        }
    }
}
