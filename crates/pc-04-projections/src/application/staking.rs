//! # Staking Projections

use crate::domain::{ProjectionError, ValidatorProjection};
use pc_01_connection::ChainConnection;
use std::sync::Arc;

/// Validator roster fetcher.
pub struct StakingService {
    connection: Arc<ChainConnection>,
}

impl StakingService {
    /// Service over a connection.
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }

    /// Registered validators with their stake and session-key state.
    pub async fn validators(&self) -> Result<Vec<ValidatorProjection>, ProjectionError> {
        let rpc = self.connection.rpc();
        let entries = rpc.validators().await?;

        let mut projections = Vec::with_capacity(entries.len());
        for (account, prefs) in entries {
            let (ledger, keys) = tokio::join!(
                rpc.staking_ledger(&account),
                rpc.session_keys(&account),
            );
            projections.push(ValidatorProjection {
                account,
                commission_permill: prefs.commission_permill,
                total_stake: ledger?.map(|l| l.total).unwrap_or(0),
                session_keys_set: keys?.is_some(),
            });
        }
        Ok(projections)
    }
}
