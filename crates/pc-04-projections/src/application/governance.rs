//! # Governance Projections
//!
//! Referenda and public proposals cross-referenced with the centralized
//! backend. The join is left-outer from the chain: backend downtime
//! shrinks nothing, it only empties the human-context fields.

use crate::algorithms::left_outer_join;
use crate::domain::{
    ElectionSchedule, ProjectionError, ProposalProjection, ReferendumMeta, ReferendumProjection,
};
use crate::ports::MetadataBackend;
use pc_01_connection::ChainConnection;
use shared_types::AccountId;
use std::sync::Arc;
use tracing::warn;

/// Governance view fetcher.
pub struct GovernanceService {
    connection: Arc<ChainConnection>,
    backend: Arc<dyn MetadataBackend>,
}

impl GovernanceService {
    /// Service over a connection and the metadata backend.
    pub fn new(connection: Arc<ChainConnection>, backend: Arc<dyn MetadataBackend>) -> Self {
        Self {
            connection,
            backend,
        }
    }

    /// Active referenda with their centralized metadata, one projection per
    /// on-chain referendum regardless of backend availability.
    pub async fn referenda(&self) -> Result<Vec<ReferendumProjection>, ProjectionError> {
        let chain = self.connection.rpc().referenda().await?;
        let meta = self.meta_or_empty().await;

        Ok(left_outer_join(chain, meta, |(index, _)| *index, |m| m.index)
            .into_iter()
            .map(|((index, status), matched)| {
                let m = matched.unwrap_or_default();
                ReferendumProjection {
                    index,
                    status,
                    link: m.link,
                    name: m.name,
                    description: m.description,
                    proposer_address: m.proposer_address,
                }
            })
            .collect())
    }

    /// Public proposals with their centralized metadata.
    pub async fn proposals(&self) -> Result<Vec<ProposalProjection>, ProjectionError> {
        let chain = self.connection.rpc().public_proposals().await?;
        let meta = self.meta_or_empty().await;

        Ok(left_outer_join(chain, meta, |p| p.index, |m| m.index)
            .into_iter()
            .map(|(proposal, matched)| {
                let m = matched.unwrap_or_default();
                ProposalProjection {
                    proposal,
                    link: m.link,
                    name: m.name,
                    description: m.description,
                }
            })
            .collect())
    }

    /// Store a referendum's human context on the backend. A write, so the
    /// failure surfaces instead of degrading.
    pub async fn publish_referendum_meta(
        &self,
        meta: &ReferendumMeta,
        session_token: &str,
    ) -> Result<(), ProjectionError> {
        self.backend.save_referendum_meta(meta, session_token).await?;
        Ok(())
    }

    /// Current election candidates.
    pub async fn candidates(&self) -> Result<Vec<AccountId>, ProjectionError> {
        Ok(self.connection.rpc().candidates().await?)
    }

    /// Election timing from runtime constants and the current block.
    pub async fn election_schedule(&self) -> Result<ElectionSchedule, ProjectionError> {
        let best = self.connection.rpc().best_block_number().await?;
        let constants = self.connection.constants();
        let period = constants.election_period;
        Ok(ElectionSchedule {
            period,
            voting_duration: constants.voting_duration,
            next_election_at: best - best % period + period,
        })
    }

    async fn meta_or_empty(&self) -> Vec<ReferendumMeta> {
        match self.backend.referenda_meta().await {
            Ok(records) => records,
            Err(e) => {
                warn!("[pc-04] metadata backend unavailable, joining empty: {e}");
                Vec::new()
            }
        }
    }
}
