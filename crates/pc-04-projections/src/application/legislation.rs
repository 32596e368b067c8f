//! # Legislation Projections
//!
//! The three-way reconstruction: base sections by tier, veto sets matched
//! by compound key components, and repeal pointers recomputed through the
//! hash-membership index over motions, referenda, and public proposals.

use crate::algorithms::{group_vetos, RepealIndex};
use crate::domain::{LegislationRecord, ProjectionError};
use pc_01_connection::ChainConnection;
use shared_types::{AccountId, LegislationId, Tier};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// Legislation tree fetcher.
pub struct LegislationService {
    connection: Arc<ChainConnection>,
}

impl LegislationService {
    /// Service over a connection.
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }

    /// Every section in a tier, with veto sets and repeal-action pointers
    /// attached.
    pub async fn tier(&self, tier: Tier) -> Result<Vec<LegislationRecord>, ProjectionError> {
        let rpc = self.connection.rpc();
        let (entries, motions, referenda, proposals) = tokio::join!(
            rpc.legislation(tier),
            rpc.council_motions(),
            rpc.referenda(),
            rpc.public_proposals(),
        );
        let entries = entries?;
        let repeal_index = RepealIndex::new(&motions?, &referenda?, &proposals?);

        // One veto read per document, grouped to sections by key component.
        let ids: BTreeSet<LegislationId> = entries.iter().map(|(key, _)| key.id).collect();
        let mut vetos_by_section: BTreeMap<(LegislationId, Option<u32>), BTreeSet<AccountId>> =
            BTreeMap::new();
        for id in ids {
            let pairs = rpc.legislation_vetos(tier, id).await?;
            for (section, accounts) in group_vetos(pairs) {
                vetos_by_section.insert((id, section), accounts);
            }
        }

        Ok(entries
            .into_iter()
            .map(|(key, content)| {
                let pointers = repeal_index.lookup(key.tier, key.id, key.section);
                LegislationRecord {
                    tier: key.tier,
                    id: key.id,
                    section: key.section,
                    content,
                    vetos: vetos_by_section
                        .get(&(key.id, key.section))
                        .cloned()
                        .unwrap_or_default(),
                    repeal_motion: pointers.motion,
                    repeal_referendum: pointers.referendum,
                    repeal_proposal: pointers.proposal,
                }
            })
            .collect())
    }
}
