//! # Identity Projections
//!
//! Judgement state with the citizenship precondition surfaced, so callers
//! can warn before submitting a citizen-gated call the chain would reject.
//! Accounts pair with registrations by the batched read's index-for-index
//! ordering contract, never by draining two lists positionally.

use crate::domain::{IdentityProjection, ProjectionError};
use pc_01_connection::ChainConnection;
use shared_types::AccountId;
use std::sync::Arc;

/// Identity view fetcher.
pub struct IdentityService {
    connection: Arc<ChainConnection>,
}

impl IdentityService {
    /// Service over a connection.
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }

    /// The identity projection for one account.
    pub async fn identity(&self, address: AccountId) -> Result<IdentityProjection, ProjectionError> {
        let registration = self.connection.rpc().identity_of(&address).await?;
        Ok(IdentityProjection {
            address,
            is_citizen: registration
                .as_ref()
                .map(|r| r.is_citizen())
                .unwrap_or(false),
            registration,
        })
    }

    /// Identity projections for many accounts, in input order.
    pub async fn identities(
        &self,
        addresses: &[AccountId],
    ) -> Result<Vec<IdentityProjection>, ProjectionError> {
        let registrations = self.connection.rpc().identity_of_multi(addresses).await?;
        Ok(addresses
            .iter()
            .zip(registrations)
            .map(|(address, registration)| IdentityProjection {
                address: *address,
                is_citizen: registration
                    .as_ref()
                    .map(|r| r.is_citizen())
                    .unwrap_or(false),
                registration,
            })
            .collect())
    }

    /// Whether citizen-gated governance calls would pass for this account.
    pub async fn can_propose(&self, address: AccountId) -> Result<bool, ProjectionError> {
        Ok(self.identity(address).await?.is_citizen)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_01_connection::SimNode;
    use shared_types::{ErrorRegistry, IdentityInfo, IdentityRegistration, Judgement};

    fn connect(node: Arc<SimNode>) -> Arc<ChainConnection> {
        let constants = node.constants();
        Arc::new(ChainConnection::new(
            node,
            ErrorRegistry::polis_default(),
            constants,
        ))
    }

    fn citizen() -> IdentityRegistration {
        IdentityRegistration {
            judgements: vec![(0, Judgement::KnownGood)],
            info: IdentityInfo {
                display: "Ada".to_string(),
                citizen: true,
                ..Default::default()
            },
        }
    }

    #[tokio::test]
    async fn test_unregistered_account_is_not_citizen() {
        let node = Arc::new(SimNode::new());
        let service = IdentityService::new(connect(node));
        let projection = service.identity(AccountId([1u8; 32])).await.unwrap();
        assert!(!projection.is_citizen);
        assert!(projection.registration.is_none());
    }

    #[tokio::test]
    async fn test_citizen_precondition_surfaces() {
        let node = Arc::new(SimNode::new());
        let alice = AccountId([1u8; 32]);
        node.seed_identity(alice, citizen());

        let service = IdentityService::new(connect(node));
        assert!(service.can_propose(alice).await.unwrap());
    }

    #[tokio::test]
    async fn test_requested_judgement_is_not_enough() {
        let node = Arc::new(SimNode::new());
        let alice = AccountId([1u8; 32]);
        let mut registration = citizen();
        registration.judgements = vec![(0, Judgement::Requested)];
        node.seed_identity(alice, registration);

        let service = IdentityService::new(connect(node));
        assert!(!service.can_propose(alice).await.unwrap());
    }

    #[tokio::test]
    async fn test_batch_pairs_by_input_order() {
        let node = Arc::new(SimNode::new());
        let alice = AccountId([1u8; 32]);
        let bob = AccountId([2u8; 32]);
        node.seed_identity(bob, citizen());

        let service = IdentityService::new(connect(node));
        let projections = service.identities(&[bob, alice]).await.unwrap();

        assert_eq!(projections.len(), 2);
        assert_eq!(projections[0].address, bob);
        assert!(projections[0].is_citizen);
        assert_eq!(projections[1].address, alice);
        assert!(!projections[1].is_citizen);
    }
}
