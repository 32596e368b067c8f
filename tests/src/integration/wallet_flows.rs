//! # Wallet Flows
//!
//! Transfers, staking, and validator onboarding driven end to end: built
//! by pc-02, signed and confirmed by pc-03 against the pc-01 sim chain,
//! verified through pc-04 projections.

#[cfg(test)]
mod tests {
    use crate::world;
    use pc_02_extrinsics::{balances, staking};
    use pc_03_submission::SubmissionError;
    use pc_04_projections::{BalancesService, StakingService};
    use shared_types::{RewardDestination, SessionKeys, GRAINS_PER_UNIT};

    #[tokio::test]
    async fn test_transfer_happy_path_updates_balances() {
        let w = world(2).await;
        let alice = w.wallet.address(0);
        let bob = w.wallet.address(1);
        w.node.fund(alice, 100 * GRAINS_PER_UNIT);

        let call = balances::transfer(bob, "25.5").unwrap();
        let result = w.engine.submit(call, alice).await.unwrap();

        assert!(!result.error_data.is_error);
        assert_ne!(result.block_hash, [0u8; 32]);
        assert!(result
            .events
            .iter()
            .any(|e| e.pallet == "Balances" && e.method == "Transfer"));
        // One signature request for the one submission.
        assert_eq!(w.wallet.signatures_issued(), 1);

        let views = BalancesService::new(w.connection.clone());
        assert_eq!(
            views.balances(bob).await.unwrap().total_amount,
            25_500_000_000_000
        );
    }

    #[tokio::test]
    async fn test_insufficient_balance_rejects_with_details() {
        let w = world(2).await;
        let alice = w.wallet.address(0);
        let bob = w.wallet.address(1);
        w.node.fund(alice, GRAINS_PER_UNIT);

        let call = balances::transfer(bob, "100").unwrap();
        let err = w.engine.submit(call, alice).await.unwrap_err();

        match err {
            SubmissionError::Dispatch(result) => {
                assert!(result.error_data.is_error);
                assert!(!result.error_data.details.is_empty());
                assert!(result
                    .error_data
                    .details
                    .contains("Balances::InsufficientBalance"));
                // Inclusion happened, so a block hash exists even though
                // dispatch reverted.
                assert_ne!(result.block_hash, [0u8; 32]);
            }
            other => panic!("expected Dispatch rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bond_then_top_up_through_the_switch_builder() {
        let w = world(1).await;
        let alice = w.wallet.address(0);
        w.node.fund(alice, 50 * GRAINS_PER_UNIT);

        let views = BalancesService::new(w.connection.clone());

        let first = staking::bond_or_extra("10", false, RewardDestination::Staked).unwrap();
        w.engine.submit(first, alice).await.unwrap();
        assert_eq!(
            views.balances(alice).await.unwrap().polkastake,
            10 * GRAINS_PER_UNIT
        );

        let extra = staking::bond_or_extra("5", true, RewardDestination::Staked).unwrap();
        w.engine.submit(extra, alice).await.unwrap();

        let view = views.balances(alice).await.unwrap();
        assert_eq!(view.polkastake, 15 * GRAINS_PER_UNIT);
        assert_eq!(view.liquid_amount, 35 * GRAINS_PER_UNIT);
        assert_eq!(view.total_amount, 50 * GRAINS_PER_UNIT);
    }

    #[tokio::test]
    async fn test_civic_bond_shows_as_liberstake() {
        let w = world(1).await;
        let alice = w.wallet.address(0);
        w.node.fund_merits(alice, 20 * GRAINS_PER_UNIT);

        let call = staking::civic_bond_or_extra("8", false, RewardDestination::Staked).unwrap();
        w.engine.submit(call, alice).await.unwrap();

        let view = BalancesService::new(w.connection.clone())
            .balances(alice)
            .await
            .unwrap();
        assert_eq!(view.liberstake, 8 * GRAINS_PER_UNIT);
        assert_eq!(view.liquid_merits, 12 * GRAINS_PER_UNIT);
        assert_eq!(view.merits_total_amount, 20 * GRAINS_PER_UNIT);
    }

    #[tokio::test]
    async fn test_validator_onboarding_batch_succeeds_atomically() {
        let w = world(1).await;
        let alice = w.wallet.address(0);
        w.node.fund(alice, 200 * GRAINS_PER_UNIT);

        let keys = SessionKeys {
            aura: [1u8; 32],
            grandpa: [2u8; 32],
        };
        let call = staking::validator_onboarding("100", keys, 25_000).unwrap();
        let result = w.engine.submit(call, alice).await.unwrap();
        assert!(!result.error_data.is_error);

        let roster = StakingService::new(w.connection.clone())
            .validators()
            .await
            .unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].account, alice);
        assert_eq!(roster[0].total_stake, 100 * GRAINS_PER_UNIT);
        assert!(roster[0].session_keys_set);
    }

    #[tokio::test]
    async fn test_validator_onboarding_rolls_back_whole_batch() {
        let w = world(1).await;
        let alice = w.wallet.address(0);
        // Not enough to bond; the whole batch must fail with no partial
        // application (no session keys registered either).
        w.node.fund(alice, GRAINS_PER_UNIT / 2);

        let call =
            staking::validator_onboarding("100", SessionKeys::default(), 25_000).unwrap();
        let err = w.engine.submit(call, alice).await.unwrap_err();
        assert!(matches!(err, SubmissionError::Dispatch(_)));

        let roster = StakingService::new(w.connection.clone())
            .validators()
            .await
            .unwrap();
        assert!(roster.is_empty());
        let keys = w.connection.rpc().session_keys(&alice).await.unwrap();
        assert!(keys.is_none());
    }

    #[tokio::test]
    async fn test_default_account_submission_uses_first_wallet_account() {
        let w = world(2).await;
        let alice = w.wallet.address(0);
        let bob = w.wallet.address(1);
        w.node.fund(alice, 10 * GRAINS_PER_UNIT);

        let call = balances::transfer(bob, "1").unwrap();
        let result = w.engine.submit_as_default(call).await.unwrap();
        assert!(!result.error_data.is_error);
        assert_eq!(w.node.account_free(&bob), GRAINS_PER_UNIT);
    }
}
