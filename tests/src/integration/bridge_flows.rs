//! # Bridge Flows
//!
//! The incoming-transfer lifecycle: voting, approval, the withdrawal
//! delay, the claim, and the projected status at every step.

#[cfg(test)]
mod tests {
    use crate::world;
    use pc_02_extrinsics::bridge;
    use pc_03_submission::SubmissionError;
    use pc_04_projections::{BridgeService, BridgeTransferStatus};
    use shared_types::{BridgeAsset, BridgeReceipt, ReceiptId, GRAINS_PER_UNIT};

    fn receipt(amount: u128) -> BridgeReceipt {
        BridgeReceipt {
            asset: BridgeAsset::Dollars,
            amount,
            recipient: [7u8; 20],
            approved_at: None,
            processed: false,
        }
    }

    #[tokio::test]
    async fn test_deposit_locks_funds() {
        let w = world(1).await;
        let alice = w.wallet.address(0);
        w.node.fund(alice, 10 * GRAINS_PER_UNIT);

        let call = bridge::deposit("4", [0xAB; 20]).unwrap();
        let result = w.engine.submit(call, alice).await.unwrap();
        assert!(!result.error_data.is_error);
        assert_eq!(w.node.account_free(&alice), 6 * GRAINS_PER_UNIT);
    }

    #[tokio::test]
    async fn test_status_ladder_through_claim() {
        let w = world(1).await;
        let alice = w.wallet.address(0);
        let id = ReceiptId([0x11; 32]);
        w.node.seed_receipt(id, receipt(9 * GRAINS_PER_UNIT));

        let views = BridgeService::new(w.connection.clone());
        assert_eq!(
            views.transfer(id).await.unwrap().status,
            BridgeTransferStatus::Voting
        );

        // Claiming during voting fails with the relay-approval error.
        let err = w
            .engine
            .submit(bridge::withdraw(id), alice)
            .await
            .unwrap_err();
        match err {
            SubmissionError::Dispatch(result) => {
                assert!(result.error_data.details.contains("Bridge::NotApproved"));
            }
            other => panic!("expected Dispatch rejection, got {other:?}"),
        }

        w.node.approve_receipt(id);
        assert_eq!(
            views.transfer(id).await.unwrap().status,
            BridgeTransferStatus::Approved
        );

        // Claiming inside the delay window fails too.
        let err = w
            .engine
            .submit(bridge::withdraw(id), alice)
            .await
            .unwrap_err();
        match err {
            SubmissionError::Dispatch(result) => {
                assert!(result
                    .error_data
                    .details
                    .contains("Bridge::WithdrawalDelay"));
            }
            other => panic!("expected Dispatch rejection, got {other:?}"),
        }

        w.node
            .advance_blocks(w.node.constants().bridge_withdraw_delay);
        assert_eq!(
            views.transfer(id).await.unwrap().status,
            BridgeTransferStatus::Ready
        );

        // The claim mints and flips the receipt to processed.
        let result = w.engine.submit(bridge::withdraw(id), alice).await.unwrap();
        assert!(!result.error_data.is_error);
        assert_eq!(w.node.account_free(&alice), 9 * GRAINS_PER_UNIT);
        assert_eq!(
            views.transfer(id).await.unwrap().status,
            BridgeTransferStatus::Processed
        );

        // A second claim is refused.
        let err = w
            .engine
            .submit(bridge::withdraw(id), alice)
            .await
            .unwrap_err();
        match err {
            SubmissionError::Dispatch(result) => {
                assert!(result
                    .error_data
                    .details
                    .contains("Bridge::AlreadyProcessed"));
            }
            other => panic!("expected Dispatch rejection, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unknown_receipt_projects_unknown() {
        let w = world(1).await;
        let views = BridgeService::new(w.connection.clone());
        let transfer = views.transfer(ReceiptId([0xFF; 32])).await.unwrap();
        assert_eq!(transfer.status, BridgeTransferStatus::Unknown);
        assert!(transfer.asset.is_none());
    }
}
