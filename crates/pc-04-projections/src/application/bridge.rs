//! # Bridge Projections
//!
//! Transfer status is never stored; it is derived from the receipt and the
//! current best block against the configured withdrawal delay.

use crate::domain::{BridgeTransfer, BridgeTransferStatus, ProjectionError};
use pc_01_connection::ChainConnection;
use shared_types::{BlockNumber, ReceiptId};
use std::sync::Arc;

/// Bridge transfer status fetcher.
pub struct BridgeService {
    connection: Arc<ChainConnection>,
}

impl BridgeService {
    /// Service over a connection.
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }

    /// The dashboard view of one transfer, status derived from polling
    /// chain storage.
    pub async fn transfer(&self, receipt_id: ReceiptId) -> Result<BridgeTransfer, ProjectionError> {
        let rpc = self.connection.rpc();
        let (receipt, best) = tokio::join!(
            rpc.bridge_receipt(&receipt_id),
            rpc.best_block_number(),
        );
        let receipt = receipt?;
        let delay = self.connection.constants().bridge_withdraw_delay;

        Ok(BridgeTransfer {
            receipt_id,
            asset: receipt.as_ref().map(|r| r.asset),
            status: BridgeTransferStatus::derive(receipt.as_ref(), best?, delay),
        })
    }

    /// Current best block number.
    pub async fn current_block(&self) -> Result<BlockNumber, ProjectionError> {
        Ok(self.connection.rpc().best_block_number().await?)
    }
}
