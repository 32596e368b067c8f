//! # Submission Engine
//!
//! `submit` is the single write path to the chain: exactly one signature
//! request, one pool submission, and a resolution on the first `InBlock`
//! status. Submissions are irrevocable once sent; dropping the future does
//! not cancel anything on the chain side.

use crate::domain::{SubmissionError, SubmissionPhase, WalletError};
use crate::ports::WalletProvider;
use pc_01_connection::ChainConnection;
use pc_05_dispatch_errors::classify;
use shared_types::{AccountId, Call, SignedExtrinsic, SubmissionResult, TxStatus};
use std::sync::Arc;
use tracing::{debug, error, trace};

/// Signs, submits, and confirms extrinsics over an injected connection and
/// wallet capability.
pub struct SubmissionEngine {
    connection: Arc<ChainConnection>,
    wallet: Arc<dyn WalletProvider>,
}

impl SubmissionEngine {
    /// Engine over a connection and wallet.
    pub fn new(connection: Arc<ChainConnection>, wallet: Arc<dyn WalletProvider>) -> Self {
        Self { connection, wallet }
    }

    /// Sign `call` with `address` and resolve once it is included in a
    /// block.
    ///
    /// Resolution semantics:
    /// - dispatch success → `Ok(SubmissionResult)` with the block hash,
    ///   events, and a no-error descriptor
    /// - dispatch failure → `Err(Dispatch)` carrying the same record with
    ///   a classified descriptor
    /// - any failure before inclusion → the matching `Err` variant, no
    ///   block hash anywhere
    ///
    /// No retry happens here; callers own retry policy.
    pub async fn submit(
        &self,
        call: Call,
        address: AccountId,
    ) -> Result<SubmissionResult, SubmissionError> {
        let mut phase = SubmissionPhase::Built;

        let signer = self.wallet.signer(&address).await?;
        self.advance(&mut phase, SubmissionPhase::Signing);

        let nonce = self.connection.rpc().account_nonce(&address).await?;
        let payload = SignedExtrinsic::signing_payload(&call, nonce);
        // The one signature request for this submission.
        let signature = signer.sign(&payload)?;

        let xt = SignedExtrinsic {
            call,
            signer: address,
            nonce,
            signature,
        };
        let mut statuses = self.connection.rpc().submit_extrinsic(xt).await?;
        self.advance(&mut phase, SubmissionPhase::Submitted);
        debug!("[pc-03] extrinsic submitted for {address}");

        while let Some(status) = statuses.recv().await {
            match status {
                TxStatus::Ready | TxStatus::Broadcast => {
                    trace!("[pc-03] status {status:?}");
                }
                TxStatus::InBlock(details) => {
                    let error_data = classify(
                        details.dispatch_error.as_ref(),
                        self.connection.error_registry(),
                    );
                    let result = SubmissionResult {
                        block_hash: details.block_hash,
                        events: details.events,
                        error_data,
                    };
                    if result.error_data.is_error {
                        self.advance(&mut phase, SubmissionPhase::InBlockFailure);
                        error!(
                            "[pc-03] dispatch failed in block: {}",
                            result.error_data.details
                        );
                        return Err(SubmissionError::Dispatch(result));
                    }
                    self.advance(&mut phase, SubmissionPhase::InBlockSuccess);
                    return Ok(result);
                }
                TxStatus::Dropped => {
                    self.advance(&mut phase, SubmissionPhase::SubmissionError);
                    return Err(SubmissionError::Dropped);
                }
                TxStatus::Invalid(reason) => {
                    self.advance(&mut phase, SubmissionPhase::SubmissionError);
                    return Err(SubmissionError::Invalid(reason));
                }
            }
        }

        self.advance(&mut phase, SubmissionPhase::SubmissionError);
        Err(SubmissionError::StreamClosed)
    }

    /// Submit signing with the wallet's first account, the common
    /// single-account dashboard case.
    pub async fn submit_as_default(
        &self,
        call: Call,
    ) -> Result<SubmissionResult, SubmissionError> {
        let accounts = self.wallet.accounts().await?;
        let address = accounts.first().copied().ok_or(WalletError::NoAccounts)?;
        self.submit(call, address).await
    }

    fn advance(&self, phase: &mut SubmissionPhase, next: SubmissionPhase) {
        debug_assert!(
            phase.can_transition_to(next),
            "invalid phase transition {phase:?} -> {next:?}"
        );
        *phase = next;
    }
}
