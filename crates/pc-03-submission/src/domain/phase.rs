//! # Submission Phase Machine
//!
//! Every extrinsic moves through `Built → Signing → Submitted` and ends in
//! exactly one terminal phase. There is no `Finalized`: the engine resolves
//! on inclusion and later finality is out of scope.

use serde::{Deserialize, Serialize};

/// Lifecycle phase of one submitted extrinsic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubmissionPhase {
    /// Call constructed, nothing signed yet.
    #[default]
    Built,
    /// Waiting on the wallet's signature.
    Signing,
    /// Signed and handed to the transaction pool.
    Submitted,
    /// Included in a block, dispatch succeeded.
    InBlockSuccess,
    /// Included in a block, dispatch reverted.
    InBlockFailure,
    /// Failed before inclusion (signing, pool, or transport).
    SubmissionError,
}

impl SubmissionPhase {
    /// Check if transition is valid.
    pub fn can_transition_to(&self, next: SubmissionPhase) -> bool {
        match (self, next) {
            (Self::Built, Self::Signing) => true,
            (Self::Signing, Self::Submitted) => true,
            (Self::Submitted, Self::InBlockSuccess) => true,
            (Self::Submitted, Self::InBlockFailure) => true,
            // Signing rejection and pool rejection both end the attempt.
            (Self::Built, Self::SubmissionError) => true,
            (Self::Signing, Self::SubmissionError) => true,
            (Self::Submitted, Self::SubmissionError) => true,
            _ => false,
        }
    }

    /// Check if terminal phase.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::InBlockSuccess | Self::InBlockFailure | Self::SubmissionError
        )
    }
}
