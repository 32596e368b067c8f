//! # Builder Errors

use pc_01_connection::RpcError;
use shared_types::{AmountError, PayloadError};
use thiserror::Error;

/// Errors while constructing a call.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A decimal amount failed to convert to grains.
    #[error(transparent)]
    Amount(#[from] AmountError),

    /// A metadata record failed to seal.
    #[error(transparent)]
    Payload(#[from] PayloadError),

    /// An election ballot with no candidates.
    #[error("ballot contains no candidates")]
    EmptyBallot,

    /// An election ballot ranking the same candidate twice.
    #[error("ballot ranks a candidate more than once")]
    DuplicateBallotEntry,

    /// A motion threshold of zero members.
    #[error("motion threshold must be at least 1")]
    ZeroThreshold,

    /// Legislation content with no text.
    #[error("legislation content is empty")]
    EmptyContent,

    /// An identity with no display name.
    #[error("identity display name is empty")]
    EmptyDisplayName,

    /// A company record with no name.
    #[error("company name is empty")]
    EmptyCompanyName,

    /// A land parcel whose boundary is not a polygon.
    #[error("parcel boundary needs at least 3 vertices, got {got}")]
    DegenerateBoundary {
        /// Vertices supplied.
        got: usize,
    },

    /// The chain read behind a composition failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}
