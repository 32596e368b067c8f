//! # Submission Domain
//!
//! The per-extrinsic phase machine and submission errors.

pub mod errors;
pub mod phase;

pub use errors::{SubmissionError, WalletError};
pub use phase::SubmissionPhase;
