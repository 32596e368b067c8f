//! # PC-03 Submission Engine
//!
//! Signs, submits, and confirms extrinsics.
//!
//! ## Purpose
//!
//! One call to [`SubmissionEngine::submit`] is one signature request, one
//! submission, one resolution:
//! - Resolves on the **first** `InBlock` status; finality is not tracked
//! - Dispatch failures come back classified through the error registry
//! - Pre-inclusion failures (signing rejected, pool rejection, transport)
//!   reject with a stringified descriptor and no block hash
//! - No automatic retry; the caller owns retry policy
//!
//! The wallet is an injected capability (`WalletProvider`); the engine
//! never touches key material.
//!
//! ## Module Structure
//!
//! ```text
//! pc-03-submission/
//! ├── domain/          # SubmissionPhase state machine, errors
//! ├── ports/           # WalletProvider + ExtrinsicSigner, MockWallet
//! └── application/     # SubmissionEngine
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod application;
pub mod domain;
pub mod ports;

// Re-exports
pub use application::SubmissionEngine;
pub use domain::{SubmissionError, SubmissionPhase, WalletError};
pub use ports::{ExtrinsicSigner, MockWallet, WalletProvider};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
