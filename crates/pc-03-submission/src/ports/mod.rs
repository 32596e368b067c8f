//! # Ports
//!
//! The wallet capability boundary and its mock.

pub mod outbound;

pub use outbound::{ExtrinsicSigner, MockWallet, WalletProvider};
