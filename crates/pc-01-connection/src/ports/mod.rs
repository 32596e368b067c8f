//! # Ports
//!
//! Outbound traits for the chain boundary, plus mock implementations for
//! test doubles.

pub mod outbound;

pub use outbound::{ChainConnector, ChainRpc, MockChainRpc, MockConnector};
