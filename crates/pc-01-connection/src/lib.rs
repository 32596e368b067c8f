//! # PC-01 Connection Manager
//!
//! The single shared handle to the Polis chain node.
//!
//! ## Purpose
//!
//! Every other subsystem reaches the chain through this crate:
//! - One process-wide connection, established lazily on first use
//! - Concurrent first callers share the same pending connect attempt
//! - The settled outcome (success or failure) is cached for the process
//!   lifetime; there is no reconnect or health-check machinery
//! - The typed RPC boundary (`ChainRpc`) every read and submission goes
//!   through
//!
//! ## Module Structure
//!
//! ```text
//! pc-01-connection/
//! ├── domain/          # ChainConnection handle, connection errors
//! ├── ports/           # ChainRpc + ChainConnector traits, mocks
//! ├── adapters/        # SimNode in-memory chain
//! ├── application/     # ConnectionManager
//! └── config.rs        # ConnectionConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::{SimConnector, SimNode};
pub use application::ConnectionManager;
pub use config::ConnectionConfig;
pub use domain::{ChainConnection, ConnectionError, RpcError};
pub use ports::{ChainConnector, ChainRpc, MockChainRpc, MockConnector};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
