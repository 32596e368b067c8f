//! # Polis-Client Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # Cross-subsystem choreography
//!     ├── wallet_flows.rs      # connect → sign → submit → balances
//!     ├── governance_flows.rs  # motions, preimages, vetoes, projections
//!     └── bridge_flows.rs      # receipt lifecycle end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p pc-tests
//! cargo test -p pc-tests integration::
//! ```

#![allow(dead_code)]

pub mod integration;

use pc_01_connection::{ChainConnection, ConnectionConfig, ConnectionManager, SimConnector, SimNode};
use pc_03_submission::{MockWallet, SubmissionEngine};
use std::sync::Arc;

/// Everything an integration flow needs: a sim chain, the shared
/// connection established through the manager, a mock wallet, and the
/// submission engine wired over both.
pub struct TestWorld {
    /// The in-memory chain.
    pub node: Arc<SimNode>,
    /// The shared connection handle.
    pub connection: Arc<ChainConnection>,
    /// The wallet capability.
    pub wallet: Arc<MockWallet>,
    /// The engine under test.
    pub engine: SubmissionEngine,
}

/// Install the env-filtered tracing subscriber once per test binary, so
/// `RUST_LOG=debug cargo test -p pc-tests` shows subsystem logs.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a world with `accounts` wallet accounts.
pub async fn world(accounts: u8) -> TestWorld {
    init_tracing();
    let node = Arc::new(SimNode::new());
    let manager = ConnectionManager::with_config(
        Arc::new(SimConnector::new(node.clone())),
        ConnectionConfig::for_testing(),
    );
    let connection = manager.get().await.expect("sim connect cannot fail");
    let wallet = Arc::new(MockWallet::with_accounts(accounts));
    let engine = SubmissionEngine::new(connection.clone(), wallet.clone());
    TestWorld {
        node,
        connection,
        wallet,
        engine,
    }
}
