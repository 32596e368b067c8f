//! # Connection Manager
//!
//! Lazily establishes the single shared chain connection. The first caller
//! triggers the connect attempt; every caller, including concurrent ones
//! arriving before it resolves, awaits the same attempt and receives the
//! same handle. The settled outcome is cached for the process lifetime:
//! a failed connect is surfaced to every pending and future caller.

use crate::config::ConnectionConfig;
use crate::domain::{ChainConnection, ConnectionError};
use crate::ports::ChainConnector;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::OnceCell;
use tracing::{debug, error};

/// Explicitly injected connection handle factory.
///
/// Constructed once at application start and passed by reference to every
/// consumer; there is no module-global connection state.
pub struct ConnectionManager {
    connector: Arc<dyn ChainConnector>,
    config: ConnectionConfig,
    cell: OnceCell<Result<Arc<ChainConnection>, ConnectionError>>,
}

impl ConnectionManager {
    /// Manager with default configuration.
    pub fn new(connector: Arc<dyn ChainConnector>) -> Self {
        Self::with_config(connector, ConnectionConfig::default())
    }

    /// Manager with explicit configuration.
    pub fn with_config(connector: Arc<dyn ChainConnector>, config: ConnectionConfig) -> Self {
        Self {
            connector,
            config,
            cell: OnceCell::new(),
        }
    }

    /// The shared connection, establishing it on first use.
    ///
    /// Idempotent: only one connect attempt is ever made, and its outcome
    /// (success or failure) is what every caller gets.
    pub async fn get(&self) -> Result<Arc<ChainConnection>, ConnectionError> {
        self.cell
            .get_or_init(|| async {
                debug!(
                    "[pc-01] establishing chain connection to {}",
                    self.config.endpoint
                );
                let timeout = Duration::from_secs(self.config.connect_timeout_secs);
                let outcome = match tokio::time::timeout(timeout, self.connector.connect()).await {
                    Ok(result) => result.map(Arc::new),
                    Err(_) => Err(ConnectionError::Timeout {
                        seconds: self.config.connect_timeout_secs,
                    }),
                };
                if let Err(e) = &outcome {
                    error!("[pc-01] connect failed: {e}");
                }
                outcome
            })
            .await
            .clone()
    }

    /// Whether the connect attempt has settled (either way).
    pub fn is_settled(&self) -> bool {
        self.cell.initialized()
    }
}
