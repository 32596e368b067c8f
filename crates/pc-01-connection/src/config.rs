//! # Connection Configuration

use serde::{Deserialize, Serialize};

/// Configuration for establishing the chain connection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConnectionConfig {
    /// Chain node endpoint.
    pub endpoint: String,

    /// Seconds to wait for the connect handshake before giving up.
    pub connect_timeout_secs: u64,
}

impl Default for ConnectionConfig {
    fn default() -> Self {
        Self {
            endpoint: "ws://127.0.0.1:9944".to_string(),
            connect_timeout_secs: 30,
        }
    }
}

impl ConnectionConfig {
    /// Create a config for testing (short timeout).
    pub fn for_testing() -> Self {
        Self {
            endpoint: "sim://local".to_string(),
            connect_timeout_secs: 1,
        }
    }
}
