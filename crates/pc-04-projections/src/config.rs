//! # Projection Configuration

use serde::{Deserialize, Serialize};

/// Configuration for the projection layer's external reads.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProjectionConfig {
    /// Base URL of the centralized metadata backend.
    pub metadata_base_url: String,

    /// Per-request timeout against the metadata backend, in seconds.
    pub metadata_timeout_secs: u64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            metadata_base_url: "https://backend.polis.example".to_string(),
            metadata_timeout_secs: 10,
        }
    }
}

impl ProjectionConfig {
    /// Create a config for testing (short timeout, local backend).
    pub fn for_testing() -> Self {
        Self {
            metadata_base_url: "http://127.0.0.1:8080".to_string(),
            metadata_timeout_secs: 1,
        }
    }
}
