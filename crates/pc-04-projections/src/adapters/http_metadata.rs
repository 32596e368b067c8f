//! # HTTP Metadata Backend
//!
//! `GET /referenda` and `POST /referenda` against the centralized backend,
//! with a bearer-style session token on writes.

use crate::config::ProjectionConfig;
use crate::domain::{MetadataError, ReferendumMeta};
use crate::ports::MetadataBackend;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Metadata backend over HTTP.
pub struct HttpMetadataBackend {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMetadataBackend {
    /// Backend for the configured base URL.
    pub fn new(config: &ProjectionConfig) -> Result<Self, MetadataError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.metadata_timeout_secs))
            .build()
            .map_err(|e| MetadataError::Http(e.to_string()))?;
        Ok(Self {
            client,
            base_url: config.metadata_base_url.trim_end_matches('/').to_string(),
        })
    }

    fn referenda_url(&self) -> String {
        format!("{}/referenda", self.base_url)
    }
}

#[async_trait]
impl MetadataBackend for HttpMetadataBackend {
    async fn referenda_meta(&self) -> Result<Vec<ReferendumMeta>, MetadataError> {
        debug!("[pc-04] GET {}", self.referenda_url());
        let response = self
            .client
            .get(self.referenda_url())
            .send()
            .await
            .map_err(|e| MetadataError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status(status.as_u16()));
        }

        response
            .json::<Vec<ReferendumMeta>>()
            .await
            .map_err(|e| MetadataError::Decode(e.to_string()))
    }

    async fn save_referendum_meta(
        &self,
        meta: &ReferendumMeta,
        session_token: &str,
    ) -> Result<(), MetadataError> {
        debug!("[pc-04] POST {}", self.referenda_url());
        let response = self
            .client
            .post(self.referenda_url())
            .bearer_auth(session_token)
            .json(meta)
            .send()
            .await
            .map_err(|e| MetadataError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataError::Status(status.as_u16()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_is_normalized() {
        let config = ProjectionConfig {
            metadata_base_url: "http://backend.local/".to_string(),
            metadata_timeout_secs: 1,
        };
        let backend = HttpMetadataBackend::new(&config).unwrap();
        assert_eq!(backend.referenda_url(), "http://backend.local/referenda");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_an_http_error() {
        // Nothing listens on this port.
        let config = ProjectionConfig {
            metadata_base_url: "http://127.0.0.1:1".to_string(),
            metadata_timeout_secs: 1,
        };
        let backend = HttpMetadataBackend::new(&config).unwrap();
        let result = backend.referenda_meta().await;
        assert!(matches!(result, Err(MetadataError::Http(_))));
    }
}
