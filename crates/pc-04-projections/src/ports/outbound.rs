//! # Outbound Ports
//!
//! The centralized metadata backend: best-effort, non-authoritative human
//! context for governance items. Reads degrade when it is down; it can
//! never add or remove chain items from a view.

use crate::domain::{MetadataError, ReferendumMeta};
use async_trait::async_trait;
use parking_lot::Mutex;

/// The centralized metadata service.
#[async_trait]
pub trait MetadataBackend: Send + Sync {
    /// All referendum/proposal metadata records the backend holds.
    async fn referenda_meta(&self) -> Result<Vec<ReferendumMeta>, MetadataError>;

    /// Store a metadata record, authenticated by a bearer session token.
    async fn save_referendum_meta(
        &self,
        meta: &ReferendumMeta,
        session_token: &str,
    ) -> Result<(), MetadataError>;
}

// =============================================================================
// Mock Implementations for Testing
// =============================================================================

/// Mock metadata backend serving canned records.
#[derive(Default)]
pub struct MockMetadataBackend {
    /// Records served to readers.
    pub records: Vec<ReferendumMeta>,
    /// Should every call fail?
    pub should_fail: bool,
    pub(crate) saved: Mutex<Vec<(ReferendumMeta, String)>>,
}

impl MockMetadataBackend {
    /// Backend serving these records.
    pub fn with_records(records: Vec<ReferendumMeta>) -> Self {
        Self {
            records,
            ..Default::default()
        }
    }

    /// Records written through `save_referendum_meta`, with their tokens.
    pub fn saved(&self) -> Vec<(ReferendumMeta, String)> {
        self.saved.lock().clone()
    }
}

#[async_trait]
impl MetadataBackend for MockMetadataBackend {
    async fn referenda_meta(&self) -> Result<Vec<ReferendumMeta>, MetadataError> {
        if self.should_fail {
            return Err(MetadataError::Http("mock outage".to_string()));
        }
        Ok(self.records.clone())
    }

    async fn save_referendum_meta(
        &self,
        meta: &ReferendumMeta,
        session_token: &str,
    ) -> Result<(), MetadataError> {
        if self.should_fail {
            return Err(MetadataError::Http("mock outage".to_string()));
        }
        self.saved
            .lock()
            .push((meta.clone(), session_token.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_serves_canned_records() {
        let backend = MockMetadataBackend::with_records(vec![ReferendumMeta {
            index: 1,
            name: "Paper ballots".to_string(),
            ..Default::default()
        }]);
        let records = backend.referenda_meta().await.unwrap();
        assert_eq!(records.len(), 1);
    }

    #[tokio::test]
    async fn test_mock_records_saves_with_token() {
        let backend = MockMetadataBackend::default();
        let meta = ReferendumMeta {
            index: 2,
            ..Default::default()
        };
        backend.save_referendum_meta(&meta, "tok-123").await.unwrap();
        let saved = backend.saved();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].1, "tok-123");
    }

    #[tokio::test]
    async fn test_mock_outage() {
        let backend = MockMetadataBackend {
            should_fail: true,
            ..Default::default()
        };
        assert!(backend.referenda_meta().await.is_err());
    }
}
