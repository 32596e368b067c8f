//! # Registry & Land Projections
//!
//! Sealed payloads open into typed records here. A corrupt payload becomes
//! an `Invalid` placeholder for that record alone; the rest of a batch view
//! is unaffected.

use crate::domain::{CompanyProjection, LandProjection, ProjectionError};
use pc_01_connection::ChainConnection;
use shared_types::{open_payload, CompanyRecord, LandParcel};
use std::sync::Arc;
use tracing::warn;

/// Company registry and land metadata fetcher.
pub struct RegistryService {
    connection: Arc<ChainConnection>,
}

impl RegistryService {
    /// Service over a connection.
    pub fn new(connection: Arc<ChainConnection>) -> Self {
        Self { connection }
    }

    /// One company entry, opened; `None` if the entity does not exist.
    pub async fn company(&self, entity: u32) -> Result<Option<CompanyProjection>, ProjectionError> {
        let sealed = self.connection.rpc().company_record(entity).await?;
        Ok(sealed.map(|bytes| Self::open_company(entity, &bytes)))
    }

    /// Many company entries. Entities without a record are skipped; corrupt
    /// records degrade individually.
    pub async fn companies(
        &self,
        entities: &[u32],
    ) -> Result<Vec<CompanyProjection>, ProjectionError> {
        let mut projections = Vec::with_capacity(entities.len());
        for &entity in entities {
            if let Some(projection) = self.company(entity).await? {
                projections.push(projection);
            }
        }
        Ok(projections)
    }

    /// One land parcel's metadata, opened; `None` if the item carries none.
    pub async fn land_parcel(&self, item: u32) -> Result<Option<LandProjection>, ProjectionError> {
        let collection = self.connection.constants().land_collection;
        let sealed = self.connection.rpc().land_metadata(collection, item).await?;
        Ok(sealed.map(|bytes| match open_payload::<LandParcel>(&bytes) {
            Ok(parcel) => LandProjection::Valid { item, parcel },
            Err(e) => {
                warn!("[pc-04] land item {item} payload corrupt: {e}");
                LandProjection::Invalid {
                    item,
                    reason: e.to_string(),
                }
            }
        }))
    }

    fn open_company(entity: u32, sealed: &[u8]) -> CompanyProjection {
        match open_payload::<CompanyRecord>(sealed) {
            Ok(record) => CompanyProjection::Valid { entity, record },
            Err(e) => {
                warn!("[pc-04] company {entity} payload corrupt: {e}");
                CompanyProjection::Invalid {
                    entity,
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pc_01_connection::SimNode;
    use shared_types::{seal_payload, AccountId, ErrorRegistry, GeoCoordinate};

    fn connect(node: Arc<SimNode>) -> Arc<ChainConnection> {
        let constants = node.constants();
        Arc::new(ChainConnection::new(
            node,
            ErrorRegistry::polis_default(),
            constants,
        ))
    }

    fn record() -> CompanyRecord {
        CompanyRecord {
            name: "Polis Ferry Co".to_string(),
            purpose: "River crossings".to_string(),
            registered_office: "Dock 2".to_string(),
            owners: vec![AccountId([3u8; 32])],
        }
    }

    #[tokio::test]
    async fn test_sealed_company_opens_to_typed_record() {
        let node = Arc::new(SimNode::new());
        let entity = node.seed_company(seal_payload(&record()).unwrap());

        let service = RegistryService::new(connect(node));
        let projection = service.company(entity).await.unwrap().unwrap();
        assert_eq!(
            projection,
            CompanyProjection::Valid {
                entity,
                record: record()
            }
        );
    }

    #[tokio::test]
    async fn test_corrupt_record_degrades_alone() {
        let node = Arc::new(SimNode::new());
        let good = node.seed_company(seal_payload(&record()).unwrap());
        let bad = node.seed_company(vec![0xBA, 0xD0, 0xBA, 0xD0]);

        let service = RegistryService::new(connect(node));
        let projections = service.companies(&[good, bad]).await.unwrap();

        assert_eq!(projections.len(), 2);
        assert!(matches!(projections[0], CompanyProjection::Valid { .. }));
        assert!(matches!(projections[1], CompanyProjection::Invalid { .. }));
    }

    #[tokio::test]
    async fn test_missing_entity_is_none() {
        let node = Arc::new(SimNode::new());
        let service = RegistryService::new(connect(node));
        assert!(service.company(404).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_land_parcel_roundtrip() {
        let node = Arc::new(SimNode::new());
        let owner = AccountId([5u8; 32]);
        node.mint_land(7, owner);

        // No metadata yet.
        let service = RegistryService::new(connect(node.clone()));
        assert!(service.land_parcel(7).await.unwrap().is_none());

        let parcel = LandParcel {
            coordinates: vec![
                GeoCoordinate { lat_micro: 1, lon_micro: 2 },
                GeoCoordinate { lat_micro: 3, lon_micro: 4 },
                GeoCoordinate { lat_micro: 5, lon_micro: 6 },
            ],
            district: "Harbor".to_string(),
        };
        // Metadata lands through dispatch in the full flow; seed the sealed
        // bytes the same way the chain would store them.
        let sealed = seal_payload(&parcel).unwrap();
        let collection = node.constants().land_collection;
        node.seed_land_metadata(collection, 7, sealed);

        let projection = service.land_parcel(7).await.unwrap().unwrap();
        assert_eq!(projection, LandProjection::Valid { item: 7, parcel });
    }
}
