//! # Registry & Land Builders
//!
//! Company and land-parcel metadata are sealed (encoded + compressed) here;
//! the chain stores the sealed bytes and callers never see them.

use crate::errors::BuildError;
use shared_types::{seal_payload, Call, CompanyRecord, LandParcel, NftsCall, RegistryCall};

/// Register a company. The record is sealed for on-chain storage.
pub fn register_company(record: &CompanyRecord) -> Result<Call, BuildError> {
    if record.name.trim().is_empty() {
        return Err(BuildError::EmptyCompanyName);
    }
    Ok(Call::Registry(RegistryCall::RegisterCompany {
        payload: seal_payload(record)?,
    }))
}

/// Attach parcel metadata to a land NFT. The parcel is sealed for on-chain
/// storage; its boundary must be a polygon.
pub fn set_land_metadata(
    collection: u32,
    item: u32,
    parcel: &LandParcel,
) -> Result<Call, BuildError> {
    if parcel.coordinates.len() < 3 {
        return Err(BuildError::DegenerateBoundary {
            got: parcel.coordinates.len(),
        });
    }
    Ok(Call::Nfts(NftsCall::SetMetadata {
        collection,
        item,
        payload: seal_payload(parcel)?,
    }))
}
