//! # Projection Domain
//!
//! Composite view types and projection errors.

pub mod errors;
pub mod views;

pub use errors::{MetadataError, ProjectionError};
pub use views::{
    BalanceView, BridgeTransfer, BridgeTransferStatus, CompanyProjection, ElectionSchedule,
    IdentityProjection, LandProjection, LegislationRecord, ProposalProjection, ReferendumMeta,
    ReferendumProjection, ValidatorProjection,
};
