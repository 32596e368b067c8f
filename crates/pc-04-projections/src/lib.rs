//! # PC-04 Query/Projection Layer
//!
//! Read-only composite fetchers over the chain and the centralized
//! metadata backend.
//!
//! ## Purpose
//!
//! Raw chain storage is per-item; the dashboard needs composite views.
//! This crate reconstructs them:
//! - Balance views merged from five storage items per account
//! - Legislation trees with per-section veto sets and repeal pointers
//!   recomputed by call-hash membership
//! - Referenda and proposals left-outer-joined with centralized metadata
//!   (the chain side is authoritative and never dropped)
//! - Sealed company/land payloads opened into typed records, degrading
//!   per-record on corruption
//! - Bridge transfer status derived from block-number comparison
//!
//! ## Module Structure
//!
//! ```text
//! pc-04-projections/
//! ├── domain/          # View types, projection errors
//! ├── algorithms/      # Left-outer join, repeal-hash membership index
//! ├── ports/           # MetadataBackend trait + mock
//! ├── adapters/        # HTTP metadata backend (reqwest)
//! ├── application/     # One query service per domain area
//! └── config.rs        # ProjectionConfig
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod adapters;
pub mod algorithms;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;

// Re-exports
pub use adapters::HttpMetadataBackend;
pub use algorithms::{left_outer_join, RepealIndex, RepealPointers};
pub use application::{
    BalancesService, BridgeService, GovernanceService, IdentityService, LegislationService,
    RegistryService, StakingService,
};
pub use config::ProjectionConfig;
pub use domain::{
    BalanceView, BridgeTransfer, BridgeTransferStatus, CompanyProjection, ElectionSchedule,
    IdentityProjection, LandProjection, LegislationRecord, MetadataError, ProjectionError,
    ProposalProjection, ReferendumMeta, ReferendumProjection, ValidatorProjection,
};
pub use ports::{MetadataBackend, MockMetadataBackend};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
