//! # Application Layer
//!
//! One read-only query service per domain area, all sharing the injected
//! connection.

pub mod balances;
pub mod bridge;
pub mod governance;
pub mod identity;
pub mod legislation;
pub mod registry;
pub mod staking;

pub use balances::BalancesService;
pub use bridge::BridgeService;
pub use governance::GovernanceService;
pub use identity::IdentityService;
pub use legislation::LegislationService;
pub use registry::RegistryService;
pub use staking::StakingService;
