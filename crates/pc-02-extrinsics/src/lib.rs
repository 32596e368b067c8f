//! # PC-02 Extrinsic Builder
//!
//! Constructs unsigned chain calls from typed domain parameters.
//!
//! ## Purpose
//!
//! Pure functions from domain parameters to `Call` values:
//! - Decimal amounts convert to grains here, once, at the boundary
//! - Composite operations (validator onboarding) are atomic batches
//! - Proposal payloads follow the two-step preimage protocol: the
//!   composer checks the chain and only notes a preimage that is not
//!   already registered
//! - Citizen gating is *not* enforced here; the chain rejects and the
//!   projection layer surfaces the precondition ahead of time
//!
//! ## Module Structure
//!
//! ```text
//! pc-02-extrinsics/
//! ├── builders/        # Pure call constructors, one module per pallet
//! ├── compose.rs       # Chain-aware composition (preimage protocol)
//! └── errors.rs        # BuildError
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod builders;
pub mod compose;
pub mod errors;

// Re-exports
pub use builders::{balances, bridge, council, democracy, elections, identity, legislation,
    registry, staking};
pub use compose::propose_with_preimage;
pub use errors::BuildError;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
