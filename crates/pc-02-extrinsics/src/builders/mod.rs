//! # Call Builders
//!
//! Pure constructors from typed domain parameters to unsigned calls, one
//! module per pallet. Decimal amounts convert to grains here and nowhere
//! else.

pub mod balances;
pub mod bridge;
pub mod council;
pub mod democracy;
pub mod elections;
pub mod identity;
pub mod legislation;
pub mod registry;
pub mod staking;
