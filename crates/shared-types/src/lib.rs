//! # Shared Types Crate
//!
//! Chain primitives, the typed call tree, storage record types, and the
//! canonical codec shared across the Polis client subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: every type that crosses the chain boundary
//!   is defined here, once.
//! - **Typed calls**: chain calls are a closed tagged union (`Call`), not
//!   stringly-typed pallet/method pairs. Decode failures are compile-time
//!   impossible for call construction and surface as `CodecError` for
//!   storage payloads.
//! - **Canonical bytes**: hashing and payload storage always go through the
//!   canonical SCALE encoding in [`codec`], so a hash recomputed anywhere
//!   in the client is bit-identical to the one the chain holds.

pub mod calls;
pub mod codec;
pub mod events;
pub mod grains;
pub mod payload;
pub mod primitives;
pub mod records;
pub mod registry;

pub use calls::*;
pub use codec::{decode_canonical, encode_canonical, CodecError};
pub use events::*;
pub use grains::{from_grains, to_grains, AmountError, DECIMALS, GRAINS_PER_UNIT};
pub use payload::{open_payload, seal_payload, PayloadError};
pub use primitives::*;
pub use records::*;
pub use registry::*;
