//! # Ports
//!
//! The centralized metadata backend boundary and its mock.

pub mod outbound;

pub use outbound::{MetadataBackend, MockMetadataBackend};
