//! # Projection Algorithms
//!
//! The pure pieces composite views are built from: the left-outer join
//! against centralized metadata and the repeal-hash membership index.

pub mod join;
pub mod legislation;

pub use join::left_outer_join;
pub use legislation::{group_vetos, RepealIndex, RepealPointers};
