//! # PC-05 Error Classifier
//!
//! Maps raw dispatch failures to structured, user-facing error descriptors.
//!
//! ## Purpose
//!
//! A dispatch error arrives as a positional `(pallet_index, error_index)`
//! pair or a runtime-level variant. The classifier resolves it through the
//! module-error registry captured at connect time and always returns a
//! well-formed descriptor. It never fails; absent input yields the
//! no-error descriptor.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classify;

pub use classify::classify;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
