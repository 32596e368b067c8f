//! # Adapters
//!
//! The HTTP implementation of the metadata backend port.

pub mod http_metadata;

pub use http_metadata::HttpMetadataBackend;
