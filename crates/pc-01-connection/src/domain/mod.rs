//! # Connection Domain
//!
//! The shared connection handle and its error types.

pub mod connection;
pub mod errors;

pub use connection::ChainConnection;
pub use errors::{ConnectionError, RpcError};
