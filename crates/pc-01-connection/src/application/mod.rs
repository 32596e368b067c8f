//! # Application Layer
//!
//! The connection manager orchestrating the one-time connect.

pub mod manager;

pub use manager::ConnectionManager;
