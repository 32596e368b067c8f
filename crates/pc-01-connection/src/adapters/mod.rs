//! # Adapters
//!
//! Concrete implementations of the chain boundary. `SimNode` is an
//! in-memory chain with real dispatch semantics; a production transport
//! would implement the same ports against a remote node.

pub mod sim_node;

pub use sim_node::{SimConnector, SimNode};
