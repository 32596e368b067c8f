//! # Chain Connection Handle

use crate::ports::ChainRpc;
use shared_types::{ChainConstants, ErrorRegistry};
use std::sync::Arc;

/// The single shared handle to the chain node.
///
/// Owns the transport (behind the [`ChainRpc`] boundary) plus the decoding
/// registry captured during the connect handshake: the module-error
/// metadata and runtime constants the generic decoder does not know.
/// Created once per process by the `ConnectionManager`; never torn down.
#[derive(Clone)]
pub struct ChainConnection {
    rpc: Arc<dyn ChainRpc>,
    registry: ErrorRegistry,
    constants: ChainConstants,
}

impl ChainConnection {
    /// Assemble a connection from a live transport and its handshake data.
    pub fn new(rpc: Arc<dyn ChainRpc>, registry: ErrorRegistry, constants: ChainConstants) -> Self {
        Self {
            rpc,
            registry,
            constants,
        }
    }

    /// The typed RPC handle.
    pub fn rpc(&self) -> &Arc<dyn ChainRpc> {
        &self.rpc
    }

    /// Module-error metadata for this runtime.
    pub fn error_registry(&self) -> &ErrorRegistry {
        &self.registry
    }

    /// Runtime constants for this chain.
    pub fn constants(&self) -> &ChainConstants {
        &self.constants
    }
}

impl std::fmt::Debug for ChainConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainConnection")
            .field("registered_errors", &self.registry.len())
            .field("constants", &self.constants)
            .finish()
    }
}
