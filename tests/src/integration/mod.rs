//! # Integration Flows
//!
//! Cross-subsystem choreography over the sim chain: every flow goes
//! through the connection manager, the builders, the engine, and the
//! projection services exactly as the dashboard would.

pub mod bridge_flows;
pub mod governance_flows;
pub mod wallet_flows;
