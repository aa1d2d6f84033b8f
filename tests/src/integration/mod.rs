//! Cross-subsystem integration flows.

pub mod gateway_flows;
pub mod replication_flows;
