//! # Outbound Replication Port
//!
//! The gateway's only view of the rest of the system: a way to read
//! committed state and a way to hand a raw transaction to the replication
//! engine's ingress. In a multi-replica deployment this fronts the
//! consensus engine's RPC; in single-node operation the local sequencer
//! implements it in-process.

use async_trait::async_trait;
use cas_02_replication_adapter::{QueryResponse, TxResponse};

#[async_trait]
pub trait ReplicationClient: Send + Sync {
    /// Read `key` from the latest committed state.
    async fn query(&self, key: &str) -> QueryResponse;

    /// Submit raw transaction bytes for ordering. Resolves once the
    /// transaction has been accepted or rejected at pre-validation level.
    async fn broadcast(&self, raw_tx: Vec<u8>) -> TxResponse;
}
