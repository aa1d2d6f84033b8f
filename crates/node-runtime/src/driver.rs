//! # Local Sequencer
//!
//! Single-node stand-in for the external replication engine. It accepts
//! transactions from the gateway, runs them through pre-validation, and
//! periodically drives a full block cycle (`begin_block`, `ordered_apply`
//! in arrival order, `end_block`, `block_commit`) against the adapter.
//!
//! In a real deployment the BFT consensus engine owns ordering and calls
//! the same hooks; nothing below the [`ReplicationHooks`] surface knows the
//! difference.

use async_trait::async_trait;
use cas_02_replication_adapter::{
    AdapterError, QueryResponse, ReplicationAdapter, ReplicationHooks, TxResponse,
};
use cas_03_api_gateway::ReplicationClient;
use shared_types::CODE_BAD_REQUEST;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tracing::{debug, info};

/// Ingress half: what the gateway talks to.
#[derive(Clone)]
pub struct LocalSequencer {
    adapter: Arc<ReplicationAdapter>,
    ingress: mpsc::UnboundedSender<Vec<u8>>,
}

/// Loop half: owns the pending queue and the block cycle.
pub struct SequencerLoop {
    adapter: Arc<ReplicationAdapter>,
    ingress_rx: mpsc::UnboundedReceiver<Vec<u8>>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
}

/// Build the two halves over a shared adapter.
pub fn local_sequencer(
    adapter: Arc<ReplicationAdapter>,
    interval: Duration,
    shutdown: watch::Receiver<bool>,
) -> (LocalSequencer, SequencerLoop) {
    let (ingress, ingress_rx) = mpsc::unbounded_channel();
    (
        LocalSequencer {
            adapter: Arc::clone(&adapter),
            ingress,
        },
        SequencerLoop {
            adapter,
            ingress_rx,
            interval,
            shutdown,
        },
    )
}

#[async_trait]
impl ReplicationClient for LocalSequencer {
    async fn query(&self, key: &str) -> QueryResponse {
        self.adapter.query(key.as_bytes())
    }

    async fn broadcast(&self, raw_tx: Vec<u8>) -> TxResponse {
        // Mirror of a consensus engine's mempool admission: only
        // transactions that pass pre-validation are queued for ordering.
        let response = self.adapter.pre_validate(&raw_tx);
        if response.is_ok() && self.ingress.send(raw_tx).is_err() {
            return TxResponse::rejected(CODE_BAD_REQUEST, "sequencer ingress closed");
        }
        response
    }
}

impl SequencerLoop {
    /// Drive block production until shutdown. Returns `Err` only on a
    /// persistence failure, which the caller must treat as fatal.
    pub async fn run(mut self) -> Result<(), AdapterError> {
        let mut ticker = tokio::time::interval(self.interval);
        let mut pending: Vec<Vec<u8>> = Vec::new();

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    if pending.is_empty() {
                        continue;
                    }
                    let block = std::mem::take(&mut pending);
                    Self::commit_block(&self.adapter, block)?;
                }
                received = self.ingress_rx.recv() => {
                    match received {
                        Some(raw_tx) => pending.push(raw_tx),
                        // All ingress handles dropped; nothing left to order.
                        None => return Ok(()),
                    }
                }
                _ = self.shutdown.wait_for(|stop| *stop) => {
                    info!("Sequencer shutting down");
                    return Ok(());
                }
            }
        }
    }

    fn commit_block(adapter: &ReplicationAdapter, block: Vec<Vec<u8>>) -> Result<(), AdapterError> {
        adapter.begin_block();
        for raw_tx in &block {
            // Rejections here are per-transaction outcomes, not loop errors;
            // the transaction simply has no effect on state.
            let response = adapter.ordered_apply(raw_tx);
            if !response.is_ok() {
                debug!(code = response.code, "Ordered transaction rejected");
            }
        }
        adapter.end_block();

        let commit = adapter.block_commit()?;
        info!(
            txs = block.len(),
            commits = adapter.info().last_commit,
            digest = %hex::encode(&commit.digest),
            "Committed block"
        );
        Ok(())
    }
}
