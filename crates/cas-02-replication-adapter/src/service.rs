//! # Replication Adapter Service
//!
//! Concrete [`ReplicationHooks`] implementation over two [`StateEngine`]
//! instances and a persistence sink.
//!
//! The provisional engine exists so obviously-doomed transactions can be
//! rejected before they are gossiped and ordered; its state may drift from
//! the authoritative engine between commits, and the two hooks may disagree
//! about the same transaction. That is expected: every ordered transaction
//! is re-validated by the authoritative engine's own CAS check, and only
//! that outcome reaches persisted state.

use crate::errors::AdapterError;
use crate::ports::{CommitResponse, InfoResponse, QueryResponse, ReplicationHooks, TxResponse};
use cas_01_state_engine::{EngineError, StateEngine, StateSink};
use parking_lot::Mutex;
use shared_types::{CasTransaction, CODE_BAD_REQUEST, CODE_CAS_FAILURE, CODE_NOT_FOUND};
use std::io::Read;
use tracing::debug;

/// Maps the replication engine's lifecycle onto the dual state views.
///
/// Owns both engines and the sink; nothing else writes to either. The two
/// engines lock independently, so pre-validation never blocks on the block
/// cycle and vice versa.
pub struct ReplicationAdapter {
    provisional: StateEngine,
    authoritative: StateEngine,
    sink: Mutex<Box<dyn StateSink>>,
}

impl ReplicationAdapter {
    /// Build an adapter. If `initial` is given, authoritative state is
    /// restored from it; a restore failure is fatal at startup. The
    /// provisional view starts as an exact copy of the authoritative one.
    pub fn new(
        initial: Option<&mut dyn Read>,
        sink: Box<dyn StateSink>,
    ) -> Result<Self, AdapterError> {
        let authoritative = StateEngine::new();
        if let Some(source) = initial {
            authoritative.restore(source).map_err(AdapterError::Restore)?;
        }

        let provisional = StateEngine::new();
        authoritative.snapshot_into(&provisional);

        Ok(Self {
            provisional,
            authoritative,
            sink: Mutex::new(sink),
        })
    }

    /// Parse-then-swap body shared by both transaction hooks; only the
    /// target engine differs.
    fn apply_tx(engine: &StateEngine, raw_tx: &[u8]) -> TxResponse {
        let tx = match CasTransaction::parse(raw_tx) {
            Ok(tx) => tx,
            Err(err) => return TxResponse::rejected(CODE_BAD_REQUEST, err.to_string()),
        };

        match engine.compare_and_swap(&tx.key, &tx.old, &tx.new) {
            Ok(()) => TxResponse::ok(),
            Err(err) => TxResponse::rejected(CODE_CAS_FAILURE, err.to_string()),
        }
    }
}

impl ReplicationHooks for ReplicationAdapter {
    fn info(&self) -> InfoResponse {
        let response = InfoResponse {
            last_commit: self.authoritative.commits(),
            digest: self.authoritative.digest(),
        };
        debug!(
            hook = "info",
            last_commit = response.last_commit,
            digest = %hex::encode(&response.digest),
        );
        response
    }

    fn set_option(&self, key: &str, value: &str) -> u32 {
        debug!(hook = "set_option", key, value);
        shared_types::CODE_OK
    }

    fn init_chain(&self) {
        debug!(hook = "init_chain");
    }

    fn query(&self, key: &[u8]) -> QueryResponse {
        let response = match std::str::from_utf8(key) {
            Err(_) => QueryResponse::miss(
                key.to_vec(),
                CODE_BAD_REQUEST,
                "query key is not valid UTF-8",
            ),
            Ok(text) => match self.authoritative.get(text) {
                Ok(value) => QueryResponse::found(key.to_vec(), value),
                Err(err @ EngineError::KeyNotFound) => {
                    QueryResponse::miss(key.to_vec(), CODE_NOT_FOUND, err.to_string())
                }
                Err(err) => QueryResponse::miss(key.to_vec(), CODE_BAD_REQUEST, err.to_string()),
            },
        };
        debug!(
            hook = "query",
            key = %String::from_utf8_lossy(key),
            code = response.code,
        );
        response
    }

    fn pre_validate(&self, raw_tx: &[u8]) -> TxResponse {
        // Provisional view only; never touches the authoritative engine.
        let response = Self::apply_tx(&self.provisional, raw_tx);
        debug!(
            hook = "pre_validate",
            tx = %String::from_utf8_lossy(raw_tx),
            code = response.code,
        );
        response
    }

    fn begin_block(&self) {
        debug!(hook = "begin_block");
    }

    fn ordered_apply(&self, raw_tx: &[u8]) -> TxResponse {
        // Authoritative view only; this outcome reaches persisted state.
        let response = Self::apply_tx(&self.authoritative, raw_tx);
        debug!(
            hook = "ordered_apply",
            tx = %String::from_utf8_lossy(raw_tx),
            code = response.code,
        );
        response
    }

    fn end_block(&self) {
        debug!(hook = "end_block", commits = self.authoritative.commits());
    }

    fn block_commit(&self) -> Result<CommitResponse, AdapterError> {
        let mut sink = self.sink.lock();
        let digest = self
            .authoritative
            .commit(sink.as_mut())
            .map_err(AdapterError::Commit)?;

        // The replication contract expects the filtering view to equal
        // committed truth after every commit.
        self.authoritative.snapshot_into(&self.provisional);

        debug!(
            hook = "block_commit",
            commits = self.authoritative.commits(),
            digest = %hex::encode(&digest),
        );
        Ok(CommitResponse { digest })
    }
}
