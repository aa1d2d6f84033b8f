//! # Inbound Lifecycle Port
//!
//! The call surface the external replication engine drives. Every replica
//! receives the same ordered calls and must produce the same deterministic
//! response fields (codes, values, digests); the free-text `log` fields are
//! explicitly non-deterministic and excluded from cross-replica agreement.
//!
//! All calls are synchronous, bounded-latency operations; only
//! `block_commit` performs blocking persistence I/O, and only it can fail.

use crate::errors::AdapterError;
use shared_types::{Digest, Value, CODE_OK};

/// Handshake response: how much history this replica has already applied.
/// The replication engine uses it to decide what to replay after a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InfoResponse {
    /// Commit count of the authoritative state (blocks fully persisted).
    pub last_commit: u64,
    /// Digest returned by the persist that produced `last_commit`.
    pub digest: Digest,
}

/// Read-path response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryResponse {
    pub code: u32,
    pub key: Value,
    pub value: Value,
    /// Diagnostic text; non-deterministic, never part of agreement.
    pub log: String,
}

impl QueryResponse {
    pub fn found(key: Value, value: Value) -> Self {
        Self {
            code: CODE_OK,
            key,
            value,
            log: String::new(),
        }
    }

    pub fn miss(key: Value, code: u32, log: impl Into<String>) -> Self {
        Self {
            code,
            key,
            value: Vec::new(),
            log: log.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

/// Outcome of a transaction hook (pre-validation or ordered apply).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TxResponse {
    pub code: u32,
    /// Diagnostic text; non-deterministic, never part of agreement.
    pub log: String,
}

impl TxResponse {
    pub fn ok() -> Self {
        Self {
            code: CODE_OK,
            log: String::new(),
        }
    }

    pub fn rejected(code: u32, log: impl Into<String>) -> Self {
        Self {
            code,
            log: log.into(),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.code == CODE_OK
    }
}

/// Block-commit response: the digest of the freshly persisted state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitResponse {
    pub digest: Digest,
}

/// The replication engine's view of this store.
///
/// Call order contract: `pre_validate` may arrive any time, any number of
/// times, from a different execution context than the block cycle, and for
/// transactions that are later discarded. The block cycle is
/// `begin_block`, `ordered_apply` once per transaction in final order,
/// `end_block`, `block_commit`.
pub trait ReplicationHooks: Send + Sync {
    /// Connection handshake; reports replay position.
    fn info(&self) -> InfoResponse;

    /// Configure non-consensus-critical aspects. Nothing here is
    /// configurable yet; accepted and ignored.
    fn set_option(&self, _key: &str, _value: &str) -> u32 {
        CODE_OK
    }

    /// Genesis hook, called once before the first block. This store needs
    /// nothing from it.
    fn init_chain(&self) {}

    /// Read a key from the authoritative (committed) view.
    fn query(&self, key: &[u8]) -> QueryResponse;

    /// Pre-ordering filter against the provisional view. Advisory only:
    /// rejection here saves ordering work but never affects correctness,
    /// because `ordered_apply` re-validates against the authoritative view.
    fn pre_validate(&self, raw_tx: &[u8]) -> TxResponse;

    /// Start of a block. Nothing to do for this store.
    fn begin_block(&self) {}

    /// Apply one transaction, in final block order, to the authoritative
    /// view. Its outcome, unlike `pre_validate`'s, affects persisted state.
    fn ordered_apply(&self, raw_tx: &[u8]) -> TxResponse;

    /// End of a block. Nothing to do for this store.
    fn end_block(&self) {}

    /// Persist the authoritative state and resynchronize the provisional
    /// view. An error here is fatal to the process.
    fn block_commit(&self) -> Result<CommitResponse, AdapterError>;
}
