use cas_01_state_engine::EngineError;
use thiserror::Error;

/// Replication Adapter error types.
///
/// Both variants are fatal: a replica that failed to restore must not serve,
/// and a replica that failed to persist must stop before its commit count
/// drifts from what other replicas computed for the same block sequence.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("state restore failed: {0}")]
    Restore(#[source] EngineError),

    #[error("block commit failed: {0}")]
    Commit(#[source] EngineError),
}
