use thiserror::Error;

/// State Engine error types.
///
/// `KeyNotFound` and `CasFailure` are routine domain outcomes and are always
/// recovered by the caller. The persistence variants are fatal when they
/// escape a commit or restore: continuing would leave the commit count out
/// of sync with the actually persisted bytes.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("key not found")]
    KeyNotFound,

    #[error("CAS failure")]
    CasFailure,

    #[error("state encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("state decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("persistence stream error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for State Engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
