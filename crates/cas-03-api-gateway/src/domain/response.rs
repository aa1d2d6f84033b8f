//! HTTP response body shared by both endpoints. Fields are omitted when
//! empty so a hit reads `{"key": ..., "value": ...}` and a miss reads
//! `{"key": ..., "error": ...}`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Diagnostic text from the replication layer; informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log: Option<String>,
}

impl ApiResponse {
    pub fn hit(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: Some(key.into()),
            value: Some(value.into()),
            ..Self::default()
        }
    }

    pub fn rejection(key: impl Into<String>, error: impl Into<String>, log: String) -> Self {
        Self {
            key: Some(key.into()),
            error: Some(error.into()),
            log: if log.is_empty() { None } else { Some(log) },
            ..Self::default()
        }
    }
}
