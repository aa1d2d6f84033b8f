//! # Persisted State Encoding
//!
//! One self-describing JSON document holding the complete key→value map and
//! the post-commit count. Each commit rewrites the whole document; there is
//! no delta or log form.
//!
//! ## Determinism
//!
//! The digest replicas agree on is computed over these exact bytes, so the
//! encoding must be byte-identical across processes for identical content.
//! Entries are held in a `BTreeMap` and serialize in lexicographic key
//! order; values are lowercase hex strings.

use serde::{Deserialize, Serialize, Serializer};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Key, Value};
use std::collections::BTreeMap;
use std::io;

/// The decoded form of a persisted state document.
#[serde_as]
#[derive(Debug, Clone, Deserialize)]
pub struct PersistedState {
    /// Complete key→value mapping, values hex-encoded on the wire.
    #[serde_as(as = "BTreeMap<_, Hex>")]
    pub entries: BTreeMap<Key, Value>,
    /// Commit count as of the persist that produced this document.
    pub commit_count: u64,
}

/// Borrowing view used on the encode path, so a commit never clones the map.
#[derive(Serialize)]
struct PersistedStateRef<'a> {
    #[serde(serialize_with = "hex_entries")]
    entries: &'a BTreeMap<Key, Value>,
    commit_count: u64,
}

fn hex_entries<S>(entries: &&BTreeMap<Key, Value>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.collect_map(entries.iter().map(|(k, v)| (k, hex::encode(v))))
}

/// Encode the map and commit count into `writer`.
pub fn encode_into<W: io::Write>(
    writer: W,
    entries: &BTreeMap<Key, Value>,
    commit_count: u64,
) -> Result<(), serde_json::Error> {
    serde_json::to_writer(
        writer,
        &PersistedStateRef {
            entries,
            commit_count,
        },
    )
}

/// Decode a previously persisted document.
pub fn decode(bytes: &[u8]) -> Result<PersistedState, serde_json::Error> {
    serde_json::from_slice(bytes)
}
