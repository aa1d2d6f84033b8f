//! # State Engine Core
//!
//! Key→bytes map with compare-and-swap mutability. Persistence is achieved
//! by explicitly invoking [`StateEngine::commit`] (and
//! [`StateEngine::restore`] on startup).
//!
//! ## Locking
//!
//! Each engine value carries its own `RwLock`: reads run concurrently with
//! reads, mutation is exclusive, and two engine instances never contend
//! with each other. `commit` holds the write lock for the full
//! serialize+hash+write+close sequence so no reader observes a torn state
//! and no swap interleaves with a persist.

use crate::domain::codec;
use crate::domain::errors::{EngineError, EngineResult};
use crate::ports::StateSink;
use parking_lot::RwLock;
use sha2::{Digest as _, Sha256};
use shared_types::{Digest, Key, Value};
use std::collections::BTreeMap;
use std::io::{self, Read, Write};

#[derive(Debug, Default)]
struct EngineInner {
    entries: BTreeMap<Key, Value>,
    commit_count: u64,
    last_digest: Digest,
}

/// A key-value store with compare-and-swap mutability and deterministic
/// commit/restore persistence.
#[derive(Debug, Default)]
pub struct StateEngine {
    inner: RwLock<EngineInner>,
}

impl StateEngine {
    /// Create a new, empty engine. Load persisted data, if any, via
    /// [`StateEngine::restore`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the value associated with `key`.
    pub fn get(&self, key: &str) -> EngineResult<Value> {
        let inner = self.inner.read();
        inner
            .entries
            .get(key)
            .cloned()
            .ok_or(EngineError::KeyNotFound)
    }

    /// Set `key` to `new` if and only if its current value is `old`.
    /// An absent key compares equal to the empty value.
    ///
    /// This is the sole mutation primitive; there is no unconditional set.
    pub fn compare_and_swap(&self, key: &str, old: &[u8], new: &[u8]) -> EngineResult<()> {
        let mut inner = self.inner.write();
        let current = inner.entries.get(key).map(Vec::as_slice).unwrap_or(&[]);
        if current != old {
            return Err(EngineError::CasFailure);
        }
        inner.entries.insert(key.to_owned(), new.to_vec());
        Ok(())
    }

    /// Serialize the entire map plus `commit_count + 1` into the sink,
    /// hashing the exact bytes written. Only if both the encode and the
    /// sink's close succeed does the commit count advance and the digest
    /// update; a partial write leaves both untouched. The in-memory map is
    /// never rolled back by a failed commit.
    pub fn commit(&self, sink: &mut dyn StateSink) -> EngineResult<Digest> {
        let mut inner = self.inner.write();

        let mut hasher = Sha256::new();
        codec::encode_into(
            TeeWriter {
                sink: &mut *sink,
                hasher: &mut hasher,
            },
            &inner.entries,
            inner.commit_count + 1,
        )
        .map_err(EngineError::Encode)?;
        sink.close()?;

        inner.commit_count += 1;
        inner.last_digest = hasher.finalize().to_vec();
        Ok(inner.last_digest.clone())
    }

    /// Replace the entire map and commit count from a previously persisted
    /// byte stream, recomputing the digest from the bytes actually read.
    /// The digest therefore survives restarts without being stored anywhere.
    pub fn restore(&self, source: &mut dyn Read) -> EngineResult<()> {
        let mut inner = self.inner.write();

        let mut raw = Vec::new();
        source.read_to_end(&mut raw)?;
        let decoded = codec::decode(&raw).map_err(EngineError::Decode)?;

        inner.entries = decoded.entries;
        inner.commit_count = decoded.commit_count;
        inner.last_digest = Sha256::digest(&raw).to_vec();
        Ok(())
    }

    /// Number of successful commits. This value is persisted.
    pub fn commits(&self) -> u64 {
        self.inner.read().commit_count
    }

    /// SHA-256 digest of the state at time of last commit or restore.
    /// Empty until the first of either.
    pub fn digest(&self) -> Digest {
        self.inner.read().last_digest.clone()
    }

    /// Overwrite `target`'s map, commit count, and digest with a
    /// point-in-time copy of this engine's values. The two engines never
    /// share storage afterwards.
    pub fn snapshot_into(&self, target: &StateEngine) {
        let source = self.inner.read();
        let mut dest = target.inner.write();
        dest.entries = source.entries.clone();
        dest.commit_count = source.commit_count;
        dest.last_digest = source.last_digest.clone();
    }

    /// Number of live entries.
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().entries.is_empty()
    }
}

/// Streams every encoded byte to the sink and the hasher simultaneously,
/// so the digest covers exactly what was persisted.
struct TeeWriter<'a> {
    sink: &'a mut dyn StateSink,
    hasher: &'a mut Sha256,
}

impl Write for TeeWriter<'_> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.sink.write_all(buf)?;
        self.hasher.update(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.sink.flush()
    }
}
