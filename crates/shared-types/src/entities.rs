//! # Core Domain Entities
//!
//! Key/value aliases and the compare-and-swap transaction wire format.
//!
//! ## Wire format
//!
//! A transaction is exactly three colon-separated segments:
//!
//! ```text
//! <key>:<old>:<new>
//! ```
//!
//! The parser splits on the first two colons only, so `new` may itself
//! contain colons. `old` and `new` are raw byte sequences; an empty `old`
//! means "the key must currently be absent or empty".

use thiserror::Error;

/// A state key. Keys are UTF-8 text; the value space is opaque bytes.
pub type Key = String;

/// An opaque value byte sequence.
pub type Value = Vec<u8>;

/// A SHA-256 digest of persisted state bytes.
pub type Digest = Vec<u8>;

/// Errors produced while decoding transaction wire bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TxFormatError {
    /// Fewer than three segments after splitting on the first two colons.
    #[error(r#"tx data must be "<key>:<old>:<new>""#)]
    MissingSegments,

    /// The key segment is not valid UTF-8.
    #[error("tx key is not valid UTF-8")]
    KeyNotUtf8,
}

/// A single compare-and-swap mutation, as carried on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CasTransaction {
    /// Target key.
    pub key: Key,
    /// Expected current value; empty means absent.
    pub old: Value,
    /// Replacement value.
    pub new: Value,
}

impl CasTransaction {
    /// Decode transaction wire bytes.
    ///
    /// Splits on the first two `:` bytes only; everything after the second
    /// colon belongs to `new`.
    pub fn parse(raw: &[u8]) -> Result<Self, TxFormatError> {
        let mut tokens = raw.splitn(3, |b| *b == b':');
        let (key, old, new) = match (tokens.next(), tokens.next(), tokens.next()) {
            (Some(key), Some(old), Some(new)) => (key, old, new),
            _ => return Err(TxFormatError::MissingSegments),
        };
        let key = std::str::from_utf8(key).map_err(|_| TxFormatError::KeyNotUtf8)?;
        Ok(Self {
            key: key.to_owned(),
            old: old.to_vec(),
            new: new.to_vec(),
        })
    }

    /// Encode to the `key:old:new` wire form.
    pub fn encode(&self) -> Vec<u8> {
        let mut raw = Vec::with_capacity(self.key.len() + self.old.len() + self.new.len() + 2);
        raw.extend_from_slice(self.key.as_bytes());
        raw.push(b':');
        raw.extend_from_slice(&self.old);
        raw.push(b':');
        raw.extend_from_slice(&self.new);
        raw
    }
}
