//! # cas-01-state-engine
//!
//! State Engine subsystem for Cascade.
//!
//! ## Role in System
//!
//! - **Leaf Component**: An in-memory key→bytes map whose sole mutation
//!   primitive is compare-and-swap. No knowledge of transactions, blocks,
//!   or the replication protocol.
//! - **Deterministic Persistence**: `commit` serializes the full map plus
//!   the next commit count into one deterministic byte encoding, streaming
//!   it to the persistence sink and the SHA-256 hasher simultaneously.
//! - **Replayable**: `restore` rebuilds identical state and digest from a
//!   previously persisted byte stream.
//!
//! ## Invariants
//!
//! - `last_digest` always matches the bytes last written to or read from
//!   persistence; it never reflects uncommitted in-memory mutations.
//! - `commit_count` advances only via a successful full persist.
//! - Entries serialize in lexicographic key order, so the same content
//!   yields the same bytes, hence the same digest, on every replica.

pub mod domain;
pub mod ports;

pub use domain::*;
pub use ports::*;
