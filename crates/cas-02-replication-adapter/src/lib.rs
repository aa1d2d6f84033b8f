//! # cas-02-replication-adapter
//!
//! Replication Adapter subsystem for Cascade.
//!
//! ## Role in System
//!
//! - **Lifecycle Mapping**: Translates the external replication engine's
//!   lifecycle calls (handshake, pre-validate, ordered apply, block commit,
//!   query) onto two independent [`cas_01_state_engine::StateEngine`]
//!   instances.
//! - **Dual State Views**: A *provisional* engine pre-filters transactions
//!   before global ordering; the *authoritative* engine is mutated only by
//!   finally-ordered transactions and is the sole source of the persisted
//!   digest.
//! - **Reconciliation**: After every successful block commit the provisional
//!   view becomes a bytewise copy of the authoritative one, discarding any
//!   provisional-only effects.
//!
//! ## Result Codes
//!
//! Application-level outcomes (malformed wire bytes, CAS precondition
//! misses, query misses) travel as result codes in the responses and are
//! never process failures. Only persistence failures escape as errors, and
//! those are fatal to the process.

pub mod adapters;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use errors::*;
pub use ports::*;
pub use service::ReplicationAdapter;
