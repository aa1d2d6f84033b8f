//! # Cascade Node Runtime
//!
//! Wiring for a single Cascade node:
//!
//! - `config` - CLI flags and derived settings
//! - `driver` - local sequencer standing in for the external replication
//!   engine: accepts pre-validated transactions and commits them in
//!   interval-produced blocks
//!
//! The binary (`cascade-node`) restores persisted state if present, starts
//! the HTTP API gateway and the sequencer loop, and treats any persistence
//! failure as fatal: replicas that cannot persist must stop rather than
//! drift from the rest of the deployment.

pub mod config;
pub mod driver;

pub use config::NodeConfig;
pub use driver::{local_sequencer, LocalSequencer, SequencerLoop};
