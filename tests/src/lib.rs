//! # Cascade Test Suite
//!
//! Unified test crate for cross-subsystem flows:
//!
//! ```text
//! tests/src/
//! └── integration/
//!     ├── replication_flows.rs   # adapter lifecycle + restart from disk
//!     └── gateway_flows.rs       # HTTP → sequencer → adapter
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p cas-tests
//!
//! # By module
//! cargo test -p cas-tests integration::replication_flows
//! ```

#![allow(dead_code)]

pub mod integration;
