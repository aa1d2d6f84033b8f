//! # cas-03-api-gateway
//!
//! Client-facing HTTP surface for Cascade.
//!
//! ## Role in System
//!
//! - **Read path**: `GET /:key` queries the latest committed value through
//!   the replication engine.
//! - **Write path**: `POST /:key` with form fields `old` and `new` encodes
//!   a compare-and-swap transaction and submits it to the replication
//!   engine's ingress. A 200 means the transaction passed at least
//!   pre-validation; inclusion in a block happens asynchronously.
//!
//! The gateway never touches state engines directly; everything goes
//! through the [`ports::ReplicationClient`] boundary.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::*;
pub use ports::*;
pub use service::{router, serve, GatewayError};
