//! Port traits for the Replication Adapter.

pub mod inbound;

pub use inbound::{CommitResponse, InfoResponse, QueryResponse, ReplicationHooks, TxResponse};
