//! Port traits for the API Gateway.

pub mod outbound;

pub use outbound::ReplicationClient;
