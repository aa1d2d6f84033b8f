//! Port traits for the State Engine.

pub mod sink;

pub use sink::{NopSink, StateSink, VecSink};
