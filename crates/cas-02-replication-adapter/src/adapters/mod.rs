//! Concrete adapters for the Replication Adapter's outward-facing seams.

pub mod file_sink;

pub use file_sink::FileSink;
