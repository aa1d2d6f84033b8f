//! Node configuration from CLI flags.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

/// Cascade node: a replicated compare-and-swap key-value store.
#[derive(Debug, Clone, Parser)]
#[command(name = "cascade-node", version)]
pub struct NodeConfig {
    /// HTTP API address.
    #[arg(long, default_value = "127.0.0.1:8081")]
    pub api_addr: SocketAddr,

    /// Application persistence file; created on first commit, restored on
    /// startup when present.
    #[arg(long, default_value = "db.json")]
    pub state_file: PathBuf,

    /// Milliseconds between block production cycles.
    #[arg(long, default_value_t = 1000)]
    pub block_interval_ms: u64,

    /// Verbose logging of application information.
    #[arg(long)]
    pub verbose: bool,
}

impl NodeConfig {
    pub fn block_interval(&self) -> Duration {
        Duration::from_millis(self.block_interval_ms)
    }

    /// Default log filter when RUST_LOG is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
