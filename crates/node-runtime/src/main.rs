//! # Cascade Node
//!
//! Entry point: restore persisted state when present, start the HTTP API
//! gateway and the local sequencer, and stop the whole process on the
//! first persistence failure.

use anyhow::{Context, Result};
use cas_02_replication_adapter::{FileSink, ReplicationAdapter, ReplicationHooks};
use cas_03_api_gateway::ReplicationClient;
use clap::Parser;
use node_runtime::{local_sequencer, NodeConfig};
use std::fs::File;
use std::io::ErrorKind;
use std::sync::Arc;
use tokio::sync::watch;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = NodeConfig::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.default_log_filter())),
        )
        .init();

    // One-shot initial read of the persistence file: absent is a fresh
    // start, unreadable or corrupt is fatal.
    let initial = match File::open(&config.state_file) {
        Ok(file) => Some(file),
        Err(err) if err.kind() == ErrorKind::NotFound => None,
        Err(err) => {
            return Err(err).with_context(|| {
                format!("opening state file {}", config.state_file.display())
            })
        }
    };

    let sink = FileSink::new(&config.state_file);
    let adapter = match initial {
        Some(mut file) => ReplicationAdapter::new(Some(&mut file), Box::new(sink)),
        None => ReplicationAdapter::new(None, Box::new(sink)),
    }
    .with_context(|| format!("restoring state from {}", config.state_file.display()))?;
    let adapter = Arc::new(adapter);

    let startup = adapter.info();
    info!(
        commits = startup.last_commit,
        digest = %hex::encode(&startup.digest),
        state_file = %config.state_file.display(),
        "State loaded"
    );

    let (shutdown_tx, shutdown_rx) = watch::channel(false);

    let (sequencer, sequencer_loop) = local_sequencer(
        Arc::clone(&adapter),
        config.block_interval(),
        shutdown_rx.clone(),
    );
    let client: Arc<dyn ReplicationClient> = Arc::new(sequencer);

    let mut sequencer_handle = tokio::spawn(sequencer_loop.run());
    let mut api_handle = tokio::spawn(cas_03_api_gateway::serve(
        config.api_addr,
        client,
        shutdown_rx,
    ));

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            result.context("listening for shutdown signal")?;
            info!("Received shutdown signal");
        }
        result = &mut sequencer_handle => {
            result.context("sequencer task panicked")?
                .context("local sequencer failed")?;
            anyhow::bail!("local sequencer exited before shutdown");
        }
        result = &mut api_handle => {
            result.context("API task panicked")?
                .context("API server failed")?;
            anyhow::bail!("API server exited before shutdown");
        }
    }

    shutdown_tx.send(true).ok();

    let (api_result, sequencer_result) = tokio::join!(api_handle, sequencer_handle);
    api_result
        .context("API task panicked")?
        .context("API server failed")?;
    sequencer_result
        .context("sequencer task panicked")?
        .context("local sequencer failed")?;

    info!("Clean shutdown");
    Ok(())
}
