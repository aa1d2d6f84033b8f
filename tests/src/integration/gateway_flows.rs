//! # Gateway-to-Commit Flows
//!
//! Drives the HTTP surface end to end: requests enter the axum router,
//! flow through the local sequencer's admission, and become visible to
//! reads only once a block cycle commits them.

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use cas_01_state_engine::NopSink;
    use cas_02_replication_adapter::{ReplicationAdapter, ReplicationHooks};
    use cas_03_api_gateway::{router, ApiResponse, ReplicationClient};
    use node_runtime::local_sequencer;
    use std::sync::Arc;
    use std::time::Duration;
    use tokio::sync::watch;
    use tower::ServiceExt;

    const BLOCK_INTERVAL: Duration = Duration::from_millis(100);

    struct Harness {
        adapter: Arc<ReplicationAdapter>,
        app: axum::Router,
        _shutdown_tx: watch::Sender<bool>,
    }

    fn start_node() -> Harness {
        let adapter =
            Arc::new(ReplicationAdapter::new(None, Box::new(NopSink::new())).unwrap());
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let (sequencer, sequencer_loop) =
            local_sequencer(Arc::clone(&adapter), BLOCK_INTERVAL, shutdown_rx);
        tokio::spawn(sequencer_loop.run());

        let client: Arc<dyn ReplicationClient> = Arc::new(sequencer);
        Harness {
            adapter,
            app: router(client),
            _shutdown_tx: shutdown_tx,
        }
    }

    async fn get(app: &axum::Router, key: &str) -> (StatusCode, ApiResponse) {
        let response = app
            .clone()
            .oneshot(
                Request::get(format!("/{key}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn set(app: &axum::Router, key: &str, old: &str, new: &str) -> StatusCode {
        let response = app
            .clone()
            .oneshot(
                Request::post(format!("/{key}"))
                    .header("content-type", "application/x-www-form-urlencoded")
                    .body(Body::from(format!("old={old}&new={new}")))
                    .unwrap(),
            )
            .await
            .unwrap();
        response.status()
    }

    /// Sleep past block boundaries until the adapter has committed
    /// `target` blocks (paused-clock auto-advance makes this prompt).
    async fn wait_for_commits(adapter: &ReplicationAdapter, target: u64) {
        for _ in 0..20 {
            if adapter.info().last_commit >= target {
                return;
            }
            tokio::time::sleep(BLOCK_INTERVAL).await;
        }
        panic!(
            "never reached {} commits (at {})",
            target,
            adapter.info().last_commit
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_write_becomes_readable_after_commit() {
        let node = start_node();

        assert_eq!(set(&node.app, "greeting", "", "hello").await, StatusCode::OK);
        wait_for_commits(&node.adapter, 1).await;

        let (status, body) = get(&node.app, "greeting").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.value.as_deref(), Some("hello"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_read_misses_until_the_block_commits() {
        let node = start_node();

        assert_eq!(set(&node.app, "slow", "", "value").await, StatusCode::OK);

        // Accepted into the pending block, but reads serve committed
        // state only.
        assert_eq!(node.adapter.info().last_commit, 0);
        assert_eq!(node.adapter.query(b"slow").code, shared_types::CODE_NOT_FOUND);

        wait_for_commits(&node.adapter, 1).await;
        let (status, body) = get(&node.app, "slow").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.value.as_deref(), Some("value"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_write_is_rejected_at_admission() {
        let node = start_node();

        assert_eq!(set(&node.app, "k", "", "one").await, StatusCode::OK);
        wait_for_commits(&node.adapter, 1).await;

        // Claims the key is still empty; admission says otherwise.
        let status = set(&node.app, "k", "", "two").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        // A correctly-chained write goes through.
        assert_eq!(set(&node.app, "k", "one", "two").await, StatusCode::OK);
        wait_for_commits(&node.adapter, 2).await;

        let (_, body) = get(&node.app, "k").await;
        assert_eq!(body.value.as_deref(), Some("two"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_key_reads_not_found() {
        let node = start_node();
        let (status, body) = get(&node.app, "never-written").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body.error.is_some());
    }
}
