//! # API Gateway Service
//!
//! Router construction and the HTTP server entry point.

use crate::domain::ApiResponse;
use crate::ports::ReplicationClient;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Form, Json, Router};
use serde::Deserialize;
use shared_types::{is_ok, CasTransaction, CODE_NOT_FOUND};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::info;

/// API Gateway error types.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("failed to bind API listener: {0}")]
    Bind(#[source] std::io::Error),

    #[error("API server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Shared handler state.
#[derive(Clone)]
struct AppState {
    client: Arc<dyn ReplicationClient>,
}

/// Build the gateway router over a replication client.
pub fn router(client: Arc<dyn ReplicationClient>) -> Router {
    Router::new()
        .route("/:key", get(handle_get).post(handle_set))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { client })
}

/// Serve the router until the shutdown signal flips.
pub async fn serve(
    addr: SocketAddr,
    client: Arc<dyn ReplicationClient>,
    mut shutdown: watch::Receiver<bool>,
) -> Result<(), GatewayError> {
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(GatewayError::Bind)?;
    info!(addr = %addr, "Starting CompareAndSwap API server");

    axum::serve(listener, router(client))
        .with_graceful_shutdown(async move {
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await
        .map_err(GatewayError::Serve)
}

async fn handle_get(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> (StatusCode, Json<ApiResponse>) {
    let response = state.client.query(&key).await;

    if response.is_ok() {
        let value = String::from_utf8_lossy(&response.value).into_owned();
        return (StatusCode::OK, Json(ApiResponse::hit(key, value)));
    }

    let status = if response.code == CODE_NOT_FOUND {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::BAD_REQUEST
    };
    (
        status,
        Json(ApiResponse::rejection(
            key,
            format!("result code {}", response.code),
            response.log,
        )),
    )
}

#[derive(Debug, Deserialize)]
struct SetForm {
    #[serde(default)]
    old: String,
    #[serde(default)]
    new: String,
}

async fn handle_set(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Form(form): Form<SetForm>,
) -> (StatusCode, Json<ApiResponse>) {
    let tx = CasTransaction {
        key: key.clone(),
        old: form.old.into_bytes(),
        new: form.new.clone().into_bytes(),
    };

    let response = state.client.broadcast(tx.encode()).await;

    if is_ok(response.code) {
        return (StatusCode::OK, Json(ApiResponse::hit(key, form.new)));
    }

    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::rejection(
            key,
            format!("result code {}", response.code),
            response.log,
        )),
    )
}
