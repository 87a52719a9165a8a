//! Admin endpoints: /, /health, /stats

use crate::state::AppState;
use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;

/// Cluster banner endpoint
///
/// GET /
///
/// Returns the cluster name and server version, in the shape search
/// clients expect when probing a node.
pub async fn root(State(state): State<Arc<AppState>>) -> Json<JsonValue> {
    Json(json!({
        "cluster_name": state.config.cluster_name,
        "version": {
            "number": env!("CARGO_PKG_VERSION")
        }
    }))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint
///
/// GET /health
///
/// Returns a simple health check response to verify the server is running.
pub async fn health() -> Json<HealthResponse> {
    tracing::debug!("health check requested");
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Server statistics response
#[derive(Serialize)]
pub struct StatsResponse {
    /// Server uptime in seconds
    pub uptime_secs: u64,
    /// Number of live indices
    pub index_count: usize,
    /// Number of live aliases
    pub alias_count: usize,
    /// Server version
    pub version: &'static str,
}

/// Server statistics endpoint
///
/// GET /stats
///
/// Returns server statistics including uptime and registry counts.
pub async fn stats(State(state): State<Arc<AppState>>) -> Json<StatsResponse> {
    let span = tracing::info_span!("stats");
    let _guard = span.enter();

    tracing::info!("server stats requested");

    Json(StatsResponse {
        uptime_secs: state.uptime_secs(),
        index_count: state.registry.index_count(),
        alias_count: state.registry.alias_count(),
        version: env!("CARGO_PKG_VERSION"),
    })
}
