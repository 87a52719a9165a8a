//! Index management endpoints: PUT/GET/DELETE /:name

use crate::error::{Result, ServerError};
use crate::state::AppState;
use crate::telemetry::{create_request_span, set_span_error_code};
use axum::extract::{Path, Request, State};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tracing::Instrument;

/// Acknowledgement response for mutations
#[derive(Serialize)]
pub struct AcknowledgedResponse {
    /// Whether the operation was applied
    pub acknowledged: bool,
}

/// Create a new index
///
/// PUT /:name
///
/// The optional request body is an opaque settings document stored with the
/// index. Returns 409 Conflict if the name already denotes an index and
/// 400 Bad Request if it collides with an alias or fails validation.
pub async fn create(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
    request: Request,
) -> Result<Json<AcknowledgedResponse>> {
    // Read and parse the optional settings body
    let body_bytes = axum::body::to_bytes(request.into_body(), state.config.body_limit)
        .await
        .map_err(|e| ServerError::bad_request(format!("Failed to read body: {}", e)))?;
    let settings: JsonValue = if body_bytes.is_empty() {
        json!({})
    } else {
        serde_json::from_slice(&body_bytes)?
    };

    let span = create_request_span("index:create", Some(&name));
    async move {
        let span = tracing::Span::current();

        tracing::info!(status = "start", "index creation requested");

        if let Err(e) = state.registry.create_index(&name, settings) {
            let server_error = ServerError::from(e);
            set_span_error_code(&span, server_error.error_code());
            tracing::warn!(error = %server_error, "index creation failed");
            return Err(server_error);
        }

        tracing::info!(status = "success", "index created");
        Ok(Json(AcknowledgedResponse { acknowledged: true }))
    }
    .instrument(span)
    .await
}

/// Get index metadata
///
/// GET /:name
///
/// The name may be an index or an alias; aliases resolve to their target
/// index. Returns one entry per resolved index, keyed by index name, with
/// its aliases, settings and creation time. `HEAD` on the same path is the
/// existence probe.
pub async fn get(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<JsonValue>> {
    let span = create_request_span("index:get", Some(&name));
    async move {
        let span = tracing::Span::current();

        let infos = state.registry.get_index(&name);
        if infos.is_empty() {
            let server_error = ServerError::not_found(format!("Index not found: {}", name));
            set_span_error_code(&span, server_error.error_code());
            tracing::debug!(error = %server_error, "index lookup missed");
            return Err(server_error);
        }

        let mut body = serde_json::Map::new();
        for info in infos {
            let mut aliases = serde_json::Map::new();
            for alias in info.aliases {
                aliases.insert(alias, json!({}));
            }
            body.insert(
                info.metadata.name.clone(),
                json!({
                    "aliases": aliases,
                    "settings": info.metadata.settings,
                    "created_at": info.metadata.created_at.to_rfc3339(),
                }),
            );
        }

        tracing::debug!(status = "success", "index retrieved");
        Ok(Json(JsonValue::Object(body)))
    }
    .instrument(span)
    .await
}

/// Delete an index
///
/// DELETE /:name
///
/// The name may be an index or an alias. Deleting through an alias removes
/// the underlying index, and every alias left without targets is dropped
/// with it. Returns 404 Not Found if the name resolves to nothing.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<AcknowledgedResponse>> {
    let span = create_request_span("index:delete", Some(&name));
    async move {
        let span = tracing::Span::current();

        tracing::info!(status = "start", "index deletion requested");

        let report = match state.registry.delete_index(&name) {
            Ok(report) => report,
            Err(e) => {
                let server_error = ServerError::from(e);
                set_span_error_code(&span, server_error.error_code());
                tracing::warn!(error = %server_error, "index deletion failed");
                return Err(server_error);
            }
        };

        tracing::info!(
            status = "success",
            indices_removed = report.indices_removed.len(),
            aliases_removed = report.aliases_removed.len(),
            "index deleted"
        );
        Ok(Json(AcknowledgedResponse { acknowledged: true }))
    }
    .instrument(span)
    .await
}
