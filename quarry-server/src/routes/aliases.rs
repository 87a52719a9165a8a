//! Alias management endpoints under /:name/_alias and /_alias/:alias

use crate::error::{Result, ServerError};
use crate::state::AppState;
use crate::telemetry::{create_request_span, set_span_error_code};
use axum::extract::{Path, State};
use axum::Json;
use quarry_registry::AliasOutcome;
use serde_json::{json, Value as JsonValue};
use std::sync::Arc;
use tracing::Instrument;

use super::indices::AcknowledgedResponse;

/// Render `{ "<index>": { "aliases": { "<alias>": {} } } }` style maps,
/// the response shape search clients expect from alias lookups
fn alias_map(entries: &[(String, Vec<String>)]) -> JsonValue {
    let mut body = serde_json::Map::new();
    for (index, aliases) in entries {
        let mut alias_obj = serde_json::Map::new();
        for alias in aliases {
            alias_obj.insert(alias.clone(), json!({}));
        }
        body.insert(index.clone(), json!({ "aliases": alias_obj }));
    }
    JsonValue::Object(body)
}

/// Create or replace an alias
///
/// PUT /:name/_alias/:alias
///
/// Points `alias` at the index `name`, replacing the alias's previous
/// target if it already existed. Returns 404 Not Found if the index is not
/// live and 400 Bad Request if the alias name collides with an index name.
pub async fn put(
    State(state): State<Arc<AppState>>,
    Path((name, alias)): Path<(String, String)>,
) -> Result<Json<AcknowledgedResponse>> {
    let span = create_request_span("alias:put", Some(&alias));
    async move {
        let span = tracing::Span::current();

        tracing::info!(status = "start", index = %name, "alias upsert requested");

        let outcome = match state.registry.put_alias(&name, &alias) {
            Ok(outcome) => outcome,
            Err(e) => {
                let server_error = ServerError::from(e);
                set_span_error_code(&span, server_error.error_code());
                tracing::warn!(error = %server_error, index = %name, "alias upsert failed");
                return Err(server_error);
            }
        };

        match outcome {
            AliasOutcome::Created => {
                tracing::info!(status = "success", index = %name, "alias created")
            }
            AliasOutcome::Replaced => {
                tracing::info!(status = "success", index = %name, "alias replaced")
            }
        }
        Ok(Json(AcknowledgedResponse { acknowledged: true }))
    }
    .instrument(span)
    .await
}

/// Check whether an alias points at an index
///
/// GET /:name/_alias/:alias
///
/// Returns the alias entry if `alias` targets the index `name`, 404 Not
/// Found otherwise. `HEAD` on the same path is the existence probe with the
/// index filter applied.
pub async fn exists(
    State(state): State<Arc<AppState>>,
    Path((name, alias)): Path<(String, String)>,
) -> Result<Json<JsonValue>> {
    let span = create_request_span("alias:exists", Some(&alias));
    async move {
        let span = tracing::Span::current();

        if !state.registry.exists_alias(&alias, Some(&name)) {
            let server_error = ServerError::not_found(format!("Alias not found: {}", alias));
            set_span_error_code(&span, server_error.error_code());
            tracing::debug!(error = %server_error, index = %name, "alias probe missed");
            return Err(server_error);
        }

        tracing::debug!(status = "success", index = %name, "alias probe hit");
        Ok(Json(alias_map(&[(name, vec![alias])])))
    }
    .instrument(span)
    .await
}

/// List the aliases of an index
///
/// GET /:name/_alias
///
/// Returns every alias pointing at the index, or 404 Not Found if the
/// index is not live. An index without aliases yields an empty alias map.
pub async fn list(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Json<JsonValue>> {
    let span = create_request_span("alias:list", Some(&name));
    async move {
        let span = tracing::Span::current();

        let aliases = match state.registry.index_aliases(&name) {
            Ok(aliases) => aliases,
            Err(e) => {
                let server_error = ServerError::from(e);
                set_span_error_code(&span, server_error.error_code());
                tracing::debug!(error = %server_error, "alias listing failed");
                return Err(server_error);
            }
        };

        tracing::debug!(status = "success", count = aliases.len(), "aliases listed");
        Ok(Json(alias_map(&[(name, aliases)])))
    }
    .instrument(span)
    .await
}

/// Find the indices behind an alias
///
/// GET /_alias/:alias
///
/// Returns one entry per index the alias targets, or 404 Not Found for an
/// unknown alias.
pub async fn indices_for_alias(
    State(state): State<Arc<AppState>>,
    Path(alias): Path<String>,
) -> Result<Json<JsonValue>> {
    let span = create_request_span("alias:resolve", Some(&alias));
    async move {
        let span = tracing::Span::current();

        let indices = state.registry.indices_with_alias(&alias);
        if indices.is_empty() {
            let server_error = ServerError::not_found(format!("Alias not found: {}", alias));
            set_span_error_code(&span, server_error.error_code());
            tracing::debug!(error = %server_error, "alias resolution missed");
            return Err(server_error);
        }

        let entries: Vec<(String, Vec<String>)> = indices
            .into_iter()
            .map(|index| (index, vec![alias.clone()]))
            .collect();

        tracing::debug!(status = "success", count = entries.len(), "alias resolved");
        Ok(Json(alias_map(&entries)))
    }
    .instrument(span)
    .await
}

/// Remove an alias from an index
///
/// DELETE /:name/_alias/:alias
///
/// The target index itself is untouched. Returns 404 Not Found if the
/// index is not live or the alias does not point at it.
pub async fn delete(
    State(state): State<Arc<AppState>>,
    Path((name, alias)): Path<(String, String)>,
) -> Result<Json<AcknowledgedResponse>> {
    let span = create_request_span("alias:delete", Some(&alias));
    async move {
        let span = tracing::Span::current();

        tracing::info!(status = "start", index = %name, "alias deletion requested");

        if let Err(e) = state.registry.delete_alias(&name, &alias) {
            let server_error = ServerError::from(e);
            set_span_error_code(&span, server_error.error_code());
            tracing::warn!(error = %server_error, index = %name, "alias deletion failed");
            return Err(server_error);
        }

        tracing::info!(status = "success", index = %name, "alias deleted");
        Ok(Json(AcknowledgedResponse { acknowledged: true }))
    }
    .instrument(span)
    .await
}
