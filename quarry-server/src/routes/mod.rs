//! HTTP route handlers and router configuration

mod admin;
mod aliases;
mod indices;

use crate::state::AppState;
use axum::{
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the main application router
///
/// `GET` routes also answer `HEAD` with the body stripped, which is how
/// clients probe index and alias existence.
pub fn build_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        // Cluster banner and admin endpoints
        .route("/", get(admin::root))
        .route("/health", get(admin::health))
        .route("/stats", get(admin::stats))
        // Alias lookup across all indices
        .route("/_alias/:alias", get(aliases::indices_for_alias))
        // Index management
        .route(
            "/:name",
            put(indices::create).get(indices::get).delete(indices::delete),
        )
        // Alias management
        .route("/:name/_alias", get(aliases::list))
        .route(
            "/:name/_alias/:alias",
            put(aliases::put).get(aliases::exists).delete(aliases::delete),
        );

    // Add state
    let mut router = router.with_state(state.clone());

    // Add middleware
    router = router.layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if state.config.cors_enabled {
        router = router.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        );
    }

    router
}
