//! Quarry HTTP Server
//!
//! A thin HTTP REST API wrapper around `quarry-registry`, exposing the
//! index and alias registry over the wire protocol search clients speak.
//!
//! # Features
//!
//! - Index create, existence probe and delete (by index or alias name)
//! - Alias create/replace, existence probe, listing and delete
//! - Delete-by-alias cascade keeping both namespaces consistent
//! - CORS support
//!
//! # Example
//!
//! ```ignore
//! use quarry_server::{QuarryServer, ServerConfig};
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = ServerConfig::default();
//!     let server = QuarryServer::new(config);
//!     server.run().await.unwrap();
//! }
//! ```

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod telemetry;

pub use config::ServerConfig;
pub use error::{Result, ServerError};
pub use state::AppState;
pub use telemetry::{init_logging, TelemetryConfig};

use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

/// Quarry HTTP Server
pub struct QuarryServer {
    /// Application state
    state: Arc<AppState>,
    /// Configured router
    router: Router,
}

impl QuarryServer {
    /// Create a new server with the given configuration
    pub fn new(config: ServerConfig) -> Self {
        let state = Arc::new(AppState::new(config));
        let router = routes::build_router(state.clone());

        Self { state, router }
    }

    /// Get a reference to the application state
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Get the router for testing
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server
    pub async fn run(self) -> std::result::Result<(), std::io::Error> {
        let addr = self.state.config.listen_addr;
        let listener = TcpListener::bind(addr).await?;

        info!(
            addr = %addr,
            cluster = %self.state.config.cluster_name,
            cors = self.state.config.cors_enabled,
            "Quarry server starting"
        );

        axum::serve(listener, self.router).await
    }
}

/// Builder for QuarryServer with fluent API
pub struct QuarryServerBuilder {
    config: ServerConfig,
}

impl QuarryServerBuilder {
    /// Create a new builder with default config
    pub fn new() -> Self {
        Self {
            config: ServerConfig::default(),
        }
    }

    /// Set the listen address
    pub fn listen_addr(mut self, addr: impl Into<std::net::SocketAddr>) -> Self {
        self.config.listen_addr = addr.into();
        self
    }

    /// Set the cluster name reported by the root endpoint
    pub fn cluster_name(mut self, name: impl Into<String>) -> Self {
        self.config.cluster_name = name.into();
        self
    }

    /// Enable or disable CORS
    pub fn cors_enabled(mut self, enabled: bool) -> Self {
        self.config.cors_enabled = enabled;
        self
    }

    /// Build the server
    pub fn build(self) -> QuarryServer {
        QuarryServer::new(self.config)
    }
}

impl Default for QuarryServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}
