//! Application state management
//!
//! The registry handle is internally shared and cheap to clone, so the
//! state struct holds it directly. Handlers receive the state via axum's
//! `State` extractor as `Arc<AppState>`.

use crate::config::ServerConfig;
use quarry_registry::RegistryService;
use std::time::Instant;

/// Application state shared across all request handlers
#[derive(Debug)]
pub struct AppState {
    /// Index and alias registry
    pub registry: RegistryService,

    /// Server configuration
    pub config: ServerConfig,

    /// Server start time for uptime tracking
    pub start_time: Instant,
}

impl AppState {
    /// Create new application state from config
    pub fn new(config: ServerConfig) -> Self {
        Self {
            registry: RegistryService::new(),
            config,
            start_time: Instant::now(),
        }
    }

    /// Get server uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}
