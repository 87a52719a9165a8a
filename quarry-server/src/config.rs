//! Server configuration

use clap::Parser;
use std::net::SocketAddr;

/// Quarry HTTP server configuration
#[derive(Parser, Debug, Clone)]
#[command(name = "quarry-server")]
#[command(about = "Quarry search index registry HTTP server")]
pub struct ServerConfig {
    /// Address to listen on
    #[arg(long, env = "QUARRY_LISTEN_ADDR", default_value = "0.0.0.0:9200")]
    pub listen_addr: SocketAddr,

    /// Cluster name reported by the root endpoint
    #[arg(long, env = "QUARRY_CLUSTER_NAME", default_value = "quarry")]
    pub cluster_name: String,

    /// Enable CORS (Cross-Origin Resource Sharing)
    #[arg(long, env = "QUARRY_CORS_ENABLED", default_value = "true")]
    pub cors_enabled: bool,

    /// Request body size limit in bytes (default 1MB)
    #[arg(long, env = "QUARRY_BODY_LIMIT", default_value = "1048576")]
    pub body_limit: usize,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "QUARRY_LOG_LEVEL", default_value = "info")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:9200".parse().unwrap(),
            cluster_name: "quarry".to_string(),
            cors_enabled: true,
            body_limit: 1024 * 1024,
            log_level: "info".to_string(),
        }
    }
}

impl ServerConfig {
    /// Create config from CLI args
    pub fn from_args() -> Self {
        Self::parse()
    }
}
