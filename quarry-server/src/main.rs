//! Quarry Server CLI
//!
//! Run with: `cargo run -p quarry-server -- --help`

use quarry_server::{
    telemetry::{init_logging, TelemetryConfig},
    QuarryServer, ServerConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse CLI + env via clap
    let config = ServerConfig::from_args();

    // Initialize telemetry
    let telemetry_config = TelemetryConfig::with_server_config(&config);
    init_logging(&telemetry_config);

    // Log startup info
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.listen_addr,
        cluster = %config.cluster_name,
        cors = config.cors_enabled,
        log_format = ?telemetry_config.log_format,
        "Starting Quarry server"
    );

    // Create and run server
    let server = QuarryServer::new(config);
    server.run().await.map_err(Into::into)
}
