//! SMARTe MCP Server - Main entry point
//!
//! This is the main executable for the SMARTe MCP Server, which provides a Model Context
//! Protocol (MCP) interface to the SMARTe B2B data platform.

use anyhow::Result;
use smarte_mcp_server::client::{AsyncSmarteClient, AsyncSmarteClientImpl};
use smarte_mcp_server::repositories::{
    IntegrationRepository, ListRepository, RevealRepository, SmarteIntegrationRepository,
    SmarteListRepository, SmarteRevealRepository,
};
use smarte_mcp_server::{Config, Metrics, SmarteClient, SmarteMcpServer};
use std::sync::Arc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> Result<()> {
    // Load .env before the filter so LOG_LEVEL from the file applies
    let _ = dotenvy::dotenv();

    // Initialize logging (stderr only to avoid polluting stdout/MCP communication)
    let fallback = std::env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&fallback))
        .unwrap_or_else(|_| EnvFilter::new("error"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    // Load configuration
    let config = match Config::from_env() {
        Ok(cfg) => {
            info!("Configuration loaded successfully");
            cfg
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    info!(
        log_level = %config.log_level,
        timeout_secs = config.request_timeout,
        "Starting SMARTe MCP Server with gateway URL: {}",
        config.gateway_url
    );

    let headers = config.headers();
    if headers.authorization().is_none() {
        warn!("SMARTE_AUTHORIZATION is not set; every tool call will be rejected");
    }

    // Initialize SMARTe client
    let metrics = Metrics::new();
    let sync_client = SmarteClient::new(&config, metrics.clone());
    let client = Arc::new(AsyncSmarteClientImpl::new(sync_client)) as Arc<dyn AsyncSmarteClient>;

    // Initialize repositories
    let reveal_repo =
        Arc::new(SmarteRevealRepository::new(client.clone())) as Arc<dyn RevealRepository>;
    let integration_repo = Arc::new(SmarteIntegrationRepository::new(client.clone()))
        as Arc<dyn IntegrationRepository>;
    let list_repo = Arc::new(SmarteListRepository::new(client)) as Arc<dyn ListRepository>;

    // Create the MCP server (services are constructed internally)
    let server = SmarteMcpServer::from_repositories(
        reveal_repo,
        integration_repo,
        list_repo,
        metrics.clone(),
        headers,
    );

    info!("SMARTe MCP Server initialized");

    // Run the server (this will block until the server exits)
    info!("Starting MCP server with stdio transport");
    smarte_mcp_server::server::run_server(server).await?;

    let summary = metrics.summary();
    info!(
        http_requests = summary.http_requests_total,
        http_errors = summary.http_errors_total,
        avg_ms = summary.http_duration_avg_ms,
        reveal_branch_failures = summary.reveal_branch_failures_total,
        snapshot_fallbacks = summary.snapshot_fallbacks_total,
        "SMARTe MCP Server shutdown complete"
    );
    Ok(())
}
