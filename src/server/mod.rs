//! MCP server implementation for the SMARTe platform.
//!
//! This module provides the MCP protocol server that exposes SMARTe
//! functionality to AI assistants through the Model Context Protocol.

pub mod handlers;

pub use handlers::SmarteMcpServer;

use anyhow::Result;
use rmcp::transport::io::stdio;
use rmcp::ServiceExt;

/// Run the SMARTe MCP server with stdio transport.
///
/// This function starts the MCP server and runs it until completion.
/// It communicates via stdin/stdout using the MCP protocol.
pub async fn run_server(server: SmarteMcpServer) -> Result<()> {
    let service = server.serve(stdio()).await?;

    service.waiting().await?;

    Ok(())
}
