//! SMARTe MCP Server - A Rust implementation of the Model Context Protocol server for the
//! SMARTe B2B contact and company intelligence platform.
//!
//! This library provides an MCP server that lets AI assistants reveal contact
//! details, export contacts to a connected CRM, and search customer lists and
//! CRM records.
//!
//! # Architecture
//!
//! - **context**: Request-scoped credentials and cancellation
//! - **domain**: GUIDs, request value sets, pagination and validation
//! - **models**: Gateway request and response bodies
//! - **error**: Remote, tool and configuration error types
//! - **config**: Configuration management from environment variables
//! - **client**: HTTP client for the SMARTe gateway
//! - **repositories**: Endpoint-level data access
//! - **services**: Reveal orchestration, export pipeline, list and record search
//! - **server**: MCP protocol server

pub mod client;
pub mod config;
pub mod context;
pub mod domain;
pub mod error;
pub mod metrics;
pub mod models;
pub mod repositories;
pub mod server;
pub mod services;

// Re-export commonly used types
pub use client::{AsyncSmarteClient, AsyncSmarteClientImpl, SmarteClient};
pub use config::Config;
pub use context::{HeaderBag, RequestContext};
pub use error::{ConfigError, SmarteApiError, ToolError};
pub use metrics::{HttpTimer, Metrics, MetricsSummary};
pub use server::SmarteMcpServer;
