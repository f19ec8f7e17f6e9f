//! Configuration management for the SMARTe MCP Server.
//!
//! This module handles loading and validating configuration from environment variables.
//! It avoids polluting stdout (which MCP uses for communication) by loading the
//! .env file through dotenvy, which never prints.

use crate::context::HeaderBag;
use crate::error::{ConfigError, ConfigResult};
use std::env;

/// Configuration for the SMARTe MCP Server.
#[derive(Debug, Clone)]
pub struct Config {
    /// SMARTe gateway base URL
    pub gateway_url: String,

    /// Authorization value forwarded on every call, if configured
    pub authorization: Option<String>,

    /// API key forwarded as the `apikey` header, if configured
    pub api_key: Option<String>,

    /// HTTP request timeout in seconds (default: 30)
    pub request_timeout: u64,

    /// User-Agent sent to the gateway
    pub user_agent: String,

    /// Log level (default: "error")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Required environment variables:
    /// - `SMARTE_GATEWAY_URL`: Base URL of the SMARTe API gateway
    ///
    /// Optional environment variables:
    /// - `SMARTE_AUTHORIZATION`: Authorization header value
    /// - `SMARTE_API_KEY`: API key header value
    /// - `REQUEST_TIMEOUT`: HTTP timeout in seconds (default: 30)
    /// - `USER_AGENT`: User-Agent override
    /// - `LOG_LEVEL`: Logging level (default: "error")
    pub fn from_env() -> ConfigResult<Self> {
        // Try to load .env file if it exists (but don't fail if it doesn't)
        let _ = dotenvy::dotenv();

        let gateway_url = env::var("SMARTE_GATEWAY_URL")
            .map_err(|_| ConfigError::MissingVar("SMARTE_GATEWAY_URL".to_string()))?;

        if !gateway_url.starts_with("http://") && !gateway_url.starts_with("https://") {
            return Err(ConfigError::InvalidValue {
                var: "SMARTE_GATEWAY_URL".to_string(),
                reason: "Must start with http:// or https://".to_string(),
            });
        }

        let request_timeout = Self::parse_env_u64("REQUEST_TIMEOUT", 30)?;
        if request_timeout == 0 {
            return Err(ConfigError::InvalidValue {
                var: "REQUEST_TIMEOUT".to_string(),
                reason: "Must be greater than zero".to_string(),
            });
        }

        let user_agent = env::var("USER_AGENT")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(default_user_agent);

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "error".to_string());

        Ok(Config {
            gateway_url,
            authorization: env::var("SMARTE_AUTHORIZATION").ok(),
            api_key: env::var("SMARTE_API_KEY").ok(),
            request_timeout,
            user_agent,
            log_level,
        })
    }

    /// Credentials every tool invocation forwards to the gateway.
    pub fn headers(&self) -> HeaderBag {
        HeaderBag::new(self.authorization.clone(), self.api_key.clone())
    }

    /// Parse an environment variable as u64 with a default value.
    fn parse_env_u64(var_name: &str, default: u64) -> ConfigResult<u64> {
        match env::var(var_name) {
            Ok(val) => val.parse::<u64>().map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a positive number, got: {}", val),
            }),
            Err(_) => Ok(default),
        }
    }
}

fn default_user_agent() -> String {
    format!("smarte-mcp-server/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for Config {
    fn default() -> Self {
        Config {
            gateway_url: String::new(),
            authorization: None,
            api_key: None,
            request_timeout: 30,
            user_agent: default_user_agent(),
            log_level: "error".to_string(),
        }
    }
}
