//! HTTP client for the SMARTe API gateway.
//!
//! This module provides a synchronous HTTP client that can be used from async contexts
//! via `tokio::task::spawn_blocking`. The client forwards credentials, maps failures
//! to [`SmarteApiError`], and decodes every body as untyped JSON. Typed decoding is
//! left to the repositories.

mod async_wrapper;
pub use async_wrapper::{AsyncSmarteClient, AsyncSmarteClientImpl};

use crate::config::Config;
use crate::context::HeaderBag;
use crate::error::{default_status_message, SmarteApiError, SmarteApiResult};
use crate::metrics::{HttpTimer, Metrics};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Synchronous HTTP client for the SMARTe gateway.
///
/// This client is cheap to clone (uses Arc internally) and can be used
/// from async contexts using `tokio::task::spawn_blocking`.
#[derive(Clone)]
pub struct SmarteClient {
    /// Base URL of the gateway
    base_url: String,

    /// HTTP client agent
    agent: Arc<ureq::Agent>,

    user_agent: String,

    /// Metrics collector
    metrics: Metrics,
}

impl SmarteClient {
    /// Create a new SmarteClient from configuration.
    pub fn new(config: &Config, metrics: Metrics) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.request_timeout))
            .build();

        Self {
            base_url: config.gateway_url.clone(),
            agent: Arc::new(agent),
            user_agent: config.user_agent.clone(),
            metrics,
        }
    }

    /// Create a SmarteClient with a custom base URL (useful for testing).
    #[doc(hidden)]
    pub fn with_base_url(base_url: String) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(10))
            .build();

        Self {
            base_url,
            agent: Arc::new(agent),
            user_agent: Config::default().user_agent,
            metrics: Metrics::new(),
        }
    }

    /// Get a reference to the metrics collector.
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    /// Build a full URL from a path.
    fn build_url(&self, path: &str) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = path.trim_start_matches('/');
        format!("{}/{}", base, path)
    }

    fn request(&self, method: &str, url: &str, headers: &HeaderBag) -> ureq::Request {
        let mut request = self
            .agent
            .request(method, url)
            .set("Content-Type", "application/json")
            .set("Accept", "application/json")
            .set("User-Agent", &self.user_agent);
        for (name, value) in headers.pairs() {
            request = request.set(name, value);
        }
        request
    }

    /// Execute a GET request and decode the body as JSON.
    pub fn get_json(&self, path: &str, headers: &HeaderBag) -> SmarteApiResult<Value> {
        let url = self.build_url(path);
        tracing::debug!("GET {}", url);

        let timer = HttpTimer::new(self.metrics.clone());
        let result = self
            .request("GET", &url, headers)
            .call()
            .map_err(|e| self.map_error(e));

        self.finish(&url, "GET", timer, result)
    }

    /// Execute a POST request with a JSON body and decode the response as JSON.
    pub fn post_json(&self, path: &str, body: &Value, headers: &HeaderBag) -> SmarteApiResult<Value> {
        let url = self.build_url(path);
        tracing::debug!("POST {}", url);
        tracing::trace!(
            "Request body: {}",
            serde_json::to_string(body).unwrap_or_else(|_| "<invalid json>".to_string())
        );

        let timer = HttpTimer::new(self.metrics.clone());
        let result = self
            .request("POST", &url, headers)
            .send_json(body)
            .map_err(|e| self.map_error(e));

        self.finish(&url, "POST", timer, result)
    }

    fn finish(
        &self,
        url: &str,
        method: &str,
        timer: HttpTimer,
        result: SmarteApiResult<ureq::Response>,
    ) -> SmarteApiResult<Value> {
        match result {
            Ok(response) => {
                tracing::debug!("{} {} - Success (status: {})", method, url, response.status());
                timer.complete();
                read_json(response)
            }
            Err(e) => {
                tracing::error!("{} {} - Error: {}", method, url, e);
                timer.complete_with_error();
                Err(e)
            }
        }
    }

    /// Map a ureq error to a SmarteApiError.
    fn map_error(&self, error: ureq::Error) -> SmarteApiError {
        match error {
            ureq::Error::Status(code, response) => {
                let request_id = response
                    .into_string()
                    .ok()
                    .and_then(|body| extract_request_id(&body));

                match code {
                    401 => SmarteApiError::Unauthorized { request_id },
                    429 => SmarteApiError::RateLimitExceeded,
                    _ => SmarteApiError::ApiError {
                        status: code,
                        message: default_status_message(code),
                        request_id,
                    },
                }
            }
            ureq::Error::Transport(transport) => {
                if transport.kind() == ureq::ErrorKind::ConnectionFailed {
                    SmarteApiError::HttpError("Connection failed".to_string())
                } else if transport.kind() == ureq::ErrorKind::Io {
                    SmarteApiError::Timeout
                } else {
                    SmarteApiError::HttpError(transport.to_string())
                }
            }
        }
    }
}

/// Read a success body. An empty body decodes to `null`.
fn read_json(response: ureq::Response) -> SmarteApiResult<Value> {
    let body = response
        .into_string()
        .map_err(|e| SmarteApiError::HttpError(e.to_string()))?;

    if body.trim().is_empty() {
        return Ok(Value::Null);
    }
    serde_json::from_str(&body).map_err(SmarteApiError::JsonError)
}

/// Pull the correlation id out of an error body, if the gateway supplied one.
fn extract_request_id(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    let id = value
        .pointer("/status/requestId")
        .or_else(|| value.get("requestId"))?;
    match id {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
