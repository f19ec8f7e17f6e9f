//! Request-scoped context passed explicitly to every service call.
//!
//! A [`RequestContext`] carries the credentials forwarded to the platform and
//! the cancellation token of the MCP request that triggered the work. It is
//! built fresh for each tool invocation and dropped with it.

use crate::error::{ToolError, ToolResult};
use tokio_util::sync::CancellationToken;

/// Credentials forwarded on every remote call.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderBag {
    authorization: Option<String>,
    api_key: Option<String>,
}

impl HeaderBag {
    /// Create a header bag. Blank values are treated as absent.
    pub fn new(authorization: Option<String>, api_key: Option<String>) -> Self {
        Self {
            authorization: non_blank(authorization),
            api_key: non_blank(api_key),
        }
    }

    pub fn authorization(&self) -> Option<&str> {
        self.authorization.as_deref()
    }

    pub fn api_key(&self) -> Option<&str> {
        self.api_key.as_deref()
    }

    /// Header name/value pairs to set on an outgoing request.
    pub fn pairs(&self) -> Vec<(&'static str, &str)> {
        let mut pairs = Vec::with_capacity(2);
        if let Some(authorization) = self.authorization() {
            pairs.push(("Authorization", authorization));
        }
        if let Some(api_key) = self.api_key() {
            pairs.push(("apikey", api_key));
        }
        pairs
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Everything a single tool invocation needs besides its request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    headers: HeaderBag,
    cancel: CancellationToken,
    request_id: String,
}

impl RequestContext {
    pub fn new(headers: HeaderBag, cancel: CancellationToken, request_id: impl Into<String>) -> Self {
        Self {
            headers,
            cancel,
            request_id: request_id.into(),
        }
    }

    /// A context with its own, never-cancelled token.
    pub fn detached(headers: HeaderBag) -> Self {
        Self::new(headers, CancellationToken::new(), "local")
    }

    pub fn headers(&self) -> &HeaderBag {
        &self.headers
    }

    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Resolves once the MCP caller cancels the request.
    pub async fn cancelled(&self) {
        self.cancel.cancelled().await
    }

    /// Fail with [`ToolError::Cancelled`] if the caller has gone away.
    pub fn ensure_active(&self) -> ToolResult<()> {
        if self.is_cancelled() {
            return Err(ToolError::Cancelled);
        }
        Ok(())
    }

    /// Fail with [`ToolError::AuthMissing`] unless an Authorization value is present.
    pub fn require_auth(&self) -> ToolResult<()> {
        if self.headers.authorization().is_none() {
            return Err(ToolError::AuthMissing);
        }
        Ok(())
    }
}
