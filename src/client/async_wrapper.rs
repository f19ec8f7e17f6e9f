//! Async wrapper around synchronous SmarteClient.
//!
//! This module provides an async interface to the synchronous SmarteClient by using
//! `tokio::task::spawn_blocking` to run HTTP operations on a dedicated thread pool,
//! preventing blocking of the async runtime. Every call also races the caller's
//! cancellation token so a cancelled tool call returns promptly.

use crate::client::SmarteClient;
use crate::context::RequestContext;
use crate::error::{SmarteApiError, SmarteApiResult};
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

/// Async gateway operations used by the repositories.
#[async_trait]
pub trait AsyncSmarteClient: Send + Sync {
    async fn get(&self, path: &str, ctx: &RequestContext) -> SmarteApiResult<Value>;
    async fn post(&self, path: &str, body: &Value, ctx: &RequestContext) -> SmarteApiResult<Value>;
}

/// Async wrapper around synchronous SmarteClient.
#[derive(Clone)]
pub struct AsyncSmarteClientImpl {
    client: Arc<SmarteClient>,
}

impl AsyncSmarteClientImpl {
    pub fn new(client: SmarteClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }
}

/// Await a blocking task unless the caller cancels first.
///
/// The blocking thread is left to finish on its own; its result is discarded.
async fn run_cancellable(
    ctx: &RequestContext,
    task: tokio::task::JoinHandle<SmarteApiResult<Value>>,
) -> SmarteApiResult<Value> {
    if ctx.is_cancelled() {
        return Err(SmarteApiError::Cancelled);
    }

    tokio::select! {
        biased;
        _ = ctx.cancelled() => {
            tracing::debug!(request_id = ctx.request_id(), "Remote call abandoned after cancellation");
            Err(SmarteApiError::Cancelled)
        }
        joined = task => joined
            .map_err(|e| SmarteApiError::HttpError(format!("Task join error: {}", e)))?,
    }
}

#[async_trait]
impl AsyncSmarteClient for AsyncSmarteClientImpl {
    async fn get(&self, path: &str, ctx: &RequestContext) -> SmarteApiResult<Value> {
        let client = self.client.clone();
        let path = path.to_string();
        let headers = ctx.headers().clone();

        let task = tokio::task::spawn_blocking(move || client.get_json(&path, &headers));
        run_cancellable(ctx, task).await
    }

    async fn post(&self, path: &str, body: &Value, ctx: &RequestContext) -> SmarteApiResult<Value> {
        let client = self.client.clone();
        let path = path.to_string();
        let body = body.clone();
        let headers = ctx.headers().clone();

        let task = tokio::task::spawn_blocking(move || client.post_json(&path, &body, &headers));
        run_cancellable(ctx, task).await
    }
}
