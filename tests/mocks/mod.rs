//! In-memory repository doubles for service-level tests.

#![allow(dead_code)]

pub mod mock_integration_repository;
pub mod mock_list_repository;
pub mod mock_reveal_repository;

pub use mock_integration_repository::MockIntegrationRepository;
pub use mock_list_repository::MockListRepository;
pub use mock_reveal_repository::MockRevealRepository;

use smarte_mcp_server::error::SmarteApiError;
use std::sync::{Arc, Mutex};

/// Ordered record of repository calls, shareable across mocks.
#[derive(Clone, Default)]
pub struct CallLog {
    entries: Arc<Mutex<Vec<String>>>,
}

impl CallLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, entry: impl Into<String>) {
        self.entries.lock().unwrap().push(entry.into());
    }

    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }
}

/// A configured failure. `SmarteApiError` is not `Clone`, so mocks store this
/// and build a fresh error per call.
#[derive(Debug, Clone)]
pub enum MockFailure {
    Api { status: u16, message: String },
    Timeout,
    Cancelled,
    Unauthorized,
}

impl MockFailure {
    pub fn server_error() -> Self {
        MockFailure::Api {
            status: 500,
            message: "Internal Server Error".to_string(),
        }
    }

    pub fn to_error(&self) -> SmarteApiError {
        match self {
            MockFailure::Api { status, message } => SmarteApiError::ApiError {
                status: *status,
                message: message.clone(),
                request_id: None,
            },
            MockFailure::Timeout => SmarteApiError::Timeout,
            MockFailure::Cancelled => SmarteApiError::Cancelled,
            MockFailure::Unauthorized => SmarteApiError::Unauthorized { request_id: None },
        }
    }
}
