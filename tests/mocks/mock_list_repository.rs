use super::MockFailure;
use async_trait::async_trait;
use serde_json::Value;
use smarte_mcp_server::context::RequestContext;
use smarte_mcp_server::domain::{EntityType, ListType};
use smarte_mcp_server::error::SmarteApiResult;
use smarte_mcp_server::models::{ListsSearchPayload, MmiSearchPayload};
use smarte_mcp_server::repositories::ListRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock list repository for testing.
///
/// Returns canned bodies and keeps the last request of each kind.
#[derive(Clone)]
pub struct MockListRepository {
    lists_response: Arc<Mutex<Value>>,
    mmi_response: Arc<Mutex<Value>>,
    failure: Arc<Mutex<Option<MockFailure>>>,
    last_lists: Arc<Mutex<Option<(ListType, ListsSearchPayload)>>>,
    last_mmi: Arc<Mutex<Option<(EntityType, MmiSearchPayload)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
}

impl MockListRepository {
    pub fn new() -> Self {
        Self {
            lists_response: Arc::new(Mutex::new(Value::Null)),
            mmi_response: Arc::new(Mutex::new(Value::Null)),
            failure: Arc::new(Mutex::new(None)),
            last_lists: Arc::new(Mutex::new(None)),
            last_mmi: Arc::new(Mutex::new(None)),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn set_lists_response(&self, body: Value) {
        *self.lists_response.lock().unwrap() = body;
    }

    pub fn set_mmi_response(&self, body: Value) {
        *self.mmi_response.lock().unwrap() = body;
    }

    pub fn fail(&self, failure: MockFailure) {
        *self.failure.lock().unwrap() = Some(failure);
    }

    pub fn last_lists_request(&self) -> Option<(ListType, ListsSearchPayload)> {
        self.last_lists.lock().unwrap().clone()
    }

    pub fn last_mmi_request(&self) -> Option<(EntityType, MmiSearchPayload)> {
        self.last_mmi.lock().unwrap().clone()
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) -> SmarteApiResult<()> {
        {
            let mut counts = self.call_counts.lock().unwrap();
            *counts.entry(method.to_string()).or_insert(0) += 1;
        }
        match self.failure.lock().unwrap().as_ref() {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

impl Default for MockListRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ListRepository for MockListRepository {
    async fn search_lists(
        &self,
        list_type: ListType,
        payload: &ListsSearchPayload,
        _ctx: &RequestContext,
    ) -> SmarteApiResult<Value> {
        self.track_call("search_lists")?;
        *self.last_lists.lock().unwrap() = Some((list_type, payload.clone()));
        Ok(self.lists_response.lock().unwrap().clone())
    }

    async fn search_mmi_records(
        &self,
        entity_type: EntityType,
        payload: &MmiSearchPayload,
        _ctx: &RequestContext,
    ) -> SmarteApiResult<Value> {
        self.track_call("search_mmi_records")?;
        *self.last_mmi.lock().unwrap() = Some((entity_type, payload.clone()));
        Ok(self.mmi_response.lock().unwrap().clone())
    }
}
