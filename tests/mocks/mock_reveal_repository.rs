use super::{CallLog, MockFailure};
use async_trait::async_trait;
use serde_json::{json, Map, Value};
use smarte_mcp_server::context::RequestContext;
use smarte_mcp_server::domain::{GuidPair, RevealType};
use smarte_mcp_server::error::SmarteApiResult;
use smarte_mcp_server::models::RevealBatchResponse;
use smarte_mcp_server::repositories::RevealRepository;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Mock reveal repository for testing.
///
/// Holds the set of already-revealed contact GUIDs and the records each
/// reveal call hands back, and tracks every call for verification.
#[derive(Clone)]
pub struct MockRevealRepository {
    revealed: Arc<Mutex<HashSet<String>>>,
    records: Arc<Mutex<HashMap<String, Value>>>,
    lookup_failure: Arc<Mutex<Option<MockFailure>>>,
    branch_failures: Arc<Mutex<HashMap<RevealType, MockFailure>>>,
    branch_status: Arc<Mutex<HashMap<RevealType, i64>>>,
    batches: Arc<Mutex<Vec<(RevealType, Vec<GuidPair>)>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    log: CallLog,
}

impl MockRevealRepository {
    pub fn new() -> Self {
        Self::with_call_log(CallLog::new())
    }

    pub fn with_call_log(log: CallLog) -> Self {
        Self {
            revealed: Arc::new(Mutex::new(HashSet::new())),
            records: Arc::new(Mutex::new(HashMap::new())),
            lookup_failure: Arc::new(Mutex::new(None)),
            branch_failures: Arc::new(Mutex::new(HashMap::new())),
            branch_status: Arc::new(Mutex::new(HashMap::new())),
            batches: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            log,
        }
    }

    /// Mark a contact GUID as revealed before.
    pub fn mark_revealed(&self, con_guid: &str) {
        self.revealed.lock().unwrap().insert(con_guid.to_string());
    }

    /// Record returned for `con_guid` by whichever branch reveals it.
    pub fn add_record(&self, con_guid: &str, record: Value) {
        self.records.lock().unwrap().insert(con_guid.to_string(), record);
    }

    pub fn fail_lookup(&self, failure: MockFailure) {
        *self.lookup_failure.lock().unwrap() = Some(failure);
    }

    pub fn fail_branch(&self, reveal_type: RevealType, failure: MockFailure) {
        self.branch_failures.lock().unwrap().insert(reveal_type, failure);
    }

    /// Answer a branch with a non-200 status block.
    pub fn set_branch_status(&self, reveal_type: RevealType, status_code: i64) {
        self.branch_status.lock().unwrap().insert(reveal_type, status_code);
    }

    /// Pairs each reveal call received, in call order.
    pub fn batches(&self) -> Vec<(RevealType, Vec<GuidPair>)> {
        self.batches.lock().unwrap().clone()
    }

    pub fn batch_for(&self, reveal_type: RevealType) -> Option<Vec<GuidPair>> {
        self.batches()
            .into_iter()
            .find(|(t, _)| *t == reveal_type)
            .map(|(_, pairs)| pairs)
    }

    pub fn get_call_count(&self, method: &str) -> usize {
        let counts = self.call_counts.lock().unwrap();
        *counts.get(method).unwrap_or(&0)
    }

    pub fn total_calls(&self) -> usize {
        self.call_counts.lock().unwrap().values().sum()
    }

    pub fn reset_call_counts(&self) {
        self.call_counts.lock().unwrap().clear();
        self.batches.lock().unwrap().clear();
    }

    fn track_call(&self, method: &str) {
        let mut counts = self.call_counts.lock().unwrap();
        *counts.entry(method.to_string()).or_insert(0) += 1;
        self.log.record(method);
    }
}

impl Default for MockRevealRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RevealRepository for MockRevealRepository {
    async fn revealed_contact_guids(&self, _ctx: &RequestContext) -> SmarteApiResult<HashSet<String>> {
        self.track_call("revealed_contact_guids");

        if let Some(failure) = self.lookup_failure.lock().unwrap().as_ref() {
            return Err(failure.to_error());
        }
        Ok(self.revealed.lock().unwrap().clone())
    }

    async fn reveal_contacts(
        &self,
        pairs: &[GuidPair],
        reveal_type: RevealType,
        _ctx: &RequestContext,
    ) -> SmarteApiResult<RevealBatchResponse> {
        self.track_call(&format!("reveal_contacts:{}", reveal_type));
        self.batches
            .lock()
            .unwrap()
            .push((reveal_type, pairs.to_vec()));

        if let Some(failure) = self.branch_failures.lock().unwrap().get(&reveal_type) {
            return Err(failure.to_error());
        }

        let status_code = self
            .branch_status
            .lock()
            .unwrap()
            .get(&reveal_type)
            .copied()
            .unwrap_or(200);

        let records = self.records.lock().unwrap();
        let data: Map<String, Value> = pairs
            .iter()
            .filter_map(|pair| {
                records
                    .get(&pair.contact_guid)
                    .map(|record| (pair.contact_guid.clone(), record.clone()))
            })
            .collect();

        let body = json!({
            "status": {"statusCode": status_code, "requestId": "mock-req"},
            "data": data,
        });
        Ok(serde_json::from_value(body)?)
    }
}
