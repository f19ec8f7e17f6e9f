use super::{CallLog, MockFailure};
use async_trait::async_trait;
use serde_json::{json, Value};
use smarte_mcp_server::context::RequestContext;
use smarte_mcp_server::error::SmarteApiResult;
use smarte_mcp_server::models::{
    Connector, ConnectorListResponse, EligibilityVerdict, ExportPayload, PermissionFlags,
};
use smarte_mcp_server::repositories::IntegrationRepository;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Mock integration repository for testing.
///
/// Defaults to a single available Salesforce connector with LEAD and CONTACT
/// export granted, an allowed eligibility verdict, and an accepted export.
#[derive(Clone)]
pub struct MockIntegrationRepository {
    connectors: Arc<Mutex<Option<Vec<Connector>>>>,
    flags: Arc<Mutex<Option<PermissionFlags>>>,
    verdict: Arc<Mutex<Option<EligibilityVerdict>>>,
    export_response: Arc<Mutex<Value>>,
    failures: Arc<Mutex<HashMap<String, MockFailure>>>,
    verify_payloads: Arc<Mutex<Vec<ExportPayload>>>,
    export_payloads: Arc<Mutex<Vec<ExportPayload>>>,
    call_counts: Arc<Mutex<HashMap<String, usize>>>,
    log: CallLog,
}

pub fn salesforce_connector(id: &str) -> Connector {
    Connector {
        connector_id: id.to_string(),
        connector_name: "SALESFORCE".to_string(),
        status: true,
        ..Default::default()
    }
}

pub fn granted_flags() -> PermissionFlags {
    PermissionFlags {
        lead: true,
        accounts_and_contacts: true,
        ..Default::default()
    }
}

impl MockIntegrationRepository {
    pub fn new() -> Self {
        Self::with_call_log(CallLog::new())
    }

    pub fn with_call_log(log: CallLog) -> Self {
        Self {
            connectors: Arc::new(Mutex::new(Some(vec![salesforce_connector("sf-1")]))),
            flags: Arc::new(Mutex::new(Some(granted_flags()))),
            verdict: Arc::new(Mutex::new(Some(EligibilityVerdict {
                status_code: Some(EligibilityVerdict::ALLOWED),
                ..Default::default()
            }))),
            export_response: Arc::new(Mutex::new(json!({
                "status": {"statusCode": 200},
                "data": {"recordId": "00Q-mock"}
            }))),
            failures: Arc::new(Mutex::new(HashMap::new())),
            verify_payloads: Arc::new(Mutex::new(Vec::new())),
            export_payloads: Arc::new(Mutex::new(Vec::new())),
            call_counts: Arc::new(Mutex::new(HashMap::new())),
            log,
        }
    }

    /// `None` simulates a body without `responseLists`.
    pub fn set_connectors(&self, connectors: Option<Vec<Connector>>) {
        *self.connectors.lock().unwrap() = connectors;
    }

    pub fn set_flags(&self, flags: Option<PermissionFlags>) {
        *self.flags.lock().unwrap() = flags;
    }

    pub fn set_verdict(&self, verdict: Option<EligibilityVerdict>) {
        *self.verdict.lock().unwrap() = verdict;
    }

    pub fn set_export_response(&self, response: Value) {
        *self.export_response.lock().unwrap() = response;
    }

    pub fn fail(&self, method: &str, failure: MockFailure) {
        self.failures.lock().unwrap().insert(method.to_string(), failure);
    }

    pub fn verify_payloads(&self) -> Vec<ExportPayload> {
        self.verify_payloads.lock().unwrap().clone()
    }

    pub fn export_payloads(&self) -> Vec<ExportPayload> {
        self.export_payloads.lock().unwrap().clone()
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
    }

    fn track_call(&self, method: &str) -> SmarteApiResult<()> {
        {
            let mut counts = self.call_counts.lock().unwrap();
            *counts.entry(method.to_string()).or_insert(0) += 1;
        }
        self.log.record(method);

        match self.failures.lock().unwrap().get(method) {
            Some(failure) => Err(failure.to_error()),
            None => Ok(()),
        }
    }
}

impl Default for MockIntegrationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IntegrationRepository for MockIntegrationRepository {
    async fn list_connectors(&self, _ctx: &RequestContext) -> SmarteApiResult<ConnectorListResponse> {
        self.track_call("list_connectors")?;

        Ok(ConnectorListResponse {
            response_lists: self.connectors.lock().unwrap().clone(),
            ..Default::default()
        })
    }

    async fn integration_status(
        &self,
        _connector: &Connector,
        _ctx: &RequestContext,
    ) -> SmarteApiResult<Option<PermissionFlags>> {
        self.track_call("integration_status")?;
        Ok(self.flags.lock().unwrap().clone())
    }

    async fn verify_export(
        &self,
        payload: &ExportPayload,
        _ctx: &RequestContext,
    ) -> SmarteApiResult<Option<EligibilityVerdict>> {
        self.track_call("verify_export")?;
        self.verify_payloads.lock().unwrap().push(payload.clone());
        Ok(self.verdict.lock().unwrap().clone())
    }

    async fn submit_export(&self, payload: &ExportPayload, _ctx: &RequestContext) -> SmarteApiResult<Value> {
        self.track_call("submit_export")?;
        self.export_payloads.lock().unwrap().push(payload.clone());
        Ok(self.export_response.lock().unwrap().clone())
    }
}
