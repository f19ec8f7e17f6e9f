use crate::client::AsyncSmarteClient;
use crate::context::RequestContext;
use crate::error::SmarteApiResult;
use crate::models::{
    Connector, ConnectorListResponse, EligibilityVerdict, ExportPayload, PermissionFlags,
};
use crate::repositories::decode;
use crate::repositories::traits::IntegrationRepository;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const CONNECTORS_PATH: &str = "/Integrations/getStandardUserConnectors";
pub const INTEGRATION_STATUS_PATH: &str = "/Integrations/integration-status";
pub const DEDUPE_PATH: &str = "/Integrations/dedupePrime";
pub const EXPORT_PATH: &str = "/Integrations/getAddRecordPrime";

/// Integration repository implementation using the SMARTe gateway.
pub struct SmarteIntegrationRepository {
    client: Arc<dyn AsyncSmarteClient>,
}

impl SmarteIntegrationRepository {
    pub fn new(client: Arc<dyn AsyncSmarteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl IntegrationRepository for SmarteIntegrationRepository {
    async fn list_connectors(&self, ctx: &RequestContext) -> SmarteApiResult<ConnectorListResponse> {
        match self.client.get(CONNECTORS_PATH, ctx).await? {
            Value::Null => Ok(ConnectorListResponse::default()),
            body => decode(body),
        }
    }

    async fn integration_status(
        &self,
        connector: &Connector,
        ctx: &RequestContext,
    ) -> SmarteApiResult<Option<PermissionFlags>> {
        // The gateway scopes status to the caller's active integration.
        tracing::debug!(connector_id = %connector.connector_id, "Fetching integration status");
        match self.client.get(INTEGRATION_STATUS_PATH, ctx).await? {
            Value::Null => Ok(None),
            body => decode(body).map(Some),
        }
    }

    async fn verify_export(
        &self,
        payload: &ExportPayload,
        ctx: &RequestContext,
    ) -> SmarteApiResult<Option<EligibilityVerdict>> {
        let body = serde_json::to_value(payload)?;
        match self.client.post(DEDUPE_PATH, &body, ctx).await? {
            Value::Null => Ok(None),
            body => decode(body).map(Some),
        }
    }

    async fn submit_export(&self, payload: &ExportPayload, ctx: &RequestContext) -> SmarteApiResult<Value> {
        let body = serde_json::to_value(payload)?;
        self.client.post(EXPORT_PATH, &body, ctx).await
    }
}
