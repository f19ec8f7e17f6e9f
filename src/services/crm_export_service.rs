//! CRM export service layer.
//!
//! An export runs as a fixed sequence of stages:
//!
//! ```text
//! VALIDATING -> RESOLVING_CONNECTOR -> CHECKING_PERMISSION -> FETCHING_SNAPSHOT
//!            -> CHECKING_ELIGIBILITY -> EXPORTING -> DONE
//! ```
//!
//! Every stage except `FETCHING_SNAPSHOT` ends the export on failure. A failed
//! snapshot falls back to an empty `dataPrime` and is reported as a warning.
//! The decision at each stage is a pure function below; the service only
//! sequences the remote calls between them.

use crate::context::RequestContext;
use crate::domain::{validate_guid_format, AssetType, CrmType, GuidPair, ValidationReport};
use crate::error::{ToolError, ToolResult};
use crate::metrics::Metrics;
use crate::models::{Connector, EligibilityVerdict, ExportPayload, PermissionFlags};
use crate::repositories::IntegrationRepository;
use crate::services::contact_reveal_service::{ContactRevealService, RevealOutcome};
use async_trait::async_trait;
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{Map, Value};
use std::fmt;
use std::sync::Arc;

/// Request accepted by the `export_to_crm` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ExportRequest {
    /// Target CRM. Only SALESFORCE is supported
    #[serde(rename = "exportCRM", default)]
    pub export_crm: String,

    /// LEAD or CONTACT
    #[serde(rename = "assetType", default)]
    pub asset_type: String,

    #[serde(default)]
    pub data: ExportData,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ExportData {
    /// Contact GUID to export (10 to 100 characters of letters, digits, '_' or '-')
    #[serde(rename = "conGUID", default)]
    pub con_guid: String,
}

/// Pipeline stage, used to tag logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportStage {
    Validating,
    ResolvingConnector,
    CheckingPermission,
    FetchingSnapshot,
    CheckingEligibility,
    Exporting,
    Done,
}

impl ExportStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExportStage::Validating => "VALIDATING",
            ExportStage::ResolvingConnector => "RESOLVING_CONNECTOR",
            ExportStage::CheckingPermission => "CHECKING_PERMISSION",
            ExportStage::FetchingSnapshot => "FETCHING_SNAPSHOT",
            ExportStage::CheckingEligibility => "CHECKING_ELIGIBILITY",
            ExportStage::Exporting => "EXPORTING",
            ExportStage::Done => "DONE",
        }
    }
}

impl fmt::Display for ExportStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An export request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedExport {
    pub crm: CrmType,
    pub asset_type: AssetType,
    pub con_guid: String,
}

/// Enrichment embedded in the export as `dataPrime`.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub data_prime: Value,
    /// Set when the snapshot fell back to `{}`.
    pub fallback: Option<String>,
}

impl Snapshot {
    fn enriched(data_prime: Value) -> Self {
        Self {
            data_prime,
            fallback: None,
        }
    }

    fn empty(reason: impl Into<String>) -> Self {
        Self {
            data_prime: Value::Object(Map::new()),
            fallback: Some(reason.into()),
        }
    }
}

/// Result of a completed export.
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOutcome {
    /// Export endpoint body, unmodified.
    pub response: Value,
    pub warnings: Vec<String>,
}

/// VALIDATING: structural checks, all reported together.
pub fn validate_export(request: &ExportRequest) -> ToolResult<ValidatedExport> {
    let mut report = ValidationReport::new();

    let crm = CrmType::parse(&request.export_crm);
    if crm.is_none() {
        let valid: Vec<&str> = CrmType::ALL.iter().map(|c| c.as_str()).collect();
        report.push(format!(
            "Invalid CRM type. Must be SALESFORCE. Valid types: {}",
            valid.join(", ")
        ));
    }

    let asset_type = AssetType::parse(&request.asset_type);
    if asset_type.is_none() {
        report.push("For SALESFORCE, assetType must be LEAD or CONTACT");
    }

    let con_guid = &request.data.con_guid;
    if con_guid.trim().is_empty() {
        report.push("conGUID is required for LEAD and CONTACT asset types");
    }
    if !con_guid.is_empty() {
        validate_guid_format(con_guid, "conGUID", &mut report);
    }

    report.into_result()?;
    match (crm, asset_type) {
        (Some(crm), Some(asset_type)) => Ok(ValidatedExport {
            crm,
            asset_type,
            con_guid: con_guid.clone(),
        }),
        _ => Err(ToolError::ValidationFailed(vec![
            "Request validation failed".to_string(),
        ])),
    }
}

/// RESOLVING_CONNECTOR: first available connector named after `crm`, in list order.
pub fn select_connector(connectors: &[Connector], crm: CrmType) -> Option<&Connector> {
    connectors
        .iter()
        .find(|c| c.connector_name == crm.as_str() && c.is_available())
}

pub fn available_connector_names(connectors: &[Connector]) -> Vec<String> {
    connectors
        .iter()
        .filter(|c| c.is_available())
        .map(|c| c.connector_name.clone())
        .collect()
}

/// CHECKING_PERMISSION
pub fn check_permission(flags: &PermissionFlags, asset_type: AssetType) -> ToolResult<()> {
    let value = flags.flag_for(asset_type);
    if value {
        Ok(())
    } else {
        Err(ToolError::PermissionDenied {
            asset_type: asset_type.to_string(),
            flag: asset_type.permission_flag(),
            value,
        })
    }
}

/// FETCHING_SNAPSHOT: the revealed record for `con_guid`, if the reveal produced one.
pub fn extract_snapshot(outcome: &RevealOutcome, con_guid: &str) -> Option<Value> {
    outcome
        .data
        .get(con_guid)
        .filter(|record| !record.is_null())
        .cloned()
}

pub fn build_payload(export: &ValidatedExport, connector: &Connector, snapshot: Snapshot) -> ExportPayload {
    ExportPayload {
        data: Map::new(),
        data_prime: snapshot.data_prime,
        connector_id: connector.connector_id.clone(),
        connector_name: export.crm,
        asset_type: export.asset_type,
    }
}

/// CHECKING_ELIGIBILITY
pub fn check_eligibility(verdict: &EligibilityVerdict) -> ToolResult<()> {
    if verdict.is_allowed() {
        Ok(())
    } else {
        Err(ToolError::EligibilityDenied {
            status_code: verdict.status_code,
            message: verdict.error_message.clone(),
        })
    }
}

/// CRM export service trait for business operations.
#[async_trait]
pub trait CrmExportService: Send + Sync {
    async fn export_to_crm(
        &self,
        request: ExportRequest,
        ctx: &RequestContext,
    ) -> ToolResult<ExportOutcome>;
}

/// Default implementation of CrmExportService.
pub struct CrmExportServiceImpl {
    integrations: Arc<dyn IntegrationRepository>,
    reveal_service: Arc<dyn ContactRevealService>,
    metrics: Metrics,
}

impl CrmExportServiceImpl {
    pub fn new(
        integrations: Arc<dyn IntegrationRepository>,
        reveal_service: Arc<dyn ContactRevealService>,
        metrics: Metrics,
    ) -> Self {
        Self {
            integrations,
            reveal_service,
            metrics,
        }
    }

    async fn resolve_connector(&self, crm: CrmType, ctx: &RequestContext) -> ToolResult<Connector> {
        let response = self.integrations.list_connectors(ctx).await?;
        let connectors = response.response_lists.ok_or_else(|| {
            ToolError::InternalMalformedResponse(format!(
                "Failed to fetch connector information for {}",
                crm
            ))
        })?;

        match select_connector(&connectors, crm) {
            Some(connector) => {
                tracing::info!(connector_id = %connector.connector_id, crm = %crm, "Resolved connector");
                Ok(connector.clone())
            }
            None => Err(ToolError::ConnectorNotFound {
                crm: crm.to_string(),
                available: available_connector_names(&connectors),
            }),
        }
    }

    async fn verify_permission(
        &self,
        connector: &Connector,
        asset_type: AssetType,
        ctx: &RequestContext,
    ) -> ToolResult<()> {
        let flags = self
            .integrations
            .integration_status(connector, ctx)
            .await?
            .ok_or_else(|| {
                ToolError::InternalMalformedResponse("Failed to verify export permissions".to_string())
            })?;
        check_permission(&flags, asset_type)
    }

    /// Never fails except on cancellation.
    async fn fetch_snapshot(&self, con_guid: &str, ctx: &RequestContext) -> ToolResult<Snapshot> {
        let pair = GuidPair::new(con_guid, "");
        let snapshot = match self.reveal_service.reveal(std::slice::from_ref(&pair), ctx).await {
            Ok(outcome) => match extract_snapshot(&outcome, con_guid) {
                Some(record) => Snapshot::enriched(record),
                None => Snapshot::empty(format!("No contact data found for conGUID {}", con_guid)),
            },
            Err(ToolError::Cancelled) => return Err(ToolError::Cancelled),
            Err(e) => Snapshot::empty(ToolError::SnapshotFetchFailed(e.to_string()).to_string()),
        };

        if let Some(reason) = &snapshot.fallback {
            tracing::warn!(con_guid = con_guid, reason = %reason, "Exporting with empty dataPrime");
            self.metrics.record_snapshot_fallback();
        }
        Ok(snapshot)
    }

    async fn verify_eligibility(&self, payload: &ExportPayload, ctx: &RequestContext) -> ToolResult<()> {
        let verdict = self.integrations.verify_export(payload, ctx).await?.ok_or_else(|| {
            ToolError::InternalMalformedResponse("Failed to verify export eligibility".to_string())
        })?;
        check_eligibility(&verdict)
    }

    async fn run_pipeline(
        &self,
        export: &ValidatedExport,
        ctx: &RequestContext,
        stage: &mut ExportStage,
    ) -> ToolResult<ExportOutcome> {
        *stage = ExportStage::ResolvingConnector;
        let connector = self.resolve_connector(export.crm, ctx).await?;

        ctx.ensure_active()?;
        *stage = ExportStage::CheckingPermission;
        self.verify_permission(&connector, export.asset_type, ctx).await?;

        ctx.ensure_active()?;
        *stage = ExportStage::FetchingSnapshot;
        let snapshot = self.fetch_snapshot(&export.con_guid, ctx).await?;
        let warnings: Vec<String> = snapshot
            .fallback
            .iter()
            .map(|reason| format!("Warning: exported without enrichment data ({}).", reason))
            .collect();
        let payload = build_payload(export, &connector, snapshot);

        ctx.ensure_active()?;
        *stage = ExportStage::CheckingEligibility;
        self.verify_eligibility(&payload, ctx).await?;

        ctx.ensure_active()?;
        *stage = ExportStage::Exporting;
        tracing::info!(
            request_id = ctx.request_id(),
            timestamp = %Utc::now().to_rfc3339(),
            crm = %export.crm,
            asset_type = %export.asset_type,
            con_guid = %export.con_guid,
            "Initiating CRM export"
        );
        let response = self.integrations.submit_export(&payload, ctx).await?;
        if response.is_null() {
            return Err(ToolError::InternalMalformedResponse(
                "Failed to export to Salesforce".to_string(),
            ));
        }

        *stage = ExportStage::Done;
        Ok(ExportOutcome { response, warnings })
    }
}

#[async_trait]
impl CrmExportService for CrmExportServiceImpl {
    async fn export_to_crm(
        &self,
        request: ExportRequest,
        ctx: &RequestContext,
    ) -> ToolResult<ExportOutcome> {
        let export = validate_export(&request)?;
        ctx.require_auth()?;

        let mut stage = ExportStage::Validating;
        let result = self.run_pipeline(&export, ctx, &mut stage).await;
        match &result {
            Ok(_) => tracing::info!(
                request_id = ctx.request_id(),
                timestamp = %Utc::now().to_rfc3339(),
                "Export completed successfully"
            ),
            Err(e) => tracing::error!(
                request_id = ctx.request_id(),
                stage = %stage,
                error = %e,
                "Export failed"
            ),
        }
        result
    }
}
