//! MMI record search: CRM record names and ids for advanced-search filters.

use crate::context::RequestContext;
use crate::domain::{EntityType, MmiCrmType, MmiPagination, ValidationReport};
use crate::error::{ToolError, ToolResult};
use crate::models::{MmiSearchData, MmiSearchPayload};
use crate::repositories::ListRepository;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;

pub const MAX_SEARCH_VALUE_LENGTH: usize = 200;

/// Request accepted by the `search_mmi_records` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MmiFilterRequest {
    /// SALESFORCE, HUBSPOT, DYNAMICS or MARKETO
    #[serde(rename = "type", default)]
    pub crm_type: String,

    #[serde(default)]
    pub data: Option<MmiFilterData>,

    #[serde(default)]
    pub pagination: Option<MmiPagination>,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct MmiFilterData {
    /// Search text to match record names against
    #[serde(default)]
    pub value: String,

    /// LEAD, CONTACT or ACCOUNT (default LEAD)
    #[serde(rename = "entityType", default)]
    pub entity_type: Option<String>,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedMmiSearch {
    pub entity_type: EntityType,
    pub payload: MmiSearchPayload,
}

pub fn validate_mmi_request(request: &MmiFilterRequest) -> ToolResult<ValidatedMmiSearch> {
    let data = request
        .data
        .as_ref()
        .ok_or_else(|| ToolError::ValidationFailed(vec!["Request validation failed".to_string()]))?;

    let mut report = ValidationReport::new();
    if data.value.trim().is_empty() {
        report.push("Search value cannot be empty");
    }
    if data.value.chars().count() > MAX_SEARCH_VALUE_LENGTH {
        report.push(format!(
            "Search value too long. Maximum {} characters allowed",
            MAX_SEARCH_VALUE_LENGTH
        ));
    }

    let crm_type = MmiCrmType::parse(&request.crm_type);
    if crm_type.is_none() {
        report.push("Invalid CRM type. Must be SALESFORCE, HUBSPOT, DYNAMICS, or MARKETO");
    }

    let entity_type = match data.entity_type.as_deref() {
        None => Some(EntityType::default()),
        Some(raw) => EntityType::parse(raw),
    };
    if entity_type.is_none() {
        report.push("Invalid entity type. Must be LEAD, CONTACT, or ACCOUNT");
    }

    if let Some(pagination) = &request.pagination {
        pagination.validate(&mut report);
    }
    report.into_result()?;

    match (crm_type, entity_type) {
        (Some(crm_type), Some(entity_type)) => Ok(ValidatedMmiSearch {
            entity_type,
            payload: MmiSearchPayload {
                data: MmiSearchData {
                    value: data.value.clone(),
                },
                crm_type,
                pagination: request.pagination.clone(),
            },
        }),
        _ => Err(ToolError::ValidationFailed(vec![
            "Request validation failed".to_string(),
        ])),
    }
}

/// MMI filter service trait for business operations.
#[async_trait]
pub trait MmiFilterService: Send + Sync {
    async fn search_records(&self, request: MmiFilterRequest, ctx: &RequestContext) -> ToolResult<Value>;
}

/// Default implementation of MmiFilterService.
pub struct MmiFilterServiceImpl {
    repository: Arc<dyn ListRepository>,
}

impl MmiFilterServiceImpl {
    pub fn new(repository: Arc<dyn ListRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl MmiFilterService for MmiFilterServiceImpl {
    async fn search_records(&self, request: MmiFilterRequest, ctx: &RequestContext) -> ToolResult<Value> {
        let search = validate_mmi_request(&request)?;
        ctx.require_auth()?;

        tracing::info!(
            tool = "search_mmi_records",
            crm_type = %search.payload.crm_type,
            entity_type = %search.entity_type,
            search_value = %search.payload.data.value,
            "Searching MMI records"
        );

        let response = self
            .repository
            .search_mmi_records(search.entity_type, &search.payload, ctx)
            .await?;
        if response.is_null() {
            return Err(ToolError::InternalMalformedResponse(
                "Failed to retrieve MMI filter data".to_string(),
            ));
        }
        Ok(response)
    }
}
