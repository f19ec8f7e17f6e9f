//! Customer list search and normalization.

use crate::context::RequestContext;
use crate::domain::{ListPagination, ListType, ValidationReport};
use crate::error::ToolResult;
use crate::models::{ListItem, ListsSearchPayload};
use crate::repositories::ListRepository;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;

pub const FAILED_RETRIEVE_LISTS: &str = "Failed to retrieve lists filter data";

/// Request accepted by the `lists_filter_value` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListsFilterRequest {
    /// LEAD or ACCOUNT
    #[serde(rename = "type", default)]
    pub list_type: String,

    #[serde(default)]
    pub data: ListsFilterData,

    #[serde(default)]
    pub pagination: ListPagination,
}

#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListsFilterData {
    /// Text to match against list names
    #[serde(rename = "searchText", default)]
    pub search_text: Option<String>,
}

pub fn validate_lists_request(request: &ListsFilterRequest) -> ToolResult<ListType> {
    let mut report = ValidationReport::new();
    let list_type = ListType::parse(&request.list_type);
    if list_type.is_none() {
        report.push("Invalid type. Must be LEAD or ACCOUNT");
    }
    request.pagination.validate(&mut report);
    report.into_result()?;

    // A valid report implies the type parsed.
    Ok(list_type.unwrap_or(ListType::Lead))
}

fn error_artifact() -> Value {
    json!({"error": {"status": 500, "message": FAILED_RETRIEVE_LISTS}})
}

fn is_success_status(raw: &Value) -> Option<bool> {
    let code = raw.get("status")?.as_object()?.get("statusCode")?;
    Some(match code {
        Value::Number(n) => n.as_i64() == Some(200),
        Value::String(s) => s == "200",
        _ => false,
    })
}

/// Keep only active lists, projected to `{id, listName, status}`.
///
/// A body without a status envelope becomes an error artifact. Non-200 bodies
/// and every field outside the item array pass through unchanged.
pub fn normalize_lists(raw: Value, list_type: ListType) -> Value {
    let success = match is_success_status(&raw) {
        Some(success) => success,
        None => return error_artifact(),
    };
    if !success {
        return raw;
    }

    let mut raw = raw;
    let items = raw
        .get_mut("data")
        .and_then(Value::as_object_mut)
        .and_then(|data| data.get_mut(list_type.items_key()));

    if let Some(items) = items {
        if let Some(array) = items.as_array() {
            let status_field = list_type.status_field();
            let normalized: Vec<ListItem> = array
                .iter()
                .filter(|item| item.get(status_field).and_then(Value::as_str) == Some("active"))
                .map(|item| ListItem {
                    id: item.get("id").cloned().unwrap_or(Value::Null),
                    list_name: item.get("listName").cloned().unwrap_or(Value::Null),
                    status: "active".to_string(),
                })
                .collect();
            *items = json!(normalized);
        }
    }

    raw
}

/// Lists filter service trait for business operations.
#[async_trait]
pub trait ListsFilterService: Send + Sync {
    async fn filter_lists(&self, request: ListsFilterRequest, ctx: &RequestContext) -> ToolResult<Value>;
}

/// Default implementation of ListsFilterService.
pub struct ListsFilterServiceImpl {
    repository: Arc<dyn ListRepository>,
}

impl ListsFilterServiceImpl {
    pub fn new(repository: Arc<dyn ListRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ListsFilterService for ListsFilterServiceImpl {
    async fn filter_lists(&self, request: ListsFilterRequest, ctx: &RequestContext) -> ToolResult<Value> {
        let list_type = validate_lists_request(&request)?;
        ctx.require_auth()?;

        let payload = ListsSearchPayload::new(
            request.data.search_text.unwrap_or_default(),
            request.pagination.resolve(),
        );
        tracing::info!(
            tool = "lists_filter_value",
            list_type = %list_type,
            search_text = %payload.data.search_text,
            "Searching customer lists"
        );

        let raw = self.repository.search_lists(list_type, &payload, ctx).await?;
        Ok(normalize_lists(raw, list_type))
    }
}
