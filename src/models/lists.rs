//! Wire shapes for the list and MMI record searches.

use crate::domain::{MmiCrmType, MmiPagination, ResolvedListPagination};
use serde::Serialize;
use serde_json::Value;

/// Normalized projection of a customer list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListItem {
    pub id: Value,
    pub list_name: Value,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListsSearchData {
    pub search_text: String,
    pub content_type: &'static str,
}

/// Body of a customer-list search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListsSearchPayload {
    pub data: ListsSearchData,
    pub pagination: ResolvedListPagination,
    #[serde(rename = "type")]
    pub list_view: &'static str,
}

impl ListsSearchPayload {
    pub fn new(search_text: impl Into<String>, pagination: ResolvedListPagination) -> Self {
        Self {
            data: ListsSearchData {
                search_text: search_text.into(),
                content_type: "ALL",
            },
            pagination,
            list_view: "DASHBOARD",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MmiSearchData {
    pub value: String,
}

/// Body of an MMI record search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MmiSearchPayload {
    pub data: MmiSearchData,
    #[serde(rename = "type")]
    pub crm_type: MmiCrmType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<MmiPagination>,
}
