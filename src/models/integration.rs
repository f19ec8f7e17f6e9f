//! Wire shapes for the CRM integration endpoints.

use crate::domain::{AssetType, CrmType};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Accept an identifier the gateway sends as either a string or a number.
fn deserialize_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number id, got {}",
            other
        ))),
    }
}

/// Text field that may arrive as null or a non-string scalar. Null becomes empty.
fn deserialize_name<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    })
}

fn deserialize_opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    })
}

/// Status codes show up as numbers or numeric strings; anything else reads as absent.
fn deserialize_status_code<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// Only a literal `true` grants a permission.
fn deserialize_flag<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(matches!(Value::deserialize(deserializer)?, Value::Bool(true)))
}

/// A configured integration between the account and an external CRM.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Connector {
    #[serde(deserialize_with = "deserialize_id")]
    pub connector_id: String,
    #[serde(deserialize_with = "deserialize_name")]
    pub connector_name: String,
    pub integration_url: Option<Value>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub status: bool,
    pub authentication_type: Option<Value>,
    #[serde(deserialize_with = "deserialize_flag")]
    pub super_status: bool,
}

impl Connector {
    pub fn is_available(&self) -> bool {
        self.status || self.super_status
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectorListResponse {
    pub tenant_id: Option<Value>,
    pub tenant_user_id: Option<Value>,
    pub response_lists: Option<Vec<Connector>>,
    pub error_code: Option<Value>,
}

/// Integration-status flags for a connector.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PermissionFlags {
    /// Single export of leads
    #[serde(deserialize_with = "deserialize_flag")]
    pub lead: bool,
    /// Single export of contacts
    #[serde(deserialize_with = "deserialize_flag")]
    pub accounts_and_contacts: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub account: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub lead_status: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub contact_status: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub account_status: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub base_crm_lead: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub base_crm_contact: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub base_crm_account: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    pub data_sync_status: bool,
    #[serde(rename = "integrationId")]
    pub integration_id: Option<Value>,
    pub connector_name: Option<Value>,
    pub connection_name: Option<Value>,
    #[serde(rename = "isBaseConnectorConfiguredByIH", deserialize_with = "deserialize_flag")]
    pub is_base_connector_configured_by_ih: bool,
}

impl PermissionFlags {
    /// The flag that governs export of `asset_type`.
    pub fn flag_for(&self, asset_type: AssetType) -> bool {
        match asset_type {
            AssetType::Lead => self.lead,
            AssetType::Contact => self.accounts_and_contacts,
        }
    }
}

/// Duplicate-check verdict. Only `statusCode == 201` allows the export.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EligibilityVerdict {
    #[serde(deserialize_with = "deserialize_status_code")]
    pub status_code: Option<i64>,
    #[serde(deserialize_with = "deserialize_opt_text")]
    pub error_message: Option<String>,
    pub data: Option<Value>,
    pub smarte_data: Option<Value>,
    pub record_id: Option<Value>,
}

impl EligibilityVerdict {
    pub const ALLOWED: i64 = 201;

    pub fn is_allowed(&self) -> bool {
        self.status_code == Some(Self::ALLOWED)
    }
}

/// Body shared by the eligibility check and the export submission.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPayload {
    pub data: Map<String, Value>,
    pub data_prime: Value,
    pub connector_id: String,
    pub connector_name: CrmType,
    pub asset_type: AssetType,
}
