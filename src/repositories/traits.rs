use crate::context::RequestContext;
use crate::domain::{EntityType, GuidPair, ListType, RevealType};
use crate::error::SmarteApiResult;
use crate::models::*;
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashSet;

/// Repository for contact reveals.
///
/// Provides abstraction over the reveal endpoints, enabling different
/// implementations (API client, mock).
#[async_trait]
pub trait RevealRepository: Send + Sync {
    /// Contact GUIDs the caller's account has already revealed.
    async fn revealed_contact_guids(&self, ctx: &RequestContext) -> SmarteApiResult<HashSet<String>>;

    /// Reveal one batch of pairs tagged with `reveal_type`.
    async fn reveal_contacts(
        &self,
        pairs: &[GuidPair],
        reveal_type: RevealType,
        ctx: &RequestContext,
    ) -> SmarteApiResult<RevealBatchResponse>;
}

/// Repository for CRM integrations and export.
#[async_trait]
pub trait IntegrationRepository: Send + Sync {
    /// Connectors configured for the caller's account.
    async fn list_connectors(&self, ctx: &RequestContext) -> SmarteApiResult<ConnectorListResponse>;

    /// Permission flags for `connector`. `None` when the gateway returned no body.
    async fn integration_status(
        &self,
        connector: &Connector,
        ctx: &RequestContext,
    ) -> SmarteApiResult<Option<PermissionFlags>>;

    /// Duplicate check ahead of an export. `None` when the gateway returned no body.
    async fn verify_export(
        &self,
        payload: &ExportPayload,
        ctx: &RequestContext,
    ) -> SmarteApiResult<Option<EligibilityVerdict>>;

    /// Submit the export. The body is returned as received.
    async fn submit_export(&self, payload: &ExportPayload, ctx: &RequestContext) -> SmarteApiResult<Value>;
}

/// Repository for list and MMI record searches.
#[async_trait]
pub trait ListRepository: Send + Sync {
    async fn search_lists(
        &self,
        list_type: ListType,
        payload: &ListsSearchPayload,
        ctx: &RequestContext,
    ) -> SmarteApiResult<Value>;

    async fn search_mmi_records(
        &self,
        entity_type: EntityType,
        payload: &MmiSearchPayload,
        ctx: &RequestContext,
    ) -> SmarteApiResult<Value>;
}
