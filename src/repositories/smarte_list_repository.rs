use crate::client::AsyncSmarteClient;
use crate::context::RequestContext;
use crate::domain::{EntityType, ListType};
use crate::error::SmarteApiResult;
use crate::models::{ListsSearchPayload, MmiSearchPayload};
use crate::repositories::traits::ListRepository;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;

pub const LEAD_LISTS_PATH: &str = "/customer-list/v1/lead-list/lead-lists";
pub const ACCOUNT_LISTS_PATH: &str = "/customer-list/v1/account-list/account-lists";
pub const MMI_SEARCH_PATH: &str = "/search/v4/mmi/name";

pub fn lists_path(list_type: ListType) -> &'static str {
    match list_type {
        ListType::Lead => LEAD_LISTS_PATH,
        ListType::Account => ACCOUNT_LISTS_PATH,
    }
}

pub fn mmi_path(entity_type: EntityType) -> String {
    format!("{}/{}", MMI_SEARCH_PATH, entity_type.path_segment())
}

/// List repository implementation using the SMARTe gateway.
pub struct SmarteListRepository {
    client: Arc<dyn AsyncSmarteClient>,
}

impl SmarteListRepository {
    pub fn new(client: Arc<dyn AsyncSmarteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ListRepository for SmarteListRepository {
    async fn search_lists(
        &self,
        list_type: ListType,
        payload: &ListsSearchPayload,
        ctx: &RequestContext,
    ) -> SmarteApiResult<Value> {
        let body = serde_json::to_value(payload)?;
        self.client.post(lists_path(list_type), &body, ctx).await
    }

    async fn search_mmi_records(
        &self,
        entity_type: EntityType,
        payload: &MmiSearchPayload,
        ctx: &RequestContext,
    ) -> SmarteApiResult<Value> {
        let body = serde_json::to_value(payload)?;
        self.client.post(&mmi_path(entity_type), &body, ctx).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paths() {
        assert_eq!(lists_path(ListType::Lead), "/customer-list/v1/lead-list/lead-lists");
        assert_eq!(
            lists_path(ListType::Account),
            "/customer-list/v1/account-list/account-lists"
        );
        assert_eq!(mmi_path(EntityType::Contact), "/search/v4/mmi/name/contact");
    }
}
