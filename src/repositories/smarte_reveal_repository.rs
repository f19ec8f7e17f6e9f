use crate::client::AsyncSmarteClient;
use crate::context::RequestContext;
use crate::domain::{GuidPair, RevealType};
use crate::error::{SmarteApiError, SmarteApiResult};
use crate::models::{RevealBatchRequest, RevealBatchResponse, RevealedGuidsResponse};
use crate::repositories::decode;
use crate::repositories::traits::RevealRepository;
use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

pub const CONTACT_REVEAL_PATH: &str = "/customer-list/v2/reveal/contact-reveal";
pub const REVEALED_CONTACTS_PATH: &str = "/customer-list/v2/reveal/revealed-contacts";

/// Reveal repository implementation using the SMARTe gateway.
pub struct SmarteRevealRepository {
    client: Arc<dyn AsyncSmarteClient>,
}

impl SmarteRevealRepository {
    pub fn new(client: Arc<dyn AsyncSmarteClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RevealRepository for SmarteRevealRepository {
    async fn revealed_contact_guids(&self, ctx: &RequestContext) -> SmarteApiResult<HashSet<String>> {
        let body = self.client.post(REVEALED_CONTACTS_PATH, &json!({}), ctx).await?;
        if body.is_null() {
            return Err(SmarteApiError::UnexpectedResponse(
                "Failed to retrieve contact reveal data".to_string(),
            ));
        }

        let response: RevealedGuidsResponse = decode(body)?;
        Ok(response.into_set())
    }

    async fn reveal_contacts(
        &self,
        pairs: &[GuidPair],
        reveal_type: RevealType,
        ctx: &RequestContext,
    ) -> SmarteApiResult<RevealBatchResponse> {
        let request = serde_json::to_value(RevealBatchRequest::new(pairs, reveal_type))?;
        let body = self.client.post(CONTACT_REVEAL_PATH, &request, ctx).await?;

        match body {
            Value::Null => Ok(RevealBatchResponse::default()),
            body => decode(body),
        }
    }
}
