//! Contact reveal service layer.
//!
//! Splits a batch into contacts the account has revealed before and contacts
//! being revealed for the first time, reveals each group with its own call,
//! and merges the results by contact GUID.

use crate::context::RequestContext;
use crate::domain::{validate_reveal_pairs, GuidPair, RevealType};
use crate::error::{SmarteApiError, ToolError, ToolResult};
use crate::metrics::Metrics;
use crate::models::RevealedContacts;
use crate::repositories::RevealRepository;
use async_trait::async_trait;
use schemars::JsonSchema;
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;

/// Request accepted by the `contact_reveal` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ContactRevealRequest {
    /// Contact-company GUID pairs to reveal (1 to 100)
    #[serde(default)]
    pub data: Vec<GuidPair>,
}

/// A batch split by prior reveal status. Input order is kept within each group.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RevealPartition {
    pub existing: Vec<GuidPair>,
    pub new: Vec<GuidPair>,
}

impl RevealPartition {
    pub fn group(&self, reveal_type: RevealType) -> &[GuidPair] {
        match reveal_type {
            RevealType::Existing => &self.existing,
            RevealType::New => &self.new,
        }
    }
}

/// Split `pairs` by membership of their contact GUID in `revealed`.
pub fn partition_pairs(pairs: &[GuidPair], revealed: &HashSet<String>) -> RevealPartition {
    let mut partition = RevealPartition::default();
    for pair in pairs {
        if revealed.contains(&pair.contact_guid) {
            partition.existing.push(pair.clone());
        } else {
            partition.new.push(pair.clone());
        }
    }
    partition
}

/// Merged reveal result.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RevealOutcome {
    pub data: RevealedContacts,
    /// Branches whose contacts are missing from `data` because their call failed.
    pub failed_branches: Vec<RevealType>,
}

impl RevealOutcome {
    /// The caller-facing `{data: {...}}` body.
    pub fn to_response(&self) -> Value {
        json!({ "data": self.data })
    }

    pub fn warnings(&self) -> Vec<String> {
        self.failed_branches
            .iter()
            .map(|branch| {
                format!(
                    "Warning: the {} reveal call failed; its contacts are omitted from the result.",
                    branch
                )
            })
            .collect()
    }
}

enum BranchOutcome {
    Skipped,
    Revealed(RevealedContacts),
    Failed(String),
    Cancelled,
}

/// Contact reveal service trait for business operations.
#[async_trait]
pub trait ContactRevealService: Send + Sync {
    /// Validate the request, require credentials, then reveal.
    async fn reveal_contacts(
        &self,
        request: ContactRevealRequest,
        ctx: &RequestContext,
    ) -> ToolResult<RevealOutcome>;

    /// Reveal an already-checked batch.
    async fn reveal(&self, pairs: &[GuidPair], ctx: &RequestContext) -> ToolResult<RevealOutcome>;
}

/// Default implementation of ContactRevealService.
pub struct ContactRevealServiceImpl {
    repository: Arc<dyn RevealRepository>,
    metrics: Metrics,
}

impl ContactRevealServiceImpl {
    pub fn new(repository: Arc<dyn RevealRepository>, metrics: Metrics) -> Self {
        Self {
            repository,
            metrics,
        }
    }

    async fn run_branch(
        &self,
        pairs: &[GuidPair],
        reveal_type: RevealType,
        ctx: &RequestContext,
    ) -> BranchOutcome {
        // The backend rejects empty reveal batches.
        if pairs.is_empty() {
            return BranchOutcome::Skipped;
        }

        tracing::debug!(branch = %reveal_type, count = pairs.len(), "Revealing contacts");
        match self.repository.reveal_contacts(pairs, reveal_type, ctx).await {
            Ok(response) => {
                let status = response.status_code();
                match response.into_revealed() {
                    Some(data) => BranchOutcome::Revealed(data),
                    None => BranchOutcome::Failed(format!(
                        "unexpected reveal status {}",
                        status.map(|s| s.to_string()).unwrap_or_else(|| "none".to_string())
                    )),
                }
            }
            Err(SmarteApiError::Cancelled) => BranchOutcome::Cancelled,
            Err(e) => BranchOutcome::Failed(e.to_string()),
        }
    }
}

#[async_trait]
impl ContactRevealService for ContactRevealServiceImpl {
    async fn reveal_contacts(
        &self,
        request: ContactRevealRequest,
        ctx: &RequestContext,
    ) -> ToolResult<RevealOutcome> {
        validate_reveal_pairs(&request.data).into_result()?;
        ctx.require_auth()?;

        tracing::info!(
            tool = "contact_reveal",
            request_id = ctx.request_id(),
            count = request.data.len(),
            "Contact reveal requested"
        );
        self.reveal(&request.data, ctx).await
    }

    async fn reveal(&self, pairs: &[GuidPair], ctx: &RequestContext) -> ToolResult<RevealOutcome> {
        ctx.ensure_active()?;

        let revealed = match self.repository.revealed_contact_guids(ctx).await {
            Ok(revealed) => revealed,
            Err(SmarteApiError::Cancelled) => return Err(ToolError::Cancelled),
            Err(e) => {
                tracing::error!(error = %e, "Revealed-contacts lookup failed");
                return Err(ToolError::RevealLookupFailed(e.to_string()));
            }
        };

        let partition = partition_pairs(pairs, &revealed);
        tracing::debug!(
            existing = partition.existing.len(),
            new = partition.new.len(),
            "Partitioned reveal batch"
        );

        // Disjoint groups, so both calls can be in flight at once.
        let (existing, new) = futures::future::join(
            self.run_branch(partition.group(RevealType::Existing), RevealType::Existing, ctx),
            self.run_branch(partition.group(RevealType::New), RevealType::New, ctx),
        )
        .await;

        let mut outcome = RevealOutcome::default();
        for (branch, result) in [(RevealType::Existing, existing), (RevealType::New, new)] {
            match result {
                BranchOutcome::Skipped => {}
                BranchOutcome::Revealed(data) => outcome.data.extend(data),
                BranchOutcome::Failed(reason) => {
                    tracing::warn!(branch = %branch, reason = %reason, "Reveal branch failed, omitting its contacts");
                    self.metrics.record_reveal_branch_failure();
                    outcome.failed_branches.push(branch);
                }
                BranchOutcome::Cancelled => return Err(ToolError::Cancelled),
            }
        }

        Ok(outcome)
    }
}
