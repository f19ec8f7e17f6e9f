//! MCP tool handlers for the SMARTe server.
//!
//! This module implements all the MCP tools using the rmcp SDK's tool_router pattern.

use crate::context::{HeaderBag, RequestContext};
use crate::error::ToolError;
use crate::metrics::Metrics;
use crate::repositories::{IntegrationRepository, ListRepository, RevealRepository};
use crate::services::{
    ContactRevealRequest, ContactRevealService, ContactRevealServiceImpl, CrmExportService,
    CrmExportServiceImpl, ExportRequest, ListsFilterRequest, ListsFilterService,
    ListsFilterServiceImpl, MmiFilterRequest, MmiFilterService, MmiFilterServiceImpl,
};
use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::*;
use rmcp::service::RequestContext as McpRequestContext;
use rmcp::{tool, tool_handler, tool_router, ErrorData as McpError, RoleServer, ServerHandler};
use serde_json::Value;
use std::borrow::Cow;
use std::sync::Arc;

/// The SMARTe MCP server that exposes reveal, export and list tools.
#[derive(Clone)]
pub struct SmarteMcpServer {
    reveal_service: Arc<dyn ContactRevealService>,
    export_service: Arc<dyn CrmExportService>,
    lists_service: Arc<dyn ListsFilterService>,
    mmi_service: Arc<dyn MmiFilterService>,
    headers: HeaderBag,
    tool_router: ToolRouter<Self>,
}

// Implement ServerHandler using the tool_handler macro
#[tool_handler]
impl ServerHandler for SmarteMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities {
                tools: Some(Default::default()),
                ..Default::default()
            },
            server_info: Implementation {
                name: "smarte-mcp-server".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                icons: None,
                title: None,
                website_url: None,
            },
            instructions: Some("MCP server for the SMARTe B2B data platform - reveals contact details, exports contacts to a connected CRM, and searches customer lists and CRM records.".into()),
        }
    }
}

/// Which tool produced a failure, for message formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tool {
    ContactReveal,
    ExportToCrm,
    ListsFilter,
    MmiSearch,
}

impl Tool {
    fn name(&self) -> &'static str {
        match self {
            Tool::ContactReveal => "contact_reveal",
            Tool::ExportToCrm => "export_to_crm",
            Tool::ListsFilter => "lists_filter_value",
            Tool::MmiSearch => "search_mmi_records",
        }
    }

    fn failure_prefix(&self) -> &'static str {
        match self {
            Tool::ContactReveal => "Error in contact reveal: ",
            Tool::ExportToCrm => "CRM export failed: ",
            Tool::ListsFilter => "Error in lists filter: ",
            Tool::MmiSearch => "Error in MMI filter search: ",
        }
    }
}

/// Caller-facing text for a failed tool invocation.
fn failure_text(tool: Tool, error: &ToolError) -> String {
    match (tool, error) {
        (Tool::ExportToCrm, ToolError::ValidationFailed(errors)) => {
            format!("Validation failed: {}", errors.join("; "))
        }
        (Tool::ExportToCrm, ToolError::AuthMissing) => "Authorization header is required".to_string(),
        (_, ToolError::ValidationFailed(_)) | (_, ToolError::AuthMissing) => error.to_string(),
        (tool, error) => format!("{}{}", tool.failure_prefix(), error),
    }
}

// Helper function to convert errors to MCP errors
fn to_mcp_error(e: impl std::fmt::Display) -> McpError {
    McpError {
        code: ErrorCode::INTERNAL_ERROR,
        message: Cow::from(e.to_string()),
        data: None,
    }
}

fn request_id_text(id: &RequestId) -> String {
    match id {
        NumberOrString::Number(n) => n.to_string(),
        NumberOrString::String(s) => s.to_string(),
    }
}

fn success(body: &Value, warnings: Vec<String>) -> Result<CallToolResult, McpError> {
    let mut content = vec![Content::text(
        serde_json::to_string_pretty(body).map_err(to_mcp_error)?,
    )];
    content.extend(warnings.into_iter().map(Content::text));
    Ok(CallToolResult::success(content))
}

fn failure(tool: Tool, error: ToolError) -> Result<CallToolResult, McpError> {
    match &error {
        ToolError::ValidationFailed(_) | ToolError::AuthMissing => {
            tracing::warn!(tool = tool.name(), error = %error, "Tool request rejected");
        }
        _ => tracing::error!(tool = tool.name(), error = %error, "Tool invocation failed"),
    }
    Ok(CallToolResult::error(vec![Content::text(failure_text(tool, &error))]))
}

// Tool router implementation
#[tool_router]
impl SmarteMcpServer {
    /// Create a new SMARTe MCP server from its services.
    pub fn new(
        reveal_service: Arc<dyn ContactRevealService>,
        export_service: Arc<dyn CrmExportService>,
        lists_service: Arc<dyn ListsFilterService>,
        mmi_service: Arc<dyn MmiFilterService>,
        headers: HeaderBag,
    ) -> Self {
        Self {
            reveal_service,
            export_service,
            lists_service,
            mmi_service,
            headers,
            tool_router: Self::tool_router(),
        }
    }

    /// Create a server, constructing every service from the repositories.
    pub fn from_repositories(
        reveal_repo: Arc<dyn RevealRepository>,
        integration_repo: Arc<dyn IntegrationRepository>,
        list_repo: Arc<dyn ListRepository>,
        metrics: Metrics,
        headers: HeaderBag,
    ) -> Self {
        let reveal_service = Arc::new(ContactRevealServiceImpl::new(reveal_repo, metrics.clone()))
            as Arc<dyn ContactRevealService>;

        let export_service = Arc::new(CrmExportServiceImpl::new(
            integration_repo,
            reveal_service.clone(),
            metrics,
        )) as Arc<dyn CrmExportService>;

        let lists_service =
            Arc::new(ListsFilterServiceImpl::new(list_repo.clone())) as Arc<dyn ListsFilterService>;

        let mmi_service =
            Arc::new(MmiFilterServiceImpl::new(list_repo)) as Arc<dyn MmiFilterService>;

        Self::new(
            reveal_service,
            export_service,
            lists_service,
            mmi_service,
            headers,
        )
    }

    fn request_context(&self, ctx: &McpRequestContext<RoleServer>) -> RequestContext {
        RequestContext::new(self.headers.clone(), ctx.ct.clone(), request_id_text(&ctx.id))
    }

    /// Reveal contact details for contact-company GUID pairs.
    #[tool(
        description = "Reveal contact details (email, phone) for up to 100 contact-company GUID pairs. Contacts revealed before are fetched without consuming new reveal credits. Returns revealed data keyed by contact GUID."
    )]
    async fn contact_reveal(
        &self,
        params: Parameters<ContactRevealRequest>,
        ctx: McpRequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.request_context(&ctx);

        match self.reveal_service.reveal_contacts(params.0, &ctx).await {
            Ok(outcome) => success(&outcome.to_response(), outcome.warnings()),
            Err(e) => failure(Tool::ContactReveal, e),
        }
    }

    /// Export a contact to the connected CRM.
    #[tool(
        description = "Export a contact to Salesforce as a LEAD or CONTACT. Requires a configured Salesforce connector with export permission for the asset type. Records already present in the CRM are not exported again."
    )]
    async fn export_to_crm(
        &self,
        params: Parameters<ExportRequest>,
        ctx: McpRequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.request_context(&ctx);

        match self.export_service.export_to_crm(params.0, &ctx).await {
            Ok(outcome) => success(&outcome.response, outcome.warnings),
            Err(e) => failure(Tool::ExportToCrm, e),
        }
    }

    /// Search customer lists.
    #[tool(
        description = "Search and filter customer lists by type (LEAD or ACCOUNT) with optional search text and pagination. Returns only active lists matching the search criteria. Use pagination to navigate through results (pageIndex starts at 1, pageSize max 200)."
    )]
    async fn lists_filter_value(
        &self,
        params: Parameters<ListsFilterRequest>,
        ctx: McpRequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.request_context(&ctx);

        match self.lists_service.filter_lists(params.0, &ctx).await {
            Ok(body) => success(&body, Vec::new()),
            Err(e) => failure(Tool::ListsFilter, e),
        }
    }

    /// Search CRM records by name.
    #[tool(
        description = "Search CRM records by name to get recordId and name pairs for advanced search filters. Used to populate lead names, contact names, and account names in advanced search."
    )]
    async fn search_mmi_records(
        &self,
        params: Parameters<MmiFilterRequest>,
        ctx: McpRequestContext<RoleServer>,
    ) -> Result<CallToolResult, McpError> {
        let ctx = self.request_context(&ctx);

        match self.mmi_service.search_records(params.0, &ctx).await {
            Ok(body) => success(&body, Vec::new()),
            Err(e) => failure(Tool::MmiSearch, e),
        }
    }
}
