//! Error types for the SMARTe MCP Server.
//!
//! Two layers, both built on `thiserror`:
//! - [`SmarteApiError`] describes a single remote call that went wrong.
//! - [`ToolError`] describes why a tool invocation as a whole failed, and is the
//!   only error a tool handler ever renders back to the MCP caller.

use thiserror::Error;

/// Remediation text returned to callers whose token was rejected.
pub const UNAUTHORIZED_MESSAGE: &str = "Unauthorized: Invalid or missing authentication credentials. To get the new token from SMARTe platform, Go to https://qc1-primeapp.smarte.pro/oauth2/signin -> sign in with you credentials -> click on Access token copy button -> paste the token in the Authorization header at the time of SMARTe MCP connect.";

/// Errors that can occur when calling the SMARTe platform.
#[derive(Error, Debug)]
pub enum SmarteApiError {
    /// HTTP request failed before a status line was received
    #[error("HTTP request failed: {0}")]
    HttpError(String),

    /// API returned a non-success status code
    #[error("Error {status}: {message}{}", request_id_suffix(.request_id))]
    ApiError {
        status: u16,
        message: String,
        request_id: Option<String>,
    },

    /// Failed to parse JSON response
    #[error("JSON parse error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Network timeout
    #[error("Request timeout")]
    Timeout,

    /// Authentication failed
    #[error("Error 401: {}{}", UNAUTHORIZED_MESSAGE, request_id_suffix(.request_id))]
    Unauthorized { request_id: Option<String> },

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// The caller went away while the call was in flight
    #[error("Request cancelled")]
    Cancelled,

    /// The body decoded but did not have the expected shape
    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),
}

fn request_id_suffix(request_id: &Option<String>) -> String {
    match request_id {
        Some(id) => format!(" (Request ID: {})", id),
        None => String::new(),
    }
}

/// Default caller-facing message for a non-success HTTP status.
pub fn default_status_message(status: u16) -> String {
    match status {
        401 => UNAUTHORIZED_MESSAGE.to_string(),
        403 => "Forbidden: Access denied".to_string(),
        404 => "Not Found: Resource does not exist".to_string(),
        500 => "Internal Server Error".to_string(),
        502 => "Bad Gateway".to_string(),
        503 => "Service Unavailable".to_string(),
        other => format!("HTTP Error {}", other),
    }
}

/// Why a tool invocation failed.
#[derive(Error, Debug)]
pub enum ToolError {
    /// Request failed structural checks; no remote call was issued
    #[error("Validation errors: {}", .0.join(", "))]
    ValidationFailed(Vec<String>),

    /// No forwarded Authorization value is available
    #[error("Missing Authorization header")]
    AuthMissing,

    /// The revealed-GUID lookup failed, so the batch cannot be partitioned
    #[error("Failed to retrieve revealed contacts: {0}")]
    RevealLookupFailed(String),

    /// No available connector matches the requested CRM
    #[error(
        "Connector not found for {crm}. Require to reconfigure the connector. Available configured connectors: {}. To configure the connector, follow the steps - 1. login to SMARTe platform using Admin account -> go to Admin Console -> go to Integrations -> click on Connect button with respected CRM type.",
        .available.join(", ")
    )]
    ConnectorNotFound { crm: String, available: Vec<String> },

    /// The connector does not allow exporting this asset type
    #[error("You do not have permission to export this asset type. Asset type: {asset_type}, Permission: {flag} = {value}")]
    PermissionDenied {
        asset_type: String,
        flag: &'static str,
        value: bool,
    },

    /// The enrichment snapshot could not be fetched. Never fatal.
    #[error("Failed to fetch contact snapshot: {0}")]
    SnapshotFetchFailed(String),

    /// The record has already been exported to the target CRM
    #[error("Export not allowed - data already exists in CRM. {}", verdict_detail(.status_code, .message))]
    EligibilityDenied {
        status_code: Option<i64>,
        message: Option<String>,
    },

    /// A remote call failed at the transport or HTTP level
    #[error("{0}")]
    RemoteCallFailed(SmarteApiError),

    /// A remote call succeeded but its body could not be interpreted
    #[error("Malformed response from platform: {0}")]
    InternalMalformedResponse(String),

    /// The MCP caller cancelled the request
    #[error("Request cancelled by caller")]
    Cancelled,
}

fn verdict_detail(status_code: &Option<i64>, message: &Option<String>) -> String {
    let status = status_code
        .map(|code| code.to_string())
        .unwrap_or_else(|| "unknown".to_string());
    match message {
        Some(message) => format!("Status: {}, Message: {}", status, message),
        None => format!("Status: {}", status),
    }
}

impl From<SmarteApiError> for ToolError {
    fn from(error: SmarteApiError) -> Self {
        match error {
            SmarteApiError::Cancelled => ToolError::Cancelled,
            SmarteApiError::JsonError(_) | SmarteApiError::UnexpectedResponse(_) => {
                ToolError::InternalMalformedResponse(error.to_string())
            }
            other => ToolError::RemoteCallFailed(other),
        }
    }
}

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Required environment variable is missing
    #[error("Missing required environment variable: {0}")]
    MissingVar(String),

    /// Environment variable has invalid value
    #[error("Invalid value for {var}: {reason}")]
    InvalidValue { var: String, reason: String },
}

/// Convenience type alias for Results with SmarteApiError
pub type SmarteApiResult<T> = Result<T, SmarteApiError>;

/// Convenience type alias for Results with ToolError
pub type ToolResult<T> = Result<T, ToolError>;

/// Convenience type alias for Results with ConfigError
pub type ConfigResult<T> = Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display_with_request_id() {
        let err = SmarteApiError::ApiError {
            status: 503,
            message: default_status_message(503),
            request_id: Some("req-42".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Error 503: Service Unavailable (Request ID: req-42)"
        );
    }

    #[test]
    fn test_api_error_display_without_request_id() {
        let err = SmarteApiError::ApiError {
            status: 418,
            message: default_status_message(418),
            request_id: None,
        };
        assert_eq!(err.to_string(), "Error 418: HTTP Error 418");
    }

    #[test]
    fn test_unauthorized_carries_remediation() {
        let err = SmarteApiError::Unauthorized { request_id: None };
        assert!(err.to_string().starts_with("Error 401: Unauthorized"));
        assert!(err.to_string().contains("Access token"));
    }

    #[test]
    fn test_validation_failed_display() {
        let err = ToolError::ValidationFailed(vec!["a".to_string(), "b".to_string()]);
        assert_eq!(err.to_string(), "Validation errors: a, b");
    }

    #[test]
    fn test_connector_not_found_lists_available() {
        let err = ToolError::ConnectorNotFound {
            crm: "SALESFORCE".to_string(),
            available: vec!["HUBSPOT".to_string(), "OUTREACH".to_string()],
        };
        let text = err.to_string();
        assert!(text.starts_with("Connector not found for SALESFORCE"));
        assert!(text.contains("Available configured connectors: HUBSPOT, OUTREACH."));
        assert!(text.contains("Admin Console"));
    }

    #[test]
    fn test_permission_denied_names_flag() {
        let err = ToolError::PermissionDenied {
            asset_type: "LEAD".to_string(),
            flag: "lead",
            value: false,
        };
        assert!(err.to_string().ends_with("Asset type: LEAD, Permission: lead = false"));
    }

    #[test]
    fn test_eligibility_denied_display() {
        let err = ToolError::EligibilityDenied {
            status_code: Some(409),
            message: Some("Duplicate record".to_string()),
        };
        assert_eq!(
            err.to_string(),
            "Export not allowed - data already exists in CRM. Status: 409, Message: Duplicate record"
        );

        let err = ToolError::EligibilityDenied {
            status_code: None,
            message: None,
        };
        assert!(err.to_string().ends_with("Status: unknown"));
    }

    #[test]
    fn test_from_api_error_classification() {
        assert!(matches!(
            ToolError::from(SmarteApiError::Cancelled),
            ToolError::Cancelled
        ));
        assert!(matches!(
            ToolError::from(SmarteApiError::UnexpectedResponse("x".to_string())),
            ToolError::InternalMalformedResponse(_)
        ));
        assert!(matches!(
            ToolError::from(SmarteApiError::Timeout),
            ToolError::RemoteCallFailed(SmarteApiError::Timeout)
        ));
    }

    #[test]
    fn test_config_error_display() {
        let err = ConfigError::MissingVar("SMARTE_GATEWAY_URL".to_string());
        assert_eq!(
            err.to_string(),
            "Missing required environment variable: SMARTE_GATEWAY_URL"
        );
    }
}
