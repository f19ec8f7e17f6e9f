//! Wire shapes for the contact reveal endpoints.

use crate::domain::{GuidPair, RevealType};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashSet;

/// Revealed contact fields keyed by contact GUID.
pub type RevealedContacts = Map<String, Value>;

/// Source tag the platform records for reveals made through this server.
pub const REVEAL_SOURCE: &str = "Employee List";

/// Body of one batched reveal call.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealBatchRequest<'a> {
    pub data: &'a [GuidPair],
    pub reveal_source: &'static str,
    #[serde(rename = "type")]
    pub reveal_type: RevealType,
}

impl<'a> RevealBatchRequest<'a> {
    pub fn new(data: &'a [GuidPair], reveal_type: RevealType) -> Self {
        Self {
            data,
            reveal_source: REVEAL_SOURCE,
            reveal_type,
        }
    }
}

/// Status envelope the gateway wraps most bodies in.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusBlock {
    #[serde(default)]
    pub status_code: Option<i64>,
    #[serde(default)]
    pub request_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Response of the revealed-GUID lookup.
#[derive(Debug, Default, Deserialize)]
pub struct RevealedGuidsResponse {
    #[serde(default)]
    pub data: Option<RevealedGuidsData>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedGuidsData {
    #[serde(default)]
    pub revealed_list: Option<Vec<String>>,
}

impl RevealedGuidsResponse {
    /// The revealed set; absent lists mean nothing has been revealed yet.
    pub fn into_set(self) -> HashSet<String> {
        self.data
            .and_then(|d| d.revealed_list)
            .unwrap_or_default()
            .into_iter()
            .collect()
    }
}

/// Response of one batched reveal call.
#[derive(Debug, Default, Deserialize)]
pub struct RevealBatchResponse {
    #[serde(default)]
    pub status: Option<StatusBlock>,
    #[serde(default)]
    pub data: Option<RevealedContacts>,
}

impl RevealBatchResponse {
    pub fn status_code(&self) -> Option<i64> {
        self.status.as_ref().and_then(|s| s.status_code)
    }

    /// The revealed contacts, if the body reports `statusCode == 200` and carries data.
    pub fn into_revealed(self) -> Option<RevealedContacts> {
        if self.status_code() == Some(200) {
            self.data
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_request_shape() {
        let pairs = vec![GuidPair::new("c-1", "k-1")];
        let body = serde_json::to_value(RevealBatchRequest::new(&pairs, RevealType::New)).unwrap();
        assert_eq!(
            body,
            json!({
                "data": [{"conGuid": "c-1", "compGuid": "k-1"}],
                "revealSource": "Employee List",
                "type": "NEW"
            })
        );
    }

    #[test]
    fn test_revealed_set_tolerates_missing_list() {
        let response: RevealedGuidsResponse = serde_json::from_value(json!({"data": {}})).unwrap();
        assert!(response.into_set().is_empty());

        let response: RevealedGuidsResponse =
            serde_json::from_value(json!({"data": {"revealedList": ["a", "b"]}})).unwrap();
        let set = response.into_set();
        assert!(set.contains("a") && set.contains("b"));
    }

    #[test]
    fn test_batch_response_requires_200_and_data() {
        let ok: RevealBatchResponse = serde_json::from_value(json!({
            "status": {"statusCode": 200},
            "data": {"c-1": {"email": "x@y.z"}}
        }))
        .unwrap();
        assert_eq!(ok.into_revealed().map(|d| d.len()), Some(1));

        let wrong_status: RevealBatchResponse = serde_json::from_value(json!({
            "status": {"statusCode": 402},
            "data": {"c-1": {}}
        }))
        .unwrap();
        assert!(wrong_status.into_revealed().is_none());

        let no_data: RevealBatchResponse =
            serde_json::from_value(json!({"status": {"statusCode": 200}, "data": null})).unwrap();
        assert!(no_data.into_revealed().is_none());
    }
}
