mod smarte_integration_repository;
mod smarte_list_repository;
mod smarte_reveal_repository;
mod traits;

pub use smarte_integration_repository::{
    SmarteIntegrationRepository, CONNECTORS_PATH, DEDUPE_PATH, EXPORT_PATH, INTEGRATION_STATUS_PATH,
};
pub use smarte_list_repository::{
    lists_path, mmi_path, SmarteListRepository, ACCOUNT_LISTS_PATH, LEAD_LISTS_PATH,
};
pub use smarte_reveal_repository::{
    SmarteRevealRepository, CONTACT_REVEAL_PATH, REVEALED_CONTACTS_PATH,
};
pub use traits::{IntegrationRepository, ListRepository, RevealRepository};

use crate::error::{SmarteApiError, SmarteApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decode a gateway body into its typed model.
fn decode<T: DeserializeOwned>(body: Value) -> SmarteApiResult<T> {
    serde_json::from_value(body).map_err(SmarteApiError::JsonError)
}
