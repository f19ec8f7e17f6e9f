//! Data models for SMARTe platform requests and responses.
//!
//! These mirror the gateway's JSON bodies, including fields the services
//! never read.

pub mod integration;
pub mod lists;
pub mod reveal;

pub use integration::{
    Connector, ConnectorListResponse, EligibilityVerdict, ExportPayload, PermissionFlags,
};
pub use lists::{ListItem, ListsSearchPayload, MmiSearchData, MmiSearchPayload};
pub use reveal::{
    RevealBatchRequest, RevealBatchResponse, RevealedContacts, RevealedGuidsResponse, StatusBlock,
    REVEAL_SOURCE,
};
