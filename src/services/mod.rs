//! Application service layer.
//!
//! Services contain business logic and orchestrate interactions between
//! repositories. They provide a clean boundary between the MCP handlers
//! and the data access layer.

pub mod contact_reveal_service;
pub mod crm_export_service;
pub mod lists_filter_service;
pub mod mmi_filter_service;

pub use contact_reveal_service::{
    partition_pairs, ContactRevealRequest, ContactRevealService, ContactRevealServiceImpl,
    RevealOutcome, RevealPartition,
};
pub use crm_export_service::{
    CrmExportService, CrmExportServiceImpl, ExportData, ExportOutcome, ExportRequest, ExportStage,
};
pub use lists_filter_service::{
    normalize_lists, ListsFilterData, ListsFilterRequest, ListsFilterService, ListsFilterServiceImpl,
};
pub use mmi_filter_service::{MmiFilterData, MmiFilterRequest, MmiFilterService, MmiFilterServiceImpl};
