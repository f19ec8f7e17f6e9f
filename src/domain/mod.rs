//! Domain value objects and types.
//!
//! This module contains the request-level concepts shared by every tool:
//! GUID pairs and their shape checks, the closed value sets requests draw
//! from, pagination inputs, and the common validation report.

pub mod enums;
pub mod guid;
pub mod pagination;
pub mod validation;

pub use enums::{AssetType, CrmType, EntityType, ListType, MmiCrmType, RevealType};
pub use guid::{validate_guid_format, validate_reveal_pairs, GuidPair, MAX_REVEAL_PAIRS};
pub use pagination::{ListPagination, MmiPagination, ResolvedListPagination};
pub use validation::ValidationReport;
