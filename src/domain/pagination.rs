//! Pagination inputs for the list and MMI searches.

use super::validation::ValidationReport;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const DEFAULT_LIST_PAGE_SIZE: i64 = 50;
pub const MAX_LIST_PAGE_SIZE: i64 = 200;

pub const MAX_MMI_PAGE_SIZE: i64 = 100;

/// Pagination for a customer-list search.
///
/// `pageIndex` and `page_no` are two spellings of the same cursor. When only
/// one is supplied it stands in for the other.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, JsonSchema)]
pub struct ListPagination {
    /// Page index starting from 1
    #[serde(rename = "pageIndex", default)]
    pub page_index: Option<i64>,

    /// Number of records per page, max 200 (default 50)
    #[serde(rename = "pageSize", default)]
    pub page_size: Option<i64>,

    /// Alias for page index
    #[serde(default)]
    pub page_no: Option<i64>,
}

/// Pagination with every alias and default filled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ResolvedListPagination {
    #[serde(rename = "pageIndex")]
    pub page_index: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    pub page_no: i64,
}

impl ListPagination {
    pub fn resolve(&self) -> ResolvedListPagination {
        ResolvedListPagination {
            page_index: self.page_index.or(self.page_no).unwrap_or(1),
            page_size: self.page_size.unwrap_or(DEFAULT_LIST_PAGE_SIZE),
            page_no: self.page_no.or(self.page_index).unwrap_or(1),
        }
    }

    /// Each alias is checked on its own after resolution.
    pub fn validate(&self, report: &mut ValidationReport) {
        let resolved = self.resolve();
        if resolved.page_index < 1 {
            report.push("Invalid pageIndex");
        }
        if resolved.page_no < 1 {
            report.push("Invalid page_no");
        }
        if !(1..=MAX_LIST_PAGE_SIZE).contains(&resolved.page_size) {
            report.push("Invalid pageSize");
        }
    }
}

/// Optional pagination for an MMI record search. Forwarded as given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct MmiPagination {
    /// Number of results per page (1 to 100)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_size: Option<i64>,

    /// Page number starting from 1
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page_no: Option<i64>,
}

impl MmiPagination {
    pub fn validate(&self, report: &mut ValidationReport) {
        if let Some(size) = self.page_size {
            if !(1..=MAX_MMI_PAGE_SIZE).contains(&size) {
                report.push(format!("Page size must be between 1 and {}", MAX_MMI_PAGE_SIZE));
            }
        }
        if let Some(page) = self.page_no {
            if page < 1 {
                report.push("Page number must be a positive integer");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_for(pagination: &ListPagination) -> Vec<String> {
        let mut report = ValidationReport::new();
        pagination.validate(&mut report);
        report.errors().to_vec()
    }

    #[test]
    fn test_defaults() {
        let resolved = ListPagination::default().resolve();
        assert_eq!(
            resolved,
            ResolvedListPagination {
                page_index: 1,
                page_size: 50,
                page_no: 1
            }
        );
    }

    #[test]
    fn test_aliases_fill_each_other() {
        let only_page_no = ListPagination {
            page_no: Some(3),
            ..Default::default()
        };
        assert_eq!(only_page_no.resolve().page_index, 3);

        let only_index = ListPagination {
            page_index: Some(4),
            ..Default::default()
        };
        assert_eq!(only_index.resolve().page_no, 4);
    }

    #[test]
    fn test_each_alias_checked_independently() {
        let pagination = ListPagination {
            page_index: Some(2),
            page_size: Some(10),
            page_no: Some(0),
        };
        assert_eq!(errors_for(&pagination), ["Invalid page_no"]);

        let both_bad = ListPagination {
            page_index: Some(0),
            ..Default::default()
        };
        assert_eq!(errors_for(&both_bad), ["Invalid pageIndex", "Invalid page_no"]);
    }

    #[test]
    fn test_page_size_bounds() {
        for (size, ok) in [(0, false), (1, true), (200, true), (201, false)] {
            let pagination = ListPagination {
                page_size: Some(size),
                ..Default::default()
            };
            assert_eq!(errors_for(&pagination).is_empty(), ok, "pageSize {}", size);
        }
    }

    #[test]
    fn test_mmi_pagination() {
        let mut report = ValidationReport::new();
        MmiPagination {
            page_size: Some(101),
            page_no: Some(0),
        }
        .validate(&mut report);
        assert_eq!(
            report.errors(),
            [
                "Page size must be between 1 and 100",
                "Page number must be a positive integer"
            ]
        );

        let mut report = ValidationReport::new();
        MmiPagination::default().validate(&mut report);
        assert!(report.is_valid());
    }
}
