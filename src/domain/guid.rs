//! Contact and company GUIDs and the checks applied to them.

use super::validation::ValidationReport;
use once_cell::sync::Lazy;
use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Maximum number of pairs accepted by one reveal request.
pub const MAX_REVEAL_PAIRS: usize = 100;

pub const MIN_GUID_LENGTH: usize = 10;
pub const MAX_GUID_LENGTH: usize = 100;

static GUID_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("GUID pattern is valid"));

/// A contact GUID together with the company it belongs to.
///
/// `contact_guid` is the merge key of a reveal; callers are expected not to
/// repeat it within one batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct GuidPair {
    /// Contact GUID
    #[serde(rename = "conGuid", default)]
    pub contact_guid: String,

    /// Company GUID
    #[serde(rename = "compGuid", default)]
    pub company_guid: String,
}

impl GuidPair {
    pub fn new(contact_guid: impl Into<String>, company_guid: impl Into<String>) -> Self {
        Self {
            contact_guid: contact_guid.into(),
            company_guid: company_guid.into(),
        }
    }
}

/// Check a reveal batch: non-empty, bounded, and every pair fully populated.
pub fn validate_reveal_pairs(pairs: &[GuidPair]) -> ValidationReport {
    let mut report = ValidationReport::new();

    if pairs.is_empty() {
        report.push("At least one contact-company GUID pair is required");
    }
    if pairs.len() > MAX_REVEAL_PAIRS {
        report.push(format!(
            "Too many contact-company GUID pairs. Maximum {} allowed (current: {})",
            MAX_REVEAL_PAIRS,
            pairs.len()
        ));
    }

    for (index, pair) in pairs.iter().enumerate() {
        if pair.contact_guid.trim().is_empty() {
            report.push(format!("Missing contact GUID (conGuid) at index {}", index));
        }
        if pair.company_guid.trim().is_empty() {
            report.push(format!("Missing company GUID (compGuid) at index {}", index));
        }
    }

    report
}

/// Shape checks for a GUID handed to the export pipeline.
///
/// A blank GUID yields a single error; otherwise length and character set
/// are each reported independently.
pub fn validate_guid_format(guid: &str, label: &str, report: &mut ValidationReport) {
    if guid.trim().is_empty() {
        report.push(format!("{} cannot be empty or whitespace only", label));
        return;
    }

    let length = guid.chars().count();
    if length < MIN_GUID_LENGTH {
        report.push(format!(
            "{} must be at least {} characters (current: {})",
            label, MIN_GUID_LENGTH, length
        ));
    }
    if length > MAX_GUID_LENGTH {
        report.push(format!(
            "{} must not exceed {} characters (current: {})",
            label, MAX_GUID_LENGTH, length
        ));
    }
    if !GUID_PATTERN.is_match(guid) {
        report.push(format!(
            "{} may only contain letters, digits, '_' and '-'",
            label
        ));
    }
}
