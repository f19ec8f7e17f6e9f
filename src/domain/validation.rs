//! The `{isValid, errors}` result shared by every request check.

use crate::error::{ToolError, ToolResult};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

/// Accumulated validation errors for one request.
///
/// Checks push messages instead of returning early, so a caller sees every
/// problem at once.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    errors: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// `Ok(())` when valid, otherwise [`ToolError::ValidationFailed`] with every message.
    pub fn into_result(self) -> ToolResult<()> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ToolError::ValidationFailed(self.errors))
        }
    }
}

impl Serialize for ValidationReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationReport", 2)?;
        state.serialize_field("isValid", &self.is_valid())?;
        state.serialize_field("errors", &self.errors)?;
        state.end()
    }
}
