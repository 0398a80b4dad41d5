//! Declarative description of the options a field context should have.

use crate::error::{JiraError, Result};
use crate::models::FieldOption;
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct OptionsManifest {
    pub field_id: String,
    pub context_id: String,
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

impl OptionsManifest {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::parse(&raw)
    }

    pub fn parse(raw: &str) -> Result<Self> {
        let manifest: Self = serde_json::from_str(raw)?;
        manifest.validate()?;
        Ok(manifest)
    }

    /// Values and ids are the matching keys during reconciliation, so they must be unique.
    fn validate(&self) -> Result<()> {
        if self.field_id.is_empty() || self.context_id.is_empty() {
            return Err(JiraError::InvalidManifest(
                "field_id and context_id are required".to_string(),
            ));
        }

        let mut seen = HashSet::new();
        let mut seen_ids = HashSet::new();
        for option in &self.options {
            if option.value.trim().is_empty() {
                return Err(JiraError::InvalidManifest("option value is empty".to_string()));
            }
            if !seen.insert(option.value.as_str()) {
                return Err(JiraError::InvalidManifest(format!(
                    "option `{}` is listed twice",
                    option.value
                )));
            }
            if let Some(id) = option.id.as_deref().filter(|id| !id.is_empty()) {
                if !seen_ids.insert(id) {
                    return Err(JiraError::InvalidManifest(format!(
                        "option id `{}` is listed twice",
                        id
                    )));
                }
            }
        }
        Ok(())
    }
}
