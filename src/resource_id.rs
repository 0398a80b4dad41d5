//! Composite local identifiers for resources that JIRA addresses by two keys.

use crate::error::{JiraError, Result};
use std::fmt;

/// `<field_id>:<context_id>`, the handle of a field context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextKey {
    pub field_id: String,
    pub context_id: String,
}

impl ContextKey {
    pub const FORMAT: &'static str = "field_id:context_id";

    pub fn new(field_id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            context_id: context_id.into(),
        }
    }

    pub fn parse(id: &str) -> Result<Self> {
        let malformed = || JiraError::MalformedId {
            expected: Self::FORMAT,
        };
        let parts: Vec<&str> = id.split(':').collect();
        match parts.as_slice() {
            [field_id, context_id] if !field_id.is_empty() && !context_id.is_empty() => {
                Ok(Self::new(*field_id, *context_id))
            }
            _ => Err(malformed()),
        }
    }
}

impl fmt::Display for ContextKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.field_id, self.context_id)
    }
}

/// `<field_id>-<context_id>`, the handle of a context's option list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionListKey {
    pub field_id: String,
    pub context_id: String,
}

impl OptionListKey {
    pub const FORMAT: &'static str = "field_id-context_id";

    pub fn new(field_id: impl Into<String>, context_id: impl Into<String>) -> Self {
        Self {
            field_id: field_id.into(),
            context_id: context_id.into(),
        }
    }

    /// Context ids are numeric, so the last hyphen separates the two keys.
    pub fn parse(id: &str) -> Result<Self> {
        match id.rsplit_once('-') {
            Some((field_id, context_id)) if !field_id.is_empty() && !context_id.is_empty() => {
                Ok(Self::new(field_id, context_id))
            }
            _ => Err(JiraError::MalformedId {
                expected: Self::FORMAT,
            }),
        }
    }
}

impl fmt::Display for OptionListKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.field_id, self.context_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn context_key_parses_and_formats() {
        let key = ContextKey::parse("customfield_10100:10200").unwrap();
        assert_eq!(key, ContextKey::new("customfield_10100", "10200"));
        assert_eq!(key.to_string(), "customfield_10100:10200");
    }

    #[test]
    fn context_key_rejects_malformed_ids() {
        for id in ["", "customfield_10100", ":10200", "customfield_10100:", "a:b:c"] {
            let err = ContextKey::parse(id).unwrap_err();
            assert_eq!(
                err.to_string(),
                "ID is incorrectly formatted. Expected format is `field_id:context_id`",
                "id {:?}",
                id
            );
        }
    }

    #[test]
    fn option_list_key_splits_on_last_hyphen() {
        let key = OptionListKey::parse("customfield_10100-10200").unwrap();
        assert_eq!(key.field_id, "customfield_10100");
        assert_eq!(key.context_id, "10200");
        assert_eq!(key.to_string(), "customfield_10100-10200");

        assert!(matches!(
            OptionListKey::parse("customfield_10100").unwrap_err(),
            JiraError::MalformedId { expected: "field_id-context_id" }
        ));
    }
}
