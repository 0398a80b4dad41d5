use serde::{Deserialize, Serialize};

/// The paged envelope JIRA wraps list responses in.
#[derive(Deserialize, Debug, Clone)]
pub struct Page<T> {
    #[serde(rename = "maxResults", default)]
    pub max_results: u64,
    #[serde(rename = "startAt", default)]
    pub start_at: u64,
    #[serde(default)]
    pub total: u64,
    #[serde(rename = "isLast", default = "default_is_last")]
    pub is_last: bool,
    #[serde(default = "Vec::new")]
    pub values: Vec<T>,
}

fn default_is_last() -> bool {
    true
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub field_type: String,
    #[serde(rename = "searcherKey", skip_serializing_if = "String::is_empty")]
    pub searcher_key: String,
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldSchema {
    #[serde(rename = "type", default)]
    pub schema_type: String,
    #[serde(default)]
    pub items: String,
    #[serde(default)]
    pub custom: String,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "searcherKey", default)]
    pub searcher_key: String,
    #[serde(default)]
    pub schema: FieldSchema,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldContextRequest {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub description: String,
    #[serde(rename = "issueTypeIds", skip_serializing_if = "Vec::is_empty")]
    pub issue_type_ids: Vec<String>,
    #[serde(rename = "projectIds", skip_serializing_if = "Vec::is_empty")]
    pub project_ids: Vec<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FieldContext {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "isAnyIssueType", default)]
    pub is_any_issue_type: bool,
    #[serde(rename = "isGlobalContext", default)]
    pub is_global_context: bool,
}

/// One selectable value of a choice field within a context.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOption {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub value: String,
    /// Sent even when false; `false` re-enables an option on update.
    #[serde(default)]
    pub disabled: bool,
    #[serde(rename = "optionId", default, skip_serializing_if = "Option::is_none")]
    pub option_id: Option<String>,
}

impl FieldOption {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            ..Default::default()
        }
    }

    pub fn with_id(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            value: value.into(),
            ..Default::default()
        }
    }
}

/// Batch body for creating or updating options, also the shape JIRA answers with.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldOptions {
    #[serde(default)]
    pub options: Vec<FieldOption>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReorderPosition {
    First,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ReorderFieldOptionsRequest {
    pub position: ReorderPosition,
    #[serde(rename = "customFieldOptionIds")]
    pub custom_field_option_ids: Vec<String>,
}
