//! Declarative management of JIRA custom fields, their contexts and their
//! select options over the JIRA REST API.
//!
//! Every operation takes the [`RemoteClient`] to talk through explicitly.
//! [`field_options::reconcile`] is the entry point for keeping a context's
//! option list in line with a desired list.

pub mod config;
pub mod custom_field;
pub mod endpoints;
pub mod error;
pub mod field_context;
pub mod field_option;
pub mod field_options;
pub mod jira_client;
pub mod manifest;
pub mod models;
pub mod reconcile;
pub mod resource_id;

pub use config::{Auth, Config, ConsistencyWait};
pub use error::{ErrorContext, JiraError, Result};
pub use jira_client::{JiraClient, RemoteClient};
pub use manifest::OptionsManifest;
pub use models::FieldOption;
pub use reconcile::{plan, ReconcilePlan};
