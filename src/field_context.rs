use crate::endpoints::*;
use crate::error::{ErrorContext, JiraError, Result};
use crate::jira_client::{execute, get_all, request, RemoteClient};
use crate::models::{FieldContext, FieldContextRequest};
use crate::resource_id::ContextKey;
use reqwest::Method;

/// Local view of a custom field context, addressed as `<field_id>:<context_id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldContext {
    pub id: String,
    pub field_id: String,
    pub context_id: String,
    pub name: String,
    pub description: String,
    /// Only sent on create; JIRA does not list them with the context.
    pub issue_type_ids: Vec<String>,
    pub project_ids: Vec<String>,
    pub is_any_issue_type: bool,
    pub is_global_context: bool,
}

impl CustomFieldContext {
    pub fn from_remote(field_id: &str, context: &FieldContext) -> Self {
        let mut local = Self::default();
        local.set_context_fields(field_id, context);
        local
    }

    /// Copies the remote context onto this state, keeping the scope lists.
    pub fn set_context_fields(&mut self, field_id: &str, context: &FieldContext) {
        self.id = ContextKey::new(field_id, &context.id).to_string();
        self.field_id = field_id.to_string();
        self.context_id = context.id.clone();
        self.name = context.name.clone();
        self.description = context.description.clone();
        self.is_any_issue_type = context.is_any_issue_type;
        self.is_global_context = context.is_global_context;
    }

    fn create_request(&self) -> FieldContextRequest {
        FieldContextRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            issue_type_ids: self.issue_type_ids.clone(),
            project_ids: self.project_ids.clone(),
        }
    }

    fn update_request(&self) -> FieldContextRequest {
        FieldContextRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            issue_type_ids: Vec::new(),
            project_ids: Vec::new(),
        }
    }
}

pub async fn list<C: RemoteClient>(client: &C, field_id: &str) -> Result<Vec<FieldContext>> {
    get_all(client, &custom_field_context_endpoint(field_id))
        .await
        .context("Fetching Jira Field Contexts failed")
}

/// Picks exactly one context: the one carrying `context_id`, or the field's
/// only context when no id is given.
pub fn select_context<'a>(
    contexts: &'a [FieldContext],
    context_id: Option<&str>,
) -> Result<&'a FieldContext> {
    let candidates: Vec<&FieldContext> = match context_id.filter(|id| !id.is_empty()) {
        Some(id) => contexts.iter().filter(|context| context.id == id).collect(),
        None => contexts.iter().collect(),
    };

    match candidates.as_slice() {
        [only] => Ok(*only),
        _ => Err(JiraError::AmbiguousContext),
    }
}

/// Resolves a context of `field_id` without managing it.
pub async fn lookup<C: RemoteClient>(
    client: &C,
    field_id: &str,
    context_id: Option<&str>,
) -> Result<CustomFieldContext> {
    let contexts = list(client, field_id).await?;
    let found = select_context(&contexts, context_id)?;

    tracing::debug!("Context found(id={}), setting values", found.id);
    Ok(CustomFieldContext::from_remote(field_id, found))
}

pub async fn create<C: RemoteClient>(
    client: &C,
    context: &CustomFieldContext,
) -> Result<CustomFieldContext> {
    let returned: FieldContext = request(
        client,
        Method::POST,
        &custom_field_context_endpoint(&context.field_id),
        Some(&context.create_request()),
    )
    .await
    .context("Creating Jira Field Context failed")?;

    tracing::info!(
        "Created context {} on field {}",
        returned.id,
        context.field_id
    );

    let mut state = context.clone();
    state.set_context_fields(&context.field_id, &returned);

    read(client, &state).await?.ok_or(JiraError::Cardinality {
        what: "Field context",
        found: 0,
    })
}

/// Refreshes `state` from JIRA. `None` means the context no longer exists.
pub async fn read<C: RemoteClient>(
    client: &C,
    state: &CustomFieldContext,
) -> Result<Option<CustomFieldContext>> {
    let key = ContextKey::parse(&state.id)?;
    let contexts = list(client, &key.field_id).await?;

    let Some(context) = contexts.iter().find(|context| context.id == key.context_id) else {
        tracing::warn!("Context {} is gone", state.id);
        return Ok(None);
    };

    tracing::debug!("Context found(id={}), setting values", context.id);
    let mut refreshed = state.clone();
    refreshed.set_context_fields(&key.field_id, context);
    Ok(Some(refreshed))
}

pub async fn update<C: RemoteClient>(
    client: &C,
    state: &CustomFieldContext,
) -> Result<Option<CustomFieldContext>> {
    let key = ContextKey::parse(&state.id)?;
    execute(
        client,
        Method::PUT,
        &custom_field_context_update_endpoint(&key.field_id, &key.context_id),
        Some(&state.update_request()),
    )
    .await
    .context("Updating Jira Field Context failed")?;

    tracing::info!("Updated context {}", state.id);

    read(client, state).await
}

pub async fn delete<C: RemoteClient>(client: &C, id: &str) -> Result<()> {
    let key = ContextKey::parse(id)?;
    execute(
        client,
        Method::DELETE,
        &custom_field_context_update_endpoint(&key.field_id, &key.context_id),
        None::<&()>,
    )
    .await
    .context("Deleting Jira Field Context failed")?;

    tracing::info!("Deleted context {}", id);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Auth, Config, ConsistencyWait};
    use crate::jira_client::JiraClient;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const FIELD: &str = "customfield_10100";

    fn client_for(server: &MockServer) -> JiraClient {
        JiraClient::new(&Config {
            base_url: server.uri(),
            auth: Auth::Bearer("secret".to_string()),
            wait: ConsistencyWait::default(),
        })
        .unwrap()
    }

    fn context(id: &str, name: &str) -> FieldContext {
        FieldContext {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            is_any_issue_type: true,
            is_global_context: false,
        }
    }

    async fn mount_contexts(server: &MockServer, values: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/rest/api/2/field/{FIELD}/context")))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "maxResults": 50, "startAt": 0, "total": 2, "isLast": true,
                "values": values
            })))
            .mount(server)
            .await;
    }

    #[test]
    fn select_by_id_or_single_context() {
        let contexts = vec![context("1", "Default"), context("2", "Projects")];
        assert_eq!(select_context(&contexts, Some("2")).unwrap().name, "Projects");
        assert!(matches!(
            select_context(&contexts, None).unwrap_err(),
            JiraError::AmbiguousContext
        ));
        assert!(matches!(
            select_context(&contexts, Some("3")).unwrap_err(),
            JiraError::AmbiguousContext
        ));

        let single = vec![context("1", "Default")];
        assert_eq!(select_context(&single, None).unwrap().id, "1");
        assert_eq!(select_context(&single, Some("")).unwrap().id, "1");
    }

    #[test]
    fn duplicate_ids_are_ambiguous() {
        let contexts = vec![context("1", "Default"), context("1", "Copy")];
        assert!(select_context(&contexts, Some("1")).is_err());
    }

    #[test]
    fn from_remote_renames_fields() {
        let remote = FieldContext {
            is_global_context: true,
            ..context("10200", "Default")
        };
        let local = CustomFieldContext::from_remote(FIELD, &remote);
        assert_eq!(local.id, "customfield_10100:10200");
        assert_eq!(local.context_id, "10200");
        assert!(local.is_any_issue_type);
        assert!(local.is_global_context);
    }

    #[tokio::test]
    async fn lookup_resolves_named_context() {
        let server = MockServer::start().await;
        mount_contexts(
            &server,
            json!([
                {"id": "10200", "name": "Default", "isAnyIssueType": true, "isGlobalContext": true},
                {"id": "10201", "name": "Bugs only", "isAnyIssueType": false, "isGlobalContext": false}
            ]),
        )
        .await;

        let found = lookup(&client_for(&server), FIELD, Some("10201")).await.unwrap();
        assert_eq!(found.id, "customfield_10100:10201");
        assert_eq!(found.name, "Bugs only");
        assert!(!found.is_any_issue_type);

        let err = lookup(&client_for(&server), FIELD, None).await.unwrap_err();
        assert!(matches!(err.root(), JiraError::AmbiguousContext));
    }

    #[tokio::test]
    async fn create_sets_composite_id_and_keeps_scope() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/rest/api/2/field/{FIELD}/context")))
            .and(body_json(json!({
                "name": "Bugs only",
                "description": "",
                "issueTypeIds": ["10001"]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "id": "10201", "name": "Bugs only", "issueTypeIds": ["10001"]
            })))
            .expect(1)
            .mount(&server)
            .await;
        mount_contexts(
            &server,
            json!([{"id": "10201", "name": "Bugs only", "isAnyIssueType": false, "isGlobalContext": false}]),
        )
        .await;

        let desired = CustomFieldContext {
            field_id: FIELD.to_string(),
            name: "Bugs only".to_string(),
            issue_type_ids: vec!["10001".to_string()],
            ..Default::default()
        };
        let created = create(&client_for(&server), &desired).await.unwrap();
        assert_eq!(created.id, "customfield_10100:10201");
        assert_eq!(created.context_id, "10201");
        assert_eq!(created.issue_type_ids, vec!["10001".to_string()]);
    }

    #[tokio::test]
    async fn read_reports_missing_context() {
        let server = MockServer::start().await;
        mount_contexts(&server, json!([{"id": "10200", "name": "Default"}])).await;

        let state = CustomFieldContext {
            id: "customfield_10100:99999".to_string(),
            ..Default::default()
        };
        assert_eq!(read(&client_for(&server), &state).await.unwrap(), None);
    }

    #[tokio::test]
    async fn malformed_id_fails_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(0)
            .mount(&server)
            .await;

        let state = CustomFieldContext {
            id: "customfield_10100".to_string(),
            ..Default::default()
        };
        let err = update(&client_for(&server), &state).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "ID is incorrectly formatted. Expected format is `field_id:context_id`"
        );
    }

    #[tokio::test]
    async fn update_sends_name_and_description_only() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/rest/api/2/field/{FIELD}/context/10200")))
            .and(body_json(json!({"name": "Renamed", "description": "All issues"})))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        mount_contexts(
            &server,
            json!([{"id": "10200", "name": "Renamed", "description": "All issues"}]),
        )
        .await;

        let state = CustomFieldContext {
            id: "customfield_10100:10200".to_string(),
            field_id: FIELD.to_string(),
            context_id: "10200".to_string(),
            name: "Renamed".to_string(),
            description: "All issues".to_string(),
            project_ids: vec!["10000".to_string()],
            ..Default::default()
        };
        let updated = update(&client_for(&server), &state).await.unwrap().unwrap();
        assert_eq!(updated.name, "Renamed");
        assert_eq!(updated.project_ids, vec!["10000".to_string()]);
    }
}
