use crate::config::ConsistencyWait;
use crate::endpoints::*;
use crate::error::{ErrorContext, JiraError, Result};
use crate::jira_client::{execute, request, RemoteClient};
use crate::models::{Field, FieldRequest, Page};
use reqwest::Method;

/// Local view of a JIRA custom field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomField {
    pub id: String,
    pub name: String,
    /// Custom field type key, e.g. `com.atlassian.jira.plugin.system.customfieldtypes:select`.
    pub field_type: String,
    pub description: String,
    pub searcher_key: String,
}

impl CustomField {
    pub fn from_remote(field: &Field) -> Self {
        Self {
            id: field.id.clone(),
            name: field.name.clone(),
            field_type: field.schema.custom.clone(),
            description: field.description.clone(),
            searcher_key: field.searcher_key.clone(),
        }
    }

    fn create_request(&self) -> FieldRequest {
        FieldRequest {
            name: self.name.clone(),
            description: self.description.clone(),
            field_type: self.field_type.clone(),
            searcher_key: self.searcher_key.clone(),
        }
    }

    /// The type of a field cannot change after creation.
    fn update_request(&self) -> FieldRequest {
        FieldRequest {
            field_type: String::new(),
            ..self.create_request()
        }
    }
}

/// Looks a custom field up by id; the search must return exactly one field.
pub async fn get_custom_field_by_id<C: RemoteClient>(client: &C, id: &str) -> Result<Field> {
    let page: Page<Field> = request(client, Method::GET, &custom_field_search_endpoint(id), None::<&()>)
        .await
        .context("Custom field lookup failed")?;

    if page.total != 1 || page.values.len() != 1 {
        return Err(JiraError::Cardinality {
            what: "Custom field",
            found: page.total.max(page.values.len() as u64) as usize,
        });
    }

    page.values
        .into_iter()
        .next()
        .ok_or(JiraError::Cardinality {
            what: "Custom field",
            found: 0,
        })
}

pub async fn read<C: RemoteClient>(client: &C, id: &str) -> Result<CustomField> {
    let field = get_custom_field_by_id(client, id)
        .await
        .context("Getting jira field failed")?;

    tracing::debug!("Read custom field (id={})", field.id);
    Ok(CustomField::from_remote(&field))
}

/// Creates the field, then waits for JIRA to serve it back.
pub async fn create<C: RemoteClient>(
    client: &C,
    wait: &ConsistencyWait,
    field: &CustomField,
) -> Result<CustomField> {
    let created: Field = request(
        client,
        Method::POST,
        FIELD_API_ENDPOINT,
        Some(&field.create_request()),
    )
    .await
    .context("Creating custom field failed")?;

    tracing::info!("Created new custom field: {}", created.id);

    read_until_consistent(client, wait, &created.id).await
}

async fn read_until_consistent<C: RemoteClient>(
    client: &C,
    wait: &ConsistencyWait,
    id: &str,
) -> Result<CustomField> {
    let attempts = wait.attempts.max(1);
    let mut made = 0;

    let polling = async {
        loop {
            made += 1;
            match read(client, id).await {
                Ok(field) => return Some(field),
                Err(err) if made < attempts => {
                    tracing::warn!(attempt = made, "Custom field {} not readable yet: {}", id, err);
                    tokio::time::sleep(wait.interval).await;
                }
                Err(err) => {
                    tracing::warn!(attempt = made, "Giving up on custom field {}: {}", id, err);
                    return None;
                }
            }
        }
    };

    let outcome = tokio::time::timeout(wait.timeout, polling).await;
    match outcome {
        Ok(Some(field)) => Ok(field),
        Ok(None) | Err(_) => Err(JiraError::NotYetConsistent {
            resource: "Custom field",
            id: id.to_string(),
            attempts: made,
        }),
    }
}

pub async fn update<C: RemoteClient>(client: &C, field: &CustomField) -> Result<CustomField> {
    execute(
        client,
        Method::PUT,
        &custom_field_endpoint(&field.id),
        Some(&field.update_request()),
    )
    .await
    .context("Update custom field request failed")?;

    tracing::info!("Updated custom field: {}", field.id);

    read(client, &field.id).await
}

pub async fn delete<C: RemoteClient>(client: &C, id: &str) -> Result<()> {
    execute(client, Method::DELETE, &custom_field_endpoint(id), None::<&()>)
        .await
        .context("Deleting custom field failed")?;

    tracing::info!("Deleted custom field: {}", id);
    Ok(())
}
