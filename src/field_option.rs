use crate::endpoints::*;
use crate::error::{ErrorContext, JiraError, Result};
use crate::jira_client::{execute, request, RemoteClient};
use crate::models::{FieldOption, FieldOptions, Page};
use reqwest::Method;

/// A single option of a field context, managed on its own.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldOption {
    /// Empty until JIRA assigns one.
    pub id: String,
    pub field_id: String,
    pub context_id: String,
    pub value: String,
    pub disabled: bool,
    /// Parent option of a cascading select.
    pub option_id: Option<String>,
}

impl CustomFieldOption {
    fn to_remote(&self) -> FieldOption {
        FieldOption {
            id: Some(self.id.clone()).filter(|id| !id.is_empty()),
            value: self.value.clone(),
            disabled: self.disabled,
            option_id: self.option_id.clone().filter(|id| !id.is_empty()),
        }
    }

    fn set_option_fields(&mut self, option: &FieldOption) {
        if let Some(id) = &option.id {
            self.id = id.clone();
        }
        self.value = option.value.clone();
        self.disabled = option.disabled;
        self.option_id = option.option_id.clone();
    }
}

pub async fn create<C: RemoteClient>(
    client: &C,
    option: &CustomFieldOption,
) -> Result<CustomFieldOption> {
    let body = FieldOptions {
        options: vec![FieldOption {
            id: None,
            ..option.to_remote()
        }],
    };
    tracing::debug!("Creating new option: {:?}", body);

    let created: FieldOptions = request(
        client,
        Method::POST,
        &custom_field_context_options_endpoint(&option.field_id, &option.context_id),
        Some(&body),
    )
    .await
    .context("Creating Jira Field Option failed")?;

    let id = created
        .options
        .into_iter()
        .find_map(|created| created.id)
        .ok_or(JiraError::Cardinality {
            what: "Created option",
            found: 0,
        })?;
    tracing::info!("Created option {} ({})", id, option.value);

    let mut state = option.clone();
    state.id = id;
    read(client, &state).await
}

pub async fn read<C: RemoteClient>(
    client: &C,
    state: &CustomFieldOption,
) -> Result<CustomFieldOption> {
    let page: Page<FieldOption> = request(
        client,
        Method::GET,
        &custom_field_option_endpoint(&state.field_id, &state.context_id, &state.id),
        None::<&()>,
    )
    .await
    .context("Fetching Jira Option failed")?;

    let [option] = page.values.as_slice() else {
        return Err(JiraError::Cardinality {
            what: "Field option",
            found: page.values.len(),
        });
    };

    let mut refreshed = state.clone();
    refreshed.set_option_fields(option);
    Ok(refreshed)
}

pub async fn update<C: RemoteClient>(
    client: &C,
    state: &CustomFieldOption,
) -> Result<CustomFieldOption> {
    let body = FieldOptions {
        options: vec![state.to_remote()],
    };
    tracing::info!("Updating existing option: {:?}", body);

    execute(
        client,
        Method::PUT,
        &custom_field_context_options_endpoint(&state.field_id, &state.context_id),
        Some(&body),
    )
    .await
    .context("Updating Jira Field Option failed")?;

    read(client, state).await
}

pub async fn delete<C: RemoteClient>(client: &C, state: &CustomFieldOption) -> Result<()> {
    execute(
        client,
        Method::DELETE,
        &custom_field_context_options_delete_endpoint(&state.field_id, &state.context_id, &state.id),
        None::<&()>,
    )
    .await
    .context("Deleting Jira Field Context Option failed")?;

    tracing::info!("Deleted option {}", state.id);
    Ok(())
}
