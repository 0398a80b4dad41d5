//! The ordered option list of a field context.
//!
//! JIRA has no "option list" object: the list is the set of options under a
//! context plus their order. Deleting the list is therefore a no-op.

use crate::endpoints::*;
use crate::error::{ErrorContext, Result};
use crate::jira_client::{execute, get_all, RemoteClient};
use crate::models::{FieldOption, FieldOptions, ReorderFieldOptionsRequest, ReorderPosition};
use crate::reconcile::{final_order, plan};
use crate::resource_id::OptionListKey;
use itertools::Itertools;
use reqwest::Method;

/// Id-only view of a context's options, addressed as `<field_id>-<context_id>`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomFieldOptions {
    pub id: String,
    pub field_id: String,
    pub context_id: String,
    pub option_ids: Vec<String>,
}

pub async fn fetch<C: RemoteClient>(
    client: &C,
    field_id: &str,
    context_id: &str,
) -> Result<Vec<FieldOption>> {
    get_all(client, &custom_field_context_options_endpoint(field_id, context_id))
        .await
        .context("Fetching Jira Field Context Options failed")
}

async fn reorder<C: RemoteClient>(
    client: &C,
    field_id: &str,
    context_id: &str,
    option_ids: Vec<String>,
) -> Result<()> {
    let body = ReorderFieldOptionsRequest {
        position: ReorderPosition::First,
        custom_field_option_ids: option_ids,
    };
    tracing::info!(
        "Sending reorder request: {}",
        body.custom_field_option_ids.iter().join(",")
    );

    execute(
        client,
        Method::PUT,
        &custom_field_context_options_reorder_endpoint(field_id, context_id),
        Some(&body),
    )
    .await
    .context("Reordering Jira Field Context Options failed")?;
    Ok(())
}

async fn delete_option<C: RemoteClient>(
    client: &C,
    field_id: &str,
    context_id: &str,
    option: &FieldOption,
) -> Result<()> {
    let option_id = option.id.as_deref().unwrap_or_default();
    tracing::info!("Deleting option: {} ({})", option_id, option.value);

    execute(
        client,
        Method::DELETE,
        &custom_field_context_options_delete_endpoint(field_id, context_id, option_id),
        None::<&()>,
    )
    .await
    .context("Deleting Jira Field Context Option failed")?;
    Ok(())
}

/// Makes the context's options equal to `desired`, in order.
///
/// Returns `desired` with every option carrying its remote id. Any failing
/// step aborts the run; earlier steps stay applied.
pub async fn reconcile<C: RemoteClient>(
    client: &C,
    field_id: &str,
    context_id: &str,
    desired: &[FieldOption],
) -> Result<Vec<FieldOption>> {
    if desired.is_empty() {
        tracing::info!("No desired options for {}:{}, leaving context untouched", field_id, context_id);
        return Ok(Vec::new());
    }

    let remote = fetch(client, field_id, context_id).await?;
    let plan = plan(desired, &remote).context("Planning option changes failed")?;
    tracing::info!(
        create = plan.to_create.len(),
        update = plan.to_update.len(),
        delete = plan.to_delete.len(),
        "Reconciling options of {}:{}",
        field_id,
        context_id
    );

    let endpoint = custom_field_context_options_endpoint(field_id, context_id);

    if !plan.to_create.is_empty() {
        let body = FieldOptions {
            options: plan.to_create.clone(),
        };
        tracing::debug!("Creating options: {:?}", body);
        execute(client, Method::POST, &endpoint, Some(&body))
            .await
            .context("Creating Jira Field Options failed")?;
    }

    if !plan.to_update.is_empty() {
        let body = FieldOptions {
            options: plan.to_update.clone(),
        };
        tracing::debug!("Updating options: {:?}", body);
        execute(client, Method::PUT, &endpoint, Some(&body))
            .await
            .context("Updating Jira Field Options failed")?;
    }

    for option in &plan.to_delete {
        delete_option(client, field_id, context_id, option).await?;
    }

    let refreshed = fetch(client, field_id, context_id).await?;
    let order = final_order(desired, &refreshed)
        .context("Resolving option ids after update failed")?;
    let resolved: Vec<FieldOption> = desired
        .iter()
        .zip(&order)
        .map(|(option, id)| FieldOption {
            id: Some(id.clone()),
            ..option.clone()
        })
        .collect();

    reorder(client, field_id, context_id, order).await?;

    Ok(resolved)
}

pub async fn create<C: RemoteClient>(
    client: &C,
    options: &CustomFieldOptions,
) -> Result<CustomFieldOptions> {
    let mut state = options.clone();
    state.id = OptionListKey::new(&options.field_id, &options.context_id).to_string();
    update(client, &state).await
}

pub async fn read<C: RemoteClient>(client: &C, id: &str) -> Result<CustomFieldOptions> {
    let key = OptionListKey::parse(id)?;
    let current = fetch(client, &key.field_id, &key.context_id).await?;

    Ok(CustomFieldOptions {
        id: key.to_string(),
        option_ids: current.into_iter().filter_map(|option| option.id).collect(),
        field_id: key.field_id,
        context_id: key.context_id,
    })
}

/// Deletes every remote option not listed, then orders the listed ones first.
pub async fn update<C: RemoteClient>(
    client: &C,
    options: &CustomFieldOptions,
) -> Result<CustomFieldOptions> {
    let (field_id, context_id) = (&options.field_id, &options.context_id);
    let current = fetch(client, field_id, context_id).await?;

    for option in &current {
        let listed = option
            .id
            .as_ref()
            .is_some_and(|id| options.option_ids.contains(id));
        if !listed {
            delete_option(client, field_id, context_id, option).await?;
        }
    }

    if !options.option_ids.is_empty() {
        reorder(client, field_id, context_id, options.option_ids.clone()).await?;
    }

    read(client, &options.id).await
}

pub async fn delete<C: RemoteClient>(_client: &C, id: &str) -> Result<()> {
    tracing::debug!("Dropping option list {} without touching JIRA", id);
    Ok(())
}
