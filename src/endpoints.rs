//! Paths of the JIRA REST endpoints, relative to the instance base URL.

pub const FIELD_API_ENDPOINT: &str = "/rest/api/2/field";

pub fn custom_field_endpoint(field_id: &str) -> String {
    format!("{}/{}", FIELD_API_ENDPOINT, field_id)
}

pub fn custom_field_search_endpoint(field_id: &str) -> String {
    format!("{}/search?type=custom&id={}", FIELD_API_ENDPOINT, field_id)
}

pub fn custom_field_context_endpoint(field_id: &str) -> String {
    format!("{}/context", custom_field_endpoint(field_id))
}

pub fn custom_field_context_update_endpoint(field_id: &str, context_id: &str) -> String {
    format!("{}/{}", custom_field_context_endpoint(field_id), context_id)
}

pub fn custom_field_context_options_endpoint(field_id: &str, context_id: &str) -> String {
    format!(
        "{}/option",
        custom_field_context_update_endpoint(field_id, context_id)
    )
}

pub fn custom_field_option_endpoint(field_id: &str, context_id: &str, option_id: &str) -> String {
    format!(
        "{}?optionId={}",
        custom_field_context_options_endpoint(field_id, context_id),
        option_id
    )
}

pub fn custom_field_context_options_delete_endpoint(
    field_id: &str,
    context_id: &str,
    option_id: &str,
) -> String {
    format!(
        "{}/{}",
        custom_field_context_options_endpoint(field_id, context_id),
        option_id
    )
}

pub fn custom_field_context_options_reorder_endpoint(field_id: &str, context_id: &str) -> String {
    format!(
        "{}/move",
        custom_field_context_options_endpoint(field_id, context_id)
    )
}

/// Appends `startAt` to a list endpoint, respecting an existing query string.
pub fn paged(endpoint: &str, start_at: u64) -> String {
    let separator = if endpoint.contains('?') { '&' } else { '?' };
    format!("{}{}startAt={}", endpoint, separator, start_at)
}
