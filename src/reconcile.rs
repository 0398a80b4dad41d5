//! Option-list reconciliation.
//!
//! A desired option matches a remote option when their values are equal or
//! when the desired option carries the remote option's id. The first remote
//! option in list order wins; with duplicate remote values the pairing is
//! whatever the remote order dictates.

use crate::error::{JiraError, Result};
use crate::models::FieldOption;

/// What has to happen remotely to turn the remote list into the desired one.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReconcilePlan {
    /// Desired options with no remote counterpart, in desired order.
    pub to_create: Vec<FieldOption>,
    /// Desired options that matched, carrying the remote id.
    pub to_update: Vec<FieldOption>,
    /// Remote options no desired option matches.
    pub to_delete: Vec<FieldOption>,
}

impl ReconcilePlan {
    pub fn is_noop(&self) -> bool {
        self.to_create.is_empty() && self.to_update.is_empty() && self.to_delete.is_empty()
    }
}

pub fn matches(desired: &FieldOption, remote: &FieldOption) -> bool {
    if remote.value == desired.value {
        return true;
    }
    match (&desired.id, &remote.id) {
        (Some(desired_id), Some(remote_id)) => !desired_id.is_empty() && desired_id == remote_id,
        _ => false,
    }
}

pub fn find_match<'a>(desired: &FieldOption, remote: &'a [FieldOption]) -> Option<&'a FieldOption> {
    remote.iter().find(|candidate| matches(desired, candidate))
}

/// Partitions `desired` against `remote`.
///
/// An empty desired list plans nothing at all, so a missing list never wipes
/// a context's options. Options to create never carry an id, and each remote
/// option may be matched by at most one desired option.
pub fn plan(desired: &[FieldOption], remote: &[FieldOption]) -> Result<ReconcilePlan> {
    let mut result = ReconcilePlan::default();
    if desired.is_empty() {
        return Ok(result);
    }
    if remote.is_empty() {
        result.to_create = desired.iter().map(without_id).collect();
        return Ok(result);
    }

    let mut claimed = vec![false; remote.len()];
    for option in desired {
        match remote.iter().position(|candidate| matches(option, candidate)) {
            Some(index) if claimed[index] => {
                return Err(JiraError::DuplicateMatch {
                    id: remote[index].id.clone().unwrap_or_default(),
                });
            }
            Some(index) => {
                claimed[index] = true;
                result.to_update.push(FieldOption {
                    id: remote[index].id.clone(),
                    ..option.clone()
                });
            }
            None => result.to_create.push(without_id(option)),
        }
    }

    result.to_delete = remote
        .iter()
        .filter(|existing| !desired.iter().any(|option| matches(option, existing)))
        .cloned()
        .collect();

    Ok(result)
}

/// A stale id must never reach the create request.
fn without_id(option: &FieldOption) -> FieldOption {
    FieldOption {
        id: None,
        ..option.clone()
    }
}

/// Resolves every desired option against the re-fetched remote list.
///
/// Returns the desired options with their remote ids, in desired order.
pub fn resolve_ids(desired: &[FieldOption], refreshed: &[FieldOption]) -> Result<Vec<FieldOption>> {
    desired
        .iter()
        .map(|option| {
            find_match(option, refreshed)
                .and_then(|existing| existing.id.clone())
                .filter(|id| !id.is_empty())
                .map(|id| FieldOption {
                    id: Some(id),
                    ..option.clone()
                })
                .ok_or_else(|| JiraError::UnmatchedOption {
                    value: option.value.clone(),
                })
        })
        .collect()
}

/// The id sequence for the reorder request, in desired order.
pub fn final_order(desired: &[FieldOption], refreshed: &[FieldOption]) -> Result<Vec<String>> {
    Ok(resolve_ids(desired, refreshed)?
        .into_iter()
        .filter_map(|option| option.id)
        .collect())
}
