//! Resource lifecycle handlers
//!
//! The four CRUD handlers plus import, driven by a resource definition
//! from the registry. Each handler performs exactly one client call and
//! maps between attribute state and the request/response payload. A 404 on
//! read or import is a state transition (present to absent), never an
//! error; every other failure aborts the operation and propagates to the
//! host unchanged.

use super::registry::ResourceDef;
use super::state::{plan, AttrMap, InstanceState};
use crate::api::client::{ApiClient, RemoteResource};
use crate::api::error::ApiError;
use anyhow::{Context, Result};
use serde_json::Value;

/// Create a resource from desired configuration
///
/// Sends the full effective configuration (defaults applied) and stores
/// the remote-assigned id plus returned attributes, including any fields
/// the server computed.
pub async fn create(
    client: &ApiClient,
    def: &ResourceDef,
    config: &AttrMap,
) -> Result<InstanceState> {
    let diff = plan(def, None, config)?;
    tracing::debug!(
        "Creating {} with {} attributes",
        def.display_name,
        diff.changes.len()
    );

    let remote = client
        .create(&def.collection_path, &Value::Object(diff.changes))
        .await
        .with_context(|| format!("Failed to create {}", def.display_name))?;

    Ok(into_state(remote))
}

/// Refresh a present instance from the remote API
///
/// Returns `Ok(None)` when the remote resource no longer exists, so the
/// host clears state instead of reporting an error.
pub async fn read(
    client: &ApiClient,
    def: &ResourceDef,
    state: &InstanceState,
) -> Result<Option<InstanceState>> {
    import(client, def, &state.id).await
}

/// Update a present instance towards desired configuration
///
/// Only the changed attributes are sent; when nothing changed the call is
/// skipped entirely. Attributes absent from the delta, notably previously
/// computed values, survive on the server and in state.
pub async fn update(
    client: &ApiClient,
    def: &ResourceDef,
    prior: &InstanceState,
    config: &AttrMap,
) -> Result<InstanceState> {
    let diff = plan(def, Some(prior), config)?;
    if diff.is_empty() {
        tracing::debug!("No changes for {} {}", def.display_name, prior.id);
        return Ok(prior.clone());
    }

    tracing::debug!(
        "Updating {} {} with {} changed attributes",
        def.display_name,
        prior.id,
        diff.changes.len()
    );

    let remote = client
        .update(&def.collection_path, &prior.id, &Value::Object(diff.changes))
        .await
        .with_context(|| format!("Failed to update {} {}", def.display_name, prior.id))?;

    let mut next = prior.clone();
    next.merge_attributes(&remote.attributes);
    Ok(next)
}

/// Delete a present instance
///
/// A 404 means the resource is already gone, which is the desired outcome.
pub async fn delete(client: &ApiClient, def: &ResourceDef, state: &InstanceState) -> Result<()> {
    tracing::debug!("Deleting {} {}", def.display_name, state.id);

    match client.delete(&def.collection_path, &state.id).await {
        Ok(()) => Ok(()),
        Err(ApiError::NotFound) => {
            tracing::debug!("{} {} already absent", def.display_name, state.id);
            Ok(())
        }
        Err(e) => {
            Err(e).with_context(|| format!("Failed to delete {} {}", def.display_name, state.id))
        }
    }
}

/// Reconstruct full state from an externally supplied id
pub async fn import(
    client: &ApiClient,
    def: &ResourceDef,
    id: &str,
) -> Result<Option<InstanceState>> {
    match client.get(&def.collection_path, id).await {
        Ok(remote) => Ok(Some(into_state(remote))),
        Err(ApiError::NotFound) => {
            tracing::debug!("{} {} not found remotely", def.display_name, id);
            Ok(None)
        }
        Err(e) => Err(e).with_context(|| format!("Failed to read {} {}", def.display_name, id)),
    }
}

fn into_state(remote: RemoteResource) -> InstanceState {
    InstanceState::new(remote.id, remote.attributes)
}
