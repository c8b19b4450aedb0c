
use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::status::Status;
use crate::services::base::status::owner_conflict_details::OwnerConflictDetails;
use anyhow::anyhow;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::OwnerReference;
use kube::Resource;

/// Returns the controller reference of the object, if any.
pub fn get_controller_of<R>(object: &R) -> Option<&OwnerReference>
where
    R: Resource,
{
    object
        .meta()
        .owner_references
        .iter()
        .flatten()
        .find(|owner| owner.controller == Some(true))
}

/// Builds a controller reference pointing at `owner`. The owner must have been persisted
/// (name and uid set).
pub fn controller_reference_to<O>(owner: &O) -> Result<OwnerReference, Status>
where
    O: Resource<DynamicType = ()>,
{
    let reference = owner.controller_owner_ref(&()).ok_or_else(|| {
        Status::InvalidObject(anyhow!(
            "{} {:?} has no name or uid and cannot own other objects",
            O::kind(&()),
            owner.meta().name
        ))
    })?;
    Ok(OwnerReference {
        block_owner_deletion: Some(true),
        ..reference
    })
}

/// Ensures `object` carries `reference` as its controller reference.
///
/// Returns `false` when the reference is already present, and `Status::NotOwned` when a
/// different owner already controls the object.
pub fn set_controller_reference<R>(object: &mut R, reference: OwnerReference) -> Result<bool, Status>
where
    R: Resource,
{
    if let Some(current) = get_controller_of(object) {
        if current.uid == reference.uid {
            return Ok(false);
        }
        let metadata = object.meta();
        let details = OwnerConflictDetails::new(metadata.name.clone().unwrap_or_default(), metadata.namespace.clone())
            .with_owner(Some(format!("{}/{}", current.kind, current.name)));
        return Err(Status::NotOwned(details));
    }

    let owners = object.meta_mut().owner_references.get_or_insert_with(Vec::new);
    // A non-controller reference to the same owner is upgraded in place
    owners.retain(|owner| owner.uid != reference.uid);
    owners.push(reference);
    Ok(true)
}

/// Maps an owned object back to the key of its controlling owner of kind `O`.
pub fn owner_key_of<O, R>(object: &R) -> Option<ReconcileKey>
where
    O: Resource<DynamicType = ()>,
    R: Resource,
{
    let owner = get_controller_of(object)?;
    if owner.kind != O::kind(&()) || owner.api_version != O::api_version(&()) {
        return None;
    }
    let namespace = object.meta().namespace.as_deref()?;
    Some(ReconcileKey::new(namespace, &owner.name))
}
