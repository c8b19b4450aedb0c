use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::status::Status;
use async_trait::async_trait;

#[async_trait]
/// Represents a keyed store of namespaced objects of a single kind with optimistic concurrency
pub trait ObjectStore<R>: Send + Sync
where
    R: Send + Sync,
{
    /// Retrieves the current version of an object, `Status::NotFound` if it does not exist
    async fn get(&self, key: &ReconcileKey) -> Result<R, Status>;

    /// Creates a new object, `Status::AlreadyExists` if the key is taken
    async fn create(&self, object: R) -> Result<R, Status>;

    /// Replaces an object; the resource version carried by `object` must match the stored one,
    /// `Status::Conflict` otherwise
    async fn update(&self, object: R) -> Result<R, Status>;
}

#[async_trait]
/// Represents a store that objects can be deleted from
pub trait CanDelete<R>: Send + Sync {
    async fn delete(&self, key: &ReconcileKey) -> Result<(), Status>;
}
