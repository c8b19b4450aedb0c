
use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::object_store::{CanDelete, ObjectStore};
use crate::services::base::status::Status;
use crate::services::base::status::resource_details::ResourceDetails;
use anyhow::anyhow;
use async_trait::async_trait;
use kube::Resource;
use log::debug;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Store-side garbage collection of objects owned by a deleted owner.
#[async_trait]
pub trait OwnerCascade: Send + Sync {
    async fn collect_owned_by(&self, owner_uid: &str);
}

/// In-memory object store with resource versions, uid assignment and owner-reference cascade.
/// Counts mutating calls so callers can assert on write amplification.
pub struct InMemoryObjectStore<R> {
    objects: RwLock<HashMap<ReconcileKey, R>>,
    resource_version: AtomicU64,
    pending_failures: AtomicUsize,
    create_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    dependents: Vec<Arc<dyn OwnerCascade>>,
}

impl<R> InMemoryObjectStore<R>
where
    R: Resource + Clone + Debug + Send + Sync + 'static,
{
    pub fn new() -> Self {
        InMemoryObjectStore {
            objects: RwLock::new(HashMap::new()),
            resource_version: AtomicU64::new(0),
            pending_failures: AtomicUsize::new(0),
            create_calls: AtomicUsize::new(0),
            update_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            dependents: Vec::new(),
        }
    }

    /// Registers a store whose objects are garbage-collected when their owner is deleted here
    pub fn with_dependent(mut self, dependent: Arc<dyn OwnerCascade>) -> Self {
        self.dependents.push(dependent);
        self
    }

    /// Makes the next `count` calls fail with `Status::Unavailable`
    pub fn fail_next(&self, count: usize) {
        self.pending_failures.store(count, Ordering::SeqCst);
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.create_calls() + self.update_calls() + self.delete_calls()
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    fn check_availability(&self) -> Result<(), Status> {
        let injected = self
            .pending_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |remaining| remaining.checked_sub(1));
        match injected {
            Ok(_) => Err(Status::Unavailable("injected store failure".to_string())),
            Err(_) => Ok(()),
        }
    }

    fn next_version(&self) -> String {
        (self.resource_version.fetch_add(1, Ordering::SeqCst) + 1).to_string()
    }

    fn key_of(object: &R) -> Result<ReconcileKey, Status> {
        ReconcileKey::from_resource(object)
            .ok_or_else(|| Status::InvalidObject(anyhow!("Object name and namespace are required: {:?}", object)))
    }
}

impl<R> Default for InMemoryObjectStore<R>
where
    R: Resource + Clone + Debug + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R> ObjectStore<R> for InMemoryObjectStore<R>
where
    R: Resource + Clone + Debug + Send + Sync + 'static,
{
    async fn get(&self, key: &ReconcileKey) -> Result<R, Status> {
        self.check_availability()?;
        let read_guard = self.objects.read().await;
        match (*read_guard).get(key) {
            Some(object) => Ok(object.clone()),
            None => Err(Status::NotFound(ResourceDetails::from(key))),
        }
    }

    async fn create(&self, object: R) -> Result<R, Status> {
        self.check_availability()?;
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let key = Self::key_of(&object)?;

        let mut write_guard = self.objects.write().await;
        if (*write_guard).contains_key(&key) {
            return Err(Status::AlreadyExists(ResourceDetails::from(&key)));
        }
        let mut stored = object;
        let metadata = stored.meta_mut();
        metadata.uid.get_or_insert_with(|| Uuid::new_v4().to_string());
        metadata.resource_version = Some(self.next_version());
        debug!("Created object {}", key);
        (*write_guard).insert(key, stored.clone());
        Ok(stored)
    }

    async fn update(&self, object: R) -> Result<R, Status> {
        self.check_availability()?;
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let key = Self::key_of(&object)?;

        let mut write_guard = self.objects.write().await;
        let current = (*write_guard)
            .get(&key)
            .ok_or_else(|| Status::NotFound(ResourceDetails::from(&key)))?;
        if current.meta().resource_version != object.meta().resource_version {
            return Err(Status::Conflict(format!(
                "object {} has been modified: stored version {:?}, submitted version {:?}",
                key,
                current.meta().resource_version,
                object.meta().resource_version
            )));
        }
        let uid = current.meta().uid.clone();
        let mut stored = object;
        let metadata = stored.meta_mut();
        metadata.uid = uid;
        metadata.resource_version = Some(self.next_version());
        debug!("Updated object {}", key);
        (*write_guard).insert(key, stored.clone());
        Ok(stored)
    }
}

#[async_trait]
impl<R> CanDelete<R> for InMemoryObjectStore<R>
where
    R: Resource + Clone + Debug + Send + Sync + 'static,
{
    async fn delete(&self, key: &ReconcileKey) -> Result<(), Status> {
        self.check_availability()?;
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let removed = {
            let mut write_guard = self.objects.write().await;
            (*write_guard).remove(key)
        };
        let removed = removed.ok_or_else(|| Status::NotFound(ResourceDetails::from(key)))?;
        if let Some(uid) = removed.meta().uid.as_deref() {
            for dependent in &self.dependents {
                dependent.collect_owned_by(uid).await;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl<R> OwnerCascade for InMemoryObjectStore<R>
where
    R: Resource + Clone + Debug + Send + Sync + 'static,
{
    async fn collect_owned_by(&self, owner_uid: &str) {
        let mut write_guard = self.objects.write().await;
        (*write_guard).retain(|key, object| {
            let owned = object
                .meta()
                .owner_references
                .iter()
                .flatten()
                .any(|owner| owner.uid == owner_uid);
            if owned {
                debug!("Garbage collecting {} owned by {}", key, owner_uid);
            }
            !owned
        });
    }
}
