use crate::models::reconcile_key::ReconcileKey;
use crate::services::backends::kubernetes::resource_update_handler::ResourceUpdateHandler;
use crate::services::controller::owner_reference::owner_key_of;
use crate::services::controller::work_queue::WorkQueue;
use async_trait::async_trait;
use kube::Resource;
use kube::runtime::watcher;
use log::debug;
use std::marker::PhantomData;

/// Translates events on owned objects into the key of their controlling owner of kind `O`.
pub struct OwnerQueueingUpdateHandler<O> {
    queue: WorkQueue<ReconcileKey>,
    _owner: PhantomData<fn() -> O>,
}

impl<O> OwnerQueueingUpdateHandler<O> {
    pub fn new(queue: WorkQueue<ReconcileKey>) -> Self {
        OwnerQueueingUpdateHandler {
            queue,
            _owner: PhantomData,
        }
    }
}

#[async_trait]
impl<O, R> ResourceUpdateHandler<R> for OwnerQueueingUpdateHandler<O>
where
    O: Resource<DynamicType = ()> + 'static,
    R: Resource + Send + Sync + 'static,
{
    async fn handle_update(&self, result: &Result<R, watcher::Error>) -> () {
        let Ok(object) = result else {
            return;
        };
        if let Some(key) = owner_key_of::<O, R>(object) {
            debug!("Owned object {:?} changed, queueing owner {}", object.meta().name, key);
            self.queue.add(key).await;
        }
    }
}
