use crate::models::reconcile_key::ReconcileKey;
use crate::services::backends::kubernetes::resource_update_handler::ResourceUpdateHandler;
use crate::services::controller::label_predicate::Predicate;
use crate::services::controller::work_queue::WorkQueue;
use async_trait::async_trait;
use kube::Resource;
use kube::runtime::watcher;
use std::sync::Arc;

/// Queues the key of every admitted object of the watched kind. Rejected objects are dropped
/// silently.
pub struct PredicateQueueingUpdateHandler<R> {
    queue: WorkQueue<ReconcileKey>,
    predicate: Arc<dyn Predicate<R>>,
}

impl<R> PredicateQueueingUpdateHandler<R> {
    pub fn new(queue: WorkQueue<ReconcileKey>, predicate: Arc<dyn Predicate<R>>) -> Self {
        PredicateQueueingUpdateHandler { queue, predicate }
    }
}

#[async_trait]
impl<R> ResourceUpdateHandler<R> for PredicateQueueingUpdateHandler<R>
where
    R: Resource + Send + Sync + 'static,
{
    async fn handle_update(&self, result: &Result<R, watcher::Error>) -> () {
        let Ok(object) = result else {
            return;
        };
        if !self.predicate.admit(object) {
            return;
        }
        if let Some(key) = ReconcileKey::from_resource(object) {
            self.queue.add(key).await;
        }
    }
}
