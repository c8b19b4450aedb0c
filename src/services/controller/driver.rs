
use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::status::Status;
use crate::services::controller::backoff::ItemExponentialBackoff;
use crate::services::controller::reconciler::{Outcome, Reconciler};
use crate::services::controller::work_queue::WorkQueue;
use crate::services::observability::diagnostics::Diagnostics;
use futures::FutureExt;
use log::{debug, error, info, warn};
use std::any::Any;
use std::future::Future;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;

#[derive(Clone, Debug)]
pub struct DriverConfig {
    pub workers: usize,
    pub reconcile_timeout: Duration,
    pub backoff_base: Duration,
    pub backoff_max: Duration,
}

impl Default for DriverConfig {
    fn default() -> Self {
        DriverConfig {
            workers: 2,
            reconcile_timeout: Duration::from_secs(30),
            backoff_base: ItemExponentialBackoff::<ReconcileKey>::DEFAULT_BASE,
            backoff_max: ItemExponentialBackoff::<ReconcileKey>::DEFAULT_MAX,
        }
    }
}

struct DriverState {
    queue: WorkQueue<ReconcileKey>,
    reconciler: Arc<dyn Reconciler>,
    backoff: ItemExponentialBackoff<ReconcileKey>,
    diagnostics: Arc<dyn Diagnostics>,
    reconcile_timeout: Duration,
}

/// Drains the work queue with a fixed pool of workers and applies the retry policy to every
/// reconcile outcome.
pub struct ControllerDriver {
    state: Arc<DriverState>,
    workers: usize,
}

impl ControllerDriver {
    pub fn new(
        queue: WorkQueue<ReconcileKey>,
        reconciler: Arc<dyn Reconciler>,
        diagnostics: Arc<dyn Diagnostics>,
        config: DriverConfig,
    ) -> Self {
        ControllerDriver {
            state: Arc::new(DriverState {
                queue,
                reconciler,
                backoff: ItemExponentialBackoff::new(config.backoff_base, config.backoff_max),
                diagnostics,
                reconcile_timeout: config.reconcile_timeout,
            }),
            workers: config.workers.max(1),
        }
    }

    pub fn queue(&self) -> WorkQueue<ReconcileKey> {
        self.state.queue.clone()
    }

    /// Runs the workers until `shutdown` resolves. Pending keys are then abandoned and the call
    /// returns once every in-flight reconcile has finished.
    pub async fn run<F>(self, shutdown: F)
    where
        F: Future<Output = ()> + Send,
    {
        let mut workers = JoinSet::new();
        for worker_id in 0..self.workers {
            let state = self.state.clone();
            workers.spawn(async move { state.work(worker_id).await });
        }
        info!("Controller started with {} workers", self.workers);

        shutdown.await;
        info!(
            "Controller shutting down, abandoning {} delayed keys and waiting for in-flight reconciles",
            self.state.queue.delayed_len()
        );
        self.state.queue.shutdown().await;

        while let Some(result) = workers.join_next().await {
            if let Err(e) = result {
                error!("Worker terminated abnormally: {}", e);
            }
        }
        info!("Controller stopped");
    }
}

impl DriverState {
    async fn work(&self, worker_id: usize) {
        while let Some(key) = self.queue.get().await {
            debug!("Worker {} reconciling {}", worker_id, key);
            let outcome = self.reconcile_bounded(&key).await;
            self.apply(&key, outcome);
            self.queue.done(&key).await;
        }
        debug!("Worker {} exiting", worker_id);
    }

    async fn reconcile_bounded(&self, key: &ReconcileKey) -> Outcome {
        let attempt = AssertUnwindSafe(self.reconciler.reconcile(key)).catch_unwind();
        match tokio::time::timeout(self.reconcile_timeout, attempt).await {
            Ok(Ok(outcome)) => outcome,
            Ok(Err(cause)) => Outcome::Fail(Status::Panicked(panic_message(key, cause.as_ref()))),
            Err(_) => Outcome::Fail(Status::Timeout(format!(
                "reconcile of {} exceeded {:?}",
                key, self.reconcile_timeout
            ))),
        }
    }

    fn apply(&self, key: &ReconcileKey, outcome: Outcome) {
        match outcome {
            Outcome::Done => self.backoff.forget(key),
            Outcome::RequeueAfter(delay) => {
                self.backoff.forget(key);
                debug!("Requeueing {} after {:?}", key, delay);
                self.queue.add_after(key.clone(), delay);
            }
            Outcome::Fail(error) => {
                self.diagnostics.reconcile_error(key, &error);
                let delay = self.backoff.next_delay(key);
                if error.is_conflict() {
                    debug!("Retrying {} in {:?} against a fresh read: {}", key, delay, error);
                } else {
                    warn!("Retrying {} in {:?} after failure: {}", key, delay, error);
                }
                self.queue.add_after(key.clone(), delay);
            }
        }
    }
}

fn panic_message(key: &ReconcileKey, cause: &(dyn Any + Send)) -> String {
    let detail = cause
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| cause.downcast_ref::<String>().cloned())
        .unwrap_or_else(|| "unknown cause".to_string());
    format!("{}: {}", key, detail)
}
