pub mod car_reconciler;
pub mod projection;

use crate::models::reconcile_key::ReconcileKey;
use crate::services::base::status::Status;
use async_trait::async_trait;
use std::time::Duration;

/// Result of a single reconcile, interpreted by the driver.
#[derive(Debug)]
pub enum Outcome {
    /// Converged or nothing to do; clears the retry history of the key
    Done,

    /// Converged for now, but the key should be looked at again after the delay
    RequeueAfter(Duration),

    /// The attempt failed and is retried with backoff
    Fail(Status),
}

impl Outcome {
    pub fn is_done(&self) -> bool {
        matches!(self, Outcome::Done)
    }
}

#[async_trait]
/// A level-triggered reconcile function. Implementations re-read all state on every call and
/// must be safe to invoke again from scratch at any time.
pub trait Reconciler: Send + Sync {
    async fn reconcile(&self, key: &ReconcileKey) -> Outcome;
}
