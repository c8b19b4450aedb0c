#[cfg(test)]
mod tests;

use log::debug;
use std::collections::{HashMap, HashSet, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::{Arc, MutexGuard};
use std::time::Duration;
use tokio::sync::{Mutex, Notify};
use tokio::task::JoinHandle;
use tokio::time::Instant;

struct QueueState<K> {
    queue: VecDeque<K>,
    // Keys waiting to be processed, whether queued or deferred behind an in-flight reconcile
    dirty: HashSet<K>,
    processing: HashSet<K>,
    shutting_down: bool,
}

// Timers for keys that are not ready yet, at most one per key
struct DelayedAdds<K> {
    timers: HashMap<K, (Instant, JoinHandle<()>)>,
    closed: bool,
}

struct Inner<K> {
    state: Mutex<QueueState<K>>,
    delayed: std::sync::Mutex<DelayedAdds<K>>,
    notify: Notify,
}

/// De-duplicating, delay-capable queue of keys.
///
/// A key added several times before it is taken is delivered once. A key added while it is
/// being processed is held back until `done` is called for it and then delivered exactly once,
/// so a key is never handed to two consumers at the same time.
pub struct WorkQueue<K> {
    inner: Arc<Inner<K>>,
}

impl<K> Clone for WorkQueue<K> {
    fn clone(&self) -> Self {
        WorkQueue {
            inner: self.inner.clone(),
        }
    }
}

impl<K> WorkQueue<K>
where
    K: Clone + Debug + Eq + Hash + Send + Sync + 'static,
{
    pub fn new() -> Self {
        WorkQueue {
            inner: Arc::new(Inner {
                state: Mutex::new(QueueState {
                    queue: VecDeque::new(),
                    dirty: HashSet::new(),
                    processing: HashSet::new(),
                    shutting_down: false,
                }),
                delayed: std::sync::Mutex::new(DelayedAdds {
                    timers: HashMap::new(),
                    closed: false,
                }),
                notify: Notify::new(),
            }),
        }
    }

    pub async fn add(&self, key: K) {
        let mut state = self.inner.state.lock().await;
        if state.shutting_down || state.dirty.contains(&key) {
            return;
        }
        state.dirty.insert(key.clone());
        if state.processing.contains(&key) {
            debug!("Deferring {:?} until the in-flight reconcile completes", key);
            return;
        }
        state.queue.push_back(key);
        self.inner.notify.notify_one();
    }

    /// Adds the key once `delay` has elapsed. If the key is already waiting, the earlier deadline
    /// wins. Shutdown cancels every waiting key.
    pub fn add_after(&self, key: K, delay: Duration) {
        let deadline = Instant::now() + delay;
        let mut delayed = self.delayed();
        if delayed.closed {
            return;
        }
        if let Some((current, _)) = delayed.timers.get(&key) {
            if *current <= deadline {
                return;
            }
        }

        let queue = self.clone();
        let timer_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            queue.fire(timer_key, deadline).await;
        });
        if let Some((_, replaced)) = delayed.timers.insert(key, (deadline, handle)) {
            replaced.abort();
        }
    }

    /// Number of keys waiting for their delay to elapse
    pub fn delayed_len(&self) -> usize {
        self.delayed().timers.len()
    }

    async fn fire(&self, key: K, deadline: Instant) {
        {
            let mut delayed = self.delayed();
            if delayed.timers.get(&key).is_some_and(|(current, _)| *current == deadline) {
                delayed.timers.remove(&key);
            }
        }
        self.add(key).await;
    }

    fn delayed(&self) -> MutexGuard<'_, DelayedAdds<K>> {
        self.inner.delayed.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Waits for the next key, `None` once the queue is shut down.
    pub async fn get(&self) -> Option<K> {
        loop {
            let notified = self.inner.notify.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();
            {
                let mut state = self.inner.state.lock().await;
                if state.shutting_down {
                    return None;
                }
                if let Some(key) = state.queue.pop_front() {
                    state.dirty.remove(&key);
                    state.processing.insert(key.clone());
                    return Some(key);
                }
            }
            notified.await;
        }
    }

    /// Marks processing of the key as finished, redelivering it if it was re-added meanwhile.
    pub async fn done(&self, key: &K) {
        let mut state = self.inner.state.lock().await;
        state.processing.remove(key);
        if state.dirty.contains(key) && !state.shutting_down {
            state.queue.push_back(key.clone());
            self.inner.notify.notify_one();
        }
    }

    /// Stops admitting keys and wakes every waiting consumer. Pending and delayed keys are
    /// abandoned.
    pub async fn shutdown(&self) {
        {
            let mut delayed = self.delayed();
            delayed.closed = true;
            for (_, (_, timer)) in delayed.timers.drain() {
                timer.abort();
            }
        }
        let mut state = self.inner.state.lock().await;
        state.shutting_down = true;
        state.queue.clear();
        state.dirty.clear();
        self.inner.notify.notify_waiters();
    }

    /// Number of keys ready to be taken
    pub async fn len(&self) -> usize {
        self.inner.state.lock().await.queue.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl<K> Default for WorkQueue<K>
where
    K: Clone + Debug + Eq + Hash + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
