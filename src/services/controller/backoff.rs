#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Mutex;
use std::time::Duration;

/// Per-key exponential backoff: `base * 2^failures`, capped at `max`.
pub struct ItemExponentialBackoff<K> {
    base: Duration,
    max: Duration,
    failures: Mutex<HashMap<K, u32>>,
}

impl<K> ItemExponentialBackoff<K>
where
    K: Eq + Hash + Clone,
{
    pub const DEFAULT_BASE: Duration = Duration::from_millis(5);
    pub const DEFAULT_MAX: Duration = Duration::from_secs(1000);

    pub fn new(base: Duration, max: Duration) -> Self {
        ItemExponentialBackoff {
            base,
            max,
            failures: Mutex::new(HashMap::new()),
        }
    }

    /// Records a failure for the key and returns how long to wait before retrying it
    pub fn next_delay(&self, key: &K) -> Duration {
        let exponent = match self.failures.lock() {
            Ok(mut failures) => {
                let count = failures.entry(key.clone()).or_insert(0);
                let exponent = *count;
                *count = count.saturating_add(1);
                exponent
            }
            Err(_) => return self.max,
        };
        self.delay_for(exponent)
    }

    /// Clears the failure history of the key
    pub fn forget(&self, key: &K) {
        if let Ok(mut failures) = self.failures.lock() {
            failures.remove(key);
        }
    }

    pub fn failures(&self, key: &K) -> u32 {
        self.failures
            .lock()
            .map(|failures| failures.get(key).copied().unwrap_or(0))
            .unwrap_or(0)
    }

    fn delay_for(&self, exponent: u32) -> Duration {
        2u32.checked_pow(exponent)
            .and_then(|factor| self.base.checked_mul(factor))
            .map_or(self.max, |delay| delay.min(self.max))
    }
}

impl<K> Default for ItemExponentialBackoff<K>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE, Self::DEFAULT_MAX)
    }
}
