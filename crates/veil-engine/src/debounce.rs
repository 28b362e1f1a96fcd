//! Keyed debounce scheduling

use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use dashmap::DashMap;
use tokio::task::JoinHandle;

struct Slot {
    generation: u64,
    handle: JoinHandle<()>,
}

/// Runs at most one delayed task per key.
///
/// Scheduling again for a key before its delay elapses aborts the pending
/// task, so the last scheduled call wins. Keys never affect each other.
pub struct Debouncer<K: Eq + Hash> {
    slots: Arc<DashMap<K, Slot>>,
    generation: AtomicU64,
}

impl<K> Debouncer<K>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            slots: Arc::new(DashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Must be called from within a tokio runtime
    pub fn schedule<F>(&self, key: K, delay: Duration, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let generation = self.generation.fetch_add(1, Ordering::Relaxed);
        let slots = Arc::clone(&self.slots);
        let own_key = key.clone();

        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            task.await;
            slots.remove_if(&own_key, |_, slot| slot.generation == generation);
        });

        if let Some(previous) = self.slots.insert(key, Slot { generation, handle }) {
            previous.handle.abort();
        }
    }

    /// Drop the pending task for `key`, if any. Returns whether one was pending.
    pub fn cancel(&self, key: &K) -> bool {
        match self.slots.remove(key) {
            Some((_, slot)) => {
                let pending = !slot.handle.is_finished();
                slot.handle.abort();
                pending
            }
            None => false,
        }
    }

    /// Number of keys with a task still waiting or running
    pub fn pending(&self) -> usize {
        self.slots
            .iter()
            .filter(|slot| !slot.handle.is_finished())
            .count()
    }
}

impl<K> Default for Debouncer<K>
where
    K: Eq + Hash + Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for slot in self.slots.iter() {
            slot.handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    const DELAY: Duration = Duration::from_millis(300);

    #[tokio::test(start_paused = true)]
    async fn test_last_call_wins() {
        let debouncer = Debouncer::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for value in ["a", "ab", "abc"] {
            let seen = Arc::clone(&seen);
            debouncer.schedule("field", DELAY, async move {
                seen.lock().unwrap().push(value);
            });
            tokio::time::sleep(Duration::from_millis(100)).await;
        }
        assert!(seen.lock().unwrap().is_empty());

        tokio::time::sleep(DELAY).await;
        assert_eq!(*seen.lock().unwrap(), vec!["abc"]);
        assert_eq!(debouncer.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_keys_are_independent() {
        let debouncer = Debouncer::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        for key in [1u64, 2] {
            let seen = Arc::clone(&seen);
            debouncer.schedule(key, DELAY, async move {
                seen.lock().unwrap().push(key);
            });
        }
        assert_eq!(debouncer.pending(), 2);

        tokio::time::sleep(DELAY * 2).await;
        let mut ran = seen.lock().unwrap().clone();
        ran.sort();
        assert_eq!(ran, vec![1, 2]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel() {
        let debouncer = Debouncer::new();
        let seen = Arc::new(Mutex::new(Vec::new()));

        let inner = Arc::clone(&seen);
        debouncer.schedule("field", DELAY, async move {
            inner.lock().unwrap().push(());
        });

        assert!(debouncer.cancel(&"field"));
        assert!(!debouncer.cancel(&"field"));

        tokio::time::sleep(DELAY * 2).await;
        assert!(seen.lock().unwrap().is_empty());
        assert_eq!(debouncer.pending(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_quiet_period_restarts() {
        let debouncer = Debouncer::new();
        let seen = Arc::new(Mutex::new(0));

        for _ in 0..2 {
            let seen = Arc::clone(&seen);
            debouncer.schedule("field", DELAY, async move {
                *seen.lock().unwrap() += 1;
            });
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
        // 500ms since the first call, 250ms since the second
        assert_eq!(*seen.lock().unwrap(), 0);

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(*seen.lock().unwrap(), 1);
    }
}
