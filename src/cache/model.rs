//! Build-once memoization of models.
//!
//! Each key is built at most once. Concurrent misses on the same key park on
//! a condition variable while the first caller builds; if that build fails
//! the slot is released and one of the waiters takes over. Failures are
//! never cached.
//!
//! Values are handed out by cloning, so callers may freely mutate what they
//! receive without touching the cached instance.

use parking_lot::{Condvar, Mutex};
use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

enum Slot<V> {
    Ready(Arc<V>),
    Building,
}

pub struct ModelCache<K, V> {
    slots: Mutex<HashMap<K, Slot<V>>>,
    settled: Condvar,
}

impl<K, V> Default for ModelCache<K, V> {
    fn default() -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            settled: Condvar::new(),
        }
    }
}

impl<K, V> std::fmt::Debug for ModelCache<K, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModelCache")
            .field("slots", &self.slots.lock().len())
            .finish()
    }
}

impl<K: Eq + Hash + Clone, V: Clone> ModelCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh copy of the cached value, if one has been built.
    pub fn get_cloned(&self, key: &K) -> Option<V> {
        match self.slots.lock().get(key) {
            Some(Slot::Ready(value)) => Some(V::clone(value)),
            _ => None,
        }
    }

    pub fn contains(&self, key: &K) -> bool {
        matches!(self.slots.lock().get(key), Some(Slot::Ready(_)))
    }

    /// Return a copy of the value for `key`, building it first if needed.
    pub fn get_or_try_build<E, F>(&self, key: K, build: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        let mut slots = self.slots.lock();
        loop {
            let in_flight = match slots.get(&key) {
                Some(Slot::Ready(value)) => return Ok(V::clone(value)),
                Some(Slot::Building) => true,
                None => false,
            };
            if !in_flight {
                break;
            }
            self.settled.wait(&mut slots);
        }
        slots.insert(key.clone(), Slot::Building);
        drop(slots);

        let mut pending = PendingSlot {
            cache: self,
            key: Some(key),
        };
        let value = Arc::new(build()?);

        if let Some(key) = pending.key.take() {
            self.slots.lock().insert(key, Slot::Ready(Arc::clone(&value)));
            self.settled.notify_all();
        }
        Ok(V::clone(&value))
    }

    /// Number of built values.
    pub fn len(&self) -> usize {
        self.slots
            .lock()
            .values()
            .filter(|slot| matches!(slot, Slot::Ready(_)))
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.slots.lock().clear();
        self.settled.notify_all();
    }
}

/// Releases a `Building` slot if the build fails or panics.
struct PendingSlot<'a, K: Eq + Hash, V> {
    cache: &'a ModelCache<K, V>,
    key: Option<K>,
}

impl<K: Eq + Hash, V> Drop for PendingSlot<'_, K, V> {
    fn drop(&mut self) {
        if let Some(key) = self.key.take() {
            self.cache.slots.lock().remove(&key);
            self.cache.settled.notify_all();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Barrier;
    use std::time::Duration;

    #[test]
    fn test_builds_once() {
        let cache: ModelCache<&str, Vec<u32>> = ModelCache::new();
        let calls = AtomicUsize::new(0);
        let build = || {
            calls.fetch_add(1, Ordering::SeqCst);
            Ok::<_, ()>(vec![1, 2, 3])
        };

        let a = cache.get_or_try_build("stone", build).unwrap();
        let b = cache.get_or_try_build("stone", build).unwrap();
        assert_eq!(a, b);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_returned_copies_are_independent() {
        let cache: ModelCache<&str, Vec<u32>> = ModelCache::new();
        let mut first = cache.get_or_try_build("stone", || Ok::<_, ()>(vec![1])).unwrap();
        first.push(99);

        assert_eq!(cache.get_cloned(&"stone"), Some(vec![1]));
    }

    #[test]
    fn test_failures_are_not_cached() {
        let cache: ModelCache<&str, u32> = ModelCache::new();
        assert_eq!(cache.get_or_try_build("stone", || Err("boom")), Err("boom"));
        assert!(!cache.contains(&"stone"));
        assert_eq!(cache.get_or_try_build("stone", || Ok::<_, &str>(7)), Ok(7));
    }

    #[test]
    fn test_clear() {
        let cache: ModelCache<u8, u8> = ModelCache::new();
        cache.get_or_try_build(1, || Ok::<_, ()>(1)).unwrap();
        cache.clear();
        assert!(cache.is_empty());
        assert_eq!(cache.get_cloned(&1), None);
    }

    #[test]
    fn test_concurrent_misses_build_once() {
        let cache: ModelCache<&str, u64> = ModelCache::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(8);

        std::thread::scope(|s| {
            for _ in 0..8 {
                s.spawn(|| {
                    barrier.wait();
                    let value = cache
                        .get_or_try_build("stone", || {
                            calls.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(Duration::from_millis(20));
                            Ok::<_, ()>(42)
                        })
                        .unwrap();
                    assert_eq!(value, 42);
                });
            }
        });

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_waiter_takes_over_after_failure() {
        let cache: ModelCache<&str, u64> = ModelCache::new();
        let calls = AtomicUsize::new(0);
        let barrier = Barrier::new(4);

        let results: Vec<Result<u64, ()>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..4)
                .map(|_| {
                    s.spawn(|| {
                        barrier.wait();
                        cache.get_or_try_build("stone", || {
                            // Only the very first build fails.
                            let n = calls.fetch_add(1, Ordering::SeqCst);
                            std::thread::sleep(Duration::from_millis(10));
                            if n == 0 {
                                Err(())
                            } else {
                                Ok(5)
                            }
                        })
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.iter().filter(|r| r.is_err()).count(), 1);
        assert_eq!(results.iter().filter(|r| **r == Ok(5)).count(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
