//! Fixed-capacity cache with drop-oldest eviction.

use std::collections::{HashMap, VecDeque};
use std::hash::Hash;

use parking_lot::RwLock;

/// Thread-safe map holding at most `capacity` entries.
///
/// Inserting past capacity evicts the oldest entry. Re-inserting an existing
/// key replaces its value and makes it the newest.
#[derive(Debug)]
pub struct BoundedCache<K, V> {
    capacity: usize,
    inner: RwLock<Inner<K, V>>,
}

#[derive(Debug)]
struct Inner<K, V> {
    entries: HashMap<K, V>,
    order: VecDeque<K>,
}

impl<K, V> BoundedCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            inner: RwLock::new(Inner {
                entries: HashMap::with_capacity(capacity),
                order: VecDeque::with_capacity(capacity),
            }),
        }
    }

    /// Insert an entry, returning whatever was evicted to make room.
    pub fn insert(&self, key: K, value: V) -> Vec<(K, V)> {
        let mut inner = self.inner.write();
        if inner.entries.insert(key.clone(), value).is_some() {
            inner.order.retain(|k| k != &key);
        }
        inner.order.push_back(key);

        let mut evicted = Vec::new();
        while inner.order.len() > self.capacity {
            let Some(oldest) = inner.order.pop_front() else {
                break;
            };
            if let Some(value) = inner.entries.remove(&oldest) {
                evicted.push((oldest, value));
            }
        }
        evicted
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<V> {
        self.inner.read().entries.get(key).cloned()
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.inner.read().entries.contains_key(key)
    }

    pub fn remove(&self, key: &K) -> Option<V> {
        let mut inner = self.inner.write();
        let value = inner.entries.remove(key)?;
        inner.order.retain(|k| k != key);
        Some(value)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.read().entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }
}
