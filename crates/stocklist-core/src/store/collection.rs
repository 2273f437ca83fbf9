// ── Keyed collection ──
//
// Concurrent map plus a published, ordered copy of its contents.

use std::collections::BTreeMap;
use std::hash::Hash;
use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::watch;

/// Ordered point-in-time view of a collection.
pub type Snapshot<K, V> = Arc<BTreeMap<K, Arc<V>>>;

/// A concurrent, reactive map for one kind of value.
///
/// `DashMap` serves point lookups; every mutation rebuilds an ordered
/// snapshot and publishes it on a `watch` channel for subscribers.
pub struct KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    by_key: DashMap<K, Arc<V>>,
    snapshot: watch::Sender<Snapshot<K, V>>,
}

impl<K, V> KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    pub fn new() -> Self {
        let (snapshot, _) = watch::channel(Arc::new(BTreeMap::new()));
        Self {
            by_key: DashMap::new(),
            snapshot,
        }
    }

    /// Insert or replace a value, returning the stored `Arc`.
    pub fn upsert(&self, key: K, value: V) -> Arc<V> {
        let value = Arc::new(value);
        self.by_key.insert(key, Arc::clone(&value));
        self.publish();
        value
    }

    /// Subscribers are only woken when something was actually removed.
    pub fn remove(&self, key: &K) -> Option<Arc<V>> {
        let (_, value) = self.by_key.remove(key)?;
        self.publish();
        Some(value)
    }

    pub fn get(&self, key: &K) -> Option<Arc<V>> {
        self.by_key.get(key).map(|r| Arc::clone(r.value()))
    }

    pub fn contains(&self, key: &K) -> bool {
        self.by_key.contains_key(key)
    }

    pub fn snapshot(&self) -> Snapshot<K, V> {
        Arc::clone(&self.snapshot.borrow())
    }

    /// The receiver starts out holding the current snapshot.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot<K, V>> {
        self.snapshot.subscribe()
    }

    /// Remove every value.
    pub fn clear(&self) {
        self.by_key.clear();
        self.publish();
    }

    pub fn len(&self) -> usize {
        self.by_key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_key.is_empty()
    }

    /// Keys in ascending order.
    pub fn keys(&self) -> Vec<K> {
        self.snapshot.borrow().keys().cloned().collect()
    }

    /// Rebuild the ordered copy and hand it to subscribers. `send_replace`
    /// stores the value even while nobody is subscribed.
    fn publish(&self) {
        let ordered: BTreeMap<K, Arc<V>> = self
            .by_key
            .iter()
            .map(|entry| (entry.key().clone(), Arc::clone(entry.value())))
            .collect();
        self.snapshot.send_replace(Arc::new(ordered));
    }
}

impl<K, V> Default for KeyedCollection<K, V>
where
    K: Clone + Eq + Hash + Ord + Send + Sync + 'static,
    V: Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}
