//! TtlCache: entries expire a fixed time after insertion.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

struct CacheEntry<V> {
    value: V,
    inserted_at: Instant,
}

/// In-memory cache where every entry expires `max_age` after it was stored.
pub struct TtlCache<K, V> {
    entries: HashMap<K, CacheEntry<V>>,
    max_age: Duration,
}

impl<K: Eq + Hash, V> TtlCache<K, V> {
    pub fn new(max_age: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            max_age,
        }
    }

    /// Fresh value for `key`; expired entries read as missing.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.entries
            .get(key)
            .filter(|e| e.inserted_at.elapsed() < self.max_age)
            .map(|e| &e.value)
    }

    /// Store (or replace) a value; its clock starts now.
    pub fn insert(&mut self, key: K, value: V) {
        self.entries.insert(
            key,
            CacheEntry {
                value,
                inserted_at: Instant::now(),
            },
        );
    }

    pub fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|e| e.value)
    }

    /// Drop expired entries; returns how many were removed.
    pub fn purge_expired(&mut self) -> usize {
        let before = self.entries.len();
        let max_age = self.max_age;
        self.entries.retain(|_, e| e.inserted_at.elapsed() < max_age);
        before - self.entries.len()
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_entries_are_returned() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("reddit", vec![1, 2, 3]);
        assert_eq!(cache.get(&"reddit"), Some(&vec![1, 2, 3]));
        assert_eq!(cache.purge_expired(), 0);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn zero_max_age_expires_immediately() {
        let mut cache = TtlCache::new(Duration::ZERO);
        cache.insert(1, "a");
        assert_eq!(cache.get(&1), None);
        assert_eq!(cache.purge_expired(), 1);
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_replaces() {
        let mut cache = TtlCache::new(Duration::from_secs(60));
        cache.insert(1, "a");
        cache.insert(1, "b");
        assert_eq!(cache.get(&1), Some(&"b"));
        assert_eq!(cache.remove(&1), Some("b"));
        assert!(cache.is_empty());
    }
}
