//! Read-through TTL cache for knowledge-source lookups.
//!
//! Cache policy (TTL, expiry) lives here, independent of resolver logic.
//! Population happens at the call site; concurrent population of the same
//! key under race is tolerated (the underlying facts rarely change, so a
//! duplicate upstream call is harmless).

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::RwLock;
use std::time::{Duration, Instant};

/// A thread-safe map whose entries expire after a fixed TTL.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    entries: RwLock<HashMap<K, (V, Instant)>>,
    ttl: Duration,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Create a cache whose entries expire after `ttl`.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    /// Look up a key, returning a clone of the value if present and fresh.
    ///
    /// Expired entries are removed lazily on access.
    pub fn get(&self, key: &K) -> Option<V> {
        let expired = {
            let entries = self.entries.read().unwrap();
            match entries.get(key) {
                Some((value, inserted_at)) => {
                    if inserted_at.elapsed() < self.ttl {
                        return Some(value.clone());
                    }
                    true
                }
                None => false,
            }
        };

        if expired {
            self.entries.write().unwrap().remove(key);
        }
        None
    }

    /// Insert or replace a value.
    pub fn insert(&self, key: K, value: V) {
        self.entries
            .write()
            .unwrap()
            .insert(key, (value, Instant::now()));
    }

    /// Number of entries, including any not yet lazily expired.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap().len()
    }

    /// True when the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.read().unwrap().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hit_within_ttl() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("copernicus", 1473);
        assert_eq!(cache.get(&"copernicus"), Some(1473));
    }

    #[test]
    fn miss_on_absent_key() {
        let cache: TtlCache<&str, i32> = TtlCache::new(Duration::from_secs(60));
        assert_eq!(cache.get(&"nobody"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn expires_after_ttl() {
        let cache = TtlCache::new(Duration::from_millis(10));
        cache.insert("k", "v");
        std::thread::sleep(Duration::from_millis(20));
        assert_eq!(cache.get(&"k"), None);
        // Lazy expiry removed the stale entry.
        assert_eq!(cache.len(), 0);
    }

    #[test]
    fn insert_replaces_existing() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("k", 1);
        cache.insert("k", 2);
        assert_eq!(cache.get(&"k"), Some(2));
        assert_eq!(cache.len(), 1);
    }
}
