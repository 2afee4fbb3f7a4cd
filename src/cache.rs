//! Time-bounded in-memory cache for backend payloads.
//!
//! An explicit object owned by the session, keyed by the fetch URL. Entries
//! are `Arc`-shared read-only snapshots; expired entries are purged on access.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::model::Payload;

struct CacheEntry {
    payload: Arc<Payload>,
    deadline: Instant,
}

#[derive(Default)]
pub struct PayloadCache {
    entries: HashMap<String, CacheEntry>,
}

impl PayloadCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the cached payload for `key` if it has not expired.
    pub fn get(&mut self, key: &str) -> Option<Arc<Payload>> {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.deadline > now);
        self.entries.get(key).map(|entry| Arc::clone(&entry.payload))
    }

    /// Stores `payload` under `key` with a per-entry deadline and returns the
    /// shared snapshot.
    pub fn put(&mut self, key: &str, payload: Payload, ttl: Duration) -> Arc<Payload> {
        let payload = Arc::new(payload);
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                payload: Arc::clone(&payload),
                deadline: Instant::now() + ttl,
            },
        );
        payload
    }

    /// Drops the entry for `key`. Idempotent; clearing an absent key is a
    /// no-op.
    pub fn invalidate(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const KEY: &str = "http://localhost:8000/mgnrega/all";

    #[test]
    fn test_put_then_get_within_ttl() {
        let mut cache = PayloadCache::new();
        let stored = cache.put(KEY, Payload::default(), Duration::from_secs(60));
        let hit = cache.get(KEY).expect("entry should still be live");
        assert!(Arc::ptr_eq(&stored, &hit));
    }

    #[test]
    fn test_expired_entry_is_purged() {
        let mut cache = PayloadCache::new();
        cache.put(KEY, Payload::default(), Duration::ZERO);
        std::thread::sleep(Duration::from_millis(5));
        assert!(cache.get(KEY).is_none());
    }

    #[test]
    fn test_invalidate_is_idempotent() {
        let mut cache = PayloadCache::new();
        cache.put(KEY, Payload::default(), Duration::from_secs(60));
        cache.invalidate(KEY);
        cache.invalidate(KEY);
        assert!(cache.get(KEY).is_none());
    }

    #[test]
    fn test_keys_are_independent() {
        let mut cache = PayloadCache::new();
        cache.put("a", Payload::default(), Duration::from_secs(60));
        cache.put("b", Payload::default(), Duration::from_secs(60));
        cache.invalidate("a");
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_some());
    }
}
