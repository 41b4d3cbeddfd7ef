//! Simple In-Memory Cache
//!
//! Time-based cache for remote lookups (module ABIs).

use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Simple time-based cache
pub struct Cache<T> {
    data: HashMap<String, (T, Instant)>,
    ttl: Duration,
}

impl<T: Clone> Cache<T> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            data: HashMap::new(),
            ttl,
        }
    }

    pub fn get(&self, key: &str) -> Option<T> {
        self.data
            .get(key)
            .filter(|(_, inserted)| inserted.elapsed() < self.ttl)
            .map(|(value, _)| value.clone())
    }

    /// Insert or refresh `key`; expired entries are dropped on every insert
    pub fn set(&mut self, key: String, value: T) {
        self.cleanup();
        self.data.insert(key, (value, Instant::now()));
    }

    /// Number of stored entries, expired ones included until the next `set`
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn cleanup(&mut self) {
        let ttl = self.ttl;
        self.data.retain(|_, (_, inserted)| inserted.elapsed() < ttl);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    #[test]
    fn test_cache_basic() {
        let mut cache: Cache<String> = Cache::new(Duration::from_secs(10));

        cache.set("0x1::coin::transfer".to_string(), "abi".to_string());
        assert_eq!(cache.get("0x1::coin::transfer"), Some("abi".to_string()));
        assert_eq!(cache.get("0x1::coin::balance"), None);

        cache.set("0x1::coin::transfer".to_string(), "abi v2".to_string());
        assert_eq!(cache.get("0x1::coin::transfer"), Some("abi v2".to_string()));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_expiry() {
        let mut cache: Cache<u64> = Cache::new(Duration::from_millis(50));

        cache.set("key".to_string(), 1);
        assert_eq!(cache.get("key"), Some(1));

        sleep(Duration::from_millis(80));
        assert_eq!(cache.get("key"), None);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_cache_set_evicts_expired_entries() {
        let mut cache: Cache<u64> = Cache::new(Duration::from_millis(50));
        assert!(cache.is_empty());

        cache.set("stale".to_string(), 1);
        sleep(Duration::from_millis(80));
        cache.set("fresh".to_string(), 2);

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("stale"), None);
        assert_eq!(cache.get("fresh"), Some(2));
    }
}
