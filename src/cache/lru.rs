//! LRU Tracker Module
//!
//! Recency order of cache keys, used to pick an eviction victim when the
//! in-memory backend is at capacity.

use std::collections::VecDeque;

// == LRU Tracker ==
/// Front = most recently used, back = least recently used.
#[derive(Debug, Default)]
pub struct LruTracker {
    order: VecDeque<String>,
}

impl LruTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // == Touch ==
    /// Marks a key as most recently used.
    pub fn touch(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            if let Some(existing) = self.order.remove(pos) {
                self.order.push_front(existing);
                return;
            }
        }
        self.order.push_front(key.to_string());
    }

    pub fn remove(&mut self, key: &str) {
        self.order.retain(|k| k != key);
    }

    // == Evict Oldest ==
    /// Removes and returns the least recently used key.
    pub fn evict_oldest(&mut self) -> Option<String> {
        self.order.pop_back()
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_evicts_in_insertion_order_without_touches() {
        let mut lru = LruTracker::new();
        lru.touch("query:a");
        lru.touch("query:b");
        lru.touch("query:c");

        assert_eq!(lru.evict_oldest(), Some("query:a".to_string()));
        assert_eq!(lru.evict_oldest(), Some("query:b".to_string()));
        assert_eq!(lru.len(), 1);
    }

    #[test]
    fn test_touch_refreshes_recency() {
        let mut lru = LruTracker::new();
        lru.touch("definition:tort");
        lru.touch("definition:lien");
        lru.touch("definition:tort");

        assert_eq!(lru.len(), 2);
        assert_eq!(lru.evict_oldest(), Some("definition:lien".to_string()));
    }

    #[test]
    fn test_remove_and_empty_eviction() {
        let mut lru = LruTracker::new();
        lru.touch("compare:x");
        lru.remove("compare:x");
        lru.remove("never-added");

        assert!(lru.is_empty());
        assert_eq!(lru.evict_oldest(), None);
    }
}
