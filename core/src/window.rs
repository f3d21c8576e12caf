//! Bounded newest-first history for a single feed.

use serde::{Serialize, Serializer};
use std::collections::VecDeque;

/// Events retained per feed.
pub const FEED_WINDOW_CAPACITY: usize = 50;

/// Fixed-capacity sliding window. New entries go to the front;
/// once full, each push evicts the oldest entry from the back.
#[derive(Debug, Clone)]
pub struct RecentWindow<T> {
    items:    VecDeque<T>,
    capacity: usize,
}

impl<T> RecentWindow<T> {
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "window capacity must be > 0");
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push the newest entry. Returns the evicted entry, if any.
    pub fn push_front(&mut self, item: T) -> Option<T> {
        let evicted = if self.items.len() == self.capacity {
            self.items.pop_back()
        } else {
            None
        };
        self.items.push_front(item);
        evicted
    }

    pub fn newest(&self) -> Option<&T> {
        self.items.front()
    }

    pub fn oldest(&self) -> Option<&T> {
        self.items.back()
    }

    /// Newest first.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }
}

impl<T> Default for RecentWindow<T> {
    fn default() -> Self {
        Self::new(FEED_WINDOW_CAPACITY)
    }
}

impl<T: Serialize> Serialize for RecentWindow<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}
