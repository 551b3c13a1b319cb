//! Bounded telemetry history
//!
//! Fixed-capacity, insertion-ordered buffer. When full, pushing a new
//! entry evicts the oldest one, so memory stays bounded no matter how
//! long a device keeps reporting.

use std::collections::VecDeque;

/// A FIFO buffer that holds at most `capacity` entries
#[derive(Debug, Clone)]
pub struct BoundedHistory<T> {
    entries: VecDeque<T>,
    capacity: usize,
}

impl<T> BoundedHistory<T> {
    /// Create an empty history with the given capacity
    ///
    /// A zero capacity is clamped to 1 so a push always succeeds.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append an entry, evicting the oldest if at capacity
    pub fn push(&mut self, entry: T) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Number of entries currently held
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the history is empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries this history can hold
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T: Clone> BoundedHistory<T> {
    /// The most recent `min(limit, len)` entries, oldest first
    pub fn recent(&self, limit: usize) -> Vec<T> {
        let take = limit.min(self.entries.len());
        let skip = self.entries.len() - take;
        self.entries.iter().skip(skip).cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_within_capacity() {
        let mut history = BoundedHistory::new(3);
        history.push(1);
        history.push(2);

        assert_eq!(history.len(), 2);
        assert_eq!(history.recent(10), vec![1, 2]);
    }

    #[test]
    fn test_eviction_at_capacity() {
        let mut history = BoundedHistory::new(3);
        for i in 1..=5 {
            history.push(i);
        }

        // Oldest entries evicted first
        assert_eq!(history.len(), 3);
        assert_eq!(history.recent(3), vec![3, 4, 5]);
    }

    #[test]
    fn test_recent_returns_newest_oldest_first() {
        let mut history = BoundedHistory::new(10);
        for i in 1..=6 {
            history.push(i);
        }

        assert_eq!(history.recent(3), vec![4, 5, 6]);
        assert_eq!(history.recent(0), Vec::<i32>::new());
    }

    #[test]
    fn test_recent_limit_exceeds_len() {
        let mut history = BoundedHistory::new(10);
        history.push("a");
        history.push("b");

        assert_eq!(history.recent(100), vec!["a", "b"]);
    }

    #[test]
    fn test_zero_capacity_clamped() {
        let mut history = BoundedHistory::new(0);
        history.push(42);

        assert_eq!(history.len(), 1);
        assert_eq!(history.capacity(), 1);
    }

    #[test]
    fn test_long_run_stays_bounded() {
        let mut history = BoundedHistory::new(1000);
        for i in 0..2500 {
            history.push(i);
        }

        assert_eq!(history.len(), 1000);
        let recent = history.recent(1000);
        assert_eq!(recent.first(), Some(&1500));
        assert_eq!(recent.last(), Some(&2499));
    }
}
