//! Bounded utterance queue with drop-oldest backpressure

use std::collections::VecDeque;

/// Maximum number of pending utterances
pub const MAX_QUEUE_SIZE: usize = 2;

/// Ordered queue of pending utterance texts, capacity [`MAX_QUEUE_SIZE`].
///
/// Insertion is always at the tail. When full, the head (oldest) item is
/// evicted to admit the new one.
#[derive(Debug, Default)]
pub struct SpeechQueue {
    items: VecDeque<String>,
}

impl SpeechQueue {
    /// Create an empty queue
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::with_capacity(MAX_QUEUE_SIZE),
        }
    }

    /// Append `text` at the tail, evicting the head if at capacity.
    ///
    /// Returns the evicted text, if any.
    pub fn push(&mut self, text: String) -> Option<String> {
        let evicted = if self.items.len() >= MAX_QUEUE_SIZE {
            self.items.pop_front()
        } else {
            None
        };
        self.items.push_back(text);
        evicted
    }

    /// Remove and return the head (oldest) item
    pub fn pop(&mut self) -> Option<String> {
        self.items.pop_front()
    }

    /// Peek the tail (newest) item
    #[must_use]
    pub fn tail(&self) -> Option<&str> {
        self.items.back().map(String::as_str)
    }

    /// Number of pending items
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue holds no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Drop all pending items
    pub fn clear(&mut self) {
        self.items.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_appends_at_tail() {
        let mut queue = SpeechQueue::new();
        assert!(queue.push("a".to_string()).is_none());
        assert!(queue.push("b".to_string()).is_none());
        assert_eq!(queue.tail(), Some("b"));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn push_at_capacity_evicts_oldest() {
        let mut queue = SpeechQueue::new();
        queue.push("a".to_string());
        queue.push("b".to_string());
        let evicted = queue.push("c".to_string());
        assert_eq!(evicted.as_deref(), Some("a"));
        assert_eq!(queue.len(), MAX_QUEUE_SIZE);
        assert_eq!(queue.pop().as_deref(), Some("b"));
        assert_eq!(queue.pop().as_deref(), Some("c"));
    }

    #[test]
    fn pop_removes_from_head() {
        let mut queue = SpeechQueue::new();
        queue.push("a".to_string());
        queue.push("b".to_string());
        assert_eq!(queue.pop().as_deref(), Some("a"));
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.tail(), Some("b"));
    }

    #[test]
    fn clear_empties_queue() {
        let mut queue = SpeechQueue::new();
        queue.push("a".to_string());
        queue.clear();
        assert!(queue.is_empty());
        assert!(queue.pop().is_none());
    }
}
