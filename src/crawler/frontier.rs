//! The crawl frontier
//!
//! A seen-log, not a queue-of-unvisited: every URL ever admitted stays in
//! the seen set forever, while a FIFO of pending URLs feeds the batch loop.
//! Dedup happens at discovery time, so a URL can never be enqueued twice no
//! matter how many pages link to it.
//!
//! Only the coordinator touches the frontier, and only between batch joins,
//! so no internal locking is needed.

use std::collections::{HashSet, VecDeque};
use url::Url;

/// Ordered, deduplicated work queue of URLs
#[derive(Debug, Default)]
pub struct Frontier {
    /// URLs admitted but not yet dispatched, in discovery order
    pending: VecDeque<Url>,

    /// Normalized keys of every URL ever admitted (visited or pending)
    seen: HashSet<String>,
}

impl Frontier {
    /// Creates an empty frontier
    pub fn new() -> Self {
        Self::default()
    }

    /// Admits a URL if its normalized key has never been seen
    ///
    /// # Arguments
    ///
    /// * `url` - A normalized absolute URL (fragment already stripped)
    ///
    /// # Returns
    ///
    /// * `true` - The URL was new and is now pending
    /// * `false` - The key was already seen; nothing changed
    pub fn insert(&mut self, url: Url) -> bool {
        if !self.seen.insert(url.as_str().to_string()) {
            return false;
        }
        self.pending.push_back(url);
        true
    }

    /// Takes up to `n` URLs for dispatch, FIFO
    ///
    /// The returned URLs leave the pending queue but remain in the seen
    /// set; they can never be re-admitted.
    pub fn next_batch(&mut self, n: usize) -> Vec<Url> {
        let take = n.min(self.pending.len());
        self.pending.drain(..take).collect()
    }

    /// Number of URLs awaiting dispatch
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// Number of distinct URLs ever admitted
    pub fn seen(&self) -> usize {
        self.seen.len()
    }

    /// Whether a key has ever been admitted
    pub fn contains(&self, key: &str) -> bool {
        self.seen.contains(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_insert_and_drain() {
        let mut frontier = Frontier::new();
        assert!(frontier.insert(url("https://a.com/1")));
        assert!(frontier.insert(url("https://a.com/2")));
        assert_eq!(frontier.pending(), 2);
        assert_eq!(frontier.seen(), 2);

        let batch = frontier.next_batch(10);
        assert_eq!(batch.len(), 2);
        assert_eq!(frontier.pending(), 0);
        // Seen log never shrinks
        assert_eq!(frontier.seen(), 2);
    }

    #[test]
    fn test_duplicate_insert_rejected() {
        let mut frontier = Frontier::new();
        assert!(frontier.insert(url("https://a.com/x")));
        assert!(!frontier.insert(url("https://a.com/x")));
        assert_eq!(frontier.pending(), 1);
        assert_eq!(frontier.seen(), 1);
    }

    #[test]
    fn test_dispatched_url_cannot_reenter() {
        let mut frontier = Frontier::new();
        frontier.insert(url("https://a.com/x"));
        let batch = frontier.next_batch(1);
        assert_eq!(batch.len(), 1);

        // Rediscovery after dispatch must not re-enqueue
        assert!(!frontier.insert(url("https://a.com/x")));
        assert_eq!(frontier.pending(), 0);
    }

    #[test]
    fn test_fifo_order() {
        let mut frontier = Frontier::new();
        frontier.insert(url("https://a.com/1"));
        frontier.insert(url("https://a.com/2"));
        frontier.insert(url("https://a.com/3"));

        let batch = frontier.next_batch(2);
        assert_eq!(batch[0].as_str(), "https://a.com/1");
        assert_eq!(batch[1].as_str(), "https://a.com/2");
        assert_eq!(frontier.pending(), 1);
    }

    #[test]
    fn test_batch_larger_than_pending() {
        let mut frontier = Frontier::new();
        frontier.insert(url("https://a.com/1"));
        let batch = frontier.next_batch(100);
        assert_eq!(batch.len(), 1);
        assert!(frontier.next_batch(100).is_empty());
    }

    #[test]
    fn test_contains() {
        let mut frontier = Frontier::new();
        frontier.insert(url("https://a.com/x"));
        assert!(frontier.contains("https://a.com/x"));
        assert!(!frontier.contains("https://a.com/y"));
    }
}
