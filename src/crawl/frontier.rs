// src/crawl/frontier.rs
// =============================================================================
// The two data structures the crawl loop owns:
//
// - FrontierQueue: FIFO of (url, depth) work items still to visit
// - VisitedSet: URLs already fetched and saved during this run
//
// Both are created empty at the start of every run and dropped at the end.
//
// Rust concepts:
// - VecDeque: push_back / pop_front gives breadth-first order
// - HashSet::insert returns false if the value was already present, which is
//   exactly the "check and add" we need in one call
// =============================================================================

use std::collections::{HashSet, VecDeque};

// One unit of crawl work. Created when a link is accepted, consumed once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkItem {
    pub url: String,
    /// Link hops from the seed (the seed itself is depth 0)
    pub depth: usize,
}

impl WorkItem {
    pub fn new(url: impl Into<String>, depth: usize) -> Self {
        Self {
            url: url.into(),
            depth,
        }
    }
}

#[derive(Debug, Default)]
pub struct FrontierQueue {
    items: VecDeque<WorkItem>,
}

impl FrontierQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, item: WorkItem) {
        self.items.push_back(item);
    }

    pub fn pop(&mut self) -> Option<WorkItem> {
        self.items.pop_front()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

#[derive(Debug, Default)]
pub struct VisitedSet {
    urls: HashSet<String>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, url: &str) -> bool {
        self.urls.contains(url)
    }

    // Returns true if the URL was not there before
    pub fn add(&mut self, url: &str) -> bool {
        if self.urls.contains(url) {
            return false;
        }
        self.urls.insert(url.to_string())
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frontier_is_fifo() {
        let mut queue = FrontierQueue::new();
        queue.push(WorkItem::new("https://a.com/", 0));
        queue.push(WorkItem::new("https://b.com/", 1));
        queue.push(WorkItem::new("https://c.com/", 1));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.pop().unwrap().url, "https://a.com/");
        assert_eq!(queue.pop().unwrap().url, "https://b.com/");
        assert_eq!(queue.pop().unwrap().url, "https://c.com/");
        assert!(queue.pop().is_none());
        assert_eq!(queue.len(), 0);
    }

    #[test]
    fn test_frontier_keeps_duplicates() {
        // Dedupe happens against the visited set, not inside the queue
        let mut queue = FrontierQueue::new();
        queue.push(WorkItem::new("https://a.com/", 1));
        queue.push(WorkItem::new("https://a.com/", 2));
        assert_eq!(queue.len(), 2);
    }

    #[test]
    fn test_visited_add_is_idempotent() {
        let mut visited = VisitedSet::new();
        assert_eq!(visited.len(), 0);
        assert!(visited.add("https://a.com/"));
        assert!(!visited.add("https://a.com/"));
        assert!(visited.contains("https://a.com/"));
        assert!(!visited.contains("https://b.com/"));
        assert_eq!(visited.len(), 1);
    }
}
