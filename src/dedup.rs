//! Run-scoped tracker of URLs that already produced a feed item.

use std::collections::HashSet;

/// Number of URLs remembered when no other limit is configured.
pub const DEFAULT_CAPACITY: usize = 200;

/// Set of accepted absolute URLs, optionally bounded.
///
/// Once a bounded tracker is full, further inserts are silently dropped: the
/// run keeps going and later repeats of unseen URLs are simply not caught.
/// There is no removal; the tracker lives for exactly one run.
#[derive(Debug, Clone)]
pub struct DedupTracker {
    seen: HashSet<String>,
    capacity: Option<usize>,
}

impl DedupTracker {
    /// Remember at most `capacity` URLs. The bound is logical; storage grows
    /// on demand.
    pub fn bounded(capacity: usize) -> Self {
        Self {
            seen: HashSet::with_capacity(capacity.min(DEFAULT_CAPACITY)),
            capacity: Some(capacity),
        }
    }

    pub fn unbounded() -> Self {
        Self {
            seen: HashSet::new(),
            capacity: None,
        }
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    /// Remember `url`. Returns `false` when the insert was dropped because
    /// the tracker is full.
    pub fn add(&mut self, url: &str) -> bool {
        if self.is_full() {
            return false;
        }
        self.seen.insert(url.to_string());
        true
    }

    pub fn is_full(&self) -> bool {
        self.capacity.is_some_and(|cap| self.seen.len() >= cap)
    }

    pub fn len(&self) -> usize {
        self.seen.len()
    }
}

impl Default for DedupTracker {
    fn default() -> Self {
        Self::bounded(DEFAULT_CAPACITY)
    }
}
