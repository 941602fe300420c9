//! Thread-safe handle around a single [`LogIndex`].
//!
//! Every operation takes one coarse lock on the whole index. Queries are
//! short scans over resident data, so finer-grained locking is not needed.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::index::LogIndex;
use crate::models::{Stats, TimeMode};

/// Cloneable, shareable [`LogIndex`].
#[derive(Debug, Clone, Default)]
pub struct SharedLogIndex {
    inner: Arc<Mutex<LogIndex>>,
}

impl SharedLogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an already populated index.
    pub fn from_index(index: LogIndex) -> Self {
        Self {
            inner: Arc::new(Mutex::new(index)),
        }
    }

    pub fn insert(&self, timestamp: i64, category: &str, severity: f64) {
        self.lock().insert(timestamp, category, severity);
    }

    pub fn stats_by_category(&self, category: &str) -> Option<Stats> {
        self.lock().stats_by_category(category)
    }

    pub fn stats_by_time(&self, mode: TimeMode, threshold: i64) -> Stats {
        self.lock().stats_by_time(mode, threshold)
    }

    pub fn stats_by_category_and_time(
        &self,
        category: &str,
        mode: TimeMode,
        threshold: i64,
    ) -> Option<Stats> {
        self.lock()
            .stats_by_category_and_time(category, mode, threshold)
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    // `insert` finishes both pushes before a panic could unwind through the
    // guard, so a poisoned index is still consistent.
    fn lock(&self) -> MutexGuard<'_, LogIndex> {
        self.inner.lock().unwrap_or_else(|poisoned| {
            tracing::warn!("log index mutex poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_shared_index_clones_share_state() {
        let a = SharedLogIndex::new();
        let b = a.clone();
        a.insert(1, "ERROR", 2.0);

        assert_eq!(b.len(), 1);
        assert_eq!(b.stats_by_category("ERROR").unwrap().mean, 2.0);
    }

    #[test]
    fn test_shared_index_concurrent_inserts() {
        let shared = SharedLogIndex::new();
        let handles: Vec<_> = (0..4)
            .map(|t| {
                let shared = shared.clone();
                thread::spawn(move || {
                    for i in 0..250 {
                        shared.insert(i, if t % 2 == 0 { "EVEN" } else { "ODD" }, 1.0);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(shared.len(), 1000);
        assert_eq!(shared.stats_by_category("EVEN").unwrap().count, 500);
        assert_eq!(shared.stats_by_time(TimeMode::Before, 250).count, 1000);
    }

    #[test]
    fn test_shared_index_from_populated_index() {
        let mut index = LogIndex::new();
        index.insert(10, "WARN", 4.0);
        let shared = SharedLogIndex::from_index(index);

        assert!(!shared.is_empty());
        assert_eq!(
            shared.stats_by_category_and_time("WARN", TimeMode::After, 30),
            Some(Stats::EMPTY)
        );
        assert!(shared
            .stats_by_category_and_time("INFO", TimeMode::After, 0)
            .is_none());
    }
}
