//! Structural statistics for a B-tree.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counters for the structural work a tree has done.
///
/// All fields are atomic so the counters can be bumped through a shared
/// reference while the tree walks its nodes, and read from another thread
/// through a [`SharedBTree`](crate::SharedBTree) read guard.
///
/// # Memory Ordering
/// We use `Ordering::Relaxed` everywhere. The counters are independent and
/// only need atomicity.
///
/// # Example
/// ```
/// use keytree::TreeStats;
/// use std::sync::atomic::Ordering;
///
/// let stats = TreeStats::new();
/// stats.splits.fetch_add(1, Ordering::Relaxed);
/// assert_eq!(stats.snapshot().splits, 1);
/// ```
#[derive(Debug)]
pub struct TreeStats {
    /// Full children split in two during insertion.
    pub splits: AtomicU64,

    /// Sibling pairs merged around a parent key during deletion.
    pub merges: AtomicU64,

    /// Keys rotated from a sibling through the parent during deletion.
    pub borrows: AtomicU64,

    /// Times the tree gained a level (root split).
    pub root_grows: AtomicU64,

    /// Times the tree lost a level (empty root replaced by its child).
    pub root_shrinks: AtomicU64,

    /// Deletes that reached a leaf without finding the key.
    pub missed_deletes: AtomicU64,
}

impl TreeStats {
    /// Create a new stats tracker with all counters at zero.
    pub fn new() -> Self {
        Self {
            splits: AtomicU64::new(0),
            merges: AtomicU64::new(0),
            borrows: AtomicU64::new(0),
            root_grows: AtomicU64::new(0),
            root_shrinks: AtomicU64::new(0),
            missed_deletes: AtomicU64::new(0),
        }
    }

    #[inline]
    pub(crate) fn record(counter: &AtomicU64) {
        counter.fetch_add(1, Ordering::Relaxed);
    }

    /// Get a snapshot of current statistics.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            splits: self.splits.load(Ordering::Relaxed),
            merges: self.merges.load(Ordering::Relaxed),
            borrows: self.borrows.load(Ordering::Relaxed),
            root_grows: self.root_grows.load(Ordering::Relaxed),
            root_shrinks: self.root_shrinks.load(Ordering::Relaxed),
            missed_deletes: self.missed_deletes.load(Ordering::Relaxed),
        }
    }

    /// Reset all counters to zero.
    pub fn reset(&self) {
        self.splits.store(0, Ordering::Relaxed);
        self.merges.store(0, Ordering::Relaxed);
        self.borrows.store(0, Ordering::Relaxed);
        self.root_grows.store(0, Ordering::Relaxed);
        self.root_shrinks.store(0, Ordering::Relaxed);
        self.missed_deletes.store(0, Ordering::Relaxed);
    }
}

impl Default for TreeStats {
    fn default() -> Self {
        Self::new()
    }
}

/// A point-in-time copy of [`TreeStats`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub splits: u64,
    pub merges: u64,
    pub borrows: u64,
    pub root_grows: u64,
    pub root_shrinks: u64,
    pub missed_deletes: u64,
}

impl StatsSnapshot {
    /// Total rebalancing steps taken by deletes (merges plus borrows).
    pub fn rebalances(&self) -> u64 {
        self.merges + self.borrows
    }
}

impl fmt::Display for StatsSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Stats {{ splits: {}, merges: {}, borrows: {}, grows: {}, shrinks: {}, missed: {} }}",
            self.splits,
            self.merges,
            self.borrows,
            self.root_grows,
            self.root_shrinks,
            self.missed_deletes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stats_new() {
        let stats = TreeStats::new();
        assert_eq!(stats.snapshot(), StatsSnapshot::default());
    }

    #[test]
    fn test_stats_record_and_snapshot() {
        let stats = TreeStats::new();

        TreeStats::record(&stats.merges);
        TreeStats::record(&stats.merges);
        TreeStats::record(&stats.borrows);

        let snapshot = stats.snapshot();
        assert_eq!(snapshot.merges, 2);
        assert_eq!(snapshot.borrows, 1);
        assert_eq!(snapshot.rebalances(), 3);
    }

    #[test]
    fn test_stats_reset() {
        let stats = TreeStats::new();
        stats.splits.fetch_add(100, Ordering::Relaxed);

        stats.reset();

        assert_eq!(stats.splits.load(Ordering::Relaxed), 0);
    }

    #[test]
    fn test_stats_display() {
        let stats = TreeStats::new();
        stats.splits.fetch_add(8, Ordering::Relaxed);
        stats.missed_deletes.fetch_add(2, Ordering::Relaxed);

        let display = format!("{}", stats.snapshot());

        assert!(display.contains("splits: 8"));
        assert!(display.contains("missed: 2"));
    }
}
