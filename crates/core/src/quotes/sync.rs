//! Sync cycle result types and the in-flight guard.
//!
//! A sync cycle is one fetch → merge → (optional) push run. At most one cycle
//! runs at a time; a cycle requested while another is in flight is skipped.

use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};

use super::model::Quote;

/// What a completed sync cycle did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncReport {
    /// Number of records returned by the remote endpoint.
    pub fetched: usize,
    /// Records appended to the local collection, in discovery order.
    pub added: Vec<Quote>,
    /// Whether the local collection was pushed back successfully.
    pub pushed: bool,
    pub completed_at: DateTime<Utc>,
}

impl SyncReport {
    /// Get a summary string.
    pub fn summary(&self) -> String {
        format!(
            "Fetched {} remote quotes, {} new",
            self.fetched,
            self.added.len()
        )
    }
}

/// Result of requesting a sync cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyncOutcome {
    Completed(SyncReport),
    /// Another cycle was still running; nothing was done.
    AlreadyRunning,
}

/// RAII guard that releases the in-flight flag when dropped.
pub(crate) struct InFlightGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> InFlightGuard<'a> {
    /// Returns `None` if a cycle already holds the flag.
    pub(crate) fn try_acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self { flag })
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_is_exclusive_until_dropped() {
        let flag = AtomicBool::new(false);

        let first = InFlightGuard::try_acquire(&flag);
        assert!(first.is_some());
        assert!(InFlightGuard::try_acquire(&flag).is_none());

        drop(first);
        assert!(InFlightGuard::try_acquire(&flag).is_some());
    }

    #[test]
    fn test_summary() {
        let report = SyncReport {
            fetched: 5,
            added: vec![Quote::from_server("A")],
            pushed: false,
            completed_at: Utc::now(),
        };
        assert_eq!(report.summary(), "Fetched 5 remote quotes, 1 new");
    }
}
