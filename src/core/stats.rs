//! Pool counters and the snapshots handed to hooks.

use serde::{Deserialize, Serialize};

/// Point-in-time view of pool progress.
///
/// `completed + failed + active <= total` holds at every snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoolStats {
    /// Tasks that settled successfully.
    pub completed: u64,
    /// Tasks that exhausted their retries.
    pub failed: u64,
    /// Tasks currently in flight.
    pub active: u64,
    /// Tasks ever enqueued on the pool.
    pub total: u64,
}

impl PoolStats {
    /// Tasks that reached a terminal state.
    #[must_use]
    pub const fn settled(&self) -> u64 {
        self.completed + self.failed
    }
}

/// Counter bookkeeping owned by a single pool.
#[derive(Debug, Default)]
pub(crate) struct StatsTracker {
    stats: PoolStats,
}

impl StatsTracker {
    pub(crate) const fn snapshot(&self) -> PoolStats {
        self.stats
    }

    pub(crate) const fn enqueued(&mut self) {
        self.stats.total += 1;
    }

    pub(crate) fn admitted(&mut self) {
        self.stats.active += 1;
        self.check();
    }

    pub(crate) fn succeeded(&mut self) {
        self.release();
        self.stats.completed += 1;
        self.check();
    }

    pub(crate) fn failed(&mut self) {
        self.release();
        self.stats.failed += 1;
        self.check();
    }

    /// Forget in-flight work left behind by an interrupted run.
    pub(crate) const fn reset_active(&mut self) {
        self.stats.active = 0;
    }

    const fn release(&mut self) {
        self.stats.active = self.stats.active.saturating_sub(1);
    }

    fn check(&self) {
        debug_assert!(
            self.stats.settled() + self.stats.active <= self.stats.total,
            "counters exceed total: {:?}",
            self.stats
        );
    }
}
