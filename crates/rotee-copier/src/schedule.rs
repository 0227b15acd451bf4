//! Wall-clock gating for identity checks.

use std::time::Duration;

use tokio::time::Instant;

/// Decides when the next identity check is due.
///
/// The cadence follows elapsed time, not chunk count, so a fast producer does
/// not turn into one `stat` per read.
#[derive(Debug, Clone, Copy)]
pub struct CheckSchedule {
    interval: Duration,
    last_check: Instant,
}

impl CheckSchedule {
    /// Start a schedule whose first check falls `interval` after `now`.
    #[must_use]
    pub const fn starting_at(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            last_check: now,
        }
    }

    /// Report whether a check is due at `now`; when it is, the next one is
    /// scheduled `interval` after `now`.
    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_check) < self.interval {
            return false;
        }
        self.last_check = now;
        true
    }

    /// Configured interval between checks.
    #[must_use]
    pub const fn interval(&self) -> Duration {
        self.interval
    }
}
