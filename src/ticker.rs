use crate::domain::Millis;
use std::time::Duration;

/// Default tick interval in milliseconds
pub const DEFAULT_TICK_MS: u64 = 1000;

/// How long the event loop waits for input when no countdown is running
pub const IDLE_POLL_MS: u64 = 500;

/// Shortest tick interval accepted from config
pub const MIN_TICK_MS: u64 = 100;

/// Get tick duration, clamped to the supported minimum
pub fn tick_duration(interval_ms: u64) -> Duration {
    Duration::from_millis(interval_ms.max(MIN_TICK_MS))
}

/// Event-loop wait when nothing is scheduled
pub fn idle_poll_duration() -> Duration {
    Duration::from_millis(IDLE_POLL_MS)
}

/// A repeating deadline on the wall clock. Missed deadlines are skipped
/// rather than queued, so a suspended process resumes with one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickSchedule {
    interval_ms: Millis,
    next_due: Millis,
}

impl TickSchedule {
    /// A schedule whose first tick is due immediately
    pub fn due_now(now: Millis, interval: Duration) -> Self {
        Self {
            interval_ms: (interval.as_millis() as Millis).max(1),
            next_due: now,
        }
    }

    #[cfg(test)]
    pub fn next_due(&self) -> Millis {
        self.next_due
    }

    pub fn is_due(&self, now: Millis) -> bool {
        now >= self.next_due
    }

    /// Time left before the next tick (zero when overdue)
    pub fn time_until_due(&self, now: Millis) -> Duration {
        Duration::from_millis((self.next_due - now).max(0) as u64)
    }

    /// Move the deadline to the first interval boundary after `now`
    pub fn reschedule(&mut self, now: Millis) {
        if now >= self.next_due {
            let missed = (now - self.next_due) / self.interval_ms + 1;
            self.next_due += missed * self.interval_ms;
        }
    }
}
