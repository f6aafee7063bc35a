use crate::domain::{Millis, Task};
use crate::notifications::AlertPlayer;
use crate::store::TaskStore;
use crate::ticker::TickSchedule;
use std::time::Duration;
use uuid::Uuid;

/// Where the countdown for the active task stands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownPhase {
    /// No active task
    Idle,
    /// Ticking towards the end timestamp
    Running,
    /// Reached zero, alert sounding until acknowledged
    Expired,
}

/// Result of polling the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing scheduled or not due yet
    Waiting,
    /// Recomputed; still running
    Ticked { remaining: i64 },
    /// Time ran out on this tick
    Expired { end_timestamp: Millis },
}

/// Drives the countdown of the active task.
///
/// Remaining time is always `end_timestamp - now`, so delayed or dropped
/// ticks never accumulate error. The engine owns the alert and tears both
/// the schedule and the alert down when the task changes or the engine drops.
pub struct CountdownEngine {
    phase: CountdownPhase,
    task_id: Option<Uuid>,
    label: String,
    planned_seconds: u32,
    end_timestamp: Millis,
    remaining: i64,
    progress: f64,
    interval: Duration,
    schedule: Option<TickSchedule>,
    alert: Box<dyn AlertPlayer>,
}

impl CountdownEngine {
    pub fn new(alert: Box<dyn AlertPlayer>, interval: Duration) -> Self {
        Self {
            phase: CountdownPhase::Idle,
            task_id: None,
            label: String::new(),
            planned_seconds: 0,
            end_timestamp: 0,
            remaining: 0,
            progress: 0.0,
            interval,
            schedule: None,
            alert,
        }
    }

    pub fn phase(&self) -> CountdownPhase {
        self.phase
    }

    /// Seconds left as of the last tick
    pub fn remaining_seconds(&self) -> i64 {
        self.remaining
    }

    /// Share of the planned time still left, 0-100
    pub fn progress(&self) -> f64 {
        self.progress
    }

    pub fn end_timestamp(&self) -> Option<Millis> {
        match self.phase {
            CountdownPhase::Idle => None,
            _ => Some(self.end_timestamp),
        }
    }

    pub fn is_alert_playing(&self) -> bool {
        self.alert.is_playing()
    }

    /// Follow the store's active task. A different task replaces the
    /// schedule; no task returns the engine to idle.
    pub fn sync(&mut self, active: Option<&Task>, now: Millis) {
        match active {
            Some(task) if self.task_id == Some(task.id) => {}
            Some(task) => {
                self.cancel();
                self.task_id = Some(task.id);
                self.label = task.text.clone();
                self.planned_seconds = task.planned_duration_seconds;
                self.end_timestamp = task.scheduled_end();
                self.phase = CountdownPhase::Running;
                self.schedule = Some(TickSchedule::due_now(now, self.interval));
                self.recompute(now);
                tracing::debug!(id = %task.id, end = self.end_timestamp, "countdown running");
            }
            None => {
                if self.phase != CountdownPhase::Idle {
                    self.reset();
                }
            }
        }
    }

    /// Tick if the schedule says so
    pub fn poll(&mut self, now: Millis) -> TickOutcome {
        match self.schedule {
            Some(schedule) if schedule.is_due(now) => self.tick(now),
            _ => TickOutcome::Waiting,
        }
    }

    /// Recompute remaining time and progress; expire when it reaches zero
    pub fn tick(&mut self, now: Millis) -> TickOutcome {
        if self.phase != CountdownPhase::Running {
            return TickOutcome::Waiting;
        }

        self.recompute(now);
        if self.remaining <= 0 {
            self.phase = CountdownPhase::Expired;
            self.schedule = None;
            self.alert.play_looping(&self.label);
            tracing::info!(end = self.end_timestamp, "countdown expired");
            return TickOutcome::Expired {
                end_timestamp: self.end_timestamp,
            };
        }

        if let Some(schedule) = self.schedule.as_mut() {
            schedule.reschedule(now);
        }
        TickOutcome::Ticked {
            remaining: self.remaining,
        }
    }

    /// Wait before the next scheduled tick, if any
    pub fn time_until_next_tick(&self, now: Millis) -> Option<Duration> {
        self.schedule.map(|schedule| schedule.time_until_due(now))
    }

    /// Complete the active task from the countdown.
    ///
    /// After natural expiry the task ends at its scheduled end timestamp;
    /// a manual early finish ends it now.
    pub fn finish(&mut self, store: &mut TaskStore) {
        let end_time = match self.phase {
            CountdownPhase::Idle => return,
            CountdownPhase::Running => None,
            CountdownPhase::Expired => Some(self.end_timestamp),
        };
        self.reset();
        store.complete_task(end_time);
    }

    fn recompute(&mut self, now: Millis) {
        let remaining = (self.end_timestamp.saturating_sub(now) as f64 / 1000.0).round() as i64;
        if remaining <= 0 || self.planned_seconds == 0 {
            self.remaining = 0;
            self.progress = 0.0;
        } else {
            self.remaining = remaining;
            self.progress =
                (remaining as f64 / f64::from(self.planned_seconds) * 100.0).clamp(0.0, 100.0);
        }
    }

    fn cancel(&mut self) {
        self.schedule = None;
        self.alert.stop();
    }

    fn reset(&mut self) {
        self.cancel();
        self.phase = CountdownPhase::Idle;
        self.task_id = None;
        self.label.clear();
        self.planned_seconds = 0;
        self.end_timestamp = 0;
        self.remaining = 0;
        self.progress = 0.0;
    }
}

impl Drop for CountdownEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}
