use super::enums::TaskStatus;
use chrono::{Local, TimeZone};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Milliseconds since the Unix epoch
pub type Millis = i64;

/// Latest timestamp accepted from storage (9999-12-31T23:59:59.999Z)
pub const MAX_TIMESTAMP_MS: Millis = 253_402_300_799_999;

/// Stored timestamps must fall between the epoch and year 9999
pub fn is_plausible_timestamp(ms: Millis) -> bool {
    (0..=MAX_TIMESTAMP_MS).contains(&ms)
}

/// A single unit of focus work
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique ID, never reused
    pub id: Uuid,
    /// User-supplied label (trimmed, non-empty)
    pub text: String,
    /// Target length, fixed at creation
    #[serde(rename = "duration", alias = "plannedDurationSeconds")]
    pub planned_duration_seconds: u32,
    /// When the task was started
    pub start_time: Millis,
    /// When the task was completed (absent while active)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<Millis>,
    pub status: TaskStatus,
}

impl Task {
    pub fn new(text: &str, planned_duration_seconds: u32, start_time: Millis) -> Self {
        Self {
            id: Uuid::new_v4(),
            text: text.trim().to_string(),
            planned_duration_seconds,
            start_time,
            end_time: None,
            status: TaskStatus::Active,
        }
    }

    /// Absolute moment the countdown reaches zero
    pub fn scheduled_end(&self) -> Millis {
        self.start_time
            .saturating_add(i64::from(self.planned_duration_seconds) * 1000)
    }

    /// Stamp the terminal transition. The end time never precedes the start.
    pub fn into_completed(mut self, end_time: Millis) -> Self {
        self.end_time = Some(end_time.max(self.start_time));
        self.status = TaskStatus::Completed;
        self
    }

    pub fn is_valid_active(&self) -> bool {
        self.status == TaskStatus::Active
            && is_plausible_timestamp(self.start_time)
            && self.end_time.is_none()
            && self.planned_duration_seconds > 0
            && !self.text.trim().is_empty()
    }

    pub fn is_valid_completed(&self) -> bool {
        self.status == TaskStatus::Completed
            && is_plausible_timestamp(self.start_time)
            && matches!(
                self.end_time,
                Some(end) if end >= self.start_time && is_plausible_timestamp(end)
            )
    }

    /// Elapsed milliseconds between start and end (completed tasks only)
    pub fn actual_duration_ms(&self) -> Option<Millis> {
        self.end_time.map(|end| end.saturating_sub(self.start_time))
    }

    /// Whole minutes actually spent, rounded down
    pub fn actual_minutes(&self) -> i64 {
        self.actual_duration_ms().map(|ms| ms / 1000 / 60).unwrap_or(0)
    }

    /// Whole planned minutes, rounded down
    pub fn planned_minutes(&self) -> i64 {
        i64::from(self.planned_duration_seconds / 60)
    }

    /// Finished in fewer whole minutes than planned
    pub fn finished_early(&self) -> bool {
        self.actual_minutes() < self.planned_minutes()
    }

    /// Actual duration as "m:ss", e.g. "25:00"
    pub fn actual_formatted(&self) -> String {
        let secs = self.actual_duration_ms().unwrap_or(0) / 1000;
        format_clock(secs)
    }

    /// Local wall-clock time of completion, e.g. "2024-03-10 14:05"
    pub fn completed_at_formatted(&self) -> String {
        self.end_time
            .and_then(|end| Local.timestamp_millis_opt(end).single())
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default()
    }
}

/// Format seconds as "m:ss" (minutes are not wrapped into hours)
pub fn format_clock(seconds: i64) -> String {
    let seconds = seconds.max(0);
    format!("{}:{:02}", seconds / 60, seconds % 60)
}

/// Format minutes as "Xh Ym"
pub fn format_minutes(total_minutes: i64) -> String {
    format!("{}h {}m", total_minutes / 60, total_minutes % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_new() {
        let task = Task::new("  Write report ", 1500, 1_000);
        assert_eq!(task.text, "Write report");
        assert_eq!(task.planned_duration_seconds, 1500);
        assert_eq!(task.status, TaskStatus::Active);
        assert!(task.end_time.is_none());
        assert!(task.is_valid_active());
    }

    #[test]
    fn test_task_ids_are_unique() {
        let a = Task::new("a", 60, 0);
        let b = Task::new("a", 60, 0);
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_scheduled_end() {
        let task = Task::new("Read", 25 * 60, 10_000);
        assert_eq!(task.scheduled_end(), 10_000 + 1_500_000);
    }

    #[test]
    fn test_into_completed_clamps_end_to_start() {
        let task = Task::new("Read", 60, 10_000).into_completed(5_000);
        assert_eq!(task.end_time, Some(10_000));
        assert!(task.is_valid_completed());
    }

    #[test]
    fn test_finished_early() {
        let early = Task::new("a", 25 * 60, 0).into_completed(10 * 60 * 1000);
        assert!(early.finished_early());
        assert_eq!(early.actual_minutes(), 10);

        // 24m59s still counts as 24 whole minutes
        let almost = Task::new("b", 25 * 60, 0).into_completed(25 * 60 * 1000 - 1000);
        assert!(almost.finished_early());

        let full = Task::new("c", 25 * 60, 0).into_completed(25 * 60 * 1000);
        assert!(!full.finished_early());
    }

    #[test]
    fn test_out_of_range_timestamps_are_invalid() {
        let far_future = Task::new("Later", 60, MAX_TIMESTAMP_MS + 1);
        assert!(!far_future.is_valid_active());

        let mut before_epoch = Task::new("Old", 60, i64::MIN).into_completed(1_000);
        assert!(!before_epoch.is_valid_completed());
        before_epoch.start_time = 0;
        before_epoch.end_time = Some(i64::MAX);
        assert!(!before_epoch.is_valid_completed());

        // Arithmetic saturates instead of overflowing
        let huge = Task::new("Huge", u32::MAX, i64::MAX - 10);
        assert_eq!(huge.scheduled_end(), i64::MAX);
        let mut wide = Task::new("Wide", 60, i64::MIN);
        wide.end_time = Some(i64::MAX);
        assert_eq!(wide.actual_duration_ms(), Some(i64::MAX));
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "0:00");
        assert_eq!(format_clock(65), "1:05");
        assert_eq!(format_clock(1500), "25:00");
        assert_eq!(format_clock(-3), "0:00");
    }

    #[test]
    fn test_format_minutes() {
        assert_eq!(format_minutes(0), "0h 0m");
        assert_eq!(format_minutes(95), "1h 35m");
    }

    #[test]
    fn test_task_json_layout() {
        let task = Task::new("Write", 1500, 42).into_completed(100);
        let value = serde_json::to_value(&task).unwrap();
        assert_eq!(value["text"], "Write");
        assert_eq!(value["duration"], 1500);
        assert_eq!(value["startTime"], 42);
        assert_eq!(value["endTime"], 100);
        assert_eq!(value["status"], "completed");
    }

    #[test]
    fn test_task_accepts_long_duration_key() {
        let json = r#"{
            "id": "0b5f0f2e-7f55-4f7e-9a43-5f3c2b4f8e10",
            "text": "Plan",
            "plannedDurationSeconds": 600,
            "startTime": 0,
            "status": "active"
        }"#;
        let task: Task = serde_json::from_str(json).unwrap();
        assert_eq!(task.planned_duration_seconds, 600);
        assert!(task.is_valid_active());
    }
}
