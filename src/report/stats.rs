use crate::domain::Task;
use chrono::{Local, NaiveDate, TimeZone};
use std::collections::BTreeMap;

/// Summary of the completed history, always derived fresh
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskStats {
    pub total_tasks: usize,
    /// Sum of whole minutes spent per task
    pub total_time_minutes: i64,
    /// Tasks finished in fewer whole minutes than planned
    pub completed_early_count: usize,
    pub average_duration_minutes: i64,
    /// Tasks started per local calendar date
    pub tasks_per_day: BTreeMap<NaiveDate, usize>,
    pub most_productive_day: Option<NaiveDate>,
}

impl TaskStats {
    /// Share of tasks finished early, as a rounded percentage
    pub fn completed_early_percent(&self) -> Option<i64> {
        if self.total_tasks == 0 {
            return None;
        }
        let ratio = self.completed_early_count as f64 / self.total_tasks as f64;
        Some((ratio * 100.0).round() as i64)
    }

    /// Task count on the most productive day
    pub fn most_productive_count(&self) -> usize {
        self.most_productive_day
            .and_then(|day| self.tasks_per_day.get(&day).copied())
            .unwrap_or(0)
    }

    /// The `days` most recent dates with their counts, newest first
    pub fn recent_days(&self, days: usize) -> Vec<(NaiveDate, usize)> {
        self.tasks_per_day
            .iter()
            .rev()
            .take(days)
            .map(|(date, count)| (*date, *count))
            .collect()
    }
}

/// Calculate statistics with dates in the local time zone
pub fn calculate_task_stats(completed: &[Task]) -> TaskStats {
    calculate_task_stats_in(completed, &Local)
}

/// Calculate statistics with dates taken in the given time zone
pub fn calculate_task_stats_in<Tz: TimeZone>(completed: &[Task], tz: &Tz) -> TaskStats {
    let total_tasks = completed.len();
    let mut total_time_minutes = 0;
    let mut completed_early_count = 0;
    let mut tasks_per_day: BTreeMap<NaiveDate, usize> = BTreeMap::new();

    for task in completed {
        total_time_minutes += task.actual_minutes();

        if task.finished_early() {
            completed_early_count += 1;
        }

        if let Some(started) = tz.timestamp_millis_opt(task.start_time).earliest() {
            *tasks_per_day.entry(started.date_naive()).or_insert(0) += 1;
        }
    }

    let average_duration_minutes = if total_tasks > 0 {
        (total_time_minutes as f64 / total_tasks as f64).round() as i64
    } else {
        0
    };

    let most_productive_day = most_productive_day(&tasks_per_day);

    TaskStats {
        total_tasks,
        total_time_minutes,
        completed_early_count,
        average_duration_minutes,
        tasks_per_day,
        most_productive_day,
    }
}

/// Date with the highest count. Walks dates in ascending order and keeps
/// the earliest date on ties.
fn most_productive_day(tasks_per_day: &BTreeMap<NaiveDate, usize>) -> Option<NaiveDate> {
    tasks_per_day
        .iter()
        .fold(None, |best: Option<(NaiveDate, usize)>, (date, count)| match best {
            Some((_, best_count)) if best_count >= *count => best,
            _ => Some((*date, *count)),
        })
        .map(|(date, _)| date)
}
