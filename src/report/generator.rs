use crate::domain::{format_minutes, Task};
use crate::persistence::{atomic_write, report_file, JsonFileStorage, StateStorage, STATE_KEY};
use crate::report::stats::{calculate_task_stats, TaskStats};
use anyhow::Result;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};

/// Rows in the recent-days table
pub const RECENT_DAYS: usize = 7;

/// Render the statistics report as markdown
pub fn render_report(
    stats: &TaskStats,
    completed: &[Task],
    active: Option<&Task>,
    date: NaiveDate,
) -> String {
    let mut report = String::new();

    report.push_str(&format!("# Focus Report - {}\n\n", date));

    // Overall
    report.push_str("## Overall\n\n");
    report.push_str(&format!("- **Total Tasks:** {}\n", stats.total_tasks));
    report.push_str(&format!(
        "- **Total Time:** {}\n",
        format_minutes(stats.total_time_minutes)
    ));
    match stats.completed_early_percent() {
        Some(percent) => report.push_str(&format!(
            "- **Completed Early:** {} ({}% of tasks)\n",
            stats.completed_early_count, percent
        )),
        None => report.push_str("- **Completed Early:** 0 (no tasks yet)\n"),
    }
    if let Some(task) = active {
        report.push_str(&format!(
            "- **In Progress:** {} ({} planned)\n",
            task.text,
            format_minutes(task.planned_minutes())
        ));
    }
    report.push('\n');

    // Time management
    report.push_str("## Time Management\n\n");
    report.push_str(&format!(
        "- **Average Duration:** {} minutes\n",
        stats.average_duration_minutes
    ));
    if let Some(day) = stats.most_productive_day {
        report.push_str(&format!(
            "- **Most Productive Day:** {} ({} tasks)\n",
            day,
            stats.most_productive_count()
        ));
    }
    report.push('\n');

    // Recent days
    let recent = stats.recent_days(RECENT_DAYS);
    if !recent.is_empty() {
        report.push_str(&format!("## Last {} Days\n\n", RECENT_DAYS));
        report.push_str("| Date | Tasks |\n");
        report.push_str("|------|-------|\n");
        for (day, count) in recent {
            report.push_str(&format!("| {} | {} |\n", day, count));
        }
        report.push('\n');
    }

    // History
    if !completed.is_empty() {
        report.push_str("## Completed Tasks\n\n");
        for task in completed {
            let marker = if task.finished_early() { " (early)" } else { "" };
            report.push_str(&format!(
                "- {} | {} | {}{}\n",
                task.completed_at_formatted(),
                task.actual_formatted(),
                task.text,
                marker
            ));
        }
        report.push('\n');
    }

    report
}

/// Generate a report from the stored state in `data_dir`
pub fn generate_report(data_dir: &Path, output_path: Option<PathBuf>) -> Result<PathBuf> {
    let today = Local::now().date_naive();
    let storage = JsonFileStorage::new(data_dir);
    let state = storage.load(STATE_KEY).unwrap_or_default();

    let stats = calculate_task_stats(&state.completed_tasks);
    let content = render_report(
        &stats,
        &state.completed_tasks,
        state.active_task.as_ref(),
        today,
    );

    let path = output_path.unwrap_or_else(|| report_file(data_dir, today));
    atomic_write(&path, &content)?;
    tracing::info!(path = %path.display(), tasks = stats.total_tasks, "wrote report");

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::files::slot_file;
    use crate::report::stats::calculate_task_stats_in;
    use crate::store::TasksState;
    use chrono::{TimeZone, Utc};
    use tempfile::tempdir;

    fn sample_tasks() -> Vec<Task> {
        let start = Utc.with_ymd_and_hms(2024, 3, 10, 9, 0, 0).unwrap().timestamp_millis();
        vec![
            Task::new("Review PR", 45 * 60, start + 3_600_000).into_completed(start + 3_600_000 + 600_000),
            Task::new("Write report", 25 * 60, start).into_completed(start + 1_500_000),
        ]
    }

    #[test]
    fn test_render_report_sections() {
        let tasks = sample_tasks();
        let stats = calculate_task_stats_in(&tasks, &Utc);
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();

        let report = render_report(&stats, &tasks, None, date);

        assert!(report.starts_with("# Focus Report - 2024-03-10\n"));
        assert!(report.contains("- **Total Tasks:** 2\n"));
        assert!(report.contains("- **Total Time:** 0h 35m\n"));
        assert!(report.contains("- **Completed Early:** 1 (50% of tasks)\n"));
        assert!(report.contains("- **Average Duration:** 18 minutes\n"));
        assert!(report.contains("- **Most Productive Day:** 2024-03-10 (2 tasks)\n"));
        assert!(report.contains("| 2024-03-10 | 2 |\n"));
        assert!(report.contains("| 10:00 | Review PR (early)\n"));
        assert!(report.contains("| 25:00 | Write report\n"));
    }

    #[test]
    fn test_render_empty_report() {
        let stats = calculate_task_stats_in(&[], &Utc);
        let date = NaiveDate::from_ymd_opt(2024, 3, 10).unwrap();
        let active = Task::new("Focus", 25 * 60, 0);

        let report = render_report(&stats, &[], Some(&active), date);

        assert!(report.contains("- **Completed Early:** 0 (no tasks yet)\n"));
        assert!(report.contains("- **In Progress:** Focus (0h 25m planned)\n"));
        assert!(!report.contains("Most Productive Day"));
        assert!(!report.contains("## Last 7 Days"));
        assert!(!report.contains("## Completed Tasks"));
    }

    #[test]
    fn test_generate_report_writes_file() {
        let temp_dir = tempdir().unwrap();
        let storage = JsonFileStorage::new(temp_dir.path());
        let state = TasksState {
            active_task: None,
            completed_tasks: sample_tasks(),
            is_loading: false,
        };
        storage.save(STATE_KEY, &state).unwrap();
        assert!(slot_file(temp_dir.path(), STATE_KEY).exists());

        let output = temp_dir.path().join("out.md");
        let path = generate_report(temp_dir.path(), Some(output.clone())).unwrap();

        assert_eq!(path, output);
        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("- **Total Tasks:** 2\n"));
    }
}
