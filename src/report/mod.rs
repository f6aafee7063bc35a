pub mod generator;
pub mod stats;

pub use generator::{generate_report, RECENT_DAYS};
pub use stats::{calculate_task_stats, TaskStats};
