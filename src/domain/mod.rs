pub mod enums;
pub mod task;

pub use enums::{Theme, UiMode, View};
pub use task::{format_clock, format_minutes, Millis, Task};
