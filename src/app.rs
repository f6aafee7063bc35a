use crate::countdown::{CountdownEngine, CountdownPhase, TickOutcome};
use crate::domain::{Theme, UiMode, View};
use crate::persistence::{save_config, Config};
use crate::report::{calculate_task_stats, TaskStats};
use crate::store::{is_valid_task_input, TaskStore};
use crate::ticker;
use anyhow::Result;
use std::path::PathBuf;
use std::time::Duration;

/// Maximum length of a task label typed into the form
pub const MAX_TASK_TEXT: usize = 120;

/// New-task form state
#[derive(Debug, Clone)]
pub struct InputFormState {
    pub text: String,
    pub preset_index: usize,
    /// Validation message from the last submit
    pub error: Option<String>,
}

/// Check the form before it reaches the store
pub fn validate_task_input(text: &str, duration_minutes: u32) -> Result<(), &'static str> {
    if text.trim().is_empty() {
        return Err("Enter what you want to focus on");
    }
    if !is_valid_task_input(text, duration_minutes) {
        return Err("Pick a positive duration");
    }
    Ok(())
}

/// Main application state
pub struct AppState {
    pub store: TaskStore,
    pub countdown: CountdownEngine,
    pub config: Config,
    /// Where theme changes are written back (None when running without a data dir)
    pub config_path: Option<PathBuf>,
    pub presets: Vec<u32>,
    pub view: View,
    pub ui_mode: UiMode,
    pub input_form: InputFormState,
    pub history_scroll_offset: usize,
    /// Spinner frame counter for the loading screen (increments every tick)
    pub spinner_frame: u32,
}

impl AppState {
    pub fn new(store: TaskStore, countdown: CountdownEngine, config: Config) -> Self {
        let presets = config.presets();
        let input_form = InputFormState {
            text: String::new(),
            preset_index: config.default_preset_index(),
            error: None,
        };

        let mut app = Self {
            store,
            countdown,
            config,
            config_path: None,
            presets,
            view: View::Dashboard,
            ui_mode: UiMode::Normal,
            input_form,
            history_scroll_offset: 0,
            spinner_frame: 0,
        };
        app.sync_countdown();
        app
    }

    pub fn with_config_path(mut self, path: PathBuf) -> Self {
        self.config_path = Some(path);
        self
    }

    pub fn theme(&self) -> Theme {
        self.config.theme
    }

    /// Point the countdown at whatever task the store now holds
    pub fn sync_countdown(&mut self) {
        let now = self.store.now();
        self.countdown.sync(self.store.active_task(), now);
    }

    /// Run the countdown tick if due
    pub fn tick(&mut self) -> TickOutcome {
        self.spinner_frame = self.spinner_frame.wrapping_add(1);
        let now = self.store.now();
        self.countdown.poll(now)
    }

    /// How long the event loop may block before the next tick
    pub fn poll_timeout(&self) -> Duration {
        let now = self.store.now();
        self.countdown
            .time_until_next_tick(now)
            .unwrap_or_else(ticker::idle_poll_duration)
    }

    pub fn selected_duration(&self) -> u32 {
        self.presets
            .get(self.input_form.preset_index)
            .copied()
            .unwrap_or(self.config.default_duration_minutes)
    }

    pub fn is_idle(&self) -> bool {
        self.store.active_task().is_none()
    }

    /// Open the new-task form (only while no task is active)
    pub fn start_add_task(&mut self) {
        if self.is_idle() && !self.store.is_loading() {
            self.view = View::Dashboard;
            self.ui_mode = UiMode::EditingTask;
            self.input_form.error = None;
        }
    }

    pub fn input_form_add_char(&mut self, c: char) {
        if self.input_form.text.chars().count() < MAX_TASK_TEXT {
            self.input_form.text.push(c);
            self.input_form.error = None;
        }
    }

    pub fn input_form_backspace(&mut self) {
        self.input_form.text.pop();
    }

    pub fn next_preset(&mut self) {
        if !self.presets.is_empty() {
            self.input_form.preset_index = (self.input_form.preset_index + 1) % self.presets.len();
        }
    }

    pub fn previous_preset(&mut self) {
        if !self.presets.is_empty() {
            let len = self.presets.len();
            self.input_form.preset_index = (self.input_form.preset_index + len - 1) % len;
        }
    }

    /// Start the typed task; keeps the form open with a message on bad input
    pub fn submit_input_form(&mut self) {
        let minutes = self.selected_duration();
        if let Err(message) = validate_task_input(&self.input_form.text, minutes) {
            self.input_form.error = Some(message.to_string());
            return;
        }

        let text = self.input_form.text.trim().to_string();
        self.store.start_new_task(&text, minutes);
        self.sync_countdown();
        self.reset_input_form();
        self.ui_mode = UiMode::Normal;
    }

    pub fn cancel_input_form(&mut self) {
        self.reset_input_form();
        self.ui_mode = UiMode::Normal;
    }

    fn reset_input_form(&mut self) {
        self.input_form.text.clear();
        self.input_form.preset_index = self.config.default_preset_index();
        self.input_form.error = None;
    }

    /// Finish the active task: early while running, acknowledgment once expired
    pub fn finish_active_task(&mut self) {
        if self.countdown.phase() == CountdownPhase::Idle {
            return;
        }
        self.countdown.finish(&mut self.store);
        self.sync_countdown();
        self.reset_history_scroll();
    }

    pub fn request_clear_history(&mut self) {
        if !self.store.completed_tasks().is_empty() {
            self.ui_mode = UiMode::ConfirmClear;
        }
    }

    pub fn confirm_clear_history(&mut self) {
        if self.ui_mode == UiMode::ConfirmClear {
            self.store.clear_completed_tasks();
            self.reset_history_scroll();
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn cancel_clear_history(&mut self) {
        if self.ui_mode == UiMode::ConfirmClear {
            self.ui_mode = UiMode::Normal;
        }
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggle();
    }

    /// Switch to the next theme and remember it in config.json
    pub fn cycle_theme(&mut self) -> Result<()> {
        self.config.theme = self.config.theme.next();
        if let Some(path) = &self.config_path {
            save_config(path, &self.config)?;
        }
        Ok(())
    }

    pub fn stats(&self) -> TaskStats {
        calculate_task_stats(self.store.completed_tasks())
    }

    pub fn scroll_history_up(&mut self) {
        self.history_scroll_offset = self.history_scroll_offset.saturating_sub(1);
    }

    pub fn scroll_history_down(&mut self) {
        let max = self.store.completed_tasks().len().saturating_sub(1);
        if self.history_scroll_offset < max {
            self.history_scroll_offset += 1;
        }
    }

    pub fn reset_history_scroll(&mut self) {
        self.history_scroll_offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::countdown::tests::{AlertLog, RecordingAlert};
    use crate::store::tests::ManualClock;
    use crate::store::TasksState;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn create_test_app() -> (AppState, ManualClock, Rc<RefCell<AlertLog>>) {
        let clock = ManualClock::at(0);
        let mut store = TaskStore::new(Box::new(clock.clone()));
        store.set_tasks_state(TasksState::default());
        let log = Rc::new(RefCell::new(AlertLog::default()));
        let countdown = CountdownEngine::new(
            Box::new(RecordingAlert(Rc::clone(&log))),
            ticker::tick_duration(1000),
        );
        (AppState::new(store, countdown, Config::default()), clock, log)
    }

    fn type_text(app: &mut AppState, text: &str) {
        for c in text.chars() {
            app.input_form_add_char(c);
        }
    }

    #[test]
    fn test_app_state_new() {
        let (app, _clock, _log) = create_test_app();
        assert_eq!(app.view, View::Dashboard);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert_eq!(app.selected_duration(), 25);
        assert_eq!(app.countdown.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn test_submit_starts_countdown() {
        let (mut app, _clock, _log) = create_test_app();
        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::EditingTask);

        type_text(&mut app, "Write report");
        app.next_preset();
        app.submit_input_form();

        let task = app.store.active_task().unwrap();
        assert_eq!(task.text, "Write report");
        assert_eq!(task.planned_duration_seconds, 45 * 60);
        assert_eq!(app.countdown.phase(), CountdownPhase::Running);
        assert_eq!(app.ui_mode, UiMode::Normal);
        assert!(app.input_form.text.is_empty());
    }

    #[test]
    fn test_submit_empty_text_shows_error() {
        let (mut app, _clock, _log) = create_test_app();
        app.start_add_task();
        type_text(&mut app, "   ");
        app.submit_input_form();

        assert!(app.store.active_task().is_none());
        assert_eq!(app.ui_mode, UiMode::EditingTask);
        assert!(app.input_form.error.is_some());
    }

    #[test]
    fn test_form_unavailable_while_task_active() {
        let (mut app, _clock, _log) = create_test_app();
        app.store.start_new_task("Busy", 25);
        app.sync_countdown();

        app.start_add_task();
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_preset_cycling_wraps() {
        let (mut app, _clock, _log) = create_test_app();
        app.previous_preset();
        assert_eq!(app.selected_duration(), 90);
        app.next_preset();
        assert_eq!(app.selected_duration(), 25);
    }

    #[test]
    fn test_expire_then_acknowledge() {
        let (mut app, clock, log) = create_test_app();
        app.store.start_new_task("Write report", 25);
        app.sync_countdown();

        clock.set(25 * 60 * 1000);
        assert!(matches!(app.tick(), TickOutcome::Expired { .. }));
        assert!(log.borrow().playing);

        app.finish_active_task();
        assert!(!log.borrow().playing);
        let done = &app.store.completed_tasks()[0];
        assert_eq!(done.end_time.unwrap() - done.start_time, 1_500_000);
        assert_eq!(app.countdown.phase(), CountdownPhase::Idle);
    }

    #[test]
    fn test_finish_early() {
        let (mut app, clock, _log) = create_test_app();
        app.store.start_new_task("Read", 25);
        app.sync_countdown();
        clock.set(5 * 60 * 1000);
        app.tick();

        app.finish_active_task();
        let done = &app.store.completed_tasks()[0];
        assert_eq!(done.end_time, Some(5 * 60 * 1000));
        assert!(done.finished_early());
    }

    #[test]
    fn test_clear_history_needs_confirmation() {
        let (mut app, _clock, _log) = create_test_app();
        app.store.start_new_task("Old", 5);
        app.store.complete_task(None);

        app.request_clear_history();
        assert_eq!(app.ui_mode, UiMode::ConfirmClear);
        app.cancel_clear_history();
        assert_eq!(app.store.completed_tasks().len(), 1);

        app.request_clear_history();
        app.confirm_clear_history();
        assert!(app.store.completed_tasks().is_empty());
        assert_eq!(app.ui_mode, UiMode::Normal);
    }

    #[test]
    fn test_poll_timeout_follows_schedule() {
        let (mut app, clock, _log) = create_test_app();
        assert_eq!(app.poll_timeout(), ticker::idle_poll_duration());

        app.store.start_new_task("Read", 5);
        app.sync_countdown();
        app.tick();
        clock.set(300);
        assert_eq!(app.poll_timeout(), Duration::from_millis(700));
    }

    #[test]
    fn test_cycle_theme_writes_config() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        let (app, _clock, _log) = create_test_app();
        let mut app = app.with_config_path(path.clone());

        app.cycle_theme().unwrap();
        assert_eq!(app.theme(), Theme::Dark);
        let saved = crate::persistence::load_config(&path).unwrap();
        assert_eq!(saved.theme, Theme::Dark);
    }

    #[test]
    fn test_history_scroll_bounds() {
        let (mut app, _clock, _log) = create_test_app();
        for name in ["a", "b"] {
            app.store.start_new_task(name, 5);
        }
        app.store.complete_task(None);

        app.scroll_history_down();
        app.scroll_history_down();
        assert_eq!(app.history_scroll_offset, 1);
        app.scroll_history_up();
        app.scroll_history_up();
        assert_eq!(app.history_scroll_offset, 0);
    }
}
