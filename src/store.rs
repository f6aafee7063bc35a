use crate::domain::{Millis, Task};
use serde::{Deserialize, Serialize};

/// Source of the current wall-clock time
pub trait Clock {
    fn now_millis(&self) -> Millis;
}

/// Reads the system clock
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> Millis {
        chrono::Utc::now().timestamp_millis()
    }
}

/// Whole application state, persisted as a flat record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TasksState {
    #[serde(default)]
    pub active_task: Option<Task>,
    /// Newest first
    #[serde(default)]
    pub completed_tasks: Vec<Task>,
    #[serde(default)]
    pub is_loading: bool,
}

impl Default for TasksState {
    fn default() -> Self {
        Self {
            active_task: None,
            completed_tasks: Vec::new(),
            is_loading: true,
        }
    }
}

/// Checks the new-task form values: non-empty text, positive minutes that fit in seconds
pub fn is_valid_task_input(text: &str, duration_minutes: u32) -> bool {
    !text.trim().is_empty() && duration_minutes > 0 && duration_minutes.checked_mul(60).is_some()
}

impl TasksState {
    /// Start a task, force-completing any task that is still active.
    /// Returns false (and leaves the state untouched) on invalid input.
    pub fn start_new_task(&mut self, text: &str, duration_minutes: u32, now: Millis) -> bool {
        if !is_valid_task_input(text, duration_minutes) {
            return false;
        }

        if let Some(previous) = self.active_task.take() {
            self.completed_tasks.insert(0, previous.into_completed(now));
        }
        self.active_task = Some(Task::new(text, duration_minutes * 60, now));
        true
    }

    /// Complete the active task at `end_time` (or `now`). No-op without an active task.
    pub fn complete_task(&mut self, end_time: Option<Millis>, now: Millis) -> bool {
        match self.active_task.take() {
            Some(task) => {
                let end = end_time.unwrap_or(now);
                self.completed_tasks.insert(0, task.into_completed(end));
                true
            }
            None => false,
        }
    }

    pub fn clear_completed_tasks(&mut self) {
        self.completed_tasks.clear();
    }

    /// Replace everything from a loaded snapshot. Records that break the
    /// active/completed invariants are dropped; loading is always finished.
    pub fn set_tasks_state(&mut self, snapshot: TasksState) {
        let TasksState {
            active_task,
            completed_tasks,
            ..
        } = snapshot;

        let total = completed_tasks.len();
        self.active_task = active_task.filter(|task| {
            let valid = task.is_valid_active();
            if !valid {
                tracing::warn!(id = %task.id, "discarding malformed active task from snapshot");
            }
            valid
        });
        self.completed_tasks = completed_tasks
            .into_iter()
            .filter(Task::is_valid_completed)
            .collect();
        if self.completed_tasks.len() != total {
            tracing::warn!(
                dropped = total - self.completed_tasks.len(),
                "discarding malformed completed tasks from snapshot"
            );
        }
        self.is_loading = false;
    }
}

type Listener = Box<dyn FnMut(&TasksState)>;

/// Owns the application state. Every committed transition is pushed to the
/// subscribers, which is how persistence keeps up with the in-memory state.
pub struct TaskStore {
    state: TasksState,
    clock: Box<dyn Clock>,
    listeners: Vec<Listener>,
}

impl TaskStore {
    pub fn new(clock: Box<dyn Clock>) -> Self {
        Self {
            state: TasksState::default(),
            clock,
            listeners: Vec::new(),
        }
    }

    pub fn with_system_clock() -> Self {
        Self::new(Box::new(SystemClock))
    }

    #[cfg(test)]
    pub fn state(&self) -> &TasksState {
        &self.state
    }

    pub fn active_task(&self) -> Option<&Task> {
        self.state.active_task.as_ref()
    }

    pub fn completed_tasks(&self) -> &[Task] {
        &self.state.completed_tasks
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn now(&self) -> Millis {
        self.clock.now_millis()
    }

    /// Register a change listener, called after each committed transition
    pub fn subscribe<F>(&mut self, listener: F)
    where
        F: FnMut(&TasksState) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn start_new_task(&mut self, text: &str, duration_minutes: u32) {
        let now = self.now();
        if self.state.start_new_task(text, duration_minutes, now) {
            tracing::info!(text = text.trim(), duration_minutes, "started task");
            self.commit();
        } else {
            tracing::warn!(duration_minutes, "ignoring start with invalid task input");
        }
    }

    pub fn complete_task(&mut self, end_time: Option<Millis>) {
        let now = self.now();
        if self.state.complete_task(end_time, now) {
            tracing::info!(completed = self.state.completed_tasks.len(), "completed task");
            self.commit();
        }
    }

    pub fn clear_completed_tasks(&mut self) {
        self.state.clear_completed_tasks();
        tracing::info!("cleared completed tasks");
        self.commit();
    }

    pub fn set_tasks_state(&mut self, snapshot: TasksState) {
        self.state.set_tasks_state(snapshot);
        tracing::debug!(
            active = self.state.active_task.is_some(),
            completed = self.state.completed_tasks.len(),
            "loaded tasks state"
        );
        self.commit();
    }

    fn commit(&mut self) {
        for listener in self.listeners.iter_mut() {
            listener(&self.state);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::enums::TaskStatus;
    use pretty_assertions::assert_eq;
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Clock the test moves by hand
    #[derive(Clone, Default)]
    pub(crate) struct ManualClock(pub Rc<Cell<Millis>>);

    impl ManualClock {
        pub(crate) fn at(now: Millis) -> Self {
            Self(Rc::new(Cell::new(now)))
        }

        pub(crate) fn set(&self, now: Millis) {
            self.0.set(now);
        }

        pub(crate) fn advance(&self, ms: Millis) {
            self.0.set(self.0.get() + ms);
        }
    }

    impl Clock for ManualClock {
        fn now_millis(&self) -> Millis {
            self.0.get()
        }
    }

    fn create_test_store(now: Millis) -> (TaskStore, ManualClock) {
        let clock = ManualClock::at(now);
        let mut store = TaskStore::new(Box::new(clock.clone()));
        store.set_tasks_state(TasksState::default());
        (store, clock)
    }

    #[test]
    fn test_initial_state_is_loading() {
        let store = TaskStore::new(Box::new(ManualClock::at(0)));
        assert!(store.is_loading());
        assert!(store.active_task().is_none());
        assert!(store.completed_tasks().is_empty());
    }

    #[test]
    fn test_start_new_task() {
        let (mut store, _clock) = create_test_store(1_000);
        store.start_new_task("  Write report  ", 25);

        let task = store.active_task().unwrap();
        assert_eq!(task.text, "Write report");
        assert_eq!(task.planned_duration_seconds, 1500);
        assert_eq!(task.status, TaskStatus::Active);
        assert_eq!(task.start_time, 1_000);
        assert!(task.end_time.is_none());
    }

    #[test]
    fn test_start_new_task_completes_previous() {
        let (mut store, clock) = create_test_store(0);
        store.start_new_task("First", 25);
        let first_id = store.active_task().unwrap().id;

        clock.set(60_000);
        store.start_new_task("Second", 45);

        assert_eq!(store.completed_tasks().len(), 1);
        let previous = &store.completed_tasks()[0];
        assert_eq!(previous.id, first_id);
        assert_eq!(previous.status, TaskStatus::Completed);
        assert_eq!(previous.end_time, Some(60_000));

        let active = store.active_task().unwrap();
        assert_eq!(active.text, "Second");
        assert_eq!(active.start_time, 60_000);
    }

    #[test]
    fn test_start_new_task_rejects_invalid_input() {
        let (mut store, _clock) = create_test_store(0);
        store.start_new_task("Keep", 10);
        let before = store.state().clone();

        store.start_new_task("   ", 25);
        store.start_new_task("Zero", 0);
        store.start_new_task("Huge", u32::MAX);

        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_complete_task_uses_given_end_time() {
        let (mut store, clock) = create_test_store(0);
        store.start_new_task("Read", 25);
        clock.set(5_000_000);
        store.complete_task(Some(1_500_000));

        assert!(store.active_task().is_none());
        assert_eq!(store.completed_tasks()[0].end_time, Some(1_500_000));
    }

    #[test]
    fn test_complete_task_defaults_to_now() {
        let (mut store, clock) = create_test_store(0);
        store.start_new_task("Read", 25);
        clock.set(90_000);
        store.complete_task(None);

        assert_eq!(store.completed_tasks()[0].end_time, Some(90_000));
    }

    #[test]
    fn test_complete_task_is_idempotent() {
        let (mut store, clock) = create_test_store(0);
        store.start_new_task("Read", 25);
        clock.set(10_000);
        store.complete_task(None);
        let after_first = store.state().clone();

        clock.set(20_000);
        store.complete_task(None);

        assert_eq!(store.state(), &after_first);
        assert_eq!(store.completed_tasks().len(), 1);
    }

    #[test]
    fn test_completed_tasks_are_newest_first() {
        let (mut store, clock) = create_test_store(0);
        for (i, name) in ["one", "two", "three"].iter().enumerate() {
            clock.set(i as Millis * 1000);
            store.start_new_task(name, 5);
            store.complete_task(None);
        }
        let names: Vec<&str> = store.completed_tasks().iter().map(|t| t.text.as_str()).collect();
        assert_eq!(names, vec!["three", "two", "one"]);
    }

    #[test]
    fn test_clear_completed_tasks_keeps_active() {
        let (mut store, _clock) = create_test_store(0);
        store.start_new_task("Old", 5);
        store.start_new_task("Current", 5);
        store.clear_completed_tasks();

        assert!(store.completed_tasks().is_empty());
        assert_eq!(store.active_task().unwrap().text, "Current");
    }

    #[test]
    fn test_set_tasks_state_finishes_loading_and_filters() {
        let mut store = TaskStore::new(Box::new(ManualClock::at(0)));
        let good = Task::new("Good", 60, 0).into_completed(60_000);
        let mut bad = Task::new("Bad", 60, 10_000);
        bad.status = TaskStatus::Completed;
        bad.end_time = Some(5_000);
        let mut stale_active = Task::new("Stale", 60, 0);
        stale_active.status = TaskStatus::Completed;

        store.set_tasks_state(TasksState {
            active_task: Some(stale_active),
            completed_tasks: vec![good.clone(), bad],
            is_loading: true,
        });

        assert!(!store.is_loading());
        assert!(store.active_task().is_none());
        assert_eq!(store.completed_tasks(), &[good]);
    }

    #[test]
    fn test_subscribers_see_each_commit() {
        let (mut store, _clock) = create_test_store(0);
        let seen: Rc<RefCell<Vec<usize>>> = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        store.subscribe(move |state| sink.borrow_mut().push(state.completed_tasks.len()));

        store.start_new_task("a", 1);
        store.complete_task(None);
        store.complete_task(None); // no-op, no notification
        store.clear_completed_tasks();

        assert_eq!(*seen.borrow(), vec![0, 1, 0]);
    }
}
