use super::files::{atomic_write, read_file, slot_file};
use crate::domain::Task;
use crate::store::{TaskStore, TasksState};
use serde_json::Value;
use std::path::PathBuf;
use thiserror::Error;

/// Slot the task state is stored under
pub const STATE_KEY: &str = "focused_tasks_data";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to read {path}: {message}")]
    Read { path: PathBuf, message: String },
    #[error("failed to serialize state: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("failed to write {path}: {message}")]
    Write { path: PathBuf, message: String },
}

/// Durable key/value slots for the task state
pub trait StateStorage {
    /// Load a stored state. `Ok(None)` when the slot is absent or malformed;
    /// `Err` when the slot exists but could not be read.
    fn try_load(&self, key: &str) -> Result<Option<TasksState>, StorageError>;

    fn save(&self, key: &str, state: &TasksState) -> Result<(), StorageError>;

    /// Load a stored state, treating any failure as "no prior state"
    fn load(&self, key: &str) -> Option<TasksState> {
        self.try_load(key).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read stored state");
            None
        })
    }
}

/// One JSON file per key in the data directory
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    dir: PathBuf,
}

impl JsonFileStorage {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        Self { dir: dir.into() }
    }
}

impl StateStorage for JsonFileStorage {
    fn try_load(&self, key: &str) -> Result<Option<TasksState>, StorageError> {
        let path = slot_file(&self.dir, key);
        let content = read_file(&path).map_err(|e| StorageError::Read {
            path: path.clone(),
            message: format!("{:#}", e),
        })?;
        if content.trim().is_empty() {
            return Ok(None);
        }

        let state = parse_snapshot(&content);
        if state.is_none() {
            tracing::warn!(path = %path.display(), "stored state is malformed, starting fresh");
        }
        Ok(state)
    }

    fn save(&self, key: &str, state: &TasksState) -> Result<(), StorageError> {
        let path = slot_file(&self.dir, key);
        let json = serde_json::to_string_pretty(state)?;
        atomic_write(&path, &json).map_err(|e| StorageError::Write {
            path: path.clone(),
            message: format!("{:#}", e),
        })
    }
}

/// Parse a stored state, tolerating partial or damaged records.
///
/// Anything that is not a JSON object yields `None`. A missing or unreadable
/// `activeTask` becomes no active task; unreadable history entries are skipped.
pub fn parse_snapshot(content: &str) -> Option<TasksState> {
    let value: Value = serde_json::from_str(content).ok()?;
    let object = value.as_object()?;

    let active_task = object
        .get("activeTask")
        .and_then(|raw| serde_json::from_value::<Option<Task>>(raw.clone()).ok())
        .flatten();

    let completed_tasks = match object.get("completedTasks") {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| serde_json::from_value::<Task>(item.clone()).ok())
            .collect(),
        _ => Vec::new(),
    };

    Some(TasksState {
        active_task,
        completed_tasks,
        is_loading: false,
    })
}

/// Restore the store from storage and keep storage in step with every
/// later transition. Save failures are logged and otherwise ignored.
///
/// The saver is attached after the snapshot is applied, so loading never
/// rewrites the slot. When the slot exists but cannot be read, nothing is
/// saved for the rest of the session rather than overwriting it.
pub fn load_and_persist<S>(store: &mut TaskStore, storage: S, key: &'static str)
where
    S: StateStorage + 'static,
{
    match storage.try_load(key) {
        Ok(snapshot) => {
            store.set_tasks_state(snapshot.unwrap_or_default());
            store.subscribe(move |state| {
                if let Err(e) = storage.save(key, state) {
                    tracing::warn!(error = %e, "failed to save tasks state");
                }
            });
        }
        Err(e) => {
            tracing::error!(error = %e, "stored state unreadable, running without saving");
            store.set_tasks_state(TasksState::default());
        }
    }
}
