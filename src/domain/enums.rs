use serde::{Deserialize, Serialize};

/// Lifecycle status of a focus task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskStatus {
    Active,
    Completed,
}

/// Which screen is showing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Dashboard,
    Statistics,
}

impl View {
    /// Switch to the other screen
    pub fn toggle(self) -> Self {
        match self {
            View::Dashboard => View::Statistics,
            View::Statistics => View::Dashboard,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Dashboard => "Focus",
            View::Statistics => "Statistics",
        }
    }
}

/// UI mode for the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    Normal,
    /// Typing into the new-task form
    EditingTask,
    /// Waiting for the user to confirm clearing history
    ConfirmClear,
}

/// Colour theme, persisted in config.json
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Retro,
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
            Theme::Retro => "retro",
        }
    }

    /// Next theme in the cycle
    pub fn next(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Retro,
            Theme::Retro => Theme::Light,
        }
    }
}

impl Default for Theme {
    fn default() -> Self {
        Theme::Light
    }
}
