use crate::domain::Theme;
use crate::notifications::DEFAULT_ALERT_REPEAT_MS;
use crate::ticker::DEFAULT_TICK_MS;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User settings stored in config.json
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Preset selected when the task form opens
    pub default_duration_minutes: u32,
    /// Durations offered by the task form
    pub duration_presets: Vec<u32>,
    pub tick_interval_ms: u64,
    /// Ring the terminal bell when a countdown expires
    pub alert_enabled: bool,
    pub alert_repeat_ms: u64,
    pub theme: Theme,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_duration_minutes: 25,
            duration_presets: vec![25, 45, 60, 90],
            tick_interval_ms: DEFAULT_TICK_MS,
            alert_enabled: true,
            alert_repeat_ms: DEFAULT_ALERT_REPEAT_MS,
            theme: Theme::Light,
        }
    }
}

impl Config {
    /// Positive presets in ascending order, always including the default
    pub fn presets(&self) -> Vec<u32> {
        let mut presets: Vec<u32> = self
            .duration_presets
            .iter()
            .copied()
            .filter(|minutes| *minutes > 0)
            .collect();
        if self.default_duration_minutes > 0 {
            presets.push(self.default_duration_minutes);
        }
        presets.sort_unstable();
        presets.dedup();
        if presets.is_empty() {
            presets = Config::default().duration_presets;
        }
        presets
    }

    /// Index of the default duration within `presets()`
    pub fn default_preset_index(&self) -> usize {
        self.presets()
            .iter()
            .position(|minutes| *minutes == self.default_duration_minutes)
            .unwrap_or(0)
    }

    pub fn alert_repeat(&self) -> Duration {
        Duration::from_millis(self.alert_repeat_ms.max(250))
    }
}

/// Load config from config.json, defaults if the file doesn't exist
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config> {
    let path = path.as_ref();

    if !path.exists() {
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config: {}", path.display()))?;
    let config: Config = serde_json::from_str(&content)
        .with_context(|| format!("Invalid config: {}", path.display()))?;
    Ok(config)
}

/// Save config to config.json
pub fn save_config<P: AsRef<Path>>(path: P, config: &Config) -> Result<()> {
    let json = serde_json::to_string_pretty(config)?;
    crate::persistence::atomic_write(path, &json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_nonexistent_config() {
        let temp_dir = tempdir().unwrap();
        let config = load_config(temp_dir.path().join("config.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");

        let mut config = Config::default();
        config.theme = Theme::Retro;
        config.default_duration_minutes = 45;
        config.alert_enabled = false;

        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, r#"{ "theme": "dark" }"#).unwrap();

        let config = load_config(&path).unwrap();
        assert_eq!(config.theme, Theme::Dark);
        assert_eq!(config.default_duration_minutes, 25);
        assert_eq!(config.tick_interval_ms, 1000);
    }

    #[test]
    fn test_invalid_config_is_error() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config.json");
        std::fs::write(&path, "{ theme").unwrap();
        assert!(load_config(&path).is_err());
    }

    #[test]
    fn test_presets_are_sanitized() {
        let config = Config {
            default_duration_minutes: 30,
            duration_presets: vec![60, 0, 25, 60],
            ..Config::default()
        };
        assert_eq!(config.presets(), vec![25, 30, 60]);
        assert_eq!(config.default_preset_index(), 1);

        let empty = Config {
            default_duration_minutes: 0,
            duration_presets: Vec::new(),
            ..Config::default()
        };
        assert_eq!(empty.presets(), vec![25, 45, 60, 90]);
        assert_eq!(empty.default_preset_index(), 0);
    }
}
