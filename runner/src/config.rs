use std::path::PathBuf;
use std::time::Duration;

use autosnek_common::config::{
    ConfigManager, FileContentConfigProvider, Validate, YamlConfigSerializer, check_range,
};
use autosnek_common::games::snake::{SnakeSessionSettings, TickSpeed};
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "autosnek_config.yaml";

const MAX_TICK_INTERVAL_MS: u64 = 5000;

fn get_config_path() -> PathBuf {
    if let Ok(exe_path) = std::env::current_exe()
        && let Some(exe_dir) = exe_path.parent()
    {
        return exe_dir.join(CONFIG_FILE_NAME);
    }
    PathBuf::from(CONFIG_FILE_NAME)
}

pub fn get_config_manager(
    path: Option<PathBuf>,
) -> ConfigManager<FileContentConfigProvider, RunnerConfig, YamlConfigSerializer> {
    ConfigManager::from_yaml_file(path.unwrap_or_else(get_config_path))
}

#[derive(Debug, PartialEq, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct RunnerConfig {
    pub session: SnakeSessionSettings,
    pub default_tick_interval_ms: u64,
    pub fast_tick_interval_ms: u64,
    pub seed: Option<u64>,
    /// Start playing right away instead of waiting in the welcome screen.
    pub autostart: bool,
    pub auto_restart: bool,
    pub render: bool,
}

impl RunnerConfig {
    pub fn tick_interval(&self, speed: TickSpeed) -> Duration {
        match speed {
            TickSpeed::Default => Duration::from_millis(self.default_tick_interval_ms),
            TickSpeed::Fast => Duration::from_millis(self.fast_tick_interval_ms),
        }
    }
}

impl Validate for RunnerConfig {
    fn validate(&self) -> Result<(), String> {
        self.session.validate()?;
        check_range(
            "default_tick_interval_ms",
            self.default_tick_interval_ms,
            1,
            MAX_TICK_INTERVAL_MS,
        )?;
        check_range(
            "fast_tick_interval_ms",
            self.fast_tick_interval_ms,
            1,
            MAX_TICK_INTERVAL_MS,
        )?;
        if self.fast_tick_interval_ms > self.default_tick_interval_ms {
            return Err(
                "fast_tick_interval_ms must not exceed default_tick_interval_ms".to_string(),
            );
        }
        Ok(())
    }
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            session: SnakeSessionSettings::default(),
            default_tick_interval_ms: 180,
            fast_tick_interval_ms: 1,
            seed: None,
            autostart: true,
            auto_restart: false,
            render: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autosnek_common::config::{ConfigContentProvider, ConfigSerializer};
    use autosnek_common::games::snake::NavigationMode;

    fn get_temp_file_path() -> PathBuf {
        std::env::temp_dir().join(format!(
            "temp_autosnek_runner_config_{}.yaml",
            std::process::id()
        ))
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RunnerConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_config_can_be_serialized_and_deserialized_string() {
        let default_config = RunnerConfig::default();
        let serializer = YamlConfigSerializer::new();
        let serialized = serializer.serialize(&default_config).unwrap();
        let deserialized: RunnerConfig = serializer.deserialize(&serialized).unwrap();
        assert_eq!(default_config, deserialized);
    }

    #[test]
    fn test_config_can_be_written_and_read_from_file() {
        let mut config = RunnerConfig::default();
        config.session.navigation = NavigationMode::LongestPath;
        config.seed = Some(1234);
        let file_path = get_temp_file_path();

        let manager = get_config_manager(Some(file_path.clone()));
        manager.set_config(&config).unwrap();

        let content = FileContentConfigProvider::new(file_path.clone())
            .get_config_content()
            .unwrap()
            .unwrap();
        assert!(content.contains("longest_path"));

        let reader = get_config_manager(Some(file_path.clone()));
        assert_eq!(reader.get_config().unwrap(), config);
        let _ = std::fs::remove_file(file_path);
    }

    #[test]
    fn test_fast_interval_must_not_exceed_default() {
        let config = RunnerConfig {
            default_tick_interval_ms: 10,
            fast_tick_interval_ms: 20,
            ..RunnerConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_tick_interval_follows_speed() {
        let config = RunnerConfig::default();
        assert_eq!(config.tick_interval(TickSpeed::Default), Duration::from_millis(180));
        assert_eq!(config.tick_interval(TickSpeed::Fast), Duration::from_millis(1));
    }
}
