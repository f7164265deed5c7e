//! Configuration management for the applicant matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub data: DataConfig,
    pub output: OutputConfig,
    pub assistant: AssistantConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Applicant file (JSON or CSV) used when `--applicants` is not given
    pub applicants_path: PathBuf,
    /// Saved custom filters and hiring pipelines
    pub workspace_path: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantConfig {
    /// Type answers out chunk by chunk instead of printing them at once
    pub streaming: bool,
    /// Multiplier on every streaming delay; 0 disables sleeping
    pub time_scale: f64,
    pub thinking_step_ms: u64,
    /// How many top shortlist matches to pre-select into a new pipeline
    pub shortlist_preselect: usize,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("applicant-matcher");

        Self {
            data: DataConfig {
                applicants_path: data_dir.join("applicants.json"),
                workspace_path: data_dir.join("workspace.json"),
            },
            output: OutputConfig {
                format: OutputFormat::Console,
                detailed: false,
                color_output: true,
            },
            assistant: AssistantConfig {
                streaming: true,
                time_scale: 1.0,
                thinking_step_ms: 900,
                shortlist_preselect: 5,
            },
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults on first use
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("applicant-matcher")
            .join("config.toml")
    }

    fn validate(&self) -> Result<()> {
        if !self.assistant.time_scale.is_finite() || self.assistant.time_scale < 0.0 {
            return Err(MatcherError::Configuration(format!(
                "assistant.time_scale must be a non-negative number, got {}",
                self.assistant.time_scale
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_first_load_writes_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.assistant.shortlist_preselect, 5);
        assert_eq!(config.assistant.thinking_step_ms, 900);

        let reloaded = Config::load_from(&path).unwrap();
        assert_eq!(reloaded, config);
    }

    #[test]
    fn test_negative_time_scale_rejected() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut config = Config::default();
        config.assistant.time_scale = -1.0;
        config.save_to(&path).unwrap();

        assert!(matches!(Config::load_from(&path), Err(MatcherError::Configuration(_))));
    }
}
